use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use tracing::{debug, info};

use runpad::{
    cli::Cli,
    config::Config,
    execution::PistonClient,
    language::Language,
    logging,
    printer::TextPrinter,
    runner,
    session::{Action, SessionState},
    tui, utils,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    let mut cfg = Config::load();
    if let Some(url) = &args.url {
        cfg.set("PISTON_API_URL", url.clone());
    }
    if let Some(secs) = args.timeout {
        cfg.set("REQUEST_TIMEOUT", secs.to_string());
    }

    let interactive = !(args.run || args.list_languages || args.list_runtimes);
    let log_guard = logging::init(&cfg.log_dir(), &cfg.log_level(), args.verbose, !interactive);
    let _log_guard = match log_guard {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e:#}");
            None
        }
    };

    let printer = TextPrinter {
        color: !args.no_color && std::io::stdout().is_terminal(),
    };

    if args.list_languages {
        printer.print_languages();
        return Ok(ExitCode::SUCCESS);
    }

    let client = PistonClient::from_config(&cfg).context("Failed to build HTTP client")?;

    if args.list_runtimes {
        let runtimes = client
            .runtimes()
            .await
            .with_context(|| format!("Failed to list runtimes from {}", client.base_url()))?;
        printer.print_runtimes(&runtimes);
        return Ok(ExitCode::SUCCESS);
    }

    let explicit = args
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;
    let language = explicit.or_else(|| args.file.as_deref().and_then(Language::from_path));

    let stdin_is_tty = std::io::stdin().is_terminal();
    let source = match &args.file {
        Some(path) => Some(utils::read_source_file(path)?),
        None if args.run && !stdin_is_tty => Some(utils::read_stdin()?),
        None if args.run => bail!("--run needs a FILE argument or source piped on stdin"),
        None => None,
    };

    let state = match (source, language) {
        (Some(source), lang) => {
            SessionState::with_source(lang.unwrap_or_else(|| cfg.default_language()), source)
        }
        (None, Some(lang)) => SessionState::default().reduce(Action::SetLanguage(lang)),
        (None, None) => match cfg.default_language() {
            Language::JavaScript => SessionState::default(),
            other => SessionState::default().reduce(Action::SetLanguage(other)),
        },
    };
    debug!(language = %state.language, bytes = state.source_text.len(), "session prepared");

    if args.run {
        // No editor widget to wait for in one-shot mode.
        let state = state.reduce(Action::MarkEditorReady);
        let report = runner::run_once(&client, &state).await?;
        return Ok(match report.notification {
            Some(notification) => {
                printer.print_notification(&notification);
                ExitCode::FAILURE
            }
            None => {
                printer.print_output(&report.state.output_text);
                ExitCode::SUCCESS
            }
        });
    }

    info!(url = %client.base_url(), "starting editor");
    let stderr_color = !args.no_color && std::io::stderr().is_terminal();
    tui::run_tui(client, state, cfg.toast_duration(), stderr_color).await?;
    Ok(ExitCode::SUCCESS)
}
