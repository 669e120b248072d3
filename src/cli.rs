use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "runpad",
    about = "Terminal code editor backed by a remote execution service",
    version
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["run", "list_languages", "list_runtimes"])
        .multiple(false)
))]
pub struct Cli {
    /// Source file to open (or run with --run).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language to use: python, javascript or java.
    /// Inferred from FILE's extension when omitted.
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Run FILE (or piped stdin) once and print the output instead of opening the editor.
    #[arg(short = 'r', long)]
    pub run: bool,

    /// List the supported languages and their runtime versions.
    #[arg(long = "list-languages", visible_alias = "ll")]
    pub list_languages: bool,

    /// List the runtimes installed on the execution service.
    #[arg(long = "list-runtimes")]
    pub list_runtimes: bool,

    /// Execution service base URL (overrides PISTON_API_URL).
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT; 0 disables it).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Verbose logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
