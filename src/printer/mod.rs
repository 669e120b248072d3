//! Plain-terminal printers for one-shot mode.

use owo_colors::OwoColorize;

use crate::execution::Runtime;
use crate::language::Language;
use crate::notify::Notification;

pub struct TextPrinter {
    pub color: bool,
}

impl TextPrinter {
    pub fn print_output(&self, text: &str) {
        if text.ends_with('\n') {
            print!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    /// Notifications go to stderr so piped output stays clean.
    pub fn print_notification(&self, n: &Notification) {
        eprintln!("{}", format_notification(n, self.color));
    }

    pub fn print_languages(&self) {
        for lang in Language::ALL {
            let d = lang.descriptor();
            let key = format!("{:<12}", d.key);
            if self.color {
                println!("{} {:<12} {}", key.cyan(), d.name, d.version.green());
            } else {
                println!("{} {:<12} {}", key, d.name, d.version);
            }
        }
    }

    pub fn print_runtimes(&self, runtimes: &[Runtime]) {
        for rt in runtimes {
            let aliases = if rt.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", rt.aliases.join(", "))
            };
            let supported = rt.language.parse::<Language>().ok().filter(|l| {
                l.descriptor().version == rt.version && l.descriptor().id == rt.language
            });
            let marker = if supported.is_some() { "*" } else { " " };
            if self.color && supported.is_some() {
                let name = format!("{:<16}", rt.language);
                println!("{} {} {}{}", marker.green(), name.green(), rt.version, aliases);
            } else {
                println!("{} {:<16} {}{}", marker, rt.language, rt.version, aliases);
            }
        }
    }
}

pub fn format_notification(n: &Notification, color: bool) -> String {
    let title = if color {
        format!("{}", n.title.red())
    } else {
        n.title.clone()
    };
    format!("{}: {}", title, n.description)
}
