//! runpad: a terminal code editor that runs snippets on a remote Piston service.

pub mod cli;
pub mod config;
pub mod editor;
pub mod execution;
pub mod language;
pub mod logging;
pub mod notify;
pub mod printer;
pub mod runner;
pub mod session;
pub mod tui;
pub mod utils;
