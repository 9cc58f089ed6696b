// Mon Oct 19 2026 - Alex

pub mod cli;

pub use cli::{Args, Command, CommandHandler};

use colored::Colorize;

// Status lines go to stderr; stdout may be carrying generated code.

pub fn print_info(message: &str) {
    eprintln!("{} {}", "[*]".blue(), message);
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "[+]".green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[!]".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
