// Mon Oct 19 2026 - Alex

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "classgen")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Generates C structs, vtables and dispatch code from a class model", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON config file; command-line flags override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a C translation unit
    Generate(GenerateArgs),
    /// Dump resolved layouts as JSON
    Layout(LayoutArgs),
    /// Plan only and report problems
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    /// Defaults to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the classes that succeeded even if others failed
    #[arg(long)]
    pub allow_partial: bool,

    #[arg(long)]
    pub no_accessors: bool,

    #[arg(long)]
    pub no_destructors: bool,

    #[arg(long)]
    pub no_comments: bool,

    /// Emit _Static_assert checks of every planned offset
    #[arg(long)]
    pub layout_asserts: bool,

    #[arg(long)]
    pub parallel: bool,

    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long)]
    pub pointer_size: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub pointer_size: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long)]
    pub pointer_size: Option<usize>,
}

impl GenerateArgs {
    /// Layers the flags over a loaded config. An absent flag leaves the
    /// config value as it is.
    pub fn apply(&self, mut config: Config) -> Config {
        if self.allow_partial {
            config = config.with_allow_partial(true);
        }
        if self.no_accessors {
            config = config.with_accessors(false);
        }
        if self.no_destructors {
            config = config.with_destructors(false);
        }
        if self.no_comments {
            config = config.with_comments(false);
        }
        if self.layout_asserts {
            config = config.with_layout_asserts(true);
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        if let Some(threads) = self.threads {
            config = config.with_max_threads(threads);
        }
        match self.pointer_size {
            Some(size) => config.with_pointer_size(size),
            None => config,
        }
    }
}

impl LayoutArgs {
    pub fn apply(&self, config: Config) -> Config {
        match self.pointer_size {
            Some(size) => config.with_pointer_size(size),
            None => config,
        }
    }
}

impl CheckArgs {
    pub fn apply(&self, config: Config) -> Config {
        match self.pointer_size {
            Some(size) => config.with_pointer_size(size),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_flags() {
        let args = Args::try_parse_from([
            "classgen",
            "--log-level",
            "debug",
            "generate",
            "-i",
            "model.json",
            "-o",
            "out.c",
            "--no-accessors",
            "--layout-asserts",
            "--pointer-size",
            "4",
        ])
        .unwrap();
        assert_eq!(args.log_level, "debug");

        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.input, PathBuf::from("model.json"));
        assert_eq!(generate.output, Some(PathBuf::from("out.c")));

        let config = generate.apply(Config::default());
        assert!(!config.emit_accessors);
        assert!(config.emit_destructors);
        assert!(config.emit_layout_asserts);
        assert_eq!(config.pointer_size, 4);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["classgen", "check", "-i", "m.json", "--quiet"]).unwrap();
        assert!(args.quiet);
        assert!(matches!(args.command, Command::Check(_)));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["classgen", "layout"]).is_err());
    }
}
