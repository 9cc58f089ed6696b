// Mon Oct 19 2026 - Alex

use super::args::{Args, CheckArgs, Command, GenerateArgs, LayoutArgs};
use crate::config::Config;
use crate::engine::{Driver, GenerationFailure};
use crate::model::ClassModel;
use crate::output::OutputSink;
use crate::ui::{print_error, print_info, print_success, print_warning};
use crate::utils::{format_duration, LoggingUtils};
use anyhow::{bail, Context};
use colored::Colorize;
use std::path::Path;
use std::time::Instant;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        LoggingUtils::init(LoggingUtils::level_from_str(&args.log_level), args.quiet);

        let config = match &args.config {
            Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        match args.command {
            Command::Generate(gen_args) => self.handle_generate(gen_args, config, args.quiet),
            Command::Layout(layout_args) => self.handle_layout(layout_args, config, args.quiet),
            Command::Check(check_args) => self.handle_check(check_args, config, args.quiet),
        }
    }

    fn load_model(&self, path: &Path, quiet: bool) -> anyhow::Result<ClassModel> {
        if !quiet {
            print_info(&format!("Loading class model: {}", path.display()));
        }
        ClassModel::load(path).with_context(|| format!("Failed to load class model {}", path.display()))
    }

    fn report_failures<'a>(&self, failures: impl Iterator<Item = &'a GenerationFailure>) -> usize {
        let mut count = 0;
        for failure in failures {
            if failure.error.is_base_failure() {
                print_warning(&failure.to_string());
            } else {
                print_error(&failure.to_string());
            }
            count += 1;
        }
        count
    }

    fn handle_generate(&self, args: GenerateArgs, config: Config, quiet: bool) -> anyhow::Result<()> {
        let config = args.apply(config);
        config.validate().context("Invalid configuration")?;
        let model = self.load_model(&args.input, quiet)?;

        let start = Instant::now();
        let report = Driver::new(config.clone()).generate(&model);
        let failed = self.report_failures(report.failures());

        if failed > 0 && !config.allow_partial {
            bail!("{} problem(s) found; nothing written (pass --allow-partial to keep the classes that succeeded)", failed);
        }

        let sink = OutputSink::from_option(args.output.as_deref());
        sink.write(&report.source)
            .with_context(|| format!("Failed to write output to {}", sink.describe()))?;

        if !quiet {
            print_success(&format!(
                "Generated {} classes in {} -> {}",
                report.plan.layouts.len().to_string().green(),
                format_duration(start.elapsed()),
                sink.describe()
            ));
            if failed > 0 {
                print_warning(&format!("{} class(es) skipped", failed));
            }
        }
        Ok(())
    }

    fn handle_layout(&self, args: LayoutArgs, config: Config, quiet: bool) -> anyhow::Result<()> {
        let config = args.apply(config);
        config.validate().context("Invalid configuration")?;
        let model = self.load_model(&args.input, quiet)?;

        let plan = Driver::new(config).plan(&model);
        self.report_failures(plan.failures.iter());

        let json = plan.to_json().context("Failed to serialize layouts")?;
        let sink = OutputSink::from_option(args.output.as_deref());
        sink.write(&format!("{}\n", json))
            .with_context(|| format!("Failed to write output to {}", sink.describe()))?;

        if !quiet {
            print_success(&format!("Wrote {} layouts to {}", plan.layouts.len(), sink.describe()));
        }
        Ok(())
    }

    fn handle_check(&self, args: CheckArgs, config: Config, quiet: bool) -> anyhow::Result<()> {
        let config = args.apply(config);
        config.validate().context("Invalid configuration")?;
        let model = self.load_model(&args.input, quiet)?;

        let plan = Driver::new(config).plan(&model);
        if !quiet {
            eprintln!("{}", "Hierarchy".cyan().bold());
            eprintln!("{}", "-".repeat(40).cyan());
            for line in plan.stats.to_string().lines() {
                eprintln!("  {}", line);
            }
            eprintln!();
        }

        let failed = self.report_failures(plan.failures.iter());
        if failed > 0 {
            bail!("{} problem(s) found", failed);
        }
        if !quiet {
            print_success(&format!("All {} classes planned", plan.layouts.len()));
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
