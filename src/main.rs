use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use cli::{Cli, RenderArgs};
use indicatif::{ProgressBar, ProgressStyle};
use resume_pdf::{Configuration, Exporter, Notifier, ResumeData, Severity, CONFIG_FILE};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod config_wizard;

fn main() -> ExitCode {
    env_logger::init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Sample { output } => {
            let sample = resume_pdf::resume::sample::generate();
            let json = serde_json::to_string_pretty(&sample)
                .with_context(|| "Failed to serialize sample resume")?;
            std::fs::write(output, json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Sample resume written to {}", output.display());
            Ok(())
        }
        cli::Commands::Render(args) => render(args),
    }
}

/// Shows export notifications on the spinner line.
struct ConsoleNotifier<'a> {
    progress: &'a ProgressBar,
}

impl Notifier for ConsoleNotifier<'_> {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => self.progress.set_message(message.to_string()),
            Severity::Success => self
                .progress
                .finish_with_message(console::style(message).green().to_string()),
            Severity::Error => self
                .progress
                .abandon_with_message(console::style(message).red().to_string()),
        }
    }
}

fn load_configuration(path: Option<&Path>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None if Path::new(CONFIG_FILE).exists() => {
            println!("Loading configuration...");
            Configuration::load(CONFIG_FILE)
                .with_context(|| format!("Failed to load {CONFIG_FILE}"))
        }
        None => Ok(Configuration::default()),
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let Configuration { mut pdf } = load_configuration(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        pdf.strategy = strategy;
    }
    if let Some(format) = args.format {
        pdf.image_format = format;
    }
    if let Some(max_size) = args.max_size {
        pdf.max_size_bytes = max_size;
    }

    let resume = ResumeData::load(&args.resume)
        .with_context(|| format!("Failed to load resume from {}", args.resume.display()))?;
    let exporter = Exporter::new(pdf).with_context(|| "Invalid export configuration")?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("can parse progress style"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let outcome = exporter
        .export(&resume, &args.out_dir, &ConsoleNotifier { progress: &progress })
        .with_context(|| "Failed to render PDF")?;

    let size = Byte::from_u64(outcome.size as u64).get_appropriate_unit(UnitType::Binary);
    println!();
    println!("  PDF:      {}", outcome.path.display());
    println!("  Pages:    {} ({})", outcome.page_count, exporter.config().strategy);
    println!("  Size:     {size:.2}");
    println!("  Passes:   {}", outcome.passes);
    if outcome.passes > 1 {
        println!(
            "  Regenerated at scale {} to fit the {} budget",
            exporter.config().reduced.scale,
            Byte::from_u64(exporter.config().max_size_bytes).get_appropriate_unit(UnitType::Binary)
        );
    }

    Ok(())
}
