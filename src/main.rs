//! MedLite - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medlite::{
    cli::{Args, Commands, Config, Display, Verbosity},
    doctor::Doctor,
    report::{export, Report, SummaryDocument},
    terms::{TermEntry, TermMap},
    MedliteService,
};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity());

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config)?;

    let display = Display::new(
        config.display.color_output,
        config.display.show_progress && args.verbosity().show_progress(),
    );

    match &args.command {
        Commands::Summarize { file, export, .. } => {
            run_summarize(&config, &display, file, *export)?;
        }
        Commands::Translate { file } => {
            let service = build_service(&config, &display)?;
            let report = Report::from_path(file)?;
            println!("{}", service.translate(report.text()));
        }
        Commands::Findings { file } => {
            let service = build_service(&config, &display)?;
            let report = Report::from_path(file)?;
            display.print_findings(&service.findings(report.text()));
        }
        Commands::Terms { search } => {
            list_terms(&config, &display, search.as_deref())?;
        }
        Commands::Doctor => {
            run_doctor(config);
        }
        Commands::Config { init } => {
            show_config(&config, *init, &display)?;
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn build_service(config: &Config, display: &Display) -> Result<MedliteService> {
    let spinner = display.spinner("Loading models...");
    let service = MedliteService::from_config(config);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(service?)
}

fn run_summarize(config: &Config, display: &Display, file: &Path, export_to_disk: bool) -> Result<()> {
    let report = Report::from_path(file)?;
    display.print_stats(report.name(), &report.stats());

    let service = build_service(config, display)?;

    let spinner = display.spinner("Summarizing report...");
    let result = service.generate_summary(&report);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let summary = result?;

    let document = SummaryDocument::new(&summary, &report);
    let format = config.output.format;
    let rendered = format.render(&document)?;
    display.print_document(&document, format, &rendered);

    if export_to_disk {
        let path = export(&document, &report, &config.output_dir(), format)?;
        display.success(&format!("Summary saved to {}", path.display()));
    }

    Ok(())
}

fn list_terms(config: &Config, display: &Display, search: Option<&str>) -> Result<()> {
    let mut map = TermMap::builtin()?;
    if let Some(glossary) = config.glossary_path() {
        map = map.with_glossary_file(&glossary)?;
    }

    let needle = search.map(str::to_lowercase);
    let entries: Vec<&TermEntry> = map
        .entries()
        .iter()
        .filter(|e| match &needle {
            Some(n) => e.term.contains(n.as_str()) || e.plain.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect();

    display.print_terms(&entries);

    if search.is_none() {
        for (term, nested) in map.keys_that_are_values() {
            eprintln!(
                "{} '{}' is replaced with a phrase containing '{}'",
                "note:".dimmed(),
                term,
                nested
            );
        }
    }

    Ok(())
}

fn run_doctor(config: Config) {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &Config, init: bool, display: &Display) -> Result<()> {
    if init {
        let path = Config::default_path().context("Cannot determine home directory")?;
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        Config::default().save(&path)?;
        display.success(&format!("Wrote default configuration to {}", path.display()));
        return Ok(());
    }

    println!("{}", "MedLite Configuration".bold());
    println!();
    println!("{}", toml::to_string_pretty(config).context("Failed to render configuration")?);

    Ok(())
}
