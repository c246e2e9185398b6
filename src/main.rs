mod cli;
mod logging;
mod progress_bar;

use std::io;
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use progress_bar::CliReporter;
use reel_duper::format::{bytes_human, comma_int};
use reel_duper::report::{write_json, write_report, Report};
use reel_duper::{source, AppConfig, EngineOptions, IgnoreReason, ReconcileEngine};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut config = match reel_duper::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Process(process_args)) => {
            process_args.apply(&mut config);
            if let Err(err) = run_process(&config) {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Some(Commands::Classify(classify_args)) => {
            let bucket = reel_duper::classify(
                &classify_args.label,
                classify_args.width,
                classify_args.height,
            );
            println!("{}", bucket);
        }
        Some(Commands::CheckExtra { paths }) => {
            for path in paths {
                let verdict = if reel_duper::is_extra(&path) {
                    "extra".yellow()
                } else {
                    "feature".green()
                };
                println!("{}\t{}", verdict, path);
            }
        }
        Some(Commands::PrintConfig) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => {
                error!("Error rendering configuration: {}", err);
                process::exit(1);
            }
        },
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

fn run_process(config: &AppConfig) -> anyhow::Result<()> {
    let input_path = Path::new(&config.input_path);
    let snapshot = source::load_snapshot(input_path)
        .with_context(|| format!("reading snapshot {}", input_path.display()))?;

    let server = snapshot.server.clone();
    let sections = source::select_sections(
        snapshot.into_inputs(),
        &config.sections,
        config.include_shows,
    );

    let engine = ReconcileEngine::new(EngineOptions::from(config));
    let reporter = CliReporter::new();
    let report = engine.reconcile(server, sections, &reporter)?;

    match &config.output_path {
        Some(output) => {
            write_json(&report, Path::new(output), config.pretty)
                .with_context(|| format!("writing report {}", output))?;
            info!("Report written to {}", output);
        }
        None => {
            let stdout = io::stdout();
            write_report(&report, stdout.lock(), config.pretty)?;
            println!();
        }
    }

    log_summary(&report);
    Ok(())
}

fn log_summary(report: &Report) {
    let summary = &report.summary;
    let totals = &summary.totals;

    info!(
        "Policy: {} ({}), verification: {}, extras ignored: {}",
        summary.duplicate_policy.to_string().cyan(),
        summary.duplicate_policy.description(),
        summary.verification_performed,
        summary.extras_ignored,
    );
    for library in &summary.libraries {
        info!(
            "{}: {} duplicate items, {} versions, {} ghost parts",
            library.section_title.bold(),
            comma_int(library.tally.duplicate_items as u64),
            comma_int(library.tally.total_versions as u64),
            comma_int(library.tally.ghost_parts as u64),
        );
    }
    info!(
        "{} duplicate items in {} libraries, {} versions, {} on disk",
        comma_int(totals.duplicate_items as u64).red(),
        summary.total_libraries,
        comma_int(totals.total_versions as u64),
        bytes_human(totals.total_bytes).red(),
    );
    info!(
        "{} ghost parts in {} items, {} below two versions, {} ignored as 4K+1080 pairs",
        comma_int(totals.ghost_parts as u64).yellow(),
        comma_int(totals.items_with_ghosts as u64),
        comma_int(totals.variants_excluded as u64),
        report.ignored_for(IgnoreReason::FourKPlus1080Pair).count(),
    );
    if summary.libraries_skipped > 0 {
        info!(
            "{} libraries skipped after failed fetches",
            summary.libraries_skipped.to_string().yellow()
        );
    }
}
