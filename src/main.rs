use std::process;

use anyhow::Context;
use clap::Parser;
use color_print::cformat;
use ping_analysis::config::OutputFormat;
use ping_analysis::report::{build_figures, render_figure};
use ping_analysis::styling::{ERROR_EMOJI, HINT_EMOJI, WARNING_EMOJI, eprintln, println};
use ping_analysis::{AnalysisError, ingest_files};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        let msg = format!("{err:#}");
        eprintln!("{}", cformat!("{ERROR_EMOJI} <red>{msg}</>"));
        if let Some(AnalysisError::MalformedRecord { .. }) = err.downcast_ref::<AnalysisError>() {
            eprintln!(
                "{}",
                cformat!(
                    "{HINT_EMOJI} <dim>Reply lines must start with a DD.MM.YYYY HH:MM:SS timestamp and contain a time=NNms token</>"
                )
            );
        }
        process::exit(1);
    }
}

/// Logs are off unless `-v` is given; `RUST_LOG` overrides either way.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config().context("Invalid configuration")?;

    // Checked up front so a long ingestion is not wasted on a usage error
    let figure_count = config.plot.figure_count();
    if !cli.out.is_empty() && cli.out.len() != figure_count {
        anyhow::bail!(
            "--plot {} produces {figure_count} figure(s) but {} --out file(s) were given",
            config.plot,
            cli.out.len()
        );
    }

    let ingestion = ingest_files(&cli.files)?;
    for skipped in &ingestion.skipped {
        eprintln!("{}", cformat!("{WARNING_EMOJI} <yellow>{skipped}</>"));
    }
    if ingestion.table.width() == 0 {
        eprintln!(
            "{}",
            cformat!("{WARNING_EMOJI} <yellow>No input contained any reply records</>")
        );
    }

    let figures = build_figures(&ingestion.table, config.plot, config.ma_window);

    for (figure, path) in figures.iter().zip(&cli.out) {
        let json = serde_json::to_string_pretty(figure)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} figure to {}", figure.layout, path.display());
    }

    match config.format {
        OutputFormat::Table => {
            for (i, figure) in figures.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", render_figure(figure));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&figures)?);
        }
    }

    Ok(())
}
