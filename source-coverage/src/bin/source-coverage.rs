// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use source_coverage::source::SourceCoverage;
use source_coverage::{LineEvent, Options, RecordedCoverage, SourceCoverageRecorder};

/// Attribute source line events reported by a debugger to selected source files.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// JSON options selecting the source files.
    #[arg(short, long)]
    config: PathBuf,

    /// JSON array of line events, as `{ "file", "line", "hits" }`.
    #[arg(short, long)]
    events: PathBuf,

    /// Write source coverage JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source coverage JSON from earlier runs, added to the recorded counts.
    #[arg(short, long, num_args = 1..)]
    input_coverage: Vec<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = Options::load(&args.config)?;
    let events = LineEvent::load_all(&args.events)?;

    let mut recorder = SourceCoverageRecorder::new(options.matcher()?);
    let recorded = recorder
        .record(&events)
        .context("unable to attribute coverage to source files")?;

    log::info!("recorded {}/{} line events", recorded, events.len());

    let RecordedCoverage {
        mut coverage,
        unmatched,
    } = recorder.finish();

    for path in &args.input_coverage {
        let input = SourceCoverage::load(path)?;
        coverage
            .merge(&input)
            .with_context(|| format!("unable to merge coverage: {}", path.display()))?;
        log::info!("merged coverage from {}", path.display());
    }

    let json = serde_json::to_string_pretty(&coverage)?;

    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("unable to write coverage: {}", path.display()))?,
        None => println!("{json}"),
    }

    if options.fail_on_unmatched && !unmatched.is_empty() {
        bail!("{} selected source files never matched", unmatched.len());
    }

    Ok(())
}
