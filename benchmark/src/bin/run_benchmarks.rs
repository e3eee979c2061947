// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run the serializer comparison and print the results.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tpc_benchmark::{BenchmarkRunner, ConsoleRenderer, JsonReporter, MeasurementProtocol};
use tpc_core::codecs::default_codecs;
use tpc_core::{CodecName, CodecRegistry, Config, ConfigLoader, Count, MeasurementSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Comma-separated table followed by chart lines
    Table,
    /// Pretty-printed JSON report
    Json,
}

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Compare serializers on a fixed media payload")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calls per trial (overrides the config file)
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Trials per operation (overrides the config file)
    #[arg(short, long)]
    trials: Option<u32>,

    /// Warmup per operation in milliseconds (overrides the config file)
    #[arg(long)]
    warmup_ms: Option<u64>,

    /// Advisory pause half-length in milliseconds (overrides the config file)
    #[arg(long)]
    pause_ms: Option<u64>,

    /// Codecs to run (all if not specified)
    #[arg(long = "codec")]
    codecs: Vec<String>,

    /// Run in quick mode (short warmup, few iterations, no pauses)
    #[arg(long)]
    quick: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// List the available codecs and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries results.
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => Config::default(),
    };
    let settings = apply_overrides(config.measurement, &args)?;

    let mut registry = CodecRegistry::new();
    registry.register_all(default_codecs())?;

    if args.list {
        for entry in registry.iter() {
            println!("{:<24} {}", entry.name, entry.codec.family());
        }
        return Ok(());
    }

    let selected = if args.codecs.is_empty() {
        config.codecs
    } else {
        Some(
            args.codecs
                .iter()
                .map(|name| CodecName::new(name.as_str()))
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    if let Some(names) = selected {
        registry.retain_named(&names)?;
    }

    tracing::info!(
        codecs = registry.len(),
        iterations = %settings.iterations,
        trials = %settings.trials,
        warmup_ms = settings.warmup.as_millis() as u64,
        "Starting"
    );

    let runner = BenchmarkRunner::new(registry, MeasurementProtocol::from_settings(settings));

    match args.format {
        OutputFormat::Table => {
            let mut renderer = ConsoleRenderer::new(io::stdout().lock());
            let summary = runner.run(&mut renderer)?;

            for mismatch in &summary.mismatches {
                eprintln!("WARN: {}", mismatch);
            }
            for failure in &summary.failures {
                eprintln!("FAILED: {}: {}", failure.codec, failure.error);
            }
        }
        OutputFormat::Json => {
            let mut renderer = ConsoleRenderer::new(io::sink());
            let summary = runner.run(&mut renderer)?;
            let report = summary.to_report(runner.protocol());
            JsonReporter::write(&report, io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Layer `--quick` and explicit flags over the loaded settings.
fn apply_overrides(
    mut settings: MeasurementSettings,
    args: &Args,
) -> anyhow::Result<MeasurementSettings> {
    if args.quick {
        settings.iterations = Count::at_least_one(100);
        settings.trials = Count::at_least_one(3);
        settings.create_multiplier = Count::at_least_one(10);
        settings.warmup = Duration::from_millis(200);
        settings.pause = Duration::ZERO;
    }

    if let Some(iterations) = args.iterations {
        settings.iterations = Count::new("iterations", iterations)?;
    }
    if let Some(trials) = args.trials {
        settings.trials = Count::new("trials", trials)?;
    }
    if let Some(warmup_ms) = args.warmup_ms {
        settings.set_warmup_ms(warmup_ms)?;
    }
    if let Some(pause_ms) = args.pause_ms {
        settings.set_pause_ms(pause_ms)?;
    }

    Ok(settings)
}
