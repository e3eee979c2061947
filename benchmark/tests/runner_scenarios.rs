// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end runner scenarios.
//!
//! These tests drive the full cycle (warmup, correctness check, trials,
//! aggregation, rendering) with zero warmup and no pauses.

use std::sync::Arc;
use std::time::Duration;

use tpc_benchmark::{BenchmarkRunner, ConsoleRenderer, MeasurementProtocol, MetricKind};
use tpc_core::codecs::{default_codecs, JsonCodec, ManualCodec};
use tpc_core::{CodecError, CodecRegistry, CodecResult, Media, ObjectCodec};

fn fast_protocol() -> MeasurementProtocol {
    MeasurementProtocol::new()
        .iterations(20)
        .trials(2)
        .create_multiplier(2)
        .warmup(Duration::ZERO)
        .pause(Duration::ZERO)
}

/// Serialize always fails.
struct BrokenSerializer;

impl ObjectCodec for BrokenSerializer {
    fn name(&self) -> &str {
        "broken"
    }

    fn serialize(&self, _media: &Media) -> CodecResult<Vec<u8>> {
        Err(CodecError::serialize("encoder not available"))
    }

    fn deserialize(&self, _bytes: &[u8]) -> CodecResult<Media> {
        Ok(Media::fixture())
    }
}

/// Construction always fails.
struct BrokenConstructor;

impl ObjectCodec for BrokenConstructor {
    fn name(&self) -> &str {
        "no-create"
    }

    fn create(&self) -> CodecResult<Media> {
        Err(CodecError::Construction {
            reason: "fixture unavailable".to_string(),
        })
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        JsonCodec.serialize(media)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        JsonCodec.deserialize(bytes)
    }
}

/// Round-trips with the persons list reversed.
struct ReorderingPersons;

impl ObjectCodec for ReorderingPersons {
    fn name(&self) -> &str {
        "reordering"
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        ManualCodec.serialize(media)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        let mut media = ManualCodec.deserialize(bytes)?;
        media.persons.reverse();
        Ok(media)
    }
}

fn run(registry: CodecRegistry, protocol: MeasurementProtocol) -> (tpc_benchmark::RunSummary, String) {
    let runner = BenchmarkRunner::new(registry, protocol);
    let mut renderer = ConsoleRenderer::new(Vec::new());
    let summary = runner.run(&mut renderer).unwrap();
    let output = String::from_utf8(renderer.into_inner()).unwrap();
    (summary, output)
}

#[test]
fn test_broken_codec_does_not_halt_run() {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(JsonCodec)).unwrap();
    registry.register(Arc::new(BrokenSerializer)).unwrap();

    let (summary, output) = run(registry, fast_protocol());

    let json = summary.aggregator.get("json").unwrap();
    assert!(json.create_ns > 0.0);
    assert!(json.serialize_ns > 0.0);
    assert!(json.deserialize_ns > 0.0);
    assert!(json.encoded_bytes > 0);
    assert!(summary.aggregator.get("broken").is_none());

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].codec, "broken");
    assert!(summary.failures[0].error.contains("encoder not available"));

    let charts: Vec<&str> = output.lines().filter(|l| l.starts_with("<img")).collect();
    assert_eq!(charts.len(), MetricKind::ALL.len());
    for chart in charts {
        assert!(chart.contains("chxl=0:|json&"));
        assert!(!chart.contains("broken"));
    }
}

#[test]
fn test_construction_failure_is_reported() {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(BrokenConstructor)).unwrap();
    registry.register(Arc::new(ManualCodec)).unwrap();

    let (summary, _) = run(registry, fast_protocol());

    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].error.contains("construct"));
    assert_eq!(summary.aggregator.len(), 1);
    assert!(summary.aggregator.get("manual").is_some());
}

#[test]
fn test_mismatch_is_a_warning_with_timings() {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(ReorderingPersons)).unwrap();

    let (summary, output) = run(registry, fast_protocol());

    assert_eq!(summary.mismatches.len(), 1);
    assert_eq!(summary.mismatches[0].codec, "reordering");
    assert_eq!(summary.mismatches[0].differing_fields, vec!["persons"]);
    assert!(summary.failures.is_empty());

    let record = summary.aggregator.get("reordering").unwrap();
    assert!(record.total_ns > 0.0);
    assert!(output.lines().any(|l| l.starts_with("reordering ")));
}

#[test]
fn test_single_iteration_single_trial() {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(JsonCodec)).unwrap();

    let protocol = fast_protocol().iterations(1).trials(1).create_multiplier(1);
    let (summary, _) = run(registry, protocol);

    let record = summary.aggregator.get("json").unwrap();
    for kind in [MetricKind::TimeCreate, MetricKind::TimeSer, MetricKind::TimeDSer] {
        let value = record.value(kind);
        assert!(value.is_finite() && value > 0.0, "{} = {}", kind, value);
    }
}

#[test]
fn test_all_builtin_codecs_in_registration_order() {
    let mut registry = CodecRegistry::new();
    registry.register_all(default_codecs()).unwrap();
    let expected: Vec<String> = registry.names().into_iter().map(String::from).collect();

    let (summary, output) = run(registry, fast_protocol());

    assert!(summary.failures.is_empty());
    assert!(summary.mismatches.is_empty());
    for kind in MetricKind::ALL {
        let names: Vec<&str> = summary
            .aggregator
            .series(kind)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, expected);
    }

    let rows: Vec<&str> = output
        .lines()
        .skip(1)
        .take(expected.len())
        .map(|l| l.split(',').next().unwrap().trim_end())
        .collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_report_carries_failures_and_warnings() {
    let mut registry = CodecRegistry::new();
    registry.register(Arc::new(ReorderingPersons)).unwrap();
    registry.register(Arc::new(BrokenSerializer)).unwrap();

    let protocol = fast_protocol();
    let runner = BenchmarkRunner::new(registry, protocol);
    let summary = runner.run(&mut ConsoleRenderer::new(std::io::sink())).unwrap();
    let report = summary.to_report(runner.protocol());

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.settings.iterations.get(), 20);
}
