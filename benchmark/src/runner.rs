// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Sequential benchmark runner.
//!
//! Codecs are measured one at a time, each through its complete cycle,
//! so one codec's warm state or heap occupancy never overlaps another's
//! measurement. A failing codec is reported and skipped; the run goes on.

use std::io::Write;

use tpc_core::{CodecEntry, CodecRegistry, CodecResult};

use crate::checker::{verify_round_trip, CorrectnessMismatch};
use crate::harness::{MeasurementProtocol, Operation};
use crate::metrics::{Aggregator, BenchmarkReport, CodecFailure, MetricRecord};
use crate::reporter::{ConsoleRenderer, ReporterError};

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Metrics of every codec that completed, in run order
    pub aggregator: Aggregator,
    /// Codecs whose measurement was aborted
    pub failures: Vec<CodecFailure>,
    /// Round-trip mismatches (warnings)
    pub mismatches: Vec<CorrectnessMismatch>,
}

impl RunSummary {
    /// Build the machine-readable report for this run.
    pub fn to_report(&self, protocol: &MeasurementProtocol) -> BenchmarkReport {
        let mut report = BenchmarkReport::new(protocol.settings().clone());
        report.results = self.aggregator.records().to_vec();
        report.failures = self.failures.clone();
        report.warnings = self.mismatches.clone();
        report
    }
}

/// Owns the ordered codecs and the protocol used to measure them.
pub struct BenchmarkRunner {
    registry: CodecRegistry,
    protocol: MeasurementProtocol,
}

impl BenchmarkRunner {
    /// Create a runner.
    pub fn new(registry: CodecRegistry, protocol: MeasurementProtocol) -> Self {
        Self { registry, protocol }
    }

    /// The measurement protocol in use.
    pub fn protocol(&self) -> &MeasurementProtocol {
        &self.protocol
    }

    /// Measure every codec in registration order.
    ///
    /// Rows are rendered as each codec completes; chart lines follow once
    /// all codecs are done. Only rendering failures end the run early.
    pub fn run<W: Write>(
        &self,
        renderer: &mut ConsoleRenderer<W>,
    ) -> Result<RunSummary, ReporterError> {
        let mut summary = RunSummary::default();
        renderer.header()?;

        for entry in self.registry.iter() {
            tracing::info!(codec = %entry.name, family = %entry.codec.family(), "Measuring codec");

            match self.measure_codec(entry, &mut summary.mismatches) {
                Ok(record) => {
                    renderer.row(&record)?;
                    summary.aggregator.insert(record);
                }
                Err(e) => {
                    tracing::error!(codec = %entry.name, error = %e, "Codec measurement aborted");
                    summary.failures.push(CodecFailure {
                        codec: entry.name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        renderer.charts(&summary.aggregator)?;

        tracing::info!(
            measured = summary.aggregator.len(),
            failed = summary.failures.len(),
            mismatched = summary.mismatches.len(),
            "Run complete"
        );
        Ok(summary)
    }

    /// Full measurement cycle for one codec.
    fn measure_codec(
        &self,
        entry: &CodecEntry,
        mismatches: &mut Vec<CorrectnessMismatch>,
    ) -> CodecResult<MetricRecord> {
        let codec = entry.codec.as_ref();
        let protocol = &self.protocol;

        protocol.warm_up(codec, Operation::Create)?;
        let create_ns = protocol.measure(codec, Operation::Create)?;

        protocol.warm_up(codec, Operation::Serialize)?;

        // Verify the codec actually works before timing it.
        if let Some(mismatch) = verify_round_trip(codec)? {
            tracing::warn!(
                codec = %entry.name,
                fields = ?mismatch.differing_fields,
                "{}",
                mismatch.message
            );
            mismatches.push(mismatch);
        }

        let serialize_ns = protocol.measure(codec, Operation::Serialize)?;

        protocol.warm_up(codec, Operation::Deserialize)?;
        let deserialize_ns = protocol.measure(codec, Operation::Deserialize)?;

        let encoded_bytes = codec.serialize(&codec.create()?)?.len();

        Ok(MetricRecord::new(
            entry.name.as_str(),
            codec.family(),
            create_ns,
            serialize_ns,
            deserialize_ns,
            encoded_bytes,
        ))
    }
}
