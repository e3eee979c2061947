// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! tpc Benchmarking Framework
//!
//! Compares serializer plugins against a common media payload, measuring
//! construction, serialize and deserialize cost plus encoded size.
//!
//! # Pipeline
//!
//! - **Harness**: warmup, advisory pauses, timed trials, minimum selection
//! - **Checker**: one round-trip per codec before serialize timing
//! - **Metrics**: per-codec records aggregated in run order
//! - **Reporter**: console table and chart lines, or a JSON report
//! - **Runner**: drives all of the above one codec at a time

pub mod checker;
pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod runner;

pub use checker::{verify_round_trip, CorrectnessMismatch};
pub use harness::{AdvisoryPause, MeasurementProtocol, Operation};
pub use metrics::{
    Aggregator, BenchmarkReport, CodecFailure, MetricKind, MetricRecord, SystemInfo,
};
pub use reporter::{ConsoleRenderer, JsonReporter, ReporterError};
pub use runner::{BenchmarkRunner, RunSummary};
