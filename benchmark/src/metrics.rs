// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Metric records and their aggregation.
//!
//! One [`MetricRecord`] is created per codec after its measurement cycle
//! completes and is never updated afterwards. The [`Aggregator`] keeps
//! records in codec insertion order so every metric series lines up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use tpc_core::{CodecFamily, MeasurementSettings};

use crate::checker::CorrectnessMismatch;

/// Kinds of metric reported per codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Mean nanoseconds to construct one payload
    TimeCreate,
    /// Mean nanoseconds to serialize one payload
    TimeSer,
    /// Mean nanoseconds to deserialize one payload
    TimeDSer,
    /// Sum of the three timings
    TotalTime,
    /// Encoded size in bytes
    Length,
}

impl MetricKind {
    /// Every kind, in display order.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::TimeCreate,
        MetricKind::TimeSer,
        MetricKind::TimeDSer,
        MetricKind::TotalTime,
        MetricKind::Length,
    ];
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::TimeCreate => write!(f, "timeCreate"),
            MetricKind::TimeSer => write!(f, "timeSer"),
            MetricKind::TimeDSer => write!(f, "timeDSer"),
            MetricKind::TotalTime => write!(f, "totalTime"),
            MetricKind::Length => write!(f, "length"),
        }
    }
}

/// Measurements for one codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Codec name
    pub codec: String,
    /// Codec family
    pub family: CodecFamily,
    /// Minimum mean construction time in nanoseconds
    pub create_ns: f64,
    /// Minimum mean serialization time in nanoseconds
    pub serialize_ns: f64,
    /// Minimum mean deserialization time in nanoseconds
    pub deserialize_ns: f64,
    /// `create_ns + serialize_ns + deserialize_ns`
    pub total_ns: f64,
    /// Length of one encoded payload
    pub encoded_bytes: usize,
}

impl MetricRecord {
    /// Create a record, deriving the total time.
    pub fn new(
        codec: impl Into<String>,
        family: CodecFamily,
        create_ns: f64,
        serialize_ns: f64,
        deserialize_ns: f64,
        encoded_bytes: usize,
    ) -> Self {
        Self {
            codec: codec.into(),
            family,
            create_ns,
            serialize_ns,
            deserialize_ns,
            total_ns: create_ns + serialize_ns + deserialize_ns,
            encoded_bytes,
        }
    }

    /// Value for the given metric kind.
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::TimeCreate => self.create_ns,
            MetricKind::TimeSer => self.serialize_ns,
            MetricKind::TimeDSer => self.deserialize_ns,
            MetricKind::TotalTime => self.total_ns,
            MetricKind::Length => self.encoded_bytes as f64,
        }
    }
}

/// A codec whose measurement was aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecFailure {
    /// Codec name
    pub codec: String,
    /// Underlying cause
    pub error: String,
}

/// Insertion-ordered metric records, viewable per metric kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregator {
    records: Vec<MetricRecord>,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A record for an already-present codec replaces the
    /// old one in place, keeping its position.
    pub fn insert(&mut self, record: MetricRecord) {
        match self.records.iter_mut().find(|r| r.codec == record.codec) {
            Some(existing) => {
                tracing::warn!(codec = %record.codec, "Replacing existing metric record");
                *existing = record;
            }
            None => self.records.push(record),
        }
    }

    /// Look up a codec's record.
    pub fn get(&self, codec: &str) -> Option<&MetricRecord> {
        self.records.iter().find(|r| r.codec == codec)
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// `(codec, value)` pairs for one metric kind, in insertion order.
    pub fn series(&self, kind: MetricKind) -> Vec<(&str, f64)> {
        self.records
            .iter()
            .map(|r| (r.codec.as_str(), r.value(kind)))
            .collect()
    }

    /// Number of codecs recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Machine-readable description of one complete run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Framework version
    pub version: String,
    /// Timestamp when the run finished
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Measurement settings used
    pub settings: MeasurementSettings,
    /// Per-codec results in run order
    pub results: Vec<MetricRecord>,
    /// Codecs whose measurement was aborted
    pub failures: Vec<CodecFailure>,
    /// Round-trip mismatches
    pub warnings: Vec<CorrectnessMismatch>,
}

impl BenchmarkReport {
    /// Create an empty report for the given settings.
    pub fn new(settings: MeasurementSettings) -> Self {
        Self {
            benchmark_suite: "tpc-serializers".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            settings,
            results: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
