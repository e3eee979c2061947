// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Console and JSON rendering of benchmark results.
//!
//! The console renderer prints a header, one row per codec as the run
//! proceeds, and finally one chart line per metric kind. The JSON reporter
//! writes a complete [`BenchmarkReport`] to any writer; nothing is kept on
//! disk between runs.

use std::io::Write;

use thiserror::Error;
use url::form_urlencoded;

use crate::metrics::{Aggregator, BenchmarkReport, MetricKind, MetricRecord};

/// Chart service endpoint for the chart-description lines.
const CHART_BASE: &str = "http://chart.apis.google.com/chart";

/// Bar colors cycled by the chart service.
const CHART_COLORS: &str = "660000|660033|660066|660099|6600CC|6600FF|663300|663333|663366|663399|6633CC|6633FF|666600|666633|666666";

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Column labels line.
pub fn format_header() -> String {
    format!(
        "{:<24}, {:>15}, {:>15}, {:>15}, {:>15}, {:>10}",
        " ", "Object create", "Serialization", "Deserialization", "Total Time", "Serialized Size"
    )
}

/// One data row: name, create, serialize, deserialize, total, bytes.
pub fn format_row(record: &MetricRecord) -> String {
    format!(
        "{:<24}, {:>15.5}, {:>15.5}, {:>15.5}, {:>15.5}, {:>10}",
        record.codec,
        record.create_ns,
        record.serialize_ns,
        record.deserialize_ns,
        record.total_ns,
        record.encoded_bytes
    )
}

/// Upper bound of the shared chart scale: twice the mean value.
pub fn chart_scale(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    2.0 * values.iter().sum::<f64>() / values.len() as f64
}

/// Chart-description line for one metric kind, or `None` for an empty
/// series.
pub fn chart_line(kind: MetricKind, series: &[(&str, f64)]) -> Option<String> {
    if series.is_empty() {
        return None;
    }

    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let data = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    // Horizontal bar charts draw the axis bottom-up.
    let labels = series
        .iter()
        .rev()
        .map(|(name, _)| escape_label(name))
        .collect::<Vec<_>>()
        .join("|");

    Some(format!(
        "<img src='{}?chtt={}&chf=c||lg||0||FFFFFF||1||76A4FB||0|bg||s||EFEFEF&chs=1000x300&chd=t:{}&chds=0,{:.2}&chxl=0:|{}&chdlp=t&chco={}&cht=bhg&chbh=10&chxt=y'/>",
        CHART_BASE,
        kind,
        data,
        chart_scale(&values),
        labels,
        CHART_COLORS
    ))
}

fn escape_label(name: &str) -> String {
    form_urlencoded::byte_serialize(name.as_bytes()).collect()
}

/// Line-oriented console renderer.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Render to the given writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print the column labels.
    pub fn header(&mut self) -> Result<(), ReporterError> {
        writeln!(self.out, "{}", format_header())?;
        Ok(())
    }

    /// Print one codec's row and flush so progress is visible immediately.
    pub fn row(&mut self, record: &MetricRecord) -> Result<(), ReporterError> {
        writeln!(self.out, "{}", format_row(record))?;
        self.out.flush()?;
        Ok(())
    }

    /// Print one chart line per metric kind.
    pub fn charts(&mut self, aggregator: &Aggregator) -> Result<(), ReporterError> {
        for kind in MetricKind::ALL {
            if let Some(line) = chart_line(kind, &aggregator.series(kind)) {
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// JSON reporter for benchmark results.
pub struct JsonReporter;

impl JsonReporter {
    /// Write the report as pretty-printed JSON followed by a newline.
    pub fn write<W: Write>(report: &BenchmarkReport, mut out: W) -> Result<(), ReporterError> {
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)?;
        Ok(())
    }
}
