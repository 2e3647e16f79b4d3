//! External peak/slope analysis over a voltage series.
//!
//! The analysis itself (Savitzky-Golay smoothing, peak finding, slope
//! and oxygen-uptake-rate estimation) runs in a separate process that
//! reads a JSON sample array on stdin and prints a JSON report on
//! stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::store::Reading;

/// A detected extremum in the smoothed signal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtremePoint {
    /// ISO 8601; kept as text because the producer may omit the offset.
    pub timestamp: String,
    pub value: f64,
    pub prominence: f64,
}

/// A per-peak derived scalar (slope or uptake rate).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimedValue {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisStats {
    pub peaks_count: usize,
    pub valleys_count: usize,
    pub slopes_count: usize,
    pub mean_slope: f64,
    pub std_slope: f64,
    pub mean_our: f64,
    pub std_our: f64,
}

/// Full report printed by the analysis process.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub peaks: Vec<ExtremePoint>,
    #[serde(default)]
    pub valleys: Vec<ExtremePoint>,
    #[serde(default)]
    pub slopes: Vec<TimedValue>,
    #[serde(default)]
    pub our_values: Vec<TimedValue>,
    #[serde(default)]
    pub stats: Option<AnalysisStats>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisReport {
    fn empty_with_message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct Sample {
    timestamp: String,
    voltage: f64,
}

/// Handle to the external analysis program.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    program: String,
    args: Vec<String>,
}

impl AnalysisClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Run one analysis over the given readings.
    ///
    /// An empty input short-circuits without spawning anything, mirroring
    /// what the report looks like when the producer finds no data.
    pub fn run(&self, readings: &[Reading]) -> AnalysisResult<AnalysisReport> {
        if readings.is_empty() {
            return Ok(AnalysisReport::empty_with_message(
                "No data found for analysis",
            ));
        }

        let samples: Vec<Sample> = readings
            .iter()
            .map(|r| Sample {
                timestamp: r.timestamp.to_rfc3339(),
                voltage: r.voltage,
            })
            .collect();
        let input = serde_json::to_string(&samples)?;
        debug!(samples = samples.len(), program = %self.program, "running analysis");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
            // Dropped here so the child sees EOF before we wait.
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(AnalysisError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        let report: AnalysisReport = serde_json::from_slice(&output.stdout)?;
        Ok(report)
    }
}
