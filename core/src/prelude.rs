use serde::{Deserialize, Serialize};

use crate::scan::PointData;

/// Fixed constants of the near-range filter.
///
/// Defaults match the sensor firmware: 4500 Hz sample rate, retain threshold
/// 15, single-point threshold 220 and a 5 m near-range cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub enabled: bool,
    pub scan_frequency: f64,
    pub confidence_low: u8,
    pub confidence_single: u8,
    pub near_range_mm: u16,
    pub distance_tolerance: f64,
    pub dense_group_size: usize,
    pub sparse_group_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan_frequency: 4500.0,
            confidence_low: 15,
            confidence_single: 220,
            near_range_mm: 5000,
            distance_tolerance: 0.03,
            dense_group_size: 15,
            sparse_group_size: 3,
        }
    }
}

impl FilterConfig {
    /// Checks the configuration-time invariants the filter relies on.
    pub fn validate(&self) -> StageResult<()> {
        if !self.scan_frequency.is_finite() || self.scan_frequency <= 0.0 {
            return Err(StageError::InvalidConfig(format!(
                "scan frequency must be positive, got {}",
                self.scan_frequency
            )));
        }
        if !self.distance_tolerance.is_finite() || self.distance_tolerance < 0.0 {
            return Err(StageError::InvalidConfig(format!(
                "distance tolerance must be non-negative, got {}",
                self.distance_tolerance
            )));
        }
        if self.sparse_group_size > self.dense_group_size {
            return Err(StageError::InvalidConfig(format!(
                "sparse group size {} exceeds dense group size {}",
                self.sparse_group_size, self.dense_group_size
            )));
        }
        Ok(())
    }
}

/// Input payload for a processing stage: one rotation of samples.
#[derive(Debug, Clone, Default)]
pub struct StageInput {
    pub points: Vec<PointData>,
    /// Rotation speed measured for this scan, in degrees per second.
    pub speed_deg_s: Option<f64>,
    pub timestamp: Option<f64>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub points: Vec<PointData>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageMetadata {
    pub far_count: usize,
    pub near_count: usize,
    pub group_count: usize,
    pub retained_groups: usize,
    pub discarded_points: usize,
    pub wrap_merged: bool,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing scan-processing stages driven once per rotation.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &FilterConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
