use crate::workflow::runner::WorkflowResult;
use lidarcore::scan::PointData;
use serde::{Deserialize, Serialize};

/// Latest filtered scan as served to bridge clients.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScanModel {
    pub points: Vec<PointData>,
    pub input_count: usize,
    pub kept_count: usize,
    pub discarded_points: usize,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl ScanModel {
    pub fn from_result(result: &WorkflowResult, scenario: Option<String>) -> Self {
        Self {
            points: result.points.clone(),
            input_count: result.input_count,
            kept_count: result.points.len(),
            discarded_points: result.discarded_points,
            notes: result.notes.clone(),
            scenario,
        }
    }
}
