use serde::{Deserialize, Serialize};

use crate::prelude::{StageError, StageInput, StageResult};
use crate::scan::point::PointData;

/// One full rotation handed over by the driver, together with the speed the
/// motor was measured at while it was taken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanFrame {
    pub points: Vec<PointData>,
    /// Rotation speed in degrees per second.
    pub speed_deg_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl ScanFrame {
    pub fn new(points: Vec<PointData>, speed_deg_s: f64) -> Self {
        Self {
            points,
            speed_deg_s,
            timestamp: None,
        }
    }

    pub fn from_json(contents: &str) -> StageResult<Self> {
        serde_json::from_str(contents)
            .map_err(|err| StageError::InvalidInput(format!("scan frame: {}", err)))
    }

    pub fn to_stage_input(&self) -> StageInput {
        StageInput {
            points: self.points.clone(),
            speed_deg_s: Some(self.speed_deg_s),
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_decodes_from_json() {
        let json = r#"{
            "points": [{"angle": 12.5, "distance": 830, "confidence": 200}],
            "speed_deg_s": 3600.0
        }"#;
        let frame = ScanFrame::from_json(json).unwrap();
        assert_eq!(frame.points, vec![PointData::new(12.5, 830, 200)]);
        assert_eq!(frame.timestamp, None);
        assert_eq!(frame.to_stage_input().speed_deg_s, Some(3600.0));
    }

    #[test]
    fn malformed_frame_is_invalid_input() {
        let err = ScanFrame::from_json("{\"points\": 3}").unwrap_err();
        assert!(matches!(err, StageError::InvalidInput(_)));
    }
}
