use serde::{Deserialize, Serialize};

/// One angular sample reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    /// Angle in degrees, expected in `[0, 360)`.
    pub angle: f32,
    /// Distance in millimeters.
    pub distance: u16,
    pub confidence: u8,
}

impl PointData {
    pub fn new(angle: f32, distance: u16, confidence: u8) -> Self {
        Self {
            angle,
            distance,
            confidence,
        }
    }

    /// True when the sample lies inside the near-range cutoff.
    pub fn is_near(&self, cutoff_mm: u16) -> bool {
        self.distance < cutoff_mm
    }
}
