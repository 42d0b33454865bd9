use crate::scan::PointData;

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean_confidence(points: &[PointData]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let sum: f64 = points.iter().map(|p| f64::from(p.confidence)).sum();
        sum / points.len() as f64
    }

    /// Mean confidence with the remainder dropped, as the firmware computes it.
    pub fn truncated_mean_confidence(points: &[PointData]) -> u32 {
        if points.is_empty() {
            return 0;
        }
        let sum: u32 = points.iter().map(|p| u32::from(p.confidence)).sum();
        sum / points.len() as u32
    }

    pub fn mean_distance(points: &[PointData]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let sum: f64 = points.iter().map(|p| f64::from(p.distance)).sum();
        sum / points.len() as f64
    }
}
