//! Angular clustering of near-range samples.
//!
//! Samples are sorted by angle and walked once; a new group opens whenever the
//! step from the previous sample exceeds either the angular limit or the
//! relative distance tolerance. The groups touching 0° and 360° are joined
//! afterwards when they continue each other across the seam.

use std::mem;

use crate::scan::PointData;

/// Maximum angular gap, in degrees, between consecutive samples of one
/// surface. Faster rotation spreads samples further apart.
pub fn angle_delta_up_limit(speed_deg_s: f64, scan_frequency: f64) -> f64 {
    speed_deg_s / scan_frequency * 2.0
}

/// Stable sort by angle; samples with equal angles keep their order.
pub fn sort_by_angle(points: &mut [PointData]) {
    points.sort_by(|a, b| a.angle.total_cmp(&b.angle));
}

/// Pairwise contiguity tests shared by the walk and the seam merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contiguity {
    pub angle_limit: f64,
    pub distance_tolerance: f64,
}

impl Contiguity {
    pub fn new(angle_limit: f64, distance_tolerance: f64) -> Self {
        Self {
            angle_limit,
            distance_tolerance,
        }
    }

    fn distance_gap(a: &PointData, b: &PointData) -> f64 {
        (f64::from(a.distance) - f64::from(b.distance)).abs()
    }

    fn distance_limit(&self, reference: &PointData) -> f64 {
        f64::from(reference.distance) * self.distance_tolerance
    }

    /// True when `next` cannot continue the group that ends with `last`.
    pub fn breaks(&self, last: &PointData, next: &PointData) -> bool {
        let angle_gap = (f64::from(next.angle) - f64::from(last.angle)).abs();
        angle_gap > self.angle_limit
            || Self::distance_gap(next, last) > self.distance_limit(last)
    }

    /// True when `first` (near 0°) continues `last` (near 360°) across the seam.
    pub fn wraps(&self, first: &PointData, last: &PointData) -> bool {
        let angle_gap = (f64::from(first.angle) + 360.0 - f64::from(last.angle)).abs();
        angle_gap < self.angle_limit && Self::distance_gap(first, last) < self.distance_limit(last)
    }
}

/// Splits angle-sorted samples into contiguous groups.
///
/// Contiguity is chained: each sample is compared with its predecessor only,
/// so a slowly drifting surface stays in one group however wide it gets.
pub fn cluster(sorted: &[PointData], rule: &Contiguity) -> Vec<Vec<PointData>> {
    // Sits outside [0, 360) so the first sample never continues it.
    let sentinel = PointData::new(-10.0, 0, 0);

    let (mut groups, current, _) = sorted.iter().fold(
        (Vec::new(), Vec::new(), sentinel),
        |(mut groups, mut current, last): (Vec<Vec<PointData>>, Vec<PointData>, PointData),
         &point| {
            if rule.breaks(&last, &point) && !current.is_empty() {
                groups.push(mem::take(&mut current));
            }
            current.push(point);
            (groups, current, point)
        },
    );

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Joins the last group onto the front of the first one when they meet across
/// 0°/360°. Only these two boundary groups are ever considered.
///
/// Returns whether the merge happened.
pub fn merge_wrap(groups: &mut Vec<Vec<PointData>>, rule: &Contiguity) -> bool {
    if groups.len() < 2 {
        return false;
    }

    let first = groups.first().and_then(|g| g.first()).copied();
    let last = groups.last().and_then(|g| g.last()).copied();
    let (Some(first), Some(last)) = (first, last) else {
        return false;
    };
    if !rule.wraps(&first, &last) {
        return false;
    }

    if let Some(mut merged) = groups.pop() {
        merged.append(&mut groups[0]);
        groups[0] = merged;
    }
    true
}
