use crate::scan::PointData;

/// A scan split by the near-range cutoff. Both halves keep encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub far: Vec<PointData>,
    pub near: Vec<PointData>,
}

pub fn partition(scan: &[PointData], cutoff_mm: u16) -> Partition {
    let mut split = Partition::default();
    for &point in scan {
        if point.is_near(cutoff_mm) {
            split.near.push(point);
        } else {
            split.far.push(point);
        }
    }
    split
}
