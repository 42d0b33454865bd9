use crate::prelude::{FilterConfig, StageResult};
use crate::processing::classify::ClusterClassifier;
use crate::processing::cluster::{self, Contiguity};
use crate::processing::partition::partition;
use crate::scan::PointData;

/// Filtered scan plus the bookkeeping gathered while producing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub points: Vec<PointData>,
    pub far_count: usize,
    pub near_count: usize,
    pub group_count: usize,
    pub retained_groups: usize,
    pub discarded_points: usize,
    pub wrap_merged: bool,
}

/// Near-range filter context: the current rotation speed and the fixed
/// constants. Holds no per-scan state, so a shared reference can filter from
/// several threads while the owner updates the speed between scans.
#[derive(Debug, Clone, PartialEq)]
pub struct NearFilter {
    curr_speed: f64,
    config: FilterConfig,
}

impl NearFilter {
    /// Context with the default sensor constants. `speed_deg_s` is the
    /// rotation speed in degrees per second.
    pub fn new(speed_deg_s: f64) -> Self {
        Self {
            curr_speed: speed_deg_s,
            config: FilterConfig::default(),
        }
    }

    pub fn with_config(speed_deg_s: f64, config: FilterConfig) -> StageResult<Self> {
        config.validate()?;
        Ok(Self {
            curr_speed: speed_deg_s,
            config,
        })
    }

    pub fn from_rotation_hz(hz: f64) -> Self {
        Self::new(hz * 360.0)
    }

    pub fn speed(&self) -> f64 {
        self.curr_speed
    }

    pub fn set_speed(&mut self, speed_deg_s: f64) {
        self.curr_speed = speed_deg_s;
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn angle_delta_up_limit(&self) -> f64 {
        cluster::angle_delta_up_limit(self.curr_speed, self.config.scan_frequency)
    }

    /// Removes low-confidence near-range clusters from `scan`.
    ///
    /// Far points come first in their original order, followed by the
    /// retained near clusters.
    pub fn filter(&self, scan: &[PointData]) -> Vec<PointData> {
        self.run(scan).points
    }

    pub fn run(&self, scan: &[PointData]) -> FilterOutcome {
        let split = partition(scan, self.config.near_range_mm);
        let mut outcome = FilterOutcome {
            far_count: split.far.len(),
            near_count: split.near.len(),
            points: split.far,
            ..Default::default()
        };
        if split.near.is_empty() {
            return outcome;
        }

        let rule = Contiguity::new(self.angle_delta_up_limit(), self.config.distance_tolerance);
        let mut pending = split.near;
        cluster::sort_by_angle(&mut pending);
        let mut groups = cluster::cluster(&pending, &rule);
        outcome.wrap_merged = cluster::merge_wrap(&mut groups, &rule);
        outcome.group_count = groups.len();

        let classifier = ClusterClassifier::from_config(&self.config);
        for group in groups.into_iter().filter(|g| !g.is_empty()) {
            if classifier.classify(&group).is_retained() {
                outcome.retained_groups += 1;
                outcome.points.extend(group);
            } else {
                outcome.discarded_points += group.len();
            }
        }
        outcome
    }
}

impl Default for NearFilter {
    fn default() -> Self {
        Self::from_rotation_hz(10.0)
    }
}
