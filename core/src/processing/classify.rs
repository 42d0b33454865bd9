use log::debug;

use crate::math::stats::StatsHelper;
use crate::prelude::FilterConfig;
use crate::scan::PointData;

/// Outcome of classifying one near-range group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupVerdict {
    /// Large enough to be a real obstacle whatever its confidence.
    Dense,
    /// Mean confidence above the retain threshold.
    Confident,
    /// Too few points with too little confidence.
    Sparse,
    /// Mean confidence at or below the retain threshold.
    LowConfidence,
}

impl GroupVerdict {
    pub fn is_retained(self) -> bool {
        matches!(self, GroupVerdict::Dense | GroupVerdict::Confident)
    }
}

/// Size and confidence rules deciding whether a group is noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterClassifier {
    pub confidence_low: u8,
    pub confidence_single: u8,
    pub dense_group_size: usize,
    pub sparse_group_size: usize,
}

impl ClusterClassifier {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            confidence_low: config.confidence_low,
            confidence_single: config.confidence_single,
            dense_group_size: config.dense_group_size,
            sparse_group_size: config.sparse_group_size,
        }
    }

    pub fn classify(&self, group: &[PointData]) -> GroupVerdict {
        if group.len() > self.dense_group_size {
            return GroupVerdict::Dense;
        }

        // Small groups must clear the single-point bar first, then still face
        // the general confidence check below.
        if group.len() < self.sparse_group_size
            && StatsHelper::truncated_mean_confidence(group) < u32::from(self.confidence_single)
        {
            return GroupVerdict::Sparse;
        }

        let confidence_avg = StatsHelper::mean_confidence(group);
        debug!(
            "group of {} points: confidence {:.1}, distance {:.0} mm",
            group.len(),
            confidence_avg,
            StatsHelper::mean_distance(group)
        );

        if confidence_avg > f64::from(self.confidence_low) {
            GroupVerdict::Confident
        } else {
            GroupVerdict::LowConfidence
        }
    }
}

impl Default for ClusterClassifier {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}
