use crate::prelude::{
    FilterConfig, ProcessingStage, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::processing::context::NearFilter;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// Stage wrapping the near-range filter for a driver's per-scan loop.
pub struct NearFilterStage {
    filter: Option<NearFilter>,
    initial_speed: f64,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl NearFilterStage {
    /// `initial_speed` (degrees per second) is used until a scan reports its own.
    pub fn new(initial_speed: f64) -> Self {
        Self {
            filter: None,
            initial_speed,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    fn passthrough(input: StageInput, config: &FilterConfig) -> StageOutput {
        let near_count = input
            .points
            .iter()
            .filter(|p| p.is_near(config.near_range_mm))
            .count();
        let metadata = StageMetadata {
            far_count: input.points.len() - near_count,
            near_count,
            notes: vec!["near filter disabled".to_string()],
            ..Default::default()
        };
        StageOutput {
            points: input.points,
            metadata,
        }
    }
}

impl ProcessingStage for NearFilterStage {
    fn initialize(&mut self, config: &FilterConfig) -> StageResult<()> {
        self.filter = Some(NearFilter::with_config(self.initial_speed, config.clone())?);
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let filter = match self.filter.as_mut() {
            Some(filter) => filter,
            None => {
                self.metrics.record_error();
                return Err(StageError::Internal("stage not initialized".into()));
            }
        };

        // Speed only changes between scans, never while one is filtered.
        if let Some(speed) = input.speed_deg_s {
            filter.set_speed(speed);
        }

        if !filter.config().enabled {
            let output = Self::passthrough(input, filter.config());
            self.metrics.record_scan(output.points.len(), 0, 0);
            return Ok(output);
        }

        let outcome = filter.run(&input.points);
        let limit = filter.angle_delta_up_limit();
        let discarded_groups = outcome.group_count - outcome.retained_groups;

        self.logger.record(&format!(
            "NearFilterStage kept {}/{} points ({} far, {} of {} groups)",
            outcome.points.len(),
            input.points.len(),
            outcome.far_count,
            outcome.retained_groups,
            outcome.group_count
        ));
        self.metrics
            .record_scan(outcome.points.len(), outcome.discarded_points, discarded_groups);

        let mut notes = vec![format!("angle limit {:.3} deg", limit)];
        if outcome.wrap_merged {
            notes.push("merged groups across 0/360 seam".to_string());
        }

        let metadata = StageMetadata {
            far_count: outcome.far_count,
            near_count: outcome.near_count,
            group_count: outcome.group_count,
            retained_groups: outcome.retained_groups,
            discarded_points: outcome.discarded_points,
            wrap_merged: outcome.wrap_merged,
            notes,
        };

        Ok(StageOutput {
            points: outcome.points,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.filter = None;
    }
}
