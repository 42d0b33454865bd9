use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use lidarcore::prelude::ProcessingStage;
use lidarcore::processing::NearFilterStage;
use lidarcore::scan::{PointData, ScanFrame};

pub struct WorkflowResult {
    pub points: Vec<PointData>,
    pub input_count: usize,
    pub far_count: usize,
    pub group_count: usize,
    pub discarded_points: usize,
    pub notes: Vec<String>,
}

impl WorkflowResult {
    pub fn to_frame(&self, speed_deg_s: f64) -> ScanFrame {
        ScanFrame::new(self.points.clone(), speed_deg_s)
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, frame: &ScanFrame) -> anyhow::Result<WorkflowResult> {
        let filter_config = self.config.to_filter_config();

        let mut stage = NearFilterStage::new(self.config.speed_deg_s);
        stage
            .initialize(&filter_config)
            .context("initializing near filter stage")?;
        let output = stage
            .execute(frame.to_stage_input())
            .context("executing near filter stage")?;
        stage.cleanup();

        Ok(WorkflowResult {
            input_count: frame.points.len(),
            far_count: output.metadata.far_count,
            group_count: output.metadata.group_count,
            discarded_points: output.metadata.discarded_points,
            notes: output.metadata.notes,
            points: output.points,
        })
    }
}
