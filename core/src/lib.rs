//! Near-range noise filter for spinning-mirror range sensors.
//!
//! A scan is split at the near-range cutoff; near samples are clustered by
//! angular and radial contiguity, the cluster crossing 0°/360° is rejoined,
//! and clusters that are both small and low-confidence are dropped.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod scan;
pub mod telemetry;

pub use prelude::{FilterConfig, ProcessingStage, StageInput, StageOutput};
pub use processing::{NearFilter, NearFilterStage};
pub use scan::{PointData, ScanFrame};
