pub mod classify;
pub mod cluster;
pub mod context;
pub mod near_filter;
pub mod partition;

pub use classify::{ClusterClassifier, GroupVerdict};
pub use context::{FilterOutcome, NearFilter};
pub use near_filter::NearFilterStage;
pub use partition::Partition;
