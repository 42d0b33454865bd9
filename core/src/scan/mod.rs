pub mod frame;
pub mod point;

pub use frame::ScanFrame;
pub use point::PointData;
