// coverage/mod.rs
//
// Free-writing progress: ink coverage of a bitmask surface.

pub mod estimator;
pub mod surface;

pub use estimator::{CoverageEstimator, CoverageState};
pub use surface::CoverageSurface;
