pub mod api;
pub mod assets;
pub mod core;
pub mod coverage;
pub mod input;
pub mod render;
pub mod tracing;

// Re-export key types at crate root for convenience
pub use api::config::{CoverageConfig, TraceConfig};
pub use api::estimator::ProgressEstimator;
pub use api::types::{TraceEvent, TracingMode};
pub use assets::catalog::{CatalogError, GlyphCatalog, GlyphClass, GlyphDef, StrokeDef, BUILTIN_GLYPHS};
pub use assets::path_data::{parse_path_data, PathDataError};
pub use core::sampler::{PathSampler, Projection};
pub use core::stroke_path::StrokePath;
pub use core::timers::{Epoch, Scheduler};
pub use coverage::{CoverageEstimator, CoverageState, CoverageSurface};
pub use input::queue::{InputEvent, InputQueue};
pub use render::feed::{free_frame, guided_frame, GuideDots, Polyline, RenderFrame};
pub use tracing::{GlyphSession, SessionSnapshot, StrokeTracker, TraceResult, TraceState};
