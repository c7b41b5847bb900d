// tracing/mod.rs
//
// Guided tracing: one tracker per stroke, one session per glyph.
// The session owns stroke order, completion and the celebration/hint timers;
// the tracker only knows how far along its own path the pen has validly got.

pub mod session;
pub mod tracker;

pub use session::{GlyphSession, SessionSnapshot};
pub use tracker::{StrokeTracker, TraceResult, TraceState};
