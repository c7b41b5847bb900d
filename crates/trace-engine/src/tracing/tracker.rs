use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::assets::catalog::StrokeDef;
use crate::core::sampler::{PathSampler, Projection};
use crate::core::stroke_path::StrokePath;

/// Relative slack on the completion threshold.
const COMPLETION_EPSILON: f32 = 1e-5;

/// Lifecycle of a single stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    /// Waiting for a pressed sample near the stroke's start point.
    NotStarted,
    /// The user is tracing; progress follows the max-so-far rule.
    Engaged,
    /// Progress reached the completion ratio. Terminal until reset.
    Completed,
}

/// What a pointer sample did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceResult {
    /// This sample engaged the stroke.
    Engaged,
    /// Progress moved forward.
    Advanced,
    /// On path, but at or behind current progress (backtracking).
    Held,
    /// Too far from the path; ignored.
    OffPath,
    /// Pressed, but not near the start point yet.
    NotStarted,
    /// Progress crossed the completion ratio.
    StrokeComplete,
    /// Pointer released, or the stroke is already complete.
    Ignored,
}

/// Validates pointer samples against one reference stroke.
///
/// Progress is the arc length of the furthest on-path sample seen so far. It
/// never decreases, so backtracking, off-path excursions and lifting the
/// pointer all leave it where it was.
#[derive(Debug, Clone)]
pub struct StrokeTracker {
    path: StrokePath,
    sampler: PathSampler,
    /// Declared entry point (may differ slightly from the path's first point).
    start: Vec2,
    progress: f32,
    state: TraceState,
    entry_tolerance: f32,
    tracking_tolerance: f32,
    completion_ratio: f32,
}

impl StrokeTracker {
    pub fn new(stroke: &StrokeDef, config: &TraceConfig) -> Self {
        Self {
            sampler: PathSampler::new(&stroke.path, config.sampler_samples),
            path: stroke.path.clone(),
            start: stroke.start,
            progress: 0.0,
            state: TraceState::NotStarted,
            entry_tolerance: config.entry_tolerance,
            tracking_tolerance: config.tracking_tolerance,
            completion_ratio: config.completion_ratio,
        }
    }

    /// Feed one pointer sample. `pointer_down` is whether the pointer is pressed.
    pub fn submit(&mut self, pos: Vec2, pointer_down: bool) -> TraceResult {
        if self.state == TraceState::Completed || self.path.is_empty() || !pos.is_finite() {
            return TraceResult::Ignored;
        }
        if !pointer_down {
            // Lifting keeps progress; the stroke resumes where it left off.
            return TraceResult::Ignored;
        }

        match self.state {
            TraceState::NotStarted => {
                if pos.distance(self.start) >= self.entry_tolerance {
                    return TraceResult::NotStarted;
                }
                self.state = TraceState::Engaged;
                match self.advance(pos) {
                    TraceResult::StrokeComplete => TraceResult::StrokeComplete,
                    _ => TraceResult::Engaged,
                }
            }
            TraceState::Engaged => self.advance(pos),
            TraceState::Completed => TraceResult::Ignored,
        }
    }

    fn advance(&mut self, pos: Vec2) -> TraceResult {
        let Some(Projection { distance, offset, .. }) = self.sampler.project(pos) else {
            return TraceResult::Ignored;
        };
        if offset >= self.tracking_tolerance {
            return TraceResult::OffPath;
        }
        if distance <= self.progress {
            return TraceResult::Held;
        }

        let length = self.path.length();
        self.progress = distance.min(length);
        // Slack absorbs rounding in the sampled arc lengths.
        if self.progress >= self.completion_ratio * length - length * COMPLETION_EPSILON {
            self.state = TraceState::Completed;
            // Frozen at full length so the reveal covers the whole stroke.
            self.progress = length;
            return TraceResult::StrokeComplete;
        }
        TraceResult::Advanced
    }

    /// Back to `NotStarted` with zero progress.
    pub fn reset(&mut self) {
        self.state = TraceState::NotStarted;
        self.progress = 0.0;
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        self.state != TraceState::NotStarted
    }

    pub fn is_complete(&self) -> bool {
        self.state == TraceState::Completed
    }

    /// Validated arc length along the stroke.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress as a fraction of the stroke length (0.0 to 1.0).
    pub fn progress_fraction(&self) -> f32 {
        let length = self.path.length();
        if length <= 0.0 {
            return 0.0;
        }
        self.progress / length
    }

    /// Pen position: the path point at current progress.
    pub fn cursor(&self) -> Vec2 {
        self.path.point_at(self.progress)
    }

    pub fn path(&self) -> &StrokePath {
        &self.path
    }
}
