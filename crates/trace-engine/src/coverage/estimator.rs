use glam::Vec2;
use serde::Serialize;

use crate::api::config::{CoverageConfig, TraceConfig};
use crate::api::types::TraceEvent;
use crate::assets::catalog::GlyphDef;
use crate::core::timers::{Epoch, Scheduler};
use crate::render::feed::Polyline;

use super::surface::CoverageSurface;

/// Summary of free-writing progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageState {
    pub inked: usize,
    pub total: usize,
    pub percent: u8,
}

/// Free-writing progress estimate.
///
/// Percent is the inked fraction of the surface relative to the target
/// coverage of a well-formed letter, capped at 100. It does not check letter
/// shape. Points arrive in logical canvas units and are scaled onto the
/// surface.
pub struct CoverageEstimator {
    glyph_id: char,
    config: CoverageConfig,
    celebration_duration: f32,
    /// Logical units to surface pixels.
    scale: Vec2,
    surface: CoverageSurface,
    /// End of the current ink chain while the pen is down.
    last_point: Option<Vec2>,
    /// Strokes drawn so far, in logical units.
    strokes: Vec<Polyline>,
    /// Cursive outline for the current glyph, if it has one.
    reference: Vec<Polyline>,
    percent: u8,
    celebrated: bool,
    celebrating: bool,
    epoch: Epoch,
    timers: Scheduler<()>,
    events: Vec<TraceEvent>,
}

impl CoverageEstimator {
    /// `canvas` is the logical size pointer samples are expressed in.
    pub fn new(glyph: &GlyphDef, config: &TraceConfig, canvas: Vec2) -> Self {
        let coverage = config.coverage.clone();
        let surface = CoverageSurface::new(coverage.width, coverage.height);
        let scale = if canvas.x > 0.0 && canvas.y > 0.0 {
            Vec2::new(coverage.width as f32, coverage.height as f32) / canvas
        } else {
            Vec2::ONE
        };
        let reference = glyph
            .reference
            .as_ref()
            .map(|path| path.subpaths().into_iter().map(Polyline::new).collect())
            .unwrap_or_default();

        log::info!(
            "coverage: glyph '{}' on {}x{} surface (target {:.0}%)",
            glyph.id,
            coverage.width,
            coverage.height,
            coverage.target_coverage * 100.0
        );

        Self {
            glyph_id: glyph.id,
            config: coverage,
            celebration_duration: config.celebration_duration,
            scale,
            surface,
            last_point: None,
            strokes: Vec::new(),
            reference,
            percent: 0,
            celebrated: false,
            celebrating: false,
            epoch: Epoch::default(),
            timers: Scheduler::new(),
            events: Vec::new(),
        }
    }

    /// Start a new ink chain. A tap without movement leaves no ink.
    pub fn pointer_down(&mut self, point: Vec2) {
        self.last_point = Some(point);
        self.strokes.push(Polyline::new(vec![point]));
    }

    /// Extend the current chain; ignored while the pen is up.
    pub fn pointer_move(&mut self, point: Vec2) {
        let Some(last) = self.last_point else {
            return;
        };
        let radius = self.config.pen_width * 0.5 * self.scale.x.min(self.scale.y);
        self.surface
            .stamp_segment(last * self.scale, point * self.scale, radius);
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(point);
        }
        self.last_point = Some(point);
        self.update_percent();
    }

    pub fn pointer_up(&mut self) {
        self.last_point = None;
        // Drop taps so they don't show up as dots.
        if self.strokes.last().is_some_and(|s| s.points.len() < 2) {
            self.strokes.pop();
        }
    }

    fn update_percent(&mut self) {
        let target = self.config.target_coverage;
        let estimate = if target > 0.0 {
            (self.surface.coverage() / target * 100.0).min(100.0)
        } else {
            100.0
        };
        self.percent = estimate.round() as u8;

        if self.percent >= self.config.celebrate_percent && !self.celebrated {
            log::info!("coverage: glyph '{}' reached {}%", self.glyph_id, self.percent);
            self.celebrated = true;
            self.celebrating = true;
            self.events.push(TraceEvent::Celebrate);
            self.timers.schedule(self.celebration_duration, self.epoch, ());
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for () in self.timers.tick(dt, self.epoch) {
            self.celebrating = false;
            self.events.push(TraceEvent::CelebrationEnded);
        }
    }

    /// Erase all ink and reset the estimate.
    pub fn clear(&mut self) {
        self.epoch = self.epoch.next();
        self.surface.clear();
        self.last_point = None;
        self.strokes.clear();
        self.percent = 0;
        self.celebrated = false;
        self.celebrating = false;
        self.events.clear();
    }

    pub fn glyph_id(&self) -> char {
        self.glyph_id
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= self.config.celebrate_percent
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn state(&self) -> CoverageState {
        CoverageState {
            inked: self.surface.inked(),
            total: self.surface.total(),
            percent: self.percent,
        }
    }

    pub fn strokes(&self) -> &[Polyline] {
        &self.strokes
    }

    pub fn reference(&self) -> &[Polyline] {
        &self.reference
    }

    pub fn surface(&self) -> &CoverageSurface {
        &self.surface
    }

    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}
