use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::types::TraceEvent;
use crate::assets::catalog::{GlyphCatalog, GlyphDef, StrokeDef};
use crate::core::timers::{Epoch, Scheduler};
use crate::render::feed::Polyline;

use super::tracker::{StrokeTracker, TraceResult};

/// Delayed session effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    /// Activate the stroke at the current index (or finish the glyph).
    AdvanceStroke,
    EndCelebration,
    /// Hide the hint shown by request `token`.
    HideHint(u32),
}

/// Comparable view of a session's tracing state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub glyph_id: char,
    pub stroke_index: usize,
    pub stroke_progress: f32,
    pub completed_strokes: Vec<bool>,
    pub has_engaged: bool,
    pub percent: u8,
    pub complete: bool,
}

/// Tracing session for one glyph.
///
/// Strokes are validated strictly in catalog order. Completing a stroke
/// bumps `stroke_index` right away; the next stroke's tracker is created
/// after `advance_delay` so the completion animation can play. Once the
/// index runs past the last stroke the session is complete, celebrates once
/// and ignores further input until [`GlyphSession::clear`].
pub struct GlyphSession {
    glyph: GlyphDef,
    config: TraceConfig,
    epoch: Epoch,
    stroke_index: usize,
    completed: Vec<bool>,
    /// Tracker for the active stroke. `None` while advancing or once complete.
    tracker: Option<StrokeTracker>,
    /// Whether the pointer is currently pressed.
    pen_down: bool,
    /// Fully revealed polylines of completed strokes.
    mask: Vec<Polyline>,
    complete: bool,
    celebrated: bool,
    celebrating: bool,
    hint_visible: bool,
    hint_token: u32,
    timers: Scheduler<SessionTimer>,
    events: Vec<TraceEvent>,
}

impl GlyphSession {
    /// Start a session for `glyph` with its first stroke active.
    pub fn new(glyph: GlyphDef, config: TraceConfig) -> Self {
        log::info!("session: glyph '{}' ({} strokes)", glyph.id, glyph.strokes.len());
        let mut session = Self {
            completed: vec![false; glyph.strokes.len()],
            glyph,
            config,
            epoch: Epoch::default(),
            stroke_index: 0,
            tracker: None,
            pen_down: false,
            mask: Vec::new(),
            complete: false,
            celebrated: false,
            celebrating: false,
            hint_visible: false,
            hint_token: 0,
            timers: Scheduler::new(),
            events: Vec::new(),
        };
        session.activate_current();
        session
    }

    /// Build a session for `id`, falling back to the catalog's default glyph.
    pub fn load_glyph(catalog: &GlyphCatalog, id: char, config: TraceConfig) -> Self {
        Self::new(catalog.get_or_default(id).clone(), config)
    }

    /// Route a pointer sample to the active stroke.
    ///
    /// No-op once the session is complete or while the next stroke is
    /// pending activation.
    pub fn submit_pointer_sample(&mut self, point: Vec2, is_pointer_down: bool) {
        self.pen_down = is_pointer_down;
        if self.complete {
            return;
        }
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };

        match tracker.submit(point, is_pointer_down) {
            TraceResult::Engaged => {
                log::debug!("session: stroke {} engaged", self.stroke_index);
                self.events.push(TraceEvent::StrokeEngaged { index: self.stroke_index });
            }
            TraceResult::StrokeComplete => self.complete_current_stroke(),
            _ => {}
        }
    }

    pub fn pointer_down(&mut self, point: Vec2) {
        self.submit_pointer_sample(point, true);
    }

    /// Moves only count while the pointer is pressed.
    pub fn pointer_move(&mut self, point: Vec2) {
        self.submit_pointer_sample(point, self.pen_down);
    }

    pub fn pointer_up(&mut self) {
        self.pen_down = false;
    }

    fn complete_current_stroke(&mut self) {
        let Some(tracker) = self.tracker.take() else {
            return;
        };
        let index = self.stroke_index;
        let path = tracker.path();
        self.mask
            .push(Polyline::new(path.resample(path.length(), self.config.reveal_steps)));

        self.completed[index] = true;
        self.stroke_index += 1;
        self.hint_visible = false;
        self.events.push(TraceEvent::StrokeCompleted { index });
        log::debug!(
            "session: glyph '{}' stroke {index} complete ({}%)",
            self.glyph.id,
            self.percent()
        );

        if self.config.advance_delay > 0.0 {
            self.timers
                .schedule(self.config.advance_delay, self.epoch, SessionTimer::AdvanceStroke);
        } else {
            self.activate_current();
        }
    }

    /// Create the tracker for `stroke_index`, or finish if there is no
    /// traceable stroke there.
    fn activate_current(&mut self) {
        match self.glyph.strokes.get(self.stroke_index) {
            Some(stroke) if !stroke.path.is_empty() => {
                self.tracker = Some(StrokeTracker::new(stroke, &self.config));
                self.events.push(TraceEvent::StrokeActivated { index: self.stroke_index });
            }
            Some(_) => {
                log::warn!(
                    "session: glyph '{}' stroke {} has no path data, finishing",
                    self.glyph.id,
                    self.stroke_index
                );
                self.finish();
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.tracker = None;
        self.hint_visible = false;
        self.complete = true;
        self.celebrate();
    }

    fn celebrate(&mut self) {
        if self.celebrated {
            return;
        }
        log::info!("session: glyph '{}' complete", self.glyph.id);
        self.celebrated = true;
        self.celebrating = true;
        self.events.push(TraceEvent::Celebrate);
        self.timers
            .schedule(self.config.celebration_duration, self.epoch, SessionTimer::EndCelebration);
    }

    /// Advance timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for action in self.timers.tick(dt, self.epoch) {
            match action {
                SessionTimer::AdvanceStroke => self.activate_current(),
                SessionTimer::EndCelebration => {
                    self.celebrating = false;
                    self.events.push(TraceEvent::CelebrationEnded);
                }
                SessionTimer::HideHint(token) => {
                    if self.hint_visible && token == self.hint_token {
                        self.hint_visible = false;
                        self.events.push(TraceEvent::HintHidden);
                    }
                }
            }
        }
    }

    /// Reset to the glyph's initial state without reloading glyph data.
    /// Pending timers from before the reset become stale.
    pub fn clear(&mut self) {
        self.epoch = self.epoch.next();
        self.stroke_index = 0;
        self.completed.iter_mut().for_each(|c| *c = false);
        self.tracker = None;
        self.pen_down = false;
        self.mask.clear();
        self.complete = false;
        self.celebrated = false;
        self.celebrating = false;
        self.hint_visible = false;
        self.events.clear();
        self.activate_current();
    }

    /// Show the rest of the current stroke for `hint_duration` seconds.
    /// Purely visual; progress is untouched.
    pub fn request_hint(&mut self) {
        if self.tracker.is_none() {
            return;
        }
        self.hint_token = self.hint_token.wrapping_add(1);
        self.hint_visible = true;
        self.events.push(TraceEvent::HintShown);
        self.timers.schedule(
            self.config.hint_duration,
            self.epoch,
            SessionTimer::HideHint(self.hint_token),
        );
    }

    // -- Accessors --

    pub fn glyph(&self) -> &GlyphDef {
        &self.glyph
    }

    pub fn glyph_id(&self) -> char {
        self.glyph.id
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn stroke_index(&self) -> usize {
        self.stroke_index
    }

    pub fn stroke_count(&self) -> usize {
        self.glyph.strokes.len()
    }

    pub fn completed_strokes(&self) -> &[bool] {
        &self.completed
    }

    pub fn completed_stroke_count(&self) -> usize {
        self.completed.iter().filter(|&&c| c).count()
    }

    /// The stroke being traced, if one is active.
    pub fn current_stroke(&self) -> Option<&StrokeDef> {
        self.tracker.as_ref()?;
        self.glyph.strokes.get(self.stroke_index)
    }

    pub fn tracker(&self) -> Option<&StrokeTracker> {
        self.tracker.as_ref()
    }

    /// Validated arc length along the active stroke.
    pub fn stroke_progress(&self) -> f32 {
        self.tracker.as_ref().map_or(0.0, StrokeTracker::progress)
    }

    pub fn has_engaged_current_stroke(&self) -> bool {
        self.tracker.as_ref().is_some_and(StrokeTracker::is_engaged)
    }

    /// Whole-glyph completion: completed strokes over total, 100 when complete.
    pub fn percent(&self) -> u8 {
        let total = self.glyph.strokes.len();
        if self.complete || total == 0 {
            return if self.complete { 100 } else { 0 };
        }
        (100.0 * self.stroke_index as f32 / total as f32).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn mask(&self) -> &[Polyline] {
        &self.mask
    }

    /// Four stars per completed stroke.
    pub fn star_score(&self) -> usize {
        self.completed_stroke_count() * 4
    }

    /// Cheer line for the current percent.
    pub fn encouragement(&self) -> &'static str {
        match self.percent() {
            0 => "Start tracing! You can do it! 🚀",
            1..=29 => "Great start! Keep going! 💪",
            30..=59 => "Halfway there! Looking good! ⭐",
            60..=89 => "Almost done! Stay focused! 🎯",
            _ => "Amazing! You nailed it! 🎉",
        }
    }

    /// Take the queued notifications.
    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            glyph_id: self.glyph.id,
            stroke_index: self.stroke_index,
            stroke_progress: self.stroke_progress(),
            completed_strokes: self.completed.clone(),
            has_engaged: self.has_engaged_current_stroke(),
            percent: self.percent(),
            complete: self.complete,
        }
    }
}
