use glam::Vec2;

use crate::api::types::{TraceEvent, TracingMode};
use crate::coverage::estimator::CoverageEstimator;
use crate::input::queue::InputEvent;
use crate::render::feed::{free_frame, guided_frame, RenderFrame};
use crate::tracing::session::GlyphSession;

/// Common surface of the guided and free-writing progress models.
///
/// The host owns exactly one estimator per glyph and drives it with pointer
/// samples in logical canvas units plus a per-frame `tick`.
pub trait ProgressEstimator {
    fn mode(&self) -> TracingMode;

    fn glyph_id(&self) -> char;

    fn pointer_down(&mut self, point: Vec2);

    /// Moves while the pointer is up are hover and never add progress.
    fn pointer_move(&mut self, point: Vec2);

    fn pointer_up(&mut self, point: Vec2);

    /// Advance timers by `dt` seconds.
    fn tick(&mut self, dt: f32);

    /// Reset progress for the current glyph.
    fn clear(&mut self);

    /// Show a transient hint. Free writing has none.
    fn request_hint(&mut self) {}

    /// Overall progress, 0 to 100.
    fn percent(&self) -> u8;

    fn is_complete(&self) -> bool;

    fn is_celebrating(&self) -> bool;

    fn drain_events(&mut self) -> Vec<TraceEvent>;

    fn frame(&self) -> RenderFrame;

    /// Dispatch one queued input event.
    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
            InputEvent::Clear => self.clear(),
            InputEvent::Hint => self.request_hint(),
        }
    }
}

impl ProgressEstimator for GlyphSession {
    fn mode(&self) -> TracingMode {
        TracingMode::Guided
    }

    fn glyph_id(&self) -> char {
        GlyphSession::glyph_id(self)
    }

    fn pointer_down(&mut self, point: Vec2) {
        GlyphSession::pointer_down(self, point);
    }

    fn pointer_move(&mut self, point: Vec2) {
        GlyphSession::pointer_move(self, point);
    }

    fn pointer_up(&mut self, _point: Vec2) {
        GlyphSession::pointer_up(self);
    }

    fn tick(&mut self, dt: f32) {
        GlyphSession::tick(self, dt);
    }

    fn clear(&mut self) {
        GlyphSession::clear(self);
    }

    fn request_hint(&mut self) {
        GlyphSession::request_hint(self);
    }

    fn percent(&self) -> u8 {
        GlyphSession::percent(self)
    }

    fn is_complete(&self) -> bool {
        GlyphSession::is_complete(self)
    }

    fn is_celebrating(&self) -> bool {
        GlyphSession::is_celebrating(self)
    }

    fn drain_events(&mut self) -> Vec<TraceEvent> {
        GlyphSession::drain_events(self)
    }

    fn frame(&self) -> RenderFrame {
        guided_frame(self)
    }
}

impl ProgressEstimator for CoverageEstimator {
    fn mode(&self) -> TracingMode {
        TracingMode::FreeWriting
    }

    fn glyph_id(&self) -> char {
        CoverageEstimator::glyph_id(self)
    }

    fn pointer_down(&mut self, point: Vec2) {
        CoverageEstimator::pointer_down(self, point);
    }

    fn pointer_move(&mut self, point: Vec2) {
        CoverageEstimator::pointer_move(self, point);
    }

    fn pointer_up(&mut self, _point: Vec2) {
        CoverageEstimator::pointer_up(self);
    }

    fn tick(&mut self, dt: f32) {
        CoverageEstimator::tick(self, dt);
    }

    fn clear(&mut self) {
        CoverageEstimator::clear(self);
    }

    fn percent(&self) -> u8 {
        CoverageEstimator::percent(self)
    }

    fn is_complete(&self) -> bool {
        CoverageEstimator::is_complete(self)
    }

    fn is_celebrating(&self) -> bool {
        CoverageEstimator::is_celebrating(self)
    }

    fn drain_events(&mut self) -> Vec<TraceEvent> {
        CoverageEstimator::drain_events(self)
    }

    fn frame(&self) -> RenderFrame {
        free_frame(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TraceConfig;
    use crate::assets::catalog::GlyphCatalog;

    fn estimators() -> Vec<Box<dyn ProgressEstimator>> {
        let catalog = GlyphCatalog::builtin().unwrap();
        let config = TraceConfig::default();
        let glyph = catalog.get_glyph('A').unwrap();
        vec![
            Box::new(GlyphSession::new(glyph.clone(), config.clone())),
            Box::new(CoverageEstimator::new(glyph, &config, catalog.canvas())),
        ]
    }

    #[test]
    fn modes() {
        let modes: Vec<_> = estimators().iter().map(|e| e.mode()).collect();
        assert_eq!(modes, vec![TracingMode::Guided, TracingMode::FreeWriting]);
    }

    #[test]
    fn hover_adds_no_progress_in_either_mode() {
        for mut e in estimators() {
            for x in (100..300).step_by(10) {
                e.handle_input(InputEvent::PointerMove { x: x as f32, y: 200.0 });
            }
            assert_eq!(e.percent(), 0, "{:?}", e.mode());
            assert!(e.frame().ink.is_empty());
        }
    }

    #[test]
    fn dispatches_input_events() {
        let mut estimators = estimators();
        let guided = &mut estimators[0];
        guided.handle_input(InputEvent::PointerDown { x: 200.0, y: 60.0 });
        guided.handle_input(InputEvent::PointerMove { x: 125.0, y: 280.0 });
        guided.handle_input(InputEvent::PointerUp { x: 125.0, y: 280.0 });
        assert_eq!(guided.percent(), 33);

        guided.handle_input(InputEvent::Clear);
        assert_eq!(guided.percent(), 0);

        guided.handle_input(InputEvent::Hint);
        assert!(guided.frame().hint.is_some());
        assert!(guided.drain_events().contains(&TraceEvent::HintShown));

        let free = &mut estimators[1];
        free.handle_input(InputEvent::PointerDown { x: 100.0, y: 200.0 });
        free.handle_input(InputEvent::PointerMove { x: 300.0, y: 200.0 });
        assert!(free.percent() > 0);
        free.handle_input(InputEvent::Hint);
        assert!(free.frame().hint.is_none());
    }
}
