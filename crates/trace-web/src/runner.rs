use trace_engine::{
    CoverageEstimator, GlyphCatalog, GlyphSession, InputEvent, InputQueue,
    ProgressEstimator, RenderFrame, TraceConfig, TraceEvent, TracingMode,
};

/// Drives one practice screen: the catalog, the active estimator and the
/// events the browser drains each frame.
///
/// wasm-bindgen cannot export trait objects, so the bridge keeps a runner in
/// a `thread_local!` and exposes free functions over it.
pub struct PracticeRunner {
    catalog: GlyphCatalog,
    config: TraceConfig,
    mode: TracingMode,
    estimator: Box<dyn ProgressEstimator>,
    input: InputQueue,
    /// Events accumulated since the host last drained them.
    events: Vec<TraceEvent>,
}

impl PracticeRunner {
    /// Start on the catalog's default glyph in guided mode.
    pub fn new(catalog: GlyphCatalog, config: TraceConfig) -> Self {
        let first = if catalog.contains(config.default_glyph) {
            config.default_glyph
        } else {
            catalog.default_glyph().id
        };
        let mode = TracingMode::default();
        let estimator = build_estimator(&catalog, &config, first, mode);
        let mut runner = Self {
            catalog,
            config,
            mode,
            estimator,
            input: InputQueue::new(),
            events: Vec::new(),
        };
        runner.collect_events();
        runner
    }

    /// Replace the estimator with a fresh one for `id` in `mode`.
    /// Pending input and timers of the old estimator are dropped with it.
    pub fn load_glyph(&mut self, id: char, mode: TracingMode) {
        let id = if self.catalog.contains(id) {
            id
        } else {
            log::warn!("runner: unknown glyph {id:?}, using '{}'", self.config.default_glyph);
            self.config.default_glyph
        };
        self.mode = mode;
        self.input.clear();
        self.events.clear();
        self.estimator = build_estimator(&self.catalog, &self.config, id, mode);
        self.collect_events();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input in arrival order, then advance timers.
    /// Events are collected after each input, since `clear()` empties the
    /// estimator's queue.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.estimator.handle_input(event);
            self.collect_events();
        }
        self.estimator.tick(dt);
        self.collect_events();
    }

    fn collect_events(&mut self) {
        self.events.extend(self.estimator.drain_events());
    }

    pub fn frame(&self) -> RenderFrame {
        self.estimator.frame()
    }

    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn percent(&self) -> u8 {
        self.estimator.percent()
    }

    pub fn is_complete(&self) -> bool {
        self.estimator.is_complete()
    }

    pub fn is_celebrating(&self) -> bool {
        self.estimator.is_celebrating()
    }

    pub fn glyph_id(&self) -> char {
        self.estimator.glyph_id()
    }

    pub fn mode(&self) -> TracingMode {
        self.mode
    }

    pub fn catalog(&self) -> &GlyphCatalog {
        &self.catalog
    }
}

fn build_estimator(
    catalog: &GlyphCatalog,
    config: &TraceConfig,
    id: char,
    mode: TracingMode,
) -> Box<dyn ProgressEstimator> {
    match mode {
        TracingMode::Guided => Box::new(GlyphSession::load_glyph(catalog, id, config.clone())),
        TracingMode::FreeWriting => Box::new(CoverageEstimator::new(
            catalog.get_or_default(id),
            config,
            catalog.canvas(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> PracticeRunner {
        PracticeRunner::new(GlyphCatalog::builtin().unwrap(), TraceConfig::default())
    }

    fn trace_first_stroke_of_a(r: &mut PracticeRunner) {
        r.push_input(InputEvent::PointerDown { x: 200.0, y: 60.0 });
        r.push_input(InputEvent::PointerMove { x: 160.0, y: 177.0 });
        r.push_input(InputEvent::PointerMove { x: 125.0, y: 280.0 });
        r.push_input(InputEvent::PointerUp { x: 125.0, y: 280.0 });
    }

    #[test]
    fn starts_on_default_glyph() {
        let mut r = runner();
        assert_eq!(r.glyph_id(), 'A');
        assert_eq!(r.mode(), TracingMode::Guided);
        assert_eq!(r.drain_events(), vec![TraceEvent::StrokeActivated { index: 0 }]);
    }

    #[test]
    fn input_applies_on_tick() {
        let mut r = runner();
        trace_first_stroke_of_a(&mut r);
        assert_eq!(r.percent(), 0);

        r.tick(0.016);
        assert_eq!(r.percent(), 33);
        let events = r.drain_events();
        assert!(events.contains(&TraceEvent::StrokeCompleted { index: 0 }));
        assert!(!r.frame().ink.is_empty());
    }

    #[test]
    fn load_glyph_replaces_estimator() {
        let mut r = runner();
        trace_first_stroke_of_a(&mut r);
        r.load_glyph('b', TracingMode::Guided);
        r.tick(0.016);
        assert_eq!(r.glyph_id(), 'b');
        assert_eq!(r.percent(), 0);

        r.load_glyph('%', TracingMode::FreeWriting);
        assert_eq!(r.glyph_id(), 'A');
        assert_eq!(r.mode(), TracingMode::FreeWriting);
        assert!(!r.frame().reference.is_empty());
    }

    #[test]
    fn events_before_clear_in_same_tick_survive() {
        let mut r = runner();
        r.drain_events();
        trace_first_stroke_of_a(&mut r);
        r.push_input(InputEvent::Clear);
        r.tick(0.016);

        assert_eq!(r.percent(), 0);
        let events = r.drain_events();
        assert!(events.contains(&TraceEvent::StrokeCompleted { index: 0 }));
        assert_eq!(events.last(), Some(&TraceEvent::StrokeActivated { index: 0 }));
    }

    #[test]
    fn clear_and_hint_events_route_through_queue() {
        let mut r = runner();
        trace_first_stroke_of_a(&mut r);
        r.tick(0.3);
        r.push_input(InputEvent::Clear);
        r.push_input(InputEvent::Hint);
        r.tick(0.016);
        assert_eq!(r.percent(), 0);
        assert!(r.frame().hint.is_some());
    }
}
