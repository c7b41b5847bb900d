pub mod runner;

pub use runner::PracticeRunner;

use std::cell::RefCell;

use trace_engine::{GlyphCatalog, InputEvent, TraceConfig, TracingMode};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<PracticeRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Before `trace_init` every export is a no-op
/// returning `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut PracticeRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("trace-web: called before trace_init()");
            R::default()
        }
    })
}

fn load_catalog(json: &str, config: &TraceConfig) -> Option<GlyphCatalog> {
    if !json.trim().is_empty() {
        match GlyphCatalog::from_json(json, config.flatten_tolerance) {
            Ok(catalog) => return Some(catalog),
            Err(e) => log::warn!("trace-web: {e}; using bundled glyphs"),
        }
    }
    GlyphCatalog::builtin()
        .map_err(|e| log::error!("trace-web: bundled glyphs failed to load: {e}"))
        .ok()
}

fn load_config(json: &str) -> TraceConfig {
    if json.trim().is_empty() {
        return TraceConfig::default();
    }
    TraceConfig::from_json(json).unwrap_or_else(|e| {
        log::warn!("trace-web: invalid config ({e}); using defaults");
        TraceConfig::default()
    })
}

/// Initialize the engine. Empty strings select the bundled catalog and the
/// default config.
#[wasm_bindgen]
pub fn trace_init(catalog_json: &str, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config(config_json);
    let Some(catalog) = load_catalog(catalog_json, &config) else {
        return;
    };
    let glyphs = catalog.len();
    let runner = PracticeRunner::new(catalog, config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("trace-web: initialized ({glyphs} glyphs)");
}

/// Switch glyph and/or mode. Unknown ids fall back to the default glyph and
/// unknown modes to guided tracing.
#[wasm_bindgen]
pub fn trace_load_glyph(id: &str, mode: &str) {
    let glyph = id.chars().next().unwrap_or_default();
    let mode = TracingMode::from_name(mode).unwrap_or_else(|| {
        log::warn!("trace-web: unknown mode {mode:?}, using guided");
        TracingMode::Guided
    });
    with_runner(|r| r.load_glyph(glyph, mode));
}

#[wasm_bindgen]
pub fn trace_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn trace_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn trace_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn trace_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn trace_clear() {
    with_runner(|r| r.push_input(InputEvent::Clear));
}

#[wasm_bindgen]
pub fn trace_hint() {
    with_runner(|r| r.push_input(InputEvent::Hint));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn trace_percent() -> u8 {
    with_runner(|r| r.percent())
}

#[wasm_bindgen]
pub fn trace_is_complete() -> bool {
    with_runner(|r| r.is_complete())
}

#[wasm_bindgen]
pub fn trace_is_celebrating() -> bool {
    with_runner(|r| r.is_celebrating())
}

#[wasm_bindgen]
pub fn trace_glyph_id() -> String {
    with_runner(|r| r.glyph_id().to_string())
}

/// The current `RenderFrame` as JSON.
#[wasm_bindgen]
pub fn trace_frame_json() -> String {
    with_runner(|r| {
        r.frame().to_json().unwrap_or_else(|e| {
            log::error!("trace-web: frame serialization failed: {e}");
            String::new()
        })
    })
}

/// Events since the last call, as a JSON array.
#[wasm_bindgen]
pub fn trace_events_json() -> String {
    with_runner(|r| {
        let events = r.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("trace-web: event serialization failed: {e}");
            String::from("[]")
        })
    })
}
