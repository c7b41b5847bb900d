//! Per-frame render description handed to the host.
//!
//! Everything is in logical canvas units. The host draws the layers in
//! order: reference outline, guide path and dots, completed mask plus the
//! partial reveal of the active stroke, hint overlay, then the cursor.

use glam::Vec2;
use serde::Serialize;

use crate::coverage::estimator::CoverageEstimator;
use crate::tracing::session::GlyphSession;

/// An open polyline in logical units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Vec2>,
}

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data, "M x y L x y ...".
    pub fn to_svg_path_data(&self) -> String {
        let mut out = String::new();
        write_polyline(&mut out, &self.points);
        out
    }
}

fn write_polyline(out: &mut String, points: &[Vec2]) {
    for (i, p) in points.iter().enumerate() {
        if !out.is_empty() {
            out.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        out.push_str(&format!("{cmd} {} {}", p.x, p.y));
    }
}

/// Start and end markers for the active stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideDots {
    pub start: Vec2,
    pub end: Vec2,
    /// Arrow glyph drawn on the start dot.
    pub direction: String,
    /// Full reference path of the active stroke.
    pub path: Polyline,
}

/// Snapshot of everything the host needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Revealed ink: completed strokes, then the partial active stroke.
    pub ink: Vec<Polyline>,
    /// Pen position on the active stroke once it is engaged.
    pub cursor: Option<Vec2>,
    pub guide: Option<GuideDots>,
    /// Remainder of the active stroke while a hint is showing.
    pub hint: Option<Polyline>,
    /// Cursive outline behind free writing.
    pub reference: Vec<Polyline>,
    pub percent: u8,
    pub complete: bool,
    pub celebrating: bool,
}

impl RenderFrame {
    /// All ink as one SVG path data string.
    pub fn ink_path_data(&self) -> String {
        let mut out = String::new();
        for line in &self.ink {
            write_polyline(&mut out, &line.points);
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frame for a guided session.
pub fn guided_frame(session: &GlyphSession) -> RenderFrame {
    let steps = session.config().reveal_steps;
    let mut ink = session.mask().to_vec();
    let mut frame = RenderFrame {
        percent: session.percent(),
        complete: session.is_complete(),
        celebrating: session.is_celebrating(),
        ..RenderFrame::default()
    };

    if let (Some(stroke), Some(tracker)) = (session.current_stroke(), session.tracker()) {
        let path = tracker.path();
        let progress = tracker.progress();

        if progress > 0.0 {
            ink.push(Polyline::new(path.resample(progress, steps)));
        }
        if tracker.is_engaged() {
            frame.cursor = Some(tracker.cursor());
        }
        if session.hint_visible() {
            frame.hint = Some(Polyline::new(path.resample_range(progress, path.length(), steps)));
        }
        frame.guide = Some(GuideDots {
            start: stroke.start,
            end: stroke.end,
            direction: stroke.direction.clone(),
            path: Polyline::new(path.points().to_vec()),
        });
    }

    frame.ink = ink;
    frame
}

/// Frame for free writing.
pub fn free_frame(estimator: &CoverageEstimator) -> RenderFrame {
    RenderFrame {
        ink: estimator
            .strokes()
            .iter()
            .filter(|s| s.points.len() >= 2)
            .cloned()
            .collect(),
        reference: estimator.reference().to_vec(),
        percent: estimator.percent(),
        complete: estimator.is_complete(),
        celebrating: estimator.is_celebrating(),
        ..RenderFrame::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TraceConfig;
    use crate::assets::catalog::GlyphCatalog;

    fn session() -> GlyphSession {
        let catalog = GlyphCatalog::builtin().unwrap();
        GlyphSession::load_glyph(&catalog, 'A', TraceConfig::default())
    }

    #[test]
    fn svg_path_data_format() {
        let line = Polyline::new(vec![Vec2::new(1.0, 2.0), Vec2::new(3.5, 4.0)]);
        assert_eq!(line.to_svg_path_data(), "M 1 2 L 3.5 4");
        assert_eq!(Polyline::default().to_svg_path_data(), "");
    }

    #[test]
    fn ink_path_data_joins_lines() {
        let frame = RenderFrame {
            ink: vec![
                Polyline::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]),
                Polyline::new(vec![Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0)]),
            ],
            ..RenderFrame::default()
        };
        assert_eq!(frame.ink_path_data(), "M 0 0 L 1 1 M 5 5 L 6 6");
    }

    #[test]
    fn fresh_session_shows_guide_only() {
        let frame = guided_frame(&session());
        assert!(frame.ink.is_empty());
        assert!(frame.cursor.is_none());
        assert!(frame.hint.is_none());
        let guide = frame.guide.unwrap();
        assert_eq!(guide.start, Vec2::new(200.0, 60.0));
        assert_eq!(guide.direction, "↙");
        assert_eq!(frame.percent, 0);
    }

    #[test]
    fn partial_reveal_follows_progress() {
        let mut s = session();
        s.pointer_down(Vec2::new(200.0, 60.0));
        s.pointer_move(Vec2::new(170.0, 148.0));

        let frame = guided_frame(&s);
        assert_eq!(frame.ink.len(), 1);
        let reveal = &frame.ink[0].points;
        assert_eq!(reveal.first(), Some(&Vec2::new(200.0, 60.0)));
        let tip = *reveal.last().unwrap();
        assert!(tip.distance(Vec2::new(170.0, 148.0)) < 1.0);
        assert_eq!(frame.cursor, Some(tip));
    }

    #[test]
    fn hint_covers_the_remainder() {
        let mut s = session();
        s.request_hint();
        let frame = guided_frame(&s);
        let hint = frame.hint.unwrap();
        assert_eq!(hint.points.first(), Some(&Vec2::new(200.0, 60.0)));
        assert!(hint.points.last().unwrap().distance(Vec2::new(125.0, 280.0)) < 0.01);
    }

    #[test]
    fn completed_session_hides_guides() {
        let config = TraceConfig {
            advance_delay: 0.0,
            ..TraceConfig::default()
        };
        let catalog = GlyphCatalog::builtin().unwrap();
        let mut s = GlyphSession::load_glyph(&catalog, 'L', config);
        for i in 0..s.stroke_count() {
            let path = s.glyph().strokes[i].path.clone();
            s.pointer_down(path.start());
            s.pointer_move(path.end());
            s.pointer_up();
        }
        assert!(s.is_complete());

        let frame = guided_frame(&s);
        assert!(frame.guide.is_none());
        assert!(frame.cursor.is_none());
        assert_eq!(frame.ink.len(), s.stroke_count());
        assert!(frame.complete);
        assert_eq!(frame.percent, 100);
    }

    #[test]
    fn frame_serializes() {
        let json = guided_frame(&session()).to_json().unwrap();
        assert!(json.contains("\"guide\""));
        assert!(json.contains("\"percent\":0"));
    }
}
