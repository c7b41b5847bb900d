use serde::Serialize;

/// Which progress model a session runs. Fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingMode {
    /// Follow the reference strokes in order.
    #[default]
    Guided,
    /// Write freely; progress is estimated from inked area.
    FreeWriting,
}

impl TracingMode {
    /// Parse the host's mode name ("guided", "free_writing"/"free"/"write").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "guided" | "trace" => Some(TracingMode::Guided),
            "free_writing" | "free" | "write" => Some(TracingMode::FreeWriting),
            _ => None,
        }
    }
}

/// One-shot notification from an estimator to the UI layer.
/// Queued during input/tick handling and drained by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// The user started tracing stroke `index`.
    StrokeEngaged { index: usize },
    /// Stroke `index` reached the completion threshold.
    StrokeCompleted { index: usize },
    /// Stroke `index` is now the one to trace (guide dots should move).
    StrokeActivated { index: usize },
    /// Glyph (or free-writing estimate) finished. Fires once per session life.
    Celebrate,
    /// The celebration display period elapsed.
    CelebrationEnded,
    HintShown,
    HintHidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(TracingMode::from_name("Guided"), Some(TracingMode::Guided));
        assert_eq!(TracingMode::from_name("free_writing"), Some(TracingMode::FreeWriting));
        assert_eq!(TracingMode::from_name("write"), Some(TracingMode::FreeWriting));
        assert_eq!(TracingMode::from_name("cursive"), None);
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&TraceEvent::StrokeCompleted { index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"stroke_completed","index":2}"#);
        let json = serde_json::to_string(&TraceEvent::Celebrate).unwrap();
        assert_eq!(json, r#"{"kind":"celebrate"}"#);
    }
}
