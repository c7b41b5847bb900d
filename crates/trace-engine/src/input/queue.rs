/// Input events a practice session understands.
/// Coordinates are logical canvas units; the host maps client pixels first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y), pressed or not.
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The "clear" button: reset the current glyph.
    Clear,
    /// The "hint" button: flash the rest of the active stroke.
    Hint,
}

/// A queue of input events.
/// The host pushes events as they arrive; they are drained in order on the
/// next tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop pending events (e.g. when switching glyphs).
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 12.0, y: 24.0 });
        q.push(InputEvent::Hint);

        let events = q.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::Hint);
        assert!(q.drain().is_empty());
    }

    #[test]
    fn clear_drops_pending() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Clear);
        q.clear();
        assert!(q.drain().is_empty());
    }
}
