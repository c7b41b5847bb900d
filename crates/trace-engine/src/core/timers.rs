// core/timers.rs
//
// One-shot delayed actions tied to a session epoch.
//
// Usage:
//   let mut timers = Scheduler::new();
//   timers.schedule(0.3, epoch, SessionTimer::AdvanceStroke);
//   for action in timers.tick(dt, epoch) { ... }
//
// Bumping the owner's epoch (clear, reload) makes every pending action stale;
// stale actions are dropped on the next tick and never fire.

/// Identity of one "life" of a session. Bumped on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Epoch(pub u32);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone)]
struct Pending<A> {
    remaining: f32,
    epoch: Epoch,
    action: A,
}

/// Fire-and-forget timers. Actions fire in scheduling order.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    pending: Vec<Pending<A>>,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Schedule `action` to fire once `delay` seconds have been ticked.
    pub fn schedule(&mut self, delay: f32, epoch: Epoch, action: A) {
        self.pending.push(Pending {
            remaining: delay.max(0.0),
            epoch,
            action,
        });
    }

    /// Advance time. Returns the actions of `current` that came due;
    /// actions scheduled under an older epoch are discarded.
    pub fn tick(&mut self, dt: f32, current: Epoch) -> Vec<A> {
        self.pending.retain(|p| p.epoch == current);

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].remaining -= dt;
            if self.pending[i].remaining <= 0.0 {
                due.push(self.pending.remove(i).action);
            } else {
                i += 1;
            }
        }
        due
    }

}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut timers = Scheduler::new();
        let epoch = Epoch::default();
        timers.schedule(0.3, epoch, "advance");

        assert!(timers.tick(0.2, epoch).is_empty());
        assert_eq!(timers.tick(0.2, epoch), vec!["advance"]);
        assert!(timers.tick(10.0, epoch).is_empty());
    }

    #[test]
    fn fires_in_schedule_order() {
        let mut timers = Scheduler::new();
        let epoch = Epoch::default();
        timers.schedule(0.5, epoch, 1);
        timers.schedule(0.1, epoch, 2);
        timers.schedule(0.5, epoch, 3);

        assert_eq!(timers.tick(1.0, epoch), vec![1, 2, 3]);
    }

    #[test]
    fn stale_epoch_never_fires() {
        let mut timers = Scheduler::new();
        let old = Epoch::default();
        timers.schedule(0.1, old, "stale");

        let current = old.next();
        timers.schedule(0.1, current, "fresh");

        assert_eq!(timers.tick(1.0, current), vec!["fresh"]);
        assert!(timers.tick(1.0, old).is_empty());
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut timers = Scheduler::new();
        timers.schedule(0.0, Epoch(7), ());
        assert_eq!(timers.tick(0.0, Epoch(7)).len(), 1);
    }
}
