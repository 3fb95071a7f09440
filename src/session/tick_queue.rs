//! Deadline queue for scheduled session ticks.

use std::time::Instant;

use crate::session::game_session::PendingTick;

#[derive(Debug, Default)]
pub struct TickQueue {
    /// Kept sorted by deadline, earliest first.
    entries: Vec<(Instant, PendingTick)>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tick` to fire `tick.delay` after `now`.
    pub fn schedule(&mut self, tick: PendingTick, now: Instant) {
        let deadline = now + tick.delay;
        let at = self.entries.partition_point(|(d, _)| *d <= deadline);
        self.entries.insert(at, (deadline, tick));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest tick whose deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<PendingTick> {
        match self.entries.first() {
            Some((deadline, _)) if *deadline <= now => Some(self.entries.remove(0).1),
            _ => None,
        }
    }

    /// Drop every tick scheduled under a generation other than `generation`.
    pub fn cancel_stale(&mut self, generation: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, tick)| tick.generation == generation);
        before - self.entries.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
