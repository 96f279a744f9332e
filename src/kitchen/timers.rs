//! Virtual-time deferred callbacks.
//!
//! The kitchen never reads a wall clock. Anything that should happen
//! "later" (the one-second countdown, finishing a chop, a combo timing
//! out, a cascaded order) is queued here with a due time and fired by
//! `logic::advance` once virtual time reaches it.

use super::catalog::Ingredient;

/// Handle for cancelling a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerEvent {
    /// One second of match time has elapsed.
    Countdown,
    /// No success within the combo window.
    ComboReset,
    /// Cascaded order generation.
    SpawnOrder,
    /// An ingredient finished chopping and drops into the pot.
    ChopDone(Ingredient),
}

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    event: TimerEvent,
}

#[derive(Clone, Debug, Default)]
pub struct Timers {
    pending: Vec<Timer>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            due_ms: now_ms.saturating_add(delay_ms),
            event,
        });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Remove and return the earliest timer due at or before `until_ms`.
    /// Timers with equal due times fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, TimerEvent)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(idx);
        Some((timer.due_ms, timer.event))
    }

    /// Number of pending timers carrying exactly `event`.
    pub fn count(&self, event: TimerEvent) -> usize {
        self.pending.iter().filter(|t| t.event == event).count()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_before_deadline() {
        let mut t = Timers::new();
        t.schedule(0, 1_000, TimerEvent::Countdown);
        assert_eq!(t.pop_due(999), None);
        assert_eq!(t.pop_due(1_000), Some((1_000, TimerEvent::Countdown)));
        assert!(t.is_empty());
    }

    #[test]
    fn fires_in_due_order() {
        let mut t = Timers::new();
        t.schedule(0, 500, TimerEvent::SpawnOrder);
        t.schedule(0, 100, TimerEvent::ComboReset);
        t.schedule(0, 300, TimerEvent::Countdown);

        assert_eq!(t.pop_due(1_000), Some((100, TimerEvent::ComboReset)));
        assert_eq!(t.pop_due(1_000), Some((300, TimerEvent::Countdown)));
        assert_eq!(t.pop_due(1_000), Some((500, TimerEvent::SpawnOrder)));
        assert_eq!(t.pop_due(1_000), None);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut t = Timers::new();
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Spider));
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Chili));
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Garlic));

        let order: Vec<_> = std::iter::from_fn(|| t.pop_due(500)).map(|(_, e)| e).collect();
        assert_eq!(
            order,
            vec![
                TimerEvent::ChopDone(Ingredient::Spider),
                TimerEvent::ChopDone(Ingredient::Chili),
                TimerEvent::ChopDone(Ingredient::Garlic),
            ]
        );
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut t = Timers::new();
        let a = t.schedule(0, 100, TimerEvent::ComboReset);
        t.schedule(0, 200, TimerEvent::Countdown);

        assert!(t.cancel(a));
        assert!(!t.cancel(a));
        assert_eq!(t.len(), 1);
        assert_eq!(t.pop_due(1_000), Some((200, TimerEvent::Countdown)));
    }

    #[test]
    fn count_matches_exact_event() {
        let mut t = Timers::new();
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Spider));
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Spider));
        t.schedule(0, 500, TimerEvent::ChopDone(Ingredient::Chili));

        assert_eq!(t.count(TimerEvent::ChopDone(Ingredient::Spider)), 2);
        assert_eq!(t.count(TimerEvent::ChopDone(Ingredient::Chili)), 1);
        assert_eq!(t.count(TimerEvent::Countdown), 0);
    }
}
