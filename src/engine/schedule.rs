//! Deadline-polled timers with explicit cancellation.
//!
//! The engine is single-threaded and cooperative; nothing blocks. Every
//! delayed transition goes through here and returns a token, so whoever
//! schedules a transition can cancel it when the surrounding screen or
//! overlay goes away first.

use std::time::Instant;

/// Handle for cancelling a scheduled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// What fires when a deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    BootTick,
    BootSettle,
    ToastExpire,
    LaunchDone(String),
    QuitDone,
}

#[derive(Debug)]
struct Entry {
    id: u64,
    deadline: Instant,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, event: TimerEvent) -> TimerToken {
        self.next_id += 1;
        self.entries.push(Entry {
            id: self.next_id,
            deadline,
            event,
        });
        TimerToken(self.next_id)
    }

    /// Returns true when the timer was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != token.0);
        self.entries.len() != before
    }

    /// Remove and return every due event, in deadline order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut due: Vec<Entry> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.deadline, e.id));
        due.into_iter().map(|e| e.event).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fires_in_deadline_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(t0 + Duration::from_millis(20), TimerEvent::BootSettle);
        s.schedule(t0 + Duration::from_millis(10), TimerEvent::BootTick);

        assert!(s.fire_due(t0).is_empty());
        let due = s.fire_due(t0 + Duration::from_millis(25));
        assert_eq!(due, vec![TimerEvent::BootTick, TimerEvent::BootSettle]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let tok = s.schedule(
            t0 + Duration::from_millis(5),
            TimerEvent::LaunchDone("eldenring".into()),
        );
        assert!(s.cancel(tok));
        assert!(!s.cancel(tok));
        assert!(s.fire_due(t0 + Duration::from_secs(1)).is_empty());
    }
}
