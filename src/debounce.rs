//! Settle timer: a value is final once nothing newer arrives for a window.
//!
//! Scheduling a value cancels whatever was pending. The debouncer does not
//! own a clock or a thread; callers either poll it with the current time or
//! hand [`Ticket`]s to their own timer (floem's `exec_after`, for one) and
//! call [`Debouncer::fire`] when it goes off.

use std::time::{Duration, Instant};

/// Identifies one scheduled value. Only the latest ticket can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    /// `None` when the window reaches past what `Instant` can represent.
    deadline: Option<Instant>,
    ticket: Ticket,
}

/// Cancel-on-reschedule delayed value.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    next_ticket: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_ticket: 0,
            pending: None,
        }
    }

    /// The quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value with `value`, due at `now + window`.
    pub fn schedule(&mut self, value: T, now: Instant) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        if self.pending.is_some() {
            log::trace!("debounce: superseding pending value");
        }
        self.pending = Some(Pending {
            value,
            deadline: now.checked_add(self.window),
            ticket,
        });
        ticket
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some(Pending { deadline: Some(d), .. }) if now >= *d);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Take the pending value if `ticket` is still the latest one scheduled.
    ///
    /// Stale tickets (superseded or cancelled) yield `None`.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        let latest = matches!(&self.pending, Some(p) if p.ticket == ticket);
        if latest {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(1);

    #[test]
    fn test_settles_after_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.schedule(1, t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(999)), None);
        assert_eq!(d.poll(t0 + WINDOW), Some(1));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + WINDOW * 3), None);
    }

    #[test]
    fn test_last_value_wins() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.schedule("a", t0);
        d.schedule("b", t0 + Duration::from_millis(500));
        // the first deadline passed but was cancelled by the reschedule
        assert_eq!(d.poll(t0 + Duration::from_millis(1200)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(1500)), Some("b"));
    }

    #[test]
    fn test_stale_ticket_does_not_fire() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        let first = d.schedule(1, t0);
        let second = d.schedule(2, t0);
        assert_eq!(d.fire(first), None);
        assert!(d.is_pending());
        assert_eq!(d.fire(second), Some(2));
        assert_eq!(d.fire(second), None);
    }

    #[test]
    fn test_unrepresentable_deadline_never_polls() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::MAX);
        let ticket = d.schedule(3, t0);
        assert!(d.is_pending());
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(t0 + Duration::from_secs(3600)), None);
        assert_eq!(d.fire(ticket), Some(3));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        let ticket = d.schedule(7, t0);
        assert_eq!(d.deadline(), Some(t0 + WINDOW));
        d.cancel();
        assert_eq!(d.fire(ticket), None);
        assert_eq!(d.poll(t0 + WINDOW), None);
    }
}
