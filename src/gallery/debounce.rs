/// Cancellable delayed values
///
/// `arm` schedules a value to fire after the quiet period; arming again
/// before it fires replaces the value and restarts the timer. The host
/// polls from its tick callback, so no timer thread is involved and time
/// is passed in explicitly.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Schedule `value`, superseding anything already pending
    pub fn arm(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Drop the pending value without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the value once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }
}
