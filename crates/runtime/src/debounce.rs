use foundation::time::Time;
use tracing::trace;

/// Single-slot trailing-edge debounce timer.
///
/// Every `schedule` replaces the pending deadline, so only the last burst
/// of input fires. Time is supplied by the caller (normally the frame clock).
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    delay_s: f64,
    deadline: Option<Time>,
}

impl Debouncer {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s: delay_s.max(0.0),
            deadline: None,
        }
    }

    pub fn delay_s(&self) -> f64 {
        self.delay_s
    }

    /// Arms the timer at `now + delay`, cancelling any pending deadline.
    pub fn schedule(&mut self, now: Time) {
        if let Some(prev) = self.deadline {
            trace!(deadline = prev.seconds(), "debounce rescheduled");
        }
        self.deadline = Some(now.after(self.delay_s));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
