//=========================================================================
// Deferred Tasks
//=========================================================================
//
// Single-shot timers advanced by tick time. The owner polls `advance`
// each tick and acts when it returns `true`; cancelling makes a pending
// task inert.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== DeferredTask ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TaskState {
    #[default]
    Idle,
    Pending { remaining: Duration },
    Fired,
    Cancelled,
}

/// A cancelable one-shot delay.
///
/// ```
/// use std::time::Duration;
/// use neurobeep::core::time::DeferredTask;
///
/// let mut task = DeferredTask::new();
/// task.schedule(Duration::from_secs(3));
/// assert!(!task.advance(Duration::from_secs(2)));
/// assert!(task.advance(Duration::from_secs(1)));
/// assert!(!task.advance(Duration::from_secs(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    state: TaskState,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the task. Rescheduling a pending task restarts its delay.
    pub fn schedule(&mut self, delay: Duration) {
        self.state = TaskState::Pending { remaining: delay };
    }

    /// Disarms a pending task. No effect once it has fired.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.state = TaskState::Cancelled;
        }
    }

    /// Returns `true` exactly once: on the tick the delay elapses.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let TaskState::Pending { remaining } = self.state else {
            return false;
        };

        match remaining.checked_sub(dt) {
            Some(left) if !left.is_zero() => {
                self.state = TaskState::Pending { remaining: left };
                false
            }
            _ => {
                self.state = TaskState::Fired;
                true
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TaskState::Pending { .. })
    }

    pub fn has_fired(&self) -> bool {
        self.state == TaskState::Fired
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TaskState::Cancelled
    }

    /// Time left before firing, if pending.
    pub fn remaining(&self) -> Option<Duration> {
        match self.state {
            TaskState::Pending { remaining } => Some(remaining),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
