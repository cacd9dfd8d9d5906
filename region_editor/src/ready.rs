use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::EditorError;

pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_READY_POLL: Duration = Duration::from_millis(100);

/// Set once the view hosting the canvas exists. Cheap to clone and share
/// with a loader thread.
#[derive(Debug, Clone, Default)]
pub struct ViewReady(Arc<AtomicBool>);

impl ViewReady {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Poll every `step` until ready. Gives up once `timeout` has been used
    /// up; the first check happens immediately.
    pub fn wait(&self, timeout: Duration, step: Duration) -> Result<(), EditorError> {
        let step = if step.is_zero() { timeout } else { step };
        let mut remaining = timeout;
        let mut waited = Duration::ZERO;
        loop {
            remaining = remaining.saturating_sub(step);
            if self.is_ready() {
                return Ok(());
            }
            if remaining.is_zero() {
                return Err(EditorError::ViewNotReady { waited });
            }
            thread::sleep(step);
            waited += step;
        }
    }

    pub fn wait_default(&self) -> Result<(), EditorError> {
        self.wait(DEFAULT_READY_TIMEOUT, DEFAULT_READY_POLL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_returns_immediately() {
        let ready = ViewReady::new();
        ready.mark_ready();
        assert!(ready.wait(Duration::from_millis(10), Duration::from_millis(10)).is_ok());
    }

    #[test]
    fn test_times_out() {
        let ready = ViewReady::new();
        let err = ready
            .wait(Duration::from_millis(30), Duration::from_millis(10))
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::ViewNotReady {
                waited: Duration::from_millis(20)
            }
        );
    }

    #[test]
    fn test_ready_from_other_thread() {
        let ready = ViewReady::new();
        let setter = ready.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            setter.mark_ready();
        });
        assert!(ready
            .wait(Duration::from_millis(2000), Duration::from_millis(5))
            .is_ok());
        handle.join().unwrap();
    }

    #[test]
    fn test_zero_step_does_not_spin_forever() {
        let ready = ViewReady::new();
        assert!(ready.wait(Duration::ZERO, Duration::ZERO).is_err());
        assert!(ready
            .wait(Duration::from_millis(10), Duration::ZERO)
            .is_err());
    }
}
