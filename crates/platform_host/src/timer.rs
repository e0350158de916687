//! Repeating-timer host contract.
//!
//! Animation frames, the panel clock and terminal takeovers all run on interval callbacks. The
//! runtime never calls `setInterval` directly; it goes through [`TimerService`] so a closed window
//! can cancel everything it started, and so tests can drive time by hand.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

use thiserror::Error;

/// Opaque handle for one registered interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Interval registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The host has no timer facility (non-browser build).
    #[error("timers are unavailable on this host")]
    Unavailable,
    /// The host rejected the registration.
    #[error("timer registration failed: {0}")]
    Host(String),
}

/// Host service for repeating callbacks.
pub trait TimerService {
    /// Starts calling `callback` every `period` until cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError`] when the host cannot register the interval.
    fn set_interval(
        &self,
        period: Duration,
        callback: Rc<dyn Fn()>,
    ) -> Result<TimerHandle, TimerError>;

    /// Stops an interval. Unknown or already-cleared handles are ignored.
    fn clear_interval(&self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer service for hosts without timers; every registration fails with
/// [`TimerError::Unavailable`].
pub struct NoopTimerService;

impl TimerService for NoopTimerService {
    fn set_interval(
        &self,
        _period: Duration,
        _callback: Rc<dyn Fn()>,
    ) -> Result<TimerHandle, TimerError> {
        Err(TimerError::Unavailable)
    }

    fn clear_interval(&self, _handle: TimerHandle) {}
}

struct ManualTimer {
    period: Duration,
    elapsed: Duration,
    callback: Rc<dyn Fn()>,
}

#[derive(Default)]
struct ManualTimers {
    next_handle: u64,
    timers: BTreeMap<TimerHandle, ManualTimer>,
}

#[derive(Clone, Default)]
/// Deterministic timer service advanced explicitly with [`ManualTimerService::advance`].
pub struct ManualTimerService {
    inner: Rc<RefCell<ManualTimers>>,
}

impl ManualTimerService {
    /// Number of intervals currently registered.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Advances virtual time, firing each interval once per elapsed period.
    ///
    /// Callbacks run after the internal borrow is released, so they may register or clear timers.
    pub fn advance(&self, by: Duration) {
        let mut due: Vec<(TimerHandle, Rc<dyn Fn()>)> = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            for (handle, timer) in inner.timers.iter_mut() {
                if timer.period.is_zero() {
                    continue;
                }
                timer.elapsed += by;
                while timer.elapsed >= timer.period {
                    timer.elapsed -= timer.period;
                    due.push((*handle, timer.callback.clone()));
                }
            }
        }

        for (handle, callback) in due {
            // A previous callback in this batch may have cleared this timer.
            if self.inner.borrow().timers.contains_key(&handle) {
                callback();
            }
        }
    }
}

impl TimerService for ManualTimerService {
    fn set_interval(
        &self,
        period: Duration,
        callback: Rc<dyn Fn()>,
    ) -> Result<TimerHandle, TimerError> {
        let mut inner = self.inner.borrow_mut();
        inner.next_handle = inner.next_handle.saturating_add(1);
        let handle = TimerHandle(inner.next_handle);
        inner.timers.insert(
            handle,
            ManualTimer {
                period,
                elapsed: Duration::ZERO,
                callback,
            },
        );
        Ok(handle)
    }

    fn clear_interval(&self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle);
    }
}
