//! Window-scoped repeating tasks.
//!
//! Every timer a window starts is registered under its [`WindowId`]. The runtime cancels the whole
//! group when the window closes, and each [`ScheduledTask`] also stops itself on drop, so no
//! interval outlives the view that asked for it.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    time::Duration,
};

use platform_host::{TimerError, TimerHandle, TimerService};
use thiserror::Error;

use crate::WindowId;

/// Task scheduling failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A repeating task needs a positive period.
    #[error("repeating task period must be greater than zero")]
    ZeroPeriod,
    /// The host timer service rejected the registration.
    #[error(transparent)]
    Timer(#[from] TimerError),
}

#[derive(Default)]
struct TaskRegistry {
    by_window: HashMap<WindowId, Vec<TimerHandle>>,
}

impl TaskRegistry {
    fn forget(&mut self, window_id: &WindowId, handle: TimerHandle) -> bool {
        let Some(handles) = self.by_window.get_mut(window_id) else {
            return false;
        };
        let before = handles.len();
        handles.retain(|h| *h != handle);
        let removed = handles.len() != before;
        if handles.is_empty() {
            self.by_window.remove(window_id);
        }
        removed
    }
}

#[derive(Clone)]
/// Shared scheduler that groups host timers by owning window.
pub struct WindowTaskScheduler {
    timers: Rc<dyn TimerService>,
    registry: Rc<RefCell<TaskRegistry>>,
}

impl WindowTaskScheduler {
    /// Creates a scheduler over a host timer service.
    pub fn new(timers: Rc<dyn TimerService>) -> Self {
        Self {
            timers,
            registry: Rc::new(RefCell::new(TaskRegistry::default())),
        }
    }

    /// Returns a handle that schedules tasks on behalf of one window.
    pub fn for_window(&self, window_id: WindowId) -> WindowTasks {
        WindowTasks {
            scheduler: self.clone(),
            window_id,
        }
    }

    /// Starts a repeating task owned by `window_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ZeroPeriod`] for a zero period, or the host timer error.
    pub fn schedule_repeating(
        &self,
        window_id: &WindowId,
        period: Duration,
        callback: Rc<dyn Fn()>,
    ) -> Result<ScheduledTask, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod);
        }
        let handle = self.timers.set_interval(period, callback)?;
        self.registry
            .borrow_mut()
            .by_window
            .entry(window_id.clone())
            .or_default()
            .push(handle);
        Ok(ScheduledTask {
            scheduler: self.clone(),
            window_id: window_id.clone(),
            handle,
            active: Rc::new(Cell::new(true)),
        })
    }

    /// Cancels every task owned by `window_id`, returning how many were stopped.
    pub fn cancel_window(&self, window_id: &WindowId) -> usize {
        let handles = self
            .registry
            .borrow_mut()
            .by_window
            .remove(window_id)
            .unwrap_or_default();
        for handle in &handles {
            self.timers.clear_interval(*handle);
        }
        handles.len()
    }

    /// Number of live tasks owned by `window_id`.
    pub fn active_tasks(&self, window_id: &WindowId) -> usize {
        self.registry
            .borrow()
            .by_window
            .get(window_id)
            .map_or(0, Vec::len)
    }

    fn release(&self, window_id: &WindowId, handle: TimerHandle) {
        let owned = self.registry.borrow_mut().forget(window_id, handle);
        if owned {
            self.timers.clear_interval(handle);
        }
    }
}

#[derive(Clone)]
/// Window-bound view of a [`WindowTaskScheduler`].
pub struct WindowTasks {
    scheduler: WindowTaskScheduler,
    window_id: WindowId,
}

impl WindowTasks {
    /// Window that owns tasks scheduled through this handle.
    pub fn window_id(&self) -> &WindowId {
        &self.window_id
    }

    /// Starts a repeating task for this window.
    ///
    /// # Errors
    ///
    /// See [`WindowTaskScheduler::schedule_repeating`].
    pub fn repeat(
        &self,
        period: Duration,
        callback: impl Fn() + 'static,
    ) -> Result<ScheduledTask, SchedulerError> {
        self.scheduler
            .schedule_repeating(&self.window_id, period, Rc::new(callback))
    }

    /// Number of live tasks for this window.
    pub fn active(&self) -> usize {
        self.scheduler.active_tasks(&self.window_id)
    }
}

/// Live repeating task; stops on [`ScheduledTask::stop`] or on drop.
pub struct ScheduledTask {
    scheduler: WindowTaskScheduler,
    window_id: WindowId,
    handle: TimerHandle,
    active: Rc<Cell<bool>>,
}

impl ScheduledTask {
    /// Stops the task if it is still running.
    pub fn stop(&self) {
        if self.active.replace(false) {
            self.scheduler.release(&self.window_id, self.handle);
        }
    }

    /// Whether the task has not been stopped through this handle.
    ///
    /// A window-wide cancel clears the host timer without flipping this flag.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{ManualTimerService, NoopTimerService};
    use pretty_assertions::assert_eq;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, Rc<dyn Fn()>) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Rc::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn cancel_window_stops_only_that_windows_tasks() {
        let timers = ManualTimerService::default();
        let scheduler = WindowTaskScheduler::new(Rc::new(timers.clone()));
        let left = WindowId::new("terminal");
        let right = WindowId::new("terminal-2");

        let (left_hits, left_cb) = counter();
        let (right_hits, right_cb) = counter();
        let _left_task = scheduler
            .schedule_repeating(&left, Duration::from_millis(30), left_cb)
            .expect("schedule left");
        let _right_task = scheduler
            .schedule_repeating(&right, Duration::from_millis(30), right_cb)
            .expect("schedule right");

        timers.advance(Duration::from_millis(30));
        assert_eq!(scheduler.cancel_window(&left), 1);
        timers.advance(Duration::from_millis(90));

        assert_eq!(left_hits.get(), 1);
        assert_eq!(right_hits.get(), 4);
        assert_eq!(scheduler.active_tasks(&left), 0);
        assert_eq!(scheduler.active_tasks(&right), 1);
    }

    #[test]
    fn dropping_a_task_clears_its_timer() {
        let timers = ManualTimerService::default();
        let scheduler = WindowTaskScheduler::new(Rc::new(timers.clone()));
        let tasks = scheduler.for_window(WindowId::new("terminal"));

        let task = tasks.repeat(Duration::from_secs(1), || {}).expect("schedule");
        assert_eq!(tasks.active(), 1);
        assert_eq!(timers.active_count(), 1);

        drop(task);
        assert_eq!(tasks.active(), 0);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn stop_after_window_cancel_is_harmless() {
        let timers = ManualTimerService::default();
        let scheduler = WindowTaskScheduler::new(Rc::new(timers.clone()));
        let window = WindowId::new("terminal");
        let task = scheduler
            .schedule_repeating(&window, Duration::from_secs(1), Rc::new(|| {}))
            .expect("schedule");

        scheduler.cancel_window(&window);
        task.stop();
        assert!(!task.is_active());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn rejects_zero_period_and_unavailable_timers() {
        let manual = WindowTaskScheduler::new(Rc::new(ManualTimerService::default()));
        let window = WindowId::new("terminal");
        assert_eq!(
            manual
                .schedule_repeating(&window, Duration::ZERO, Rc::new(|| {}))
                .err(),
            Some(SchedulerError::ZeroPeriod)
        );

        let noop = WindowTaskScheduler::new(Rc::new(NoopTimerService));
        assert_eq!(
            noop.schedule_repeating(&window, Duration::from_secs(1), Rc::new(|| {}))
                .err(),
            Some(SchedulerError::Timer(TimerError::Unavailable))
        );
        assert_eq!(noop.active_tasks(&window), 0);
    }
}
