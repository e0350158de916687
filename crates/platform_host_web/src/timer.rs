//! `setInterval`-backed [`TimerService`].

use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use platform_host::{TimerError, TimerHandle, TimerService};

#[derive(Default)]
struct IntervalTable {
    next_handle: u64,
    browser_ids: HashMap<TimerHandle, i32>,
}

#[derive(Clone, Default)]
/// Browser timer service backed by `window.setInterval`.
///
/// Callback closures are handed to the JS garbage collector, so clearing a timer from inside its
/// own callback is safe.
pub struct WebTimerService {
    table: Rc<RefCell<IntervalTable>>,
}

impl WebTimerService {
    /// Number of intervals this service still has registered with the browser.
    pub fn active_count(&self) -> usize {
        self.table.borrow().browser_ids.len()
    }
}

#[cfg(target_arch = "wasm32")]
fn register_browser_interval(period: Duration, callback: Rc<dyn Fn()>) -> Result<i32, TimerError> {
    use wasm_bindgen::{closure::Closure, JsCast};

    let window = web_sys::window().ok_or(TimerError::Unavailable)?;
    let function = Closure::<dyn FnMut()>::new(move || callback()).into_js_value();
    let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX).max(1);
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            function.unchecked_ref::<js_sys::Function>(),
            millis,
        )
        .map_err(|e| TimerError::Host(format!("{e:?}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn register_browser_interval(
    _period: Duration,
    _callback: Rc<dyn Fn()>,
) -> Result<i32, TimerError> {
    Err(TimerError::Unavailable)
}

fn clear_browser_interval(browser_id: i32) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(browser_id);
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = browser_id;
}

impl TimerService for WebTimerService {
    fn set_interval(
        &self,
        period: Duration,
        callback: Rc<dyn Fn()>,
    ) -> Result<TimerHandle, TimerError> {
        let browser_id = register_browser_interval(period, callback)?;
        let mut table = self.table.borrow_mut();
        table.next_handle = table.next_handle.saturating_add(1);
        let handle = TimerHandle(table.next_handle);
        table.browser_ids.insert(handle, browser_id);
        Ok(handle)
    }

    fn clear_interval(&self, handle: TimerHandle) {
        let removed = self.table.borrow_mut().browser_ids.remove(&handle);
        if let Some(browser_id) = removed {
            clear_browser_interval(browser_id);
        }
    }
}
