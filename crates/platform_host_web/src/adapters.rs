use std::rc::Rc;

use platform_host::{
    HostServices, HostStrategy, NoopPrefsStore, NoopTimerService, PrefsStore, TimerService,
};

use crate::{WebPrefsStore, WebTimerService};

/// Returns the host strategy for the active compilation target.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(target_arch = "wasm32")]
    {
        HostStrategy::Browser
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostStrategy::Headless
    }
}

/// Builds the preference store for the selected strategy.
pub fn prefs_store() -> Rc<dyn PrefsStore> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebPrefsStore),
        HostStrategy::Headless => Rc::new(NoopPrefsStore),
    }
}

/// Builds the timer service for the selected strategy.
pub fn timer_service() -> Rc<dyn TimerService> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebTimerService::default()),
        HostStrategy::Headless => Rc::new(NoopTimerService),
    }
}

/// Builds the full host bundle injected into `desktop_runtime`.
pub fn build_host_services() -> HostServices {
    HostServices::new(prefs_store(), timer_service(), selected_host_strategy())
}
