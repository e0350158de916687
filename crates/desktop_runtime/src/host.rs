//! Host-side runtime helpers for executing reducer effects.
//!
//! The reducer only describes side effects; this module carries them out against the injected
//! [`HostServices`] (preference storage, timers) and the browser DOM.

mod boot;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use desktop_app_contract::{WindowTaskScheduler, WindowTasks};
use leptos::Callback;
use platform_host::{HostServices, PrefsStore};

use crate::{
    model::WindowId,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
    scheduler: WindowTaskScheduler,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(HostServices::headless())
    }
}

impl DesktopHostContext {
    pub fn new(services: HostServices) -> Self {
        let scheduler = WindowTaskScheduler::new(services.timers.clone());
        Self {
            services,
            scheduler,
        }
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Task scheduling bound to one window's lifetime.
    pub fn window_tasks(&self, window_id: WindowId) -> WindowTasks {
        self.scheduler.for_window(window_id)
    }

    /// Stops every task `window_id` registered, returning how many were running.
    pub fn cancel_window_tasks(&self, window_id: &WindowId) -> usize {
        self.scheduler.cancel_window(window_id)
    }

    /// Loads persisted preferences once the provider has mounted.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowInput(window_id) => host_ui::focus_window_input(&window_id),
            RuntimeEffect::CancelWindowTasks(window_id) => {
                self.cancel_window_tasks(&window_id);
            }
            RuntimeEffect::PersistIcons => {
                persistence_effects::persist_icons(self.clone(), runtime)
            }
            RuntimeEffect::PersistTheme => {
                persistence_effects::persist_theme(self.clone(), runtime)
            }
            RuntimeEffect::PersistBackground => {
                persistence_effects::persist_background(self.clone(), runtime)
            }
        }
    }
}
