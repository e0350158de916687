//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{NoopPrefsStore, NoopTimerService, PrefsStore, TimerService};

/// Stable host strategy selected at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Headless composition with in-memory or no-op adapters (tests, non-wasm builds).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host services.
///
/// Environment-specific adapter selection happens before this bundle reaches `desktop_runtime`,
/// so the runtime and app crates never import browser APIs directly.
#[derive(Clone)]
pub struct HostServices {
    /// Lightweight typed preference store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Repeating-timer service shared by every window's scheduled tasks.
    pub timers: Rc<dyn TimerService>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle from explicit adapters.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        timers: Rc<dyn TimerService>,
        host_strategy: HostStrategy,
    ) -> Self {
        Self {
            prefs,
            timers,
            host_strategy,
        }
    }

    /// Bundle whose storage discards writes and whose timers never register.
    pub fn headless() -> Self {
        Self::new(
            Rc::new(NoopPrefsStore),
            Rc::new(NoopTimerService),
            HostStrategy::Headless,
        )
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::headless()
    }
}
