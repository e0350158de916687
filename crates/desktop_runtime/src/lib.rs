//! Window manager, desktop icon layer and shell UI for the portfolio desktop.

pub mod apps;
pub mod components;
pub mod desktop_icons;
mod effect_executor;
mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod surface;
mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use model::*;
pub use persistence::{load_background, load_icons, load_theme};
pub use reducer::{app_command_action, reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
