//! Shared contract types between the desktop window manager and the content it hosts.
//!
//! The window manager stores a [`ContentHandle`] per window and never looks inside it. At render
//! time the runtime resolves the handle to a [`Renderable`] and hands it a [`PaintRegion`]: the
//! window id, a focus signal, window-scoped task scheduling and an [`AppHost`] for talking back.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod scheduler;

use leptos::{Callable, Callback, Signal, View};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use scheduler::{ScheduledTask, SchedulerError, WindowTaskScheduler, WindowTasks};

/// Stable identifier for a managed window, unique for the window's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// Creates a window id.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// DOM id of the element that should receive keyboard focus when `window_id` gains focus.
///
/// Content that owns a text input renders it with this id; the runtime focuses it best-effort.
pub fn window_primary_input_dom_id(window_id: &WindowId) -> String {
    format!("window-primary-input-{}", window_id.as_str())
}

/// Stable identifier for a content provider (`namespace.name`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Creates an id without validation for trusted compile-time constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut segments = 0usize;
    for part in raw.split('.') {
        segments += 1;
        let Some(first) = part.bytes().next() else {
            return false;
        };
        if part.len() > 32 || !first.is_ascii_lowercase() || part.ends_with('-') {
            return false;
        }
        if !part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return false;
        }
    }

    segments >= 2
}

/// Opaque description of what a window shows: a provider id plus JSON launch parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentHandle {
    /// Provider that knows how to paint this content.
    pub app_id: ApplicationId,
    /// Provider-specific launch parameters.
    #[serde(default)]
    pub params: Value,
}

impl ContentHandle {
    /// Creates a handle with no parameters.
    pub fn new(app_id: ApplicationId) -> Self {
        Self {
            app_id,
            params: Value::Null,
        }
    }

    /// Attaches launch parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Reads a string launch parameter.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Requests hosted content sends back to the desktop runtime.
pub enum AppCommand {
    /// Close the window that sent the command.
    CloseWindow,
    /// Reset the desktop (close every window, back to workspace 1).
    RebootDesktop,
    /// Replace the sending window's title.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
    /// Open (or focus, when the id already exists) another window.
    OpenWindow {
        /// Id for the new window.
        window_id: WindowId,
        /// Title bar text.
        title: String,
        /// Content to paint.
        content: ContentHandle,
    },
    /// Switch the desktop theme preset.
    SetTheme {
        /// Stable theme id (for example `mocha`).
        theme_id: String,
    },
    /// Set or clear the custom desktop background image.
    SetBackgroundUrl {
        /// Image URL, or `None` to fall back to the theme background.
        url: Option<String>,
    },
}

#[derive(Clone, Copy)]
/// Window-scoped command channel back to the desktop runtime.
pub struct AppHost {
    sender: Callback<AppCommand>,
}

impl AppHost {
    /// Wraps a runtime-provided command callback.
    pub fn new(sender: Callback<AppCommand>) -> Self {
        Self { sender }
    }

    /// Sends a raw command.
    pub fn send(&self, command: AppCommand) {
        self.sender.call(command);
    }

    /// Closes the current window.
    pub fn close_window(&self) {
        self.send(AppCommand::CloseWindow);
    }

    /// Reboots the desktop.
    pub fn reboot_desktop(&self) {
        self.send(AppCommand::RebootDesktop);
    }

    /// Requests a title change for the current window.
    pub fn set_title(&self, title: impl Into<String>) {
        self.send(AppCommand::SetWindowTitle {
            title: title.into(),
        });
    }

    /// Opens or focuses another window.
    pub fn open_window(
        &self,
        window_id: WindowId,
        title: impl Into<String>,
        content: ContentHandle,
    ) {
        self.send(AppCommand::OpenWindow {
            window_id,
            title: title.into(),
            content,
        });
    }
}

#[derive(Clone)]
/// Everything a [`Renderable`] receives when it is painted into a window body.
pub struct PaintRegion {
    /// Window being painted.
    pub window_id: WindowId,
    /// Content handle stored on the window record.
    pub content: ContentHandle,
    /// Whether the window currently holds focus.
    pub focused: Signal<bool>,
    /// Timer scheduling bound to this window's lifetime.
    pub tasks: WindowTasks,
    /// Command channel back to the runtime.
    pub host: AppHost,
}

/// Content that can paint itself into a window region.
pub trait Renderable {
    /// Builds the view for one window.
    fn paint(&self, region: PaintRegion) -> View;
}

/// Static paint function used by the runtime content registry.
pub type PaintFn = fn(PaintRegion) -> View;

#[derive(Debug, Clone, Copy)]
/// Function-pointer [`Renderable`] for stateless content providers.
pub struct AppModule {
    paint_fn: PaintFn,
}

impl AppModule {
    /// Creates a module from a paint function.
    pub const fn new(paint_fn: PaintFn) -> Self {
        Self { paint_fn }
    }
}

impl Renderable for AppModule {
    fn paint(&self, region: PaintRegion) -> View {
        (self.paint_fn)(region)
    }
}
