//! Content registry: maps a window's [`ContentHandle`] to the [`Renderable`] that paints it.

mod portfolio;
mod tweaks;

use desktop_app_contract::{AppModule, ApplicationId, ContentHandle, Renderable, WindowId};
use desktop_app_calculator::CALCULATOR_MODULE;
use desktop_app_terminal::TERMINAL_MODULE;
use leptos::*;

use crate::model::{DesktopState, OpenWindowRequest};

pub const TERMINAL_APP_ID: &str = "system.terminal";
pub const ABOUT_APP_ID: &str = "portfolio.about";
pub const FILES_APP_ID: &str = "system.files";
pub const TEXT_READER_APP_ID: &str = "system.text-reader";
pub const TWEAKS_APP_ID: &str = "system.tweaks";
pub const CALCULATOR_APP_ID: &str = "system.calculator";

#[derive(Debug, Clone, Copy)]
pub struct AppDescriptor {
    pub app_id: &'static str,
    /// Window id for single-instance apps, id prefix otherwise. Doubles as the desktop icon id.
    pub window_key: &'static str,
    pub title: &'static str,
    pub desktop_icon_label: Option<&'static str>,
    pub glyph: &'static str,
    pub single_instance: bool,
    pub default_size: Option<(i32, i32)>,
    pub module: AppModule,
}

impl AppDescriptor {
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::trusted(self.app_id)
    }

    /// Request that opens this app: a fresh window for multi-instance apps, the fixed one
    /// otherwise.
    pub fn open_request(&self, state: &DesktopState) -> OpenWindowRequest {
        let window_id = if self.single_instance {
            WindowId::new(self.window_key)
        } else {
            state.unused_window_id(self.window_key)
        };
        let request = OpenWindowRequest::new(
            window_id,
            self.title,
            ContentHandle::new(self.application_id()),
        );
        match self.default_size {
            Some((w, h)) => request.with_size(w, h),
            None => request,
        }
    }
}

const APP_REGISTRY: [AppDescriptor; 6] = [
    AppDescriptor {
        app_id: TERMINAL_APP_ID,
        window_key: "terminal",
        title: "kem@arch: ~",
        desktop_icon_label: Some("Terminal"),
        glyph: ">_",
        single_instance: false,
        default_size: None,
        module: TERMINAL_MODULE,
    },
    AppDescriptor {
        app_id: ABOUT_APP_ID,
        window_key: "about",
        title: "About Me",
        desktop_icon_label: Some("About Me"),
        glyph: "@",
        single_instance: true,
        default_size: Some((420, 260)),
        module: portfolio::ABOUT_MODULE,
    },
    AppDescriptor {
        app_id: FILES_APP_ID,
        window_key: "files",
        title: "Files",
        desktop_icon_label: Some("Files"),
        glyph: "[]",
        single_instance: true,
        default_size: None,
        module: portfolio::FILES_MODULE,
    },
    AppDescriptor {
        app_id: TEXT_READER_APP_ID,
        window_key: "file",
        title: "Reader",
        desktop_icon_label: None,
        glyph: "txt",
        single_instance: false,
        default_size: None,
        module: portfolio::TEXT_READER_MODULE,
    },
    AppDescriptor {
        app_id: TWEAKS_APP_ID,
        window_key: "tweaks",
        title: "Tweaks",
        desktop_icon_label: None,
        glyph: "*",
        single_instance: true,
        default_size: Some((420, 320)),
        module: tweaks::TWEAKS_MODULE,
    },
    AppDescriptor {
        app_id: CALCULATOR_APP_ID,
        window_key: "calculator",
        title: "Calculator",
        desktop_icon_label: None,
        glyph: "=",
        single_instance: true,
        default_size: Some((320, 420)),
        module: CALCULATOR_MODULE,
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn app_descriptor(app_id: &str) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| entry.app_id == app_id)
}

pub fn desktop_icon_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.desktop_icon_label.is_some())
}

/// Resolves the content provider for a window, if one is registered.
pub fn renderable_for(content: &ContentHandle) -> Option<&'static dyn Renderable> {
    app_descriptor(content.app_id.as_str()).map(|entry| &entry.module as &dyn Renderable)
}

/// Body shown when a window's content id has no registered provider.
pub fn render_missing_content(content: &ContentHandle) -> View {
    let app_id = content.app_id.to_string();
    logging::warn!("no content provider registered for `{app_id}`");
    view! {
        <div class="app app-missing">
            <p>"Nothing to show here."</p>
            <p class="app-missing-id">{app_id}</p>
        </div>
    }
    .into_view()
}
