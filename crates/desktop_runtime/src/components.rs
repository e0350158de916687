//! Desktop shell UI composition and interaction surfaces.

mod top_panel;
mod window;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use self::{top_panel::TopPanel, window::DesktopWindow};
use crate::{
    apps::{self, AppDescriptor},
    model::PointerPosition,
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Left mouse button, or the primary touch/pen contact.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
    if let Some(drag) = interaction.icon_drag {
        runtime.dispatch_action(DesktopAction::DropIcon {
            icon_id: drag.icon_id().to_string(),
            position: drag.live,
        });
    }
}

/// Opens (or focuses) the window for `app`.
pub(crate) fn open_app(runtime: DesktopRuntimeContext, app: &AppDescriptor) {
    let request = runtime.state.with_untracked(|state| app.open_request(state));
    runtime.dispatch_action(DesktopAction::OpenWindow(request));
}

/// Percent-encodes the characters that could end a quoted CSS `url()` token.
fn css_url_escape(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '\'' | '"' | '\\' | '(' | ')' => escaped.push_str(&format!("%{:02X}", ch as u32)),
            ch if ch.is_control() => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("%{byte:02X}"));
                }
            }
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn backdrop_style(background_url: Option<&str>) -> String {
    match background_url {
        Some(url) => format!(
            "background-image:url('{}');background-size:cover;background-position:center;",
            css_url_escape(url)
        ),
        None => String::new(),
    }
}

#[component]
/// Renders the full desktop shell: top panel, icon layer and window layer.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
        if interaction.icon_drag.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateIconDrag { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    let icons = move || {
        state.with(|state| {
            apps::desktop_icon_apps()
                .map(|app| (app, state.icons.remount_epoch(app.window_key)))
                .collect::<Vec<_>>()
        })
    };
    let window_ids = move || {
        state.with(|state| {
            state
                .windows
                .iter()
                .map(|w| w.id.clone())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-theme=move || state.with(|state| state.theme.as_str())
            style=move || state.with(|state| backdrop_style(state.background_url.as_deref()))
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <TopPanel />
            <div class="desktop-surface">
                <div class="desktop-icon-layer">
                    <For
                        each=icons
                        key=|(app, epoch)| (app.window_key, *epoch)
                        children=|(app, _)| view! { <DesktopIcon app=app /> }
                    />
                </div>
                <div class="desktop-window-layer">
                    <For
                        each=window_ids
                        key=|id| id.clone()
                        children=|id| view! { <DesktopWindow window_id=id /> }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn DesktopIcon(app: &'static AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let icon_id = app.window_key;
    let position = Signal::derive(move || {
        let dragged = runtime.interaction.with(|interaction| {
            interaction
                .icon_drag
                .as_ref()
                .filter(|drag| drag.icon_id() == icon_id)
                .map(|drag| drag.live)
        });
        dragged.unwrap_or_else(|| {
            runtime
                .state
                .with(|state| state.icons.position_or_origin(icon_id))
        })
    });

    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginIconDrag {
            icon_id: icon_id.to_string(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let open = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        open_app(runtime, app);
    };

    view! {
        <div
            class="desktop-icon"
            class:is-dragging=move || {
                runtime
                    .interaction
                    .with(|i| i.icon_drag.as_ref().is_some_and(|drag| drag.icon_id() == icon_id))
            }
            style=move || {
                let pos = position.get();
                format!("left:{}px;top:{}px;", pos.x, pos.y)
            }
            role="button"
            aria-label=app.desktop_icon_label.unwrap_or(app.title)
            on:pointerdown=begin_drag
            on:dblclick=open
        >
            <span class="desktop-icon-glyph" aria-hidden="true">{app.glyph}</span>
            <span class="desktop-icon-label">{app.desktop_icon_label.unwrap_or(app.title)}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn backdrop_uses_custom_image_when_set() {
        assert_eq!(backdrop_style(None), "");
        assert_eq!(
            backdrop_style(Some("https://example.com/it's.png")),
            "background-image:url('https://example.com/it%27s.png');background-size:cover;background-position:center;"
        );
    }

    #[test]
    fn url_escape_keeps_quotes_and_breaks_inside_the_token() {
        assert_eq!(
            css_url_escape("a\\b\"c(d)\ne"),
            "a%5Cb%22c%28d%29%0Ae"
        );
        assert_eq!(
            css_url_escape("https://example.com/arch.jpg?w=1920&h=1080"),
            "https://example.com/arch.jpg?w=1920&h=1080"
        );
    }
}
