use super::*;
use crate::model::{ResizeEdge, WindowId};

fn window_style(x: i32, y: i32, w: i32, h: i32, z_index: u32) -> String {
    format!("left:{x}px;top:{y}px;width:{w}px;height:{h}px;z-index:{z_index};")
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let focused = {
        let id = window_id.clone();
        Signal::derive(move || state.with(|s| s.is_focused(&id)))
    };
    let hidden = {
        let id = window_id.clone();
        move || {
            state.with(|s| {
                s.window(&id)
                    .is_some_and(|w| w.workspace != s.active_workspace)
            })
        }
    };
    let style = {
        let id = window_id.clone();
        move || {
            state.with(|s| {
                s.window(&id)
                    .map(|w| {
                        let z = s.z_index(&id).unwrap_or(0);
                        window_style(w.rect.x, w.rect.y, w.rect.w, w.rect.h, z)
                    })
                    .unwrap_or_default()
            })
        }
    };
    let title = {
        let id = window_id.clone();
        move || state.with(|s| s.window(&id).map(|w| w.title.clone()).unwrap_or_default())
    };

    let focus = {
        let id = window_id.clone();
        move |_: web_sys::PointerEvent| {
            if !focused.get_untracked() {
                runtime.dispatch_action(DesktopAction::FocusWindow {
                    window_id: id.clone(),
                });
            }
        }
    };
    let begin_move = {
        let id = window_id.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_press(&ev) {
                return;
            }
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let close = {
        let id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::CloseWindow {
                window_id: id.clone(),
            });
        }
    };

    let handles = ResizeEdge::ALL
        .into_iter()
        .map(|edge| view! { <WindowResizeHandle window_id=window_id.clone() edge=edge /> })
        .collect_view();

    view! {
        <section
            class="desktop-window"
            class:focused=move || focused.get()
            class:is-unfocused=move || !focused.get()
            class:is-hidden=hidden
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title.clone()
        >
            <header class="titlebar" on:pointerdown=begin_move>
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=close
                    >
                        "x"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
                <Show when=move || !focused.get() fallback=|| ()>
                    <div class="window-focus-shield" aria-hidden="true" />
                </Show>
            </div>
            {handles}
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", edge.css_class());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: window_id.clone(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

/// Paints the window's content once; later state changes only touch the chrome.
#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let content = runtime
        .state
        .with_untracked(|state| state.window(&window_id).map(|w| w.content.clone()));

    let contents = match content {
        Some(content) => match apps::renderable_for(&content) {
            Some(renderable) => renderable.paint(runtime.paint_region(window_id, content)),
            None => apps::render_missing_content(&content),
        },
        None => view! { <p>"Closed"</p> }.into_view(),
    };

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_style_positions_and_stacks() {
        assert_eq!(
            window_style(100, 60, 600, 400, 3),
            "left:100px;top:60px;width:600px;height:400px;z-index:3;"
        );
    }
}
