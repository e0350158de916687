use std::time::Duration;

use platform_host::LocalClockTime;

use super::*;
use crate::{
    apps::{CALCULATOR_APP_ID, TERMINAL_APP_ID, TWEAKS_APP_ID},
    model::{WindowId, WorkspaceId},
};

/// Scheduler owner for the panel clock; never collides with a window id.
const PANEL_TASK_OWNER: &str = "top-panel";

fn workspace_label(workspace: WorkspaceId) -> String {
    format!("~ / workspace_{}", workspace.get())
}

/// 12-hour `HH:MM AM|PM`.
fn panel_clock_text(time: LocalClockTime) -> String {
    let suffix = if time.hour < 12 { "AM" } else { "PM" };
    let hour = match time.hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour:02}:{:02} {suffix}", time.minute)
}

#[component]
pub(super) fn TopPanel() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock = create_rw_signal(panel_clock_text(LocalClockTime::now()));

    let tasks = runtime
        .host
        .with_value(|host| host.window_tasks(WindowId::new(PANEL_TASK_OWNER)));
    match tasks.repeat(Duration::from_secs(1), move || {
        clock.try_set(panel_clock_text(LocalClockTime::now()));
    }) {
        Ok(task) => on_cleanup(move || task.stop()),
        Err(err) => logging::warn!("panel clock unavailable: {err}"),
    }

    let launch = |app_id: &'static str| {
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            if let Some(app) = apps::app_descriptor(app_id) {
                open_app(runtime, app);
            }
        }
    };

    let dots = WorkspaceId::all()
        .map(|workspace| {
            view! {
                <button
                    type="button"
                    class="workspace-dot"
                    class:is-active=move || state.with(|s| s.active_workspace == workspace)
                    aria-label=format!("Workspace {}", workspace.get())
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::SwitchWorkspace { workspace })
                    }
                />
            }
        })
        .collect_view();

    view! {
        <header class="top-panel" role="toolbar">
            <div class="top-panel-start">
                <button
                    type="button"
                    class="top-panel-launcher"
                    aria-label="Open terminal"
                    on:click=launch(TERMINAL_APP_ID)
                >
                    ">_"
                </button>
                <button
                    type="button"
                    class="top-panel-launcher"
                    aria-label="Open calculator"
                    on:click=launch(CALCULATOR_APP_ID)
                >
                    "="
                </button>
                <span class="top-panel-path">
                    {move || state.with(|s| workspace_label(s.active_workspace))}
                </span>
            </div>
            <nav class="top-panel-workspaces" aria-label="Workspaces">
                {dots}
            </nav>
            <div class="top-panel-end">
                <button
                    type="button"
                    class="top-panel-tweaks"
                    aria-label="Open tweaks"
                    on:click=launch(TWEAKS_APP_ID)
                >
                    "*"
                </button>
                <time class="top-panel-clock">{move || clock.get()}</time>
            </div>
        </header>
    }
}
