use leptos::{logging, spawn_local, SignalWithUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_icons(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let layout = runtime.state.with_untracked(|state| state.icons.clone());
    spawn_local(async move {
        if let Err(err) = persistence::persist_icons(host.prefs_store().as_ref(), &layout).await {
            logging::warn!("persist icon layout failed: {err}");
        }
    });
}

pub(super) fn persist_theme(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let theme = runtime.state.with_untracked(|state| state.theme);
    spawn_local(async move {
        if let Err(err) = persistence::persist_theme(host.prefs_store().as_ref(), theme).await {
            logging::warn!("persist theme failed: {err}");
        }
    });
}

pub(super) fn persist_background(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let url = runtime
        .state
        .with_untracked(|state| state.background_url.clone());
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_background(prefs.as_ref(), url.as_deref()).await {
            logging::warn!("persist background failed: {err}");
        }
    });
}
