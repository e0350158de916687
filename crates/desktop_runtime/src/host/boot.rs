use futures::future::join3;
use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let prefs = host.prefs_store();
            let (icons, theme, background) = join3(
                persistence::load_icons(prefs.as_ref()),
                persistence::load_theme(prefs.as_ref()),
                persistence::load_background(prefs.as_ref()),
            )
            .await;

            if let Some(positions) = icons {
                dispatch.call(DesktopAction::HydrateIcons { positions });
            }
            if let Some(theme) = theme {
                dispatch.call(DesktopAction::HydrateTheme { theme });
            }
            if let Some(url) = background {
                dispatch.call(DesktopAction::HydrateBackground { url });
            }
        });
    });
}
