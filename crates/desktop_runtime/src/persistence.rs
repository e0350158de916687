//! Desktop preference persistence: icon layout, theme and custom background.
//!
//! Loads are lenient: a missing key yields `None`, a corrupt one is logged and also yields
//! `None` so boot falls back to defaults.

use std::collections::BTreeMap;

use leptos::logging;
use platform_host::{load_pref_lenient, save_pref_with, PrefLoad, PrefsStore};
use serde::de::DeserializeOwned;

use crate::{
    desktop_icons::{IconLayout, IconPosition},
    model::ThemeId,
};

pub const ICONS_KEY: &str = "archdesk.icons.v1";
pub const THEME_KEY: &str = "archdesk.theme.v1";
pub const BACKGROUND_KEY: &str = "archdesk.background.v1";

async fn load_lenient<T: DeserializeOwned>(prefs: &dyn PrefsStore, key: &str) -> Option<T> {
    match load_pref_lenient(prefs, key).await {
        PrefLoad::Loaded(value) => Some(value),
        PrefLoad::Missing => None,
        PrefLoad::Corrupt(err) => {
            logging::warn!("ignoring unreadable preference `{key}`: {err}");
            None
        }
    }
}

pub async fn load_icons(prefs: &dyn PrefsStore) -> Option<BTreeMap<String, IconPosition>> {
    load_lenient(prefs, ICONS_KEY).await
}

pub async fn persist_icons(prefs: &dyn PrefsStore, layout: &IconLayout) -> Result<(), String> {
    save_pref_with(prefs, ICONS_KEY, layout.positions()).await
}

pub async fn load_theme(prefs: &dyn PrefsStore) -> Option<ThemeId> {
    load_lenient(prefs, THEME_KEY).await
}

pub async fn persist_theme(prefs: &dyn PrefsStore, theme: ThemeId) -> Result<(), String> {
    save_pref_with(prefs, THEME_KEY, &theme).await
}

/// Stored background URL. `Some(None)` means the user explicitly cleared it.
pub async fn load_background(prefs: &dyn PrefsStore) -> Option<Option<String>> {
    load_lenient(prefs, BACKGROUND_KEY).await
}

pub async fn persist_background(
    prefs: &dyn PrefsStore,
    url: Option<&str>,
) -> Result<(), String> {
    save_pref_with(prefs, BACKGROUND_KEY, &url).await
}
