//! Theme picker and custom background form.

use desktop_app_contract::{AppCommand, AppModule, PaintRegion};
use leptos::*;

use crate::{model::ThemeId, runtime_context::use_desktop_runtime};

pub(super) const TWEAKS_MODULE: AppModule = AppModule::new(paint_tweaks);

fn paint_tweaks(region: PaintRegion) -> View {
    view! { <TweaksApp region=region /> }.into_view()
}

#[component]
fn TweaksApp(region: PaintRegion) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let host = region.host;
    let current_theme = Signal::derive(move || runtime.state.with(|state| state.theme));
    let draft_url = create_rw_signal(
        runtime
            .state
            .with_untracked(|state| state.background_url.clone())
            .unwrap_or_default(),
    );

    let apply_background = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        host.send(AppCommand::SetBackgroundUrl {
            url: Some(draft_url.get_untracked()),
        });
    };
    let clear_background = move |_: ev::MouseEvent| {
        draft_url.set(String::new());
        host.send(AppCommand::SetBackgroundUrl { url: None });
    };

    view! {
        <div class="app app-tweaks">
            <fieldset class="tweaks-themes">
                <legend>"Theme"</legend>
                {ThemeId::ALL
                    .into_iter()
                    .map(|theme| {
                        view! {
                            <button
                                type="button"
                                class=format!("tweaks-theme theme-swatch-{}", theme.as_str())
                                class:is-active=move || current_theme.get() == theme
                                on:click=move |_| host.send(AppCommand::SetTheme {
                                    theme_id: theme.as_str().to_string(),
                                })
                            >
                                {theme.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <form class="tweaks-background" on:submit=apply_background>
                <label for="tweaks-background-url">"Background image URL"</label>
                <input
                    id="tweaks-background-url"
                    type="url"
                    placeholder="https://"
                    prop:value=move || draft_url.get()
                    on:input=move |ev| draft_url.set(event_target_value(&ev))
                />
                <button type="submit">"Apply"</button>
                <button type="button" on:click=clear_background>"Use theme default"</button>
            </form>
        </div>
    }
}
