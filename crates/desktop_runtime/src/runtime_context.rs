//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue and host
//! bootstrap wiring. UI composition stays in [`crate::components`].

use desktop_app_contract::{AppCommand, AppHost, ContentHandle, PaintRegion};
use leptos::*;
use platform_host::HostServices;

use crate::{
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, WindowId},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Builds the paint region handed to the content of `window_id`.
    pub fn paint_region(&self, window_id: WindowId, content: ContentHandle) -> PaintRegion {
        let runtime = *self;
        let focus_id = window_id.clone();
        let command_id = window_id.clone();
        PaintRegion {
            tasks: self.host.with_value(|host| host.window_tasks(window_id.clone())),
            window_id,
            content,
            focused: Signal::derive(move || runtime.state.with(|state| state.is_focused(&focus_id))),
            host: AppHost::new(Callback::new(move |command: AppCommand| {
                runtime.dispatch_action(DesktopAction::HandleAppCommand {
                    window_id: command_id.clone(),
                    command,
                });
            })),
        }
    }
}

fn apply_action(
    state: RwSignal<DesktopState>,
    interaction: RwSignal<InteractionState>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    action: DesktopAction,
) {
    let mut desktop = state.get_untracked();
    let mut ui = interaction.get_untracked();

    match reduce_desktop(&mut desktop, &mut ui, action) {
        Ok(new_effects) => {
            if state.with_untracked(|previous| previous != &desktop) {
                state.set(desktop);
            }
            if interaction.with_untracked(|previous| previous != &ui) {
                interaction.set(ui);
            }
            if !new_effects.is_empty() {
                effects.update(|queue| queue.extend(new_effects));
            }
        }
        Err(err) => logging::warn!("desktop reducer error: {err}"),
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::new(host_services));
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        apply_action(state, interaction, effects, action);
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        dispatch,
    };
    provide_context(runtime);

    logging::log!(
        "desktop runtime starting with {} host",
        host.with_value(|host| host.host_strategy_name())
    );
    host.with_value(|host| host.install_boot_hydration(dispatch));
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
