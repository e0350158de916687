//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use std::collections::BTreeMap;

use desktop_app_contract::AppCommand;
use thiserror::Error;

use crate::{
    desktop_icons::{drop_icon, IconDrag, IconDrop, IconPosition},
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, PointerPosition,
        ResizeEdge, ThemeId, WindowId, WindowRect, WorkspaceId,
    },
    surface::resize_rect_clamped,
    window_manager::{
        close_window_internal, focus_window_internal, keep_on_desktop, move_window_internal,
        open_window_internal, set_window_rect_internal, switch_workspace_internal,
        trim_to_desktop, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window, or focus the existing one with the same id.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Place a window's top-left corner.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: PointerPosition,
    },
    /// Replace a window's geometry (clamped to the minimum size).
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// New geometry.
        rect: WindowRect,
    },
    /// Replace a window's title.
    SetWindowTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title.
        title: String,
    },
    /// Show another virtual desktop.
    SwitchWorkspace {
        /// Workspace to show.
        workspace: WorkspaceId,
    },
    /// Close every window and return to the first workspace.
    Reboot,
    /// Select a theme preset.
    SetTheme {
        /// Theme to apply.
        theme: ThemeId,
    },
    /// Set or clear the custom background image.
    SetBackgroundUrl {
        /// Image URL; blank or `None` clears it.
        url: Option<String>,
    },
    /// Restore icon positions loaded from storage.
    HydrateIcons {
        /// Stored icon positions.
        positions: BTreeMap<String, IconPosition>,
    },
    /// Restore the theme loaded from storage.
    HydrateTheme {
        /// Stored theme.
        theme: ThemeId,
    },
    /// Restore the background URL loaded from storage.
    HydrateBackground {
        /// Stored background URL.
        url: Option<String>,
    },
    /// Begin dragging a desktop icon.
    BeginIconDrag {
        /// Icon being dragged.
        icon_id: String,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress icon drag.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Release a desktop icon at `position`.
    DropIcon {
        /// Icon being dropped.
        icon_id: String,
        /// Unsnapped drop position.
        position: IconPosition,
    },
    /// Apply a command sent by a window's content.
    HandleAppCommand {
        /// Window whose content sent the command.
        window_id: WindowId,
        /// Command payload.
        command: AppCommand,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the window's primary input.
    FocusWindowInput(WindowId),
    /// Stop every scheduled task the window registered.
    CancelWindowTasks(WindowId),
    /// Persist the icon position table.
    PersistIcons,
    /// Persist the theme id.
    PersistTheme,
    /// Persist the custom background URL.
    PersistBackground,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for interaction states that should not be reachable.
pub enum ReducerError {
    /// A drag or resize is in progress for a window that no longer exists.
    #[error("interaction targets missing window `{window_id}`")]
    StaleInteraction {
        /// Window the interaction still points at.
        window_id: WindowId,
    },
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Operations naming an unknown window are silent no-ops.
///
/// # Errors
///
/// Returns [`ReducerError::StaleInteraction`] when a drag/resize update targets a window that
/// has already been removed.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(request) => {
            let window_id = request.window_id.clone();
            open_window_internal(state, request);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if close_window_internal(state, &window_id).is_some() {
                interaction.release_window(&window_id);
                effects.push(RuntimeEffect::CancelWindowTasks(window_id));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window_internal(state, &window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            if let Some(rect) = state.window(&window_id).map(|w| w.rect) {
                focus_for_pointer(state, &window_id, &mut effects);
                interaction.dragging = Some(DragSession::new(window_id, pointer, rect));
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let rect = keep_on_desktop(session.moved_origin(pointer));
                let window = state.window_mut(&session.target).ok_or_else(|| {
                    ReducerError::StaleInteraction {
                        window_id: session.target.clone(),
                    }
                })?;
                window.rect = rect;
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            if let Some(rect) = state.window(&window_id).map(|w| w.rect) {
                focus_for_pointer(state, &window_id, &mut effects);
                interaction.resizing = Some(DragSession::new((window_id, edge), pointer, rect));
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let (window_id, edge) = &session.target;
                let (dx, dy) = session.delta(pointer);
                let rect = resize_rect_clamped(
                    session.start,
                    *edge,
                    dx,
                    dy,
                    MIN_WINDOW_WIDTH,
                    MIN_WINDOW_HEIGHT,
                );
                let rect = trim_to_desktop(rect);
                let window =
                    state
                        .window_mut(window_id)
                        .ok_or_else(|| ReducerError::StaleInteraction {
                            window_id: window_id.clone(),
                        })?;
                window.rect = rect;
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            if move_window_internal(state, &window_id, position) {
                focus_for_pointer(state, &window_id, &mut effects);
            }
        }
        DesktopAction::ResizeWindow { window_id, rect } => {
            if set_window_rect_internal(state, &window_id, rect) {
                focus_for_pointer(state, &window_id, &mut effects);
            }
        }
        DesktopAction::SetWindowTitle { window_id, title } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.title = title;
            }
        }
        DesktopAction::SwitchWorkspace { workspace } => {
            switch_workspace_internal(state, workspace);
        }
        DesktopAction::Reboot => {
            for window in state.windows.drain(..) {
                effects.push(RuntimeEffect::CancelWindowTasks(window.id));
            }
            state.focused = None;
            state.active_workspace = WorkspaceId::FIRST;
            *interaction = InteractionState::default();
        }
        DesktopAction::SetTheme { theme } => {
            if state.theme != theme {
                state.theme = theme;
                effects.push(RuntimeEffect::PersistTheme);
            }
        }
        DesktopAction::SetBackgroundUrl { url } => {
            let url = normalize_background_url(url);
            if state.background_url != url {
                state.background_url = url;
                effects.push(RuntimeEffect::PersistBackground);
            }
        }
        DesktopAction::HydrateIcons { positions } => {
            state.icons.hydrate(positions);
        }
        DesktopAction::HydrateTheme { theme } => {
            state.theme = theme;
        }
        DesktopAction::HydrateBackground { url } => {
            state.background_url = normalize_background_url(url);
        }
        DesktopAction::BeginIconDrag { icon_id, pointer } => {
            let start = state.icons.position_or_origin(&icon_id);
            interaction.icon_drag = Some(IconDrag::begin(icon_id, pointer, start));
        }
        DesktopAction::UpdateIconDrag { pointer } => {
            if let Some(drag) = interaction.icon_drag.as_mut() {
                drag.update(pointer);
            }
        }
        DesktopAction::DropIcon { icon_id, position } => {
            if interaction
                .icon_drag
                .as_ref()
                .is_some_and(|drag| drag.icon_id() == icon_id)
            {
                interaction.icon_drag = None;
            }
            if let IconDrop::Moved(_) = drop_icon(&mut state.icons, &icon_id, position) {
                effects.push(RuntimeEffect::PersistIcons);
            }
        }
        DesktopAction::HandleAppCommand { window_id, command } => {
            if let Some(action) = app_command_action(window_id, command) {
                return reduce_desktop(state, interaction, action);
            }
        }
    }

    Ok(effects)
}

fn focus_for_pointer(state: &mut DesktopState, window_id: &WindowId, effects: &mut Vec<RuntimeEffect>) {
    if !state.is_focused(window_id) && focus_window_internal(state, window_id) {
        effects.push(RuntimeEffect::FocusWindowInput(window_id.clone()));
    }
}

/// Trimmed URL; blank values and values carrying control characters clear the background.
fn normalize_background_url(url: Option<String>) -> Option<String> {
    url.map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty() && !raw.chars().any(char::is_control))
}

/// Maps a content-originated command onto the equivalent reducer action.
pub fn app_command_action(window_id: WindowId, command: AppCommand) -> Option<DesktopAction> {
    let action = match command {
        AppCommand::CloseWindow => DesktopAction::CloseWindow { window_id },
        AppCommand::RebootDesktop => DesktopAction::Reboot,
        AppCommand::SetWindowTitle { title } => DesktopAction::SetWindowTitle { window_id, title },
        AppCommand::OpenWindow {
            window_id,
            title,
            content,
        } => DesktopAction::OpenWindow(OpenWindowRequest::new(window_id, title, content)),
        AppCommand::SetTheme { theme_id } => DesktopAction::SetTheme {
            theme: ThemeId::parse(&theme_id)?,
        },
        AppCommand::SetBackgroundUrl { url } => DesktopAction::SetBackgroundUrl { url },
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ApplicationId, ContentHandle};
    use pretty_assertions::assert_eq;

    use super::*;

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, id: &str) -> Vec<RuntimeEffect> {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(
                WindowId::new(id),
                id,
                ContentHandle::new(ApplicationId::trusted("system.terminal")),
            )),
        )
        .expect("open window")
    }

    fn id(raw: &str) -> WindowId {
        WindowId::new(raw)
    }

    #[test]
    fn open_focuses_and_requests_input_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = open(&mut state, &mut interaction, "terminal");

        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.focused, Some(id("terminal")));
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(id("terminal"))]);
    }

    #[test]
    fn duplicate_open_focuses_existing_and_activates_its_workspace() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");
        open(&mut state, &mut interaction, "files");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SwitchWorkspace {
                workspace: WorkspaceId::new(3),
            },
        )
        .expect("switch");

        open(&mut state, &mut interaction, "about");

        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.active_workspace, WorkspaceId::FIRST);
        assert_eq!(state.focused, Some(id("about")));
    }

    #[test]
    fn close_is_idempotent_and_clears_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");
        open(&mut state, &mut interaction, "files");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id("files"),
            },
        )
        .expect("close");
        assert_eq!(effects, vec![RuntimeEffect::CancelWindowTasks(id("files"))]);
        assert_eq!(state.focused, None);
        assert_eq!(state.windows.len(), 1);

        let snapshot = state.clone();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id("files"),
            },
        )
        .expect("second close");
        assert!(effects.is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn closing_an_unfocused_window_keeps_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");
        open(&mut state, &mut interaction, "files");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id("about"),
            },
        )
        .expect("close");
        assert_eq!(state.focused, Some(id("files")));
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        for action in [
            DesktopAction::FocusWindow {
                window_id: id("ghost"),
            },
            DesktopAction::BeginMove {
                window_id: id("ghost"),
                pointer: PointerPosition::new(0, 0),
            },
            DesktopAction::MoveWindow {
                window_id: id("ghost"),
                position: PointerPosition::new(5, 5),
            },
        ] {
            let effects = reduce_desktop(&mut state, &mut interaction, action).expect("noop");
            assert!(effects.is_empty());
        }
        assert_eq!(state, DesktopState::default());
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn begin_move_focuses_then_drag_follows_pointer() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");
        open(&mut state, &mut interaction, "files");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("about"),
                pointer: PointerPosition::new(150, 70),
            },
        )
        .expect("begin move");
        assert!(effects.contains(&RuntimeEffect::FocusWindowInput(id("about"))));
        assert_eq!(state.focused, Some(id("about")));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition::new(190, 100),
            },
        )
        .expect("update move");
        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end move");

        assert_eq!(
            state.window(&id("about")).map(|w| w.rect),
            Some(WindowRect::new(140, 90, 600, 400))
        );
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn dragging_past_the_top_edge_keeps_the_titlebar_on_screen() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("about"),
                pointer: PointerPosition::new(150, 70),
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition::new(-900, -400),
            },
        )
        .expect("update move");

        assert_eq!(
            state.window(&id("about")).map(|w| w.rect),
            Some(WindowRect::new(64 - 600, 0, 600, 400))
        );
    }

    #[test]
    fn resize_clamps_to_minimum_size() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "terminal");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("terminal"),
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition::new(700, 460),
            },
        )
        .expect("begin resize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition::new(100, 100),
            },
        )
        .expect("update resize");

        assert_eq!(
            state.window(&id("terminal")).map(|w| w.rect),
            Some(WindowRect::new(100, 60, 300, 200))
        );
    }

    #[test]
    fn drag_of_a_vanished_window_is_reported() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState {
            dragging: Some(DragSession::new(
                id("gone"),
                PointerPosition::new(0, 0),
                WindowRect::default(),
            )),
            ..InteractionState::default()
        };

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition::new(10, 10),
            },
        )
        .expect_err("stale drag");
        assert_eq!(
            err,
            ReducerError::StaleInteraction {
                window_id: id("gone")
            }
        );
    }

    #[test]
    fn closing_a_dragged_window_releases_the_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "about");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("about"),
                pointer: PointerPosition::new(0, 0),
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id("about"),
            },
        )
        .expect("close");
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn reboot_cancels_every_window_and_resets_workspace() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "terminal");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SwitchWorkspace {
                workspace: WorkspaceId::new(2),
            },
        )
        .expect("switch");
        open(&mut state, &mut interaction, "terminal-2");

        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::Reboot).expect("reboot");

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::CancelWindowTasks(id("terminal")),
                RuntimeEffect::CancelWindowTasks(id("terminal-2")),
            ]
        );
        assert!(state.windows.is_empty());
        assert_eq!(state.focused, None);
        assert_eq!(state.active_workspace, WorkspaceId::FIRST);
    }

    #[test]
    fn workspace_switch_clamps_out_of_range_ids() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SwitchWorkspace {
                workspace: WorkspaceId::new(12),
            },
        )
        .expect("switch");
        assert_eq!(state.active_workspace.get(), 4);
    }

    #[test]
    fn icon_click_does_not_persist_but_drop_snaps() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: "files".to_string(),
                pointer: PointerPosition::new(40, 250),
            },
        )
        .expect("begin icon drag");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DropIcon {
                icon_id: "files".to_string(),
                position: IconPosition::new(23, 231),
            },
        )
        .expect("click drop");
        assert!(effects.is_empty());
        assert_eq!(interaction.icon_drag, None);

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DropIcon {
                icon_id: "files".to_string(),
                position: IconPosition::new(130, 240),
            },
        )
        .expect("real drop");
        assert_eq!(effects, vec![RuntimeEffect::PersistIcons]);
        assert_eq!(
            state.icons.position("files"),
            Some(IconPosition::new(124, 228))
        );
    }

    #[test]
    fn theme_and_background_changes_persist_once() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetTheme {
                theme: ThemeId::Nord,
            },
        )
        .expect("theme");
        assert_eq!(effects, vec![RuntimeEffect::PersistTheme]);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetTheme {
                theme: ThemeId::Nord,
            },
        )
        .expect("same theme");
        assert!(effects.is_empty());

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetBackgroundUrl {
                url: Some("  https://example.com/arch.jpg ".to_string()),
            },
        )
        .expect("background");
        assert_eq!(effects, vec![RuntimeEffect::PersistBackground]);
        assert_eq!(
            state.background_url.as_deref(),
            Some("https://example.com/arch.jpg")
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetBackgroundUrl {
                url: Some("   ".to_string()),
            },
        )
        .expect("clear background");
        assert_eq!(state.background_url, None);
    }

    #[test]
    fn background_urls_with_control_characters_are_dropped() {
        let mut state = DesktopState {
            background_url: Some("https://example.com/arch.jpg".to_string()),
            ..DesktopState::default()
        };
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetBackgroundUrl {
                url: Some("https://example.com/a.png\n');background:red".to_string()),
            },
        )
        .expect("newline background");
        assert_eq!(effects, vec![RuntimeEffect::PersistBackground]);
        assert_eq!(state.background_url, None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateBackground {
                url: Some("https://example.com/\u{7}.png".to_string()),
            },
        )
        .expect("hydrate");
        assert_eq!(state.background_url, None);
    }

    #[test]
    fn hydration_does_not_request_persistence() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateTheme {
                theme: ThemeId::Dracula,
            },
        )
        .expect("hydrate theme");
        assert!(effects.is_empty());
        assert_eq!(state.theme, ThemeId::Dracula);
    }

    #[test]
    fn app_commands_route_to_window_actions() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "terminal");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                window_id: id("terminal"),
                command: AppCommand::SetWindowTitle {
                    title: "kem@arch: ~/projects".to_string(),
                },
            },
        )
        .expect("title");
        assert_eq!(
            state.window(&id("terminal")).map(|w| w.title.as_str()),
            Some("kem@arch: ~/projects")
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                window_id: id("terminal"),
                command: AppCommand::CloseWindow,
            },
        )
        .expect("close");
        assert_eq!(effects, vec![RuntimeEffect::CancelWindowTasks(id("terminal"))]);
        assert!(state.windows.is_empty());

        assert_eq!(
            app_command_action(
                id("tweaks"),
                AppCommand::SetTheme {
                    theme_id: "solarized".to_string()
                }
            ),
            None
        );
    }
}
