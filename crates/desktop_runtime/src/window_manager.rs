//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{
    DesktopState, OpenWindowRequest, PointerPosition, WindowId, WindowRecord, WindowRect,
    WorkspaceId,
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Width of a window that must stay right of the desktop's left edge.
pub const MIN_VISIBLE_WIDTH: i32 = 64;

/// Keeps the titlebar grabbable: not above the desktop, not entirely past its left edge.
pub fn keep_on_desktop(rect: WindowRect) -> WindowRect {
    WindowRect {
        x: rect.x.max(MIN_VISIBLE_WIDTH - rect.w),
        y: rect.y.max(0),
        ..rect
    }
}

/// Resize variant of [`keep_on_desktop`]: a top edge dragged above the desktop stops at it and
/// the bottom edge stays put.
pub fn trim_to_desktop(mut rect: WindowRect) -> WindowRect {
    if rect.y < 0 {
        rect.h += rect.y;
        rect.y = 0;
    }
    rect
}

/// Focuses `window_id`.
///
/// Returns `false` when no such window exists.
pub fn focus_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    if !state.is_focused(window_id) {
        state.focused = Some(window_id.clone());
    }
    true
}

/// Inserts a new record for `request`, or focuses the existing one with that id.
///
/// Returns `true` when a new window was created. Either way the window ends up focused and its
/// workspace active.
pub fn open_window_internal(state: &mut DesktopState, request: OpenWindowRequest) -> bool {
    let OpenWindowRequest {
        window_id,
        title,
        content,
        size,
        workspace,
    } = request;

    if let Some(existing) = state.window_mut(&window_id) {
        if let Some(target) = workspace {
            existing.workspace = target;
        }
        let workspace = existing.workspace;
        state.active_workspace = workspace;
        state.focused = Some(window_id);
        return false;
    }

    let workspace = workspace.unwrap_or(state.active_workspace);
    let mut rect = WindowRect::default();
    if let Some((w, h)) = size {
        rect.w = w;
        rect.h = h;
    }
    state.windows.push(WindowRecord {
        id: window_id.clone(),
        title,
        content,
        workspace,
        rect: rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
    });
    state.active_workspace = workspace;
    state.focused = Some(window_id);
    true
}

/// Removes `window_id`. Focus is cleared, not handed to another window.
pub fn close_window_internal(state: &mut DesktopState, window_id: &WindowId) -> Option<WindowRecord> {
    let index = state.windows.iter().position(|w| &w.id == window_id)?;
    let removed = state.windows.remove(index);
    if state.is_focused(window_id) {
        state.focused = None;
    }
    Some(removed)
}

/// Switches the visible workspace, dropping focus held by a window that becomes hidden.
pub fn switch_workspace_internal(state: &mut DesktopState, workspace: WorkspaceId) {
    state.active_workspace = workspace;
    let focus_hidden = state
        .focused
        .as_ref()
        .and_then(|id| state.window(id))
        .is_some_and(|w| w.workspace != workspace);
    if focus_hidden {
        state.focused = None;
    }
}

pub fn move_window_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
    position: PointerPosition,
) -> bool {
    let Some(window) = state.window_mut(window_id) else {
        return false;
    };
    window.rect = keep_on_desktop(WindowRect {
        x: position.x,
        y: position.y,
        ..window.rect
    });
    true
}

pub fn set_window_rect_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
    rect: WindowRect,
) -> bool {
    let Some(window) = state.window_mut(window_id) else {
        return false;
    };
    window.rect = keep_on_desktop(rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    true
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ApplicationId, ContentHandle};
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(id: &str) -> OpenWindowRequest {
        OpenWindowRequest::new(
            WindowId::new(id),
            id,
            ContentHandle::new(ApplicationId::trusted("portfolio.about")),
        )
    }

    #[test]
    fn open_uses_default_geometry_and_min_size() {
        let mut state = DesktopState::default();
        assert!(open_window_internal(&mut state, request("about")));
        assert!(open_window_internal(&mut state, request("tiny").with_size(120, 80)));

        assert_eq!(
            state.window(&WindowId::new("about")).map(|w| w.rect),
            Some(WindowRect::new(100, 60, 600, 400))
        );
        assert_eq!(
            state.window(&WindowId::new("tiny")).map(|w| w.rect),
            Some(WindowRect::new(100, 60, 300, 200))
        );
    }

    #[test]
    fn reopening_with_explicit_workspace_moves_the_window() {
        let mut state = DesktopState::default();
        open_window_internal(&mut state, request("files"));
        let created =
            open_window_internal(&mut state, request("files").on_workspace(WorkspaceId::new(3)));

        assert!(!created);
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.windows[0].workspace, WorkspaceId::new(3));
        assert_eq!(state.active_workspace, WorkspaceId::new(3));
    }

    #[test]
    fn windows_cannot_leave_through_the_top_or_left_edge() {
        let mut state = DesktopState::default();
        open_window_internal(&mut state, request("about"));
        let id = WindowId::new("about");

        move_window_internal(&mut state, &id, PointerPosition::new(-2000, -50));
        assert_eq!(
            state.window(&id).map(|w| w.rect),
            Some(WindowRect::new(64 - 600, 0, 600, 400))
        );

        set_window_rect_internal(&mut state, &id, WindowRect::new(40, -10, 100, 100));
        assert_eq!(
            state.window(&id).map(|w| w.rect),
            Some(WindowRect::new(40, 0, 300, 200))
        );
    }

    #[test]
    fn top_edge_resizes_stop_at_the_desktop() {
        assert_eq!(
            trim_to_desktop(WindowRect::new(100, -30, 600, 490)),
            WindowRect::new(100, 0, 600, 460)
        );
        assert_eq!(
            trim_to_desktop(WindowRect::new(100, 10, 600, 400)),
            WindowRect::new(100, 10, 600, 400)
        );
    }

    #[test]
    fn switching_away_hides_and_unfocuses() {
        let mut state = DesktopState::default();
        open_window_internal(&mut state, request("about"));
        switch_workspace_internal(&mut state, WorkspaceId::new(2));
        assert_eq!(state.focused, None);
        assert!(state.visible_windows().is_empty());

        switch_workspace_internal(&mut state, WorkspaceId::FIRST);
        assert_eq!(state.visible_windows().len(), 1);
    }
}
