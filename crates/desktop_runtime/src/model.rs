pub use desktop_app_contract::{ContentHandle, WindowId};
use serde::{Deserialize, Serialize};

use crate::desktop_icons::{IconDrag, IconLayout};
pub use crate::surface::{DragSession, PointerPosition, ResizeEdge, WindowRect};

pub const DEFAULT_WINDOW_X: i32 = 100;
pub const DEFAULT_WINDOW_Y: i32 = 60;
pub const DEFAULT_WINDOW_WIDTH: i32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
pub const WORKSPACE_COUNT: u8 = 4;

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: DEFAULT_WINDOW_X,
            y: DEFAULT_WINDOW_Y,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Virtual desktop number, always within `1..=WORKSPACE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(u8);

impl WorkspaceId {
    pub const FIRST: WorkspaceId = WorkspaceId(1);

    /// Clamps `raw` into the valid workspace range.
    pub fn new(raw: i32) -> Self {
        Self(raw.clamp(1, i32::from(WORKSPACE_COUNT)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = WorkspaceId> {
        (1..=WORKSPACE_COUNT).map(WorkspaceId)
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub content: ContentHandle,
    pub workspace: WorkspaceId,
    pub rect: WindowRect,
}

/// Desktop colour preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    Mocha,
    Gruvbox,
    Nord,
    Dracula,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Mocha,
        ThemeId::Gruvbox,
        ThemeId::Nord,
        ThemeId::Dracula,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Mocha => "mocha",
            ThemeId::Gruvbox => "gruvbox",
            ThemeId::Nord => "nord",
            ThemeId::Dracula => "dracula",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeId::Mocha => "Catppuccin Mocha",
            ThemeId::Gruvbox => "Gruvbox",
            ThemeId::Nord => "Nord",
            ThemeId::Dracula => "Dracula",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
    pub active_workspace: WorkspaceId,
    pub icons: IconLayout,
    pub theme: ThemeId,
    pub background_url: Option<String>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            active_workspace: WorkspaceId::FIRST,
            icons: IconLayout::default(),
            theme: ThemeId::default(),
            background_url: None,
        }
    }
}

impl DesktopState {
    pub fn is_focused(&self, window_id: &WindowId) -> bool {
        self.focused.as_ref() == Some(window_id)
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn window_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == window_id)
    }

    /// Windows on the active workspace in paint order: unfocused by insertion, focused last.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let (mut focused, mut ordered): (Vec<_>, Vec<_>) = self
            .windows
            .iter()
            .filter(|w| w.workspace == self.active_workspace)
            .partition(|w| self.is_focused(&w.id));
        ordered.append(&mut focused);
        ordered
    }

    /// Stacking order of a visible window, starting at 1. Hidden windows have none.
    pub fn z_index(&self, window_id: &WindowId) -> Option<u32> {
        self.visible_windows()
            .iter()
            .position(|w| &w.id == window_id)
            .map(|idx| idx as u32 + 1)
    }

    /// `prefix` if no window uses it yet, otherwise the first free `prefix-N` (N >= 2).
    pub fn unused_window_id(&self, prefix: &str) -> WindowId {
        let taken = |candidate: &str| self.windows.iter().any(|w| w.id.as_str() == candidate);
        if !taken(prefix) {
            return WindowId::new(prefix);
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{prefix}-{n}");
            if !taken(&candidate) {
                return WindowId::new(candidate);
            }
            n += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindowRequest {
    pub window_id: WindowId,
    pub title: String,
    pub content: ContentHandle,
    /// Initial width/height; the default size is used when absent.
    pub size: Option<(i32, i32)>,
    /// Target workspace; the active one when absent.
    pub workspace: Option<WorkspaceId>,
}

impl OpenWindowRequest {
    pub fn new(window_id: WindowId, title: impl Into<String>, content: ContentHandle) -> Self {
        Self {
            window_id,
            title: title.into(),
            content,
            size: None,
            workspace: None,
        }
    }

    pub fn with_size(mut self, w: i32, h: i32) -> Self {
        self.size = Some((w, h));
        self
    }

    pub fn on_workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = Some(workspace);
        self
    }
}

pub type WindowDrag = DragSession<WindowId, WindowRect>;
pub type WindowResize = DragSession<(WindowId, ResizeEdge), WindowRect>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<WindowDrag>,
    pub resizing: Option<WindowResize>,
    pub icon_drag: Option<IconDrag>,
}

impl InteractionState {
    /// Drops any window drag/resize that targets `window_id`.
    pub fn release_window(&mut self, window_id: &WindowId) {
        if self
            .dragging
            .as_ref()
            .is_some_and(|drag| &drag.target == window_id)
        {
            self.dragging = None;
        }
        if self
            .resizing
            .as_ref()
            .is_some_and(|resize| &resize.target.0 == window_id)
        {
            self.resizing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, workspace: u8) -> WindowRecord {
        WindowRecord {
            id: WindowId::new(id),
            title: id.to_string(),
            content: ContentHandle::new(ApplicationId::trusted("system.terminal")),
            workspace: WorkspaceId::new(i32::from(workspace)),
            rect: WindowRect::default(),
        }
    }

    #[test]
    fn workspace_ids_clamp_into_range() {
        assert_eq!(WorkspaceId::new(0).get(), 1);
        assert_eq!(WorkspaceId::new(3).get(), 3);
        assert_eq!(WorkspaceId::new(9).get(), 4);
        assert_eq!(WorkspaceId::all().count(), 4);
    }

    #[test]
    fn focused_window_paints_last() {
        let mut state = DesktopState {
            windows: vec![record("a", 1), record("b", 1), record("c", 1), record("d", 2)],
            ..DesktopState::default()
        };
        state.focused = Some(WindowId::new("a"));

        let order: Vec<_> = state
            .visible_windows()
            .iter()
            .map(|w| w.id.as_str().to_string())
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(state.z_index(&WindowId::new("a")), Some(3));
        assert_eq!(state.z_index(&WindowId::new("b")), Some(1));
        assert_eq!(state.z_index(&WindowId::new("d")), None);
    }

    #[test]
    fn unused_window_id_skips_taken_suffixes() {
        let state = DesktopState {
            windows: vec![record("terminal", 1), record("terminal-2", 1)],
            ..DesktopState::default()
        };
        assert_eq!(state.unused_window_id("terminal"), WindowId::new("terminal-3"));
        assert_eq!(state.unused_window_id("about"), WindowId::new("about"));
    }

    #[test]
    fn theme_ids_round_trip_through_their_string_form() {
        for theme in ThemeId::ALL {
            assert_eq!(ThemeId::parse(theme.as_str()), Some(theme));
            assert_eq!(
                serde_json::to_string(&theme).expect("serialize"),
                format!("\"{}\"", theme.as_str())
            );
        }
        assert_eq!(ThemeId::parse(" Nord "), Some(ThemeId::Nord));
        assert_eq!(ThemeId::parse("solarized"), None);
    }
}
