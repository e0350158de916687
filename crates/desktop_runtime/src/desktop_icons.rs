//! Desktop icon placement: grid snapping, click jitter and remount epochs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::surface::{DragSession, Offset, PointerPosition};

/// Distance between neighbouring icon grid cells, in px.
pub const ICON_GRID_PITCH: i32 = 104;
/// Top-left grid cell on both axes.
pub const ICON_GRID_ORIGIN: i32 = 20;
/// Drops closer than this (per axis) to the current position are treated as clicks.
pub const ICON_DROP_JITTER: i32 = 5;

const DEFAULT_ICONS: [(&str, IconPosition); 3] = [
    ("terminal", IconPosition::new(20, 20)),
    ("about", IconPosition::new(20, 124)),
    ("files", IconPosition::new(20, 228)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}

impl IconPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<IconPosition> for PointerPosition {
    fn from(position: IconPosition) -> Self {
        PointerPosition::new(position.x, position.y)
    }
}

impl Offset for IconPosition {
    fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Live icon drag: the session plus where the icon is drawn right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDrag {
    pub session: DragSession<String, IconPosition>,
    pub live: IconPosition,
}

impl IconDrag {
    pub fn begin(icon_id: String, pointer: PointerPosition, start: IconPosition) -> Self {
        Self {
            session: DragSession::new(icon_id, pointer, start),
            live: start,
        }
    }

    pub fn icon_id(&self) -> &str {
        &self.session.target
    }

    pub fn update(&mut self, pointer: PointerPosition) {
        self.live = self.session.moved_origin(pointer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconDrop {
    /// Click-sized movement; nothing stored or persisted.
    Unchanged,
    /// Icon stored at the snapped position.
    Moved(IconPosition),
}

/// Icon id -> position table plus per-icon remount counters.
///
/// Only the positions are persisted. Epochs exist so the view can key an icon on
/// `(id, epoch)` and rebuild it at the snapped coordinate after a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    positions: BTreeMap<String, IconPosition>,
    epochs: BTreeMap<String, u32>,
}

impl Default for IconLayout {
    fn default() -> Self {
        Self {
            positions: DEFAULT_ICONS
                .iter()
                .map(|(id, pos)| ((*id).to_string(), *pos))
                .collect(),
            epochs: BTreeMap::new(),
        }
    }
}

impl IconLayout {
    pub fn positions(&self) -> &BTreeMap<String, IconPosition> {
        &self.positions
    }

    pub fn position(&self, icon_id: &str) -> Option<IconPosition> {
        self.positions.get(icon_id).copied()
    }

    /// Stored position, or the first grid cell for icons the table has never seen.
    pub fn position_or_origin(&self, icon_id: &str) -> IconPosition {
        self.position(icon_id)
            .unwrap_or(IconPosition::new(ICON_GRID_ORIGIN, ICON_GRID_ORIGIN))
    }

    pub fn remount_epoch(&self, icon_id: &str) -> u32 {
        self.epochs.get(icon_id).copied().unwrap_or(0)
    }

    /// Overlays persisted positions on the defaults, snapping each onto the grid.
    pub fn hydrate(&mut self, stored: BTreeMap<String, IconPosition>) {
        let mut positions = Self::default().positions;
        positions.extend(
            stored
                .into_iter()
                .map(|(id, raw)| (id, snap_to_grid(raw))),
        );
        for id in positions.keys() {
            *self.epochs.entry(id.clone()).or_insert(0) += 1;
        }
        self.positions = positions;
    }

    fn place(&mut self, icon_id: &str, position: IconPosition) {
        self.positions.insert(icon_id.to_string(), position);
        *self.epochs.entry(icon_id.to_string()).or_insert(0) += 1;
    }
}

fn snap_axis(raw: i32) -> i32 {
    let cell = (raw - ICON_GRID_ORIGIN + ICON_GRID_PITCH / 2)
        .div_euclid(ICON_GRID_PITCH)
        .max(0);
    ICON_GRID_ORIGIN + cell * ICON_GRID_PITCH
}

/// Nearest grid cell to `raw`, never left of or above the origin cell.
pub fn snap_to_grid(raw: IconPosition) -> IconPosition {
    IconPosition::new(snap_axis(raw.x), snap_axis(raw.y))
}

/// Settles a dropped icon.
pub fn drop_icon(layout: &mut IconLayout, icon_id: &str, raw: IconPosition) -> IconDrop {
    if let Some(current) = layout.position(icon_id) {
        let travel = DragSession::new(icon_id, current.into(), current);
        if !travel.exceeds(raw.into(), ICON_DROP_JITTER) {
            return IconDrop::Unchanged;
        }
    }

    let snapped = snap_to_grid(raw);
    layout.place(icon_id, snapped);
    IconDrop::Moved(snapped)
}
