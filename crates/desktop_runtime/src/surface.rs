//! Pointer-driven move/resize primitive shared by windows and desktop icons.
//!
//! A [`DragSession`] remembers what is being dragged, where the pointer went down and the
//! geometry at that moment. Every update is computed from that origin rather than accumulated,
//! so dropped or coalesced pointer events never make the surface drift.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Geometry that can be translated by a pointer delta.
pub trait Offset: Copy {
    fn offset(self, dx: i32, dy: i32) -> Self;
}

impl Offset for WindowRect {
    fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

impl Offset for PointerPosition {
    fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            ResizeEdge::North => "edge-n",
            ResizeEdge::South => "edge-s",
            ResizeEdge::East => "edge-e",
            ResizeEdge::West => "edge-w",
            ResizeEdge::NorthEast => "edge-ne",
            ResizeEdge::NorthWest => "edge-nw",
            ResizeEdge::SouthEast => "edge-se",
            ResizeEdge::SouthWest => "edge-sw",
        }
    }
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Edges on the west/north side move the origin so the opposite edge stays put. The result is
/// not clamped; callers apply their own minimum size.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let west = matches!(
        edge,
        ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
    );
    let east = matches!(
        edge,
        ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast
    );
    let north = matches!(
        edge,
        ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
    );
    let south = matches!(
        edge,
        ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest
    );

    let mut rect = start;
    if west {
        rect.x += dx;
        rect.w -= dx;
    } else if east {
        rect.w += dx;
    }
    if north {
        rect.y += dy;
        rect.h -= dy;
    } else if south {
        rect.h += dy;
    }
    rect
}

/// Resize that never shrinks below `min_w` x `min_h`, pinning the edge opposite the drag.
pub fn resize_rect_clamped(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_w: i32,
    min_h: i32,
) -> WindowRect {
    let mut rect = resize_rect(start, edge, dx, dy);
    if rect.w < min_w {
        if rect.x != start.x {
            rect.x = start.x + start.w - min_w;
        }
        rect.w = min_w;
    }
    if rect.h < min_h {
        if rect.y != start.y {
            rect.y = start.y + start.h - min_h;
        }
        rect.h = min_h;
    }
    rect
}

/// In-progress pointer drag over some target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<T, O> {
    pub target: T,
    pub pointer_start: PointerPosition,
    pub start: O,
}

impl<T, O: Offset> DragSession<T, O> {
    pub fn new(target: T, pointer_start: PointerPosition, start: O) -> Self {
        Self {
            target,
            pointer_start,
            start,
        }
    }

    /// Pointer travel since the drag began.
    pub fn delta(&self, pointer: PointerPosition) -> (i32, i32) {
        (
            pointer.x - self.pointer_start.x,
            pointer.y - self.pointer_start.y,
        )
    }

    /// Starting geometry translated by the pointer travel.
    pub fn moved_origin(&self, pointer: PointerPosition) -> O {
        let (dx, dy) = self.delta(pointer);
        self.start.offset(dx, dy)
    }

    /// Whether the pointer left the `threshold` box around its starting point on either axis.
    pub fn exceeds(&self, pointer: PointerPosition, threshold: i32) -> bool {
        let (dx, dy) = self.delta(pointer);
        dx.abs() > threshold || dy.abs() > threshold
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const START: WindowRect = WindowRect::new(100, 60, 600, 400);

    #[test]
    fn east_and_south_edges_grow_size_only() {
        assert_eq!(
            resize_rect(START, ResizeEdge::SouthEast, 40, 25),
            WindowRect::new(100, 60, 640, 425)
        );
        assert_eq!(
            resize_rect(START, ResizeEdge::East, 40, 25),
            WindowRect::new(100, 60, 640, 400)
        );
    }

    #[test]
    fn west_and_north_edges_move_origin() {
        assert_eq!(
            resize_rect(START, ResizeEdge::NorthWest, -20, 10),
            WindowRect::new(80, 70, 620, 390)
        );
        assert_eq!(
            resize_rect(START, ResizeEdge::SouthWest, 30, 30),
            WindowRect::new(130, 60, 570, 430)
        );
    }

    #[test]
    fn clamped_resize_pins_the_opposite_edge() {
        let rect = resize_rect_clamped(START, ResizeEdge::West, 500, 0, 300, 200);
        assert_eq!(rect, WindowRect::new(400, 60, 300, 400));

        let rect = resize_rect_clamped(START, ResizeEdge::SouthEast, -500, -500, 300, 200);
        assert_eq!(rect, WindowRect::new(100, 60, 300, 200));
    }

    #[test]
    fn drag_session_tracks_origin_relative_motion() {
        let drag = DragSession::new("terminal", PointerPosition::new(150, 70), START);
        assert_eq!(drag.delta(PointerPosition::new(160, 50)), (10, -20));
        assert_eq!(
            drag.moved_origin(PointerPosition::new(160, 50)),
            WindowRect::new(110, 40, 600, 400)
        );
        assert!(!drag.exceeds(PointerPosition::new(155, 75), 5));
        assert!(drag.exceeds(PointerPosition::new(156, 70), 5));
    }
}
