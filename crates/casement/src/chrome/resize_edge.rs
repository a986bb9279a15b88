//! Resize edge tracking for frameless windows.
//!
//! A frameless window has no OS-provided resize border, so the chrome does
//! its own proximity test: every pointer move is checked against a margin
//! along each window edge, and the resulting [`EdgeSet`] drives both the
//! cursor shape and the resize direction handed to the OS when a drag
//! starts.
//!
//! Corners fall out of the set representation naturally: a pointer near two
//! adjacent edges is in both, and the pair classifies as a diagonal.

use winit::window::ResizeDirection;

use crate::geometry::{Point, Size};
use crate::widget::CursorShape;

/// Pointer distance from a window edge that still counts as that edge,
/// in logical pixels.
pub const RESIZE_MARGIN: f32 = 8.0;

/// A set of window edges, tracked during pointer movement.
///
/// The set is empty while the pointer is in the window interior. Near an
/// edge it holds that edge; in a corner it holds both adjacent edges.
///
/// ```
/// use casement::chrome::EdgeSet;
///
/// let corner = EdgeSet::TOP | EdgeSet::LEFT;
/// assert!(corner.contains(EdgeSet::TOP));
/// assert_eq!(corner.edge_count(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeSet(u8);

impl EdgeSet {
    /// No edges; the pointer is in the window interior.
    pub const EMPTY: EdgeSet = EdgeSet(0);
    /// The left window edge.
    pub const LEFT: EdgeSet = EdgeSet(1 << 0);
    /// The right window edge.
    pub const RIGHT: EdgeSet = EdgeSet(1 << 1);
    /// The top window edge.
    pub const TOP: EdgeSet = EdgeSet(1 << 2);
    /// The bottom window edge.
    pub const BOTTOM: EdgeSet = EdgeSet(1 << 3);

    /// Compute the edges within `margin` of `pos` for a window of `size`.
    ///
    /// Positions exactly on the margin boundary count as inside it. A window
    /// smaller than twice the margin can report opposite edges at once; the
    /// classification methods treat that as no usable direction.
    pub fn at(pos: Point, size: Size, margin: f32) -> EdgeSet {
        let mut edges = EdgeSet::EMPTY;
        if pos.x <= margin {
            edges.insert(EdgeSet::LEFT);
        }
        if pos.x >= size.width - margin {
            edges.insert(EdgeSet::RIGHT);
        }
        if pos.y <= margin {
            edges.insert(EdgeSet::TOP);
        }
        if pos.y >= size.height - margin {
            edges.insert(EdgeSet::BOTTOM);
        }
        edges
    }

    /// Check if no edges are set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if all edges in `other` are set in `self`.
    #[inline]
    pub fn contains(self, other: EdgeSet) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Add the edges in `other` to this set.
    #[inline]
    pub fn insert(&mut self, other: EdgeSet) {
        self.0 |= other.0;
    }

    /// Number of edges in the set.
    #[inline]
    pub fn edge_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if the left edge is set.
    #[inline]
    pub fn has_left(self) -> bool {
        self.contains(EdgeSet::LEFT)
    }

    /// Check if the right edge is set.
    #[inline]
    pub fn has_right(self) -> bool {
        self.contains(EdgeSet::RIGHT)
    }

    /// Check if the top edge is set.
    #[inline]
    pub fn has_top(self) -> bool {
        self.contains(EdgeSet::TOP)
    }

    /// Check if the bottom edge is set.
    #[inline]
    pub fn has_bottom(self) -> bool {
        self.contains(EdgeSet::BOTTOM)
    }

    /// The cursor shape for this edge combination.
    ///
    /// A single edge maps to the straight resize cursor along its axis, two
    /// adjacent edges map to the matching diagonal. Anything else, including
    /// the degenerate opposite-edge combinations a tiny window can produce,
    /// maps to `None` so the caller falls back to the regular cursor.
    pub fn cursor_shape(self) -> Option<CursorShape> {
        match (self.has_left(), self.has_right(), self.has_top(), self.has_bottom()) {
            (true, false, false, false) | (false, true, false, false) => {
                Some(CursorShape::ResizeHorizontal)
            }
            (false, false, true, false) | (false, false, false, true) => {
                Some(CursorShape::ResizeVertical)
            }
            (true, false, true, false) | (false, true, false, true) => {
                Some(CursorShape::ResizeNwSe)
            }
            (false, true, true, false) | (true, false, false, true) => {
                Some(CursorShape::ResizeNeSw)
            }
            _ => None,
        }
    }

    /// The OS resize direction for this edge combination.
    ///
    /// Mirrors [`cursor_shape`](Self::cursor_shape): only single edges and
    /// adjacent pairs produce a direction.
    pub fn resize_direction(self) -> Option<ResizeDirection> {
        match (self.has_left(), self.has_right(), self.has_top(), self.has_bottom()) {
            (true, false, false, false) => Some(ResizeDirection::West),
            (false, true, false, false) => Some(ResizeDirection::East),
            (false, false, true, false) => Some(ResizeDirection::North),
            (false, false, false, true) => Some(ResizeDirection::South),
            (true, false, true, false) => Some(ResizeDirection::NorthWest),
            (false, true, true, false) => Some(ResizeDirection::NorthEast),
            (true, false, false, true) => Some(ResizeDirection::SouthWest),
            (false, true, false, true) => Some(ResizeDirection::SouthEast),
            _ => None,
        }
    }
}

impl std::ops::BitOr for EdgeSet {
    type Output = EdgeSet;

    fn bitor(self, rhs: EdgeSet) -> EdgeSet {
        EdgeSet(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EdgeSet {
    fn bitor_assign(&mut self, rhs: EdgeSet) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Debug for EdgeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EdgeSet(EMPTY)");
        }
        let mut names = Vec::new();
        if self.has_left() {
            names.push("LEFT");
        }
        if self.has_right() {
            names.push("RIGHT");
        }
        if self.has_top() {
            names.push("TOP");
        }
        if self.has_bottom() {
            names.push("BOTTOM");
        }
        write!(f, "EdgeSet({})", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A window comfortably larger than twice the margin.
    const SIZE: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_interior_position_yields_empty_set() {
        let edges = EdgeSet::at(Point::new(400.0, 300.0), SIZE, RESIZE_MARGIN);
        assert!(edges.is_empty());
        assert_eq!(edges, EdgeSet::EMPTY);
    }

    #[test]
    fn test_positions_near_single_edges() {
        let cases = [
            (Point::new(3.0, 300.0), EdgeSet::LEFT),
            (Point::new(797.0, 300.0), EdgeSet::RIGHT),
            (Point::new(400.0, 2.0), EdgeSet::TOP),
            (Point::new(400.0, 598.0), EdgeSet::BOTTOM),
        ];
        for (pos, expected) in cases {
            assert_eq!(EdgeSet::at(pos, SIZE, RESIZE_MARGIN), expected);
        }
    }

    #[test]
    fn test_corner_positions_yield_adjacent_pairs() {
        let cases = [
            (Point::new(2.0, 3.0), EdgeSet::LEFT | EdgeSet::TOP),
            (Point::new(798.0, 1.0), EdgeSet::RIGHT | EdgeSet::TOP),
            (Point::new(4.0, 597.0), EdgeSet::LEFT | EdgeSet::BOTTOM),
            (Point::new(795.0, 599.0), EdgeSet::RIGHT | EdgeSet::BOTTOM),
        ];
        for (pos, expected) in cases {
            assert_eq!(EdgeSet::at(pos, SIZE, RESIZE_MARGIN), expected);
        }
    }

    #[test]
    fn test_margin_boundary_is_inclusive() {
        let edges = EdgeSet::at(Point::new(RESIZE_MARGIN, 300.0), SIZE, RESIZE_MARGIN);
        assert_eq!(edges, EdgeSet::LEFT);

        let just_inside = EdgeSet::at(Point::new(RESIZE_MARGIN + 0.5, 300.0), SIZE, RESIZE_MARGIN);
        assert!(just_inside.is_empty());
    }

    #[test]
    fn test_tiny_window_reports_opposite_edges() {
        let tiny = Size::new(10.0, 300.0);
        let edges = EdgeSet::at(Point::new(5.0, 150.0), tiny, RESIZE_MARGIN);
        assert!(edges.has_left());
        assert!(edges.has_right());
        assert_eq!(edges.cursor_shape(), None);
        assert_eq!(edges.resize_direction(), None);
    }

    #[test]
    fn test_single_edges_use_straight_cursors() {
        assert_eq!(
            EdgeSet::LEFT.cursor_shape(),
            Some(CursorShape::ResizeHorizontal)
        );
        assert_eq!(
            EdgeSet::RIGHT.cursor_shape(),
            Some(CursorShape::ResizeHorizontal)
        );
        assert_eq!(EdgeSet::TOP.cursor_shape(), Some(CursorShape::ResizeVertical));
        assert_eq!(
            EdgeSet::BOTTOM.cursor_shape(),
            Some(CursorShape::ResizeVertical)
        );
    }

    #[test]
    fn test_adjacent_pairs_use_diagonal_cursors() {
        assert_eq!(
            (EdgeSet::TOP | EdgeSet::LEFT).cursor_shape(),
            Some(CursorShape::ResizeNwSe)
        );
        assert_eq!(
            (EdgeSet::BOTTOM | EdgeSet::RIGHT).cursor_shape(),
            Some(CursorShape::ResizeNwSe)
        );
        assert_eq!(
            (EdgeSet::TOP | EdgeSet::RIGHT).cursor_shape(),
            Some(CursorShape::ResizeNeSw)
        );
        assert_eq!(
            (EdgeSet::BOTTOM | EdgeSet::LEFT).cursor_shape(),
            Some(CursorShape::ResizeNeSw)
        );
    }

    #[test]
    fn test_empty_set_has_no_cursor() {
        assert_eq!(EdgeSet::EMPTY.cursor_shape(), None);
    }

    #[test]
    fn test_three_or_more_edges_have_no_cursor() {
        let three = EdgeSet::LEFT | EdgeSet::TOP | EdgeSet::RIGHT;
        assert_eq!(three.cursor_shape(), None);
        assert_eq!(three.resize_direction(), None);

        let all = three | EdgeSet::BOTTOM;
        assert_eq!(all.cursor_shape(), None);
        assert_eq!(all.edge_count(), 4);
    }

    #[test]
    fn test_resize_directions_for_single_edges() {
        assert_eq!(EdgeSet::LEFT.resize_direction(), Some(ResizeDirection::West));
        assert_eq!(EdgeSet::RIGHT.resize_direction(), Some(ResizeDirection::East));
        assert_eq!(EdgeSet::TOP.resize_direction(), Some(ResizeDirection::North));
        assert_eq!(
            EdgeSet::BOTTOM.resize_direction(),
            Some(ResizeDirection::South)
        );
    }

    #[test]
    fn test_resize_directions_for_corners() {
        assert_eq!(
            (EdgeSet::TOP | EdgeSet::LEFT).resize_direction(),
            Some(ResizeDirection::NorthWest)
        );
        assert_eq!(
            (EdgeSet::TOP | EdgeSet::RIGHT).resize_direction(),
            Some(ResizeDirection::NorthEast)
        );
        assert_eq!(
            (EdgeSet::BOTTOM | EdgeSet::LEFT).resize_direction(),
            Some(ResizeDirection::SouthWest)
        );
        assert_eq!(
            (EdgeSet::BOTTOM | EdgeSet::RIGHT).resize_direction(),
            Some(ResizeDirection::SouthEast)
        );
        assert_eq!(EdgeSet::EMPTY.resize_direction(), None);
    }

    #[test]
    fn test_insert_and_contains() {
        let mut edges = EdgeSet::EMPTY;
        assert!(!edges.contains(EdgeSet::LEFT));

        edges.insert(EdgeSet::LEFT);
        edges.insert(EdgeSet::TOP);
        assert!(edges.contains(EdgeSet::LEFT));
        assert!(edges.contains(EdgeSet::TOP));
        assert!(edges.contains(EdgeSet::LEFT | EdgeSet::TOP));
        assert!(!edges.contains(EdgeSet::RIGHT));
        assert_eq!(edges.edge_count(), 2);
    }

    #[test]
    fn test_debug_lists_edge_names() {
        assert_eq!(format!("{:?}", EdgeSet::EMPTY), "EdgeSet(EMPTY)");
        assert_eq!(
            format!("{:?}", EdgeSet::LEFT | EdgeSet::BOTTOM),
            "EdgeSet(LEFT|BOTTOM)"
        );
    }
}
