//! Layout management for arranging widgets.
//!
//! The layout system positions chrome widgets automatically instead of
//! requiring hand-placed geometry. A layout owns a list of items (widget
//! references and spacers), computes each item's geometry from size hints
//! and size policies, and pushes the results onto the widgets through a
//! [`WidgetAccess`](crate::widget::WidgetAccess) storage.
//!
//! # Workflow
//!
//! 1. Create a [`BoxLayout`] and add items.
//! 2. Give the layout its geometry with `set_geometry` (in the parent
//!    widget's local coordinate space).
//! 3. Call `activate` to recalculate and apply geometries when dirty.
//!
//! Mutating the layout (items, spacing, margins, orientation) marks it
//! dirty; the next `activate` recalculates.

mod box_layout;
mod item;

pub use box_layout::{Alignment, BoxLayout, Orientation};
pub use item::{LayoutItem, SpacerItem, SpacerType};

use crate::geometry::Size;

/// Default spacing between layout items, in logical pixels.
pub const DEFAULT_SPACING: f32 = 6.0;

/// Default content margins for layouts, in logical pixels.
pub const DEFAULT_MARGINS: ContentMargins = ContentMargins {
    left: 9.0,
    top: 9.0,
    right: 9.0,
    bottom: 9.0,
};

/// Margins around the content area of a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentMargins {
    /// Left margin in logical pixels.
    pub left: f32,
    /// Top margin in logical pixels.
    pub top: f32,
    /// Right margin in logical pixels.
    pub right: f32,
    /// Bottom margin in logical pixels.
    pub bottom: f32,
}

impl ContentMargins {
    /// Margins of zero on all sides.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create margins with individual values for each side.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform margins (same value on all sides).
    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Create symmetric margins (one value for left/right, one for top/bottom).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal margin (left + right).
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total margin as a size (horizontal, vertical).
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}

impl Default for ContentMargins {
    fn default() -> Self {
        DEFAULT_MARGINS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_margins_constructors() {
        let m = ContentMargins::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.horizontal(), 4.0);
        assert_eq!(m.vertical(), 6.0);
        assert_eq!(m.size(), Size::new(4.0, 6.0));

        assert_eq!(ContentMargins::uniform(5.0), ContentMargins::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(
            ContentMargins::symmetric(10.0, 0.0),
            ContentMargins::new(10.0, 0.0, 10.0, 0.0)
        );
        assert_eq!(ContentMargins::ZERO.size(), Size::ZERO);
        assert_eq!(ContentMargins::default(), DEFAULT_MARGINS);
    }
}
