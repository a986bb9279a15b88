//! Cursor shapes for widgets.
//!
//! Each widget can specify its own cursor shape. When the mouse moves over
//! a widget, the window applies the effective cursor resolved through the
//! widget hierarchy (see [`EventDispatcher::get_effective_cursor`]), unless
//! an interactive resize zone overrides it.
//!
//! ```ignore
//! widget.set_cursor(Some(CursorShape::Hand));
//! ```
//!
//! [`EventDispatcher::get_effective_cursor`]: super::dispatcher::EventDispatcher::get_effective_cursor

use cursor_icon::CursorIcon;
use winit::window::Cursor;

/// The shape (icon) of the mouse cursor.
///
/// The actual appearance varies by platform and theme, and some platforms
/// fall back to a default when a shape is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum CursorShape {
    /// The default arrow cursor (platform-specific).
    #[default]
    Arrow,

    /// A crosshair cursor, typically used for precise selection.
    Crosshair,

    /// A pointing hand cursor, typically used for clickable elements like links.
    Hand,

    /// An I-beam cursor, typically used for text selection.
    IBeam,

    /// A "not allowed" cursor, indicating an action is forbidden.
    Forbidden,

    /// A wait cursor (hourglass/spinner), indicating the program is busy.
    Wait,

    /// A help cursor (arrow with question mark).
    Help,

    /// A move cursor, indicating something can be moved.
    Move,

    /// A grab cursor (open hand), indicating something can be grabbed.
    Grab,

    /// A grabbing cursor (closed hand), indicating something is being grabbed.
    Grabbing,

    /// Resize cursor for horizontal resizing (east-west).
    ResizeHorizontal,

    /// Resize cursor for vertical resizing (north-south).
    ResizeVertical,

    /// Resize cursor for diagonal resizing (northeast-southwest).
    ResizeNeSw,

    /// Resize cursor for diagonal resizing (northwest-southeast).
    ResizeNwSe,
}

impl CursorShape {
    /// Convert to winit's Cursor type.
    pub(crate) fn to_winit_cursor(self) -> Cursor {
        Cursor::Icon(match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Crosshair => CursorIcon::Crosshair,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::Forbidden => CursorIcon::NotAllowed,
            CursorShape::Wait => CursorIcon::Wait,
            CursorShape::Help => CursorIcon::Help,
            CursorShape::Move => CursorIcon::Move,
            CursorShape::Grab => CursorIcon::Grab,
            CursorShape::Grabbing => CursorIcon::Grabbing,
            CursorShape::ResizeHorizontal => CursorIcon::EwResize,
            CursorShape::ResizeVertical => CursorIcon::NsResize,
            CursorShape::ResizeNeSw => CursorIcon::NeswResize,
            CursorShape::ResizeNwSe => CursorIcon::NwseResize,
        })
    }

    /// Check if this is a resize cursor.
    pub fn is_resize_cursor(self) -> bool {
        matches!(
            self,
            CursorShape::ResizeHorizontal
                | CursorShape::ResizeVertical
                | CursorShape::ResizeNeSw
                | CursorShape::ResizeNwSe
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_shape_default() {
        assert_eq!(CursorShape::default(), CursorShape::Arrow);
    }

    #[test]
    fn test_cursor_shape_is_resize() {
        assert!(CursorShape::ResizeHorizontal.is_resize_cursor());
        assert!(CursorShape::ResizeNwSe.is_resize_cursor());
        assert!(!CursorShape::Arrow.is_resize_cursor());
        assert!(!CursorShape::Hand.is_resize_cursor());
    }

    #[test]
    fn test_winit_conversion_for_resize_shapes() {
        assert!(matches!(
            CursorShape::ResizeHorizontal.to_winit_cursor(),
            Cursor::Icon(CursorIcon::EwResize)
        ));
        assert!(matches!(
            CursorShape::ResizeVertical.to_winit_cursor(),
            Cursor::Icon(CursorIcon::NsResize)
        ));
        assert!(matches!(
            CursorShape::ResizeNeSw.to_winit_cursor(),
            Cursor::Icon(CursorIcon::NeswResize)
        ));
        assert!(matches!(
            CursorShape::ResizeNwSe.to_winit_cursor(),
            Cursor::Icon(CursorIcon::NwseResize)
        ));
    }
}
