//! Layout items that can be managed by a layout.
//!
//! A layout manages a collection of items which can be widgets (referenced
//! by ObjectId) or spacers (fixed or expanding empty space).

use casement_core::ObjectId;

use crate::geometry::Size;
use crate::widget::geometry::{SizeHint, SizePolicy, SizePolicyPair};

/// Type of spacer item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacerType {
    /// Fixed-size spacer that does not expand.
    Fixed,
    /// Expanding spacer that grows to fill available space.
    Expanding,
}

impl SpacerType {
    /// Convert to equivalent size policy.
    pub fn to_size_policy(self) -> SizePolicy {
        match self {
            SpacerType::Fixed => SizePolicy::Fixed,
            SpacerType::Expanding => SizePolicy::Expanding,
        }
    }
}

/// A spacer item that adds empty space in a layout.
///
/// Spacers can be fixed-size or expanding. Expanding spacers grow to fill
/// available space, which is useful for pushing widgets apart (button rows)
/// or centering them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacerItem {
    /// The preferred/base size of the spacer.
    pub size: Size,
    /// The horizontal spacer type.
    pub horizontal: SpacerType,
    /// The vertical spacer type.
    pub vertical: SpacerType,
}

impl SpacerItem {
    /// Create a new spacer item.
    pub fn new(size: Size, horizontal: SpacerType, vertical: SpacerType) -> Self {
        Self {
            size,
            horizontal,
            vertical,
        }
    }

    /// Create a fixed-size spacer.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self::new(
            Size::new(width, height),
            SpacerType::Fixed,
            SpacerType::Fixed,
        )
    }

    /// Create an expanding spacer (grows in both directions).
    pub fn expanding() -> Self {
        Self::new(Size::ZERO, SpacerType::Expanding, SpacerType::Expanding)
    }

    /// Create a horizontal expanding spacer.
    pub fn horizontal_expanding() -> Self {
        Self::new(Size::ZERO, SpacerType::Expanding, SpacerType::Fixed)
    }

    /// Create a vertical expanding spacer.
    pub fn vertical_expanding() -> Self {
        Self::new(Size::ZERO, SpacerType::Fixed, SpacerType::Expanding)
    }

    /// Create a horizontal fixed spacer.
    pub fn horizontal_fixed(width: f32) -> Self {
        Self::new(Size::new(width, 0.0), SpacerType::Fixed, SpacerType::Fixed)
    }

    /// Create a vertical fixed spacer.
    pub fn vertical_fixed(height: f32) -> Self {
        Self::new(Size::new(0.0, height), SpacerType::Fixed, SpacerType::Fixed)
    }

    /// Get the size hint for this spacer.
    pub fn size_hint(&self) -> SizeHint {
        match (self.horizontal, self.vertical) {
            (SpacerType::Fixed, SpacerType::Fixed) => SizeHint::fixed(self.size),
            _ => SizeHint::new(self.size),
        }
    }

    /// Get the size policy for this spacer.
    pub fn size_policy(&self) -> SizePolicyPair {
        SizePolicyPair::new(
            self.horizontal.to_size_policy(),
            self.vertical.to_size_policy(),
        )
    }
}

impl Default for SpacerItem {
    fn default() -> Self {
        Self::expanding()
    }
}

/// An item managed by a layout.
///
/// Each item participates in the layout algorithm to determine its final
/// position and size; only widget items receive geometry when the layout
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutItem {
    /// A widget managed by its ObjectId.
    Widget(ObjectId),

    /// A spacer item for adding empty space.
    Spacer(SpacerItem),
}

impl LayoutItem {
    /// Create a widget layout item.
    pub fn widget(id: ObjectId) -> Self {
        Self::Widget(id)
    }

    /// Create a fixed spacer layout item.
    pub fn fixed_spacer(width: f32, height: f32) -> Self {
        Self::Spacer(SpacerItem::fixed(width, height))
    }

    /// Create an expanding spacer layout item.
    pub fn stretch() -> Self {
        Self::Spacer(SpacerItem::expanding())
    }

    /// Check if this item is a widget.
    pub fn is_widget(&self) -> bool {
        matches!(self, Self::Widget(_))
    }

    /// Check if this item is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer(_))
    }

    /// Get the widget ID if this is a widget item.
    pub fn widget_id(&self) -> Option<ObjectId> {
        match self {
            Self::Widget(id) => Some(*id),
            Self::Spacer(_) => None,
        }
    }

    /// Get the spacer if this is a spacer item.
    pub fn spacer(&self) -> Option<&SpacerItem> {
        match self {
            Self::Spacer(s) => Some(s),
            Self::Widget(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_item_fixed() {
        let spacer = SpacerItem::fixed(10.0, 20.0);
        assert_eq!(spacer.size, Size::new(10.0, 20.0));
        assert_eq!(spacer.horizontal, SpacerType::Fixed);
        assert_eq!(spacer.vertical, SpacerType::Fixed);

        let hint = spacer.size_hint();
        assert_eq!(hint.minimum, Some(Size::new(10.0, 20.0)));
        assert_eq!(hint.maximum, Some(Size::new(10.0, 20.0)));
    }

    #[test]
    fn test_spacer_item_expanding() {
        let spacer = SpacerItem::expanding();
        assert_eq!(spacer.size, Size::ZERO);

        let policy = spacer.size_policy();
        assert!(policy.horizontal.wants_to_grow());
        assert!(policy.vertical.wants_to_grow());
    }

    #[test]
    fn test_layout_item_kinds() {
        let stretch = LayoutItem::stretch();
        assert!(stretch.is_spacer());
        assert!(!stretch.is_widget());
        assert!(stretch.widget_id().is_none());
        assert!(stretch.spacer().is_some());

        let fixed = LayoutItem::fixed_spacer(4.0, 0.0);
        assert_eq!(fixed.spacer().unwrap().size, Size::new(4.0, 0.0));
    }
}
