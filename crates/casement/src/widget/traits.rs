//! Core widget trait definitions.
//!
//! This module defines the [`Widget`] trait which is the foundation for all
//! chrome elements in Casement.
//!
//! # Key Types
//!
//! - [`Widget`] - Base trait for all UI elements
//! - [`AsWidget`] - Helper trait for widget references
//!
//! # Related Types
//!
//! - [`super::WidgetBase`] - Common implementation for widgets
//! - [`super::SizeHint`] - Layout size hints
//! - [`super::SizePolicy`] - Layout sizing behavior
//! - [`super::WidgetEvent`] - Events handled by widgets
//! - [`crate::paint::PaintContext`] - Rendering context passed to [`Widget::paint`]

use casement_core::{Object, ObjectId};

use crate::geometry::{Point, Rect, Size};
use crate::paint::PaintContext;

use super::base::{FocusPolicy, WidgetBase};
use super::events::WidgetEvent;
use super::geometry::{SizeHint, SizePolicyPair};

/// The core trait for all widgets.
///
/// `Widget` extends [`Object`] to provide the fundamental interface for all
/// chrome elements: title bars, window buttons, dialogs, and their content.
///
/// # Required Methods
///
/// Implementors must provide:
/// - [`widget_base()`](Self::widget_base) / [`widget_base_mut()`](Self::widget_base_mut): Access to the underlying [`WidgetBase`]
/// - [`size_hint()`](Self::size_hint): The widget's preferred size for layout (see [`SizeHint`])
/// - [`paint()`](Self::paint): How to render the widget (see [`PaintContext`])
///
/// # Default Implementations
///
/// Many methods have default implementations that delegate to [`WidgetBase`]:
/// - Geometry accessors and mutators
/// - Visibility and enabled state
/// - Event handling (returns `false` by default)
///
/// # Implementing Object
///
/// Widgets must also implement the [`Object`] trait. The simplest way is to
/// delegate to the [`WidgetBase`]:
///
/// ```ignore
/// impl Object for MyWidget {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
/// ```
///
/// # Example
///
/// ```ignore
/// use casement::widget::*;
/// use casement::geometry::Color;
/// use casement::paint::PaintContext;
/// use casement_core::{Object, ObjectId};
///
/// struct ColorBox {
///     base: WidgetBase,
///     color: Color,
/// }
///
/// impl ColorBox {
///     pub fn new(color: Color) -> Self {
///         Self {
///             base: WidgetBase::new::<Self>(),
///             color,
///         }
///     }
/// }
///
/// impl Object for ColorBox {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
///
/// impl Widget for ColorBox {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn size_hint(&self) -> SizeHint {
///         SizeHint::from_dimensions(100.0, 100.0)
///     }
///
///     fn paint(&self, ctx: &mut PaintContext<'_>) {
///         let rect = ctx.rect();
///         ctx.painter().fill_rect(rect, self.color);
///     }
/// }
/// ```
pub trait Widget: Object + Send + Sync {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Get the widget's size hint for layout purposes.
    ///
    /// This tells layout managers what size the widget prefers. The actual
    /// size assigned may differ based on the layout and size policy.
    fn size_hint(&self) -> SizeHint;

    /// Paint the widget.
    ///
    /// This is called when the widget needs to be rendered. The paint context
    /// provides access to the painter and the widget's geometry.
    ///
    /// # Coordinate System
    ///
    /// The painter is already translated so that (0, 0) is the top-left
    /// corner of the widget. Use `ctx.rect()` to get the full bounds.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    // =========================================================================
    // Geometry (default implementations delegate to WidgetBase)
    // =========================================================================

    /// Get the widget's geometry (position and size).
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Set the widget's geometry.
    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    /// Get the widget's position relative to its parent.
    fn pos(&self) -> Point {
        self.widget_base().pos()
    }

    /// Set the widget's position relative to its parent.
    fn set_pos(&mut self, pos: Point) {
        self.widget_base_mut().set_pos(pos);
    }

    /// Get the widget's size.
    fn size(&self) -> Size {
        self.widget_base().size()
    }

    /// Set the widget's size.
    fn set_size(&mut self, size: Size) {
        self.widget_base_mut().set_size(size);
    }

    /// Get the widget's local rectangle (origin at 0,0).
    fn rect(&self) -> Rect {
        self.widget_base().rect()
    }

    /// Get the widget's width.
    fn width(&self) -> f32 {
        self.widget_base().width()
    }

    /// Get the widget's height.
    fn height(&self) -> f32 {
        self.widget_base().height()
    }

    // =========================================================================
    // Size Policy
    // =========================================================================

    /// Get the widget's size policy.
    fn size_policy(&self) -> SizePolicyPair {
        self.widget_base().size_policy()
    }

    /// Set the widget's size policy.
    fn set_size_policy(&mut self, policy: SizePolicyPair) {
        self.widget_base_mut().set_size_policy(policy);
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Set whether the widget is visible.
    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    /// Show the widget.
    fn show(&mut self) {
        self.widget_base_mut().show();
    }

    /// Hide the widget.
    fn hide(&mut self) {
        self.widget_base_mut().hide();
    }

    /// Check if the widget is effectively visible (considering ancestors).
    ///
    /// Returns `true` only if this widget AND all its ancestors are visible.
    /// A widget with `is_visible() == true` may still be effectively hidden
    /// if any ancestor is hidden.
    fn is_effectively_visible(&self) -> bool {
        self.widget_base().is_effectively_visible()
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Check if the widget is enabled.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Set whether the widget is enabled.
    fn set_enabled(&mut self, enabled: bool) {
        self.widget_base_mut().set_enabled(enabled);
    }

    /// Check if the widget is effectively enabled (considering ancestors).
    ///
    /// Returns `true` only if this widget AND all its ancestors are enabled.
    /// A widget with `is_enabled() == true` may still be effectively disabled
    /// if any ancestor is disabled.
    fn is_effectively_enabled(&self) -> bool {
        self.widget_base().is_effectively_enabled()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Get the widget's focus policy.
    fn focus_policy(&self) -> FocusPolicy {
        self.widget_base().focus_policy()
    }

    /// Set the widget's focus policy.
    ///
    /// The focus policy determines how a widget can receive keyboard focus.
    /// See [`FocusPolicy`] for available options.
    fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.widget_base_mut().set_focus_policy(policy);
    }

    /// Check if the widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        self.widget_base().is_focusable()
    }

    /// Check if the widget accepts focus via Tab/Shift+Tab navigation.
    fn accepts_tab_focus(&self) -> bool {
        self.widget_base().focus_policy().accepts_tab_focus()
    }

    /// Check if the widget accepts focus via mouse click.
    fn accepts_click_focus(&self) -> bool {
        self.widget_base().focus_policy().accepts_click_focus()
    }

    /// Set whether the widget can receive keyboard focus.
    ///
    /// This is a convenience method that sets the focus policy to `StrongFocus`
    /// if `focusable` is `true`, or `NoFocus` if `false`.
    fn set_focusable(&mut self, focusable: bool) {
        let policy = if focusable {
            FocusPolicy::StrongFocus
        } else {
            FocusPolicy::NoFocus
        };
        self.widget_base_mut().set_focus_policy(policy);
    }

    /// Check if the widget currently has keyboard focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    // =========================================================================
    // Pressed and Hover State
    // =========================================================================

    /// Check if the widget is currently pressed.
    ///
    /// A widget is considered pressed when a mouse button is held down on it.
    /// This is typically used for visual feedback (e.g., button appears pushed).
    fn is_pressed(&self) -> bool {
        self.widget_base().is_pressed()
    }

    /// Check if the mouse is currently hovering over this widget.
    fn is_hovered(&self) -> bool {
        self.widget_base().is_hovered()
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a widget event.
    ///
    /// This is the main event dispatch method. The default implementation
    /// returns `false` to indicate the event was not handled. Override this
    /// to handle events specific to your widget.
    ///
    /// Return `true` if the event was handled and should not propagate further.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }

    /// Filter an event destined for another widget.
    ///
    /// This method is called when this widget is installed as an event filter
    /// on another widget. It allows this widget to intercept and optionally
    /// consume events before they reach their target.
    ///
    /// # Arguments
    ///
    /// * `event` - The event to filter.
    /// * `target` - The ObjectId of the widget the event was originally sent to.
    ///
    /// # Returns
    ///
    /// * `true` if the event was handled and should not reach the target widget.
    /// * `false` if the event should continue to the target widget.
    fn event_filter(&mut self, _event: &mut WidgetEvent, _target: ObjectId) -> bool {
        false
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from widget-local coordinates to parent coordinates.
    fn map_to_parent(&self, point: Point) -> Point {
        self.widget_base().map_to_parent(point)
    }

    /// Map a point from parent coordinates to widget-local coordinates.
    fn map_from_parent(&self, point: Point) -> Point {
        self.widget_base().map_from_parent(point)
    }

    /// Check if a point (in local coordinates) is inside the widget.
    fn contains_point(&self, point: Point) -> bool {
        self.widget_base().contains_point(point)
    }

    // =========================================================================
    // Opaque Widget
    // =========================================================================

    /// Check if this widget is opaque.
    ///
    /// Opaque widgets paint all their pixels, allowing the painting system
    /// to skip painting parent regions that would be completely covered.
    fn is_opaque(&self) -> bool {
        self.widget_base().is_opaque()
    }

    /// Set whether this widget is opaque.
    ///
    /// Set to `true` if this widget always paints all its pixels with opaque
    /// colors.
    fn set_opaque(&mut self, opaque: bool) {
        self.widget_base_mut().set_opaque(opaque);
    }

    // =========================================================================
    // Update / Repaint
    // =========================================================================

    /// Request a full repaint of the widget.
    ///
    /// This schedules a repaint for the next frame. Multiple calls before
    /// the next paint are coalesced.
    fn update(&mut self) {
        self.widget_base_mut().update();
    }

    /// Request a partial repaint of a specific region.
    ///
    /// This schedules a repaint of only the specified region for the next frame.
    /// The region is in widget-local coordinates.
    fn update_rect(&mut self, rect: Rect) {
        self.widget_base_mut().update_rect(rect);
    }

    /// Check if the widget needs to be repainted.
    fn needs_repaint(&self) -> bool {
        self.widget_base().needs_repaint()
    }

    /// Get the dirty region that needs repainting.
    ///
    /// Returns `None` if no repaint is needed, or `Some(rect)` with the
    /// region in widget-local coordinates that needs repainting.
    fn dirty_region(&self) -> Option<Rect> {
        self.widget_base().dirty_region()
    }
}

/// Extension trait for converting to `&dyn Widget`.
pub trait AsWidget {
    /// Get a reference to self as a widget.
    fn as_widget(&self) -> &dyn Widget;
    /// Get a mutable reference to self as a widget.
    fn as_widget_mut(&mut self) -> &mut dyn Widget;
}

impl<W: Widget> AsWidget for W {
    fn as_widget(&self) -> &dyn Widget {
        self
    }

    fn as_widget_mut(&mut self) -> &mut dyn Widget {
        self
    }
}
