//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common implementation details
//! for all widgets. It handles geometry, visibility, enabled state, focus
//! policy, and coordinates with the object system.

use casement_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal, global_registry};

use crate::geometry::{Point, Rect, Size};

use super::cursor::CursorShape;
use super::geometry::{SizePolicy, SizePolicyPair};

/// Focus policy determines how a widget can receive keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusPolicy {
    /// The widget never receives keyboard focus.
    #[default]
    NoFocus,
    /// The widget receives focus when clicked, but is skipped by Tab.
    ClickFocus,
    /// The widget is reachable via Tab, but clicking does not focus it.
    TabFocus,
    /// The widget receives focus both from clicks and from Tab.
    StrongFocus,
}

impl FocusPolicy {
    /// Check if the policy accepts focus via the Tab key.
    #[inline]
    pub fn accepts_tab_focus(self) -> bool {
        matches!(self, Self::TabFocus | Self::StrongFocus)
    }

    /// Check if the policy accepts focus via mouse clicks.
    #[inline]
    pub fn accepts_click_focus(self) -> bool {
        matches!(self, Self::ClickFocus | Self::StrongFocus)
    }
}

/// The base implementation for all widgets.
///
/// This struct provides common functionality that all widgets need:
/// - Object system integration (ID, parent-child relationships)
/// - Geometry management (position, size)
/// - Size hints and policies for layout
/// - Visibility and enabled state
/// - Focus policy and focus/hover/pressed state
/// - Coordinate mapping
///
/// Widget implementations typically include this as a field and delegate
/// common operations to it.
///
/// # Example
///
/// ```ignore
/// use casement::widget::{Widget, WidgetBase, SizeHint};
///
/// struct MyButton {
///     base: WidgetBase,
///     label: String,
/// }
///
/// impl Widget for MyButton {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn size_hint(&self) -> SizeHint {
///         SizeHint::from_dimensions(100.0, 30.0)
///     }
///
///     // ... other methods
/// }
/// ```
pub struct WidgetBase {
    /// The underlying object base for Object trait implementation.
    object_base: ObjectBase,

    /// The widget's geometry (position relative to parent and size).
    geometry: Rect,

    /// The widget's size policy for layout.
    size_policy: SizePolicyPair,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget is enabled (can receive input).
    enabled: bool,

    /// How the widget receives keyboard focus.
    focus_policy: FocusPolicy,

    /// Whether the widget currently has focus.
    focused: bool,

    /// Whether the mouse is currently over this widget.
    hovered: bool,

    /// Whether a mouse button is currently pressed on this widget.
    pressed: bool,

    /// Whether the widget paints every pixel of its rectangle.
    opaque: bool,

    /// Whether the widget needs to be repainted.
    needs_repaint: bool,

    /// The dirty region in local coordinates. `None` with `needs_repaint`
    /// set means the whole widget is dirty.
    dirty_rect: Option<Rect>,

    /// The cursor to show while the pointer is over this widget.
    ///
    /// `None` means the widget inherits the window's default cursor.
    cursor: Option<CursorShape>,

    /// Objects that filter this widget's events, most recently installed last.
    event_filters: Vec<ObjectId>,

    /// Signal emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,

    /// Signal emitted when visibility changes.
    pub visible_changed: Signal<bool>,

    /// Signal emitted when enabled state changes.
    pub enabled_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a new widget base.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let object_base = ObjectBase::new::<T>();

        // Record the widget's initial state with the registry so that
        // hierarchy queries and tree dumps see it as a widget.
        if let Ok(registry) = global_registry() {
            let _ = registry.set_widget_visible(object_base.id(), true);
            let _ = registry.set_widget_enabled(object_base.id(), true);
        }

        Self {
            object_base,
            geometry: Rect::ZERO,
            size_policy: SizePolicyPair::default(),
            visible: true,
            enabled: true,
            focus_policy: FocusPolicy::NoFocus,
            focused: false,
            hovered: false,
            pressed: false,
            opaque: false,
            needs_repaint: true,
            dirty_rect: None,
            cursor: None,
            event_filters: Vec::new(),
            geometry_changed: Signal::new(),
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Get the widget's name.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Get the parent widget's object ID.
    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Set the parent widget.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object_base.set_parent(parent)
    }

    /// Get the IDs of child widgets.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    /// Move this widget to the top of its parent's stacking order.
    pub fn raise(&self) -> ObjectResult<()> {
        self.object_base.raise()
    }

    /// Move this widget to the bottom of its parent's stacking order.
    pub fn lower(&self) -> ObjectResult<()> {
        self.object_base.lower()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    ///
    /// This will emit `geometry_changed` if the geometry actually changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.update();
            self.geometry_changed.emit(rect);
        }
    }

    /// Get the widget's position relative to its parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Set the widget's position relative to its parent.
    pub fn set_pos(&mut self, pos: Point) {
        if self.geometry.origin != pos {
            let new_geometry = Rect {
                origin: pos,
                size: self.geometry.size,
            };
            self.geometry = new_geometry;
            self.geometry_changed.emit(new_geometry);
        }
    }

    /// Move the widget to the specified position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.set_pos(Point::new(x, y));
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Set the widget's size.
    pub fn set_size(&mut self, size: Size) {
        if self.geometry.size != size {
            let new_geometry = Rect {
                origin: self.geometry.origin,
                size,
            };
            self.geometry = new_geometry;
            self.update();
            self.geometry_changed.emit(new_geometry);
        }
    }

    /// Resize the widget.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_size(Size::new(width, height));
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.size.width
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.geometry.size.height
    }

    /// Get a rectangle representing the widget's local coordinate space.
    ///
    /// This is always positioned at (0, 0) with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height)
    }

    // =========================================================================
    // Size Policy
    // =========================================================================

    /// Get the widget's size policy.
    #[inline]
    pub fn size_policy(&self) -> SizePolicyPair {
        self.size_policy
    }

    /// Set the widget's size policy.
    pub fn set_size_policy(&mut self, policy: SizePolicyPair) {
        self.size_policy = policy;
    }

    /// Set horizontal size policy.
    pub fn set_horizontal_policy(&mut self, policy: SizePolicy) {
        self.size_policy.horizontal = policy;
    }

    /// Set vertical size policy.
    pub fn set_vertical_policy(&mut self, policy: SizePolicy) {
        self.size_policy.vertical = policy;
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the widget is visible.
    ///
    /// Note: A widget may be visible but still not shown on screen if an
    /// ancestor is hidden. Use [`Self::is_effectively_visible`] for the
    /// combined answer.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the widget is visible.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.update();
            if let Ok(registry) = global_registry() {
                let _ = registry.set_widget_visible(self.object_id(), visible);
            }
            self.visible_changed.emit(visible);
        }
    }

    /// Show the widget.
    pub fn show(&mut self) {
        self.set_visible(true);
    }

    /// Hide the widget.
    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Check if the widget and all its ancestors are visible.
    pub fn is_effectively_visible(&self) -> bool {
        let Ok(registry) = global_registry() else {
            return self.visible;
        };
        match registry.is_effectively_visible(self.object_id()) {
            Ok(Some(effective)) => effective,
            _ => self.visible,
        }
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Check if the widget is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set whether the widget is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.update();
            if let Ok(registry) = global_registry() {
                let _ = registry.set_widget_enabled(self.object_id(), enabled);
            }
            self.enabled_changed.emit(enabled);
        }
    }

    /// Enable the widget.
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Disable the widget.
    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    /// Check if the widget and all its ancestors are enabled.
    pub fn is_effectively_enabled(&self) -> bool {
        let Ok(registry) = global_registry() else {
            return self.enabled;
        };
        match registry.is_effectively_enabled(self.object_id()) {
            Ok(Some(effective)) => effective,
            _ => self.enabled,
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Get the widget's focus policy.
    #[inline]
    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    /// Set the widget's focus policy.
    pub fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.focus_policy = policy;
    }

    /// Check if the widget can receive keyboard focus right now.
    ///
    /// Requires a focus policy other than `NoFocus` plus the widget being
    /// visible and enabled.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focus_policy != FocusPolicy::NoFocus && self.enabled && self.visible
    }

    /// Check if the widget currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the focused state (used by the focus management system).
    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.update();
        }
    }

    // =========================================================================
    // Hover and Pressed State
    // =========================================================================

    /// Check if the mouse is currently over this widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (used by the event system).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.update();
        }
    }

    /// Check if a mouse button is currently pressed on this widget.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the pressed state (used by the event system).
    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.update();
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Get the cursor shown while the pointer is over this widget.
    #[inline]
    pub fn cursor(&self) -> Option<CursorShape> {
        self.cursor
    }

    /// Set the cursor shown while the pointer is over this widget.
    pub fn set_cursor(&mut self, cursor: Option<CursorShape>) {
        self.cursor = cursor;
    }

    // =========================================================================
    // Event Filters
    // =========================================================================

    /// Install an event filter on this widget.
    ///
    /// The filter object will be offered this widget's events before the
    /// widget itself sees them. Filters are consulted in reverse installation
    /// order, so the most recently installed filter runs first.
    pub fn install_event_filter(&mut self, filter_id: ObjectId) {
        if !self.event_filters.contains(&filter_id) {
            self.event_filters.push(filter_id);
        }
    }

    /// Remove an event filter from this widget.
    pub fn remove_event_filter(&mut self, filter_id: ObjectId) {
        self.event_filters.retain(|id| *id != filter_id);
    }

    /// Get the installed event filters, oldest first.
    pub fn event_filters(&self) -> &[ObjectId] {
        &self.event_filters
    }

    /// Remove all event filters.
    pub fn clear_event_filters(&mut self) {
        self.event_filters.clear();
    }

    // =========================================================================
    // Opacity
    // =========================================================================

    /// Check if the widget paints every pixel of its rectangle.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Set whether the widget paints every pixel of its rectangle.
    pub fn set_opaque(&mut self, opaque: bool) {
        self.opaque = opaque;
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Check if the widget needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint of the whole widget.
    pub fn update(&mut self) {
        self.needs_repaint = true;
        self.dirty_rect = None;
    }

    /// Request a repaint of a region in local coordinates.
    ///
    /// Regions from repeated calls are unioned. If a full repaint is already
    /// pending, the region request is absorbed by it.
    pub fn update_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if self.needs_repaint && self.dirty_rect.is_none() {
            // Full repaint already pending.
            return;
        }
        self.dirty_rect = Some(match self.dirty_rect {
            Some(existing) => existing.union(&rect),
            None => rect,
        });
        self.needs_repaint = true;
    }

    /// Get the dirty region that needs repainting, in local coordinates.
    ///
    /// Returns `None` when no repaint is pending.
    pub fn dirty_region(&self) -> Option<Rect> {
        if !self.needs_repaint {
            return None;
        }
        Some(self.dirty_rect.unwrap_or_else(|| self.rect()))
    }

    /// Clear the repaint flag (called after painting).
    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
        self.dirty_rect = None;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from widget-local coordinates to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        Point::new(
            point.x + self.geometry.origin.x,
            point.y + self.geometry.origin.y,
        )
    }

    /// Map a point from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        Point::new(
            point.x - self.geometry.origin.x,
            point.y - self.geometry.origin.y,
        )
    }

    /// Map a rectangle from widget-local coordinates to parent coordinates.
    #[inline]
    pub fn map_rect_to_parent(&self, rect: Rect) -> Rect {
        Rect {
            origin: self.map_to_parent(rect.origin),
            size: rect.size,
        }
    }

    /// Map a rectangle from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_rect_from_parent(&self, rect: Rect) -> Rect {
        Rect {
            origin: self.map_from_parent(rect.origin),
            size: rect.size,
        }
    }

    /// Check if a point (in local coordinates) is inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

// WidgetBase doesn't implement Drop because ObjectBase handles cleanup.

#[cfg(test)]
mod tests {
    use super::*;
    use casement_core::init_global_registry;

    struct TestWidget {
        base: WidgetBase,
    }

    impl TestWidget {
        fn new() -> Self {
            Self {
                base: WidgetBase::new::<Self>(),
            }
        }
    }

    impl Object for TestWidget {
        fn object_id(&self) -> ObjectId {
            self.base.object_id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_geometry_change_emits_signal() {
        setup();
        let mut widget = TestWidget::new();

        let received = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let received_clone = received.clone();
        widget.base.geometry_changed.connect(move |rect: &Rect| {
            received_clone.lock().push(*rect);
        });

        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        widget.base.set_geometry(rect);
        // Setting the same geometry again should not re-emit.
        widget.base.set_geometry(rect);

        let values = received.lock();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], rect);
    }

    #[test]
    fn test_visibility_syncs_registry() {
        setup();
        let mut widget = TestWidget::new();
        let id = widget.base.object_id();
        let registry = global_registry().expect("registry initialized");

        let state = registry.widget_state(id).expect("widget registered");
        assert_eq!(state.map(|s| s.visible), Some(true));

        widget.base.hide();
        let state = registry.widget_state(id).expect("widget registered");
        assert_eq!(state.map(|s| s.visible), Some(false));
        assert!(!widget.base.is_visible());

        widget.base.show();
        assert!(widget.base.is_visible());
    }

    #[test]
    fn test_effective_visibility_follows_parent() {
        setup();
        let mut parent = TestWidget::new();
        let child = TestWidget::new();
        child
            .base
            .set_parent(Some(parent.base.object_id()))
            .expect("set parent");

        assert!(child.base.is_effectively_visible());

        parent.base.hide();
        assert!(!child.base.is_effectively_visible());
        // The child's own flag is untouched.
        assert!(child.base.is_visible());
    }

    #[test]
    fn test_focus_policy_gates_focusable() {
        setup();
        let mut widget = TestWidget::new();

        assert!(!widget.base.is_focusable());

        widget.base.set_focus_policy(FocusPolicy::StrongFocus);
        assert!(widget.base.is_focusable());

        widget.base.set_enabled(false);
        assert!(!widget.base.is_focusable());

        widget.base.set_enabled(true);
        widget.base.set_visible(false);
        assert!(!widget.base.is_focusable());
    }

    #[test]
    fn test_focus_policy_kinds() {
        assert!(FocusPolicy::TabFocus.accepts_tab_focus());
        assert!(!FocusPolicy::TabFocus.accepts_click_focus());
        assert!(FocusPolicy::ClickFocus.accepts_click_focus());
        assert!(!FocusPolicy::ClickFocus.accepts_tab_focus());
        assert!(FocusPolicy::StrongFocus.accepts_tab_focus());
        assert!(FocusPolicy::StrongFocus.accepts_click_focus());
        assert!(!FocusPolicy::NoFocus.accepts_tab_focus());
    }

    #[test]
    fn test_event_filter_install_remove() {
        setup();
        let mut widget = TestWidget::new();
        let filter_a = TestWidget::new();
        let filter_b = TestWidget::new();

        widget.base.install_event_filter(filter_a.base.object_id());
        widget.base.install_event_filter(filter_b.base.object_id());
        // Duplicate installs are ignored.
        widget.base.install_event_filter(filter_a.base.object_id());

        assert_eq!(
            widget.base.event_filters(),
            &[filter_a.base.object_id(), filter_b.base.object_id()]
        );

        widget.base.remove_event_filter(filter_a.base.object_id());
        assert_eq!(widget.base.event_filters(), &[filter_b.base.object_id()]);

        widget.base.clear_event_filters();
        assert!(widget.base.event_filters().is_empty());
    }

    #[test]
    fn test_coordinate_mapping() {
        setup();
        let mut widget = TestWidget::new();
        widget.base.set_geometry(Rect::new(10.0, 20.0, 100.0, 50.0));

        let local = Point::new(5.0, 5.0);
        let in_parent = widget.base.map_to_parent(local);
        assert_eq!(in_parent, Point::new(15.0, 25.0));
        assert_eq!(widget.base.map_from_parent(in_parent), local);

        assert!(widget.base.contains_point(Point::new(99.0, 49.0)));
        assert!(!widget.base.contains_point(Point::new(100.0, 50.0)));
    }
}
