//! Widget-specific event types.
//!
//! This module defines events that are specific to the widget system,
//! including paint events, resize events, mouse events, keyboard events,
//! and window close requests.
//!
//! # Accept / Ignore
//!
//! Every event carries an [`EventBase`] with an accepted flag. Handlers call
//! `accept()` to stop propagation or `ignore()` to let the event continue.
//! [`CloseEvent`] inverts the convention: it starts accepted, and a handler
//! calls `ignore()` to veto the close.

use crate::geometry::{Point, Rect, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

/// Common data for all widget events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Paint event, sent when a widget needs to be repainted.
#[derive(Debug, Clone)]
pub struct PaintEvent {
    /// Base event data.
    pub base: EventBase,
    /// The region that needs to be repainted (in widget-local coordinates).
    pub rect: Rect,
}

impl PaintEvent {
    /// Create a new paint event for the given region.
    pub fn new(rect: Rect) -> Self {
        Self {
            base: EventBase::new(),
            rect,
        }
    }

    /// Create a paint event for the entire widget area.
    pub fn full(size: Size) -> Self {
        Self::new(Rect::new(0.0, 0.0, size.width, size.height))
    }
}

/// Resize event, sent when a widget's size changes.
#[derive(Debug, Clone, Copy)]
pub struct ResizeEvent {
    /// Base event data.
    pub base: EventBase,
    /// The old size of the widget.
    pub old_size: Size,
    /// The new size of the widget.
    pub new_size: Size,
}

impl ResizeEvent {
    /// Create a new resize event.
    pub fn new(old_size: Size, new_size: Size) -> Self {
        Self {
            base: EventBase::new(),
            old_size,
            new_size,
        }
    }
}

/// Move event, sent when a widget's position changes.
#[derive(Debug, Clone, Copy)]
pub struct MoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// The old position of the widget (relative to parent).
    pub old_pos: Point,
    /// The new position of the widget (relative to parent).
    pub new_pos: Point,
}

impl MoveEvent {
    /// Create a new move event.
    pub fn new(old_pos: Point, new_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            old_pos,
            new_pos,
        }
    }
}

/// Show event, sent when a widget becomes visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowEvent {
    /// Base event data.
    pub base: EventBase,
}

impl ShowEvent {
    /// Create a new show event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hide event, sent when a widget becomes hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct HideEvent {
    /// Base event data.
    pub base: EventBase,
}

impl HideEvent {
    /// Create a new hide event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Close request event, sent when the window manager asks a window to close.
///
/// Unlike other events this one starts out accepted: doing nothing lets the
/// close proceed. A handler that wants to keep the window open (for example
/// an unsaved-changes prompt) calls `ignore()` to veto the close.
#[derive(Debug, Clone, Copy)]
pub struct CloseEvent {
    /// Base event data.
    pub base: EventBase,
}

impl CloseEvent {
    /// Create a new close event, initially accepted.
    pub fn new() -> Self {
        let mut base = EventBase::new();
        base.accept();
        Self { base }
    }
}

impl Default for CloseEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse double-click event.
#[derive(Debug, Clone, Copy)]
pub struct MouseDoubleClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was double-clicked.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseDoubleClickEvent {
    /// Create a new mouse double-click event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse move event.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Mouse buttons currently held.
    pub buttons: u8,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(
        local_pos: Point,
        window_pos: Point,
        buttons: u8,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            window_pos,
            buttons,
            modifiers,
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons & (1 << button as u8)) != 0
    }
}

/// Enter event, sent when the mouse enters the widget area.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// The position where the mouse entered.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Leave event, sent when the mouse leaves the widget area.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Focus in event, sent when the widget gains keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Focus out event, sent when the widget loses keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Logical keyboard keys the chrome cares about.
///
/// The set is deliberately small: navigation, editing, and modifier keys that
/// window chrome and dialogs respond to. Everything else maps to
/// [`Key::Unknown`] with the character's code point, which widgets can still
/// match on if they need to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Either Shift key.
    Shift,
    /// Either Control key.
    Control,
    /// Either Alt key.
    Alt,
    /// Either Meta/Super key.
    Meta,
    /// Any other key, identified by a truncated code point.
    Unknown(u16),
}

impl Key {
    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For printable keys, this contains the character that would be typed.
    /// For non-printable keys (modifiers, function keys, etc.), this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(
        key: Key,
        modifiers: KeyboardModifiers,
        text: impl Into<String>,
        is_repeat: bool,
    ) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }
}

/// Key release event, sent when a key is released.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

/// Enumeration of all widget event types.
///
/// This allows passing events through a unified interface while preserving
/// type information for event handlers.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Paint event.
    Paint(PaintEvent),
    /// Resize event.
    Resize(ResizeEvent),
    /// Move event.
    Move(MoveEvent),
    /// Show event.
    Show(ShowEvent),
    /// Hide event.
    Hide(HideEvent),
    /// Close request event.
    Close(CloseEvent),
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse double-click event.
    DoubleClick(MouseDoubleClickEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Mouse move event.
    MouseMove(MouseMoveEvent),
    /// Mouse enter event.
    Enter(EnterEvent),
    /// Mouse leave event.
    Leave(LeaveEvent),
    /// Focus in event.
    FocusIn(FocusInEvent),
    /// Focus out event.
    FocusOut(FocusOutEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
    /// Key release event.
    KeyRelease(KeyReleaseEvent),
}

impl WidgetEvent {
    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::Paint(e) => e.base.is_accepted(),
            Self::Resize(e) => e.base.is_accepted(),
            Self::Move(e) => e.base.is_accepted(),
            Self::Show(e) => e.base.is_accepted(),
            Self::Hide(e) => e.base.is_accepted(),
            Self::Close(e) => e.base.is_accepted(),
            Self::MousePress(e) => e.base.is_accepted(),
            Self::DoubleClick(e) => e.base.is_accepted(),
            Self::MouseRelease(e) => e.base.is_accepted(),
            Self::MouseMove(e) => e.base.is_accepted(),
            Self::Enter(e) => e.base.is_accepted(),
            Self::Leave(e) => e.base.is_accepted(),
            Self::FocusIn(e) => e.base.is_accepted(),
            Self::FocusOut(e) => e.base.is_accepted(),
            Self::KeyPress(e) => e.base.is_accepted(),
            Self::KeyRelease(e) => e.base.is_accepted(),
        }
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        match self {
            Self::Paint(e) => e.base.accept(),
            Self::Resize(e) => e.base.accept(),
            Self::Move(e) => e.base.accept(),
            Self::Show(e) => e.base.accept(),
            Self::Hide(e) => e.base.accept(),
            Self::Close(e) => e.base.accept(),
            Self::MousePress(e) => e.base.accept(),
            Self::DoubleClick(e) => e.base.accept(),
            Self::MouseRelease(e) => e.base.accept(),
            Self::MouseMove(e) => e.base.accept(),
            Self::Enter(e) => e.base.accept(),
            Self::Leave(e) => e.base.accept(),
            Self::FocusIn(e) => e.base.accept(),
            Self::FocusOut(e) => e.base.accept(),
            Self::KeyPress(e) => e.base.accept(),
            Self::KeyRelease(e) => e.base.accept(),
        }
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        match self {
            Self::Paint(e) => e.base.ignore(),
            Self::Resize(e) => e.base.ignore(),
            Self::Move(e) => e.base.ignore(),
            Self::Show(e) => e.base.ignore(),
            Self::Hide(e) => e.base.ignore(),
            Self::Close(e) => e.base.ignore(),
            Self::MousePress(e) => e.base.ignore(),
            Self::DoubleClick(e) => e.base.ignore(),
            Self::MouseRelease(e) => e.base.ignore(),
            Self::MouseMove(e) => e.base.ignore(),
            Self::Enter(e) => e.base.ignore(),
            Self::Leave(e) => e.base.ignore(),
            Self::FocusIn(e) => e.base.ignore(),
            Self::FocusOut(e) => e.base.ignore(),
            Self::KeyPress(e) => e.base.ignore(),
            Self::KeyRelease(e) => e.base.ignore(),
        }
    }

    /// Check if this event should propagate to parent widgets.
    ///
    /// Some events (like paint, resize, show, hide) are specific to a widget
    /// and should not propagate. Input events typically propagate if not accepted.
    pub fn should_propagate(&self) -> bool {
        match self {
            // These events are widget-specific and don't propagate
            Self::Paint(_) | Self::Resize(_) | Self::Move(_) | Self::Show(_) | Self::Hide(_) => {
                false
            }
            // Close requests are delivered to the window root only
            Self::Close(_) => false,
            // Input events propagate if not accepted
            Self::MousePress(_)
            | Self::DoubleClick(_)
            | Self::MouseRelease(_)
            | Self::MouseMove(_)
            | Self::KeyPress(_)
            | Self::KeyRelease(_) => !self.is_accepted(),
            // Focus events don't propagate
            Self::FocusIn(_) | Self::FocusOut(_) => false,
            // Enter/Leave are about the specific widget and don't propagate
            Self::Enter(_) | Self::Leave(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_event_starts_accepted() {
        let mut event = WidgetEvent::Close(CloseEvent::new());
        assert!(event.is_accepted());

        event.ignore();
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_input_events_propagate_until_accepted() {
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            KeyboardModifiers::NONE,
        ));
        assert!(event.should_propagate());

        event.accept();
        assert!(!event.should_propagate());
    }

    #[test]
    fn test_lifecycle_events_never_propagate() {
        let paint = WidgetEvent::Paint(PaintEvent::full(Size::new(10.0, 10.0)));
        let close = WidgetEvent::Close(CloseEvent::new());
        let focus = WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Tab));

        assert!(!paint.should_propagate());
        assert!(!close.should_propagate());
        assert!(!focus.should_propagate());
    }

    #[test]
    fn test_mouse_move_button_mask() {
        let buttons = (1 << MouseButton::Left as u8) | (1 << MouseButton::Middle as u8);
        let event = MouseMoveEvent::new(
            Point::ZERO,
            Point::ZERO,
            buttons,
            KeyboardModifiers::NONE,
        );

        assert!(event.is_button_pressed(MouseButton::Left));
        assert!(event.is_button_pressed(MouseButton::Middle));
        assert!(!event.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_key_classification() {
        assert!(Key::Shift.is_modifier());
        assert!(!Key::Escape.is_modifier());
        assert!(Key::ArrowLeft.is_navigation());
        assert!(!Key::Tab.is_navigation());
    }
}
