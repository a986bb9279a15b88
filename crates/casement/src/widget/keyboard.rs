//! Keyboard input handling and conversion from platform events.
//!
//! Translates winit keyboard events into Casement widget events. The main
//! entry point is [`KeyboardInputHandler`], which tracks modifier state
//! across events and converts raw key events into [`KeyPressEvent`] and
//! [`KeyReleaseEvent`].
//!
//! ```ignore
//! use casement::widget::keyboard::KeyboardInputHandler;
//!
//! let mut handler = KeyboardInputHandler::new();
//!
//! // When receiving a winit keyboard event:
//! let event = handler.process_key_event(&key_event.logical_key, key_event.state, None, false);
//! // Dispatch event.into_widget_event() to the focused widget.
//! ```

use winit::event::{ElementState, Modifiers};
use winit::keyboard::{Key as WinitKey, NamedKey};

use super::events::{Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, WidgetEvent};

/// Converts a winit logical key to a Casement [`Key`].
///
/// Named keys map to their counterparts; character keys go through
/// [`from_character`]. Dead and unidentified keys become `Key::Unknown(0)`.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) => Key::Unknown(0),
        WinitKey::Dead(_) => Key::Unknown(0),
    }
}

/// Converts a winit named key to a Casement [`Key`].
fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        // Navigation
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,

        // Editing
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Escape => Key::Escape,

        // Modifiers. Winit reports left/right variants through the physical
        // key; the logical named key is side-agnostic, which is all the
        // focus and shortcut machinery needs.
        NamedKey::Shift => Key::Shift,
        NamedKey::Control => Key::Control,
        NamedKey::Alt => Key::Alt,
        NamedKey::Super => Key::Meta,

        _ => Key::Unknown(0),
    }
}

/// Converts a character string to a Casement [`Key`].
///
/// Only the space character has a named key; other single characters carry
/// their code point in `Key::Unknown` so text handling still sees them.
fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Key::Unknown(0);
    };

    match ch {
        ' ' => Key::Space,
        _ => Key::Unknown(ch as u16),
    }
}

/// Converts winit modifiers to Casement [`KeyboardModifiers`].
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Handler for keyboard input that maintains modifier state.
///
/// Provides a stateful interface for converting winit keyboard events into
/// widget events, tracking modifier key state across events.
#[derive(Debug, Default)]
pub struct KeyboardInputHandler {
    /// Current modifier key state.
    modifiers: KeyboardModifiers,
}

impl KeyboardInputHandler {
    /// Creates a new keyboard input handler with no modifiers pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the current modifier key state.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Updates the modifier state from a winit Modifiers event.
    pub fn update_modifiers(&mut self, modifiers: &Modifiers) {
        self.modifiers = from_winit_modifiers(modifiers);
    }

    /// Creates a [`KeyPressEvent`] from winit keyboard event data.
    ///
    /// # Arguments
    ///
    /// * `logical_key` - The logical key that was pressed
    /// * `text` - The text generated by this key press (if any)
    /// * `is_repeat` - Whether this is an auto-repeat event
    pub fn create_key_press_event(
        &self,
        logical_key: &WinitKey,
        text: Option<&str>,
        is_repeat: bool,
    ) -> KeyPressEvent {
        let key = from_winit_key(logical_key);
        KeyPressEvent::new(key, self.modifiers, text.unwrap_or(""), is_repeat)
    }

    /// Creates a [`KeyReleaseEvent`] from winit keyboard event data.
    pub fn create_key_release_event(&self, logical_key: &WinitKey) -> KeyReleaseEvent {
        let key = from_winit_key(logical_key);
        KeyReleaseEvent::new(key, self.modifiers)
    }

    /// Processes a winit keyboard event and returns the appropriate widget event.
    ///
    /// # Arguments
    ///
    /// * `logical_key` - The logical key from the event
    /// * `state` - Whether the key was pressed or released
    /// * `text` - The text generated (for press events)
    /// * `is_repeat` - Whether this is an auto-repeat
    pub fn process_key_event(
        &self,
        logical_key: &WinitKey,
        state: ElementState,
        text: Option<&str>,
        is_repeat: bool,
    ) -> KeyboardEvent {
        match state {
            ElementState::Pressed => {
                KeyboardEvent::Press(self.create_key_press_event(logical_key, text, is_repeat))
            }
            ElementState::Released => {
                KeyboardEvent::Release(self.create_key_release_event(logical_key))
            }
        }
    }
}

/// A keyboard event that can be either a press or release.
#[derive(Debug, Clone)]
pub enum KeyboardEvent {
    /// A key was pressed.
    Press(KeyPressEvent),
    /// A key was released.
    Release(KeyReleaseEvent),
}

impl KeyboardEvent {
    /// Converts this keyboard event into a [`WidgetEvent`].
    pub fn into_widget_event(self) -> WidgetEvent {
        match self {
            KeyboardEvent::Press(e) => WidgetEvent::KeyPress(e),
            KeyboardEvent::Release(e) => WidgetEvent::KeyRelease(e),
        }
    }
}
