//! Widget system for Casement.
//!
//! This module provides the widget architecture the chrome is built on:
//!
//! - [`Widget`] trait: The base trait for all chrome elements
//! - [`WidgetBase`]: Common implementation for widget functionality
//! - Size hints and policies for layout negotiation
//! - Widget events for input handling and lifecycle
//!
//! # Overview
//!
//! Title bars, window buttons, and dialog content are ordinary widgets.
//! Each widget implements the [`Widget`] trait and contains a
//! [`WidgetBase`] that handles common functionality; the [`WidgetStore`]
//! owns the widgets and resolves the parent/child tree.
//!
//! # Creating a Widget
//!
//! To create a custom widget:
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `Widget` trait
//! 3. Provide `size_hint()` for layout
//! 4. Implement `paint()` for rendering
//!
//! ```ignore
//! use casement::widget::*;
//! use casement::geometry::Color;
//! use casement::paint::PaintContext;
//!
//! struct CloseGlyph {
//!     base: WidgetBase,
//! }
//!
//! impl CloseGlyph {
//!     pub fn new() -> Self {
//!         let mut widget = Self {
//!             base: WidgetBase::new::<Self>(),
//!         };
//!         widget.base.set_focus_policy(FocusPolicy::NoFocus);
//!         widget
//!     }
//! }
//!
//! impl Widget for CloseGlyph {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn size_hint(&self) -> SizeHint {
//!         SizeHint::fixed_dimensions(36.0, 28.0)
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let color = if self.base.is_hovered() {
//!             Color::from_rgb8(196, 43, 28)
//!         } else {
//!             Color::TRANSPARENT
//!         };
//!         let rect = ctx.rect();
//!         ctx.painter().fill_rect(rect, color);
//!     }
//!
//!     fn event(&mut self, event: &mut WidgetEvent) -> bool {
//!         match event {
//!             WidgetEvent::MouseRelease(_) => {
//!                 // request window close
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//! }
//! ```
//!
//! # Coordinate Systems
//!
//! Widgets use multiple coordinate systems:
//!
//! - **Local coordinates**: Origin at widget's top-left corner
//! - **Parent coordinates**: Relative to parent widget's top-left
//! - **Window coordinates**: Relative to window's top-left
//!
//! Use [`Widget::map_to_parent`] and [`Widget::map_from_parent`] to convert
//! between local and parent coordinates; [`EventDispatcher::window_to_local`]
//! walks the full ancestor chain.
//!
//! # Size Policies
//!
//! Size policies control how widgets behave during layout:
//!
//! - [`SizePolicy::Fixed`]: Cannot grow or shrink
//! - [`SizePolicy::Preferred`]: Can grow/shrink but has a preferred size
//! - [`SizePolicy::Expanding`]: Actively wants more space
//!
//! ```ignore
//! use casement::widget::{SizePolicy, SizePolicyPair, Widget};
//!
//! widget.set_size_policy(SizePolicyPair::new(
//!     SizePolicy::Expanding,  // horizontal
//!     SizePolicy::Fixed,      // vertical
//! ));
//! ```

mod base;
pub mod cursor;
mod dispatcher;
mod events;
mod focus;
mod geometry;
pub mod keyboard;
pub mod layout;
mod modal;
pub mod mouse;
mod painting;
mod store;
mod traits;


pub use base::{FocusPolicy, WidgetBase};
pub use cursor::CursorShape;
pub use dispatcher::{DispatchResult, EventDispatcher, WidgetAccess};
pub use events::{
    CloseEvent, EnterEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, HideEvent, Key,
    KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, LeaveEvent, MouseButton,
    MouseDoubleClickEvent, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, MoveEvent,
    PaintEvent, ResizeEvent, ShowEvent, WidgetEvent,
};
pub use focus::FocusManager;
pub use geometry::{SizeHint, SizePolicy, SizePolicyPair};
pub use keyboard::{KeyboardEvent, KeyboardInputHandler};
pub use layout::{
    Alignment, BoxLayout, ContentMargins, LayoutItem, Orientation, SpacerItem, SpacerType,
};
pub use modal::{ModalManager, WindowModality};
pub use mouse::{MouseEvent, MouseInputHandler};
pub use painting::{FrameRenderer, FrameStats, RepaintManager};
pub use store::WidgetStore;
pub use traits::{AsWidget, Widget};
