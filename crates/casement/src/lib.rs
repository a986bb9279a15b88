//! Casement - window chrome drawn with widgets.
//!
//! Casement builds top-level windows that carry no OS decoration at all:
//! the title bar, caption buttons, resize edges, and modal dialogs are
//! widgets painted by the application, while the underlying native window
//! (via winit) contributes only the operations the OS must perform, such as
//! the interactive move and resize loops.
//!
//! The layers, bottom up:
//!
//! - [`geometry`] and [`paint`]: points, rects, colors, and the [`Painter`]
//!   trait the host implements with its renderer of choice.
//! - [`widget`]: the widget tree, box layouts, focus, and event dispatch,
//!   built on the object model from `casement_core` (re-exported here).
//! - [`window`]: the undecorated native window bridge.
//! - [`chrome`]: [`FramelessWindow`] and [`FramelessDialog`], which tie the
//!   layers together.
//!
//! # Example
//!
//! ```ignore
//! use casement::chrome::{FramelessWindow, TitleBar};
//! use casement::init_global_registry;
//!
//! init_global_registry();
//!
//! // Inside an ApplicationHandler, typically in `resumed()`:
//! let mut window = FramelessWindow::new(event_loop, "My App", None)?;
//! window.set_title_bar(TitleBar::new());
//! window.add_widget(my_content);
//! window.show();
//!
//! // For every winit event carrying this window's id:
//! window.handle_window_event(&event);
//!
//! // On RedrawRequested, paint with your renderer:
//! window.render(&mut my_painter);
//! ```
//!
//! [`Painter`]: paint::Painter
//! [`FramelessWindow`]: chrome::FramelessWindow
//! [`FramelessDialog`]: chrome::FramelessDialog

pub mod chrome;
pub mod geometry;
pub mod paint;
pub mod platform;
pub mod widget;
pub mod window;

pub use casement_core::*;
