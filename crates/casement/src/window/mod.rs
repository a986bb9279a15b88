//! Native window bridge.
//!
//! This module connects the casement chrome to the underlying windowing
//! system (winit). Every window it creates is undecorated; the chrome layer
//! supplies the frame, title bar, and resize behavior, and reaches back
//! through [`NativeWindow`] for the operations only the OS can perform: the
//! interactive move and resize loops and minimize/maximize state changes.
//!
//! # Creating a window
//!
//! ```ignore
//! use casement::window::{NativeWindow, WindowConfig, WindowIcon};
//!
//! let config = WindowConfig::new("My App")
//!     .with_size(1100, 700)
//!     .with_icon(WindowIcon::from_path("assets/app.png")?);
//!
//! // Inside the event loop, typically in `resumed()`:
//! let window = NativeWindow::create(event_loop, config)?;
//! window.request_redraw();
//! ```

mod native_window;
mod window_config;
mod window_icon;

pub use native_window::{NativeWindow, NativeWindowError, NativeWindowId};
pub use window_config::WindowConfig;
pub use window_icon::{IconError, WindowIcon};
