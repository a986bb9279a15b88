//! Widget-drawn window chrome.
//!
//! The chrome layer assembles undecorated native windows and the widgets
//! that stand in for the OS decoration. [`FramelessWindow`] is the
//! top-level entry point: it stacks an optional [`TitleBar`] above the
//! host's content on a dark chrome surface, tracks the pointer against the
//! resize margins ([`EdgeSet`]), and turns caption button clicks into
//! native minimize, maximize, close, and move operations.
//!
//! [`FramelessDialog`] reuses the same surface for application-modal
//! dialogs with blocking `exec` semantics; [`DialogHost`] is the seam
//! through which a dialog centers over and temporarily disables its parent
//! window.
//!
//! # Putting a window together
//!
//! ```ignore
//! use casement::chrome::{FramelessWindow, TitleBar};
//!
//! // Inside the event loop, typically in `resumed()`:
//! let mut window = FramelessWindow::new(event_loop, "My App", None)?;
//! window.set_title_bar(TitleBar::new());
//! window.add_widget(my_content);
//! window.show();
//! ```

mod dialog;
mod frameless_window;
mod resize_edge;
mod surface;
mod title_bar;

pub use dialog::{DialogCode, DialogHandle, DialogHost, FramelessDialog};
pub use frameless_window::FramelessWindow;
pub use resize_edge::{EdgeSet, RESIZE_MARGIN};
pub use title_bar::{CaptionButton, TitleBar};
