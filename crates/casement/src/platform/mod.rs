//! Platform services.
//!
//! Cross-platform abstractions for the small amount of system integration
//! the chrome needs beyond the window bridge. Today that is the taskbar
//! grouping identity; everything here is best effort and never surfaces an
//! error to chrome callers.
//!
//! # Taskbar grouping
//!
//! ```
//! use casement::platform::{apply_grouping_identity, grouping_identity};
//!
//! let id = grouping_identity("casement", "Crash Reporter");
//! assert_eq!(id, "com.casement.crashreporter");
//!
//! // Applies on Windows, logs-and-ignores elsewhere.
//! apply_grouping_identity(&id);
//! ```

mod app_identity;

pub use app_identity::{apply_grouping_identity, grouping_identity};
