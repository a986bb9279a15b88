//! Core systems for Casement.
//!
//! This crate provides the foundational components of the Casement window
//! chrome toolkit:
//!
//! - **Object Model**: Parent-child ownership, naming, identity by id
//! - **Signal/Slot System**: Type-safe inter-object communication
//! - **Diagnostics**: Structured logging targets and object tree dumps
//!
//! # Signal/Slot Example
//!
//! ```
//! use casement_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Model Example
//!
//! ```
//! use casement_core::{init_global_registry, Object, ObjectBase, ObjectId};
//!
//! struct Panel {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Panel {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! init_global_registry();
//!
//! let parent = Panel { base: ObjectBase::new::<Panel>() };
//! let child = Panel { base: ObjectBase::new::<Panel>() };
//! child.base.set_parent(Some(parent.base.id()))?;
//!
//! assert_eq!(parent.base.children(), vec![child.base.id()]);
//! # Ok::<(), casement_core::ObjectError>(())
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::{ObjectTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult, SharedObjectRegistry,
    WidgetState, global_registry, init_global_registry, object_cast, object_cast_mut,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
