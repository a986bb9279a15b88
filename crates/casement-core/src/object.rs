//! Object model with parent/child ownership and identity.
//!
//! This module is the Rust equivalent of Qt's QObject layer. Every object
//! participating in the framework is registered in an [`ObjectRegistry`] and
//! addressed by a copyable [`ObjectId`] instead of a raw pointer. The registry
//! owns the tree structure (parents, children, z-order among siblings) while
//! the objects themselves live wherever the application puts them.
//!
//! # Identity
//!
//! [`ObjectId`] is a slotmap key: cheap to copy, safe to hold after the object
//! is destroyed (lookups simply fail), and unique for the lifetime of the
//! process.
//!
//! # The global registry
//!
//! Most applications use one process-wide registry. Call
//! [`init_global_registry`] once at startup, then create objects through
//! [`ObjectBase::new`]:
//!
//! ```
//! use casement_core::{init_global_registry, Object, ObjectBase, ObjectId};
//!
//! struct Counter {
//!     base: ObjectBase,
//!     value: i32,
//! }
//!
//! impl Object for Counter {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! init_global_registry();
//! let counter = Counter { base: ObjectBase::new::<Counter>(), value: 0 };
//! assert_eq!(counter.value, 0);
//! assert!(counter.base.parent().is_none());
//! ```

use std::any::{Any, TypeId};
use std::error::Error;
use std::fmt;

use parking_lot::{Mutex, RwLock};
use slotmap::{Key, KeyData, SlotMap, new_key_type};

new_key_type! {
    /// Unique identifier for a registered object.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the id to its raw `u64` representation.
    ///
    /// Useful for logging and for interop with systems that cannot carry the
    /// key type. Use [`ObjectId::from_raw`] to convert back.
    pub fn as_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstruct an id from the value returned by [`ObjectId::as_raw`].
    ///
    /// Returns `None` if `raw` does not encode a valid key (for example `0`).
    /// A `Some` result only means the encoding is well formed; the object it
    /// names may have been destroyed since.
    pub fn from_raw(raw: u64) -> Option<Self> {
        let id = Self::from(KeyData::from_ffi(raw));
        if id.is_null() { None } else { Some(id) }
    }
}

/// Errors from object registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectError {
    /// The object id does not name a live object.
    InvalidObjectId,
    /// The requested parent change would create a cycle.
    CircularParentage,
    /// [`init_global_registry`] has not been called.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl Error for ObjectError {}

/// Result alias for registry operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Visibility and enabled flags mirrored into the registry for widgets.
///
/// Widgets keep their own authoritative flags; the registry copy exists so
/// tree-wide queries (effective visibility, effective enabled state) can be
/// answered without access to the widget values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    /// Local visible flag (not considering ancestors).
    pub visible: bool,
    /// Local enabled flag (not considering ancestors).
    pub enabled: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
        }
    }
}

/// Per-object bookkeeping stored in the registry.
#[derive(Debug)]
struct ObjectData {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    parent: Option<ObjectId>,
    /// Children in stacking order: first is bottom-most, last is top-most.
    children: Vec<ObjectId>,
    widget_state: Option<WidgetState>,
}

/// Registry of live objects and their tree relationships.
///
/// The registry does not own the objects; it owns their identity and their
/// position in the tree. Destroying an id removes the whole subtree from the
/// registry (children before parents), which is how parent-driven cleanup
/// cascades without the registry holding any `Box<dyn ...>`.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object of type `T` and return its id.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let id = self.objects.insert(ObjectData {
            name: String::new(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            parent: None,
            children: Vec::new(),
            widget_state: None,
        });
        tracing::trace!(
            target: "casement_core::object",
            ?id,
            type_name = std::any::type_name::<T>(),
            "registered object"
        );
        id
    }

    /// Check whether `id` names a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Destroy an object and its entire subtree.
    ///
    /// Returns `false` if the id was already dead. Descendants are removed
    /// children-first so no child ever outlives its parent in the registry.
    #[tracing::instrument(skip(self), target = "casement_core::object", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        if !self.objects.contains_key(id) {
            return false;
        }

        let mut doomed = Vec::new();
        self.collect_descendants(id, &mut doomed);
        doomed.push(id);

        if let Some(parent_id) = self.objects.get(id).and_then(|data| data.parent)
            && let Some(parent) = self.objects.get_mut(parent_id)
        {
            parent.children.retain(|&child| child != id);
        }

        for doomed_id in doomed {
            self.objects.remove(doomed_id);
        }

        true
    }

    fn collect_descendants(&self, id: ObjectId, out: &mut Vec<ObjectId>) {
        if let Some(data) = self.objects.get(id) {
            for &child in &data.children {
                self.collect_descendants(child, out);
                out.push(child);
            }
        }
    }

    /// Get an object's name (empty if never set).
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|data| data.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set an object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name;
        Ok(())
    }

    /// Get the Rust type name recorded at registration.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|data| data.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the `TypeId` recorded at registration.
    pub fn object_type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.objects
            .get(id)
            .map(|data| data.type_id)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get an object's parent, if any.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|data| data.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Reparent an object.
    ///
    /// `None` detaches the object and makes it a root. Fails with
    /// [`ObjectError::CircularParentage`] if `parent` is `id` itself or any
    /// descendant of `id`.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        if let Some(parent_id) = parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if parent_id == id || self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects[id].parent;
        if old_parent == parent {
            return Ok(());
        }

        if let Some(old_id) = old_parent
            && let Some(old_data) = self.objects.get_mut(old_id)
        {
            old_data.children.retain(|&child| child != id);
        }

        self.objects[id].parent = parent;

        if let Some(new_id) = parent {
            self.objects[new_id].children.push(id);
        }

        Ok(())
    }

    /// Check whether `ancestor` appears on `descendant`'s parent chain.
    pub fn is_ancestor_of(&self, ancestor: ObjectId, descendant: ObjectId) -> bool {
        let mut current = self.objects.get(descendant).and_then(|data| data.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.objects.get(id).and_then(|data| data.parent);
        }
        false
    }

    /// Get an object's children in stacking order (bottom to top).
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|data| data.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// All objects without a parent.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Move an object to the top of its parent's stacking order.
    pub fn raise(&mut self, id: ObjectId) -> ObjectResult<()> {
        let parent_id = self
            .objects
            .get(id)
            .ok_or(ObjectError::InvalidObjectId)?
            .parent;
        if let Some(parent_id) = parent_id
            && let Some(parent) = self.objects.get_mut(parent_id)
        {
            parent.children.retain(|&child| child != id);
            parent.children.push(id);
        }
        Ok(())
    }

    /// Move an object to the bottom of its parent's stacking order.
    pub fn lower(&mut self, id: ObjectId) -> ObjectResult<()> {
        let parent_id = self
            .objects
            .get(id)
            .ok_or(ObjectError::InvalidObjectId)?
            .parent;
        if let Some(parent_id) = parent_id
            && let Some(parent) = self.objects.get_mut(parent_id)
        {
            parent.children.retain(|&child| child != id);
            parent.children.insert(0, id);
        }
        Ok(())
    }

    /// Record a widget's local visible flag.
    ///
    /// Creates the widget state entry on first use; non-widget objects never
    /// get one.
    pub fn set_widget_visible(&mut self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        match &mut data.widget_state {
            Some(state) => state.visible = visible,
            None => {
                data.widget_state = Some(WidgetState {
                    visible,
                    enabled: true,
                })
            }
        }
        Ok(())
    }

    /// Record a widget's local enabled flag.
    pub fn set_widget_enabled(&mut self, id: ObjectId, enabled: bool) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        match &mut data.widget_state {
            Some(state) => state.enabled = enabled,
            None => {
                data.widget_state = Some(WidgetState {
                    visible: true,
                    enabled,
                })
            }
        }
        Ok(())
    }

    /// Get the recorded widget state, or `None` for non-widget objects.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<Option<WidgetState>> {
        self.objects
            .get(id)
            .map(|data| data.widget_state)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Whether a widget is visible considering every ancestor.
    ///
    /// Returns `Ok(None)` for objects with no widget state. Ancestors without
    /// widget state are treated as transparent containers.
    pub fn is_effectively_visible(&self, id: ObjectId) -> ObjectResult<Option<bool>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let Some(state) = data.widget_state else {
            return Ok(None);
        };
        if !state.visible {
            return Ok(Some(false));
        }

        let mut current = data.parent;
        while let Some(ancestor_id) = current {
            let Some(ancestor) = self.objects.get(ancestor_id) else {
                break;
            };
            if let Some(ancestor_state) = ancestor.widget_state
                && !ancestor_state.visible
            {
                return Ok(Some(false));
            }
            current = ancestor.parent;
        }

        Ok(Some(true))
    }

    /// Whether a widget is enabled considering every ancestor.
    ///
    /// Disabling a container disables its whole subtree, which is what modal
    /// dialogs rely on to block their parent window.
    pub fn is_effectively_enabled(&self, id: ObjectId) -> ObjectResult<Option<bool>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let Some(state) = data.widget_state else {
            return Ok(None);
        };
        if !state.enabled {
            return Ok(Some(false));
        }

        let mut current = data.parent;
        while let Some(ancestor_id) = current {
            let Some(ancestor) = self.objects.get(ancestor_id) else {
                break;
            };
            if let Some(ancestor_state) = ancestor.widget_state
                && !ancestor_state.enabled
            {
                return Ok(Some(false));
            }
            current = ancestor.parent;
        }

        Ok(Some(true))
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
///
/// All methods take `&self` and lock internally, so the shared registry can
/// be used from any thread. Methods that return owned data (`Vec`, `String`)
/// do so because references cannot escape the lock.
#[derive(Debug, Default)]
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object of type `T`.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its subtree.
    pub fn destroy(&self, id: ObjectId) -> bool {
        self.inner.write().destroy(id)
    }

    /// Check whether `id` names a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get an object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(str::to_owned)
    }

    /// Set an object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the Rust type name recorded at registration.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Get an object's parent.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Reparent an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get an object's children in stacking order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(<[ObjectId]>::to_vec)
    }

    /// All objects without a parent.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects()
    }

    /// Move an object to the top of its parent's stacking order.
    pub fn raise(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().raise(id)
    }

    /// Move an object to the bottom of its parent's stacking order.
    pub fn lower(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().lower(id)
    }

    /// Record a widget's local visible flag.
    pub fn set_widget_visible(&self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        self.inner.write().set_widget_visible(id, visible)
    }

    /// Record a widget's local enabled flag.
    pub fn set_widget_enabled(&self, id: ObjectId, enabled: bool) -> ObjectResult<()> {
        self.inner.write().set_widget_enabled(id, enabled)
    }

    /// Get the recorded widget state.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<Option<WidgetState>> {
        self.inner.read().widget_state(id)
    }

    /// Whether a widget is visible considering every ancestor.
    pub fn is_effectively_visible(&self, id: ObjectId) -> ObjectResult<Option<bool>> {
        self.inner.read().is_effectively_visible(id)
    }

    /// Whether a widget is enabled considering every ancestor.
    pub fn is_effectively_enabled(&self, id: ObjectId) -> ObjectResult<Option<bool>> {
        self.inner.read().is_effectively_enabled(id)
    }

    /// Run a closure with read access to the underlying registry.
    ///
    /// Useful for batching several queries under one lock acquisition.
    pub fn with_read<R>(&self, f: impl FnOnce(&ObjectRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access to the underlying registry.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ObjectRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }
}

static GLOBAL_REGISTRY: Mutex<Option<SharedObjectRegistry>> = Mutex::new(None);

/// Initialize the process-wide object registry.
///
/// Idempotent: calling it again after initialization is a no-op, so tests and
/// libraries can call it defensively.
pub fn init_global_registry() {
    let mut guard = GLOBAL_REGISTRY.lock();
    if guard.is_none() {
        *guard = Some(SharedObjectRegistry::new());
        tracing::debug!(target: "casement_core::object", "global object registry initialized");
    }
}

/// Access the process-wide object registry.
///
/// Fails with [`ObjectError::RegistryNotInitialized`] before
/// [`init_global_registry`] has run.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    let guard = GLOBAL_REGISTRY.lock();
    if guard.is_none() {
        return Err(ObjectError::RegistryNotInitialized);
    }
    // SAFETY: Once initialized, the registry is never moved or deallocated.
    // The Option is Some and we never set it back to None.
    unsafe {
        let ptr = guard.as_ref().unwrap() as *const SharedObjectRegistry;
        Ok(&*ptr)
    }
}

/// Trait for objects registered in the object tree.
///
/// The `Any` supertrait allows downcasting through [`object_cast`], and
/// `Send + Sync` keeps ids and objects usable across threads.
pub trait Object: Any + Send + Sync {
    /// The registry id of this object.
    fn object_id(&self) -> ObjectId;
}

/// Embeddable base handling registration and destruction.
///
/// Structs embed an `ObjectBase` and create it with [`ObjectBase::new`]; the
/// `Drop` impl removes the object (and its subtree) from the global registry.
///
/// ```
/// use casement_core::{init_global_registry, Object, ObjectBase, ObjectId};
///
/// struct Label {
///     base: ObjectBase,
/// }
///
/// impl Object for Label {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// init_global_registry();
/// let label = Label { base: ObjectBase::new::<Label>() };
/// label.base.set_name("title");
/// assert_eq!(label.base.name(), "title");
/// ```
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of type `T` in the global registry.
    ///
    /// # Panics
    ///
    /// Panics if [`init_global_registry`] has not been called. Object
    /// construction before registry initialization is a programming error
    /// with no sensible recovery.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// The registry id of this object.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The object's name (empty if never set or the registry is gone).
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|registry| registry.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    /// The object's parent, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|registry| registry.parent(self.id))
            .ok()
            .flatten()
    }

    /// Reparent the object. `None` makes it a root.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// The object's children in stacking order.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|registry| registry.children(self.id))
            .unwrap_or_default()
    }

    /// Move this object to the top of its parent's stacking order.
    pub fn raise(&self) -> ObjectResult<()> {
        global_registry()?.raise(self.id)
    }

    /// Move this object to the bottom of its parent's stacking order.
    pub fn lower(&self) -> ObjectResult<()> {
        global_registry()?.lower(self.id)
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}

/// Downcast a `&dyn Object` to a concrete type.
pub fn object_cast<T: Object + 'static>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}

/// Downcast a `&mut dyn Object` to a concrete type.
pub fn object_cast_mut<T: Object + 'static>(obj: &mut dyn Object) -> Option<&mut T> {
    (obj as &mut dyn Any).downcast_mut::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestObject {
        base: ObjectBase,
        value: i32,
    }

    impl TestObject {
        fn new(name: &str) -> Self {
            let obj = Self {
                base: ObjectBase::new::<Self>(),
                value: 0,
            };
            obj.base.set_name(name);
            obj
        }
    }

    impl Object for TestObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    struct ChildObject {
        base: ObjectBase,
    }

    impl ChildObject {
        fn new(name: &str) -> Self {
            let obj = Self {
                base: ObjectBase::new::<Self>(),
            };
            obj.base.set_name(name);
            obj
        }
    }

    impl Object for ChildObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_object_id_raw_round_trip() {
        setup();
        let obj = TestObject::new("raw");
        let raw = obj.object_id().as_raw();
        assert_eq!(ObjectId::from_raw(raw), Some(obj.object_id()));
        assert_eq!(ObjectId::from_raw(0), None);
    }

    #[test]
    fn test_register_and_lookup() {
        setup();
        let obj = TestObject::new("first");
        let registry = global_registry().unwrap();

        assert!(registry.contains(obj.object_id()));
        assert_eq!(registry.object_name(obj.object_id()).unwrap(), "first");
        assert!(
            registry
                .type_name(obj.object_id())
                .unwrap()
                .ends_with("TestObject")
        );
    }

    #[test]
    fn test_destroy_removes_object() {
        setup();
        let registry = global_registry().unwrap();
        let id = {
            let obj = TestObject::new("short-lived");
            obj.object_id()
        };
        // ObjectBase::drop destroys on scope exit
        assert!(!registry.contains(id));
        assert_eq!(registry.object_name(id), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_parent_child_links() {
        setup();
        let parent = TestObject::new("parent");
        let child = ChildObject::new("child");

        child.base.set_parent(Some(parent.object_id())).unwrap();

        assert_eq!(child.base.parent(), Some(parent.object_id()));
        assert_eq!(parent.base.children(), vec![child.object_id()]);

        child.base.set_parent(None).unwrap();
        assert_eq!(child.base.parent(), None);
        assert!(parent.base.children().is_empty());
    }

    #[test]
    fn test_cascade_destroy() {
        setup();
        let registry = global_registry().unwrap();

        // Register directly so ObjectBase::drop does not run twice for the
        // same ids.
        let root = registry.register::<TestObject>();
        let mid = registry.register::<TestObject>();
        let leaf = registry.register::<TestObject>();
        registry.set_parent(mid, Some(root)).unwrap();
        registry.set_parent(leaf, Some(mid)).unwrap();

        assert!(registry.destroy(root));

        assert!(!registry.contains(root));
        assert!(!registry.contains(mid));
        assert!(!registry.contains(leaf));
        assert!(!registry.destroy(root));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();
        let a = TestObject::new("a");
        let b = TestObject::new("b");
        let c = TestObject::new("c");

        b.base.set_parent(Some(a.object_id())).unwrap();
        c.base.set_parent(Some(b.object_id())).unwrap();

        let result = a.base.set_parent(Some(c.object_id()));
        assert!(matches!(result, Err(ObjectError::CircularParentage)));

        let result = a.base.set_parent(Some(a.object_id()));
        assert!(matches!(result, Err(ObjectError::CircularParentage)));
    }

    #[test]
    fn test_raise_and_lower() {
        setup();
        let parent = TestObject::new("parent");
        let first = ChildObject::new("first");
        let second = ChildObject::new("second");
        let third = ChildObject::new("third");

        for child in [&first.base, &second.base, &third.base] {
            child.set_parent(Some(parent.object_id())).unwrap();
        }

        first.base.raise().unwrap();
        assert_eq!(
            parent.base.children(),
            vec![second.object_id(), third.object_id(), first.object_id()]
        );

        third.base.lower().unwrap();
        assert_eq!(
            parent.base.children(),
            vec![third.object_id(), second.object_id(), first.object_id()]
        );
    }

    #[test]
    fn test_effective_visibility_chain() {
        setup();
        let registry = global_registry().unwrap();
        let window = TestObject::new("window");
        let panel = TestObject::new("panel");
        let button = TestObject::new("button");

        panel.base.set_parent(Some(window.object_id())).unwrap();
        button.base.set_parent(Some(panel.object_id())).unwrap();

        for obj in [&window, &panel, &button] {
            registry.set_widget_visible(obj.object_id(), true).unwrap();
        }

        assert_eq!(
            registry.is_effectively_visible(button.object_id()).unwrap(),
            Some(true)
        );

        registry.set_widget_visible(panel.object_id(), false).unwrap();
        assert_eq!(
            registry.is_effectively_visible(button.object_id()).unwrap(),
            Some(false)
        );
        // The hidden panel itself reports false, its parent stays visible.
        assert_eq!(
            registry.is_effectively_visible(panel.object_id()).unwrap(),
            Some(false)
        );
        assert_eq!(
            registry.is_effectively_visible(window.object_id()).unwrap(),
            Some(true)
        );
    }

    #[test]
    fn test_effective_enabled_blocks_subtree() {
        setup();
        let registry = global_registry().unwrap();
        let window = TestObject::new("window");
        let field = TestObject::new("field");

        field.base.set_parent(Some(window.object_id())).unwrap();
        registry.set_widget_enabled(window.object_id(), true).unwrap();
        registry.set_widget_enabled(field.object_id(), true).unwrap();

        registry.set_widget_enabled(window.object_id(), false).unwrap();
        assert_eq!(
            registry.is_effectively_enabled(field.object_id()).unwrap(),
            Some(false)
        );

        registry.set_widget_enabled(window.object_id(), true).unwrap();
        assert_eq!(
            registry.is_effectively_enabled(field.object_id()).unwrap(),
            Some(true)
        );
    }

    #[test]
    fn test_non_widget_has_no_state() {
        setup();
        let registry = global_registry().unwrap();
        let obj = TestObject::new("plain");

        assert_eq!(registry.widget_state(obj.object_id()).unwrap(), None);
        assert_eq!(
            registry.is_effectively_visible(obj.object_id()).unwrap(),
            None
        );
    }

    #[test]
    fn test_registry_usable_across_threads() {
        setup();
        let parent = TestObject::new("main-thread");
        let parent_id = parent.object_id();

        let handle = std::thread::spawn(move || {
            let registry = global_registry().unwrap();
            let child_id = registry.register::<TestObject>();
            registry.set_parent(child_id, Some(parent_id)).unwrap();
            child_id
        });

        let child_id = handle.join().unwrap();
        assert_eq!(parent.base.children(), vec![child_id]);
    }

    #[test]
    fn test_object_cast() {
        setup();
        let mut obj = TestObject::new("castable");
        obj.value = 7;

        let as_object: &dyn Object = &obj;
        let cast = object_cast::<TestObject>(as_object).unwrap();
        assert_eq!(cast.value, 7);
        assert!(object_cast::<ChildObject>(as_object).is_none());

        let as_object_mut: &mut dyn Object = &mut obj;
        object_cast_mut::<TestObject>(as_object_mut).unwrap().value = 9;
        assert_eq!(obj.value, 9);
    }
}
