//! Owned widget storage keyed by object ID.
//!
//! `WidgetStore` owns the boxed widgets of a window and implements
//! [`WidgetAccess`] so the [`EventDispatcher`](super::EventDispatcher),
//! focus manager, and frame renderer can reach them by ID. Parent-child
//! relationships and stacking order live in the global object registry;
//! the store only resolves which of those objects are widgets it owns.

use std::collections::HashMap;

use casement_core::{ObjectId, global_registry};

use super::Widget;
use super::dispatcher::WidgetAccess;

/// Owns a window's widgets and resolves them by object ID.
#[derive(Default)]
pub struct WidgetStore {
    widgets: HashMap<ObjectId, Box<dyn Widget>>,
}

impl WidgetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Insert a boxed widget, returning its object ID.
    pub fn insert(&mut self, widget: Box<dyn Widget>) -> ObjectId {
        let id = widget.object_id();
        self.widgets.insert(id, widget);
        id
    }

    /// Insert a widget by value, returning its object ID.
    pub fn add(&mut self, widget: impl Widget + 'static) -> ObjectId {
        self.insert(Box::new(widget))
    }

    /// Remove a widget from the store, returning ownership.
    ///
    /// Dropping the returned box destroys the widget's object registration
    /// along with any registered descendants.
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn Widget>> {
        self.widgets.remove(&id)
    }

    /// Remove a widget and every stored descendant of it.
    ///
    /// Returns the number of widgets removed.
    pub fn remove_subtree(&mut self, id: ObjectId) -> usize {
        let mut to_remove = vec![id];
        // Collect descendants before any widget is dropped; dropping a widget
        // removes its subtree from the registry.
        if let Ok(registry) = global_registry() {
            let mut stack = vec![id];
            while let Some(current) = stack.pop() {
                if let Ok(children) = registry.children(current) {
                    for child in children {
                        to_remove.push(child);
                        stack.push(child);
                    }
                }
            }
        }

        let mut removed = 0;
        for widget_id in to_remove {
            if self.widgets.remove(&widget_id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Check if the store contains a widget with the given ID.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of widgets in the store.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate over the IDs of all stored widgets, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.widgets.keys().copied()
    }
}

impl WidgetAccess for WidgetStore {
    fn get_widget(&self, id: ObjectId) -> Option<&dyn Widget> {
        self.widgets.get(&id).map(|w| w.as_ref())
    }

    fn get_widget_mut(&mut self, id: ObjectId) -> Option<&mut dyn Widget> {
        self.widgets.get_mut(&id).map(|w| w.as_mut())
    }

    /// Children in registry stacking order, restricted to stored widgets.
    fn get_children(&self, id: ObjectId) -> Vec<ObjectId> {
        let Ok(registry) = global_registry() else {
            return Vec::new();
        };
        match registry.children(id) {
            Ok(children) => children
                .into_iter()
                .filter(|child| self.widgets.contains_key(child))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
