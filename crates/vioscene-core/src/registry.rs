//! Scene registry: the single source of truth for what is in the scene.

use indexmap::IndexMap;

use crate::widget::Widget;

/// What [`SceneRegistry::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// No widget had this id; it was inserted.
    Created,
    /// A widget with this id existed and was replaced in place.
    Updated,
}

/// Registry of all widgets in the scene, keyed by id.
///
/// Iteration follows insertion order. Updating a widget keeps its position in
/// that order.
#[derive(Debug, Default, Clone)]
pub struct SceneRegistry {
    widgets: IndexMap<String, Widget>,
}

impl SceneRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a widget, or replaces the one with the same id.
    ///
    /// When replacing, an incoming widget without an explicit transform keeps
    /// the transform of the widget it replaces.
    pub fn upsert(&mut self, mut widget: Widget) -> Upserted {
        if let Some(existing) = self.widgets.get_mut(widget.id()) {
            if widget.transform().is_none() {
                widget.set_transform(existing.transform());
            }
            *existing = widget;
            Upserted::Updated
        } else {
            self.widgets.insert(widget.id().to_string(), widget);
            Upserted::Created
        }
    }

    /// Removes a widget by id.
    ///
    /// Removing an id that is not present is a no-op and returns `None`.
    pub fn remove(&mut self, id: &str) -> Option<Widget> {
        self.widgets.shift_remove(id)
    }

    /// Checks if a widget with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    /// Gets a widget by id.
    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    /// Gets a mutable reference to a widget by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    /// Returns an iterator over all widgets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// Returns an iterator over all widget ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    /// Returns the number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Removes all widgets.
    pub fn clear(&mut self) {
        self.widgets.clear();
    }
}
