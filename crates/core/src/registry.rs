//! Registry of widget classes by script type name

use crate::error::{Error, Result};
use crate::native::Toolkit;
use crate::widget::{Widget, WidgetClass};
use std::collections::HashMap;
use std::rc::Rc;

/// Registry of widget classes
///
/// Scripts create widgets by type name (`widget{type = "eventbox"}`); the
/// registry maps that name to the class describing the widget.
pub struct Registry {
    classes: HashMap<&'static str, &'static WidgetClass>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Create a registry holding all built-in classes
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::widgets::register_all(&mut registry);
        registry
    }

    /// Register a widget class under its name
    pub fn register(&mut self, class: &'static WidgetClass) {
        self.classes.insert(class.name, class);
    }

    pub fn class(&self, type_name: &str) -> Option<&'static WidgetClass> {
        self.classes.get(type_name).copied()
    }

    /// Create a widget by type name
    pub fn create(&self, type_name: &str, toolkit: &dyn Toolkit) -> Result<Rc<Widget>> {
        let class = self
            .class(type_name)
            .ok_or_else(|| Error::UnknownWidgetType(type_name.to_string()))?;
        Ok(Widget::new(class, toolkit))
    }

    /// List all registered type names, sorted
    pub fn list_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessToolkit;

    #[test]
    fn test_builtin_types() {
        let registry = Registry::with_builtin();
        assert_eq!(registry.list_types(), vec!["eventbox"]);
    }

    #[test]
    fn test_create_by_name() {
        let registry = Registry::with_builtin();
        let widget = registry.create("eventbox", &HeadlessToolkit::new()).unwrap();
        assert_eq!(widget.class().name, "eventbox");
        assert!(widget.is_alive());
    }

    #[test]
    fn test_unknown_type() {
        let registry = Registry::new();
        assert!(matches!(
            registry.create("eventbox", &HeadlessToolkit::new()),
            Err(Error::UnknownWidgetType(name)) if name == "eventbox"
        ));
    }
}
