//! Identifiers shared between script objects and native widgets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a script-visible widget object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Name given to the native widget, also used as its CSS selector
    pub fn widget_name(&self) -> String {
        format!("kestrel-{}", self.0)
    }

    /// Recover the id from a name produced by [`ObjectId::widget_name`]
    pub fn from_widget_name(name: &str) -> Option<Self> {
        name.strip_prefix("kestrel-")?.parse().ok().map(Self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of a widget, for margins
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Start,
    End,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Start, Side::End];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_widget_name_round_trip() {
        let id = ObjectId(42);
        assert_eq!(id.widget_name(), "kestrel-42");
        assert_eq!(ObjectId::from_widget_name("kestrel-42"), Some(id));
        assert_eq!(ObjectId::from_widget_name("GtkLabel"), None);
        assert_eq!(ObjectId::from_widget_name("kestrel-x"), None);
    }
}
