//! Built-in widget classes
//!
//! `common` holds the attribute families and signal forwarders shared by all
//! classes; each other module defines one class.

pub mod common;
pub mod eventbox;

use crate::registry::Registry;

/// Register all built-in widget classes
pub fn register_all(registry: &mut Registry) {
    registry.register(&eventbox::EVENTBOX);
}
