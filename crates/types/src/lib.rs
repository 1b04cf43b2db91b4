//! kestrel-types: Shared data types for the kestrel widget layer.
//!
//! This crate contains plain data (colors, object ids, native event payloads)
//! shared by the scripting object model and the toolkit backends. Only the
//! optional `gtk` feature pulls in GDK, for color parsing.

pub mod color;
pub mod event;
pub mod object;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, ParseColorError};
pub use event::{ButtonEvent, CrossingEvent, Modifier};
pub use object::{ObjectId, Side};
