//! Errors raised to the calling script context

use kestrel_types::ObjectId;
use thiserror::Error;

/// Argument position of the value in an attribute write (object, key, value)
pub const VALUE_ARG: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("bad argument #{position} (unable to parse colour: {value:?})")]
    InvalidColorSyntax { position: usize, value: String },

    #[error("bad argument #{position} ({message})")]
    BadArgument { position: usize, message: String },

    #[error("bad argument #{position} ({expected} expected, got {got})")]
    WrongType {
        position: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("unknown attribute {name:?} on {class} widget")]
    UnknownAttribute { class: &'static str, name: String },

    #[error("attribute {name:?} is read-only")]
    ReadOnly { name: String },

    #[error("unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("widget {0} has been destroyed")]
    DeadWidget(ObjectId),

    #[error("signal handler failed: {0}")]
    Handler(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
