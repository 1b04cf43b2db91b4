//! kestrel: scriptable widget layer of the kestrel browser shell
//!
//! The script object model lives in `kestrel-core`; this crate provides the
//! GTK4 toolkit behind it, configuration, and the startup paths of the
//! `kestrel` binary.

pub mod app;
pub mod config;
pub mod shell;
pub mod toolkit;
