//! kestrel-core: Scripting object model of the kestrel widget layer.
//!
//! Scripts see widgets as objects with named attributes and signals. This
//! crate resolves attribute reads and writes through typed accessor tables,
//! forwards native toolkit signals to script handlers, and defines the
//! toolkit seam ([`NativeWidget`], [`Toolkit`]) that GTK and the headless
//! backend implement.

pub mod attribute;
pub mod error;
pub mod headless;
pub mod native;
pub mod registry;
pub mod signal;
pub mod value;
pub mod widget;
pub mod widgets;

pub use attribute::Attribute;
pub use error::{Error, Result};
pub use headless::{HeadlessToolkit, HeadlessWidget};
pub use native::{
    NativeEvent, NativeHandler, NativeKind, NativeSignal, NativeWidget, Propagation, Toolkit,
};
pub use registry::Registry;
pub use signal::{Handler, HandlerId, SignalRegistry};
pub use value::Value;
pub use widget::{lookup, Accessor, SignalBinding, Widget, WidgetClass};
