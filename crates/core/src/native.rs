//! What the widget layer consumes from a GUI toolkit
//!
//! A toolkit backend implements [`Toolkit`] to construct native objects and
//! [`NativeWidget`] for each of them. The scripting object model only talks
//! to these traits, so the same adapters run against GTK or the headless
//! backend.

use kestrel_types::{ButtonEvent, Color, CrossingEvent, ObjectId, Side};
use std::any::Any;

/// Kinds of native object a toolkit can construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// Invisible single-child container that receives pointer events
    EventBox,
}

/// Native signals the widget layer may connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeSignal {
    Destroy,
    ParentSet,
    FocusIn,
    FocusOut,
    Add,
    Remove,
    ButtonPress,
    ButtonRelease,
    EnterNotify,
    LeaveNotify,
}

impl NativeSignal {
    /// Signal name, shared by the native and the script side
    pub fn name(&self) -> &'static str {
        match self {
            NativeSignal::Destroy => "destroy",
            NativeSignal::ParentSet => "parent-set",
            NativeSignal::FocusIn => "focus-in-event",
            NativeSignal::FocusOut => "focus-out-event",
            NativeSignal::Add => "add",
            NativeSignal::Remove => "remove",
            NativeSignal::ButtonPress => "button-press-event",
            NativeSignal::ButtonRelease => "button-release-event",
            NativeSignal::EnterNotify => "enter-notify-event",
            NativeSignal::LeaveNotify => "leave-notify-event",
        }
    }
}

/// Payload of a native emission
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// No payload (destroy, focus)
    Plain,
    Button(ButtonEvent),
    Crossing(CrossingEvent),
    /// Child added to or removed from a container
    Child(ObjectId),
    /// New parent, `None` when unparented or parented outside the widget layer
    Parent(Option<ObjectId>),
}

/// Whether a native event continues to other handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Proceed,
    Stop,
}

impl Propagation {
    pub fn is_stop(&self) -> bool {
        *self == Propagation::Stop
    }
}

pub type NativeHandler = Box<dyn Fn(&NativeEvent) -> Propagation>;

/// A live native toolkit object owned by exactly one widget handle
pub trait NativeWidget: Any {
    fn kind(&self) -> NativeKind;

    /// Id of the script object owning this native object
    fn id(&self) -> ObjectId;

    fn is_visible(&self) -> bool;
    fn set_visible(&self, visible: bool);

    fn has_focus(&self) -> bool;

    fn tooltip(&self) -> Option<String>;
    fn set_tooltip(&self, tooltip: Option<&str>);

    /// Size assigned by the last layout pass
    fn allocated_size(&self) -> (i32, i32);

    /// Minimum size request, -1 meaning unset
    fn size_request(&self) -> (i32, i32);
    fn set_size_request(&self, width: i32, height: i32);

    fn margin(&self, side: Side) -> i32;
    fn set_margin(&self, side: Side, margin: i32);

    /// Replace the single child
    ///
    /// Emits `remove` for a previous child and `add` for the new one, and
    /// `parent-set` on both children.
    fn set_child(&self, child: Option<&dyn NativeWidget>);

    /// Paint the background; `spec` is the string `color` was parsed from
    fn set_background(&self, color: &Color, spec: &str);

    /// Connect a handler for the lifetime of the object
    fn connect(&self, signal: NativeSignal, handler: NativeHandler);

    /// Destroy the native object, emitting `destroy`
    fn destroy(&self);

    fn as_any(&self) -> &dyn Any;
}

/// Factory for native objects
pub trait Toolkit {
    /// Backend name, for logging
    fn name(&self) -> &'static str;

    /// Construct a native object for the script object `id`
    ///
    /// Allocation failure inside the toolkit is fatal and not reported here.
    fn create(&self, kind: NativeKind, id: ObjectId) -> Box<dyn NativeWidget>;
}
