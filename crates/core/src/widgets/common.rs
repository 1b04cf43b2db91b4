//! Attribute families and signal forwarders shared by widget classes

use crate::attribute::Attribute;
use crate::error::{Error, Result, VALUE_ARG};
use crate::native::{NativeEvent, NativeSignal, Propagation};
use crate::value::Value;
use crate::widget::{lookup, Accessor, SignalBinding, Widget};
use kestrel_types::{Modifier, Side};
use std::rc::Rc;

/// Attributes every widget has
pub const COMMON_ACCESSORS: &[Accessor] = &[
    Accessor {
        attribute: Attribute::Type,
        get: Some(get_type),
        set: None,
    },
    Accessor {
        attribute: Attribute::Parent,
        get: Some(get_parent),
        set: None,
    },
    Accessor {
        attribute: Attribute::IsAlive,
        get: Some(get_is_alive),
        set: None,
    },
    Accessor {
        attribute: Attribute::Visible,
        get: Some(get_visible),
        set: Some(set_visible),
    },
    Accessor {
        attribute: Attribute::Focused,
        get: Some(get_focused),
        set: None,
    },
    Accessor {
        attribute: Attribute::Tooltip,
        get: Some(get_tooltip),
        set: Some(set_tooltip),
    },
    Accessor {
        attribute: Attribute::Width,
        get: Some(get_width),
        set: None,
    },
    Accessor {
        attribute: Attribute::Height,
        get: Some(get_height),
        set: None,
    },
    Accessor {
        attribute: Attribute::MinWidth,
        get: Some(get_min_width),
        set: Some(set_min_width),
    },
    Accessor {
        attribute: Attribute::MinHeight,
        get: Some(get_min_height),
        set: Some(set_min_height),
    },
    Accessor {
        attribute: Attribute::Margin,
        get: Some(get_margin_top),
        set: Some(set_margin),
    },
    Accessor {
        attribute: Attribute::MarginTop,
        get: Some(get_margin_top),
        set: Some(set_margin_top),
    },
    Accessor {
        attribute: Attribute::MarginBottom,
        get: Some(get_margin_bottom),
        set: Some(set_margin_bottom),
    },
    Accessor {
        attribute: Attribute::MarginStart,
        get: Some(get_margin_start),
        set: Some(set_margin_start),
    },
    Accessor {
        attribute: Attribute::MarginEnd,
        get: Some(get_margin_end),
        set: Some(set_margin_end),
    },
];

/// Attributes of single-child containers
pub const BIN_ACCESSORS: &[Accessor] = &[
    Accessor {
        attribute: Attribute::Child,
        get: Some(get_child),
        set: Some(set_child),
    },
];

/// Attributes of all containers
pub const CONTAINER_ACCESSORS: &[Accessor] = &[
    Accessor {
        attribute: Attribute::Children,
        get: Some(get_children),
        set: None,
    },
];

/// Native signals every widget forwards
pub const COMMON_SIGNALS: &[SignalBinding] = &[
    SignalBinding {
        signal: NativeSignal::Destroy,
        forward: destroy_cb,
    },
    SignalBinding {
        signal: NativeSignal::ParentSet,
        forward: parent_set_cb,
    },
    SignalBinding {
        signal: NativeSignal::FocusIn,
        forward: focus_cb,
    },
    SignalBinding {
        signal: NativeSignal::FocusOut,
        forward: focus_cb,
    },
];

/// Native signals containers forward besides their own `add`
pub const CONTAINER_SIGNALS: &[SignalBinding] = &[
    SignalBinding {
        signal: NativeSignal::Remove,
        forward: child_cb,
    },
];

fn get_type(w: &Widget) -> Value {
    Value::from(w.class().name)
}

fn get_parent(w: &Widget) -> Value {
    w.parent().map(Value::Widget).unwrap_or_default()
}

fn get_is_alive(w: &Widget) -> Value {
    Value::Bool(w.is_alive())
}

fn get_visible(w: &Widget) -> Value {
    Value::Bool(w.native().is_visible())
}

fn set_visible(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_visible(value.check_bool(VALUE_ARG)?);
    Ok(())
}

fn get_focused(w: &Widget) -> Value {
    Value::Bool(w.native().has_focus())
}

fn get_tooltip(w: &Widget) -> Value {
    w.native().tooltip().into()
}

fn set_tooltip(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_tooltip(value.check_opt_str(VALUE_ARG)?);
    Ok(())
}

fn get_width(w: &Widget) -> Value {
    w.native().allocated_size().0.into()
}

fn get_height(w: &Widget) -> Value {
    w.native().allocated_size().1.into()
}

/// A size request: non-negative, or -1 to unset
fn check_size(value: &Value) -> Result<i32> {
    let size = value.check_int(VALUE_ARG)?;
    if size < -1 {
        return Err(Error::BadArgument {
            position: VALUE_ARG,
            message: format!("size must be -1 or positive, got {}", size),
        });
    }
    Ok(size)
}

fn get_min_width(w: &Widget) -> Value {
    w.native().size_request().0.into()
}

fn set_min_width(w: &Widget, value: &Value) -> Result<()> {
    let width = check_size(value)?;
    let (_, height) = w.native().size_request();
    w.native().set_size_request(width, height);
    Ok(())
}

fn get_min_height(w: &Widget) -> Value {
    w.native().size_request().1.into()
}

fn set_min_height(w: &Widget, value: &Value) -> Result<()> {
    let height = check_size(value)?;
    let (width, _) = w.native().size_request();
    w.native().set_size_request(width, height);
    Ok(())
}

fn check_margin(value: &Value) -> Result<i32> {
    let margin = value.check_int(VALUE_ARG)?;
    if margin < 0 {
        return Err(Error::BadArgument {
            position: VALUE_ARG,
            message: format!("margin must not be negative, got {}", margin),
        });
    }
    Ok(margin)
}

fn set_margin(w: &Widget, value: &Value) -> Result<()> {
    let margin = check_margin(value)?;
    for side in Side::ALL {
        w.native().set_margin(side, margin);
    }
    Ok(())
}

fn get_margin_top(w: &Widget) -> Value {
    w.native().margin(Side::Top).into()
}

fn set_margin_top(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_margin(Side::Top, check_margin(value)?);
    Ok(())
}

fn get_margin_bottom(w: &Widget) -> Value {
    w.native().margin(Side::Bottom).into()
}

fn set_margin_bottom(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_margin(Side::Bottom, check_margin(value)?);
    Ok(())
}

fn get_margin_start(w: &Widget) -> Value {
    w.native().margin(Side::Start).into()
}

fn set_margin_start(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_margin(Side::Start, check_margin(value)?);
    Ok(())
}

fn get_margin_end(w: &Widget) -> Value {
    w.native().margin(Side::End).into()
}

fn set_margin_end(w: &Widget, value: &Value) -> Result<()> {
    w.native().set_margin(Side::End, check_margin(value)?);
    Ok(())
}

fn get_child(w: &Widget) -> Value {
    w.child().map(Value::Widget).unwrap_or_default()
}

fn set_child(w: &Widget, value: &Value) -> Result<()> {
    let child = value.check_opt_widget(VALUE_ARG)?.cloned();
    w.set_child(child)
}

fn get_children(w: &Widget) -> Value {
    Value::List(w.children().into_iter().map(Value::Widget).collect())
}

/// Truthy handler results mark the native event as handled
fn propagation(ret: &Value) -> Propagation {
    if ret.is_truthy() {
        Propagation::Stop
    } else {
        Propagation::Proceed
    }
}

fn modifiers(mods: &[Modifier]) -> Value {
    Value::List(mods.iter().map(|m| Value::from(m.name())).collect())
}

fn object(id: &kestrel_types::ObjectId) -> Value {
    lookup(*id).map(Value::Widget).unwrap_or_default()
}

pub fn destroy_cb(w: &Rc<Widget>, signal: NativeSignal, _event: &NativeEvent) -> Propagation {
    w.emit_logged(signal.name(), Vec::new());
    w.finish_destroy();
    Propagation::Proceed
}

pub fn parent_set_cb(w: &Rc<Widget>, signal: NativeSignal, event: &NativeEvent) -> Propagation {
    let parent = match event {
        NativeEvent::Parent(Some(id)) => object(id),
        _ => Value::Nil,
    };
    w.emit_logged(signal.name(), vec![parent]);
    Propagation::Proceed
}

pub fn focus_cb(w: &Rc<Widget>, signal: NativeSignal, _event: &NativeEvent) -> Propagation {
    let ret = w.emit_logged(signal.name(), Vec::new());
    propagation(&ret)
}

/// `add` and `remove`
pub fn child_cb(w: &Rc<Widget>, signal: NativeSignal, event: &NativeEvent) -> Propagation {
    let child = match event {
        NativeEvent::Child(id) => object(id),
        _ => Value::Nil,
    };
    w.emit_logged(signal.name(), vec![child]);
    Propagation::Proceed
}

/// Button press and release: modifiers, button, x, y
pub fn button_cb(w: &Rc<Widget>, signal: NativeSignal, event: &NativeEvent) -> Propagation {
    let NativeEvent::Button(button) = event else {
        return Propagation::Proceed;
    };
    let args = vec![
        modifiers(&button.modifiers),
        button.button.into(),
        button.x.into(),
        button.y.into(),
    ];
    let ret = w.emit_logged(signal.name(), args);
    propagation(&ret)
}

/// Pointer enter and leave: modifiers, x, y (nil on leave)
pub fn mouse_cb(w: &Rc<Widget>, signal: NativeSignal, event: &NativeEvent) -> Propagation {
    let NativeEvent::Crossing(crossing) = event else {
        return Propagation::Proceed;
    };
    let (x, y) = match crossing.position {
        Some((x, y)) => (Value::from(x), Value::from(y)),
        None => (Value::Nil, Value::Nil),
    };
    let ret = w.emit_logged(signal.name(), vec![modifiers(&crossing.modifiers), x, y]);
    propagation(&ret)
}

/// Show the native widget right after construction
pub fn show(w: &Rc<Widget>) {
    w.native().set_visible(true);
}
