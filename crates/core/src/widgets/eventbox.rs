//! Event box widget
//!
//! An invisible single-child container whose only purpose is receiving
//! pointer and button events for its child. Besides the common, bin and
//! container attributes it has one attribute of its own, `bg`, a CSS color
//! string painted behind the child.

use super::common::{
    button_cb, child_cb, mouse_cb, show, BIN_ACCESSORS, COMMON_ACCESSORS, COMMON_SIGNALS,
    CONTAINER_ACCESSORS, CONTAINER_SIGNALS,
};
use crate::attribute::Attribute;
use crate::error::{Error, Result, VALUE_ARG};
use crate::native::{NativeKind, NativeSignal};
use crate::value::Value;
use crate::widget::{Accessor, SignalBinding, Widget, WidgetClass};
use kestrel_types::Color;
use log::debug;

/// Data key holding the last accepted `bg` string
const BG_KEY: &str = "bg";

const EVENTBOX_ACCESSORS: &[Accessor] = &[Accessor {
    attribute: Attribute::Bg,
    get: Some(get_bg),
    set: Some(set_bg),
}];

const EVENTBOX_SIGNALS: &[SignalBinding] = &[
    SignalBinding {
        signal: NativeSignal::Add,
        forward: child_cb,
    },
    SignalBinding {
        signal: NativeSignal::ButtonPress,
        forward: button_cb,
    },
    SignalBinding {
        signal: NativeSignal::ButtonRelease,
        forward: button_cb,
    },
    SignalBinding {
        signal: NativeSignal::EnterNotify,
        forward: mouse_cb,
    },
    SignalBinding {
        signal: NativeSignal::LeaveNotify,
        forward: mouse_cb,
    },
];

pub static EVENTBOX: WidgetClass = WidgetClass {
    name: "eventbox",
    native: NativeKind::EventBox,
    families: &[
        COMMON_ACCESSORS,
        BIN_ACCESSORS,
        CONTAINER_ACCESSORS,
        EVENTBOX_ACCESSORS,
    ],
    signals: &[COMMON_SIGNALS, CONTAINER_SIGNALS, EVENTBOX_SIGNALS],
    setup: Some(show),
};

fn get_bg(w: &Widget) -> Value {
    w.data(BG_KEY).into()
}

fn set_bg(w: &Widget, value: &Value) -> Result<()> {
    let spec = value.check_str(VALUE_ARG)?;
    let color = Color::parse(spec).map_err(|e| {
        debug!("eventbox {}: rejecting bg: {}", w.id(), e);
        Error::InvalidColorSyntax {
            position: VALUE_ARG,
            value: spec.to_string(),
        }
    })?;

    w.native().set_background(&color, spec);
    w.set_data(BG_KEY, spec.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessToolkit, HeadlessWidget};
    use crate::native::{NativeEvent, NativeWidget, Propagation};
    use crate::widget::lookup;
    use kestrel_types::{ButtonEvent, CrossingEvent, Modifier};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn eventbox() -> Rc<Widget> {
        Widget::new(&EVENTBOX, &HeadlessToolkit::new())
    }

    fn headless(w: &Widget) -> &HeadlessWidget {
        w.native()
            .as_any()
            .downcast_ref::<HeadlessWidget>()
            .expect("headless native")
    }

    /// Records every emission of `signal` with its arguments (minus the widget)
    fn record(w: &Widget, signal: &str, ret: Value) -> Rc<RefCell<Vec<Vec<Value>>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let c = calls.clone();
        w.connect(signal, move |args| {
            c.borrow_mut().push(args[1..].to_vec());
            Ok(ret.clone())
        });
        calls
    }

    #[test]
    fn test_construction_shows_widget() {
        let w = eventbox();
        assert!(headless(&w).is_visible());
        assert_eq!(w.get("visible").unwrap(), Value::Bool(true));
        assert_eq!(w.get("type").unwrap(), Value::from("eventbox"));
    }

    #[test]
    fn test_construction_binds_signals_once() {
        let w = eventbox();
        let native = headless(&w);

        let bound: Vec<NativeSignal> = EVENTBOX.bound_signals().collect();
        assert_eq!(bound.len(), 10);
        for signal in [
            NativeSignal::Add,
            NativeSignal::ButtonPress,
            NativeSignal::ButtonRelease,
            NativeSignal::EnterNotify,
            NativeSignal::LeaveNotify,
        ] {
            assert!(bound.contains(&signal), "{:?}", signal);
        }

        for signal in bound {
            assert_eq!(native.handler_count(signal), 1, "{:?}", signal);
        }
    }

    #[test]
    fn test_bg_unset_reads_nil() {
        let w = eventbox();
        assert_eq!(w.index(Attribute::Bg).unwrap(), Some(Value::Nil));
        assert_eq!(w.get("bg").unwrap(), Value::Nil);
    }

    #[test]
    fn test_bg_round_trips_raw_string() {
        let w = eventbox();
        for spec in ["#ff0000", "rgba(0,0,0,0.5)", "red", "#abc"] {
            w.set("bg", Value::from(spec)).unwrap();
            assert_eq!(w.get("bg").unwrap(), Value::from(spec));
        }
    }

    #[test]
    fn test_bg_paints_native_background() {
        let w = eventbox();
        w.set("bg", Value::from("#ff0000")).unwrap();

        let (color, spec) = headless(&w).background().unwrap();
        assert_eq!(spec, "#ff0000");
        assert_eq!(color.to_rgba8(), (255, 0, 0, 255));
        assert!(color.is_opaque());
    }

    #[test]
    fn test_bg_rejects_unparseable_color() {
        let w = eventbox();
        let notify = record(&w, "property::bg", Value::Nil);

        for bad in ["banana", "notacolor", ""] {
            let err = w.set("bg", Value::from(bad)).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidColorSyntax {
                    position: VALUE_ARG,
                    value: bad.to_string()
                }
            );
        }

        assert_eq!(w.get("bg").unwrap(), Value::Nil);
        assert!(headless(&w).background().is_none());
        assert!(notify.borrow().is_empty());
    }

    #[test]
    fn test_bg_failed_write_keeps_previous_value() {
        let w = eventbox();
        w.set("bg", Value::from("#00ff00")).unwrap();

        assert!(w.set("bg", Value::from("banana")).is_err());
        assert_eq!(w.get("bg").unwrap(), Value::from("#00ff00"));
        assert_eq!(headless(&w).background().unwrap().1, "#00ff00");
    }

    #[test]
    fn test_bg_requires_string() {
        let w = eventbox();
        assert_eq!(
            w.set("bg", Value::Number(5.0)),
            Err(Error::WrongType {
                position: VALUE_ARG,
                expected: "string",
                got: "number"
            })
        );
    }

    #[test]
    fn test_bg_write_notifies_once() {
        let w = eventbox();
        let notify = record(&w, "property::bg", Value::Nil);

        w.set("bg", Value::from("#ff0000")).unwrap();
        w.set("bg", Value::from("blue")).unwrap();

        assert_eq!(notify.borrow().len(), 2);
        assert_eq!(w.get("bg").unwrap(), Value::from("blue"));
    }

    #[test]
    fn test_unknown_attributes() {
        let w = eventbox();
        assert_eq!(w.get("banana").unwrap(), Value::Nil);
        assert!(matches!(
            w.set("banana", Value::from("x")),
            Err(Error::UnknownAttribute { class: "eventbox", .. })
        ));
        assert_eq!(w.newindex(Attribute::Children, &Value::Nil), Ok(false));
        assert!(matches!(
            w.set("children", Value::Nil),
            Err(Error::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_common_attributes() {
        let w = eventbox();
        headless(&w).allocate(120, 40);
        assert_eq!(w.get("width").unwrap(), Value::Number(120.0));
        assert_eq!(w.get("height").unwrap(), Value::Number(40.0));

        w.set("tooltip", Value::from("hello")).unwrap();
        assert_eq!(w.get("tooltip").unwrap(), Value::from("hello"));
        w.set("tooltip", Value::Nil).unwrap();
        assert_eq!(w.get("tooltip").unwrap(), Value::Nil);

        w.set("min_width", Value::Number(200.0)).unwrap();
        assert_eq!(headless(&w).size_request(), (200, -1));
        assert!(w.set("min_height", Value::Number(-2.0)).is_err());

        w.set("margin", Value::Number(4.0)).unwrap();
        w.set("margin_end", Value::Number(9.0)).unwrap();
        assert_eq!(w.get("margin_bottom").unwrap(), Value::Number(4.0));
        assert_eq!(w.get("margin_end").unwrap(), Value::Number(9.0));

        w.set("visible", Value::Bool(false)).unwrap();
        assert!(!headless(&w).is_visible());
    }

    #[test]
    fn test_child_add_and_remove() {
        let parent = eventbox();
        let child = eventbox();
        let added = record(&parent, "add", Value::Nil);
        let removed = record(&parent, "remove", Value::Nil);
        let parent_set = record(&child, "parent-set", Value::Nil);

        parent.set("child", Value::Widget(child.clone())).unwrap();
        assert_eq!(parent.get("child").unwrap(), Value::Widget(child.clone()));
        assert_eq!(child.get("parent").unwrap(), Value::Widget(parent.clone()));
        assert_eq!(
            parent.get("children").unwrap(),
            Value::List(vec![Value::Widget(child.clone())])
        );
        assert_eq!(*added.borrow(), vec![vec![Value::Widget(child.clone())]]);
        assert_eq!(*parent_set.borrow(), vec![vec![Value::Widget(parent.clone())]]);

        parent.set("child", Value::Nil).unwrap();
        assert_eq!(*removed.borrow(), vec![vec![Value::Widget(child.clone())]]);
        assert_eq!(child.get("parent").unwrap(), Value::Nil);
        assert_eq!(headless(&parent).child_id(), None);
    }

    #[test]
    fn test_child_cannot_form_cycle() {
        let a = eventbox();
        let b = eventbox();
        a.set("child", Value::Widget(b.clone())).unwrap();

        assert!(matches!(
            b.set("child", Value::Widget(a.clone())),
            Err(Error::BadArgument { position: VALUE_ARG, .. })
        ));
        assert!(a.set("child", Value::Widget(a.clone())).is_err());

        let c = eventbox();
        assert!(c.set("child", Value::Widget(b.clone())).is_err());
    }

    #[test]
    fn test_button_press_forwarding() {
        let w = eventbox();
        let presses = record(&w, "button-press-event", Value::Nil);

        let mut event = ButtonEvent::new(1, 3.0, 4.0);
        event.modifiers.push(Modifier::Control);
        let ret = headless(&w).emit(NativeSignal::ButtonPress, NativeEvent::Button(event));

        assert_eq!(ret, Propagation::Proceed);
        assert_eq!(
            *presses.borrow(),
            vec![vec![
                Value::List(vec![Value::from("Control")]),
                Value::Number(1.0),
                Value::Number(3.0),
                Value::Number(4.0),
            ]]
        );
    }

    #[test]
    fn test_handled_button_release_stops_propagation() {
        let w = eventbox();
        let releases = record(&w, "button-release-event", Value::Bool(true));

        let event = NativeEvent::Button(ButtonEvent::new(3, 0.0, 0.0));
        let ret = headless(&w).emit(NativeSignal::ButtonRelease, event);

        assert_eq!(ret, Propagation::Stop);
        assert_eq!(releases.borrow().len(), 1);
    }

    #[test]
    fn test_crossing_forwarding() {
        let w = eventbox();
        let enters = record(&w, "enter-notify-event", Value::Nil);
        let leaves = record(&w, "leave-notify-event", Value::Nil);

        let enter = CrossingEvent {
            position: Some((1.0, 2.0)),
            modifiers: Vec::new(),
        };
        headless(&w).emit(NativeSignal::EnterNotify, NativeEvent::Crossing(enter));
        headless(&w).emit(
            NativeSignal::LeaveNotify,
            NativeEvent::Crossing(CrossingEvent::default()),
        );

        assert_eq!(
            *enters.borrow(),
            vec![vec![Value::List(Vec::new()), Value::Number(1.0), Value::Number(2.0)]]
        );
        assert_eq!(
            *leaves.borrow(),
            vec![vec![Value::List(Vec::new()), Value::Nil, Value::Nil]]
        );
    }

    #[test]
    fn test_each_emission_forwards_once() {
        let w = eventbox();
        let presses = record(&w, "button-press-event", Value::Nil);
        let native = headless(&w);

        for _ in 0..3 {
            native.emit(
                NativeSignal::ButtonPress,
                NativeEvent::Button(ButtonEvent::new(1, 0.0, 0.0)),
            );
        }
        assert_eq!(presses.borrow().len(), 3);
    }

    #[test]
    fn test_focus_forwarding() {
        let w = eventbox();
        let focus_in = record(&w, "focus-in-event", Value::Nil);

        headless(&w).set_focus(true);
        assert_eq!(focus_in.borrow().len(), 1);
        assert_eq!(w.get("focused").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_destroy() {
        let parent = eventbox();
        let child = eventbox();
        parent.set("child", Value::Widget(child.clone())).unwrap();

        let parent_destroyed = record(&parent, "destroy", Value::Nil);
        let child_destroyed = record(&child, "destroy", Value::Nil);

        parent.destroy();
        parent.destroy();

        assert_eq!(parent_destroyed.borrow().len(), 1);
        assert_eq!(child_destroyed.borrow().len(), 1);
        assert!(headless(&parent).is_destroyed());
        assert!(headless(&child).is_destroyed());

        assert_eq!(parent.get("is_alive").unwrap(), Value::Bool(false));
        assert_eq!(parent.get("type").unwrap(), Value::from("eventbox"));
        assert_eq!(parent.get("bg"), Err(Error::DeadWidget(parent.id())));
        assert_eq!(
            parent.set("bg", Value::from("red")),
            Err(Error::DeadWidget(parent.id()))
        );
    }

    #[test]
    fn test_destroying_child_detaches_from_parent() {
        let parent = eventbox();
        let child = eventbox();
        parent.set("child", Value::Widget(child.clone())).unwrap();
        let removed = record(&parent, "remove", Value::Nil);

        child.destroy();

        assert_eq!(parent.get("child").unwrap(), Value::Nil);
        assert_eq!(removed.borrow().len(), 1);
        assert!(parent.is_alive());
    }

    #[test]
    fn test_failing_notification_keeps_write() {
        let w = eventbox();
        w.connect("property::bg", |_| Err(Error::Handler("boom".to_string())));

        assert_eq!(w.set("bg", Value::from("red")), Ok(()));
        assert_eq!(w.get("bg").unwrap(), Value::from("red"));
        assert_eq!(
            headless(&w).background().map(|(_, spec)| spec),
            Some("red".to_string())
        );
    }

    #[test]
    fn test_dropping_last_handle_destroys_native() {
        let parent = eventbox();
        let child = eventbox();
        parent.set("child", Value::Widget(child.clone())).unwrap();

        let native = headless(&parent).clone();
        let child_native = headless(&child).clone();
        let destroyed = record(&parent, "destroy", Value::Nil);
        let id = parent.id();

        drop(parent);

        assert!(native.is_destroyed());
        assert!(child_native.is_destroyed());
        assert!(!child.is_alive());
        assert!(lookup(id).is_none());
        assert_eq!(*destroyed.borrow(), vec![Vec::<Value>::new()]);
    }

    #[test]
    fn test_handler_error_does_not_escape_native_callback() {
        let w = eventbox();
        w.connect("button-press-event", |_| Err(Error::Handler("boom".to_string())));

        let ret = headless(&w).emit(
            NativeSignal::ButtonPress,
            NativeEvent::Button(ButtonEvent::new(1, 0.0, 0.0)),
        );
        assert_eq!(ret, Propagation::Proceed);
    }
}
