//! GTK backing for the widget layer's native objects

use super::event_box::KestrelEventBox;
use super::style::{background_css, BackgroundStyle};
use gtk4::gdk;
use gtk4::prelude::*;
use kestrel_core::{NativeEvent, NativeHandler, NativeKind, NativeSignal, NativeWidget};
use kestrel_types::{ButtonEvent, Color, CrossingEvent, Modifier, ObjectId, Side};
use log::{debug, warn};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A [`KestrelEventBox`] driven through [`NativeWidget`]
///
/// The GTK widget is named after the owning object id, which lets `add`,
/// `remove` and `parent-set` payloads be resolved back to script objects
/// and lets a CSS background rule select exactly this widget.
pub struct GtkNative {
    id: ObjectId,
    widget: KestrelEventBox,
    style: BackgroundStyle,
    css: RefCell<Option<gtk4::CssProvider>>,
    destroy_handlers: Rc<RefCell<Vec<NativeHandler>>>,
    destroyed: Rc<Cell<bool>>,
}

impl GtkNative {
    pub fn event_box(id: ObjectId, style: BackgroundStyle) -> Self {
        let widget = KestrelEventBox::new();
        widget.set_widget_name(&id.widget_name());

        let destroy_handlers: Rc<RefCell<Vec<NativeHandler>>> = Rc::new(RefCell::new(Vec::new()));
        let destroyed = Rc::new(Cell::new(false));

        {
            let destroy_handlers = destroy_handlers.clone();
            let destroyed = destroyed.clone();
            widget.connect_destroy(move |_| {
                fire_destroy(&destroy_handlers, &destroyed);
            });
        }

        Self {
            id,
            widget,
            style,
            css: RefCell::new(None),
            destroy_handlers,
            destroyed,
        }
    }

    /// The GTK widget, for packing into a window
    pub fn widget(&self) -> &KestrelEventBox {
        &self.widget
    }

    fn connect_button(&self, signal: NativeSignal, handler: NativeHandler) {
        let gesture = gtk4::GestureClick::new();
        gesture.set_button(0);

        let callback = move |gesture: &gtk4::GestureClick, _n_press: i32, x: f64, y: f64| {
            let event = ButtonEvent {
                button: gesture.current_button(),
                x,
                y,
                modifiers: modifiers(gesture.current_event_state()),
            };
            if handler(&NativeEvent::Button(event)).is_stop() {
                gesture.set_state(gtk4::EventSequenceState::Claimed);
            }
        };

        if signal == NativeSignal::ButtonPress {
            gesture.connect_pressed(callback);
        } else {
            gesture.connect_released(callback);
        }
        self.widget.add_controller(gesture);
    }

    /// Enter and leave through a motion controller
    ///
    /// GTK4 crossing events cannot be claimed, so the handler's
    /// [`Propagation`](kestrel_core::Propagation) is ignored here.
    fn connect_crossing(&self, signal: NativeSignal, handler: NativeHandler) {
        let motion = gtk4::EventControllerMotion::new();
        if signal == NativeSignal::EnterNotify {
            motion.connect_enter(move |motion, x, y| {
                let event = CrossingEvent {
                    position: Some((x, y)),
                    modifiers: modifiers(motion.current_event_state()),
                };
                handler(&NativeEvent::Crossing(event));
            });
        } else {
            motion.connect_leave(move |motion| {
                let event = CrossingEvent {
                    position: None,
                    modifiers: modifiers(motion.current_event_state()),
                };
                handler(&NativeEvent::Crossing(event));
            });
        }
        self.widget.add_controller(motion);
    }

    fn connect_focus(&self, signal: NativeSignal, handler: NativeHandler) {
        let focus = gtk4::EventControllerFocus::new();
        if signal == NativeSignal::FocusIn {
            focus.connect_enter(move |_| {
                handler(&NativeEvent::Plain);
            });
        } else {
            focus.connect_leave(move |_| {
                handler(&NativeEvent::Plain);
            });
        }
        self.widget.add_controller(focus);
    }

    fn connect_child(&self, signal: NativeSignal, handler: NativeHandler) {
        let name = signal.name();
        self.widget.connect_local(name, false, move |args| {
            let child = args.get(1).and_then(|v| v.get::<gtk4::Widget>().ok())?;
            match ObjectId::from_widget_name(&child.widget_name()) {
                Some(id) => {
                    handler(&NativeEvent::Child(id));
                }
                None => debug!("Ignoring {} of unmanaged widget {}", name, child.widget_name()),
            }
            None
        });
    }

    fn apply_css(&self, spec: &str) {
        let display = self.widget.display();
        let provider = self.css.borrow_mut().get_or_insert_with(|| {
            let provider = gtk4::CssProvider::new();
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
            provider
        }).clone();
        provider.load_from_data(&background_css(&self.id.widget_name(), spec));
    }
}

fn fire_destroy(handlers: &RefCell<Vec<NativeHandler>>, destroyed: &Cell<bool>) {
    if destroyed.replace(true) {
        return;
    }
    let handlers = handlers.take();
    for handler in handlers {
        handler(&NativeEvent::Plain);
    }
}

fn modifiers(state: gdk::ModifierType) -> Vec<Modifier> {
    const MASKS: [(gdk::ModifierType, Modifier); 7] = [
        (gdk::ModifierType::SHIFT_MASK, Modifier::Shift),
        (gdk::ModifierType::LOCK_MASK, Modifier::Lock),
        (gdk::ModifierType::CONTROL_MASK, Modifier::Control),
        (gdk::ModifierType::ALT_MASK, Modifier::Alt),
        (gdk::ModifierType::SUPER_MASK, Modifier::Super),
        (gdk::ModifierType::HYPER_MASK, Modifier::Hyper),
        (gdk::ModifierType::META_MASK, Modifier::Meta),
    ];

    MASKS
        .iter()
        .filter(|(mask, _)| state.contains(*mask))
        .map(|(_, modifier)| *modifier)
        .collect()
}

impl NativeWidget for GtkNative {
    fn kind(&self) -> NativeKind {
        NativeKind::EventBox
    }

    fn id(&self) -> ObjectId {
        self.id
    }

    fn is_visible(&self) -> bool {
        self.widget.is_visible()
    }

    fn set_visible(&self, visible: bool) {
        self.widget.set_visible(visible);
    }

    fn has_focus(&self) -> bool {
        self.widget.has_focus()
    }

    fn tooltip(&self) -> Option<String> {
        self.widget.tooltip_text().map(|t| t.to_string())
    }

    fn set_tooltip(&self, tooltip: Option<&str>) {
        self.widget.set_tooltip_text(tooltip);
    }

    fn allocated_size(&self) -> (i32, i32) {
        (self.widget.width(), self.widget.height())
    }

    fn size_request(&self) -> (i32, i32) {
        self.widget.size_request()
    }

    fn set_size_request(&self, width: i32, height: i32) {
        self.widget.set_size_request(width, height);
    }

    fn margin(&self, side: Side) -> i32 {
        match side {
            Side::Top => self.widget.margin_top(),
            Side::Bottom => self.widget.margin_bottom(),
            Side::Start => self.widget.margin_start(),
            Side::End => self.widget.margin_end(),
        }
    }

    fn set_margin(&self, side: Side, margin: i32) {
        match side {
            Side::Top => self.widget.set_margin_top(margin),
            Side::Bottom => self.widget.set_margin_bottom(margin),
            Side::Start => self.widget.set_margin_start(margin),
            Side::End => self.widget.set_margin_end(margin),
        }
    }

    fn set_child(&self, child: Option<&dyn NativeWidget>) {
        match child {
            Some(c) => match c.as_any().downcast_ref::<GtkNative>() {
                Some(c) => self.widget.set_child(Some(c.widget.upcast_ref())),
                None => warn!("eventbox {}: ignoring foreign child {}", self.id, c.id()),
            },
            None => self.widget.set_child(None),
        }
    }

    fn set_background(&self, color: &Color, spec: &str) {
        match self.style {
            BackgroundStyle::Css => self.apply_css(spec),
            BackgroundStyle::Paint => self.widget.set_painted_background(Some(color.to_gdk_rgba())),
        }
    }

    fn connect(&self, signal: NativeSignal, handler: NativeHandler) {
        match signal {
            NativeSignal::Destroy => self.destroy_handlers.borrow_mut().push(handler),
            NativeSignal::ParentSet => {
                self.widget.connect_parent_notify(move |widget| {
                    let parent = widget
                        .parent()
                        .and_then(|p| ObjectId::from_widget_name(&p.widget_name()));
                    handler(&NativeEvent::Parent(parent));
                });
            }
            NativeSignal::FocusIn | NativeSignal::FocusOut => self.connect_focus(signal, handler),
            NativeSignal::Add | NativeSignal::Remove => self.connect_child(signal, handler),
            NativeSignal::ButtonPress | NativeSignal::ButtonRelease => {
                self.connect_button(signal, handler)
            }
            NativeSignal::EnterNotify | NativeSignal::LeaveNotify => {
                self.connect_crossing(signal, handler)
            }
        }
    }

    fn destroy(&self) {
        if self.destroyed.get() {
            return;
        }
        fire_destroy(&self.destroy_handlers, &self.destroyed);

        if let Some(parent) = self.widget.parent() {
            match parent.downcast_ref::<KestrelEventBox>() {
                Some(bin) => bin.release_child(self.widget.upcast_ref()),
                None => self.widget.set_visible(false),
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GtkNative {
    fn drop(&mut self) {
        if let Some(provider) = self.css.take() {
            gtk4::style_context_remove_provider_for_display(&self.widget.display(), &provider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_masks() {
        let state = gdk::ModifierType::SHIFT_MASK | gdk::ModifierType::CONTROL_MASK;
        assert_eq!(modifiers(state), vec![Modifier::Shift, Modifier::Control]);
        assert!(modifiers(gdk::ModifierType::empty()).is_empty());
    }
}
