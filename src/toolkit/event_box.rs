//! KestrelEventBox GObject subclass
//!
//! GTK4 dropped GtkEventBox, so this is its replacement: a widget with a
//! single child laid out by a bin layout, emitting `add` and `remove` when
//! the child changes, and optionally painting a solid background behind it.
//! Pointer and focus input is attached by the caller as event controllers.

use gtk4::gdk;
use gtk4::glib;
use gtk4::glib::subclass::Signal;
use gtk4::graphene;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use std::cell::RefCell;
use std::sync::OnceLock;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct KestrelEventBox {
        pub child: RefCell<Option<gtk4::Widget>>,
        pub background: RefCell<Option<gdk::RGBA>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for KestrelEventBox {
        const NAME: &'static str = "KestrelEventBox";
        type Type = super::KestrelEventBox;
        type ParentType = gtk4::Widget;

        fn class_init(klass: &mut Self::Class) {
            klass.set_layout_manager_type::<gtk4::BinLayout>();
            klass.set_css_name("eventbox");
        }
    }

    impl ObjectImpl for KestrelEventBox {
        fn signals() -> &'static [Signal] {
            static SIGNALS: OnceLock<Vec<Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![
                    Signal::builder("add")
                        .param_types([gtk4::Widget::static_type()])
                        .build(),
                    Signal::builder("remove")
                        .param_types([gtk4::Widget::static_type()])
                        .build(),
                ]
            })
        }

        fn dispose(&self) {
            if let Some(child) = self.child.take() {
                child.unparent();
            }
        }
    }

    impl WidgetImpl for KestrelEventBox {
        fn snapshot(&self, snapshot: &gtk4::Snapshot) {
            let widget = self.obj();
            if let Some(rgba) = self.background.borrow().as_ref() {
                let bounds =
                    graphene::Rect::new(0.0, 0.0, widget.width() as f32, widget.height() as f32);
                snapshot.append_color(rgba, &bounds);
            }
            self.parent_snapshot(snapshot);
        }
    }
}

glib::wrapper! {
    pub struct KestrelEventBox(ObjectSubclass<imp::KestrelEventBox>)
        @extends gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget;
}

impl Default for KestrelEventBox {
    fn default() -> Self {
        glib::Object::new()
    }
}

impl KestrelEventBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the child, emitting `remove` then `add`
    pub fn set_child(&self, child: Option<&gtk4::Widget>) {
        let imp = self.imp();

        let old = imp.child.take();
        if let Some(old) = old {
            old.unparent();
            self.emit_by_name::<()>("remove", &[&old]);
        }

        if let Some(child) = child {
            child.set_parent(self);
            imp.child.replace(Some(child.clone()));
            self.emit_by_name::<()>("add", &[child]);
        }
    }

    /// Drop `child` without emitting `remove`, used while it is destroyed
    pub fn release_child(&self, child: &gtk4::Widget) {
        let imp = self.imp();
        let is_child = imp.child.borrow().as_ref() == Some(child);
        if is_child {
            imp.child.take();
            child.unparent();
        }
    }

    /// Color painted behind the child, `None` for no background
    pub fn set_painted_background(&self, color: Option<gdk::RGBA>) {
        self.imp().background.replace(color);
        self.queue_draw();
    }
}
