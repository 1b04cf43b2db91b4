//! GTK4 backend of the widget layer

mod event_box;
mod native;
mod style;

pub use event_box::KestrelEventBox;
pub use native::GtkNative;
pub use style::{background_css, BackgroundStyle, Capabilities, StylePreference};

use kestrel_core::{NativeKind, NativeWidget, Toolkit};
use kestrel_types::ObjectId;

/// Builds GTK native objects using one background strategy
#[derive(Debug, Clone, Copy)]
pub struct GtkToolkit {
    style: BackgroundStyle,
}

impl GtkToolkit {
    pub fn new(style: BackgroundStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> BackgroundStyle {
        self.style
    }
}

impl Toolkit for GtkToolkit {
    fn name(&self) -> &'static str {
        "gtk4"
    }

    fn create(&self, kind: NativeKind, id: ObjectId) -> Box<dyn NativeWidget> {
        match kind {
            NativeKind::EventBox => Box::new(GtkNative::event_box(id, self.style)),
        }
    }
}
