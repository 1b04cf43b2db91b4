//! Startup in either toolkit

use anyhow::{anyhow, Result};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use kestrel_core::{HeadlessToolkit, HeadlessWidget, NativeEvent, NativeSignal, Widget};
use kestrel_types::{ButtonEvent, CrossingEvent};
use log::{debug, info};
use std::cell::RefCell;

use crate::config::AppConfig;
use crate::shell::Shell;
use crate::toolkit::{BackgroundStyle, GtkNative, GtkToolkit};

/// Attributes printed by a headless run
const REPORTED: &[&str] = &[
    "type", "visible", "bg", "tooltip", "width", "height", "min_height", "margin", "parent",
];

/// Build the main window on application activation
pub fn build_ui(app: &Application, config: &AppConfig) -> Result<()> {
    let style = BackgroundStyle::selected(config.background_style);
    let toolkit = GtkToolkit::new(style);
    let shell = Shell::build(config, &toolkit)?;

    let root = shell
        .root()
        .native()
        .as_any()
        .downcast_ref::<GtkNative>()
        .ok_or_else(|| anyhow!("root event box is not backed by GTK"))?
        .widget()
        .clone();

    let window = ApplicationWindow::builder()
        .application(app)
        .title(config.window.title.as_str())
        .default_width(config.window.width)
        .default_height(config.window.height)
        .child(&root)
        .build();

    let shell = RefCell::new(Some(shell));
    window.connect_close_request(move |_| {
        if let Some(shell) = shell.take() {
            debug!("Window closing, destroying widgets");
            shell.destroy();
        }
        glib::Propagation::Proceed
    });

    window.present();
    info!("Main window shown ({:?} backgrounds)", style);
    Ok(())
}

fn headless_native(widget: &Widget) -> Result<HeadlessWidget> {
    widget
        .native()
        .as_any()
        .downcast_ref::<HeadlessWidget>()
        .cloned()
        .ok_or_else(|| anyhow!("widget {} is not headless", widget.id()))
}

/// Wire the shell without a display, simulate a pointer visit and one
/// press, then print the resulting attributes
pub fn run_headless(config: &AppConfig) -> Result<()> {
    let shell = Shell::build(config, &HeadlessToolkit::new())?;
    let root = headless_native(shell.root())?;
    let inner = headless_native(shell.inner())?;

    let (width, height) = (config.window.width, config.window.height);
    let margin = shell.inner().get("margin")?.check_int(0)?;
    root.allocate(width, height);
    inner.allocate(width - 2 * margin, height - 2 * margin);

    let centre = (width as f64 / 2.0, height as f64 / 2.0);
    root.emit(
        NativeSignal::EnterNotify,
        NativeEvent::Crossing(CrossingEvent {
            position: Some(centre),
            ..CrossingEvent::default()
        }),
    );
    let press = ButtonEvent::new(1, centre.0 - margin as f64, centre.1 - margin as f64);
    let propagation = inner.emit(NativeSignal::ButtonPress, NativeEvent::Button(press));
    debug!("Simulated press: {:?}", propagation);
    root.emit(NativeSignal::LeaveNotify, NativeEvent::Crossing(CrossingEvent::default()));

    for (label, widget) in [("outer", shell.root()), ("inner", shell.inner())] {
        for name in REPORTED {
            println!("{}.{} = {:?}", label, name, widget.get(name)?);
        }
    }

    shell.destroy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_headless_with_defaults() {
        run_headless(&AppConfig::default()).unwrap();
    }

    #[test]
    fn test_run_headless_rejects_bad_colour() {
        let mut config = AppConfig::default();
        config.palette = vec!["not-a-colour".to_string()];
        assert!(run_headless(&config).is_err());
    }
}
