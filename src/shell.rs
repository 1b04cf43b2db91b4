//! The demo shell: two nested event boxes wired from configuration
//!
//! The outer box takes its attributes from [`AppConfig::eventbox`]; the inner
//! box cycles through [`AppConfig::palette`] on each button press. Both modes
//! of the binary build the same shell, only the toolkit differs.

use anyhow::{Context, Result};
use kestrel_core::{Registry, Toolkit, Value, Widget};
use log::info;
use std::cell::Cell;
use std::rc::Rc;

use crate::config::AppConfig;

const INNER_MARGIN: i32 = 24;
const INNER_MIN_HEIGHT: i32 = 48;

pub struct Shell {
    root: Rc<Widget>,
    inner: Rc<Widget>,
}

impl Shell {
    pub fn build(config: &AppConfig, toolkit: &dyn Toolkit) -> Result<Self> {
        let registry = Registry::with_builtin();

        let root = registry.create("eventbox", toolkit)?;
        for (name, json) in &config.eventbox {
            let value = Value::try_from(json)
                .with_context(|| format!("eventbox attribute {:?}", name))?;
            root.set(name, value)
                .with_context(|| format!("setting eventbox attribute {:?}", name))?;
        }

        let inner = registry.create("eventbox", toolkit)?;
        inner.set("margin", Value::from(INNER_MARGIN))?;
        inner.set("min_height", Value::from(INNER_MIN_HEIGHT))?;
        if let Some(first) = config.palette.first() {
            inner
                .set("bg", Value::from(first.as_str()))
                .with_context(|| format!("palette colour {:?}", first))?;
        }
        root.set("child", Value::Widget(inner.clone()))?;

        root.connect("property::bg", |args| {
            if let Some(w) = args.first().and_then(Value::as_widget) {
                info!("Outer background is now {:?}", w.get("bg")?);
            }
            Ok(Value::Nil)
        });
        for signal in ["enter-notify-event", "leave-notify-event"] {
            root.connect(signal, move |_| {
                info!("Pointer {}", signal);
                Ok(Value::Nil)
            });
        }

        if !config.palette.is_empty() {
            let palette = config.palette.clone();
            let next = Cell::new(1usize);
            inner.connect("button-press-event", move |args| {
                let Some(w) = args.first().and_then(Value::as_widget) else {
                    return Ok(Value::Nil);
                };
                let colour = &palette[next.get() % palette.len()];
                next.set(next.get() + 1);
                w.set("bg", Value::from(colour.as_str()))?;
                Ok(Value::Bool(true))
            });
        }

        Ok(Self { root, inner })
    }

    pub fn root(&self) -> &Rc<Widget> {
        &self.root
    }

    pub fn inner(&self) -> &Rc<Widget> {
        &self.inner
    }

    /// Destroy both boxes; safe to call more than once
    pub fn destroy(&self) {
        self.root.destroy();
    }
}
