//! Choice of how a widget background gets painted
//!
//! Two strategies give the same visible result: a per-widget CSS provider
//! through the styling layer, or filling the widget's area directly in its
//! snapshot. The choice is made once per process.

use clap::ValueEnum;
use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Background strategy requested by configuration or command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StylePreference {
    /// Pick from the running toolkit's capabilities
    #[default]
    Auto,
    Css,
    Paint,
}

/// Background strategy in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundStyle {
    /// `background-color` rule in a CSS provider keyed by widget name
    Css,
    /// Color fill in the widget's snapshot
    Paint,
}

/// Oldest GTK whose styling layer is used for backgrounds
const CSS_MIN_VERSION: (u32, u32, u32) = (4, 10, 0);

/// What the running toolkit offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub gtk_version: (u32, u32, u32),
    pub has_display: bool,
}

impl Capabilities {
    /// Query the running GTK; call after GTK is initialized
    pub fn probe() -> Self {
        Self {
            gtk_version: (
                gtk4::major_version(),
                gtk4::minor_version(),
                gtk4::micro_version(),
            ),
            has_display: gtk4::gdk::Display::default().is_some(),
        }
    }
}

static SELECTED: OnceCell<BackgroundStyle> = OnceCell::new();

impl BackgroundStyle {
    pub fn resolve(preference: StylePreference, caps: Capabilities) -> Self {
        match preference {
            StylePreference::Css => BackgroundStyle::Css,
            StylePreference::Paint => BackgroundStyle::Paint,
            StylePreference::Auto => {
                if caps.has_display && caps.gtk_version >= CSS_MIN_VERSION {
                    BackgroundStyle::Css
                } else {
                    BackgroundStyle::Paint
                }
            }
        }
    }

    /// The process-wide strategy, resolved on first call
    ///
    /// Later calls return the first result regardless of `preference`.
    pub fn selected(preference: StylePreference) -> Self {
        *SELECTED.get_or_init(|| {
            let caps = Capabilities::probe();
            let style = Self::resolve(preference, caps);
            info!(
                "Background style: {:?} (requested {:?}, GTK {}.{}.{}, display: {})",
                style,
                preference,
                caps.gtk_version.0,
                caps.gtk_version.1,
                caps.gtk_version.2,
                caps.has_display
            );
            style
        })
    }
}

/// CSS rule painting the widget named `name`
pub fn background_css(name: &str, spec: &str) -> String {
    format!("#{} {{ background-color: {}; }}", name, spec)
}
