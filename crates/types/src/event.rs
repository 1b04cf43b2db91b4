//! Payloads of native pointer events, independent of the toolkit.

use serde::{Deserialize, Serialize};

/// Keyboard and pointer modifier held during an event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Lock,
    Control,
    Alt,
    Super,
    Hyper,
    Meta,
}

impl Modifier {
    /// Name handed to script handlers
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Shift => "Shift",
            Modifier::Lock => "Lock",
            Modifier::Control => "Control",
            Modifier::Alt => "Mod1",
            Modifier::Super => "Mod4",
            Modifier::Hyper => "Hyper",
            Modifier::Meta => "Meta",
        }
    }
}

/// A button press or release
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ButtonEvent {
    /// Button number, 1 = primary
    pub button: u32,
    pub x: f64,
    pub y: f64,
    pub modifiers: Vec<Modifier>,
}

impl ButtonEvent {
    pub fn new(button: u32, x: f64, y: f64) -> Self {
        Self {
            button,
            x,
            y,
            modifiers: Vec::new(),
        }
    }
}

/// Pointer entering or leaving a widget
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrossingEvent {
    /// Coordinates are absent on leave
    pub position: Option<(f64, f64)>,
    pub modifiers: Vec<Modifier>,
}
