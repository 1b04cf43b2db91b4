//! Attribute names recognized on widget objects

use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Every attribute name a widget class may resolve
///
/// Names are parsed from and rendered as snake_case, so `MinWidth` is
/// `min_width` on the script side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    // common
    Type,
    Parent,
    IsAlive,
    Visible,
    Focused,
    Tooltip,
    Width,
    Height,
    MinWidth,
    MinHeight,
    Margin,
    MarginTop,
    MarginBottom,
    MarginStart,
    MarginEnd,

    // bin
    Child,

    // container
    Children,

    // eventbox
    Bg,
}

impl Attribute {
    /// Look up a name, `None` for names no class knows
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Signal emitted after a successful write to this attribute
    pub fn property_signal(&self) -> String {
        format!("property::{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip() {
        for attr in Attribute::iter() {
            assert_eq!(Attribute::parse(attr.as_str()), Some(attr));
        }
    }

    #[test]
    fn test_snake_case_names() {
        assert_eq!(Attribute::parse("bg"), Some(Attribute::Bg));
        assert_eq!(Attribute::parse("min_width"), Some(Attribute::MinWidth));
        assert_eq!(Attribute::parse("is_alive"), Some(Attribute::IsAlive));
        assert_eq!(Attribute::parse("BG"), None);
        assert_eq!(Attribute::parse("background"), None);
    }

    #[test]
    fn test_property_signal() {
        assert_eq!(Attribute::Bg.property_signal(), "property::bg");
    }
}
