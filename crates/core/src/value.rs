//! Values crossing the boundary between scripts and widgets

use crate::error::{Error, Result};
use crate::widget::Widget;
use std::fmt;
use std::rc::Rc;

/// A script value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Widget(Rc<Widget>),
}

impl Value {
    /// Scripting type name, as reported in argument errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "table",
            Value::Widget(_) => "widget",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only `nil` and `false` are false
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_widget(&self) -> Option<&Rc<Widget>> {
        match self {
            Value::Widget(w) => Some(w),
            _ => None,
        }
    }

    /// The value as a string, or a type error for argument `position`
    pub fn check_str(&self, position: usize) -> Result<&str> {
        self.as_str().ok_or_else(|| self.wrong_type(position, "string"))
    }

    /// A string or nil
    pub fn check_opt_str(&self, position: usize) -> Result<Option<&str>> {
        match self {
            Value::Nil => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(other.wrong_type(position, "string")),
        }
    }

    pub fn check_bool(&self, position: usize) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.wrong_type(position, "boolean")),
        }
    }

    /// An integral number that fits in an i32
    pub fn check_int(&self, position: usize) -> Result<i32> {
        match self {
            Value::Number(n)
                if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 =>
            {
                Ok(*n as i32)
            }
            Value::Number(n) => Err(Error::BadArgument {
                position,
                message: format!("number has no integer representation: {}", n),
            }),
            other => Err(other.wrong_type(position, "number")),
        }
    }

    /// A widget or nil
    pub fn check_opt_widget(&self, position: usize) -> Result<Option<&Rc<Widget>>> {
        match self {
            Value::Nil => Ok(None),
            Value::Widget(w) => Ok(Some(w)),
            other => Err(other.wrong_type(position, "widget")),
        }
    }

    fn wrong_type(&self, position: usize, expected: &'static str) -> Error {
        Error::WrongType {
            position,
            expected,
            got: self.type_name(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Widget(w) => write!(f, "widget<{}>{}", w.class().name, w.id()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Widget(a), Value::Widget(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map(Value::String).unwrap_or(Value::Nil)
    }
}

impl From<Rc<Widget>> for Value {
    fn from(w: Rc<Widget>) -> Self {
        Value::Widget(w)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = Error;

    /// Convert configuration data; JSON objects have no script counterpart here
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(_) => {
                return Err(Error::BadArgument {
                    position: crate::error::VALUE_ARG,
                    message: "objects cannot be assigned to widget attributes".to_string(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::from("").is_truthy());
    }

    #[test]
    fn test_check_int() {
        assert_eq!(Value::Number(12.0).check_int(3), Ok(12));
        assert!(matches!(
            Value::Number(1.5).check_int(3),
            Err(Error::BadArgument { position: 3, .. })
        ));
        assert_eq!(
            Value::from("12").check_int(3),
            Err(Error::WrongType {
                position: 3,
                expected: "number",
                got: "string"
            })
        );
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!(["#ff0000", 4, true, null]);
        let value = Value::try_from(&json).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::from("#ff0000"),
                Value::Number(4.0),
                Value::Bool(true),
                Value::Nil,
            ])
        );

        assert!(Value::try_from(&serde_json::json!({"a": 1})).is_err());
    }
}
