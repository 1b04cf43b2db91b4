//! Per-object signal handler registry

use crate::error::Result;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A script-side signal handler
///
/// Receives the emitting object as its first argument, followed by the
/// signal's own arguments.
pub type Handler = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// Returned by [`SignalRegistry::connect`], used to disconnect again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

#[derive(Default)]
pub struct SignalRegistry {
    next_id: u64,
    handlers: HashMap<String, Vec<(HandlerId, Handler)>>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `name`
    pub fn connect(&mut self, name: &str, handler: Handler) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.handlers
            .entry(name.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a handler, returns whether it was connected
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        let mut found = false;
        self.handlers.retain(|_, list| {
            let before = list.len();
            list.retain(|(handler_id, _)| *handler_id != id);
            found |= list.len() != before;
            !list.is_empty()
        });
        found
    }

    /// Snapshot of the handlers for `name`, in connection order
    pub fn handlers(&self, name: &str) -> Vec<Handler> {
        self.handlers
            .get(name)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    }

    pub fn has_handlers(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("SignalRegistry")
            .field("signals", &names)
            .finish()
    }
}

/// Call handlers in order until one returns a non-nil value
pub fn call_handlers(handlers: &[Handler], args: &[Value]) -> Result<Value> {
    for handler in handlers {
        let ret = handler(args)?;
        if !ret.is_nil() {
            return Ok(ret);
        }
    }
    Ok(Value::Nil)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str, ret: Value) -> Handler {
        let log = log.clone();
        Rc::new(move |_args| {
            log.borrow_mut().push(tag);
            Ok(ret.clone())
        })
    }

    #[test]
    fn test_first_non_nil_result_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SignalRegistry::new();
        registry.connect("button-press-event", recorder(&log, "a", Value::Nil));
        registry.connect("button-press-event", recorder(&log, "b", Value::Bool(true)));
        registry.connect("button-press-event", recorder(&log, "c", Value::Bool(false)));

        let ret = call_handlers(&registry.handlers("button-press-event"), &[]).unwrap();
        assert_eq!(ret, Value::Bool(true));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_disconnect() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SignalRegistry::new();
        let id = registry.connect("add", recorder(&log, "a", Value::Nil));

        assert!(registry.has_handlers("add"));
        assert!(registry.disconnect(id));
        assert!(!registry.disconnect(id));
        assert!(!registry.has_handlers("add"));
        assert!(registry.handlers("add").is_empty());
    }

    #[test]
    fn test_unknown_signal_returns_nil() {
        let registry = SignalRegistry::new();
        assert_eq!(call_handlers(&registry.handlers("nope"), &[]), Ok(Value::Nil));
    }
}
