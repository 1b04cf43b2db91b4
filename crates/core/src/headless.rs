//! In-memory toolkit without a display
//!
//! Keeps the state a real toolkit would keep and delivers native signals
//! synchronously. Used for `--headless` runs and throughout the tests, where
//! [`HeadlessWidget::emit`] stands in for user input.

use crate::native::{
    NativeEvent, NativeHandler, NativeKind, NativeSignal, NativeWidget, Propagation, Toolkit,
};
use kestrel_types::{Color, ObjectId, Side};
use log::{trace, warn};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessToolkit;

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self
    }
}

impl Toolkit for HeadlessToolkit {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn create(&self, kind: NativeKind, id: ObjectId) -> Box<dyn NativeWidget> {
        Box::new(HeadlessWidget::new(kind, id))
    }
}

#[derive(Debug)]
struct State {
    visible: bool,
    focused: bool,
    tooltip: Option<String>,
    allocation: (i32, i32),
    size_request: (i32, i32),
    margins: HashMap<Side, i32>,
    child: Option<HeadlessWidget>,
    parent: Option<ObjectId>,
    background: Option<(Color, String)>,
    destroyed: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            visible: false,
            focused: false,
            tooltip: None,
            allocation: (0, 0),
            size_request: (-1, -1),
            margins: HashMap::new(),
            child: None,
            parent: None,
            background: None,
            destroyed: false,
        }
    }
}

type SharedHandler = Rc<dyn Fn(&NativeEvent) -> Propagation>;

struct Inner {
    id: ObjectId,
    kind: NativeKind,
    state: RefCell<State>,
    handlers: RefCell<Vec<(NativeSignal, SharedHandler)>>,
}

/// Native object of the headless toolkit
///
/// Cloning yields another handle to the same object.
#[derive(Clone)]
pub struct HeadlessWidget {
    inner: Rc<Inner>,
}

impl HeadlessWidget {
    pub fn new(kind: NativeKind, id: ObjectId) -> Self {
        Self {
            inner: Rc::new(Inner {
                id,
                kind,
                state: RefCell::new(State::default()),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Deliver a native emission to connected handlers
    ///
    /// Handlers run in connection order until one stops propagation.
    pub fn emit(&self, signal: NativeSignal, event: NativeEvent) -> Propagation {
        if self.is_destroyed() {
            return Propagation::Proceed;
        }

        trace!("headless {}: emitting {}", self.inner.id, signal.name());

        let handlers: Vec<SharedHandler> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .filter(|(s, _)| *s == signal)
            .map(|(_, h)| h.clone())
            .collect();

        for handler in handlers {
            if handler(&event).is_stop() {
                return Propagation::Stop;
            }
        }
        Propagation::Proceed
    }

    pub fn handler_count(&self, signal: NativeSignal) -> usize {
        self.inner
            .handlers
            .borrow()
            .iter()
            .filter(|(s, _)| *s == signal)
            .count()
    }

    /// Last background applied, with the string it was parsed from
    pub fn background(&self) -> Option<(Color, String)> {
        self.inner.state.borrow().background.clone()
    }

    /// Pretend a layout pass assigned this size
    pub fn allocate(&self, width: i32, height: i32) {
        self.inner.state.borrow_mut().allocation = (width, height);
    }

    /// Move keyboard focus in or out, emitting the matching signal
    pub fn set_focus(&self, focused: bool) {
        self.inner.state.borrow_mut().focused = focused;
        let signal = if focused {
            NativeSignal::FocusIn
        } else {
            NativeSignal::FocusOut
        };
        self.emit(signal, NativeEvent::Plain);
    }

    pub fn parent_id(&self) -> Option<ObjectId> {
        self.inner.state.borrow().parent
    }

    pub fn child_id(&self) -> Option<ObjectId> {
        self.inner.state.borrow().child.as_ref().map(|c| c.inner.id)
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.state.borrow().destroyed
    }
}

impl fmt::Debug for HeadlessWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessWidget")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .finish()
    }
}

impl NativeWidget for HeadlessWidget {
    fn kind(&self) -> NativeKind {
        self.inner.kind
    }

    fn id(&self) -> ObjectId {
        self.inner.id
    }

    fn is_visible(&self) -> bool {
        self.inner.state.borrow().visible
    }

    fn set_visible(&self, visible: bool) {
        self.inner.state.borrow_mut().visible = visible;
    }

    fn has_focus(&self) -> bool {
        self.inner.state.borrow().focused
    }

    fn tooltip(&self) -> Option<String> {
        self.inner.state.borrow().tooltip.clone()
    }

    fn set_tooltip(&self, tooltip: Option<&str>) {
        self.inner.state.borrow_mut().tooltip = tooltip.map(str::to_string);
    }

    fn allocated_size(&self) -> (i32, i32) {
        self.inner.state.borrow().allocation
    }

    fn size_request(&self) -> (i32, i32) {
        self.inner.state.borrow().size_request
    }

    fn set_size_request(&self, width: i32, height: i32) {
        self.inner.state.borrow_mut().size_request = (width, height);
    }

    fn margin(&self, side: Side) -> i32 {
        self.inner
            .state
            .borrow()
            .margins
            .get(&side)
            .copied()
            .unwrap_or(0)
    }

    fn set_margin(&self, side: Side, margin: i32) {
        self.inner.state.borrow_mut().margins.insert(side, margin);
    }

    fn set_child(&self, child: Option<&dyn NativeWidget>) {
        let new = match child {
            Some(c) => match c.as_any().downcast_ref::<HeadlessWidget>() {
                Some(c) => Some(c.clone()),
                None => {
                    warn!("headless {}: ignoring foreign child {}", self.inner.id, c.id());
                    return;
                }
            },
            None => None,
        };

        let old = self.inner.state.borrow_mut().child.take();
        if let Some(old) = old {
            old.inner.state.borrow_mut().parent = None;
            self.emit(NativeSignal::Remove, NativeEvent::Child(old.inner.id));
            old.emit(NativeSignal::ParentSet, NativeEvent::Parent(None));
        }

        if let Some(new) = new {
            new.inner.state.borrow_mut().parent = Some(self.inner.id);
            self.inner.state.borrow_mut().child = Some(new.clone());
            new.emit(NativeSignal::ParentSet, NativeEvent::Parent(Some(self.inner.id)));
            self.emit(NativeSignal::Add, NativeEvent::Child(new.inner.id));
        }
    }

    fn set_background(&self, color: &Color, spec: &str) {
        self.inner.state.borrow_mut().background = Some((*color, spec.to_string()));
    }

    fn connect(&self, signal: NativeSignal, handler: NativeHandler) {
        self.inner
            .handlers
            .borrow_mut()
            .push((signal, Rc::from(handler)));
    }

    fn destroy(&self) {
        if self.is_destroyed() {
            return;
        }
        self.emit(NativeSignal::Destroy, NativeEvent::Plain);
        self.inner.state.borrow_mut().destroyed = true;
        self.inner.handlers.borrow_mut().clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
