//! Script-visible widget handle
//!
//! A [`Widget`] owns one native toolkit object for its whole lifetime and
//! resolves attribute reads and writes through the accessor tables of its
//! [`WidgetClass`]. Native signals are forwarded to script handlers through
//! the class's signal tables, which are connected once at construction.

use crate::attribute::Attribute;
use crate::error::{Error, Result, VALUE_ARG};
use crate::native::{NativeEvent, NativeKind, NativeSignal, NativeWidget, Propagation, Toolkit};
use crate::signal::{call_handlers, HandlerId, SignalRegistry};
use crate::value::Value;
use kestrel_types::ObjectId;
use log::{debug, trace, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Reads one attribute
pub type Getter = fn(&Widget) -> Value;

/// Validates and applies one attribute write
///
/// Must not mutate anything when it returns an error.
pub type Setter = fn(&Widget, &Value) -> Result<()>;

/// Translates a native emission into a script signal
pub type Forwarder = fn(&Rc<Widget>, NativeSignal, &NativeEvent) -> Propagation;

/// Typed access to one attribute
#[derive(Clone, Copy)]
pub struct Accessor {
    pub attribute: Attribute,
    pub get: Option<Getter>,
    pub set: Option<Setter>,
}

/// One native signal and the forwarder handling it
#[derive(Clone, Copy)]
pub struct SignalBinding {
    pub signal: NativeSignal,
    pub forward: Forwarder,
}

/// Static description of a widget type
pub struct WidgetClass {
    /// Type name used by scripts, e.g. `eventbox`
    pub name: &'static str,
    pub native: NativeKind,
    /// Attribute families, highest priority first
    pub families: &'static [&'static [Accessor]],
    /// Signal tables connected at construction, in order
    pub signals: &'static [&'static [SignalBinding]],
    /// Runs once after signals are connected
    pub setup: Option<fn(&Rc<Widget>)>,
}

impl WidgetClass {
    /// First accessor for `attribute` in family priority order
    pub fn accessor(&self, attribute: Attribute) -> Option<&'static Accessor> {
        self.families
            .iter()
            .flat_map(|family| family.iter())
            .find(|accessor| accessor.attribute == attribute)
    }

    /// Every native signal this class binds
    pub fn bound_signals(&self) -> impl Iterator<Item = NativeSignal> + '_ {
        self.signals
            .iter()
            .flat_map(|table| table.iter())
            .map(|binding| binding.signal)
    }
}

impl fmt::Debug for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetClass")
            .field("name", &self.name)
            .field("native", &self.native)
            .finish()
    }
}

thread_local! {
    // All widget objects alive on this thread, by id
    static OBJECTS: RefCell<HashMap<ObjectId, Weak<Widget>>> = RefCell::new(HashMap::new());
}

/// Resolve an object id from a native payload back to its widget
pub fn lookup(id: ObjectId) -> Option<Rc<Widget>> {
    OBJECTS.with(|objects| objects.borrow().get(&id).and_then(Weak::upgrade))
}

pub struct Widget {
    id: ObjectId,
    class: &'static WidgetClass,
    native: Box<dyn NativeWidget>,
    this: Weak<Widget>,
    signals: RefCell<SignalRegistry>,
    data: RefCell<HashMap<&'static str, String>>,
    parent: RefCell<Weak<Widget>>,
    child: RefCell<Option<Rc<Widget>>>,
    alive: Cell<bool>,
}

impl Widget {
    /// Construct a widget of `class` backed by a fresh native object
    pub fn new(class: &'static WidgetClass, toolkit: &dyn Toolkit) -> Rc<Widget> {
        let id = ObjectId::next();
        let native = toolkit.create(class.native, id);

        let widget = Rc::new_cyclic(|this| Widget {
            id,
            class,
            native,
            this: this.clone(),
            signals: RefCell::new(SignalRegistry::new()),
            data: RefCell::new(HashMap::new()),
            parent: RefCell::new(Weak::new()),
            child: RefCell::new(None),
            alive: Cell::new(true),
        });

        for table in class.signals {
            for binding in table.iter() {
                widget.bind(*binding);
            }
        }

        OBJECTS.with(|objects| {
            objects.borrow_mut().insert(id, Rc::downgrade(&widget));
        });

        if let Some(setup) = class.setup {
            setup(&widget);
        }

        debug!(
            "Created {} widget {} on {} toolkit",
            class.name,
            id,
            toolkit.name()
        );
        widget
    }

    fn bind(self: &Rc<Self>, binding: SignalBinding) {
        let weak = Rc::downgrade(self);
        let SignalBinding { signal, forward } = binding;
        self.native.connect(
            signal,
            Box::new(move |event| match weak.upgrade() {
                Some(widget) if widget.is_alive() => {
                    trace!("{} {}: native {}", widget.class.name, widget.id, signal.name());
                    forward(&widget, signal, event)
                }
                _ => Propagation::Proceed,
            }),
        );
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn class(&self) -> &'static WidgetClass {
        self.class
    }

    pub fn native(&self) -> &dyn NativeWidget {
        self.native.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    fn check_alive(&self) -> Result<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(Error::DeadWidget(self.id))
        }
    }

    /// Read an attribute by name; unknown names read as nil
    pub fn get(&self, name: &str) -> Result<Value> {
        match Attribute::parse(name) {
            Some(attribute) => Ok(self.index(attribute)?.unwrap_or_default()),
            None => Ok(Value::Nil),
        }
    }

    /// Write an attribute by name
    ///
    /// Names the class does not know fail with [`Error::UnknownAttribute`],
    /// known names without a setter with [`Error::ReadOnly`].
    pub fn set(&self, name: &str, value: Value) -> Result<()> {
        let unknown = || Error::UnknownAttribute {
            class: self.class.name,
            name: name.to_string(),
        };
        let attribute = Attribute::parse(name).ok_or_else(unknown)?;

        if self.newindex(attribute, &value)? {
            return Ok(());
        }

        match self.class.accessor(attribute) {
            Some(_) => Err(Error::ReadOnly {
                name: name.to_string(),
            }),
            None => Err(unknown()),
        }
    }

    /// Resolve a read through the class families
    ///
    /// `None` means no family recognizes the attribute.
    pub fn index(&self, attribute: Attribute) -> Result<Option<Value>> {
        if !matches!(attribute, Attribute::Type | Attribute::IsAlive) {
            self.check_alive()?;
        }

        Ok(self
            .class
            .accessor(attribute)
            .and_then(|accessor| accessor.get)
            .map(|get| get(self)))
    }

    /// Resolve a write through the class families
    ///
    /// Returns `false`, without notifying, when no family accepts the write.
    /// A successful write emits `property::<name>`; the write stands even if
    /// a notification handler fails.
    pub fn newindex(&self, attribute: Attribute, value: &Value) -> Result<bool> {
        self.check_alive()?;

        let Some(set) = self.class.accessor(attribute).and_then(|a| a.set) else {
            return Ok(false);
        };

        set(self, value)?;
        self.emit_logged(&attribute.property_signal(), Vec::new());
        Ok(true)
    }

    /// Connect a script handler to a signal
    pub fn connect(
        &self,
        signal: &str,
        handler: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> HandlerId {
        self.signals.borrow_mut().connect(signal, Rc::new(handler))
    }

    pub fn disconnect(&self, id: HandlerId) -> bool {
        self.signals.borrow_mut().disconnect(id)
    }

    /// Emit a script signal with this widget prepended to `args`
    ///
    /// Returns the first non-nil handler result.
    pub fn emit(&self, signal: &str, args: Vec<Value>) -> Result<Value> {
        let handlers = self.signals.borrow().handlers(signal);
        if handlers.is_empty() {
            return Ok(Value::Nil);
        }

        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(self.this.upgrade().map(Value::Widget).unwrap_or_default());
        full.extend(args);

        trace!(
            "{} {}: emitting {} to {} handler(s)",
            self.class.name,
            self.id,
            signal,
            handlers.len()
        );
        call_handlers(&handlers, &full)
    }

    /// Emit where nobody can receive an error; handler failures are logged
    /// and read as nil
    pub fn emit_logged(&self, signal: &str, args: Vec<Value>) -> Value {
        match self.emit(signal, args) {
            Ok(ret) => ret,
            Err(e) => {
                warn!(
                    "{} {}: {} handler failed: {}",
                    self.class.name, self.id, signal, e
                );
                Value::Nil
            }
        }
    }

    /// Auxiliary string data attached to this widget
    pub fn data(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    /// Attach auxiliary data, replacing any previous value for `key`
    pub fn set_data(&self, key: &'static str, value: String) {
        self.data.borrow_mut().insert(key, value);
    }

    pub fn parent(&self) -> Option<Rc<Widget>> {
        self.parent.borrow().upgrade()
    }

    pub fn child(&self) -> Option<Rc<Widget>> {
        self.child.borrow().clone()
    }

    pub fn children(&self) -> Vec<Rc<Widget>> {
        self.child().into_iter().collect()
    }

    fn is_ancestor_of(&self, widget: &Widget) -> bool {
        let mut current = widget.parent();
        while let Some(w) = current {
            if w.id == self.id {
                return true;
            }
            current = w.parent();
        }
        false
    }

    /// Replace the single child
    pub fn set_child(&self, child: Option<Rc<Widget>>) -> Result<()> {
        self.check_alive()?;

        if let Some(c) = &child {
            if c.id == self.id || c.is_ancestor_of(self) {
                return Err(Error::BadArgument {
                    position: VALUE_ARG,
                    message: "a widget cannot contain itself".to_string(),
                });
            }
            c.check_alive()?;
            match c.parent() {
                Some(p) if p.id == self.id => return Ok(()),
                Some(p) => {
                    return Err(Error::BadArgument {
                        position: VALUE_ARG,
                        message: format!("widget {} already has parent {}", c.id, p.id),
                    })
                }
                None => {}
            }
        }

        let old = self.child.replace(child.clone());
        if let Some(old) = &old {
            *old.parent.borrow_mut() = Weak::new();
        }
        if let Some(c) = &child {
            *c.parent.borrow_mut() = self.this.clone();
        }

        self.native.set_child(child.as_deref().map(Widget::native));
        Ok(())
    }

    /// Destroy this widget, its child first
    ///
    /// Emits `destroy` once; afterwards only `type` and `is_alive` can be read.
    pub fn destroy(&self) {
        if !self.is_alive() {
            return;
        }

        let child = self.child.borrow_mut().take();
        if let Some(child) = child {
            child.destroy();
        }

        if let Some(parent) = self.parent() {
            let is_our_parent = parent.child().map_or(false, |c| c.id == self.id);
            if is_our_parent {
                parent.child.borrow_mut().take();
                parent.native.set_child(None);
            }
            *self.parent.borrow_mut() = Weak::new();
        }

        self.native.destroy();
        self.finish_destroy();
    }

    /// Mark dead and drop script handlers; idempotent
    pub(crate) fn finish_destroy(&self) {
        if self.alive.replace(false) {
            debug!("Destroyed {} widget {}", self.class.name, self.id);
        }
        self.signals.borrow_mut().clear();
    }
}

impl Drop for Widget {
    /// Losing the last handle destroys the native object as well
    ///
    /// Script `destroy` handlers still run, but receive nil in place of the
    /// widget.
    fn drop(&mut self) {
        if self.is_alive() {
            debug!("Dropping live {} widget {}", self.class.name, self.id);
            if let Some(child) = self.child.get_mut().take() {
                child.destroy();
            }
            self.emit_logged(NativeSignal::Destroy.name(), Vec::new());
            self.native.destroy();
            self.finish_destroy();
        }

        let _ = OBJECTS.try_with(|objects| {
            objects.borrow_mut().remove(&self.id);
        });
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("class", &self.class.name)
            .field("alive", &self.alive.get())
            .field("signals", &self.signals)
            .finish()
    }
}
