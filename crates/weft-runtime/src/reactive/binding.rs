#![forbid(unsafe_code)]

//! Two-way [`Binding<T>`]: a readable, writable, observable value handle.
//!
//! A binding is a cheap `Clone` handle over a *source*. Sources are either
//! independent cells ([`Binding::new`]), fixed values ([`Binding::constant`]),
//! or views derived from other bindings:
//!
//! - [`Binding::project`] / [`project!`]: lens over one field of the parent.
//! - [`Binding::combine`]: pair of two bindings, latest-of-both stream.
//! - [`Binding::map`]: read-only transform (sets are ignored).
//! - [`Binding::widen`] / [`Binding::narrow`]: `T` ↔ `Option<T>`.
//!
//! # Usage
//!
//! ```
//! use weft_runtime::reactive::Binding;
//! use weft_runtime::project;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Profile {
//!     name: String,
//!     age: u32,
//! }
//!
//! let profile = Binding::new(Profile { name: "Ada".into(), age: 36 });
//! let age = project!(profile, age);
//!
//! age.set(37);
//! assert_eq!(profile.get().age, 37);
//! assert_eq!(profile.get().name, "Ada");
//! ```
//!
//! # Invariants
//!
//! 1. `get()` immediately after `set(v)` returns `v`.
//! 2. `subscribe` is hot: the callback runs once with the current value
//!    before `subscribe` returns, then once per later `set`.
//! 3. Every `set` notifies, even when the new value equals the old one.
//! 4. Notification is synchronous and depth-first; a single `set` may cascade
//!    through any chain of derived bindings within one call stack.
//! 5. A subscriber must not set the binding that is notifying it. The write
//!    is rejected: [`Binding::try_set`] reports [`BindingError::Reentrant`],
//!    [`Binding::set`] panics. Setting *other* bindings from a subscriber is
//!    fine.
//!
//! # Failure Modes
//!
//! - Re-entrant set: see invariant 5.
//! - Narrowing a binding whose current value is `None`: [`Binding::narrow`]
//!   returns `None`. No binding is created.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::error::BindingError;
use super::observable::{Listener, Subscription, ValueCell};

trait Source<T> {
    fn get(&self) -> T;
    fn try_set(&self, value: T) -> Result<(), BindingError>;
    fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription;
    fn subscriber_count(&self) -> usize;

    fn is_constant(&self) -> bool {
        false
    }

    fn as_cell(&self) -> Option<&ValueCell<T>> {
        None
    }
}

// ---------------------------------------------------------------------------
// Binding<T>
// ---------------------------------------------------------------------------

/// A two-way, hot, observable value handle.
///
/// Clones share the same source: a `set` through any clone is visible to all.
pub struct Binding<T> {
    source: Rc<dyn Source<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .field("constant", &self.is_constant())
            .finish()
    }
}

impl<T: Clone + Default + 'static> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Binding<T> {
    /// Create an independent, writable binding holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            source: Rc::new(ValueCell::new(initial)),
        }
    }

    /// Create a read-only binding over a fixed value.
    ///
    /// Its stream emits the value once on subscription and never again;
    /// sets are ignored.
    pub fn constant(value: T) -> Self {
        Self {
            source: Rc::new(Constant { value }),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    /// Borrow the current value without cloning when the binding is backed
    /// directly by a cell; derived bindings evaluate and lend a temporary.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.source.as_cell() {
            Some(cell) => cell.with(f),
            None => f(&self.source.get()),
        }
    }

    /// Store `value` and notify subscribers before returning.
    ///
    /// # Panics
    ///
    /// Panics when called from a subscriber of this same binding while it is
    /// notifying (see the module invariants). Use [`Binding::try_set`] to
    /// handle that case without panicking.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            panic!("{err}");
        }
    }

    /// Fallible form of [`Binding::set`].
    pub fn try_set(&self, value: T) -> Result<(), BindingError> {
        self.source.try_set(value).inspect_err(|err| {
            tracing::warn!(error = %err, "binding write rejected");
        })
    }

    /// Read-modify-write: `f` receives a copy of the current value, the
    /// result is written back through [`Binding::set`].
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Observe the value. `f` runs immediately with the current value, then
    /// after every set, until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(Listener::new(f))
    }

    /// Derive a binding over one field of this binding's value.
    ///
    /// Writing the projection reads the parent's whole current value, applies
    /// `set` to it and writes the whole value back. The projection's stream
    /// is the parent's stream mapped through `get`. See also [`project!`].
    pub fn project<F: Clone + 'static>(
        &self,
        get: impl Fn(&T) -> F + 'static,
        set: impl Fn(&mut T, F) + 'static,
    ) -> Binding<F> {
        Binding {
            source: Rc::new(Projection {
                parent: self.clone(),
                get: Rc::new(get),
                set: Box::new(set),
            }),
        }
    }

    /// Derive a read-only binding by transforming each value.
    ///
    /// The transform runs on every `get` and every emission (no caching).
    /// Sets on the result are ignored.
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Binding<U> {
        Binding {
            source: Rc::new(Mapped {
                parent: self.clone(),
                map: Rc::new(f),
            }),
        }
    }

    /// View this binding as `Binding<Option<T>>`.
    ///
    /// Reads are always `Some`. Setting `Some(v)` writes `v` through; setting
    /// `None` is ignored since the source cannot hold it.
    pub fn widen(&self) -> Binding<Option<T>> {
        Binding {
            source: Rc::new(Widened {
                parent: self.clone(),
            }),
        }
    }

    /// Whether this binding can never change (constant, or derived only from
    /// constants).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.source.is_constant()
    }

    /// Live subscriptions registered on the cells underneath this binding.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.source.subscriber_count()
    }

    /// Whether both handles refer to the same source.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }
}

impl<A: Clone + 'static, B: Clone + 'static> Binding<(A, B)> {
    /// Pair two bindings.
    ///
    /// The value is always `(a.get(), b.get())`, and every emitted pair is
    /// read from both sides at emission time. Setting a pair performs two
    /// independent writes, `a` first; subscribers of the pair therefore see
    /// the intermediate `(new_a, old_b)`. The stream emits once on
    /// subscription and then whenever either source emits.
    pub fn combine(a: &Binding<A>, b: &Binding<B>) -> Self {
        Binding {
            source: Rc::new(Combined {
                a: a.clone(),
                b: b.clone(),
            }),
        }
    }
}

impl<T: Clone + 'static> Binding<Option<T>> {
    /// View an optional binding as a non-optional one.
    ///
    /// Returns `None` when the current value is `None`.
    ///
    /// Once constructed, the narrowed binding tracks the source and remembers
    /// its most recent non-`None` value, whether or not anything reads or
    /// subscribes in between. While the source is `None`, reads return that
    /// value and the stream stays silent; `None` is never surfaced. Sets
    /// write `Some(v)` to the source.
    pub fn narrow(&self) -> Option<Binding<T>> {
        let last = Rc::new(RefCell::new(self.get()?));
        let tracker = {
            let last = Rc::clone(&last);
            self.subscribe(move |value| {
                if let Some(value) = value {
                    *last.borrow_mut() = value.clone();
                }
            })
        };
        Some(Binding {
            source: Rc::new(Narrowed {
                parent: self.clone(),
                last,
                tracker,
            }),
        })
    }
}

/// Pair two bindings. Free-function form of [`Binding::combine`].
pub fn combine<A: Clone + 'static, B: Clone + 'static>(
    a: &Binding<A>,
    b: &Binding<B>,
) -> Binding<(A, B)> {
    Binding::combine(a, b)
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Source<T> for ValueCell<T> {
    fn get(&self) -> T {
        ValueCell::get(self)
    }

    fn try_set(&self, value: T) -> Result<(), BindingError> {
        ValueCell::try_set(self, value)
    }

    fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription {
        ValueCell::subscribe(self, listener)
    }

    fn subscriber_count(&self) -> usize {
        ValueCell::subscriber_count(self)
    }

    fn as_cell(&self) -> Option<&ValueCell<T>> {
        Some(self)
    }
}

struct Constant<T> {
    value: T,
}

impl<T: Clone + 'static> Source<T> for Constant<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn try_set(&self, _value: T) -> Result<(), BindingError> {
        tracing::debug!(
            binding = std::any::type_name::<T>(),
            "set on constant binding ignored"
        );
        Ok(())
    }

    fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription {
        listener.call(&self.value);
        Subscription::empty()
    }

    fn subscriber_count(&self) -> usize {
        0
    }

    fn is_constant(&self) -> bool {
        true
    }
}

struct Projection<P, F> {
    parent: Binding<P>,
    get: Rc<dyn Fn(&P) -> F>,
    set: Box<dyn Fn(&mut P, F)>,
}

impl<P: Clone + 'static, F: Clone + 'static> Source<F> for Projection<P, F> {
    fn get(&self) -> F {
        self.parent.with(|whole| (self.get)(whole))
    }

    fn try_set(&self, value: F) -> Result<(), BindingError> {
        let mut whole = self.parent.get();
        (self.set)(&mut whole, value);
        self.parent.source.try_set(whole)
    }

    fn subscribe(&self, listener: Rc<Listener<F>>) -> Subscription {
        let get = Rc::clone(&self.get);
        self.parent
            .subscribe(move |whole| listener.call(&get(whole)))
    }

    fn subscriber_count(&self) -> usize {
        self.parent.subscriber_count()
    }

    fn is_constant(&self) -> bool {
        self.parent.is_constant()
    }
}

struct Mapped<S, T> {
    parent: Binding<S>,
    map: Rc<dyn Fn(&S) -> T>,
}

impl<S: Clone + 'static, T: Clone + 'static> Source<T> for Mapped<S, T> {
    fn get(&self) -> T {
        self.parent.with(|v| (self.map)(v))
    }

    fn try_set(&self, _value: T) -> Result<(), BindingError> {
        tracing::debug!(
            binding = std::any::type_name::<T>(),
            "set on mapped binding ignored"
        );
        Ok(())
    }

    fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription {
        let map = Rc::clone(&self.map);
        self.parent.subscribe(move |v| listener.call(&map(v)))
    }

    fn subscriber_count(&self) -> usize {
        self.parent.subscriber_count()
    }

    fn is_constant(&self) -> bool {
        self.parent.is_constant()
    }
}

struct Combined<A, B> {
    a: Binding<A>,
    b: Binding<B>,
}

impl<A: Clone + 'static, B: Clone + 'static> Source<(A, B)> for Combined<A, B> {
    fn get(&self) -> (A, B) {
        (self.a.get(), self.b.get())
    }

    fn try_set(&self, (a, b): (A, B)) -> Result<(), BindingError> {
        self.a.source.try_set(a)?;
        self.b.source.try_set(b)
    }

    fn subscribe(&self, listener: Rc<Listener<(A, B)>>) -> Subscription {
        // Both sources replay on subscription; hold emissions until both
        // have reported so the subscriber sees one initial pair.
        let ready = Rc::new(Cell::new(false));

        // Emitted pairs are read fresh from both sides rather than cached
        // per side, so two sides fed by one cell never pair a new value
        // with a stale one.
        let emit = {
            let (a, b) = (self.a.clone(), self.b.clone());
            let ready = Rc::clone(&ready);
            Rc::new(move || {
                if ready.get() {
                    listener.call(&(a.get(), b.get()));
                }
            })
        };

        let sub_a = {
            let emit = Rc::clone(&emit);
            self.a.subscribe(move |_| emit())
        };
        let sub_b = {
            let emit = Rc::clone(&emit);
            self.b.subscribe(move |_| emit())
        };

        ready.set(true);
        emit();
        sub_a.merge(sub_b)
    }

    fn subscriber_count(&self) -> usize {
        self.a.subscriber_count() + self.b.subscriber_count()
    }

    fn is_constant(&self) -> bool {
        self.a.is_constant() && self.b.is_constant()
    }
}

struct Widened<T> {
    parent: Binding<T>,
}

impl<T: Clone + 'static> Source<Option<T>> for Widened<T> {
    fn get(&self) -> Option<T> {
        Some(self.parent.get())
    }

    fn try_set(&self, value: Option<T>) -> Result<(), BindingError> {
        match value {
            Some(value) => self.parent.source.try_set(value),
            None => {
                tracing::debug!(
                    binding = std::any::type_name::<T>(),
                    "`None` written to a widened binding ignored"
                );
                Ok(())
            }
        }
    }

    fn subscribe(&self, listener: Rc<Listener<Option<T>>>) -> Subscription {
        self.parent
            .subscribe(move |v| listener.call(&Some(v.clone())))
    }

    fn subscriber_count(&self) -> usize {
        self.parent.subscriber_count()
    }

    fn is_constant(&self) -> bool {
        self.parent.is_constant()
    }
}

struct Narrowed<T> {
    parent: Binding<Option<T>>,
    last: Rc<RefCell<T>>,
    // Keeps `last` current on every source emission.
    tracker: Subscription,
}

impl<T: Clone + 'static> Source<T> for Narrowed<T> {
    fn get(&self) -> T {
        self.parent
            .get()
            .unwrap_or_else(|| self.last.borrow().clone())
    }

    fn try_set(&self, value: T) -> Result<(), BindingError> {
        self.parent.source.try_set(Some(value))
    }

    fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription {
        let replayed = Rc::new(Cell::new(false));
        let sub = {
            let replayed = Rc::clone(&replayed);
            let listener = Rc::clone(&listener);
            self.parent.subscribe(move |value| {
                if let Some(value) = value {
                    replayed.set(true);
                    listener.call(value);
                }
            })
        };
        if !replayed.get() {
            let current = self.last.borrow().clone();
            listener.call(&current);
        }
        sub
    }

    fn subscriber_count(&self) -> usize {
        self.parent
            .subscriber_count()
            .saturating_sub(self.tracker.registrations())
    }

    fn is_constant(&self) -> bool {
        self.parent.is_constant()
    }
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

/// Project a [`Binding`] onto a (possibly nested) field.
///
/// Expands to [`Binding::project`] with a getter that clones the field and a
/// setter that assigns it.
///
/// ```
/// use weft_runtime::{project, reactive::Binding};
///
/// #[derive(Clone)]
/// struct Size { w: u16, h: u16 }
/// #[derive(Clone)]
/// struct Frame { size: Size }
///
/// let frame = Binding::new(Frame { size: Size { w: 4, h: 2 } });
/// let width = project!(frame, size.w);
/// width.set(10);
/// assert_eq!(frame.get().size.w, 10);
/// assert_eq!(frame.get().size.h, 2);
/// ```
#[macro_export]
macro_rules! project {
    ($binding:expr, $($field:ident).+) => {
        $crate::reactive::Binding::project(
            &$binding,
            |whole| whole.$($field).+.clone(),
            |whole, value| whole.$($field).+ = value,
        )
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
