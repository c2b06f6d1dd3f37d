//! Single-threaded observable cell with lazy start/stop.
//!
//! DESIGN
//! ======
//! A cell holds one value and a list of observers. An optional start hook runs
//! when the first observer arrives and hands back a `Subscription` that is
//! dropped when the last observer leaves. This is how environment listeners
//! (storage events, media queries) are attached only while someone is
//! watching.
//!
//! Notifications are synchronous and in registration order. Observers receive
//! the cell's value at the moment they are called, so a nested `set` from
//! inside a notification never leaves a later observer with a stale value.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::subscription::Subscription;

#[cfg(test)]
#[path = "observable_test.rs"]
mod observable_test;

type Observer<T> = Rc<dyn Fn(&T)>;
type StartHook<T> = Box<dyn Fn(Setter<T>) -> Option<Subscription>>;

struct Inner<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(u64, Observer<T>)>>,
    next_id: Cell<u64>,
    start: Option<StartHook<T>>,
    stop: RefCell<Option<Subscription>>,
}

impl<T: Clone + PartialEq + 'static> Inner<T> {
    fn current(&self) -> T {
        self.value.borrow().clone()
    }

    fn set(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        *self.value.borrow_mut() = value;

        let observers: Vec<Observer<T>> = self.observers.borrow().iter().map(|(_, o)| Rc::clone(o)).collect();
        for observer in observers {
            observer(&self.current());
        }
        true
    }

    fn remove(&self, id: u64) {
        let idle = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|(oid, _)| *oid != id);
            observers.is_empty()
        };
        if idle {
            // Release outside the borrow; teardown may re-enter other cells.
            let stop = self.stop.borrow_mut().take();
            drop(stop);
        }
    }
}

/// Observable value shared by cheap clones.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// A plain cell with no start hook.
    pub fn new(value: T) -> Self {
        Self::build(value, None)
    }

    /// A cell whose `start` hook runs on first subscribe.
    ///
    /// The hook receives a [`Setter`] and may return a stop handle; the stop
    /// handle is dropped once the cell has no observers left.
    pub fn with_start<F>(value: T, start: F) -> Self
    where
        F: Fn(Setter<T>) -> Option<Subscription> + 'static,
    {
        Self::build(value, Some(Box::new(start)))
    }

    fn build(value: T, start: Option<StartHook<T>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                start,
                stop: RefCell::new(None),
            }),
        }
    }

    /// Current value.
    ///
    /// An idle cell with a start hook is subscribed for the duration of the
    /// read so the hook gets a chance to produce a fresh value.
    pub fn get(&self) -> T {
        if self.inner.start.is_some() && !self.is_active() {
            let _probe = self.subscribe(|_| {});
            return self.inner.current();
        }
        self.inner.current()
    }

    /// Current value without running the start hook.
    pub(crate) fn peek(&self) -> T {
        self.inner.current()
    }

    /// Store `value` and notify observers. Returns `false` when unchanged.
    pub fn set(&self, value: T) -> bool {
        self.inner.set(value)
    }

    /// A handle that can set this cell without keeping it alive.
    pub fn setter(&self) -> Setter<T> {
        Setter { inner: Rc::downgrade(&self.inner) }
    }

    /// Register `observer`, call it with the current value, and return the
    /// guard that removes it.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        // Start before registering: a value the hook sets reaches the new
        // observer once, through the initial call below.
        if !self.is_active() {
            if let Some(start) = &self.inner.start {
                let stop = start(self.setter());
                *self.inner.stop.borrow_mut() = stop;
            }
        }

        let observer: Observer<T> = Rc::new(observer);
        self.inner.observers.borrow_mut().push((id, Rc::clone(&observer)));

        observer(&self.inner.current());

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove(id);
            }
        })
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Whether at least one observer is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.observer_count() > 0
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// Weak write handle to an [`Observable`].
pub struct Setter<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self { inner: Weak::clone(&self.inner) }
    }
}

impl<T: Clone + PartialEq + 'static> Setter<T> {
    /// Set the cell if it still exists. Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        self.inner.upgrade().is_some_and(|inner| inner.set(value))
    }
}
