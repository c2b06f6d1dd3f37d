//! In-memory platform for headless hosts and tests.
//!
//! Storage is a map, the OS scheme is a field, and the document root is a
//! [`DocumentState`] record. The host drives "environment" events explicitly
//! with [`MemoryPlatform::set_system_mode`] and
//! [`MemoryPlatform::external_write`].

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use crate::mode::Mode;
use crate::subscription::Subscription;

use super::{Platform, PlatformError, StorageChange, StorageListener, SystemModeListener};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Snapshot of the simulated document root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub classes: BTreeSet<String>,
    pub color_scheme: Option<Mode>,
    pub theme_color: Option<String>,
    /// Total DOM mutations applied.
    pub mutations: usize,
    /// Mutations applied while transitions were *not* suppressed.
    pub unsuppressed_mutations: usize,
}

impl DocumentState {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

struct Listeners<L> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, L)>>,
}

impl<L: Clone> Listeners<L> {
    fn new() -> Self {
        Self { next_id: Cell::new(0), entries: RefCell::new(Vec::new()) }
    }

    fn add(&self, listener: L) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn snapshot(&self) -> Vec<L> {
        self.entries.borrow().iter().map(|(_, l)| l.clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

struct Inner {
    browser: bool,
    storage: RefCell<Option<HashMap<String, String>>>,
    system: Cell<Option<Mode>>,
    storage_listeners: Listeners<StorageListener>,
    system_listeners: Listeners<SystemModeListener>,
    document: RefCell<DocumentState>,
    suppressing: Cell<bool>,
}

/// Shared handle; clones observe and drive the same environment.
#[derive(Clone)]
pub struct MemoryPlatform {
    inner: Rc<Inner>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlatform {
    /// A browser-like environment with empty storage and an unknown OS scheme.
    #[must_use]
    pub fn new() -> Self {
        Self::build(true)
    }

    /// A non-browser environment: no storage, no document, no events.
    #[must_use]
    pub fn server() -> Self {
        Self::build(false)
    }

    fn build(browser: bool) -> Self {
        Self {
            inner: Rc::new(Inner {
                browser,
                storage: RefCell::new(browser.then(HashMap::new)),
                system: Cell::new(None),
                storage_listeners: Listeners::new(),
                system_listeners: Listeners::new(),
                document: RefCell::new(DocumentState::default()),
                suppressing: Cell::new(false),
            }),
        }
    }

    /// Seed a stored value.
    #[must_use]
    pub fn with_stored(self, key: &str, value: &str) -> Self {
        if let Some(storage) = self.inner.storage.borrow_mut().as_mut() {
            storage.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Seed the OS scheme without firing change events.
    #[must_use]
    pub fn with_system_mode(self, mode: Mode) -> Self {
        if self.inner.browser {
            self.inner.system.set(Some(mode));
        }
        self
    }

    /// Drop storage entirely, as in a locked-down browser profile.
    #[must_use]
    pub fn without_storage(self) -> Self {
        *self.inner.storage.borrow_mut() = None;
        self
    }

    /// Change the OS scheme and fire the change event.
    pub fn set_system_mode(&self, mode: Mode) {
        if !self.inner.browser {
            return;
        }
        self.inner.system.set(Some(mode));
        for listener in self.inner.system_listeners.snapshot() {
            listener(mode);
        }
    }

    /// Write storage as another tab would, firing a storage event.
    pub fn external_write(&self, key: &str, value: Option<&str>) {
        {
            let mut storage = self.inner.storage.borrow_mut();
            let Some(storage) = storage.as_mut() else {
                return;
            };
            match value {
                Some(v) => storage.insert(key.to_owned(), v.to_owned()),
                None => storage.remove(key),
            };
        }
        self.fire_storage(&StorageChange { key: Some(key.to_owned()), new_value: value.map(str::to_owned) });
    }

    /// Clear storage as another tab would.
    pub fn external_clear(&self) {
        {
            let mut storage = self.inner.storage.borrow_mut();
            let Some(storage) = storage.as_mut() else {
                return;
            };
            storage.clear();
        }
        self.fire_storage(&StorageChange { key: None, new_value: None });
    }

    fn fire_storage(&self, change: &StorageChange) {
        for listener in self.inner.storage_listeners.snapshot() {
            listener(change);
        }
    }

    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.inner.storage.borrow().as_ref().and_then(|s| s.get(key).cloned())
    }

    #[must_use]
    pub fn document(&self) -> DocumentState {
        self.inner.document.borrow().clone()
    }

    #[must_use]
    pub fn storage_listener_count(&self) -> usize {
        self.inner.storage_listeners.len()
    }

    #[must_use]
    pub fn system_listener_count(&self) -> usize {
        self.inner.system_listeners.len()
    }

    fn mutate_document(&self, f: impl FnOnce(&mut DocumentState)) -> Result<(), PlatformError> {
        if !self.inner.browser {
            return Err(PlatformError::DocumentUnavailable);
        }
        let mut doc = self.inner.document.borrow_mut();
        f(&mut doc);
        doc.mutations += 1;
        if !self.inner.suppressing.get() {
            doc.unsuppressed_mutations += 1;
        }
        Ok(())
    }
}

impl Platform for MemoryPlatform {
    fn is_browser(&self) -> bool {
        self.inner.browser
    }

    fn storage_get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        match self.inner.storage.borrow().as_ref() {
            Some(storage) => Ok(storage.get(key).cloned()),
            None => Err(PlatformError::StorageUnavailable),
        }
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        match self.inner.storage.borrow_mut().as_mut() {
            Some(storage) => {
                storage.insert(key.to_owned(), value.to_owned());
                Ok(())
            }
            None => Err(PlatformError::StorageUnavailable),
        }
    }

    fn watch_storage(&self, listener: StorageListener) -> Option<Subscription> {
        if !self.inner.browser {
            return None;
        }
        let id = self.inner.storage_listeners.add(listener);
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Some(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.storage_listeners.remove(id);
            }
        }))
    }

    fn system_mode(&self) -> Option<Mode> {
        self.inner.system.get()
    }

    fn watch_system_mode(&self, listener: SystemModeListener) -> Option<Subscription> {
        if !self.inner.browser {
            return None;
        }
        let id = self.inner.system_listeners.add(listener);
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Some(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.system_listeners.remove(id);
            }
        }))
    }

    fn add_root_classes(&self, classes: &[String]) -> Result<(), PlatformError> {
        self.mutate_document(|doc| doc.classes.extend(classes.iter().cloned()))
    }

    fn remove_root_classes(&self, classes: &[String]) -> Result<(), PlatformError> {
        self.mutate_document(|doc| {
            for class in classes {
                doc.classes.remove(class);
            }
        })
    }

    fn set_color_scheme(&self, mode: Mode) -> Result<(), PlatformError> {
        self.mutate_document(|doc| doc.color_scheme = Some(mode))
    }

    fn set_theme_color(&self, color: &str) -> Result<(), PlatformError> {
        self.mutate_document(|doc| doc.theme_color = Some(color.to_owned()))
    }

    fn without_transitions(&self, action: &mut dyn FnMut()) {
        let outer = self.inner.suppressing.replace(true);
        action();
        self.inner.suppressing.set(outer);
    }
}

impl std::fmt::Debug for MemoryPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPlatform")
            .field("browser", &self.inner.browser)
            .field("system", &self.inner.system.get())
            .field("document", &*self.inner.document.borrow())
            .finish_non_exhaustive()
    }
}
