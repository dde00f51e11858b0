use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Lifetime of a mounted item.
///
/// Work scheduled against a scope is cancelled when the scope is disposed,
/// and a task that still fires for a dead scope does nothing.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    alive: Cell<bool>,
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Scope>>,
}

/// Non-owning handle used by scheduled tasks.
#[derive(Clone)]
pub struct WeakScope(Weak<ScopeInner>);

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                alive: Cell::new(true),
                disposers: RefCell::new(Vec::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    pub fn downgrade(&self) -> WeakScope {
        WeakScope(Rc::downgrade(&self.inner))
    }

    /// Registers cleanup. On an already disposed scope it runs immediately.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        if !self.is_alive() {
            disposer();
            return;
        }
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn child(&self) -> Scope {
        let child = Scope::new();
        if self.is_alive() {
            self.inner.children.borrow_mut().push(child.clone());
        } else {
            child.dispose();
        }
        child
    }

    /// Disposes children first, then runs this scope's disposers.
    /// Safe to call more than once.
    pub fn dispose(&self) {
        if !self.inner.alive.replace(false) {
            return;
        }
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl WeakScope {
    pub fn is_alive(&self) -> bool {
        self.0.upgrade().is_some_and(|inner| inner.alive.get())
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.alive.set(false);
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}
