//! Two-way bindings to state owned outside a component.
//!
//! A `Binding<T>` is an explicit getter/setter pair. Components read it on
//! every pass and write it only at their commit points; they never hold the
//! value themselves.

use std::fmt;
use std::rc::Rc;

use crate::Signal;

#[derive(Clone)]
pub struct Binding<T: 'static> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T: Clone + 'static> Binding<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Always reads `value`; writes are dropped.
    pub fn constant(value: T) -> Self {
        Self::new(move || value.clone(), |_| {})
    }

    /// Reads and writes go through `signal`, so its subscribers observe writes.
    pub fn from_signal(signal: &Signal<T>) -> Self {
        let read = signal.clone();
        let write = signal.clone();
        Self::new(move || read.get(), move |v| write.set(v))
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }

    /// Binding onto a projection of this one.
    pub fn map<U: Clone + 'static>(
        &self,
        to: impl Fn(T) -> U + 'static,
        from: impl Fn(U) -> T + 'static,
    ) -> Binding<U> {
        let get = self.get.clone();
        let set = self.set.clone();
        Binding::new(move || to(get()), move |u| set(from(u)))
    }
}

impl Binding<bool> {
    pub fn toggle(&self) {
        self.set(!self.get())
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}
