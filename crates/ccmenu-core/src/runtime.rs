use std::collections::{HashMap, HashSet};

/// Keyed storage that outlives composition passes.
///
/// Each pass re-declares the keys it still uses through `remember_with_key`;
/// `end_pass` hands back everything that was not declared so the caller can
/// tear it down. This is how mounted items keep their controllers while the
/// menu body itself is rebuilt from scratch.
pub struct Composer<T> {
    slots: HashMap<String, T>,
    touched: HashSet<String>,
    pass: u64,
    in_pass: bool,
}

impl<T> Default for Composer<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            touched: HashSet::new(),
            pass: 0,
            in_pass: false,
        }
    }
}

impl<T> Composer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_pass(&mut self) {
        if self.in_pass {
            log::warn!("begin_pass: pass {} was never ended", self.pass);
        }
        self.touched.clear();
        self.in_pass = true;
    }

    /// Returns the slot for `key`, creating it with `init` on first use.
    /// The boolean is true when the slot was created in this call.
    pub fn remember_with_key(
        &mut self,
        key: impl Into<String>,
        init: impl FnOnce() -> T,
    ) -> (&mut T, bool) {
        let key = key.into();
        if !self.touched.insert(key.clone()) {
            log::warn!(
                "remember_with_key: key '{}' declared twice in pass {}; sharing one slot.",
                key,
                self.pass
            );
        }
        let mut created = false;
        let slot = self.slots.entry(key).or_insert_with(|| {
            created = true;
            init()
        });
        (slot, created)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.slots.get_mut(key)
    }

    /// Evicts and returns every slot not declared during this pass.
    pub fn end_pass(&mut self) -> Vec<(String, T)> {
        let stale: Vec<String> = self
            .slots
            .keys()
            .filter(|k| !self.touched.contains(*k))
            .cloned()
            .collect();
        let evicted = stale
            .into_iter()
            .filter_map(|k| self.slots.remove(&k).map(|v| (k, v)))
            .collect();
        self.pass += 1;
        self.in_pass = false;
        evicted
    }

    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (String, T)> + '_ {
        self.touched.clear();
        self.slots.drain()
    }
}
