use log::trace;

use super::{Entry, UpdateFn, UpdateId, UpdateOptions};

/// Insertion-ordered list of registered entries.
///
/// Dispatch order is insertion order. The same callback registered twice
/// produces two independent entries with distinct ids.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, callback: UpdateFn, options: UpdateOptions) -> UpdateId {
        let id = UpdateId::new(self.next_id);
        self.next_id += 1;
        trace!("entry {id:?} registered ({options:?})");
        self.entries.push(Entry::new(id, callback, options));
        id
    }

    /// Inserts a pre-built entry whose id was minted elsewhere.
    pub(crate) fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Removes the entry with the given id. Unknown ids are a no-op.
    pub(crate) fn remove(&mut self, id: UpdateId) {
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            self.entries.remove(pos);
            trace!("entry {id:?} removed");
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut Entry {
        &mut self.entries[index]
    }

    pub(crate) fn contains(&self, id: UpdateId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Next id the registry would mint; used to seed a dispatch pass.
    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Adopts ids minted during a dispatch pass.
    pub(crate) fn set_next_id(&mut self, next: u64) {
        debug_assert!(next >= self.next_id);
        self.next_id = next;
    }

    #[cfg(test)]
    pub(crate) fn entry_by_id_mut(&mut self, id: UpdateId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Control;

    fn noop() -> UpdateFn {
        Box::new(|_, _, _| Control::Keep)
    }

    #[test]
    fn add_assigns_distinct_ids_in_order() {
        let mut registry = Registry::new();
        let a = registry.add(noop(), UpdateOptions::every_tick());
        let b = registry.add(noop(), UpdateOptions::every_tick());
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entry_mut(0).id, a);
        assert_eq!(registry.entry_mut(1).id, b);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut registry = Registry::new();
        let id = registry.add(noop(), UpdateOptions::every_tick());
        registry.remove(id);
        assert!(registry.is_empty());

        // Removing again, or removing an id never handed out, changes nothing.
        registry.remove(id);
        registry.remove(UpdateId::new(999));
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_keeps_minting_fresh_ids() {
        let mut registry = Registry::new();
        let a = registry.add(noop(), UpdateOptions::every_tick());
        registry.clear();
        let b = registry.add(noop(), UpdateOptions::every_tick());
        assert_ne!(a, b);
        assert!(registry.contains(b));
        assert!(!registry.contains(a));
    }
}
