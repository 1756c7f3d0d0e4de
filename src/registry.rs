//! Chart handle bookkeeping for the presentation layer.
//!
//! A chart must be disposed before a replacement is drawn into the same
//! slot. The registry is an ordinary value owned by whoever renders; there
//! is no process-wide instance.

use std::collections::HashMap;
use tracing::debug;

/// A live chart created by the rendering backend.
pub trait ChartHandle {
    /// Releases the backend resources held by this chart.
    fn dispose(&mut self);
}

pub struct ChartRegistry<H: ChartHandle> {
    charts: HashMap<String, H>,
}

impl<H: ChartHandle> ChartRegistry<H> {
    pub fn new() -> Self {
        Self {
            charts: HashMap::new(),
        }
    }

    /// Stores `handle` under `id`, disposing whatever was there first.
    pub fn replace(&mut self, id: impl Into<String>, handle: H) {
        let id = id.into();
        if let Some(mut old) = self.charts.remove(&id) {
            debug!(chart = %id, "Disposing previous chart");
            old.dispose();
        }
        self.charts.insert(id, handle);
    }

    /// Disposes and removes the chart under `id`. Returns whether one existed.
    pub fn dispose(&mut self, id: &str) -> bool {
        match self.charts.remove(id) {
            Some(mut handle) => {
                handle.dispose();
                true
            }
            None => false,
        }
    }

    pub fn dispose_all(&mut self) {
        for (_, mut handle) in self.charts.drain() {
            handle.dispose();
        }
    }

    pub fn get(&self, id: &str) -> Option<&H> {
        self.charts.get(id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl<H: ChartHandle> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeChart {
        name: &'static str,
        disposed: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ChartHandle for FakeChart {
        fn dispose(&mut self) {
            self.disposed.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn test_replace_disposes_previous() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();

        registry.replace("beadCount", chart("first", &log));
        assert!(log.borrow().is_empty());

        registry.replace("beadCount", chart("second", &log));
        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(registry.get("beadCount").unwrap().name, "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dispose_unknown_id() {
        let mut registry: ChartRegistry<FakeChart> = ChartRegistry::new();
        assert!(!registry.dispose("missing"));
    }

    #[test]
    fn test_dispose_all() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();
        registry.replace("a", chart("a", &log));
        registry.replace("b", chart("b", &log));

        registry.dispose_all();
        assert!(registry.is_empty());
        assert_eq!(log.borrow().len(), 2);
    }

    fn chart(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> FakeChart {
        FakeChart {
            name,
            disposed: Rc::clone(log),
        }
    }
}
