/// Handle returned by [`ObserverRegistry::register`], usable to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

/// Registry of zero-argument change callbacks. Notification is synchronous
/// and pull-based: observers re-read game state themselves. Callbacks run on
/// the caller's thread and must not re-enter the engine.
#[derive(Default)]
pub struct ObserverRegistry {
    next_handle: u64,
    observers: Vec<(ObserverHandle, Box<dyn FnMut()>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: impl FnMut() + 'static) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        self.observers.push((handle, Box::new(callback)));
        handle
    }

    pub fn deregister(&mut self, handle: ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    pub fn notify_all(&mut self) {
        for (_, callback) in self.observers.iter_mut() {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ObserverRegistry;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_every_observer() {
        let mut registry = ObserverRegistry::new();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let count = Rc::clone(&count);
            registry.register(move || count.set(count.get() + 1));
        }
        registry.notify_all();
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn deregistered_observers_stop_receiving() {
        let mut registry = ObserverRegistry::new();
        let count = Rc::new(Cell::new(0));
        let handle = {
            let count = Rc::clone(&count);
            registry.register(move || count.set(count.get() + 1))
        };
        assert!(registry.deregister(handle));
        assert!(!registry.deregister(handle));
        registry.notify_all();
        assert_eq!(count.get(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_registrations_are_allowed() {
        let mut registry = ObserverRegistry::new();
        let count = Rc::new(Cell::new(0));
        let a = Rc::clone(&count);
        let b = Rc::clone(&count);
        registry.register(move || a.set(a.get() + 1));
        registry.register(move || b.set(b.get() + 1));
        assert_eq!(registry.len(), 2);
        registry.notify_all();
        assert_eq!(count.get(), 2);
    }
}
