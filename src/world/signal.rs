//! Generation-complete signal
//!
//! Collaborators (content placement, spawners) must not read chunk or scalar
//! data before this fires; the signal is the ordering contract, not a lock.

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Zero-argument fan-out signal with explicit subscription bookkeeping.
/// Owned by the generator; no global dispatch.
#[derive(Default)]
pub struct CompletionSignal {
    subscribers: Vec<(SubscriberId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: Box<dyn FnMut()>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Invoke every subscriber once, in subscription order.
    pub fn fire(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fire_reaches_every_subscriber() {
        let mut signal = CompletionSignal::new();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));

        let a2 = Rc::clone(&a);
        let b2 = Rc::clone(&b);
        signal.subscribe(Box::new(move || a2.set(a2.get() + 1)));
        signal.subscribe(Box::new(move || b2.set(b2.get() + 1)));

        signal.fire();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);

        signal.fire();
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut signal = CompletionSignal::new();
        let count = Rc::new(Cell::new(0));

        let count2 = Rc::clone(&count);
        let id = signal.subscribe(Box::new(move || count2.set(count2.get() + 1)));
        signal.fire();
        assert_eq!(count.get(), 1);

        signal.unsubscribe(id);
        assert_eq!(signal.subscriber_count(), 0);
        signal.fire();
        assert_eq!(count.get(), 1);
    }
}
