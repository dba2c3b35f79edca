// events/bus/event_bus.rs
//
// Typed, synchronous event bus with scoped subscriptions.
//
// - Handlers run immediately, in subscription order, on the emitting thread
// - `subscribe` hands back a `Subscription`; dropping it unsubscribes
// - A panicking handler is logged and does not stop the others
// - Handlers are snapshotted before dispatch, so a handler may drop a
//   subscription (its own included) without deadlocking the bus

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::error;

type EventHandler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, EventHandler<E>)>,
}

pub struct EventBus<E> {
    registry: Arc<RwLock<Registry<E>>>,
}

/// Registration guard returned by [`EventBus::subscribe`].
///
/// The handler stays registered exactly as long as this value lives.
#[must_use = "dropping a Subscription unsubscribes the handler immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unsubscribes now. Equivalent to dropping the guard.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Arc::new(handler)));
            id
        };

        let registry: Weak<RwLock<Registry<E>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    pub fn emit(&self, event: &E) {
        let handlers: Vec<EventHandler<E>> = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for (idx, handler) in handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(event);
            }));

            if result.is_err() {
                error!(
                    "Handler {} for {} panicked",
                    idx,
                    std::any::type_name::<E>()
                );
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .len()
    }
}

impl<E: 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same registry
impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_subscribe_and_emit() {
        let bus: EventBus<u32> = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let _sub = bus.subscribe(move |value| {
            counter_clone.fetch_add(*value as usize, Ordering::SeqCst);
        });

        bus.emit(&3);
        bus.emit(&4);
        assert_eq!(counter.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_handlers_execute_in_order() {
        let bus: EventBus<()> = EventBus::new();
        let sequence = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<Subscription> = (1..=3)
            .map(|n| {
                let seq = Arc::clone(&sequence);
                bus.subscribe(move |_| seq.lock().unwrap().push(n))
            })
            .collect();

        bus.emit(&());
        assert_eq!(*sequence.lock().unwrap(), vec![1, 2, 3]);
        drop(subs);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let bus: EventBus<u32> = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let sub = bus.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(&1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);

        bus.emit(&1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_unsubscribe_leaves_others() {
        let bus: EventBus<u32> = EventBus::new();
        let first = bus.subscribe(|_| {});
        let _second = bus.subscribe(|_| {});
        first.unsubscribe();
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus: EventBus<u32> = EventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus: EventBus<u32> = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let _panicking = bus.subscribe(|_| panic!("Intentional panic"));
        let counter_clone = Arc::clone(&counter);
        let _counting = bus.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
