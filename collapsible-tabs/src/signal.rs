use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(&str, f32)>;

struct Inner {
    value: Cell<f32>,
    owner: RefCell<Option<String>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

/// The shared "how far has the active tab scrolled" value.
///
/// Cloning is cheap and every clone observes the same value. The signal is owned by exactly one
/// route key at a time; reports from any other list are dropped, so the value is always
/// attributable to the active tab.
///
/// This type is single-threaded (`!Send`): scroll events, gestures and animation ticks are all
/// delivered on the UI thread.
#[derive(Clone)]
pub struct ScrollSignal {
    inner: Rc<Inner>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                value: Cell::new(0.0),
                owner: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn owner(&self) -> Option<String> {
        self.inner.owner.borrow().clone()
    }

    pub fn is_owned_by(&self, key: &str) -> bool {
        self.inner.owner.borrow().as_deref() == Some(key)
    }

    pub(crate) fn set_owner(&self, key: &str) {
        *self.inner.owner.borrow_mut() = Some(key.to_owned());
    }

    /// Reports a scroll offset coming from the list identified by `key`.
    ///
    /// Returns `false` (and leaves the value untouched) when `key` does not own the signal or
    /// the offset is not finite.
    pub fn report(&self, key: &str, offset: f32) -> bool {
        if !offset.is_finite() || !self.is_owned_by(key) {
            return false;
        }
        self.publish(offset);
        true
    }

    /// Publishes a value on behalf of the current owner.
    pub(crate) fn publish(&self, offset: f32) {
        self.inner.value.set(offset);
        let Some(owner) = self.owner() else {
            return;
        };
        // Listeners may subscribe/unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&owner, offset);
        }
    }

    /// Registers a listener called with `(owner_key, value)` after every accepted update.
    ///
    /// The listener stays registered for as long as the returned [`Subscription`] is alive.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&str, f32) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            signal: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSignal")
            .field("value", &self.value())
            .field("owner", &self.inner.owner.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A live listener registration on a [`ScrollSignal`]. Unsubscribes on drop.
pub struct Subscription {
    signal: Weak<Inner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
