//! Observable values for UI state.
//!
//! An [`Observable`] holds one value and a list of listeners. Every `set`
//! calls all active listeners synchronously, in subscription order, before
//! returning. `subscribe` calls the new listener once with the current value.
//!
//! A `set` issued by a listener while a round is running is queued: the value
//! is stored right away, and the queued rounds run in order once the current
//! round ends, still inside the outermost `set`. The last value every listener
//! receives is therefore the value `get()` returns.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and lives on the UI
//! event loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::shared::logging::log_queued_notification;

struct Listener<T> {
    id: u64,
    active: Cell<bool>,
    callback: RefCell<Box<dyn FnMut(&T)>>,
}

struct Inner<T> {
    value: T,
    listeners: Vec<Rc<Listener<T>>>,
    next_id: u64,
    notifying: bool,
    pending: VecDeque<T>,
}

/// A shared value with subscribe/notify semantics. Clones share the value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Observable")
                .field("value", &inner.value)
                .field("listeners", &inner.listeners.len())
                .finish(),
            Err(_) => f.write_str("Observable { <borrowed> }"),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value. `f` must not write to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every listener, even when it is unchanged.
    /// Called from a listener, the notification is queued behind the running round.
    pub fn set(&self, value: T) {
        let mut current = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            if inner.notifying {
                let queued = inner.value.clone();
                inner.pending.push_back(queued);
                log_queued_notification(inner.pending.len());
                return;
            }
            inner.notifying = true;
            inner.value.clone()
        };

        let _round = RoundGuard(&*self.inner);
        loop {
            let listeners = {
                let mut inner = self.inner.borrow_mut();
                inner.listeners.retain(|l| l.active.get());
                inner.listeners.clone()
            };
            notify(&current, &listeners);

            match self.inner.borrow_mut().pending.pop_front() {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    /// Compute the next value from the current one, then `set` it.
    /// `f` must not write to this observable.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.borrow().value);
        self.set(next);
    }

    /// Register `callback`. It is called right away with the current value,
    /// then after every `set` until the returned [`Subscription`] ends.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let listener = Rc::new(Listener {
                id,
                active: Cell::new(true),
                callback: RefCell::new(Box::new(callback)),
            });
            inner.listeners.push(Rc::clone(&listener));
            listener
        };

        let current = self.get();
        notify(&current, std::slice::from_ref(&listener));

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            listener.active.set(false);
            if let Some(inner) = weak.upgrade() {
                // Inactive listeners left behind here are dropped on the next `set`
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    inner.listeners.retain(|l| l.id != listener.id);
                }
            }
        })
    }

    /// Number of active listeners
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.active.get())
            .count()
    }
}

/// Ends a notification round, also when a listener panics
struct RoundGuard<'a, T>(&'a RefCell<Inner<T>>);

impl<T> Drop for RoundGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}

fn notify<T>(value: &T, listeners: &[Rc<Listener<T>>]) {
    for listener in listeners {
        if !listener.active.get() {
            continue;
        }
        // Rounds never nest, so a listener is never running here
        if let Ok(mut callback) = listener.callback.try_borrow_mut() {
            let callback = &mut *callback;
            callback(value);
        }
    }
}

/// Handle to a listener registered with [`Observable::subscribe`].
/// The listener is removed by [`Subscription::unsubscribe`] or when the handle is dropped.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the listener for as long as the observable lives
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
