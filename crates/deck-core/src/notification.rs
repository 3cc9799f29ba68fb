//! Named notifications with scoped subscriptions.
//!
//! A [`Subscription`] unregisters its observer when dropped, so an owner
//! that keeps the subscription in a field stops receiving notifications as
//! soon as it is torn down.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::collections::map::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotificationName(pub &'static str);

pub type ObserverId = u64;

type Observer<P> = Rc<dyn Fn(&P)>;

struct CenterInner<P> {
    observers: HashMap<NotificationName, SmallVec<[(ObserverId, Observer<P>); 2]>>,
    next_id: ObserverId,
}

impl<P> CenterInner<P> {
    fn remove(&mut self, name: NotificationName, id: ObserverId) {
        if let Some(list) = self.observers.get_mut(&name) {
            list.retain(|(observer_id, _)| *observer_id != id);
            if list.is_empty() {
                self.observers.remove(&name);
            }
        }
    }
}

/// Dispatches payloads of type `P` to observers registered by name.
pub struct NotificationCenter<P: 'static> {
    inner: Rc<RefCell<CenterInner<P>>>,
}

impl<P: 'static> Clone for NotificationCenter<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: 'static> Default for NotificationCenter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> NotificationCenter<P> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CenterInner {
                observers: HashMap::default(),
                next_id: 1,
            })),
        }
    }

    pub fn subscribe(
        &self,
        name: NotificationName,
        observer: impl Fn(&P) + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .observers
            .entry(name)
            .or_default()
            .push((id, Rc::new(observer)));
        drop(inner);

        let weak: Weak<RefCell<CenterInner<P>>> = Rc::downgrade(&self.inner);
        Subscription {
            name,
            id,
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().remove(name, id);
                }
            })),
        }
    }

    /// Deliver `payload` to every observer of `name`.
    ///
    /// Observers may subscribe or unsubscribe while being notified; the set
    /// that receives this post is fixed when the post starts.
    pub fn post(&self, name: NotificationName, payload: &P) -> usize {
        let observers: SmallVec<[Observer<P>; 2]> = self
            .inner
            .borrow()
            .observers
            .get(&name)
            .map(|list| list.iter().map(|(_, observer)| Rc::clone(observer)).collect())
            .unwrap_or_default();
        log::trace!("posting {} to {} observer(s)", name.0, observers.len());
        for observer in &observers {
            observer(payload);
        }
        observers.len()
    }
}

/// Registration returned by [`NotificationCenter::subscribe`].
pub struct Subscription {
    name: NotificationName,
    id: ObserverId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn name(&self) -> NotificationName {
        self.name
    }

    /// Unregister now instead of on drop.
    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
