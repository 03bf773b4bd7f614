// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State-change subscriptions.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Most drawers have one or two listeners (the owning screen, maybe a menu
/// button), so keep those inline.
const INLINE_SUBSCRIBERS: usize = 2;

type Callback = Box<dyn FnMut(bool)>;

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered list of expanded-state callbacks.
///
/// Callbacks run in subscription order and receive the newly landed
/// expanded flag.
#[derive(Default)]
pub struct Subscribers {
    entries: SmallVec<[(SubscriptionId, Callback); INLINE_SUBSCRIBERS]>,
    next_id: u64,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Subscribers {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`.
    pub fn subscribe(&mut self, callback: impl FnMut(bool) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Calls every callback with `expanded`.
    pub fn notify(&mut self, expanded: bool) {
        for (_, callback) in &mut self.entries {
            callback(expanded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn notify_runs_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();
        let a = Rc::clone(&log);
        subs.subscribe(move |e| a.borrow_mut().push(("a", e)));
        let b = Rc::clone(&log);
        subs.subscribe(move |e| b.borrow_mut().push(("b", e)));

        subs.notify(true);

        assert_eq!(*log.borrow(), [("a", true), ("b", true)]);
    }

    #[test]
    fn unsubscribe_removes_only_that_callback() {
        let hits = Rc::new(RefCell::new(0_u32));
        let mut subs = Subscribers::new();
        let h = Rc::clone(&hits);
        let first = subs.subscribe(move |_| *h.borrow_mut() += 1);
        let h = Rc::clone(&hits);
        subs.subscribe(move |_| *h.borrow_mut() += 10);

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));

        subs.notify(false);
        assert_eq!(*hits.borrow(), 10);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut subs = Subscribers::new();
        let a = subs.subscribe(|_| {});
        subs.unsubscribe(a);
        let b = subs.subscribe(|_| {});
        assert_ne!(a, b);
    }
}
