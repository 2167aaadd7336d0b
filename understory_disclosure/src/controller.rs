// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure controller: the single owner of open/closed state.
//!
//! The controller is a pure state container. It has no knowledge of focus,
//! listeners, or rendering. It reports each effective change as an
//! [`OpenChange`] so that a caller (normally
//! [`Disclosure`](crate::disclosure::Disclosure)) can run the side effects.
//!
//! ```rust
//! use understory_disclosure::controller::Controller;
//! use understory_disclosure::{DisclosureConfig, OpenChange};
//!
//! let mut c = Controller::new(&DisclosureConfig::default());
//! assert_eq!(c.toggle(), Some(OpenChange::Opened));
//! assert!(c.is_open());
//! assert_eq!(c.open(), None);
//! assert_eq!(c.close(), Some(OpenChange::Closed));
//! assert_eq!(c.generation().get(), 2);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::DisclosureConfig;
use crate::controllable::Controllable;
use crate::types::{Generation, OpenChange};

/// Handle returned by [`Controller::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

/// Open/closed state with controlled and uncontrolled modes.
pub struct Controller {
    state: Controllable<bool>,
    generation: Generation,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(bool)>)>,
    next_subscriber: u32,
}

impl core::fmt::Debug for Controller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("is_open", &self.is_open())
            .field("is_controlled", &self.is_controlled())
            .field("generation", &self.generation)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Create a controller from the `open` / `default_open` options.
    pub fn new(config: &DisclosureConfig) -> Self {
        Self {
            state: Controllable::new(config.open, config.default_open),
            generation: Generation::default(),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Current open state.
    #[inline]
    pub fn is_open(&self) -> bool {
        *self.state.get()
    }

    /// Whether the open state is owned by the caller.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Transition counter; bumps on every effective change.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Register the `on_open_change` callback.
    ///
    /// It runs for every request that would change the state, in both modes.
    pub fn on_open_change(&mut self, mut f: impl FnMut(bool) + 'static) {
        self.state.set_on_change(move |open: &bool| f(*open));
    }

    /// Subscribe to effective state changes.
    pub fn subscribe(&mut self, f: impl FnMut(bool) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber = self.next_subscriber.wrapping_add(1);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }

    /// Request the open state.
    pub fn open(&mut self) -> Option<OpenChange> {
        self.set_open(true)
    }

    /// Request the closed state.
    pub fn close(&mut self) -> Option<OpenChange> {
        self.set_open(false)
    }

    /// Request the opposite of the current state.
    pub fn toggle(&mut self) -> Option<OpenChange> {
        self.set_open(!self.is_open())
    }

    /// Request an explicit state.
    ///
    /// Returns the effective change, which is always `None` in controlled mode.
    pub fn set_open(&mut self, next: bool) -> Option<OpenChange> {
        if self.state.request(next) {
            Some(self.commit())
        } else {
            None
        }
    }

    /// Feed back the controlled `open` value, or `None` to become uncontrolled.
    pub fn sync_prop(&mut self, open: Option<bool>) -> Option<OpenChange> {
        if self.state.sync_prop(open) {
            Some(self.commit())
        } else {
            None
        }
    }

    fn commit(&mut self) -> OpenChange {
        self.generation = self.generation.next();
        let open = self.is_open();
        for (_, f) in &mut self.subscribers {
            f(open);
        }
        if open {
            OpenChange::Opened
        } else {
            OpenChange::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn default_open_starts_open() {
        let c = Controller::new(&DisclosureConfig::default().default_open(true));
        assert!(c.is_open());
        assert_eq!(c.generation().get(), 0);
    }

    #[test]
    fn uncontrolled_changes_are_synchronous() {
        let mut c = Controller::new(&DisclosureConfig::default());
        assert_eq!(c.open(), Some(OpenChange::Opened));
        assert!(c.is_open());
        assert_eq!(c.toggle(), Some(OpenChange::Closed));
        assert!(!c.is_open());
    }

    #[test]
    fn controlled_forwards_requests_without_mutating() {
        let requested = Rc::new(RefCell::new(vec![]));
        let sink = requested.clone();
        let mut c = Controller::new(&DisclosureConfig::default().controlled(false));
        c.on_open_change(move |open| sink.borrow_mut().push(open));

        assert_eq!(c.toggle(), None);
        assert!(!c.is_open());
        assert_eq!(*requested.borrow(), [true]);

        // The caller accepts the request.
        assert_eq!(c.sync_prop(Some(true)), Some(OpenChange::Opened));
        assert!(c.is_open());
        assert_eq!(c.close(), None);
        assert_eq!(*requested.borrow(), [true, false]);
    }

    #[test]
    fn subscribers_see_only_effective_changes() {
        let seen = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        let mut c = Controller::new(&DisclosureConfig::default());
        let id = c.subscribe(move |open| sink.borrow_mut().push(open));

        c.open();
        c.open();
        c.close();
        assert_eq!(*seen.borrow(), [true, false]);

        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.open();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn generation_counts_effective_changes() {
        let mut c = Controller::new(&DisclosureConfig::default());
        c.open();
        c.open();
        c.close();
        c.close();
        assert_eq!(c.generation().get(), 2);
    }
}
