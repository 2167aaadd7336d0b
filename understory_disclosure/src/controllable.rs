// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled/uncontrolled value reconciliation.
//!
//! A [`Controllable`] either owns its value (uncontrolled) or mirrors a value
//! owned by the caller (controlled). Change requests go through
//! [`Controllable::request`]. In controlled mode the request is only forwarded
//! to the change callback, and the caller feeds the new value back with
//! [`Controllable::sync_prop`].
//!
//! ```rust
//! use understory_disclosure::controllable::Controllable;
//!
//! let mut uncontrolled = Controllable::new(None, false);
//! assert!(uncontrolled.request(true));
//! assert!(*uncontrolled.get());
//!
//! let mut controlled = Controllable::new(Some(false), false);
//! assert!(!controlled.request(true));
//! assert!(!*controlled.get());
//! assert!(controlled.sync_prop(Some(true)));
//! assert!(*controlled.get());
//! ```

use alloc::boxed::Box;

/// Callback invoked with the requested value.
pub type ChangeCallback<T> = Box<dyn FnMut(&T)>;

/// A value that is either owned locally or projected from a caller-owned prop.
pub struct Controllable<T> {
    prop: Option<T>,
    local: T,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: core::fmt::Debug> core::fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controllable")
            .field("prop", &self.prop)
            .field("local", &self.local)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: Clone + PartialEq> Controllable<T> {
    /// Create a value from an optional controlled prop and an uncontrolled default.
    pub fn new(prop: Option<T>, default: T) -> Self {
        Self {
            prop,
            local: default,
            on_change: None,
        }
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, on_change: impl FnMut(&T) + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    /// Current value: the prop when controlled, the local value otherwise.
    #[inline]
    pub fn get(&self) -> &T {
        self.prop.as_ref().unwrap_or(&self.local)
    }

    /// Whether the value is owned by the caller.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.prop.is_some()
    }

    /// Request a new value.
    ///
    /// Requests equal to the current value are ignored. Otherwise the change
    /// callback runs. Returns `true` only if the value changed locally, which
    /// never happens in controlled mode.
    pub fn request(&mut self, next: T) -> bool {
        if *self.get() == next {
            return false;
        }
        if let Some(cb) = self.on_change.as_mut() {
            cb(&next);
        }
        if self.prop.is_some() {
            return false;
        }
        self.local = next;
        true
    }

    /// Feed the caller-owned prop back in.
    ///
    /// `None` switches to uncontrolled mode, keeping the last observed value as
    /// the local one. Returns `true` if the visible value changed.
    pub fn sync_prop(&mut self, prop: Option<T>) -> bool {
        let before = self.get().clone();
        match prop {
            Some(value) => self.prop = Some(value),
            None => {
                if let Some(last) = self.prop.take() {
                    self.local = last;
                }
            }
        }
        *self.get() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn uncontrolled_request_updates_and_notifies() {
        let (seen, cb) = recorder::<bool>();
        let mut c = Controllable::new(None, false);
        c.set_on_change(cb);
        assert!(c.request(true));
        assert!(*c.get());
        assert_eq!(*seen.borrow(), [true]);
    }

    #[test]
    fn request_for_current_value_is_ignored() {
        let (seen, cb) = recorder::<bool>();
        let mut c = Controllable::new(None, true);
        c.set_on_change(cb);
        assert!(!c.request(true));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn controlled_request_only_forwards() {
        let (seen, cb) = recorder::<bool>();
        let mut c = Controllable::new(Some(false), true);
        c.set_on_change(cb);
        assert!(!*c.get());
        assert!(!c.request(true));
        assert!(!*c.get());
        assert_eq!(*seen.borrow(), [true]);
    }

    #[test]
    fn sync_prop_reports_visible_changes() {
        let mut c = Controllable::new(Some(false), false);
        assert!(!c.sync_prop(Some(false)));
        assert!(c.sync_prop(Some(true)));
        // Dropping the prop keeps the last controlled value.
        assert!(!c.sync_prop(None));
        assert!(!c.is_controlled());
        assert!(*c.get());
    }
}
