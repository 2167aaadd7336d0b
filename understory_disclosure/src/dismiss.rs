// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal: outside-pointer and Escape listeners, plus delivery.
//!
//! Each open disclosure holds at most one listener of each
//! [`ListenerKind`], registered through the [`Environment`]. When the platform
//! reports an event, [`deliver_key`] or [`deliver_pointer`] walks the live
//! listeners in attach order and hands the event to the owning instance.
//!
//! Delivery honors [`Outcome::Stop`] the same way a responder dispatcher does.
//! Instances only act when they are the topmost open layer, so a nested
//! disclosure is dismissed before its parent even though the parent attached
//! first.
//!
//! ```rust
//! use understory_disclosure::dismiss::deliver_key;
//! use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
//! use understory_disclosure::parts::Content;
//! use understory_disclosure::{Disclosure, DisclosureConfig, Host, KeyEvent};
//!
//! let mut env = MemoryEnvironment::new();
//! let outer_el = env.create(ElementSpec::div().tab_index(-1));
//! let inner_el = env.create(ElementSpec::div().tab_index(-1));
//! let mut host = Host::new(env);
//!
//! let mut outer = Disclosure::new(&mut host, DisclosureConfig::dialog(), None, Content::new(outer_el));
//! let mut inner = Disclosure::new(&mut host, DisclosureConfig::dialog(), None, Content::new(inner_el));
//! for d in [&mut outer, &mut inner] {
//!     d.mount(&mut host);
//!     d.open(&mut host);
//!     d.flush(&mut host);
//! }
//!
//! let stopped_at = deliver_key(&mut host, &mut [&mut outer, &mut inner], &mut KeyEvent::escape());
//! assert_eq!(stopped_at, Some(inner.id()));
//! assert!(outer.is_open());
//! assert!(!inner.is_open());
//! ```

use tracing::trace;

use crate::config::DisclosureConfig;
use crate::disclosure::Disclosure;
use crate::env::Environment;
use crate::host::Host;
use crate::types::{
    DisclosureId, Key, KeyEvent, ListenerId, ListenerKind, Outcome, PointerEvent,
};

/// Listener subscriptions held by one disclosure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DismissalCoordinator {
    pointer: Option<ListenerId>,
    escape: Option<ListenerId>,
}

impl DismissalCoordinator {
    /// Create a coordinator with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listeners `config` opts into, replacing any existing ones.
    pub fn attach<E: Environment>(
        &mut self,
        env: &mut E,
        owner: DisclosureId,
        config: &DisclosureConfig,
    ) {
        self.detach(env);
        if config.close_on_outside_click {
            self.pointer = Some(env.subscribe(owner, ListenerKind::OutsidePointer));
        }
        if config.close_on_escape {
            self.escape = Some(env.subscribe(owner, ListenerKind::EscapeKey));
        }
        trace!(
            disclosure = ?owner,
            pointer = self.pointer.is_some(),
            escape = self.escape.is_some(),
            "dismissal listeners attached"
        );
    }

    /// Remove every listener. Returns how many were live.
    pub fn detach<E: Environment>(&mut self, env: &mut E) -> usize {
        let mut removed = 0;
        for id in [self.pointer.take(), self.escape.take()].into_iter().flatten() {
            if env.unsubscribe(id) {
                removed += 1;
            }
        }
        if removed > 0 {
            trace!(removed, "dismissal listeners detached");
        }
        removed
    }

    /// Whether a listener of `kind` is held.
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::OutsidePointer => self.pointer.is_some(),
            ListenerKind::EscapeKey => self.escape.is_some(),
        }
    }

    /// Whether no listener is held.
    pub fn is_empty(&self) -> bool {
        self.pointer.is_none() && self.escape.is_none()
    }
}

/// Deliver a key-down to the disclosures on `host`.
///
/// Escape goes to the Escape listeners in attach order. Tab goes to the
/// topmost open layer, which traps it if configured to. Returns the
/// disclosure that stopped the event, if any.
pub fn deliver_key<E: Environment>(
    host: &mut Host<E>,
    instances: &mut [&mut Disclosure<E::Element>],
    event: &mut KeyEvent,
) -> Option<DisclosureId> {
    match event.key {
        Key::Escape => {
            let owners = host.env.listeners(ListenerKind::EscapeKey);
            run(&owners, event, |owner, event| {
                match instances.iter_mut().find(|d| d.id() == owner) {
                    Some(d) => d.handle_escape(host, event),
                    None => Outcome::Continue,
                }
            })
        }
        Key::Tab => {
            let top = host.layers.topmost()?;
            let d = instances.iter_mut().find(|d| d.id() == top)?;
            (d.handle_tab(host, event) == Outcome::Stop).then_some(top)
        }
        _ => None,
    }
}

/// Deliver a pointer-down to the outside-pointer listeners on `host`.
///
/// Returns the disclosure that stopped the event, if any.
pub fn deliver_pointer<E: Environment>(
    host: &mut Host<E>,
    instances: &mut [&mut Disclosure<E::Element>],
    event: &mut PointerEvent<E::Element>,
) -> Option<DisclosureId> {
    let owners = host.env.listeners(ListenerKind::OutsidePointer);
    run(&owners, event, |owner, event| {
        match instances.iter_mut().find(|d| d.id() == owner) {
            Some(d) => d.handle_outside_pointer(host, event),
            None => Outcome::Continue,
        }
    })
}

/// Call `handler` per owner until one returns [`Outcome::Stop`].
fn run<Ev>(
    owners: &[DisclosureId],
    event: &mut Ev,
    mut handler: impl FnMut(DisclosureId, &mut Ev) -> Outcome,
) -> Option<DisclosureId> {
    for &owner in owners {
        if handler(owner, event) == Outcome::Stop {
            return Some(owner);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEnvironment;

    #[test]
    fn attach_replaces_existing_listeners() {
        let mut env = MemoryEnvironment::new();
        let owner = DisclosureId(7);
        let mut dismissal = DismissalCoordinator::new();

        dismissal.attach(&mut env, owner, &DisclosureConfig::default());
        dismissal.attach(&mut env, owner, &DisclosureConfig::default());
        assert_eq!(env.listener_count_for(owner), 2);

        assert_eq!(dismissal.detach(&mut env), 2);
        assert_eq!(env.listener_count(), 0);
        assert!(dismissal.is_empty());
        assert_eq!(dismissal.detach(&mut env), 0);
    }

    #[test]
    fn opt_outs_register_nothing() {
        let mut env = MemoryEnvironment::new();
        let mut dismissal = DismissalCoordinator::new();
        let config = DisclosureConfig::default().close_on_escape(false);

        dismissal.attach(&mut env, DisclosureId(0), &config);
        assert!(dismissal.is_attached(ListenerKind::OutsidePointer));
        assert!(!dismissal.is_attached(ListenerKind::EscapeKey));
        assert!(env.listeners(ListenerKind::EscapeKey).is_empty());
    }

    #[test]
    fn run_stops_at_first_stop() {
        let owners = [DisclosureId(0), DisclosureId(1), DisclosureId(2)];
        let mut seen = alloc::vec::Vec::new();
        let stopped = run(&owners, &mut (), |owner, _| {
            seen.push(owner);
            if owner == DisclosureId(1) {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(stopped, Some(DisclosureId(1)));
        assert_eq!(seen, [DisclosureId(0), DisclosureId(1)]);
    }
}
