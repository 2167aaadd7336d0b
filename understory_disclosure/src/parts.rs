// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound parts of a disclosure.
//!
//! Parts are small, `Copy` descriptions of the elements a component renders.
//! They hold no state of their own; every operation takes the
//! [`Disclosure`] it belongs to, so one controller drives all of them.

use crate::disclosure::Disclosure;
use crate::env::{ElementHandle, Environment};
use crate::host::Host;
use crate::presence::Phase;

/// The element that opens and closes the disclosure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trigger<K> {
    element: K,
}

impl<K: Copy + Eq + core::hash::Hash + core::fmt::Debug> Trigger<K> {
    /// Describe a trigger element.
    pub fn new(element: K) -> Self {
        Self { element }
    }

    /// The trigger element.
    #[inline]
    pub fn element(&self) -> K {
        self.element
    }

    /// Imperative handle to the trigger element.
    pub fn handle(&self) -> ElementHandle<K> {
        ElementHandle::new(self.element)
    }

    /// Activation (click, Enter, Space) toggles the disclosure.
    pub fn press<E>(&self, disclosure: &mut Disclosure<K>, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        disclosure.toggle(host);
    }

    /// Value for `aria-expanded`.
    pub fn aria_expanded(&self, disclosure: &Disclosure<K>) -> bool {
        disclosure.is_open()
    }

    /// Value for `data-state`.
    pub fn data_state(&self, disclosure: &Disclosure<K>) -> &'static str {
        if disclosure.is_open() { "open" } else { "closed" }
    }
}

/// The disclosed element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Content<K> {
    element: K,
    anchor: Option<K>,
    initial_focus: Option<K>,
}

impl<K: Copy + Eq + core::fmt::Debug> Content<K> {
    /// Describe a content element.
    pub fn new(element: K) -> Self {
        Self {
            element,
            anchor: None,
            initial_focus: None,
        }
    }

    /// Where to attach the content when it is not portalled.
    pub fn anchor(mut self, anchor: K) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Element to focus on open, instead of the first tabbable one.
    pub fn initial_focus(mut self, target: K) -> Self {
        self.initial_focus = Some(target);
        self
    }

    /// The content element.
    #[inline]
    pub fn element(&self) -> K {
        self.element
    }

    /// Configured anchor.
    #[inline]
    pub fn anchor_element(&self) -> Option<K> {
        self.anchor
    }

    /// Configured initial focus target.
    #[inline]
    pub fn initial_focus_element(&self) -> Option<K> {
        self.initial_focus
    }

    /// Imperative handle to the content element.
    pub fn handle(&self) -> ElementHandle<K> {
        ElementHandle::new(self.element)
    }
}

/// A button inside the content that closes the disclosure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Close<K> {
    element: K,
}

impl<K: Copy + Eq + core::hash::Hash + core::fmt::Debug> Close<K> {
    /// Describe a close button.
    pub fn new(element: K) -> Self {
        Self { element }
    }

    /// The close button element.
    #[inline]
    pub fn element(&self) -> K {
        self.element
    }

    /// Activation closes the disclosure.
    pub fn press<E>(&self, disclosure: &mut Disclosure<K>, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        disclosure.close(host);
    }
}

/// Render flags for the content part.
///
/// `is_open` is the logical state, `mounted` follows presence (it stays set
/// through an exit transition), and `rendered` additionally honors
/// force-mounting. A force-mounted, closed content is rendered but hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContentState {
    /// Logical open state.
    pub is_open: bool,
    /// Whether presence keeps the content mounted.
    pub mounted: bool,
    /// Whether the content is in the tree at all.
    pub rendered: bool,
    /// Presence phase.
    pub phase: Phase,
}

impl ContentState {
    /// Whether the rendered content should be visible.
    #[inline]
    pub fn visible(&self) -> bool {
        self.mounted
    }

    /// Whether the content is in the tree but should be hidden.
    #[inline]
    pub fn hidden(&self) -> bool {
        self.rendered && !self.mounted
    }

    /// Value for `data-state`.
    #[inline]
    pub fn data_state(&self) -> &'static str {
        self.phase.data_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisclosureConfig;
    use crate::memory::{ElementSpec, MemoryEnvironment};

    #[test]
    fn trigger_and_close_drive_the_disclosure() {
        let mut env = MemoryEnvironment::new();
        let opener = env.append(env.body(), ElementSpec::button());
        let panel = env.create(ElementSpec::div());
        let dismiss = env.append(panel, ElementSpec::button());
        let mut host = Host::new(env);
        let trigger = Trigger::new(opener);
        let close = Close::new(dismiss);
        let mut d = Disclosure::new(
            &mut host,
            DisclosureConfig::dialog(),
            Some(trigger),
            Content::new(panel),
        );
        d.mount(&mut host);

        assert!(!trigger.aria_expanded(&d));
        trigger.press(&mut d, &mut host);
        assert!(trigger.aria_expanded(&d));
        assert_eq!(trigger.data_state(&d), "open");

        close.press(&mut d, &mut host);
        assert!(!d.is_open());
        assert_eq!(trigger.data_state(&d), "closed");
    }
}
