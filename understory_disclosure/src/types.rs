// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared identifiers, input events, and propagation outcomes.

/// Identifier for a disclosure instance registered on a [`Host`](crate::host::Host).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisclosureId(pub(crate) u32);

impl DisclosureId {
    /// Get the raw id value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Transition counter for one disclosure instance.
///
/// Incremented on every effective open/closed change. Deferred work carries the
/// generation it was scheduled under and is dropped once it no longer matches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub(crate) u64);

impl Generation {
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier for a document-level listener handed out by an
/// [`Environment`](crate::env::Environment).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Kind of document-level listener a disclosure attaches while open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-down anywhere in the document.
    OutsidePointer,
    /// Key-down of the Escape key.
    EscapeKey,
}

/// Propagation control returned by event handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Let the event continue to the next listener.
    Continue,
    /// Stop the event here.
    Stop,
}

/// Direction of an effective open/closed change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenChange {
    /// The disclosure became open.
    Opened,
    /// The disclosure became closed.
    Closed,
}

/// Keys the disclosure reacts to. Everything else is [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// The Tab key; combine with [`Modifiers::SHIFT`] for reverse order.
    Tab,
    /// The Enter key.
    Enter,
    /// The space bar.
    Space,
    /// Any other key.
    Other,
}

bitflags::bitflags! {
    /// Keyboard modifier state at the time of a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift is held.
        const SHIFT = 0b0000_0001;
        /// Control is held.
        const CTRL  = 0b0000_0010;
        /// Alt/Option is held.
        const ALT   = 0b0000_0100;
        /// Meta/Command is held.
        const META  = 0b0000_1000;
    }
}

/// A key-down event travelling through disclosure handlers.
#[derive(Clone, Debug)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held while pressing.
    pub modifiers: Modifiers,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl KeyEvent {
    /// Create a key event with the given modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Escape with no modifiers.
    pub fn escape() -> Self {
        Self::new(Key::Escape, Modifiers::empty())
    }

    /// Tab, or Shift+Tab when `backward` is set.
    pub fn tab(backward: bool) -> Self {
        let modifiers = if backward {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        Self::new(Key::Tab, modifiers)
    }

    /// Whether a handler already stopped this event.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop later handlers from acting on this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler asked the platform to skip its default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the platform to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// A pointer-down event travelling through disclosure handlers.
///
/// `target` is `None` when the press landed outside any known element (for
/// example on the window chrome).
#[derive(Clone, Debug)]
pub struct PointerEvent<K> {
    /// Element under the pointer.
    pub target: Option<K>,
    propagation_stopped: bool,
}

impl<K> PointerEvent<K> {
    /// Create a pointer-down event on `target`.
    pub fn down(target: Option<K>) -> Self {
        Self {
            target,
            propagation_stopped: false,
        }
    }

    /// Whether a handler already stopped this event.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop later handlers from acting on this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
