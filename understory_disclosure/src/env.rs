// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment adapter: the boundary between the disclosure and its render target.
//!
//! Everything the primitive needs from the outside world goes through
//! [`Environment`]. That covers focus, containment, the clock, portal
//! attachment, and document-level listener registration. A browser binding
//! implements it over the DOM. [`MemoryEnvironment`](crate::memory::MemoryEnvironment)
//! implements it over an in-memory tree for non-browser targets and tests.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;

use crate::error::DisclosureError;
use crate::tab_order::TabCandidate;
use crate::types::{DisclosureId, ListenerId, ListenerKind};

/// Host services consumed by a disclosure.
pub trait Environment {
    /// Element handle type of the render target.
    type Element: Copy + Eq + Hash + Debug;

    /// Monotonic clock in milliseconds.
    fn now(&self) -> u64;

    /// Element that currently has focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Move focus to `element`.
    fn focus(&mut self, element: Self::Element) -> Result<(), DisclosureError>;

    /// Whether `element` is attached to the document.
    fn is_connected(&self, element: Self::Element) -> bool;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Element, node: Self::Element) -> bool;

    /// Whether `element` can take programmatic focus (any tab index, including negative).
    fn is_focusable(&self, element: Self::Element) -> bool;

    /// Descendants of `root` (excluding `root`) matched by the tab-order query,
    /// in document order.
    fn tab_candidates(&self, root: Self::Element) -> Vec<TabCandidate<Self::Element>>;

    /// Layout bounds of `element`, if it has been laid out.
    fn bounding_box(&self, element: Self::Element) -> Option<Rect>;

    /// Shared host node for portalled content, creating it on first use.
    ///
    /// Returns `None` when the target has no document root; content is then
    /// rendered in place.
    fn portal_root(&mut self) -> Option<Self::Element>;

    /// Append `child` to `parent`, detaching it from any previous parent.
    fn attach(&mut self, parent: Self::Element, child: Self::Element);

    /// Detach `child` (and its subtree) from its parent.
    fn detach(&mut self, child: Self::Element);

    /// Register a document-level listener on behalf of `owner`.
    fn subscribe(&mut self, owner: DisclosureId, kind: ListenerKind) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, listener: ListenerId) -> bool;

    /// Owners of live listeners of `kind`, in attach order.
    fn listeners(&self, kind: ListenerKind) -> Vec<DisclosureId>;
}

/// Imperative handle to one part of a disclosure.
///
/// Exposes only the operations callers need, independent of the render
/// target's own element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle<K> {
    element: K,
}

impl<K: Copy> ElementHandle<K> {
    /// Wrap an element.
    pub fn new(element: K) -> Self {
        Self { element }
    }

    /// The wrapped element.
    #[inline]
    pub fn element(&self) -> K {
        self.element
    }

    /// Move focus to this element.
    pub fn focus<E>(&self, env: &mut E) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        env.focus(self.element)
    }

    /// Layout bounds of this element.
    pub fn bounding_box<E>(&self, env: &E) -> Option<Rect>
    where
        E: Environment<Element = K>,
    {
        env.bounding_box(self.element)
    }
}
