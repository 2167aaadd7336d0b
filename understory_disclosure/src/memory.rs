// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document implementing [`Environment`].
//!
//! `MemoryEnvironment` keeps a small element tree rooted at a body node, a
//! focused element, a manual clock, and a listener registry. It is the
//! environment for render targets without a DOM and the one every test in
//! this crate runs against.
//!
//! ```rust
//! use understory_disclosure::env::Environment;
//! use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
//!
//! let mut env = MemoryEnvironment::new();
//! let body = env.body();
//! let button = env.append(body, ElementSpec::button());
//! let note = env.append(body, ElementSpec::div());
//!
//! assert!(env.focus(button).is_ok());
//! assert_eq!(env.active_element(), Some(button));
//! assert!(env.focus(note).is_err());
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::env::Environment;
use crate::error::DisclosureError;
use crate::tab_order::TabCandidate;
use crate::types::{DisclosureId, ListenerId, ListenerKind};

/// Handle to a node in a [`MemoryEnvironment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);

impl NodeRef {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Element kinds relevant to the tab-order query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `<button>`.
    Button,
    /// `<a>`; only links with an href are natively focusable.
    Link {
        /// Whether the link carries an href.
        href: bool,
    },
    /// `<input>`.
    Input,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    TextArea,
    /// Any non-interactive container.
    Generic,
}

impl ElementKind {
    fn natively_focusable(self) -> bool {
        match self {
            Self::Button | Self::Input | Self::Select | Self::TextArea => true,
            Self::Link { href } => href,
            Self::Generic => false,
        }
    }
}

/// Description of an element to insert.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementSpec {
    /// Element kind.
    pub kind: ElementKind,
    /// Explicit tab index, if any.
    pub tab_index: Option<i32>,
    /// Disabled form control.
    pub disabled: bool,
    /// Layout bounds.
    pub bounds: Option<Rect>,
}

impl ElementSpec {
    /// Element of the given kind with no explicit tab index.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            tab_index: None,
            disabled: false,
            bounds: None,
        }
    }

    /// `<button>`.
    pub fn button() -> Self {
        Self::new(ElementKind::Button)
    }

    /// `<a href>`.
    pub fn link() -> Self {
        Self::new(ElementKind::Link { href: true })
    }

    /// `<input>`.
    pub fn input() -> Self {
        Self::new(ElementKind::Input)
    }

    /// `<select>`.
    pub fn select() -> Self {
        Self::new(ElementKind::Select)
    }

    /// `<textarea>`.
    pub fn textarea() -> Self {
        Self::new(ElementKind::TextArea)
    }

    /// `<div>`.
    pub fn div() -> Self {
        Self::new(ElementKind::Generic)
    }

    /// Set an explicit tab index.
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Mark the element disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set layout bounds.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Effective tab index under the tab-order query, or `None` if unmatched.
    pub fn effective_tab_index(&self) -> Option<i32> {
        match self.tab_index {
            Some(i) => Some(i),
            None => self.kind.natively_focusable().then_some(0),
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    spec: ElementSpec,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
}

/// In-memory document with a manual clock.
#[derive(Clone, Debug)]
pub struct MemoryEnvironment {
    nodes: Vec<Node>,
    body: NodeRef,
    active: Option<NodeRef>,
    now: u64,
    portals: bool,
    portal_host: Option<NodeRef>,
    listeners: HashMap<ListenerId, (DisclosureId, ListenerKind)>,
    next_listener: u64,
}

impl Default for MemoryEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEnvironment {
    /// Create a document containing only a body node.
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Node {
                spec: ElementSpec::div(),
                parent: None,
                children: Vec::new(),
            }],
            body: NodeRef(0),
            active: None,
            now: 0,
            portals: true,
            portal_host: None,
            listeners: HashMap::new(),
            next_listener: 0,
        }
    }

    /// Create a document with no portal root; content renders in place.
    pub fn without_portals() -> Self {
        Self {
            portals: false,
            ..Self::new()
        }
    }

    /// The body node.
    #[inline]
    pub fn body(&self) -> NodeRef {
        self.body
    }

    /// Create a detached element.
    pub fn create(&mut self, spec: ElementSpec) -> NodeRef {
        let id = NodeRef(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            spec,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: NodeRef, spec: ElementSpec) -> NodeRef {
        let id = self.create(spec);
        self.attach(parent, id);
        id
    }

    /// Parent of `node`.
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes.get(node.idx()).and_then(|n| n.parent)
    }

    /// Children of `node`, in document order.
    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        self.nodes
            .get(node.idx())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to an element's description.
    pub fn spec_mut(&mut self, node: NodeRef) -> Option<&mut ElementSpec> {
        self.nodes.get_mut(node.idx()).map(|n| &mut n.spec)
    }

    /// Force the focused element, bypassing focusability checks.
    pub fn set_active(&mut self, node: Option<NodeRef>) {
        self.active = node;
    }

    /// Advance the clock.
    pub fn advance(&mut self, millis: u64) {
        self.now = self.now.saturating_add(millis);
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of live listeners registered by `owner`.
    pub fn listener_count_for(&self, owner: DisclosureId) -> usize {
        self.listeners.values().filter(|(o, _)| *o == owner).count()
    }

    fn descendants(&self, root: NodeRef, out: &mut Vec<NodeRef>) {
        for &child in self.children(root) {
            out.push(child);
            self.descendants(child, out);
        }
    }
}

impl Environment for MemoryEnvironment {
    type Element = NodeRef;

    fn now(&self) -> u64 {
        self.now
    }

    fn active_element(&self) -> Option<NodeRef> {
        self.active.filter(|&a| self.is_connected(a))
    }

    fn focus(&mut self, element: NodeRef) -> Result<(), DisclosureError> {
        if !self.is_connected(element) {
            return Err(DisclosureError::Detached);
        }
        if !self.is_focusable(element) {
            return Err(DisclosureError::NotFocusable);
        }
        self.active = Some(element);
        Ok(())
    }

    fn is_connected(&self, element: NodeRef) -> bool {
        self.contains(self.body, element)
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    fn is_focusable(&self, element: NodeRef) -> bool {
        self.nodes
            .get(element.idx())
            .is_some_and(|n| !n.spec.disabled && n.spec.effective_tab_index().is_some())
    }

    fn tab_candidates(&self, root: NodeRef) -> Vec<TabCandidate<NodeRef>> {
        let mut all = Vec::new();
        self.descendants(root, &mut all);
        all.into_iter()
            .filter_map(|n| {
                let spec = &self.nodes[n.idx()].spec;
                spec.effective_tab_index().map(|tab_index| TabCandidate {
                    element: n,
                    tab_index,
                    disabled: spec.disabled,
                })
            })
            .collect()
    }

    fn bounding_box(&self, element: NodeRef) -> Option<Rect> {
        self.nodes.get(element.idx()).and_then(|n| n.spec.bounds)
    }

    fn portal_root(&mut self) -> Option<NodeRef> {
        if !self.portals {
            return None;
        }
        if let Some(host) = self.portal_host {
            return Some(host);
        }
        let body = self.body;
        let host = self.append(body, ElementSpec::div());
        self.portal_host = Some(host);
        Some(host)
    }

    fn attach(&mut self, parent: NodeRef, child: NodeRef) {
        if child == parent || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent.idx()) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child.idx()) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, child: NodeRef) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent.idx()) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.nodes.get_mut(child.idx()) {
            c.parent = None;
        }
    }

    fn subscribe(&mut self, owner: DisclosureId, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (owner, kind));
        id
    }

    fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        self.listeners.remove(&listener).is_some()
    }

    fn listeners(&self, kind: ListenerKind) -> Vec<DisclosureId> {
        let mut live: Vec<(ListenerId, DisclosureId)> = self
            .listeners
            .iter()
            .filter(|(_, (_, k))| *k == kind)
            .map(|(&id, &(owner, _))| (id, owner))
            .collect();
        live.sort_by_key(|(id, _)| *id);
        live.into_iter().map(|(_, owner)| owner).collect()
    }
}
