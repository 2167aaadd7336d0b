// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portal host: where mounted content lives in the document.
//!
//! All portalled content shares one host node obtained from
//! [`Environment::portal_root`]. When the target has no such root, content is
//! attached under its anchor instead, or left where it already is.

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::env::Environment;
use crate::types::DisclosureId;

/// Where a content element was placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement<K> {
    /// Appended to the shared portal host node.
    Portal {
        /// The host node.
        host: K,
    },
    /// Rendered in the regular tree.
    InPlace {
        /// Anchor it was attached under, if it was moved at all.
        parent: Option<K>,
    },
}

/// Tracks mounted content per disclosure.
#[derive(Clone, Debug)]
pub struct PortalHost<K> {
    host_node: Option<K>,
    mounted: HashMap<DisclosureId, (K, Placement<K>)>,
}

impl<K> Default for PortalHost<K> {
    fn default() -> Self {
        Self {
            host_node: None,
            mounted: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> PortalHost<K> {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `content` for `id`. Mounting twice keeps the first placement.
    pub fn mount<E>(
        &mut self,
        env: &mut E,
        id: DisclosureId,
        content: K,
        anchor: Option<K>,
        use_portal: bool,
    ) -> Placement<K>
    where
        E: Environment<Element = K>,
    {
        if let Some(&(_, placement)) = self.mounted.get(&id) {
            return placement;
        }
        let host = if use_portal { self.host_node(env) } else { None };
        let placement = match (host, anchor) {
            (Some(host), _) => {
                env.attach(host, content);
                Placement::Portal { host }
            }
            (None, Some(anchor)) => {
                env.attach(anchor, content);
                Placement::InPlace {
                    parent: Some(anchor),
                }
            }
            (None, None) => {
                if use_portal {
                    debug!(id = id.get(), "no portal root; rendering content in place");
                }
                Placement::InPlace { parent: None }
            }
        };
        trace!(id = id.get(), ?placement, "content mounted");
        self.mounted.insert(id, (content, placement));
        placement
    }

    /// Unmount the content for `id`. Returns `false` if nothing was mounted.
    ///
    /// Content that was never moved is left attached.
    pub fn unmount<E>(&mut self, env: &mut E, id: DisclosureId) -> bool
    where
        E: Environment<Element = K>,
    {
        let Some((content, placement)) = self.mounted.remove(&id) else {
            return false;
        };
        if !matches!(placement, Placement::InPlace { parent: None }) {
            env.detach(content);
        }
        trace!(id = id.get(), "content unmounted");
        true
    }

    /// Placement of the content for `id`, if mounted.
    pub fn placement(&self, id: DisclosureId) -> Option<Placement<K>> {
        self.mounted.get(&id).map(|&(_, p)| p)
    }

    /// Whether content is mounted for `id`.
    pub fn is_mounted(&self, id: DisclosureId) -> bool {
        self.mounted.contains_key(&id)
    }

    /// Number of mounted contents.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    fn host_node<E>(&mut self, env: &mut E) -> Option<K>
    where
        E: Environment<Element = K>,
    {
        match self.host_node {
            Some(h) if env.is_connected(h) => Some(h),
            _ => {
                self.host_node = env.portal_root();
                self.host_node
            }
        }
    }
}
