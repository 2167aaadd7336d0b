// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack of open disclosures, innermost last.
//!
//! A disclosure pushes itself when it opens and removes itself when it closes.
//! Escape and outside-pointer handling consult [`LayerStack::is_topmost`] so
//! that only the innermost open layer reacts to a dismissal gesture.
//!
//! ```rust
//! use understory_disclosure::layer::LayerStack;
//! use understory_disclosure::{Host, MemoryEnvironment};
//!
//! let mut host = Host::new(MemoryEnvironment::new());
//! let (outer, inner) = (host.allocate_id(), host.allocate_id());
//!
//! let mut layers = LayerStack::new();
//! layers.push(outer);
//! layers.push(inner);
//! assert!(layers.is_topmost(inner));
//! layers.remove(inner);
//! assert!(layers.is_topmost(outer));
//! ```

use smallvec::SmallVec;

use crate::types::DisclosureId;

/// Ordered set of open layers.
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    stack: SmallVec<[DisclosureId; 4]>,
}

impl LayerStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the topmost layer, moving it if it was already present.
    pub fn push(&mut self, id: DisclosureId) {
        self.remove(id);
        self.stack.push(id);
    }

    /// Remove `id`. Returns `false` if it was not on the stack.
    pub fn remove(&mut self, id: DisclosureId) -> bool {
        match self.stack.iter().position(|&l| l == id) {
            Some(pos) => {
                self.stack.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Innermost open layer.
    #[inline]
    pub fn topmost(&self) -> Option<DisclosureId> {
        self.stack.last().copied()
    }

    /// Whether `id` is the innermost open layer.
    #[inline]
    pub fn is_topmost(&self, id: DisclosureId) -> bool {
        self.topmost() == Some(id)
    }

    /// Whether `id` is open anywhere in the stack.
    pub fn contains(&self, id: DisclosureId) -> bool {
        self.stack.contains(&id)
    }

    /// Number of open layers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Layers from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = DisclosureId> + '_ {
        self.stack.iter().copied()
    }
}
