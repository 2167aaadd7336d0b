// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared state for every disclosure rendered into one environment.

use crate::env::Environment;
use crate::layer::LayerStack;
use crate::portal::PortalHost;
use crate::types::DisclosureId;

/// Owner of the environment, the layer stack, and the portal host.
///
/// One host is created per render target and passed explicitly to every
/// [`Disclosure`](crate::disclosure::Disclosure) operation that has side effects.
#[derive(Debug)]
pub struct Host<E: Environment> {
    pub(crate) env: E,
    pub(crate) layers: LayerStack,
    pub(crate) portal: PortalHost<E::Element>,
    next_id: u32,
}

impl<E: Environment> Host<E> {
    /// Wrap an environment.
    pub fn new(env: E) -> Self {
        Self {
            env,
            layers: LayerStack::new(),
            portal: PortalHost::new(),
            next_id: 0,
        }
    }

    /// The environment.
    #[inline]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment, e.g. to build the document or
    /// advance a test clock.
    #[inline]
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Stack of open disclosures.
    #[inline]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Mounted content per disclosure.
    #[inline]
    pub fn portal(&self) -> &PortalHost<E::Element> {
        &self.portal
    }

    /// Hand out a fresh disclosure id.
    pub fn allocate_id(&mut self) -> DisclosureId {
        let id = DisclosureId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Give back the environment.
    pub fn into_env(self) -> E {
        self.env
    }
}
