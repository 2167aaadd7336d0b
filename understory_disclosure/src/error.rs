// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for the fallible `try_*` entry points.
//!
//! The infallible operations on [`Disclosure`](crate::disclosure::Disclosure)
//! never surface these; they log and degrade to a no-op instead.

use thiserror::Error;

use crate::types::DisclosureId;

/// Misuse or environment failures reported by the disclosure primitive.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DisclosureError {
    /// The instance has not been mounted yet, or was already unmounted.
    #[error("disclosure {0:?} is not mounted")]
    NotMounted(DisclosureId),

    /// `mount` was called on an instance that is (or was) mounted.
    #[error("disclosure {0:?} was already mounted")]
    AlreadyMounted(DisclosureId),

    /// The element is not attached to the document.
    #[error("element is not attached to the document")]
    Detached,

    /// The element cannot receive programmatic focus.
    #[error("element cannot receive focus")]
    NotFocusable,

    /// Neither a tabbable descendant nor the content root can take focus.
    #[error("content has no focusable element and is not focusable itself")]
    NoFocusTarget,
}
