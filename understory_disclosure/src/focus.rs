// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus scope for disclosed content.
//!
//! [`FocusScope`] handles the focus side of one open/close cycle:
//!
//! - **capture** the element that had focus before the content mounted;
//! - **enter** the content once it is mounted (explicit target, else first
//!   tabbable, else the content root);
//! - **trap** Tab/Shift+Tab so that focus wraps around inside the content;
//! - **restore** the captured element after closing, if it is still connected.
//!
//! Nothing here panics. Focus failures are logged and leave focus where it was.

use tracing::{debug, warn};

use crate::env::Environment;
use crate::error::DisclosureError;
use crate::tab_order::{self, Step, WrapMode};

/// Element that had focus when the disclosure opened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusSnapshot<K> {
    /// The origin element, cleared once focus has been restored.
    pub origin: Option<K>,
}

/// Focus capture, entry, trap, and restoration for one disclosure.
#[derive(Clone, Debug)]
pub struct FocusScope<K> {
    snapshot: FocusSnapshot<K>,
    trapping: bool,
}

impl<K> Default for FocusScope<K> {
    fn default() -> Self {
        Self {
            snapshot: FocusSnapshot { origin: None },
            trapping: false,
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> FocusScope<K> {
    /// Create an inactive scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    #[inline]
    pub fn snapshot(&self) -> FocusSnapshot<K> {
        self.snapshot
    }

    /// Whether Tab is currently trapped.
    #[inline]
    pub fn is_trapping(&self) -> bool {
        self.trapping
    }

    /// Record the focused element ahead of mounting `content`.
    ///
    /// A focused element outside `content` replaces the old snapshot. When
    /// focus still sits inside `content` from the previous cycle, or was lost
    /// when the content unmounted, the pending origin is kept. With nothing
    /// focused and nothing pending, `fallback` (usually the trigger) is used.
    pub fn capture<E>(&mut self, env: &E, content: K, fallback: Option<K>)
    where
        E: Environment<Element = K>,
    {
        match env.active_element() {
            Some(active) if !env.contains(content, active) => {
                self.snapshot.origin = Some(active);
            }
            Some(_) => {}
            None => {
                if self.snapshot.origin.is_none() {
                    self.snapshot.origin = fallback;
                }
            }
        }
    }

    /// Move focus into `content`.
    ///
    /// Picks `initial` if it is set and focusable, else the first tabbable
    /// descendant, else `content` itself. Returns the element that took focus.
    pub fn enter<E>(
        &mut self,
        env: &mut E,
        content: K,
        initial: Option<K>,
    ) -> Result<K, DisclosureError>
    where
        E: Environment<Element = K>,
    {
        let target = initial
            .filter(|&el| env.contains(content, el) && env.is_focusable(el))
            .or_else(|| tab_order::first(&env.tab_candidates(content)))
            .or_else(|| env.is_focusable(content).then_some(content));

        let Some(target) = target else {
            warn!(
                content = ?content,
                "disclosure content has nothing focusable; focus stays put"
            );
            return Err(DisclosureError::NoFocusTarget);
        };
        env.focus(target)?;
        Ok(target)
    }

    /// Start or stop trapping Tab inside the content.
    pub fn set_trapping(&mut self, trapping: bool) {
        self.trapping = trapping;
    }

    /// Handle Tab or Shift+Tab while trapped.
    ///
    /// Moves focus to the next element in tab order, wrapping at either end.
    /// If focus has escaped the content, it re-enters at the matching edge.
    /// Returns the element that took focus, or `None` if not trapping.
    pub fn tab<E>(&mut self, env: &mut E, content: K, backward: bool) -> Option<K>
    where
        E: Environment<Element = K>,
    {
        if !self.trapping {
            return None;
        }
        let origin = env.active_element().filter(|&a| env.contains(content, a));
        let step = if backward {
            Step::Backward
        } else {
            Step::Forward
        };
        let candidates = env.tab_candidates(content);
        let target = tab_order::next(origin, &candidates, step, WrapMode::Scope)
            .or_else(|| env.is_focusable(content).then_some(content))?;
        match env.focus(target) {
            Ok(()) => Some(target),
            Err(err) => {
                debug!(target = ?target, %err, "trapped tab could not move focus");
                None
            }
        }
    }

    /// Return focus to the captured origin and clear the snapshot.
    ///
    /// Does nothing if the origin is gone from the document, or if focus has
    /// since moved to an element outside `content` (another overlay took it).
    pub fn restore<E>(&mut self, env: &mut E, content: K) -> Option<K>
    where
        E: Environment<Element = K>,
    {
        let origin = self.snapshot.origin.take()?;
        if let Some(active) = env.active_element()
            && active != origin
            && !env.contains(content, active)
        {
            debug!(origin = ?origin, active = ?active, "focus moved elsewhere; not restoring");
            return None;
        }
        if !env.is_connected(origin) {
            debug!(origin = ?origin, "focus origin was detached; not restoring");
            return None;
        }
        match env.focus(origin) {
            Ok(()) => Some(origin),
            Err(err) => {
                debug!(origin = ?origin, %err, "focus restoration failed");
                None
            }
        }
    }

    /// Drop the snapshot without restoring.
    pub fn discard(&mut self) {
        self.snapshot.origin = None;
    }
}
