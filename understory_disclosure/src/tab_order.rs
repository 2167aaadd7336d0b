// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential (Tab / Shift+Tab) focus order inside a content subtree.
//!
//! Candidates are supplied by the [`Environment`](crate::env::Environment) in
//! document order. The order follows the usual sequential-navigation rules:
//!
//! - disabled candidates and negative tab indices are skipped;
//! - positive tab indices come first, ascending, ties in document order;
//! - tab index `0` comes last, in document order.
//!
//! ```rust
//! use understory_disclosure::tab_order::{Step, TabCandidate, WrapMode, next};
//!
//! let candidates = [
//!     TabCandidate { element: 1_u32, tab_index: 0, disabled: false },
//!     TabCandidate { element: 2_u32, tab_index: 0, disabled: false },
//! ];
//! assert_eq!(next(Some(1), &candidates, Step::Forward, WrapMode::Scope), Some(2));
//! assert_eq!(next(Some(2), &candidates, Step::Forward, WrapMode::Scope), Some(1));
//! assert_eq!(next(Some(2), &candidates, Step::Forward, WrapMode::Never), None);
//! ```

use alloc::vec::Vec;

/// An element matched by the tab-order query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TabCandidate<K> {
    /// The element.
    pub element: K,
    /// Effective tab index: explicit, or `0` for natively focusable elements.
    pub tab_index: i32,
    /// Disabled form controls never take sequential focus.
    pub disabled: bool,
}

impl<K> TabCandidate<K> {
    /// Whether this candidate participates in sequential navigation.
    #[inline]
    pub fn is_tabbable(&self) -> bool {
        !self.disabled && self.tab_index >= 0
    }
}

/// Step direction for sequential navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

/// What happens at either end of the sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Reaching the end yields no next candidate.
    Never,
    /// Wrap around within the content.
    Scope,
}

/// Tabbable elements in sequential order.
pub fn ordered<K: Copy>(candidates: &[TabCandidate<K>]) -> Vec<K> {
    let mut tabbable: Vec<&TabCandidate<K>> =
        candidates.iter().filter(|c| c.is_tabbable()).collect();
    // Stable sort keeps document order among equal keys.
    tabbable.sort_by_key(|c| (c.tab_index == 0, c.tab_index));
    tabbable.into_iter().map(|c| c.element).collect()
}

/// First element in sequential order.
pub fn first<K: Copy>(candidates: &[TabCandidate<K>]) -> Option<K> {
    ordered(candidates).first().copied()
}

/// Last element in sequential order.
pub fn last<K: Copy>(candidates: &[TabCandidate<K>]) -> Option<K> {
    ordered(candidates).last().copied()
}

/// Element that follows `origin` in the given direction.
///
/// When `origin` is `None` or not among the tabbable candidates, forward
/// navigation enters at the first element and backward navigation at the last.
pub fn next<K: Copy + Eq>(
    origin: Option<K>,
    candidates: &[TabCandidate<K>],
    step: Step,
    wrap: WrapMode,
) -> Option<K> {
    let order = ordered(candidates);
    let (first, last) = (*order.first()?, *order.last()?);
    let pos = origin.and_then(|o| order.iter().position(|&e| e == o));

    match (step, pos) {
        (Step::Forward, None) => Some(first),
        (Step::Backward, None) => Some(last),
        (Step::Forward, Some(pos)) => match order.get(pos + 1) {
            Some(&e) => Some(e),
            None => matches!(wrap, WrapMode::Scope).then_some(first),
        },
        (Step::Backward, Some(pos)) => {
            if pos > 0 {
                Some(order[pos - 1])
            } else {
                matches!(wrap, WrapMode::Scope).then_some(last)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn c(element: u32, tab_index: i32) -> TabCandidate<u32> {
        TabCandidate {
            element,
            tab_index,
            disabled: false,
        }
    }

    #[test]
    fn positive_indices_precede_document_order() {
        let cands = [c(1, 0), c(2, 2), c(3, 0), c(4, 1), c(5, 2)];
        assert_eq!(ordered(&cands), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn skips_negative_and_disabled() {
        let cands = [
            c(1, -1),
            c(2, 0),
            TabCandidate {
                element: 3,
                tab_index: 0,
                disabled: true,
            },
            c(4, 0),
        ];
        assert_eq!(ordered(&cands), vec![2, 4]);
        assert_eq!(next(Some(2), &cands, Step::Forward, WrapMode::Scope), Some(4));
        assert_eq!(next(Some(4), &cands, Step::Backward, WrapMode::Scope), Some(2));
    }

    #[test]
    fn wraps_in_both_directions() {
        let cands = [c(1, 0), c(2, 0), c(3, 0)];
        assert_eq!(next(Some(3), &cands, Step::Forward, WrapMode::Scope), Some(1));
        assert_eq!(next(Some(1), &cands, Step::Backward, WrapMode::Scope), Some(3));
    }

    #[test]
    fn never_wrap_stops_at_edges() {
        let cands = [c(1, 0), c(2, 0)];
        assert_eq!(next(Some(2), &cands, Step::Forward, WrapMode::Never), None);
        assert_eq!(next(Some(1), &cands, Step::Backward, WrapMode::Never), None);
    }

    #[test]
    fn unknown_origin_enters_at_the_edge() {
        let cands = [c(1, 0), c(2, 0), c(3, 0)];
        assert_eq!(next(Some(99), &cands, Step::Forward, WrapMode::Scope), Some(1));
        assert_eq!(next(None, &cands, Step::Backward, WrapMode::Scope), Some(3));
    }

    #[test]
    fn empty_has_no_target() {
        let cands: [TabCandidate<u32>; 0] = [];
        assert_eq!(next(None, &cands, Step::Forward, WrapMode::Scope), None);
        assert_eq!(first(&cands), None);
        assert_eq!(last(&cands), None);
    }
}
