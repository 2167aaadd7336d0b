// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toggle group: a set of pressed items with controlled and uncontrolled modes.
//!
//! The group reuses [`Controllable`] so a caller can own the pressed set
//! exactly as it can own a disclosure's open state.
//!
//! ```rust
//! use understory_disclosure::toggle_group::{SelectionMode, ToggleGroup};
//!
//! let mut align = ToggleGroup::new(SelectionMode::Single, vec!["left"]);
//! assert!(align.toggle("center"));
//! assert_eq!(align.value(), ["center"]);
//! // Pressing the pressed item clears the selection.
//! assert!(align.toggle("center"));
//! assert!(align.value().is_empty());
//! ```

use alloc::vec::Vec;

use tracing::trace;

use crate::controllable::Controllable;

/// How many items may be pressed at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// At most one item.
    #[default]
    Single,
    /// Any number of items, kept in press order.
    Multiple,
}

/// Pressed state for a group of toggle items.
#[derive(Debug)]
pub struct ToggleGroup<T> {
    mode: SelectionMode,
    value: Controllable<Vec<T>>,
}

impl<T: Clone + PartialEq + core::fmt::Debug> ToggleGroup<T> {
    /// Create an uncontrolled group starting from `default`.
    pub fn new(mode: SelectionMode, default: Vec<T>) -> Self {
        Self {
            mode,
            value: Controllable::new(None, default),
        }
    }

    /// Create a group whose pressed set is owned by the caller.
    pub fn controlled(mode: SelectionMode, value: Vec<T>) -> Self {
        Self {
            mode,
            value: Controllable::new(Some(value), Vec::new()),
        }
    }

    /// Selection mode.
    #[inline]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Register the `on_value_change` callback.
    pub fn on_value_change(&mut self, f: impl FnMut(&Vec<T>) + 'static) {
        self.value.set_on_change(f);
    }

    /// Pressed items.
    #[inline]
    pub fn value(&self) -> &[T] {
        self.value.get()
    }

    /// Whether `item` is pressed.
    pub fn is_pressed(&self, item: &T) -> bool {
        self.value().contains(item)
    }

    /// Whether the pressed set is owned by the caller.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    /// Press or release `item`.
    ///
    /// Returns `true` if the pressed set changed locally; in controlled mode the
    /// request only reaches the callback.
    pub fn toggle(&mut self, item: T) -> bool {
        let current = self.value();
        let next = match self.mode {
            SelectionMode::Single => {
                if current.first() == Some(&item) {
                    Vec::new()
                } else {
                    alloc::vec![item]
                }
            }
            SelectionMode::Multiple => {
                let mut next = current.to_vec();
                match next.iter().position(|v| *v == item) {
                    Some(pos) => {
                        next.remove(pos);
                    }
                    None => next.push(item),
                }
                next
            }
        };
        let changed = self.value.request(next);
        if changed {
            trace!(value = ?self.value(), "toggle group changed");
        }
        changed
    }

    /// Feed back the controlled value, or `None` to become uncontrolled.
    pub fn sync_value(&mut self, value: Option<Vec<T>>) -> bool {
        self.value.sync_prop(value)
    }
}
