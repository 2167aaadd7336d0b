// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration and presets for common overlay primitives.
//!
//! ```rust
//! use understory_disclosure::{DisclosureConfig, Transition};
//!
//! // A side sheet that slides out over 200ms and keeps focus trapped.
//! let sheet = DisclosureConfig::sheet().exit(Transition::Duration(200));
//! assert!(sheet.trap_focus);
//!
//! // A collapsible section: no dismissal, no trap, rendered in place.
//! let section = DisclosureConfig::collapsible().default_open(true);
//! assert!(!section.close_on_escape);
//! assert!(!section.portal);
//! ```

/// How an entry or exit transition settles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Settle at the next flush after the change.
    #[default]
    Instant,
    /// Settle once the environment clock has advanced this many milliseconds.
    Duration(u64),
    /// Settle only when the host reports the animation finished.
    AnimationEnd,
}

/// Recognized options for a disclosure instance.
///
/// The `on_open_change` callback is not part of this struct; register it with
/// [`Disclosure::on_open_change`](crate::disclosure::Disclosure::on_open_change).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisclosureConfig {
    /// Initial open state in uncontrolled mode.
    pub default_open: bool,
    /// Controlled open state. When `Some`, the instance never changes it on its own.
    pub open: Option<bool>,
    /// Close when a pointer-down lands outside the trigger and content.
    pub close_on_outside_click: bool,
    /// Close when Escape is pressed.
    pub close_on_escape: bool,
    /// Keep Tab/Shift+Tab cycling inside the content while open.
    pub trap_focus: bool,
    /// Return focus to the element that had it before opening.
    pub return_focus_on_close: bool,
    /// Keep content rendered while closed; visibility is left to styling.
    pub force_mount: bool,
    /// Move focus into the content once it is mounted.
    pub auto_focus: bool,
    /// Render into the shared portal host rather than in place.
    pub portal: bool,
    /// Entry transition, `Opening → Open`.
    pub entry: Transition,
    /// Exit transition, `Closing → Closed`.
    pub exit: Transition,
    /// Milliseconds to wait after closing before restoring focus.
    pub restore_focus_delay: u64,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            default_open: false,
            open: None,
            close_on_outside_click: true,
            close_on_escape: true,
            trap_focus: true,
            return_focus_on_close: true,
            force_mount: false,
            auto_focus: true,
            portal: true,
            entry: Transition::Instant,
            exit: Transition::Instant,
            restore_focus_delay: 0,
        }
    }
}

impl DisclosureConfig {
    /// Modal dialog: every default applies.
    pub fn dialog() -> Self {
        Self::default()
    }

    /// Side sheet: a dialog whose exit waits for the slide-out animation.
    pub fn sheet() -> Self {
        Self {
            exit: Transition::AnimationEnd,
            ..Self::default()
        }
    }

    /// Dropdown menu: dismissable and trapped, focus returns to the trigger.
    pub fn dropdown_menu() -> Self {
        Self::default()
    }

    /// Select listbox: like a menu.
    pub fn select() -> Self {
        Self::dropdown_menu()
    }

    /// Collapsible section: toggled only by its trigger, rendered in place.
    pub fn collapsible() -> Self {
        Self {
            close_on_outside_click: false,
            close_on_escape: false,
            trap_focus: false,
            return_focus_on_close: false,
            auto_focus: false,
            portal: false,
            ..Self::default()
        }
    }

    /// Set the initial uncontrolled open state.
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Make the instance controlled with the given value.
    pub fn controlled(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Enable or disable outside-click dismissal.
    pub fn close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }

    /// Enable or disable Escape dismissal.
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Enable or disable the focus trap.
    pub fn trap_focus(mut self, trap: bool) -> Self {
        self.trap_focus = trap;
        self
    }

    /// Enable or disable focus restoration on close.
    pub fn return_focus_on_close(mut self, restore: bool) -> Self {
        self.return_focus_on_close = restore;
        self
    }

    /// Keep the content rendered while closed.
    pub fn force_mount(mut self, force: bool) -> Self {
        self.force_mount = force;
        self
    }

    /// Enable or disable moving focus into the content on open.
    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    /// Render through the shared portal host, or in place.
    pub fn portal(mut self, portal: bool) -> Self {
        self.portal = portal;
        self
    }

    /// Set the entry transition.
    pub fn entry(mut self, entry: Transition) -> Self {
        self.entry = entry;
        self
    }

    /// Set the exit transition.
    pub fn exit(mut self, exit: Transition) -> Self {
        self.exit = exit;
        self
    }

    /// Set the delay before focus is restored on close.
    pub fn restore_focus_delay(mut self, millis: u64) -> Self {
        self.restore_focus_delay = millis;
        self
    }

    /// Whether the open state is owned by the caller.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_options() {
        let c = DisclosureConfig::default();
        assert!(!c.default_open);
        assert_eq!(c.open, None);
        assert!(c.close_on_outside_click);
        assert!(c.close_on_escape);
        assert!(c.trap_focus);
        assert!(c.return_focus_on_close);
        assert!(!c.force_mount);
        assert!(!c.is_controlled());
    }

    #[test]
    fn collapsible_preset_opts_out_of_overlay_behavior() {
        let c = DisclosureConfig::collapsible();
        assert!(!c.close_on_outside_click);
        assert!(!c.close_on_escape);
        assert!(!c.trap_focus);
        assert!(!c.auto_focus);
        assert!(!c.portal);
    }

    #[test]
    fn builders_compose() {
        let c = DisclosureConfig::dialog()
            .controlled(true)
            .close_on_escape(false)
            .exit(Transition::Duration(150))
            .restore_focus_delay(10);
        assert!(c.is_controlled());
        assert!(!c.close_on_escape);
        assert_eq!(c.exit, Transition::Duration(150));
        assert_eq!(c.restore_focus_delay, 10);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: DisclosureConfig =
            serde_json::from_str(r#"{ "force_mount": true, "exit": { "Duration": 120 } }"#)
                .unwrap();
        assert!(c.force_mount);
        assert_eq!(c.exit, Transition::Duration(120));
        assert!(c.close_on_escape);
    }
}
