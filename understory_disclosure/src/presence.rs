// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mount presence of the content part across entry and exit transitions.
//!
//! Presence lags the open state: content stays mounted while its exit
//! transition plays, and becomes [`Phase::Open`] only once its entry
//! transition settles.

/// Lifecycle phase of the content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not mounted (unless force-mounted).
    #[default]
    Closed,
    /// Mounted, entry transition running.
    Opening,
    /// Mounted and settled.
    Open,
    /// Mounted, exit transition running.
    Closing,
}

impl Phase {
    /// Value for the `data-state` attribute.
    pub const fn data_state(self) -> &'static str {
        match self {
            Self::Opening | Self::Open => "open",
            Self::Closing | Self::Closed => "closed",
        }
    }
}

/// Phase tracker plus the force-mount override.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Presence {
    phase: Phase,
    force_mount: bool,
}

impl Presence {
    /// Create a closed presence.
    pub fn new(force_mount: bool) -> Self {
        Self {
            phase: Phase::Closed,
            force_mount,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the open state requires the content to be mounted.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// Whether the content is in the tree at all.
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.is_mounted() || self.force_mount
    }

    /// Whether force mounting is on.
    #[inline]
    pub fn force_mount(&self) -> bool {
        self.force_mount
    }

    /// Start the entry transition. Reopening mid-exit resumes from there.
    pub fn open(&mut self) {
        if self.phase != Phase::Open {
            self.phase = Phase::Opening;
        }
    }

    /// Jump straight to [`Phase::Open`], for content that starts open.
    pub fn open_settled(&mut self) {
        self.phase = Phase::Open;
    }

    /// Entry transition finished. Returns `false` if it was no longer running.
    pub fn settle_entry(&mut self) -> bool {
        if self.phase == Phase::Opening {
            self.phase = Phase::Open;
            true
        } else {
            false
        }
    }

    /// Start the exit transition; with `instant`, unmount immediately.
    pub fn close(&mut self, instant: bool) {
        if self.phase == Phase::Closed {
            return;
        }
        self.phase = if instant {
            Phase::Closed
        } else {
            Phase::Closing
        };
    }

    /// Exit transition finished. Returns `false` if it was no longer running.
    pub fn finish_exit(&mut self) -> bool {
        if self.phase == Phase::Closing {
            self.phase = Phase::Closed;
            true
        } else {
            false
        }
    }

    /// Drop straight to [`Phase::Closed`].
    pub fn reset(&mut self) {
        self.phase = Phase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut p = Presence::new(false);
        assert!(!p.is_rendered());
        p.open();
        assert_eq!(p.phase(), Phase::Opening);
        assert!(p.settle_entry());
        assert_eq!(p.phase(), Phase::Open);
        p.close(false);
        assert_eq!(p.phase(), Phase::Closing);
        assert!(p.is_mounted());
        assert!(p.finish_exit());
        assert!(!p.is_mounted());
    }

    #[test]
    fn reopen_during_exit_cancels_it() {
        let mut p = Presence::new(false);
        p.open_settled();
        p.close(false);
        p.open();
        assert_eq!(p.phase(), Phase::Opening);
        assert!(!p.finish_exit());
        assert_eq!(p.phase().data_state(), "open");
    }

    #[test]
    fn force_mount_keeps_closed_content_rendered() {
        let mut p = Presence::new(true);
        assert!(p.is_rendered());
        assert!(!p.is_mounted());
        p.open_settled();
        p.close(true);
        assert!(p.is_rendered());
        assert_eq!(p.phase().data_state(), "closed");
    }
}
