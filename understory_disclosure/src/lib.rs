// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Disclosure: a headless open/close primitive for overlays.
//!
//! Dialogs, sheets, dropdown menus, selects, and collapsible sections share
//! one state machine. This crate implements it once, independent of any UI
//! toolkit:
//!
//! - **Controller** ([`controller`], [`controllable`]): open/closed state in
//!   controlled or uncontrolled mode, with an `on_open_change` callback and
//!   subscribers.
//! - **Focus scope** ([`focus`], [`tab_order`]): captures the focused element
//!   on open, moves focus inside, traps Tab/Shift+Tab with wraparound, and
//!   restores focus on close.
//! - **Dismissal** ([`dismiss`], [`layer`]): outside-pointer and Escape
//!   listeners that dismiss only the innermost open layer.
//! - **Presentation** ([`portal`], [`presence`]): portal-style mounting that
//!   outlives the open state while an exit transition plays, plus force-mount.
//!
//! A [`Disclosure`] wires these together for one component. All side effects
//! go through an [`Environment`] owned by a shared [`Host`], so the same code
//! drives a browser DOM, a native widget tree, or the in-memory
//! [`MemoryEnvironment`] used in tests.
//!
//! ## Minimal example
//!
//! A dialog opened from a button, dismissed with Escape:
//!
//! ```rust
//! use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
//! use understory_disclosure::parts::{Close, Content, Trigger};
//! use understory_disclosure::{
//!     Disclosure, DisclosureConfig, Environment, Host, KeyEvent, dismiss,
//! };
//!
//! let mut env = MemoryEnvironment::new();
//! let open_button = env.append(env.body(), ElementSpec::button());
//! let dialog = env.create(ElementSpec::div().tab_index(-1));
//! let name = env.append(dialog, ElementSpec::input());
//! let close_button = env.append(dialog, ElementSpec::button());
//! env.focus(open_button).unwrap();
//!
//! let mut host = Host::new(env);
//! let trigger = Trigger::new(open_button);
//! let mut d = Disclosure::new(
//!     &mut host,
//!     DisclosureConfig::dialog(),
//!     Some(trigger),
//!     Content::new(dialog),
//! );
//! d.mount(&mut host);
//!
//! trigger.press(&mut d, &mut host);
//! d.flush(&mut host);
//! assert!(trigger.aria_expanded(&d));
//! assert_eq!(host.env().active_element(), Some(name));
//!
//! dismiss::deliver_key(&mut host, &mut [&mut d], &mut KeyEvent::escape());
//! d.flush(&mut host);
//! assert!(!d.is_open());
//! assert_eq!(host.env().active_element(), Some(open_button));
//!
//! // The close part does the same from inside the content.
//! trigger.press(&mut d, &mut host);
//! Close::new(close_button).press(&mut d, &mut host);
//! assert_eq!(trigger.data_state(&d), "closed");
//! ```
//!
//! ## Deferred work
//!
//! Moving focus into freshly mounted content, settling transitions, and
//! restoring focus happen after the host has painted. The host calls
//! [`Disclosure::flush`] from its post-paint hook and again once the clock
//! reaches [`Disclosure::next_deadline`]. Work scheduled before the latest
//! open/close change is dropped, so rapid toggling never moves focus into
//! content that is already closing.
//!
//! ## Logging
//!
//! Diagnostics go through [`tracing`]: a `warn` when content has nothing to
//! focus, `debug` for ignored operations and failed focus moves, and `trace`
//! for transitions and listener bookkeeping. The crate never installs a
//! subscriber.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`
//!   and `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math in `kurbo`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`DisclosureConfig`],
//!   [`Transition`], and [`SelectionMode`](toggle_group::SelectionMode).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod controllable;
pub mod controller;
pub mod disclosure;
pub mod dismiss;
pub mod env;
pub mod error;
pub mod focus;
pub mod host;
pub mod layer;
pub mod memory;
pub mod parts;
pub mod portal;
pub mod presence;
pub mod tab_order;
pub mod toggle_group;
pub mod types;

pub use config::{DisclosureConfig, Transition};
pub use controller::SubscriberId;
pub use disclosure::Disclosure;
pub use env::{ElementHandle, Environment};
pub use error::DisclosureError;
pub use host::Host;
pub use memory::MemoryEnvironment;
pub use presence::Phase;
pub use types::{
    DisclosureId, Generation, Key, KeyEvent, ListenerId, ListenerKind, Modifiers, OpenChange,
    Outcome, PointerEvent,
};
