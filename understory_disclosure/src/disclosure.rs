// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One disclosure instance: controller, focus scope, dismissal, and presence
//! wired together.
//!
//! ## Lifecycle
//!
//! A [`Disclosure`] is created against a [`Host`], then mounted. Opening runs
//! these effects in order:
//!
//! 1. the controller commits the new state and bumps the generation;
//! 2. the focused element is captured;
//! 3. the content is mounted through the portal host;
//! 4. the instance becomes the topmost layer, if it traps or dismisses;
//! 5. a deferred task attaches dismissal listeners and moves focus inside.
//!
//! Closing detaches listeners synchronously, leaves the layer stack, starts the
//! exit transition, and schedules focus restoration.
//!
//! Deferred work runs on [`Disclosure::flush`], which the host calls after
//! painting and whenever [`Disclosure::next_deadline`] passes. Every task is
//! tagged with the generation it was scheduled under and is dropped once the
//! open state has moved on.
//!
//! ## Example
//!
//! ```rust
//! use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
//! use understory_disclosure::parts::{Content, Trigger};
//! use understory_disclosure::{Disclosure, DisclosureConfig, Environment, Host, PointerEvent};
//!
//! let mut env = MemoryEnvironment::new();
//! let trigger = env.append(env.body(), ElementSpec::button());
//! let outside = env.append(env.body(), ElementSpec::button());
//! let content = env.create(ElementSpec::div());
//! let first = env.append(content, ElementSpec::button());
//! env.focus(trigger).unwrap();
//!
//! let mut host = Host::new(env);
//! let mut menu = Disclosure::new(
//!     &mut host,
//!     DisclosureConfig::dropdown_menu(),
//!     Some(Trigger::new(trigger)),
//!     Content::new(content),
//! );
//! menu.mount(&mut host);
//!
//! menu.toggle(&mut host);
//! menu.flush(&mut host);
//! assert!(menu.is_open());
//! assert_eq!(host.env().active_element(), Some(first));
//!
//! menu.handle_outside_pointer(&mut host, &mut PointerEvent::down(Some(outside)));
//! menu.flush(&mut host);
//! assert!(!menu.is_open());
//! assert!(!host.env().is_connected(content));
//! assert_eq!(host.env().active_element(), Some(trigger));
//! ```

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{DisclosureConfig, Transition};
use crate::controller::{Controller, SubscriberId};
use crate::dismiss::DismissalCoordinator;
use crate::env::{ElementHandle, Environment};
use crate::error::DisclosureError;
use crate::focus::{FocusScope, FocusSnapshot};
use crate::host::Host;
use crate::parts::{Content, ContentState, Trigger};
use crate::presence::{Phase, Presence};
use crate::types::{
    DisclosureId, Generation, Key, KeyEvent, ListenerKind, Modifiers, OpenChange, Outcome,
    PointerEvent,
};

/// Deferred work, run by [`Disclosure::flush`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    /// Attach dismissal listeners, move focus in, start trapping.
    AfterMount,
    /// Entry transition finished.
    SettleEntry,
    /// Exit transition finished; tear the content down.
    FinishExit,
    /// Return focus to the captured origin.
    RestoreFocus,
}

#[derive(Copy, Clone, Debug)]
struct Deferred {
    generation: Generation,
    /// Clock value at which the task becomes due; `None` runs on the next flush.
    due: Option<u64>,
    task: Task,
}

/// A disclosure instance.
#[derive(Debug)]
pub struct Disclosure<K> {
    id: DisclosureId,
    config: DisclosureConfig,
    controller: Controller,
    presence: Presence,
    focus: FocusScope<K>,
    dismissal: DismissalCoordinator,
    trigger: Option<Trigger<K>>,
    content: Content<K>,
    mounted: bool,
    pending: SmallVec<[Deferred; 4]>,
}

impl<K: Copy + Eq + core::hash::Hash + core::fmt::Debug> Disclosure<K> {
    /// Create an unmounted instance registered on `host`.
    pub fn new<E>(
        host: &mut Host<E>,
        config: DisclosureConfig,
        trigger: Option<Trigger<K>>,
        content: Content<K>,
    ) -> Self
    where
        E: Environment<Element = K>,
    {
        Self {
            id: host.allocate_id(),
            controller: Controller::new(&config),
            presence: Presence::new(config.force_mount),
            focus: FocusScope::new(),
            dismissal: DismissalCoordinator::new(),
            trigger,
            content,
            mounted: false,
            pending: SmallVec::new(),
            config,
        }
    }

    /// Identifier on the host.
    #[inline]
    pub fn id(&self) -> DisclosureId {
        self.id
    }

    /// Configuration the instance was created with.
    #[inline]
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Logical open state.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Whether the open state is owned by the caller.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.controller.is_controlled()
    }

    /// Whether [`mount`](Self::mount) has run (and [`unmount`](Self::unmount) has not).
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Presence phase of the content.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.presence.phase()
    }

    /// Transition counter.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.controller.generation()
    }

    /// Focus captured on open, until it is restored.
    pub fn focus_snapshot(&self) -> FocusSnapshot<K> {
        self.focus.snapshot()
    }

    /// Whether a dismissal listener of `kind` is attached.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.dismissal.is_attached(kind)
    }

    /// Trigger part, if any.
    #[inline]
    pub fn trigger(&self) -> Option<Trigger<K>> {
        self.trigger
    }

    /// Content part.
    #[inline]
    pub fn content(&self) -> Content<K> {
        self.content
    }

    /// Handle to the trigger element.
    pub fn trigger_handle(&self) -> Option<ElementHandle<K>> {
        self.trigger.map(|t| t.handle())
    }

    /// Handle to the content element.
    pub fn content_handle(&self) -> ElementHandle<K> {
        self.content.handle()
    }

    /// Render flags for the content part.
    pub fn content_state(&self) -> ContentState {
        ContentState {
            is_open: self.is_open(),
            mounted: self.presence.is_mounted(),
            rendered: self.presence.is_rendered(),
            phase: self.presence.phase(),
        }
    }

    /// Register the `on_open_change` callback.
    ///
    /// It runs for every request that would change the open state, in both
    /// modes. In controlled mode it is the only effect of a request.
    pub fn on_open_change(&mut self, f: impl FnMut(bool) + 'static) {
        self.controller.on_open_change(f);
    }

    /// Subscribe to effective open-state changes.
    pub fn subscribe(&mut self, f: impl FnMut(bool) + 'static) -> SubscriberId {
        self.controller.subscribe(f)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.controller.unsubscribe(id)
    }

    /// Mount the instance. Logs and does nothing if it is already mounted.
    pub fn mount<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if let Err(err) = self.try_mount(host) {
            debug!(disclosure = ?self.id, %err, "mount ignored");
        }
    }

    /// Mount the instance.
    ///
    /// Content that starts open is mounted in its settled phase, with the
    /// usual deferred focus move and listener attach.
    pub fn try_mount<E>(&mut self, host: &mut Host<E>) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        if self.mounted {
            return Err(DisclosureError::AlreadyMounted(self.id));
        }
        self.mounted = true;
        if self.is_open() {
            self.open_effects(host, true);
        } else if self.config.force_mount {
            self.mount_content(host);
        }
        Ok(())
    }

    /// Tear the instance down. Logs and does nothing if it is not mounted.
    pub fn unmount<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if let Err(err) = self.try_unmount(host) {
            debug!(disclosure = ?self.id, %err, "unmount ignored");
        }
    }

    /// Tear the instance down.
    ///
    /// Listeners go first. Pending work is dropped, and focus is restored
    /// immediately if restoration was owed. The open state is kept.
    pub fn try_unmount<E>(&mut self, host: &mut Host<E>) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        self.ensure_mounted()?;
        self.mounted = false;
        self.dismissal.detach(&mut host.env);
        host.layers.remove(self.id);
        self.focus.set_trapping(false);
        self.pending.clear();
        if self.config.return_focus_on_close {
            self.focus.restore(&mut host.env, self.content.element());
        } else {
            self.focus.discard();
        }
        self.presence.reset();
        host.portal.unmount(&mut host.env, self.id);
        trace!(disclosure = ?self.id, "disclosure unmounted");
        Ok(())
    }

    /// Request the open state.
    pub fn open<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if let Err(err) = self.try_open(host) {
            debug!(disclosure = ?self.id, %err, "open ignored");
        }
    }

    /// Request the closed state.
    pub fn close<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if let Err(err) = self.try_close(host) {
            debug!(disclosure = ?self.id, %err, "close ignored");
        }
    }

    /// Request the opposite of the current state.
    pub fn toggle<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if let Err(err) = self.try_toggle(host) {
            debug!(disclosure = ?self.id, %err, "toggle ignored");
        }
    }

    /// Request the open state, failing if the instance is not mounted.
    pub fn try_open<E>(&mut self, host: &mut Host<E>) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        self.ensure_mounted()?;
        let change = self.controller.open();
        self.apply(host, change);
        Ok(())
    }

    /// Request the closed state, failing if the instance is not mounted.
    pub fn try_close<E>(&mut self, host: &mut Host<E>) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        self.ensure_mounted()?;
        let change = self.controller.close();
        self.apply(host, change);
        Ok(())
    }

    /// Toggle, failing if the instance is not mounted.
    pub fn try_toggle<E>(&mut self, host: &mut Host<E>) -> Result<(), DisclosureError>
    where
        E: Environment<Element = K>,
    {
        self.ensure_mounted()?;
        let change = self.controller.toggle();
        self.apply(host, change);
        Ok(())
    }

    /// Feed back the controlled `open` prop, or `None` to hand ownership back
    /// to the instance (keeping the last value).
    ///
    /// On an unmounted instance only the state is updated; effects run on mount.
    pub fn set_open_prop<E>(&mut self, host: &mut Host<E>, open: Option<bool>)
    where
        E: Environment<Element = K>,
    {
        let change = self.controller.sync_prop(open);
        if self.mounted {
            self.apply(host, change);
        }
    }

    /// Run deferred work that is due. Returns how many tasks ran.
    ///
    /// Tasks from an earlier generation are dropped without running.
    pub fn flush<E>(&mut self, host: &mut Host<E>) -> usize
    where
        E: Environment<Element = K>,
    {
        let now = host.env.now();
        let current = self.generation();
        let id = self.id;
        self.pending.retain(|d| {
            let live = d.generation == current;
            if !live {
                trace!(
                    disclosure = ?id,
                    task = ?d.task,
                    generation = d.generation.get(),
                    "stale task dropped"
                );
            }
            live
        });

        let mut ran = 0;
        while let Some(pos) = self
            .pending
            .iter()
            .position(|d| d.due.is_none_or(|due| due <= now))
        {
            let deferred = self.pending.remove(pos);
            self.run_task(host, deferred.task);
            ran += 1;
        }
        ran
    }

    /// Earliest clock value at which [`flush`](Self::flush) has work to do.
    ///
    /// Tasks due on the next flush report `0`.
    pub fn next_deadline(&self) -> Option<u64> {
        let current = self.generation();
        self.pending
            .iter()
            .filter(|d| d.generation == current)
            .map(|d| d.due.unwrap_or(0))
            .min()
    }

    /// Number of deferred tasks waiting to run, stale ones included.
    pub fn pending_tasks(&self) -> usize {
        self.pending.len()
    }

    /// Signal that the running entry or exit animation finished.
    ///
    /// Returns `false` if no transition was running.
    pub fn animation_end<E>(&mut self, host: &mut Host<E>) -> bool
    where
        E: Environment<Element = K>,
    {
        match self.presence.phase() {
            Phase::Opening => self.presence.settle_entry(),
            Phase::Closing => {
                let finished = self.presence.finish_exit();
                if finished {
                    self.unmount_content(host);
                }
                finished
            }
            Phase::Open | Phase::Closed => false,
        }
    }

    /// Escape listener.
    ///
    /// Closes the instance if it is listening, the event is still propagating,
    /// and this is the topmost open layer.
    pub fn handle_escape<E>(&mut self, host: &mut Host<E>, event: &mut KeyEvent) -> Outcome
    where
        E: Environment<Element = K>,
    {
        if event.key != Key::Escape
            || !self.may_dismiss(host, event.is_propagation_stopped(), ListenerKind::EscapeKey)
        {
            return Outcome::Continue;
        }
        trace!(disclosure = ?self.id, "escape dismisses");
        event.stop_propagation();
        event.prevent_default();
        self.close(host);
        Outcome::Stop
    }

    /// Outside-pointer listener.
    ///
    /// A press inside the trigger or content is claimed without closing. Any
    /// other press closes the instance. Both stop propagation.
    pub fn handle_outside_pointer<E>(
        &mut self,
        host: &mut Host<E>,
        event: &mut PointerEvent<K>,
    ) -> Outcome
    where
        E: Environment<Element = K>,
    {
        let stopped = event.is_propagation_stopped();
        if !self.may_dismiss(host, stopped, ListenerKind::OutsidePointer) {
            return Outcome::Continue;
        }
        event.stop_propagation();
        let inside = event.target.is_some_and(|target| {
            host.env.contains(self.content.element(), target)
                || self
                    .trigger
                    .is_some_and(|t| host.env.contains(t.element(), target))
        });
        if !inside {
            trace!(disclosure = ?self.id, target = ?event.target, "outside pointer dismisses");
            self.close(host);
        }
        Outcome::Stop
    }

    /// Tab listener: moves focus within the content while trapping.
    pub fn handle_tab<E>(&mut self, host: &mut Host<E>, event: &mut KeyEvent) -> Outcome
    where
        E: Environment<Element = K>,
    {
        if event.key != Key::Tab
            || event.is_propagation_stopped()
            || !self.is_open()
            || !self.focus.is_trapping()
            || !host.layers.is_topmost(self.id)
        {
            return Outcome::Continue;
        }
        let backward = event.modifiers.contains(Modifiers::SHIFT);
        self.focus.tab(&mut host.env, self.content.element(), backward);
        event.prevent_default();
        event.stop_propagation();
        Outcome::Stop
    }

    fn may_dismiss<E>(&self, host: &Host<E>, stopped: bool, kind: ListenerKind) -> bool
    where
        E: Environment<Element = K>,
    {
        !stopped && self.dismissal.is_attached(kind) && host.layers.is_topmost(self.id)
    }

    /// Only instances that trap or dismiss join the layer stack; an inline
    /// section opened inside a dialog must not take the dialog's place.
    fn is_layer(&self) -> bool {
        self.config.trap_focus || self.config.close_on_escape || self.config.close_on_outside_click
    }

    fn ensure_mounted(&self) -> Result<(), DisclosureError> {
        if self.mounted {
            Ok(())
        } else {
            Err(DisclosureError::NotMounted(self.id))
        }
    }

    fn apply<E>(&mut self, host: &mut Host<E>, change: Option<OpenChange>)
    where
        E: Environment<Element = K>,
    {
        match change {
            Some(OpenChange::Opened) => self.open_effects(host, false),
            Some(OpenChange::Closed) => self.close_effects(host),
            None => {}
        }
    }

    fn open_effects<E>(&mut self, host: &mut Host<E>, initial: bool)
    where
        E: Environment<Element = K>,
    {
        trace!(
            disclosure = ?self.id,
            generation = self.generation().get(),
            initial,
            "disclosure opened"
        );
        let fallback = self.trigger.map(|t| t.element());
        self.focus.capture(&host.env, self.content.element(), fallback);
        if initial {
            self.presence.open_settled();
        } else {
            self.presence.open();
        }
        self.mount_content(host);
        if self.is_layer() {
            host.layers.push(self.id);
        }
        self.schedule(None, Task::AfterMount);
        if !initial {
            match self.config.entry {
                Transition::Instant => self.schedule(None, Task::SettleEntry),
                Transition::Duration(ms) => {
                    let due = host.env.now().saturating_add(ms);
                    self.schedule(Some(due), Task::SettleEntry);
                }
                Transition::AnimationEnd => {}
            }
        }
    }

    fn close_effects<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        trace!(
            disclosure = ?self.id,
            generation = self.generation().get(),
            "disclosure closed"
        );
        self.dismissal.detach(&mut host.env);
        host.layers.remove(self.id);
        self.focus.set_trapping(false);
        match self.config.exit {
            Transition::Instant => {
                self.presence.close(true);
                self.unmount_content(host);
            }
            Transition::Duration(ms) => {
                self.presence.close(false);
                let due = host.env.now().saturating_add(ms);
                self.schedule(Some(due), Task::FinishExit);
            }
            Transition::AnimationEnd => self.presence.close(false),
        }
        if self.config.return_focus_on_close {
            let due = match self.config.restore_focus_delay {
                0 => None,
                delay => Some(host.env.now().saturating_add(delay)),
            };
            self.schedule(due, Task::RestoreFocus);
        } else {
            self.focus.discard();
        }
    }

    fn run_task<E>(&mut self, host: &mut Host<E>, task: Task)
    where
        E: Environment<Element = K>,
    {
        match task {
            Task::AfterMount => {
                self.dismissal.attach(&mut host.env, self.id, &self.config);
                if self.config.auto_focus {
                    let entered = self.focus.enter(
                        &mut host.env,
                        self.content.element(),
                        self.content.initial_focus_element(),
                    );
                    // A missing target was already reported.
                    if let Err(err) = entered
                        && err != DisclosureError::NoFocusTarget
                    {
                        debug!(disclosure = ?self.id, %err, "initial focus failed");
                    }
                }
                self.focus.set_trapping(self.config.trap_focus);
            }
            Task::SettleEntry => {
                self.presence.settle_entry();
            }
            Task::FinishExit => {
                if self.presence.finish_exit() {
                    self.unmount_content(host);
                }
            }
            Task::RestoreFocus => {
                self.focus.restore(&mut host.env, self.content.element());
            }
        }
    }

    fn schedule(&mut self, due: Option<u64>, task: Task) {
        self.pending.push(Deferred {
            generation: self.generation(),
            due,
            task,
        });
    }

    fn mount_content<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        host.portal.mount(
            &mut host.env,
            self.id,
            self.content.element(),
            self.content.anchor_element(),
            self.config.portal,
        );
    }

    fn unmount_content<E>(&mut self, host: &mut Host<E>)
    where
        E: Environment<Element = K>,
    {
        if !self.config.force_mount {
            host.portal.unmount(&mut host.env, self.id);
        }
    }
}
