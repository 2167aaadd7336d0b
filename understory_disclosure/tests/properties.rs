// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over random operation sequences.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use proptest::test_runner::Config;
use understory_disclosure::dismiss::{deliver_key, deliver_pointer};
use understory_disclosure::memory::{ElementSpec, MemoryEnvironment, NodeRef};
use understory_disclosure::parts::{Content, Trigger};
use understory_disclosure::{
    Disclosure, DisclosureConfig, Environment, Host, KeyEvent, PointerEvent, Transition,
};

#[derive(Copy, Clone, Debug)]
enum Op {
    Open,
    Close,
    Toggle,
    Escape,
    ClickOutside,
    ClickInside,
    Tab,
    Flush,
    Advance(u64),
    AnimationEnd,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::Toggle),
        Just(Op::Escape),
        Just(Op::ClickOutside),
        Just(Op::ClickInside),
        Just(Op::Tab),
        Just(Op::Flush),
        (1_u64..200).prop_map(Op::Advance),
        Just(Op::AnimationEnd),
    ]
}

fn transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        Just(Transition::Instant),
        (1_u64..150).prop_map(Transition::Duration),
        Just(Transition::AnimationEnd),
    ]
}

struct Scene {
    host: Host<MemoryEnvironment>,
    outside: NodeRef,
    inside: NodeRef,
    disclosure: Disclosure<NodeRef>,
}

fn scene(config: DisclosureConfig) -> Scene {
    let mut env = MemoryEnvironment::new();
    let body = env.body();
    let trigger = env.append(body, ElementSpec::button());
    let outside = env.append(body, ElementSpec::button());
    let content = env.create(ElementSpec::div().tab_index(-1));
    let inside = env.append(content, ElementSpec::button());
    env.append(content, ElementSpec::input());
    env.focus(trigger).unwrap();

    let mut host = Host::new(env);
    let mut disclosure = Disclosure::new(
        &mut host,
        config,
        Some(Trigger::new(trigger)),
        Content::new(content),
    );
    disclosure.mount(&mut host);
    Scene {
        host,
        outside,
        inside,
        disclosure,
    }
}

impl Scene {
    fn apply(&mut self, op: Op) {
        let host = &mut self.host;
        let d = &mut self.disclosure;
        match op {
            Op::Open => d.open(host),
            Op::Close => d.close(host),
            Op::Toggle => d.toggle(host),
            Op::Escape => {
                deliver_key(host, &mut [&mut *d], &mut KeyEvent::escape());
            }
            Op::ClickOutside => {
                let mut ev = PointerEvent::down(Some(self.outside));
                deliver_pointer(host, &mut [&mut *d], &mut ev);
            }
            Op::ClickInside => {
                let mut ev = PointerEvent::down(Some(self.inside));
                deliver_pointer(host, &mut [&mut *d], &mut ev);
            }
            Op::Tab => {
                deliver_key(host, &mut [&mut *d], &mut KeyEvent::tab(false));
            }
            Op::Flush => {
                d.flush(host);
            }
            Op::Advance(ms) => host.env_mut().advance(ms),
            Op::AnimationEnd => {
                d.animation_end(host);
            }
        }
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn controlled_mirror_matches_uncontrolled(
        ops in prop::collection::vec(op(), 0..40),
        exit in transition(),
    ) {
        let config = DisclosureConfig::default().exit(exit);
        let mut free = scene(config.clone());
        let mut owned = scene(config.controlled(false));

        let requested = Rc::new(Cell::new(None));
        let sink = requested.clone();
        owned.disclosure.on_open_change(move |open| sink.set(Some(open)));

        for op in ops {
            free.apply(op);
            owned.apply(op);
            // The owner accepts every request.
            if let Some(open) = requested.take() {
                prop_assert!(owned.disclosure.is_open() != open);
                owned.disclosure.set_open_prop(&mut owned.host, Some(open));
            }
            prop_assert_eq!(free.disclosure.is_open(), owned.disclosure.is_open());
            prop_assert_eq!(free.disclosure.generation(), owned.disclosure.generation());
            prop_assert_eq!(free.disclosure.phase(), owned.disclosure.phase());
        }
    }

    #[test]
    fn closed_instances_hold_no_listeners(
        ops in prop::collection::vec(op(), 0..40),
        exit in transition(),
    ) {
        let mut s = scene(DisclosureConfig::default().exit(exit));
        for op in ops {
            s.apply(op);
            let id = s.disclosure.id();
            let listeners = s.host.env().listener_count_for(id);
            if s.disclosure.is_open() {
                prop_assert!(listeners <= 2);
                prop_assert!(s.host.layers().is_topmost(id));
            } else {
                prop_assert_eq!(listeners, 0);
                prop_assert_eq!(s.host.layers().depth(), 0);
            }
        }

        s.disclosure.unmount(&mut s.host);
        prop_assert_eq!(s.host.env().listener_count(), 0);
        prop_assert!(s.host.portal().is_empty());
    }

    #[test]
    fn settled_close_restores_focus_to_trigger(
        ops in prop::collection::vec(op(), 0..30),
    ) {
        let mut s = scene(DisclosureConfig::dialog());
        let trigger = s.disclosure.trigger().map(|t| t.element());
        for op in ops {
            s.apply(op);
        }
        s.disclosure.close(&mut s.host);
        s.disclosure.flush(&mut s.host);
        prop_assert_eq!(s.host.env().active_element(), trigger);
        prop_assert_eq!(s.disclosure.focus_snapshot().origin, None);
    }
}
