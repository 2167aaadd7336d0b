// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dropdown menu driven through one open/close cycle.
//!
//! The menu opens from its trigger, focus moves to the first item, an outside
//! press dismisses it, the exit transition plays out on the clock, and focus
//! returns to the trigger.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example disclosure_walkthrough`

use kurbo::Rect;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_disclosure::dismiss::deliver_pointer;
use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
use understory_disclosure::parts::{Content, Trigger};
use understory_disclosure::{
    Disclosure, DisclosureConfig, Environment, Host, PointerEvent, Transition,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut env = MemoryEnvironment::new();
    let body = env.body();
    let trigger = env.append(
        body,
        ElementSpec::button().bounds(Rect::new(10.0, 10.0, 90.0, 34.0)),
    );
    let canvas = env.append(body, ElementSpec::div());
    let menu = env.create(ElementSpec::div().bounds(Rect::new(10.0, 38.0, 170.0, 138.0)));
    let items = [
        env.append(menu, ElementSpec::button()),
        env.append(menu, ElementSpec::button()),
        env.append(menu, ElementSpec::button().disabled()),
    ];
    env.focus(trigger).unwrap();

    let mut host = Host::new(env);
    let config = DisclosureConfig::dropdown_menu().exit(Transition::Duration(120));
    let mut dropdown = Disclosure::new(
        &mut host,
        config,
        Some(Trigger::new(trigger)),
        Content::new(menu),
    );
    dropdown.subscribe(|open| println!("subscriber: open = {open}"));
    dropdown.mount(&mut host);

    let trigger_part = Trigger::new(trigger);
    info!(disclosure = ?dropdown.id(), "pressing the trigger");
    trigger_part.press(&mut dropdown, &mut host);
    dropdown.flush(&mut host);
    println!(
        "after press: aria-expanded = {}, focus on first item = {}",
        trigger_part.aria_expanded(&dropdown),
        host.env().active_element() == Some(items[0]),
    );
    if let Some(bounds) = dropdown.content_handle().bounding_box(host.env()) {
        println!("menu bounds: {bounds:?}");
    }

    let mut press = PointerEvent::down(Some(canvas));
    let stopped_at = deliver_pointer(&mut host, &mut [&mut dropdown], &mut press);
    println!(
        "outside press handled by {:?}; phase = {:?}",
        stopped_at.map(|id| id.get()),
        dropdown.phase(),
    );

    while let Some(deadline) = dropdown.next_deadline() {
        let now = host.env().now();
        if deadline > now {
            host.env_mut().advance(deadline - now);
        }
        let ran = dropdown.flush(&mut host);
        println!("t = {}ms: ran {ran} task(s), phase = {:?}", host.env().now(), dropdown.phase());
    }

    println!(
        "menu connected = {}, focus back on trigger = {}",
        host.env().is_connected(menu),
        host.env().active_element() == Some(trigger),
    );
}
