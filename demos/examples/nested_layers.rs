// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dialog with a select inside it: Escape peels off one layer at a time.
//!
//! Also shows controlled mode: the dialog's open state lives in the app, and
//! every request is fed back through `set_open_prop`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example nested_layers`

use std::cell::Cell;
use std::rc::Rc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_disclosure::dismiss::deliver_key;
use understory_disclosure::memory::{ElementSpec, MemoryEnvironment};
use understory_disclosure::parts::{Content, Trigger};
use understory_disclosure::{Disclosure, DisclosureConfig, Environment, Host, KeyEvent};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut env = MemoryEnvironment::new();
    let body = env.body();
    let open_dialog = env.append(body, ElementSpec::button());
    let dialog = env.create(ElementSpec::div().tab_index(-1));
    let select_button = env.append(dialog, ElementSpec::button());
    env.append(dialog, ElementSpec::input());
    let listbox = env.create(ElementSpec::div());
    let option = env.append(listbox, ElementSpec::div().tab_index(0));
    env.focus(open_dialog).unwrap();

    let mut host = Host::new(env);

    // The app owns the dialog's open state.
    let app_open = Rc::new(Cell::new(false));
    let mut dialog_d = Disclosure::new(
        &mut host,
        DisclosureConfig::dialog().controlled(app_open.get()),
        Some(Trigger::new(open_dialog)),
        Content::new(dialog),
    );
    let requests = app_open.clone();
    dialog_d.on_open_change(move |open| requests.set(open));
    dialog_d.mount(&mut host);

    let mut select = Disclosure::new(
        &mut host,
        DisclosureConfig::select(),
        Some(Trigger::new(select_button)),
        Content::new(listbox),
    );
    select.mount(&mut host);

    dialog_d.open(&mut host);
    println!("dialog requested open; app state = {}", app_open.get());
    dialog_d.set_open_prop(&mut host, Some(app_open.get()));
    dialog_d.flush(&mut host);

    select.open(&mut host);
    select.flush(&mut host);
    println!(
        "layers = {}, focus on option = {}",
        host.layers().depth(),
        host.env().active_element() == Some(option),
    );

    for round in 1..=2 {
        info!(round, "pressing Escape");
        let mut esc = KeyEvent::escape();
        let stopped_at = deliver_key(&mut host, &mut [&mut dialog_d, &mut select], &mut esc);
        dialog_d.set_open_prop(&mut host, Some(app_open.get()));
        dialog_d.flush(&mut host);
        select.flush(&mut host);
        println!(
            "escape #{round}: handled by {:?}; dialog open = {}, select open = {}",
            stopped_at.map(|id| id.get()),
            dialog_d.is_open(),
            select.is_open(),
        );
    }

    println!(
        "focus back on the page button = {}",
        host.env().active_element() == Some(open_dialog),
    );
}
