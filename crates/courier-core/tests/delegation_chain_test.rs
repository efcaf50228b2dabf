// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::{Arc, Mutex};

use courier_core::chain::{Chain, NodeSpec, Outcome};
use courier_core::config::ChainConfig;
use courier_core::event::{Event, EventKind};
use courier_core::ChainError;

type Trace = Arc<Mutex<Vec<String>>>;

fn tracing_reaction(trace: &Trace, label: &'static str) -> impl Fn(&Event) + Send + Sync {
    let trace = Arc::clone(trace);
    move |event: &Event| {
        trace
            .lock()
            .unwrap()
            .push(format!("{label}:{}", event.kind()));
    }
}

/// window (click) > form () > button (mouseover), each node recording what it handles.
fn ui_chain(trace: &Trace) -> Chain {
    ChainConfig::window_form_button()
        .into_builder()
        .on_handle("window", tracing_reaction(trace, "hide window"))
        .on_handle("form", tracing_reaction(trace, "submit form"))
        .on_handle("button", tracing_reaction(trace, "change colour"))
        .build()
        .expect("canonical hierarchy is well formed")
}

/// A single line of `depth + 1` nodes where only the root handles `kind`.
fn linear_chain(depth: usize, kind: &str) -> Chain {
    let mut builder = Chain::builder().node(NodeSpec::root("n0").handles(kind));
    for level in 1..=depth {
        let parent = format!("n{}", level - 1);
        builder = builder.node(NodeSpec::child(format!("n{level}"), parent));
    }
    builder.build().expect("linear chain is well formed")
}

#[test]
fn test_click_on_button_is_handled_by_window_after_two_forwards() {
    // --- 1. ARRANGE ---
    let trace = Trace::default();
    let chain = ui_chain(&trace);
    let button = chain.find("button").unwrap();
    let click = Event::new("click").unwrap();

    // --- 2. ACT ---
    let outcome = chain.dispatch(button, &click).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(
        outcome,
        Outcome::Handled {
            node: chain.root(),
            identity: "window".into(),
            forwarded: 2,
        }
    );
    assert_eq!(*trace.lock().unwrap(), vec!["hide window:click"]);
}

#[test]
fn test_weird_action_is_unhandled_without_side_effects() {
    // --- 1. ARRANGE ---
    let trace = Trace::default();
    let chain = ui_chain(&trace);
    let button = chain.find("button").unwrap();

    // --- 2. ACT ---
    let outcome = chain
        .dispatch(button, &Event::new("weirdaction").unwrap())
        .unwrap();

    // --- 3. ASSERT ---
    assert!(!outcome.is_handled());
    assert_eq!(
        outcome.into_result(),
        Err(ChainError::Unhandled(EventKind::new("weirdaction").unwrap()))
    );
    assert!(trace.lock().unwrap().is_empty(), "no reaction may run");
}

#[test]
fn test_mouseover_stays_on_the_button() {
    let trace = Trace::default();
    let chain = ui_chain(&trace);
    let button = chain.find("button").unwrap();

    let outcome = chain
        .dispatch(button, &Event::new("mouseover").unwrap())
        .unwrap();

    assert_eq!(outcome.handled_by(), Some("button"));
    assert_eq!(outcome.forwarded(), 0);
    assert_eq!(*trace.lock().unwrap(), vec!["change colour:mouseover"]);
}

#[test]
fn test_root_only_capability_takes_depth_forwards_from_the_leaf() {
    for depth in 0..8 {
        let chain = linear_chain(depth, "close");
        let leaf = chain.find(&format!("n{depth}")).unwrap();
        assert_eq!(chain.depth(leaf).unwrap(), depth);

        let close = Event::new("close").unwrap();
        let outcome = chain.dispatch(leaf, &close).unwrap();

        assert_eq!(outcome.handled_by(), Some("n0"), "depth {depth}");
        assert_eq!(outcome.forwarded(), depth, "depth {depth}");
    }
}

#[test]
fn test_kind_nobody_declares_is_unhandled_at_every_depth() {
    for depth in 0..5 {
        let chain = linear_chain(depth, "close");
        let leaf = chain.find(&format!("n{depth}")).unwrap();

        let open = Event::new("open").unwrap();
        let outcome = chain.dispatch(leaf, &open).unwrap();

        assert_eq!(
            outcome,
            Outcome::Unhandled {
                kind: EventKind::new("open").unwrap(),
                forwarded: depth,
            }
        );
    }
}

#[test]
fn test_payload_reaches_the_reaction_untouched() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let chain = Chain::builder()
        .node(
            NodeSpec::root("canvas")
                .handles("draw")
                .on_handle(move |event: &Event| {
                    *sink.lock().unwrap() = Some(event.payload().clone());
                }),
        )
        .node(NodeSpec::child("layer", "canvas"))
        .build()
        .unwrap();
    let event = Event::new("draw")
        .unwrap()
        .with_payload(serde_json::json!({ "shape": "circle" }));

    let layer = chain.find("layer").unwrap();
    chain.dispatch(layer, &event).unwrap();

    assert_eq!(
        seen.lock().unwrap().as_ref(),
        Some(&serde_json::json!({ "shape": "circle" }))
    );
}

#[test]
fn test_shared_chain_dispatches_from_many_threads() {
    let trace = Trace::default();
    let chain = Arc::new(ui_chain(&trace));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let chain = Arc::clone(&chain);
            std::thread::spawn(move || {
                let button = chain.find("button").unwrap();
                chain
                    .dispatch(button, &Event::new("click").unwrap())
                    .unwrap()
                    .forwarded()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("dispatcher thread panicked"), 2);
    }
    assert_eq!(trace.lock().unwrap().len(), 4);
}
