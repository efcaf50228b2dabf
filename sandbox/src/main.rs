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

// Courier Sandbox
// Walks through the window/form/button hierarchy and the search-box mediators.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use courier_core::chain::{Chain, NodeId};
use courier_core::event::{Event, EventQueue};
use courier_core::hub::{Mediator, Searchable, TextSubject};
use courier_core::{ChainConfig, ListenerError, Outcome};

/// Text that highlights whatever is searched for in it.
struct Highlighter {
    label: &'static str,
    content: &'static str,
}

impl Searchable for Highlighter {
    fn label(&self) -> &str {
        self.label
    }

    fn search(&self, term: &str) -> Result<(), ListenerError> {
        println!("{}", self.content.replace(term, &format!("<b>{term}</b>")));
        Ok(())
    }
}

/// A button that turns user actions into queued events.
struct Button {
    id: NodeId,
    events: flume::Sender<(NodeId, Event)>,
}

impl Button {
    fn act(&self, action: &str) -> Result<()> {
        println!("\nthe {action} event has happened");
        let event = Event::new(action)?;
        self.events
            .send((self.id, event))
            .map_err(|_| anyhow!("event queue is gone"))?;
        Ok(())
    }
}

fn load_chain(path: Option<String>) -> Result<Chain> {
    let config = match path {
        Some(path) => ChainConfig::from_file(&path)
            .with_context(|| format!("loading chain config from {path}"))?,
        None => ChainConfig::window_form_button(),
    };

    let chain = config
        .into_builder()
        .on_handle("window", |_: &Event| println!("hiding the window"))
        .on_handle("button", |_: &Event| println!("changing colour of button"))
        .build()?;
    Ok(chain)
}

fn run_delegation(chain: &Chain) -> Result<()> {
    let queue = EventQueue::<(NodeId, Event)>::new();
    let button = Button {
        id: chain
            .find("button")
            .context("chain config declares no 'button' node")?,
        events: queue.sender(),
    };

    for action in ["mouseover", "click", "weirdaction"] {
        button.act(action)?;
        deliver(chain, &queue)?;
    }

    println!("\nthe window title bar was clicked");
    queue.publish((chain.root(), Event::new("click")?));
    deliver(chain, &queue)
}

fn deliver(chain: &Chain, queue: &EventQueue<(NodeId, Event)>) -> Result<()> {
    log::debug!("{} event(s) waiting", queue.pending());
    for (target, event) in queue.drain() {
        let kind = event.kind();
        match chain.dispatch(target, &event)? {
            Outcome::Handled {
                identity, forwarded, ..
            } => log::info!("'{kind}' handled by {identity} ({forwarded} forward(s))"),
            Outcome::Unhandled { .. } => println!("Cannot handle event {kind}"),
        }
    }
    Ok(())
}

fn run_mediators() -> Result<()> {
    let mut textbox = TextSubject::new("search box");
    let document = Arc::new(Highlighter {
        label: "document",
        content: "some kind of content in the document - it was probably loaded from a file",
    });
    let internet = Arc::new(Highlighter {
        label: "internet",
        content: "some kind of content from the internet!",
    });
    Mediator::attach(&mut textbox, document);
    Mediator::attach(&mut textbox, internet);

    println!();
    textbox.type_text("con")?;
    let saved = textbox.save_state();
    textbox.type_text("tent")?;

    println!("\nundoing the last edit");
    textbox.restore_state(&saved)?;
    log::info!("search box reads '{}'", textbox.current_value());
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let chain = load_chain(std::env::args().nth(1))?;
    run_delegation(&chain)?;
    run_mediators()?;
    Ok(())
}
