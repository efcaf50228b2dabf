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

use std::sync::Arc;

use super::node::NodeId;
use super::tree::{Chain, Outcome};
use crate::error::{ChainError, ListenerError};
use crate::event::Event;
use crate::hub::Listener;

/// Feeds notified events into a delegation chain.
///
/// Each [`update`](Listener::update) dispatches the event from `entry`. An
/// event nobody handles is reported as a listener failure, which ends the
/// notification like any other failing listener.
#[derive(Debug, Clone)]
pub struct ChainListener {
    name: String,
    chain: Arc<Chain>,
    entry: NodeId,
}

impl ChainListener {
    /// Creates a listener dispatching into `chain` from `entry`.
    ///
    /// ## Errors
    /// [`ChainError::UnknownNode`] if `entry` is not part of `chain`.
    pub fn new(chain: Arc<Chain>, entry: NodeId) -> Result<Self, ChainError> {
        let identity = chain
            .node(entry)
            .ok_or(ChainError::UnknownNode(entry))?
            .identity()
            .to_owned();
        Ok(Self {
            name: format!("chain@{identity}"),
            chain,
            entry,
        })
    }

    /// The node events enter the chain at.
    pub fn entry(&self) -> NodeId {
        self.entry
    }
}

impl Listener<Event> for ChainListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, hint: &Event) -> Result<(), ListenerError> {
        match self.chain.dispatch(self.entry, hint)? {
            Outcome::Handled { .. } => Ok(()),
            Outcome::Unhandled { kind, .. } => Err(ChainError::Unhandled(kind).into()),
        }
    }
}
