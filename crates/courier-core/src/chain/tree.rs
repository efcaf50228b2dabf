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

use std::collections::HashMap;
use std::fmt;

use super::builder::ChainBuilder;
use super::node::{HandlerNode, NodeId};
use crate::error::ChainError;
use crate::event::{Event, EventKind};

/// The result of offering an event to a chain.
///
/// Both variants are ordinary values: an unhandled event is something the
/// caller may surface, log, or ignore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A node on the ancestor path accepted the event and ran its reaction.
    Handled {
        /// The node that handled the event.
        node: NodeId,
        /// Its identity.
        identity: String,
        /// How many times the event was passed to a parent first.
        forwarded: usize,
    },
    /// The root was reached and nobody accepted the event. No reaction ran.
    Unhandled {
        /// The kind nobody accepted.
        kind: EventKind,
        /// How many times the event was passed to a parent.
        forwarded: usize,
    },
}

impl Outcome {
    /// Returns `true` if a node handled the event.
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled { .. })
    }

    /// Identity of the handling node, if any.
    pub fn handled_by(&self) -> Option<&str> {
        match self {
            Outcome::Handled { identity, .. } => Some(identity.as_str()),
            Outcome::Unhandled { .. } => None,
        }
    }

    /// Number of forwarding steps taken.
    pub fn forwarded(&self) -> usize {
        match self {
            Outcome::Handled { forwarded, .. } => *forwarded,
            Outcome::Unhandled { forwarded, .. } => *forwarded,
        }
    }

    /// Turns an unhandled outcome into [`ChainError::Unhandled`], for callers
    /// that want to escalate with `?`. Yields the handler's identity otherwise.
    pub fn into_result(self) -> Result<String, ChainError> {
        match self {
            Outcome::Handled { identity, .. } => Ok(identity),
            Outcome::Unhandled { kind, .. } => Err(ChainError::Unhandled(kind)),
        }
    }
}

/// An immutable tree of handler nodes with exactly one root.
///
/// Built through [`ChainBuilder`]. Because nothing can change after `build`,
/// a chain can be shared (for example behind an `Arc`) and dispatched into
/// from any number of threads.
pub struct Chain {
    nodes: Vec<HandlerNode>,
    index: HashMap<String, NodeId>,
}

impl Chain {
    /// Starts declaring a new chain.
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    pub(crate) fn from_arena(nodes: Vec<HandlerNode>, index: HashMap<String, NodeId>) -> Self {
        Self { nodes, index }
    }

    /// Offers `event` to `start`, forwarding it up the ancestor path until a
    /// node accepts it or the root declines it.
    ///
    /// ## Errors
    /// Returns [`ChainError::UnknownNode`] if `start` is not a node of this
    /// chain. An event nobody accepts is reported as [`Outcome::Unhandled`],
    /// not as an error.
    pub fn dispatch(&self, start: NodeId, event: &Event) -> Result<Outcome, ChainError> {
        let kind = event.kind();
        let mut forwarded = 0;

        for (id, node) in self.ancestors(start)? {
            log::trace!("{} attempting to handle '{kind}'.", node.identity());

            if node.capabilities().accepts(kind) {
                node.handle(event);
                log::debug!(
                    "'{kind}' handled by {} after {forwarded} forward(s).",
                    node.identity()
                );
                return Ok(Outcome::Handled {
                    node: id,
                    identity: node.identity().to_owned(),
                    forwarded,
                });
            }

            if node.parent().is_some() {
                log::debug!("{} forwarding '{kind}' to its parent.", node.identity());
                forwarded += 1;
            }
        }

        log::warn!("No handler accepted '{kind}' (forwarded {forwarded} time(s)).");
        Ok(Outcome::Unhandled {
            kind: kind.clone(),
            forwarded,
        })
    }

    /// Returns the node that would handle `kind` if dispatched from `start`,
    /// without running any reaction.
    pub fn resolver(&self, start: NodeId, kind: &EventKind) -> Result<Option<NodeId>, ChainError> {
        Ok(self
            .ancestors(start)?
            .find(|(_, node)| node.capabilities().accepts(kind))
            .map(|(id, _)| id))
    }

    /// Iterates over `start` and then each of its ancestors up to the root.
    pub fn ancestors(&self, start: NodeId) -> Result<Ancestors<'_>, ChainError> {
        if self.nodes.get(start.0).is_none() {
            return Err(ChainError::UnknownNode(start));
        }
        Ok(Ancestors {
            chain: self,
            next: Some(start),
        })
    }

    /// Number of forwarding steps between `node` and the root.
    pub fn depth(&self, node: NodeId) -> Result<usize, ChainError> {
        Ok(self.ancestors(node)?.count() - 1)
    }

    /// Looks a node up by identity.
    pub fn find(&self, identity: &str) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    /// Returns the node behind `id`, if it belongs to this chain.
    pub fn node(&self, id: NodeId) -> Option<&HandlerNode> {
        self.nodes.get(id.0)
    }

    /// The root node. Parents precede children in the arena, so it is always first.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Iterates over every node, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HandlerNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (NodeId(slot), node))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a built chain has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("root", &self.root())
            .field("nodes", &self.nodes)
            .finish()
    }
}

/// Iterator over a node and its ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
    chain: &'a Chain,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a HandlerNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.chain.nodes.get(id.0)?;
        self.next = node.parent();
        Some((id, node))
    }
}
