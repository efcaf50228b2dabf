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

//! Handler nodes and the declarations they are built from.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::event::{Event, EventKind};

/// Identifies a node inside the [`Chain`](super::Chain) that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its chain's arena. Parents always sit before
    /// their children.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The side effect a node runs when it handles an event.
///
/// The chain never looks at what a reaction does. Any `Fn(&Event)` closure that
/// is `Send + Sync` is a reaction.
pub trait Reaction: Send + Sync {
    /// Runs the side effect for `event`.
    fn react(&self, event: &Event);
}

impl<F> Reaction for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn react(&self, event: &Event) {
        self(event)
    }
}

/// The set of event kinds a node resolves without forwarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    kinds: BTreeSet<EventKind>,
}

impl Capabilities {
    /// A capability set that accepts nothing; such a node forwards everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds a kind to the set. Returns `false` if it was already present.
    pub fn insert(&mut self, kind: EventKind) -> bool {
        self.kinds.insert(kind)
    }

    /// Returns `true` if the node resolves events of `kind` itself.
    pub fn accepts(&self, kind: &EventKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Iterates over the accepted kinds in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &EventKind> {
        self.kinds.iter()
    }

    /// Number of accepted kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if the node accepts no kind at all.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl FromIterator<EventKind> for Capabilities {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

/// A built, immutable node of a delegation chain.
pub struct HandlerNode {
    pub(crate) identity: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) capabilities: Capabilities,
    pub(crate) reaction: Option<Arc<dyn Reaction>>,
}

impl HandlerNode {
    /// The tracing label of this node, unique within its chain.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The node unresolved events are forwarded to; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if this node is the root of its chain.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The kinds this node resolves itself.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns `true` if a reaction runs when this node handles an event.
    pub fn has_reaction(&self) -> bool {
        self.reaction.is_some()
    }

    pub(crate) fn handle(&self, event: &Event) {
        if let Some(reaction) = &self.reaction {
            reaction.react(event);
        }
    }
}

impl fmt::Debug for HandlerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerNode")
            .field("identity", &self.identity)
            .field("parent", &self.parent)
            .field("capabilities", &self.capabilities)
            .field("has_reaction", &self.reaction.is_some())
            .finish()
    }
}

/// The declaration of a node, consumed by [`ChainBuilder`](super::ChainBuilder).
///
/// Parents are named by identity; the builder resolves and validates them.
pub struct NodeSpec {
    pub(crate) identity: String,
    pub(crate) parent: Option<String>,
    pub(crate) handles: Vec<String>,
    pub(crate) reaction: Option<Arc<dyn Reaction>>,
}

impl NodeSpec {
    /// Declares the root node: the one node without a parent.
    pub fn root(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            parent: None,
            handles: Vec::new(),
            reaction: None,
        }
    }

    /// Declares a node whose unresolved events go to `parent`.
    pub fn child(identity: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::root(identity)
        }
    }

    /// Adds one kind this node resolves itself.
    pub fn handles(mut self, kind: impl Into<String>) -> Self {
        self.handles.push(kind.into());
        self
    }

    /// Adds several kinds this node resolves itself.
    pub fn handles_all<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handles.extend(kinds.into_iter().map(Into::into));
        self
    }

    /// Sets the side effect run when this node handles an event.
    pub fn on_handle(mut self, reaction: impl Reaction + 'static) -> Self {
        let reaction: Arc<dyn Reaction> = Arc::new(reaction);
        self.reaction = Some(reaction);
        self
    }

    /// The declared identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSpec")
            .field("identity", &self.identity)
            .field("parent", &self.parent)
            .field("handles", &self.handles)
            .field("has_reaction", &self.reaction.is_some())
            .finish()
    }
}
