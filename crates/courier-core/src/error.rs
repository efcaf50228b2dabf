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

//! Defines the error types for events, delegation chains, and notifications.
//!
//! None of these are fatal: an unhandled event or a failing listener is a value
//! the caller inspects and may escalate, log, or ignore.

use thiserror::Error;

use crate::chain::NodeId;
use crate::event::EventKind;
use crate::hub::SubjectId;

/// The error a listener returns from [`Listener::update`](crate::hub::Listener::update).
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// An error raised while constructing an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event kind was empty or only whitespace.
    #[error("Event kind must not be empty")]
    EmptyKind,
}

/// A structural problem found while building a [`Chain`](crate::chain::Chain).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedChain {
    /// The builder held no nodes.
    #[error("Chain has no nodes")]
    Empty,
    /// A node was declared with an empty identity.
    #[error("Chain node identity must not be empty")]
    EmptyIdentity,
    /// Two nodes share the same identity.
    #[error("Duplicate chain node identity '{0}'")]
    DuplicateIdentity(String),
    /// A node names a parent that was never declared.
    #[error("Node '{node}' names unknown parent '{parent}'")]
    UnknownParent {
        /// The node declaring the parent.
        node: String,
        /// The missing parent identity.
        parent: String,
    },
    /// Every node has a parent, so no node can serve as the root.
    #[error("Chain has no root node")]
    NoRoot,
    /// More than one node lacks a parent.
    #[error("Chain has multiple root nodes: {0:?}")]
    MultipleRoots(Vec<String>),
    /// A reaction was attached to an identity no node declares.
    #[error("Reaction attached to undeclared node '{0}'")]
    UndeclaredNode(String),
    /// Parent links loop back on themselves; lists the nodes caught in the loop.
    #[error("Chain parent links form a cycle through {0:?}")]
    Cycle(Vec<String>),
}

/// An error related to building or dispatching through a delegation chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// No node on the ancestor path declared a capability for the event kind.
    #[error("No handler accepted event '{0}'")]
    Unhandled(EventKind),
    /// The node id does not belong to this chain.
    #[error("Node {0:?} does not belong to this chain")]
    UnknownNode(NodeId),
    /// The hierarchy was rejected at construction time.
    #[error("Malformed chain: {0}")]
    Malformed(#[from] MalformedChain),
    /// A capability kind could not be turned into a valid event kind.
    #[error("Invalid event kind: {0}")]
    Event(#[from] EventError),
}

/// An error surfaced by a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A listener's `update` failed. Listeners after it were not notified.
    #[error("Listener '{listener}' at position {position} failed: {source}")]
    ListenerFailure {
        /// The diagnostic name of the failing listener.
        listener: String,
        /// Zero-based registration position of the failing listener.
        position: usize,
        /// The error returned by the listener.
        source: ListenerError,
    },
    /// The subject was never added to the hub, or has been removed.
    #[error("Subject {0:?} is not registered with this hub")]
    UnknownSubject(SubjectId),
}

impl NotifyError {
    /// Zero-based position of the failing listener, if a listener failed.
    pub fn failed_position(&self) -> Option<usize> {
        match self {
            NotifyError::ListenerFailure { position, .. } => Some(*position),
            NotifyError::UnknownSubject(_) => None,
        }
    }
}

/// An error raised while loading or saving a [`ChainConfig`](crate::config::ChainConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("Config I/O failed for '{path}': {source}")]
    Io {
        /// The path involved.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The config text is not valid JSON for a chain config.
    #[error("Config could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unhandled_names_the_kind() {
        let err = ChainError::Unhandled(EventKind::new("weirdaction").unwrap());
        assert_eq!(err.to_string(), "No handler accepted event 'weirdaction'");
    }

    #[test]
    fn malformed_converts_into_chain_error() {
        let err: ChainError = MalformedChain::NoRoot.into();
        assert_eq!(err, ChainError::Malformed(MalformedChain::NoRoot));
        assert_eq!(err.to_string(), "Malformed chain: Chain has no root node");
    }

    #[test]
    fn listener_failure_exposes_its_cause() {
        let err = NotifyError::ListenerFailure {
            listener: "highlighter".into(),
            position: 1,
            source: "disk full".into(),
        };
        assert_eq!(err.failed_position(), Some(1));
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(cause.as_deref(), Some("disk full"));
    }
}
