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

//! The event data shape shared by delegation chains and listeners.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::EventError;

/// The discriminating tag of an [`Event`], such as `"click"` or `"mouseover"`.
///
/// A kind is never empty. Kinds compare by their exact string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventKind(String);

impl EventKind {
    /// Creates a new kind from a tag.
    ///
    /// ## Errors
    /// Returns [`EventError::EmptyKind`] if the tag is empty or only whitespace.
    pub fn new(tag: impl Into<String>) -> Result<Self, EventError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(EventError::EmptyKind);
        }
        Ok(Self(tag))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventKind {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EventKind {
    type Error = EventError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.0
    }
}

impl Borrow<str> for EventKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable event offered to handler nodes and listeners.
///
/// The payload is opaque to the dispatch machinery: chains route on
/// [`kind`](Event::kind) alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    #[serde(default)]
    payload: serde_json::Value,
}

impl Event {
    /// Creates an event of the given kind with an empty payload.
    ///
    /// ## Errors
    /// Returns [`EventError::EmptyKind`] if `kind` is empty.
    pub fn new(kind: impl Into<String>) -> Result<Self, EventError> {
        Ok(Self::of(EventKind::new(kind)?))
    }

    /// Creates an event from an already validated kind.
    pub fn of(kind: EventKind) -> Self {
        Self {
            kind,
            payload: serde_json::Value::Null,
        }
    }

    /// Returns a copy of this event carrying `payload`.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// The kind this event is routed on.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The data attached to the event, `Null` when there is none.
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Returns `true` if the event carries no payload.
    pub fn has_payload(&self) -> bool {
        !self.payload.is_null()
    }
}
