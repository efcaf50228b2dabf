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

//! # Courier Core
//!
//! In-process event propagation without producer/consumer coupling:
//!
//! - [`chain`]: hierarchical delegation. An event offered to a node climbs the
//!   node's ancestor path until some node declares it can handle the event's
//!   kind, or the root declines it.
//! - [`hub`]: publish/notify. A stateful subject tells an ordered set of
//!   listeners about each change, without knowing what they do with it.
//!
//! Both run synchronously on the caller's thread. Neither keeps global state.
//!
//! ## Example
//! ```rust
//! use courier_core::chain::{Chain, NodeSpec};
//! use courier_core::event::Event;
//!
//! let chain = Chain::builder()
//!     .node(NodeSpec::root("window").handles("click"))
//!     .node(NodeSpec::child("form", "window"))
//!     .node(NodeSpec::child("button", "form").handles("mouseover"))
//!     .build()?;
//!
//! let button = chain.find("button").expect("declared above");
//! let outcome = chain.dispatch(button, &Event::new("click")?)?;
//! assert_eq!(outcome.handled_by(), Some("window"));
//! assert_eq!(outcome.forwarded(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod chain;
pub mod config;
pub mod error;
pub mod event;
pub mod hub;

pub use chain::{Chain, ChainBuilder, NodeId, NodeSpec, Outcome};
pub use config::ChainConfig;
pub use error::{ChainError, ListenerError, NotifyError};
pub use event::{Event, EventKind};
pub use hub::{Listener, ListenerSet, NotificationHub, TextSubject};
