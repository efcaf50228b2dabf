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

//! Hierarchical event delegation.
//!
//! A [`Chain`] is a tree of [`HandlerNode`]s with a single root. An event is
//! offered to a starting node; if the node's [`Capabilities`] do not include
//! the event's kind, the event is forwarded to the parent, and so on until a
//! node handles it or the root declines it.
//!
//! ```text
//!   window  (click)          dispatch(button, "click")
//!     ▲                        button: no  ─► forward
//!   form    ()                 form:   no  ─► forward
//!     ▲                        window: yes ─► Handled(window), 2 forwards
//!   button  (mouseover)
//! ```
//!
//! Chains are declared with a [`ChainBuilder`], which rejects hierarchies that
//! have no root, several roots, unknown parents, or loops.

mod builder;
mod listener;
mod node;
mod topology;
mod tree;

pub use self::builder::ChainBuilder;
pub use self::listener::ChainListener;
pub use self::node::{Capabilities, HandlerNode, NodeId, NodeSpec, Reaction};
pub use self::tree::{Ancestors, Chain, Outcome};
