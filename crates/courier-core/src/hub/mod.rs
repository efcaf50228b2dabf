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

//! Decoupled publish/notify dispatch.
//!
//! A subject owns an ordered [`ListenerSet`] and notifies it synchronously,
//! in registration order, whenever its state changes. Listeners implement the
//! [`Listener`] trait explicitly. A [`Mediator`] is a listener that forwards
//! each hint to an unrelated [`Searchable`] target, so the subject never has
//! to know the target's type.
//!
//! ```text
//!  TextSubject ──notify(hint)──► ListenerSet ──► Mediator ──search(hint)──► Document
//!                                     │
//!                                     └────────► Mediator ──search(hint)──► Internet
//! ```
//!
//! Delivery is fail-fast: the first listener that errors ends the notification.
//! Registration never deduplicates.
//!
//! [`NotificationHub`] keeps several subjects' listener sets side by side and
//! lets a subject be torn down, after which nothing is delivered for it.

mod listener;
mod mediator;
mod registry;
mod set;
mod text;

pub use self::listener::{FnListener, Listener, Observable};
pub use self::mediator::{Mediator, Searchable};
pub use self::registry::{NotificationHub, SubjectId};
pub use self::set::ListenerSet;
pub use self::text::{TextSnapshot, TextSubject};
