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

//! The event shape shared by every dispatch mechanism.
//!
//! An [`Event`] is a validated [`EventKind`] plus an opaque payload. Delegation
//! chains route on the kind; listeners receive whatever hint type their subject
//! publishes, which may itself be an [`Event`].
//!
//! The [`EventQueue`] lets action sources enqueue events without holding a
//! reference to whoever will dispatch them.

mod kind;
mod queue;

pub use self::kind::{Event, EventKind};
pub use self::queue::EventQueue;
