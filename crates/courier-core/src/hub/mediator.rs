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

//! Links a subject to an unrelated searchable target.

use std::fmt;
use std::sync::Arc;

use super::listener::{Listener, Observable};
use crate::error::ListenerError;

/// A target that can act on a search term.
pub trait Searchable: Send + Sync {
    /// A label used in logs.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Runs a search for `term`.
    fn search(&self, term: &str) -> Result<(), ListenerError>;
}

/// A listener that forwards every hint to a [`Searchable`] target.
///
/// The subject only sees a [`Listener<str>`]; it never learns the target's
/// type.
pub struct Mediator<T: Searchable> {
    name: String,
    target: Arc<T>,
}

impl<T: Searchable + 'static> Mediator<T> {
    /// Creates a mediator forwarding to `target`.
    pub fn new(target: Arc<T>) -> Self {
        let name = format!("mediator->{}", target.label());
        Self { name, target }
    }

    /// Creates a mediator for `target` and registers it on `subject`.
    ///
    /// The returned handle is the registered listener.
    pub fn attach<S>(subject: &mut S, target: Arc<T>) -> Arc<Self>
    where
        S: Observable<str> + ?Sized,
    {
        let mediator = Arc::new(Self::new(target));
        let listener: Arc<dyn Listener<str>> = mediator.clone();
        subject.register(listener);
        mediator
    }

    /// The target hints are forwarded to.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }
}

impl<T: Searchable> Listener<str> for Mediator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, hint: &str) -> Result<(), ListenerError> {
        log::trace!("{} forwarding '{hint}'.", self.name);
        self.target.search(hint)
    }
}

impl<T: Searchable> fmt::Debug for Mediator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("name", &self.name)
            .field("target", &self.target.label())
            .finish()
    }
}
