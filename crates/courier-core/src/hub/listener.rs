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

use std::fmt;
use std::sync::Arc;

use crate::error::ListenerError;

/// Something that wants to hear about a subject's state changes.
///
/// Every listener type implements this trait explicitly. The hint type `H` is
/// whatever the subject publishes: the new text of a text box, an
/// [`Event`](crate::event::Event), and so on.
pub trait Listener<H: ?Sized>: Send + Sync {
    /// A label used in logs and in [`NotifyError::ListenerFailure`](crate::error::NotifyError::ListenerFailure).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Reacts to a state change described by `hint`.
    ///
    /// Returning an error stops the notification: listeners registered after
    /// this one are not told about this change.
    fn update(&self, hint: &H) -> Result<(), ListenerError>;
}

/// Anything listeners can be registered on.
pub trait Observable<H: ?Sized> {
    /// Appends `listener`. The same listener may be registered more than once,
    /// in which case it is notified once per registration.
    fn register(&mut self, listener: Arc<dyn Listener<H>>);
}

/// A [`Listener`] backed by a closure.
pub struct FnListener<F> {
    name: String,
    f: F,
}

impl<F> FnListener<F> {
    /// Wraps `f` under the given diagnostic name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Wraps `f` and returns it ready to register.
    pub fn arc(name: impl Into<String>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<H, F> Listener<H> for FnListener<F>
where
    H: ?Sized,
    F: Fn(&H) -> Result<(), ListenerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, hint: &H) -> Result<(), ListenerError> {
        (self.f)(hint)
    }
}

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener")
            .field("name", &self.name)
            .finish()
    }
}
