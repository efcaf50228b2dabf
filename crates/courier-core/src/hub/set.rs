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

//! The ordered listener sequence owned by a single subject.

use std::fmt;
use std::sync::Arc;

use super::listener::{Listener, Observable};
use crate::error::NotifyError;

/// An append-only, ordered sequence of listeners.
///
/// Registration order is delivery order. Duplicates are kept: a listener
/// registered twice is notified twice. Registering needs `&mut self` while
/// notifying needs only `&self`, so a registration can never interleave with
/// a notification on the same set.
pub struct ListenerSet<H: ?Sized> {
    listeners: Vec<Arc<dyn Listener<H>>>,
}

impl<H: ?Sized> ListenerSet<H> {
    /// Creates a set with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Appends a listener.
    pub fn register(&mut self, listener: Arc<dyn Listener<H>>) {
        log::debug!(
            "Registered listener '{}' at position {}.",
            listener.name(),
            self.listeners.len()
        );
        self.listeners.push(listener);
    }

    /// Calls `update` on every listener in registration order.
    ///
    /// Returns the number of deliveries. Stops at the first listener that
    /// fails; the ones after it are not called.
    ///
    /// ## Errors
    /// [`NotifyError::ListenerFailure`] naming the failing listener and its
    /// position.
    pub fn notify(&self, hint: &H) -> Result<usize, NotifyError> {
        for (position, listener) in self.listeners.iter().enumerate() {
            log::trace!("Notifying listener '{}'.", listener.name());
            if let Err(source) = listener.update(hint) {
                log::warn!(
                    "Listener '{}' at position {position} failed: {source}. Skipping {} more.",
                    listener.name(),
                    self.listeners.len() - position - 1
                );
                return Err(NotifyError::ListenerFailure {
                    listener: listener.name().to_owned(),
                    position,
                    source,
                });
            }
        }
        Ok(self.listeners.len())
    }

    /// Names of the registered listeners, in delivery order.
    pub fn names(&self) -> Vec<&str> {
        self.listeners
            .iter()
            .map(|listener| listener.name())
            .collect()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<H: ?Sized> Observable<H> for ListenerSet<H> {
    fn register(&mut self, listener: Arc<dyn Listener<H>>) {
        ListenerSet::register(self, listener);
    }
}

impl<H: ?Sized> Default for ListenerSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for ListenerSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::hub::FnListener;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording(name: &'static str, log: &Log) -> Arc<dyn Listener<str>> {
        let log = Arc::clone(log);
        FnListener::arc(name, move |hint: &str| -> Result<(), ListenerError> {
            log.lock().unwrap().push(format!("{name}:{hint}"));
            Ok(())
        })
    }

    fn failing(name: &'static str, log: &Log) -> Arc<dyn Listener<str>> {
        let log = Arc::clone(log);
        FnListener::arc(name, move |hint: &str| -> Result<(), ListenerError> {
            log.lock().unwrap().push(format!("{name}:{hint}"));
            Err(format!("{name} rejected {hint}").into())
        })
    }

    #[test]
    fn empty_set_delivers_nothing() {
        let set = ListenerSet::<str>::new();
        assert!(set.is_empty());
        assert_eq!(set.notify("content").unwrap(), 0);
    }

    #[test]
    fn delivery_follows_registration_order() {
        let log = Log::default();
        let mut set = ListenerSet::new();
        set.register(recording("first", &log));
        set.register(recording("second", &log));
        set.register(recording("third", &log));

        assert_eq!(set.notify("con").unwrap(), 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:con", "second:con", "third:con"]
        );
        assert_eq!(set.names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failure_stops_the_notification() {
        let log = Log::default();
        let mut set = ListenerSet::new();
        set.register(recording("first", &log));
        set.register(failing("second", &log));
        set.register(recording("third", &log));

        let err = set.notify("con").unwrap_err();
        match err {
            NotifyError::ListenerFailure {
                listener,
                position,
                source,
            } => {
                assert_eq!(listener, "second");
                assert_eq!(position, 1);
                assert_eq!(source.to_string(), "second rejected con");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["first:con", "second:con"]);
    }

    #[test]
    fn same_listener_twice_is_delivered_twice() {
        let log = Log::default();
        let listener = recording("echo", &log);
        let mut set = ListenerSet::new();
        set.register(Arc::clone(&listener));
        set.register(listener);

        assert_eq!(set.notify("x").unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["echo:x", "echo:x"]);
    }
}
