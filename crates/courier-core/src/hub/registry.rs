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

//! A registry of subjects, each with its own listener sequence.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::listener::Listener;
use super::set::ListenerSet;
use crate::error::NotifyError;

/// Identifies a subject inside the [`NotificationHub`] that created it.
///
/// Ids are never reused, so an id kept after its subject was removed can never
/// reach a newer subject's listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(u64);

struct SubjectEntry<H: ?Sized> {
    label: String,
    listeners: ListenerSet<H>,
}

/// Maps subjects to their ordered listeners and delivers notifications.
///
/// Each hub is an independent value; there is no process-wide registry.
pub struct NotificationHub<H: ?Sized> {
    subjects: HashMap<SubjectId, SubjectEntry<H>>,
    next_id: u64,
}

impl<H: ?Sized> NotificationHub<H> {
    /// Creates a hub with no subjects.
    pub fn new() -> Self {
        Self {
            subjects: HashMap::new(),
            next_id: 0,
        }
    }

    /// Adds a subject with no listeners and returns its id.
    pub fn add_subject(&mut self, label: impl Into<String>) -> SubjectId {
        let id = SubjectId(self.next_id);
        self.next_id += 1;
        let label = label.into();
        log::info!("Added subject '{label}' as {id:?}.");
        self.subjects.insert(
            id,
            SubjectEntry {
                label,
                listeners: ListenerSet::new(),
            },
        );
        id
    }

    /// Appends `listener` to the subject's listeners. No duplicate check.
    ///
    /// ## Errors
    /// [`NotifyError::UnknownSubject`] if the subject is not in this hub.
    pub fn register(
        &mut self,
        subject: SubjectId,
        listener: Arc<dyn Listener<H>>,
    ) -> Result<(), NotifyError> {
        let entry = self
            .subjects
            .get_mut(&subject)
            .ok_or(NotifyError::UnknownSubject(subject))?;
        entry.listeners.register(listener);
        Ok(())
    }

    /// Delivers `hint` to the subject's listeners in registration order.
    ///
    /// Returns the number of deliveries.
    ///
    /// ## Errors
    /// * [`NotifyError::UnknownSubject`] if the subject is not in this hub.
    /// * [`NotifyError::ListenerFailure`] for the first listener that fails;
    ///   later listeners are skipped.
    pub fn notify(&self, subject: SubjectId, hint: &H) -> Result<usize, NotifyError> {
        let entry = self
            .subjects
            .get(&subject)
            .ok_or(NotifyError::UnknownSubject(subject))?;
        log::debug!("Notifying listeners of '{}'.", entry.label);
        entry.listeners.notify(hint)
    }

    /// Tears a subject down. Its listeners are released and will not be
    /// notified again. Returns `false` if the subject was not present.
    pub fn remove_subject(&mut self, subject: SubjectId) -> bool {
        match self.subjects.remove(&subject) {
            Some(entry) => {
                log::info!(
                    "Removed subject '{}' and its {} listener(s).",
                    entry.label,
                    entry.listeners.len()
                );
                true
            }
            None => false,
        }
    }

    /// The label a subject was added with.
    pub fn label(&self, subject: SubjectId) -> Option<&str> {
        self.subjects
            .get(&subject)
            .map(|entry| entry.label.as_str())
    }

    /// Number of registrations on a subject, or `None` if it is absent.
    pub fn listener_count(&self, subject: SubjectId) -> Option<usize> {
        self.subjects
            .get(&subject)
            .map(|entry| entry.listeners.len())
    }

    /// Number of live subjects.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

impl<H: ?Sized> Default for NotificationHub<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for NotificationHub<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, entry) in &self.subjects {
            map.entry(&(id, &entry.label), &entry.listeners);
        }
        map.finish()
    }
}
