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

//! A text-entry subject that republishes its accumulated text on every change.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::listener::{Listener, Observable};
use super::set::ListenerSet;
use crate::error::NotifyError;

/// A saved copy of a [`TextSubject`]'s text, restorable later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSnapshot {
    state: String,
}

impl TextSnapshot {
    /// The saved text.
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// A text box whose listeners are told the full current text after every edit.
///
/// The box only knows its listeners through [`Listener<str>`]; what they do
/// with the text is up to them.
#[derive(Debug)]
pub struct TextSubject {
    label: String,
    value: String,
    listeners: ListenerSet<str>,
}

impl TextSubject {
    /// Creates an empty text box.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Appends `fragment` to the text and notifies every listener with the
    /// resulting text.
    ///
    /// The text is updated even if a listener then fails.
    pub fn type_text(&mut self, fragment: &str) -> Result<(), NotifyError> {
        self.value.push_str(fragment);
        log::debug!("'{}' now reads '{}'.", self.label, self.value);
        self.publish()
    }

    /// Empties the text and notifies every listener with the empty text.
    pub fn clear(&mut self) -> Result<(), NotifyError> {
        self.value.clear();
        self.publish()
    }

    /// Captures the current text.
    pub fn save_state(&self) -> TextSnapshot {
        TextSnapshot {
            state: self.value.clone(),
        }
    }

    /// Puts the text back to what `snapshot` captured and notifies every
    /// listener with it.
    pub fn restore_state(&mut self, snapshot: &TextSnapshot) -> Result<(), NotifyError> {
        log::debug!(
            "Restoring '{}' from '{}' to '{}'.",
            self.label,
            self.value,
            snapshot.state
        );
        self.value.clone_from(&snapshot.state);
        self.publish()
    }

    /// The current text.
    pub fn current_value(&self) -> &str {
        &self.value
    }

    /// The label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn publish(&self) -> Result<(), NotifyError> {
        self.listeners.notify(&self.value).map(|_| ())
    }
}

impl Observable<str> for TextSubject {
    fn register(&mut self, listener: Arc<dyn Listener<str>>) {
        self.listeners.register(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::hub::FnListener;
    use std::sync::Mutex;

    fn recorder(seen: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Listener<str>> {
        let seen = Arc::clone(seen);
        FnListener::arc("recorder", move |hint: &str| -> Result<(), ListenerError> {
            seen.lock().unwrap().push(hint.to_owned());
            Ok(())
        })
    }

    #[test]
    fn typing_accumulates_and_publishes_full_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut search = TextSubject::new("search");
        search.register(recorder(&seen));

        search.type_text("con").unwrap();
        search.type_text("tent").unwrap();

        assert_eq!(search.current_value(), "content");
        assert_eq!(*seen.lock().unwrap(), vec!["con", "content"]);
    }

    #[test]
    fn typing_without_listeners_only_changes_text() {
        let mut search = TextSubject::new("search");
        search.type_text("abc").unwrap();
        assert_eq!(search.current_value(), "abc");
        assert_eq!(search.listener_count(), 0);
    }

    #[test]
    fn restore_brings_back_saved_text_and_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut search = TextSubject::new("search");
        search.type_text("doc").unwrap();
        let saved = search.save_state();
        search.register(recorder(&seen));

        search.type_text("ument").unwrap();
        search.restore_state(&saved).unwrap();

        assert_eq!(saved.state(), "doc");
        assert_eq!(search.current_value(), "doc");
        assert_eq!(*seen.lock().unwrap(), vec!["document", "doc"]);
    }

    #[test]
    fn clear_publishes_empty_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut search = TextSubject::new("search");
        search.register(recorder(&seen));
        search.type_text("x").unwrap();
        search.clear().unwrap();

        assert_eq!(search.current_value(), "");
        assert_eq!(*seen.lock().unwrap(), vec!["x", ""]);
    }

    #[test]
    fn failing_listener_keeps_the_edit() {
        let mut search = TextSubject::new("search");
        search.register(FnListener::arc(
            "broken",
            |_: &str| -> Result<(), ListenerError> { Err("offline".into()) },
        ));

        let err = search.type_text("query").unwrap_err();
        assert_eq!(err.failed_position(), Some(0));
        assert_eq!(search.current_value(), "query");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut search = TextSubject::new("search");
        search.type_text("saved").unwrap();
        let json = serde_json::to_string(&search.save_state()).unwrap();
        let snapshot: TextSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.state(), "saved");
    }
}
