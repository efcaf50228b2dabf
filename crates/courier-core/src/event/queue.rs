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

/// Buffers events produced by action sources until their owner drains them.
///
/// The queue is generic over the item type `T` so that producers can enqueue
/// bare [`Event`](crate::event::Event)s or events paired with a target node.
/// Draining never blocks and never delivers anything by itself: the owner
/// dispatches each drained item synchronously on its own thread.
#[derive(Debug)]
pub struct EventQueue<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventQueue<T> {
    /// Creates a new queue backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("EventQueue initialized.");
        Self { sender, receiver }
    }

    /// Enqueues an item for the next [`drain`](Self::drain).
    ///
    /// ## Arguments
    /// * `item` - The item to enqueue.
    pub fn publish(&self, item: T) {
        log::trace!("Queueing an event.");
        // The queue owns the receiver, so the channel is never disconnected here.
        let _ = self.sender.send(item);
    }

    /// Returns a producer handle onto this queue.
    ///
    /// Hand this to action sources that should not own the queue itself.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Yields every item queued so far, in publication order, without blocking.
    pub fn drain(&self) -> flume::TryIter<'_, T> {
        self.receiver.try_iter()
    }

    /// Number of items waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is waiting to be drained.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
