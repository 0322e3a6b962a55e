// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting service events.

use tokio::sync::broadcast;

use super::CecEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts [`CecEvent`]s to any number of subscribers.
///
/// Built on tokio's broadcast channel: every subscriber receives its own
/// copy of each event. A subscriber that falls behind by more than the
/// channel capacity loses its oldest events (`RecvError::Lagged`); the
/// publishing side never blocks on slow subscribers.
///
/// # Examples
///
/// ```
/// use cecr_lib::event::{CecEvent, EventBus};
/// use cecr_lib::types::{LogicalAddress, PowerState};
///
/// let bus = EventBus::new();
/// let _rx = bus.subscribe();
///
/// bus.publish(CecEvent::power_changed(LogicalAddress::TV, PowerState::On));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CecEvent>,
}

impl EventBus {
    /// Creates an event bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an event bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CecEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// An event published while no subscriber exists is silently discarded.
    pub fn publish(&self, event: CecEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
