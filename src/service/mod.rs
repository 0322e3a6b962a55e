// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The query/command surface over the bus.
//!
//! [`CecService`] is the context object tying the core together: it owns
//! the adapter connection, the power state store and the event bus, runs
//! the dispatch loop, and exposes the operations the embedding HTTP or CLI
//! layer calls into.

mod dispatch;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::adapter::{AdapterConfig, CecAdapter, ConnectionState};
use crate::command::{Command, PowerCommand};
use crate::error::AdapterError;
use crate::event::{CecEvent, EventBus};
use crate::protocol::BusTransport;
use crate::state::PowerStateStore;
use crate::types::{LogicalAddress, PowerState};

/// Service health as reported to the embedding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Health {
    /// The adapter connection is established.
    Up,
    /// No established connection: either startup has not completed or the
    /// service has been shut down.
    Down,
}

impl Health {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Result of a power transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatusChange {
    /// The device the transition was requested for.
    pub device: LogicalAddress,
    /// The state now recorded for the device.
    pub state: PowerState,
}

/// Tracks and controls the power state of devices on the CEC bus.
///
/// The service is created by [`CecService::start`], which connects the
/// adapter, spawns the dispatch loop over the transport's notification
/// channel and seeds the store with an initial power status probe of the
/// TV. From then on the store is mutated from two directions — optimistic
/// updates on [`set_status`](Self::set_status) and observations decoded
/// from bus traffic — and read by [`query_status`](Self::query_status).
///
/// Commands favor availability over strict consistency: a power transition
/// is recorded in the store before the frame is transmitted, and a failed
/// transmit is logged but does not roll the record back. A later power
/// status report from the device is the eventual consistency mechanism.
///
/// # Examples
///
/// ```ignore
/// let service = CecService::start(AdapterConfig::new(), transport).await?;
///
/// let device = LogicalAddress::new(4)?;
/// let change = service.set_status(device, true).await;
/// assert_eq!(change.state, PowerState::On);
/// assert_eq!(service.query_status(device), PowerState::On);
/// ```
#[derive(Debug)]
pub struct CecService<T> {
    adapter: CecAdapter<T>,
    store: Arc<PowerStateStore>,
    events: EventBus,
    dispatcher: Option<JoinHandle<()>>,
}

impl<T: BusTransport> CecService<T> {
    /// Connects the adapter and starts serving.
    ///
    /// Connects through the transport, spawns the dispatch loop and
    /// transmits an initial `GiveDevicePowerStatus` probe to the TV to seed
    /// the store. A failed probe transmit is logged and tolerated; the
    /// service still starts.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NoAdapterFound`] or
    /// [`AdapterError::OpenFailed`] when the bus connection cannot be
    /// established. Both abort initialization.
    pub async fn start(config: AdapterConfig, transport: T) -> Result<Self, AdapterError> {
        let mut adapter = CecAdapter::new(config, transport);
        let notifications = adapter.connect().await?;

        let store = Arc::new(PowerStateStore::new());
        let events = EventBus::new();
        if let Some(port) = adapter.port() {
            events.publish(CecEvent::Connected {
                port: port.to_string(),
            });
        }

        let dispatcher = tokio::spawn(dispatch::run(
            notifications,
            Arc::clone(&store),
            events.clone(),
        ));

        let service = Self {
            adapter,
            store,
            events,
            dispatcher: Some(dispatcher),
        };
        service.probe_status(LogicalAddress::TV).await;
        Ok(service)
    }

    /// Returns the last-known power state of a device.
    ///
    /// Never fails; a device never observed or commanded reports
    /// [`PowerState::Unknown`].
    #[must_use]
    pub fn query_status(&self, device: LogicalAddress) -> PowerState {
        self.store.get(device)
    }

    /// Requests a power transition for a device.
    ///
    /// The desired state is recorded in the store immediately, then the
    /// matching command frame is transmitted. The returned [`StatusChange`]
    /// reflects the recorded state regardless of whether the transmit
    /// succeeded; transmit failures are logged, never surfaced.
    pub async fn set_status(&self, device: LogicalAddress, desired_on: bool) -> StatusChange {
        let state = PowerState::from(desired_on);
        dispatch::record_power_state(&self.store, &self.events, device, state);

        let command = if desired_on {
            PowerCommand::turn_on(device)
        } else {
            PowerCommand::standby(device)
        };
        if !self.adapter.transmit(&command.frame()).await {
            tracing::error!(device = %device, "failed to send CEC command");
        }

        StatusChange { device, state }
    }

    /// Asks a device to report its power status.
    ///
    /// The answer arrives asynchronously as a `ReportPowerStatus` frame and
    /// is applied by the dispatch loop. A failed transmit is logged and
    /// swallowed.
    pub async fn probe_status(&self, device: LogicalAddress) {
        let command = PowerCommand::query_status(device);
        if !self.adapter.transmit(&command.frame()).await {
            tracing::error!(device = %device, "failed to send power status probe");
        }
    }

    /// Reports service health.
    ///
    /// [`Health::Up`] once the adapter connection is established, and
    /// [`Health::Down`] after shutdown.
    #[must_use]
    pub fn health(&self) -> Health {
        if self.adapter.state().is_connected() {
            Health::Up
        } else {
            Health::Down
        }
    }

    /// Returns the lifecycle state of the underlying adapter connection.
    #[must_use]
    pub const fn connection_state(&self) -> ConnectionState {
        self.adapter.state()
    }

    /// Returns every device with a recorded state, ordered by address.
    #[must_use]
    pub fn known_devices(&self) -> Vec<(LogicalAddress, PowerState)> {
        self.store.all()
    }

    /// Subscribes to service events.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CecEvent> {
        self.events.subscribe()
    }

    /// Releases the bus connection and stops the dispatch loop.
    ///
    /// Idempotent: repeated calls are no-ops. The state cache is dropped
    /// with the service; nothing persists across restarts.
    pub async fn shutdown(&mut self) {
        if self.adapter.state().is_closed() {
            return;
        }
        self.adapter.close().await;
        if let Some(dispatcher) = self.dispatcher.take() {
            // The transport drops its notification sender on close, ending
            // the loop; abort covers transports that keep the sender alive.
            dispatcher.abort();
        }
        self.events.publish(CecEvent::Closed);
    }
}
