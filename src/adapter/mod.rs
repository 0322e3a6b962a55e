// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter connection lifecycle.
//!
//! The [`CecAdapter`] owns the single physical bus connection for the
//! process lifetime. Startup runs discovery and opens the first candidate;
//! both failure modes are fatal, because the service has no degraded mode
//! without a bus connection. Shutdown releases the connection exactly once;
//! closing a never-opened or already-closed adapter is a no-op. There is no
//! way back from [`ConnectionState::Closed`] — a restart requires a new
//! process.

use tokio::sync::mpsc;

use crate::error::AdapterError;
use crate::protocol::{BusNotification, BusTransport, CecFrame};

/// CEC device type registered on the bus when the connection opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    /// Television.
    Tv,
    /// Recording device. The default, so the adapter claims a logical
    /// address that does not compete with playback devices.
    #[default]
    RecordingDevice,
    /// Tuner.
    Tuner,
    /// Playback device.
    PlaybackDevice,
    /// Audio system.
    AudioSystem,
}

impl DeviceType {
    /// Returns the raw device type value.
    #[must_use]
    pub const fn as_raw(&self) -> u8 {
        match self {
            Self::Tv => 0,
            Self::RecordingDevice => 1,
            Self::Tuner => 3,
            Self::PlaybackDevice => 4,
            Self::AudioSystem => 5,
        }
    }
}

/// Configuration for the bus identity this adapter registers.
///
/// # Examples
///
/// ```
/// use cecr_lib::adapter::{AdapterConfig, DeviceType};
///
/// let config = AdapterConfig::new()
///     .with_device_name("living room bridge")
///     .with_monitor_only(false);
///
/// assert_eq!(config.device_name(), "living room bridge");
/// assert_eq!(config.device_type(), DeviceType::RecordingDevice);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    device_name: String,
    monitor_only: bool,
    activate_source: bool,
    device_type: DeviceType,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            device_name: "CEC REST API".to_string(),
            monitor_only: true,
            activate_source: false,
            device_type: DeviceType::default(),
        }
    }
}

impl AdapterConfig {
    /// Creates a configuration with default settings: monitor-only, never
    /// claiming the active source, registered as a recording device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identity name announced on the bus.
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Sets whether the adapter passively monitors instead of participating
    /// in bus arbitration.
    #[must_use]
    pub const fn with_monitor_only(mut self, monitor_only: bool) -> Self {
        self.monitor_only = monitor_only;
        self
    }

    /// Sets whether the adapter claims the active source on startup.
    #[must_use]
    pub const fn with_activate_source(mut self, activate_source: bool) -> Self {
        self.activate_source = activate_source;
        self
    }

    /// Sets the device type registered on the bus.
    #[must_use]
    pub const fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    /// Returns the identity name announced on the bus.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Returns `true` if the adapter passively monitors the bus.
    #[must_use]
    pub const fn monitor_only(&self) -> bool {
        self.monitor_only
    }

    /// Returns `true` if the adapter claims the active source on startup.
    #[must_use]
    pub const fn activate_source(&self) -> bool {
        self.activate_source
    }

    /// Returns the registered device type.
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }
}

/// Lifecycle state of the adapter connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt has been made.
    Uninitialized,
    /// Discovery and open are in progress.
    Connecting,
    /// The connection is established and transmits are possible.
    Connected,
    /// The connection has been released.
    Closed,
}

impl ConnectionState {
    /// Returns `true` if the connection is established.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` if the connection has been released.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Owner of the single physical bus connection.
///
/// Wraps the [`BusTransport`] with the lifecycle state machine: connect
/// once during startup, transmit while connected, close exactly once during
/// shutdown.
#[derive(Debug)]
pub struct CecAdapter<T> {
    config: AdapterConfig,
    transport: T,
    state: ConnectionState,
    port: Option<String>,
}

impl<T: BusTransport> CecAdapter<T> {
    /// Wraps a transport without connecting it yet.
    #[must_use]
    pub fn new(config: AdapterConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            state: ConnectionState::Uninitialized,
            port: None,
        }
    }

    /// Discovers adapters and opens the first candidate.
    ///
    /// On success the adapter is [`ConnectionState::Connected`] and the
    /// transport's notification channel is handed to the caller for the
    /// dispatch loop.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NoAdapterFound`] if discovery yields no
    /// candidates and [`AdapterError::OpenFailed`] if the open call is
    /// rejected. Both are fatal: the service must not continue serving
    /// half-initialized.
    pub async fn connect(&mut self) -> Result<mpsc::Receiver<BusNotification>, AdapterError> {
        self.state = ConnectionState::Connecting;

        let adapters = self.transport.discover();
        let Some(adapter) = adapters.first() else {
            return Err(AdapterError::NoAdapterFound);
        };
        tracing::info!(port = %adapter.port(), "found a CEC adapter");

        if !self.transport.open(&self.config, adapter).await {
            return Err(AdapterError::OpenFailed {
                port: adapter.port().to_string(),
            });
        }

        self.state = ConnectionState::Connected;
        self.port = Some(adapter.port().to_string());
        Ok(self.transport.notifications())
    }

    /// Transmits a frame on the bus.
    ///
    /// Returns `true` if the transport acknowledged the transmission.
    /// Transmitting on an adapter that is not connected is reported as a
    /// failed transmit, not a panic or an error.
    pub async fn transmit(&self, frame: &CecFrame) -> bool {
        if !self.state.is_connected() {
            tracing::warn!(state = ?self.state, "transmit on unconnected adapter");
            return false;
        }
        self.transport.transmit(frame).await
    }

    /// Releases the connection.
    ///
    /// Idempotent: closing an already-closed or never-opened adapter does
    /// nothing. A closed adapter cannot be reconnected.
    pub async fn close(&mut self) {
        if self.state.is_connected() {
            self.transport.close().await;
        }
        self.state = ConnectionState::Closed;
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns the port of the opened adapter, if connected.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Returns the configuration this adapter registered with.
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_monitoring_identity() {
        let config = AdapterConfig::default();
        assert_eq!(config.device_name(), "CEC REST API");
        assert!(config.monitor_only());
        assert!(!config.activate_source());
        assert_eq!(config.device_type(), DeviceType::RecordingDevice);
    }

    #[test]
    fn config_builder_overrides() {
        let config = AdapterConfig::new()
            .with_device_name("bridge")
            .with_monitor_only(false)
            .with_activate_source(true)
            .with_device_type(DeviceType::PlaybackDevice);
        assert_eq!(config.device_name(), "bridge");
        assert!(!config.monitor_only());
        assert!(config.activate_source());
        assert_eq!(config.device_type(), DeviceType::PlaybackDevice);
    }

    #[test]
    fn device_type_raw_values() {
        assert_eq!(DeviceType::Tv.as_raw(), 0);
        assert_eq!(DeviceType::RecordingDevice.as_raw(), 1);
        assert_eq!(DeviceType::AudioSystem.as_raw(), 5);
    }

    #[test]
    fn connection_state_predicates() {
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Connecting.is_connected());
        assert!(ConnectionState::Closed.is_closed());
        assert!(!ConnectionState::Uninitialized.is_closed());
    }
}
