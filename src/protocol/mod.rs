// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus transport contract.
//!
//! The physical CEC connection is owned by an external transport (libcec,
//! a kernel CEC device, or a test double). This module defines the contract
//! that transport has to satisfy: adapter discovery, a transmit primitive,
//! and an asynchronous notification channel delivering inbound frames and
//! bus log events.
//!
//! The notification channel replaces callback registration: instead of
//! re-entering library code from a foreign callback context, the transport
//! pushes [`BusNotification`] values onto an mpsc channel that the service
//! drains from a single dispatch task. That task is the only place inbound
//! frames are decoded and applied, which keeps store mutation serialized.

mod frame;

pub use frame::CecFrame;

use tokio::sync::mpsc;

use crate::adapter::AdapterConfig;

/// A physical adapter candidate returned by discovery.
///
/// # Examples
///
/// ```
/// use cecr_lib::protocol::AdapterDescriptor;
///
/// let adapter = AdapterDescriptor::new("/dev/ttyACM0");
/// assert_eq!(adapter.port(), "/dev/ttyACM0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDescriptor {
    port: String,
}

impl AdapterDescriptor {
    /// Creates a descriptor for the adapter on the given port.
    #[must_use]
    pub fn new(port: impl Into<String>) -> Self {
        Self { port: port.into() }
    }

    /// Returns the port the adapter is reachable on.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }
}

/// Severity of a log event originating from the bus transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusLogLevel {
    /// Transport error.
    Error,
    /// Transport warning.
    Warning,
    /// Notable transport event.
    Notice,
    /// Raw bus traffic.
    Traffic,
    /// Transport debugging detail.
    Debug,
}

/// An asynchronous notification delivered by the bus transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusNotification {
    /// An inbound frame in wire representation, from any device at any time.
    Frame(Vec<u8>),
    /// A log event from the transport itself.
    Log {
        /// Severity of the event.
        level: BusLogLevel,
        /// Human-readable message.
        message: String,
    },
}

/// Contract for the component owning the physical bus connection.
///
/// The service consumes exactly one transport for its whole lifetime:
/// discovery and open during startup, transmits while serving, close during
/// shutdown. Transports do not interpret frames; they move bytes.
///
/// Transmit reports success as a boolean rather than an error type. The
/// service treats a failed transmit as a log-worthy event, not a failure of
/// the caller's request.
#[allow(async_fn_in_trait)]
pub trait BusTransport {
    /// Enumerates candidate physical adapters. May return an empty list.
    fn discover(&self) -> Vec<AdapterDescriptor>;

    /// Opens the connection to a discovered adapter, registering the
    /// identity described by `config` on the bus.
    ///
    /// Returns `true` if the connection is established.
    async fn open(&mut self, config: &AdapterConfig, adapter: &AdapterDescriptor) -> bool;

    /// Transmits an encoded frame on the bus.
    ///
    /// Returns `true` if the transport acknowledged the transmission. May
    /// block the calling task until acknowledgment or the transport's own
    /// timeout; no retry or additional timeout is layered on top.
    async fn transmit(&self, frame: &CecFrame) -> bool;

    /// Hands over the inbound notification channel.
    ///
    /// The service calls this exactly once, after a successful open.
    fn notifications(&mut self) -> mpsc::Receiver<BusNotification>;

    /// Releases the connection. Called at most once by the adapter.
    async fn close(&mut self);
}
