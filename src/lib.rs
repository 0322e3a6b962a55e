// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `CecR` Lib - A Rust library to track and control the power state of
//! HDMI devices over the CEC bus.
//!
//! The library is the core of a CEC power-control service: it owns the
//! single connection to the physical CEC adapter, transmits power commands
//! to individual devices, decodes unsolicited frames arriving from any
//! device at any time, and maintains the authoritative in-memory cache of
//! every device's last-known power state. HTTP routing, CLI parsing and
//! process logging configuration are left to the embedding layer.
//!
//! # Supported Features
//!
//! - **Power control**: Wake devices or put them into standby
//! - **Power status tracking**: Last-known state per logical address,
//!   reconciled from issued commands and observed bus traffic
//! - **Status probing**: Ask any device to report its power status
//! - **Event feed**: Broadcast channel carrying every state change and
//!   adapter lifecycle transition
//!
//! # Consistency Model
//!
//! Commands are optimistic: the desired state is recorded before the frame
//! is transmitted, and a failed transmit does not roll the record back.
//! Bus observations overwrite unconditionally, last write wins. Devices
//! never observed or commanded report [`PowerState::Unknown`].
//!
//! # Quick Start
//!
//! The physical bus is reached through an implementation of
//! [`BusTransport`] — over libcec, a kernel CEC device, or a test double:
//!
//! ```no_run
//! use cecr_lib::adapter::AdapterConfig;
//! use cecr_lib::protocol::{AdapterDescriptor, BusNotification, BusTransport, CecFrame};
//! use cecr_lib::service::CecService;
//! use cecr_lib::types::LogicalAddress;
//! use tokio::sync::mpsc;
//!
//! struct LibCecTransport {
//!     notifications: Option<mpsc::Receiver<BusNotification>>,
//! }
//!
//! impl BusTransport for LibCecTransport {
//!     fn discover(&self) -> Vec<AdapterDescriptor> {
//!         vec![AdapterDescriptor::new("/dev/ttyACM0")]
//!     }
//!
//!     async fn open(&mut self, _config: &AdapterConfig, _adapter: &AdapterDescriptor) -> bool {
//!         true
//!     }
//!
//!     async fn transmit(&self, _frame: &CecFrame) -> bool {
//!         true
//!     }
//!
//!     fn notifications(&mut self) -> mpsc::Receiver<BusNotification> {
//!         self.notifications.take().expect("taken once at startup")
//!     }
//!
//!     async fn close(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cecr_lib::Error> {
//!     let (_tx, rx) = mpsc::channel(64);
//!     let transport = LibCecTransport {
//!         notifications: Some(rx),
//!     };
//!
//!     let mut service = CecService::start(AdapterConfig::new(), transport).await?;
//!
//!     let device = LogicalAddress::new(4)?;
//!     let change = service.set_status(device, true).await;
//!     println!("device {} is now {}", change.device, change.state);
//!
//!     service.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Observing Events
//!
//! Every state change and lifecycle transition is published on a broadcast
//! channel:
//!
//! ```ignore
//! let mut events = service.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         if let CecEvent::PowerChanged { device, state } = event {
//!             println!("device {device} reported {state}");
//!         }
//!     }
//! });
//! ```

pub mod adapter;
pub mod command;
pub mod error;
pub mod event;
pub mod protocol;
pub mod service;
pub mod state;
pub mod types;

pub use adapter::{AdapterConfig, CecAdapter, ConnectionState, DeviceType};
pub use command::{Command, PowerCommand, PowerIntent};
pub use error::{AdapterError, DecodeError, Error, Result, ValueError};
pub use event::{CecEvent, EventBus};
pub use protocol::{AdapterDescriptor, BusLogLevel, BusNotification, BusTransport, CecFrame};
pub use service::{CecService, Health, StatusChange};
pub use state::PowerStateStore;
pub use types::{LogicalAddress, Opcode, PowerState, PowerStatusCode};
