// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound notification dispatch.
//!
//! A single task drains the transport's notification channel for the
//! lifetime of the connection. Being the only consumer, it serializes every
//! bus-driven store mutation; caller-driven mutations go through the same
//! [`record_power_state`] choke point under the store's lock.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::event::{CecEvent, EventBus};
use crate::protocol::{BusLogLevel, BusNotification, CecFrame};
use crate::state::PowerStateStore;
use crate::types::{LogicalAddress, Opcode, PowerState, PowerStatusCode};

/// Drains the notification channel until the transport closes it.
pub(crate) async fn run(
    mut notifications: mpsc::Receiver<BusNotification>,
    store: Arc<PowerStateStore>,
    events: EventBus,
) {
    while let Some(notification) = notifications.recv().await {
        match notification {
            BusNotification::Frame(bytes) => handle_frame(&bytes, &store, &events),
            BusNotification::Log { level, message } => forward_log(level, &message),
        }
    }
    tracing::debug!("notification channel closed, dispatch loop exiting");
}

/// Decodes one inbound frame and applies its power-state implication.
///
/// Frames that do not decode, and decoded frames whose opcode carries no
/// power-state implication, are dropped without touching the store.
pub(crate) fn handle_frame(bytes: &[u8], store: &PowerStateStore, events: &EventBus) {
    let frame = match CecFrame::parse(bytes) {
        Ok(frame) => frame,
        Err(anomaly) => {
            tracing::debug!(error = %anomaly, "ignoring inbound frame");
            return;
        }
    };

    let observed = match frame.opcode() {
        // A device asking for the active source is necessarily powered on.
        Opcode::RequestActiveSource => Some(PowerState::On),
        Opcode::Standby => Some(PowerState::Standby),
        Opcode::ReportPowerStatus => frame
            .parameters()
            .first()
            .and_then(|&raw| PowerStatusCode::from_raw(raw))
            .map(|code| code.power_state()),
        Opcode::ImageViewOn | Opcode::GiveDevicePowerStatus => None,
    };

    if let Some(state) = observed {
        record_power_state(store, events, frame.initiator(), state);
    }
}

/// Records a power state and publishes the matching observability event.
///
/// Both writers — the dispatch loop and the caller-facing command path —
/// mutate the store through this function.
pub(crate) fn record_power_state(
    store: &PowerStateStore,
    events: &EventBus,
    device: LogicalAddress,
    state: PowerState,
) {
    store.set(device, state);
    tracing::info!(device = %device, state = %state, "device power state recorded");
    events.publish(CecEvent::power_changed(device, state));
}

/// Forwards a transport log event to the tracing subscriber.
fn forward_log(level: BusLogLevel, message: &str) {
    match level {
        BusLogLevel::Error => tracing::error!("CEC: {message}"),
        BusLogLevel::Warning => tracing::warn!("CEC: {message}"),
        BusLogLevel::Notice => tracing::info!("CEC: {message}"),
        BusLogLevel::Traffic | BusLogLevel::Debug => tracing::debug!("CEC: {message}"),
    }
}
