// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observability event types.

use crate::types::{LogicalAddress, PowerState};

/// Events emitted by the service.
///
/// Power change events fire on every store mutation, whether it came from
/// a caller command (optimistic update) or from a frame observed on the
/// bus. Lifecycle events bracket the adapter connection.
///
/// # Examples
///
/// ```
/// use cecr_lib::event::CecEvent;
/// use cecr_lib::types::{LogicalAddress, PowerState};
///
/// let event = CecEvent::power_changed(LogicalAddress::TV, PowerState::On);
/// assert_eq!(event.device(), Some(LogicalAddress::TV));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CecEvent {
    /// The adapter connection was established.
    Connected {
        /// Port of the opened adapter.
        port: String,
    },

    /// A device's recorded power state changed.
    PowerChanged {
        /// The device whose state was recorded.
        device: LogicalAddress,
        /// The newly recorded state.
        state: PowerState,
    },

    /// The adapter connection was released.
    Closed,
}

impl CecEvent {
    /// Creates a power change event.
    #[must_use]
    pub const fn power_changed(device: LogicalAddress, state: PowerState) -> Self {
        Self::PowerChanged { device, state }
    }

    /// Returns the device associated with this event, if any.
    #[must_use]
    pub const fn device(&self) -> Option<LogicalAddress> {
        match self {
            Self::PowerChanged { device, .. } => Some(*device),
            Self::Connected { .. } | Self::Closed => None,
        }
    }

    /// Returns `true` if this is a power change event.
    #[must_use]
    pub const fn is_power_change(&self) -> bool {
        matches!(self, Self::PowerChanged { .. })
    }
}
