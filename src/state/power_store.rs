// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state cache.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::{LogicalAddress, PowerState};

/// Last-known power state of every device observed or commanded so far.
///
/// The store is populated lazily: it starts empty and gains one entry per
/// device the first time that device is commanded or observed on the bus.
/// Absence of an entry is semantically equivalent to
/// [`PowerState::Unknown`]; entries are never materialized eagerly for all
/// possible addresses.
///
/// Writes are unconditional overwrites. The bus protocol provides no
/// ordering guarantee across device reports and no timestamp is retained,
/// so a stale report arriving after a fresher one wins — an accepted
/// protocol-level limitation.
///
/// Both execution contexts of the service (caller-triggered commands and
/// the dispatch loop) share one store through `&self`; a single lock keeps
/// reads and writes coherent.
///
/// # Examples
///
/// ```
/// use cecr_lib::state::PowerStateStore;
/// use cecr_lib::types::{LogicalAddress, PowerState};
///
/// let store = PowerStateStore::new();
/// let device = LogicalAddress::new(5).unwrap();
///
/// assert_eq!(store.get(device), PowerState::Unknown);
/// store.set(device, PowerState::On);
/// assert_eq!(store.get(device), PowerState::On);
/// ```
#[derive(Debug, Default)]
pub struct PowerStateStore {
    entries: RwLock<HashMap<LogicalAddress, PowerState>>,
}

impl PowerStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last-known power state of a device.
    ///
    /// Never fails; devices without an entry report
    /// [`PowerState::Unknown`].
    #[must_use]
    pub fn get(&self, device: LogicalAddress) -> PowerState {
        self.entries
            .read()
            .get(&device)
            .copied()
            .unwrap_or_default()
    }

    /// Records the power state of a device, overwriting any prior entry.
    ///
    /// Last write wins; there is no versioning or staleness detection.
    pub fn set(&self, device: LogicalAddress, state: PowerState) {
        self.entries.write().insert(device, state);
    }

    /// Returns every known device with its state, ordered by address.
    #[must_use]
    pub fn all(&self) -> Vec<(LogicalAddress, PowerState)> {
        let mut entries: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|(device, state)| (*device, *state))
            .collect();
        entries.sort_by_key(|(device, _)| *device);
        entries
    }

    /// Returns the number of devices with a recorded state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no device has been observed or commanded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
