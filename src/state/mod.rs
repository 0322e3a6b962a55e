// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management.
//!
//! This module provides the [`PowerStateStore`], the single source of truth
//! for the last-known power state of every device on the bus. It is mutated
//! from two directions — optimistic updates when a caller issues a command,
//! and observations decoded from inbound bus traffic — and read by the
//! query surface.

mod power_store;

pub use power_store::PowerStateStore;
