// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core protocol types.
//!
//! This module provides the small value types the rest of the crate is
//! built on: logical bus addresses, power states and the opcodes this core
//! transmits or reacts to.
//!
//! # Examples
//!
//! ```
//! use cecr_lib::types::{LogicalAddress, Opcode, PowerState};
//!
//! let device = LogicalAddress::new(5).unwrap();
//! assert_eq!(device.value(), 5);
//! assert_eq!(PowerState::On.as_str(), "ON");
//! assert_eq!(Opcode::ImageViewOn.as_raw(), 0x04);
//! ```

mod address;
mod opcode;
mod power;

pub use address::LogicalAddress;
pub use opcode::Opcode;
pub use power::{PowerState, PowerStatusCode};
