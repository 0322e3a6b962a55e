// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CEC opcodes handled by this library.

use std::fmt;

/// Protocol operation codes this core transmits or reacts to.
///
/// The CEC protocol defines many more opcodes; frames carrying any other
/// opcode are ignored by the dispatcher, since not every bus frame concerns
/// power state.
///
/// # Examples
///
/// ```
/// use cecr_lib::types::Opcode;
///
/// assert_eq!(Opcode::Standby.as_raw(), 0x36);
/// assert_eq!(Opcode::from_raw(0x90), Some(Opcode::ReportPowerStatus));
/// assert_eq!(Opcode::from_raw(0x82), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Wake the destination device.
    ImageViewOn,
    /// Put the destination device into standby.
    Standby,
    /// A device is asking which source is active; the initiator is
    /// necessarily powered on.
    RequestActiveSource,
    /// Ask the destination to report its power status.
    GiveDevicePowerStatus,
    /// A device reporting its power status.
    ReportPowerStatus,
}

impl Opcode {
    /// Decodes a raw opcode byte.
    ///
    /// Returns `None` for opcodes this core does not handle.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x04 => Some(Self::ImageViewOn),
            0x36 => Some(Self::Standby),
            0x85 => Some(Self::RequestActiveSource),
            0x8F => Some(Self::GiveDevicePowerStatus),
            0x90 => Some(Self::ReportPowerStatus),
            _ => None,
        }
    }

    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_raw(&self) -> u8 {
        match self {
            Self::ImageViewOn => 0x04,
            Self::Standby => 0x36,
            Self::RequestActiveSource => 0x85,
            Self::GiveDevicePowerStatus => 0x8F,
            Self::ReportPowerStatus => 0x90,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ImageViewOn => "ImageViewOn",
            Self::Standby => "Standby",
            Self::RequestActiveSource => "RequestActiveSource",
            Self::GiveDevicePowerStatus => "GiveDevicePowerStatus",
            Self::ReportPowerStatus => "ReportPowerStatus",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        for opcode in [
            Opcode::ImageViewOn,
            Opcode::Standby,
            Opcode::RequestActiveSource,
            Opcode::GiveDevicePowerStatus,
            Opcode::ReportPowerStatus,
        ] {
            assert_eq!(Opcode::from_raw(opcode.as_raw()), Some(opcode));
        }
    }

    #[test]
    fn unhandled_opcodes_decode_to_none() {
        // ActiveSource and SetOsdName are real CEC opcodes this core ignores.
        assert_eq!(Opcode::from_raw(0x82), None);
        assert_eq!(Opcode::from_raw(0x47), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Opcode::Standby.to_string(), "Standby");
        assert_eq!(
            Opcode::GiveDevicePowerStatus.to_string(),
            "GiveDevicePowerStatus"
        );
    }
}
