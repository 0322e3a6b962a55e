// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power control commands.

use crate::command::Command;
use crate::types::{LogicalAddress, Opcode};

/// The semantic intent behind a power command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerIntent {
    /// Wake the device.
    TurnOn,
    /// Put the device into standby.
    Standby,
    /// Ask the device to report its power status.
    QueryStatus,
}

/// A power command addressed to one device on the bus.
///
/// Construction is pure: no reachability check, no side effect. Whether the
/// target actually exists is a bus-transport concern.
///
/// # Examples
///
/// ```
/// use cecr_lib::command::{Command, PowerCommand};
/// use cecr_lib::types::{LogicalAddress, Opcode};
///
/// let device = LogicalAddress::new(4).unwrap();
///
/// let on = PowerCommand::turn_on(device);
/// assert_eq!(on.opcode(), Opcode::ImageViewOn);
///
/// let frame = on.frame();
/// assert_eq!(frame.initiator(), LogicalAddress::BROADCAST);
/// assert_eq!(frame.destination(), device);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommand {
    target: LogicalAddress,
    intent: PowerIntent,
}

impl PowerCommand {
    /// Creates a power command for the given target and intent.
    #[must_use]
    pub const fn new(target: LogicalAddress, intent: PowerIntent) -> Self {
        Self { target, intent }
    }

    /// Creates a command to wake a device.
    #[must_use]
    pub const fn turn_on(target: LogicalAddress) -> Self {
        Self::new(target, PowerIntent::TurnOn)
    }

    /// Creates a command to put a device into standby.
    #[must_use]
    pub const fn standby(target: LogicalAddress) -> Self {
        Self::new(target, PowerIntent::Standby)
    }

    /// Creates a command asking a device to report its power status.
    #[must_use]
    pub const fn query_status(target: LogicalAddress) -> Self {
        Self::new(target, PowerIntent::QueryStatus)
    }

    /// Returns the command's intent.
    #[must_use]
    pub const fn intent(&self) -> PowerIntent {
        self.intent
    }
}

impl Command for PowerCommand {
    fn destination(&self) -> LogicalAddress {
        self.target
    }

    fn opcode(&self) -> Opcode {
        match self.intent {
            PowerIntent::TurnOn => Opcode::ImageViewOn,
            PowerIntent::Standby => Opcode::Standby,
            PowerIntent::QueryStatus => Opcode::GiveDevicePowerStatus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(raw: u8) -> LogicalAddress {
        LogicalAddress::from_raw(raw)
    }

    #[test]
    fn turn_on_uses_image_view_on() {
        let cmd = PowerCommand::turn_on(addr(4));
        assert_eq!(cmd.opcode(), Opcode::ImageViewOn);
        assert_eq!(cmd.destination(), addr(4));
    }

    #[test]
    fn standby_uses_standby_opcode() {
        let cmd = PowerCommand::standby(addr(4));
        assert_eq!(cmd.opcode(), Opcode::Standby);
    }

    #[test]
    fn query_uses_give_device_power_status() {
        let cmd = PowerCommand::query_status(LogicalAddress::TV);
        assert_eq!(cmd.opcode(), Opcode::GiveDevicePowerStatus);
        assert_eq!(cmd.destination(), LogicalAddress::TV);
    }

    #[test]
    fn frame_is_sourced_from_broadcast() {
        let frame = PowerCommand::standby(addr(7)).frame();
        assert_eq!(frame.initiator(), LogicalAddress::BROADCAST);
        assert_eq!(frame.destination(), addr(7));
        assert_eq!(frame.opcode(), Opcode::Standby);
        assert!(frame.parameters().is_empty());
    }

    #[test]
    fn commands_carry_no_parameters() {
        let cmd = PowerCommand::query_status(addr(2));
        assert!(cmd.parameters().is_empty());
    }
}
