// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed command definitions.
//!
//! A command captures a semantic intent against one device — wake it, put
//! it into standby, ask for its power status — and encodes itself into the
//! [`CecFrame`] the transport puts on the wire. Commands are always sourced
//! from the broadcast address, the identity this library registers on the
//! bus.
//!
//! # Examples
//!
//! ```
//! use cecr_lib::command::{Command, PowerCommand};
//! use cecr_lib::types::LogicalAddress;
//!
//! let cmd = PowerCommand::turn_on(LogicalAddress::new(4).unwrap());
//! let frame = cmd.frame();
//! assert_eq!(frame.to_bytes(), vec![0xF4, 0x04]);
//! ```

mod power;

pub use power::{PowerCommand, PowerIntent};

use crate::protocol::CecFrame;
use crate::types::{LogicalAddress, Opcode};

/// A command that can be encoded into a bus frame.
pub trait Command {
    /// Returns the device the command is addressed to.
    fn destination(&self) -> LogicalAddress;

    /// Returns the opcode corresponding to the command's intent.
    fn opcode(&self) -> Opcode;

    /// Returns the parameter bytes, in wire order.
    ///
    /// Defaults to no parameters; the power commands carry none.
    fn parameters(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Builds the outbound frame for this command.
    ///
    /// The source is always [`LogicalAddress::BROADCAST`].
    fn frame(&self) -> CecFrame {
        CecFrame::with_parameters(
            LogicalAddress::BROADCAST,
            self.destination(),
            self.opcode(),
            self.parameters(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_encodes_destination_and_opcode() {
        let cmd = PowerCommand::standby(LogicalAddress::from_raw(9));
        let frame = cmd.frame();
        assert_eq!(frame.to_bytes(), vec![0xF9, 0x36]);
    }
}
