// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CEC frame representation and wire codec.
//!
//! A frame on the wire is one header byte (initiator in the high nibble,
//! destination in the low nibble), followed by an opcode byte and any
//! parameter bytes. Polling frames consist of the header byte alone and
//! carry nothing this core acts on.

use crate::error::DecodeError;
use crate::types::{LogicalAddress, Opcode};

/// A decoded CEC frame.
///
/// Frames are transient values: outbound frames are built by a command,
/// handed to the transport and dropped; inbound frames are dropped after
/// dispatch.
///
/// # Examples
///
/// ```
/// use cecr_lib::protocol::CecFrame;
/// use cecr_lib::types::{LogicalAddress, Opcode};
///
/// let frame = CecFrame::new(
///     LogicalAddress::BROADCAST,
///     LogicalAddress::TV,
///     Opcode::GiveDevicePowerStatus,
/// );
/// assert_eq!(frame.to_bytes(), vec![0xF0, 0x8F]);
///
/// let parsed = CecFrame::parse(&[0x50, 0x90, 0x01]).unwrap();
/// assert_eq!(parsed.initiator().value(), 5);
/// assert_eq!(parsed.opcode(), Opcode::ReportPowerStatus);
/// assert_eq!(parsed.parameters(), &[0x01]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CecFrame {
    initiator: LogicalAddress,
    destination: LogicalAddress,
    opcode: Opcode,
    parameters: Vec<u8>,
}

impl CecFrame {
    /// Creates a frame without parameters.
    #[must_use]
    pub const fn new(
        initiator: LogicalAddress,
        destination: LogicalAddress,
        opcode: Opcode,
    ) -> Self {
        Self {
            initiator,
            destination,
            opcode,
            parameters: Vec::new(),
        }
    }

    /// Creates a frame with parameter bytes.
    #[must_use]
    pub fn with_parameters(
        initiator: LogicalAddress,
        destination: LogicalAddress,
        opcode: Opcode,
        parameters: Vec<u8>,
    ) -> Self {
        Self {
            initiator,
            destination,
            opcode,
            parameters,
        }
    }

    /// Returns the device that originated the frame.
    #[must_use]
    pub const fn initiator(&self) -> LogicalAddress {
        self.initiator
    }

    /// Returns the device the frame is addressed to.
    #[must_use]
    pub const fn destination(&self) -> LogicalAddress {
        self.destination
    }

    /// Returns the frame opcode.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Returns the ordered parameter bytes.
    #[must_use]
    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    /// Encodes the frame into its wire representation.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = (self.initiator.value() << 4) | self.destination.value();
        let mut bytes = Vec::with_capacity(2 + self.parameters.len());
        bytes.push(header);
        bytes.push(self.opcode.as_raw());
        bytes.extend_from_slice(&self.parameters);
        bytes
    }

    /// Decodes a frame from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Empty`] for a zero-length frame,
    /// [`DecodeError::MissingOpcode`] for a bare polling header, and
    /// [`DecodeError::UnknownOpcode`] when the opcode byte is not one this
    /// core handles.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (&header, rest) = bytes.split_first().ok_or(DecodeError::Empty)?;
        let initiator = LogicalAddress::from_raw(header >> 4);
        let destination = LogicalAddress::from_raw(header);

        let (&raw_opcode, parameters) = rest.split_first().ok_or(DecodeError::MissingOpcode {
            initiator: initiator.value(),
        })?;
        let opcode = Opcode::from_raw(raw_opcode).ok_or(DecodeError::UnknownOpcode(raw_opcode))?;

        Ok(Self {
            initiator,
            destination,
            opcode,
            parameters: parameters.to_vec(),
        })
    }
}
