// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `CecR` library.
//!
//! This module provides the error hierarchy for the crate: adapter startup
//! failures, value validation for caller-supplied input, and inbound frame
//! decoding.
//!
//! Transmit failures are deliberately absent from this hierarchy. The bus
//! transport reports them as a boolean and the service logs and swallows
//! them, keeping the optimistic state update in place (see
//! [`CecService::set_status`](crate::service::CecService::set_status)).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during adapter startup.
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Fatal errors raised while bringing up the bus connection.
///
/// Both variants abort service initialization: without a bus connection
/// there is no degraded mode to fall back to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Adapter discovery returned no candidates.
    #[error("no CEC adapters found")]
    NoAdapterFound,

    /// The open call on a discovered adapter was rejected.
    #[error("failed to open a connection to the CEC adapter on port {port}")]
    OpenFailed {
        /// Port of the adapter that rejected the open call.
        port: String,
    },
}

/// Errors related to value validation and constraints.
///
/// These errors occur when caller-supplied input fails the bounds checks
/// that bus-observed traffic is exempt from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: u8,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),
}

/// Errors raised while decoding an inbound bus frame.
///
/// Decode failures are contained within the dispatch loop: the offending
/// frame is logged at debug level and dropped, never surfaced to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The raw frame contained no bytes at all.
    #[error("empty frame")]
    Empty,

    /// The frame carried only the address header, no opcode.
    #[error("frame from {initiator} has no opcode")]
    MissingOpcode {
        /// Initiator address taken from the header byte.
        initiator: u8,
    },

    /// The opcode byte is not one this core recognizes.
    #[error("unrecognized opcode 0x{0:02X}")]
    UnknownOpcode(u8),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_error_display() {
        assert_eq!(
            AdapterError::NoAdapterFound.to_string(),
            "no CEC adapters found"
        );
        let err = AdapterError::OpenFailed {
            port: "/dev/ttyACM0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open a connection to the CEC adapter on port /dev/ttyACM0"
        );
    }

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 11,
            actual: 14,
        };
        assert_eq!(err.to_string(), "value 14 is out of range [0, 11]");
    }

    #[test]
    fn error_from_adapter_error() {
        let err: Error = AdapterError::NoAdapterFound.into();
        assert!(matches!(err, Error::Adapter(AdapterError::NoAdapterFound)));
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(
            DecodeError::UnknownOpcode(0x82).to_string(),
            "unrecognized opcode 0x82"
        );
        assert_eq!(
            DecodeError::MissingOpcode { initiator: 4 }.to_string(),
            "frame from 4 has no opcode"
        );
    }
}
