// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-related types for CEC devices.
//!
//! This module provides the tracked power state of a device and the raw
//! status codes carried by `ReportPowerStatus` frames.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The last-known power state of a device on the bus.
///
/// `Unknown` is the implicit default for any device that has never been
/// observed or commanded.
///
/// # Examples
///
/// ```
/// use cecr_lib::types::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "ON");
/// assert_eq!(PowerState::Standby.as_str(), "STANDBY");
/// assert_eq!(PowerState::default(), PowerState::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerState {
    /// Device is powered on.
    On,
    /// Device is in standby.
    Standby,
    /// Power state has never been observed.
    #[default]
    Unknown,
}

impl PowerState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Standby => "STANDBY",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the numeric representation.
    ///
    /// `Standby` and `Unknown` both map to 0, matching the query surface
    /// where an absent entry reports the same value as a device known to be
    /// in standby.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::On => 1,
            Self::Standby | Self::Unknown => 0,
        }
    }

    /// Returns `true` if the device is known to be powered on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ON" | "1" | "TRUE" => Ok(Self::On),
            "STANDBY" | "OFF" | "0" | "FALSE" => Ok(Self::Standby),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Standby }
    }
}

/// Raw status code carried in parameter 0 of a `ReportPowerStatus` frame.
///
/// Transition codes collapse onto the state being entered when they are
/// folded into a [`PowerState`]. Any other parameter byte is unrecognized
/// and produces no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerStatusCode {
    /// Device reports it is on.
    On,
    /// Device reports it is in standby.
    Standby,
    /// Device reports it is waking up.
    TransitionStandbyToOn,
    /// Device reports it is going to standby.
    TransitionOnToStandby,
}

impl PowerStatusCode {
    /// Decodes a raw parameter byte.
    ///
    /// Returns `None` for bytes outside the four defined status codes.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::On),
            0x01 => Some(Self::Standby),
            0x02 => Some(Self::TransitionStandbyToOn),
            0x03 => Some(Self::TransitionOnToStandby),
            _ => None,
        }
    }

    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_raw(&self) -> u8 {
        match self {
            Self::On => 0x00,
            Self::Standby => 0x01,
            Self::TransitionStandbyToOn => 0x02,
            Self::TransitionOnToStandby => 0x03,
        }
    }

    /// Folds the status code into the tracked power state.
    #[must_use]
    pub const fn power_state(&self) -> PowerState {
        match self {
            Self::On | Self::TransitionStandbyToOn => PowerState::On,
            Self::Standby | Self::TransitionOnToStandby => PowerState::Standby,
        }
    }
}
