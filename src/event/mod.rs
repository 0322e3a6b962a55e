// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for observing the service.
//!
//! Every store mutation and adapter lifecycle transition is published as a
//! [`CecEvent`] on the [`EventBus`], giving the embedding layer a feed for
//! logging or push notification without polling the query surface.
//!
//! # Examples
//!
//! ```
//! use cecr_lib::event::{CecEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let _rx = bus.subscribe();
//! bus.publish(CecEvent::Closed);
//! ```

mod cec_event;
mod event_bus;

pub use cec_event::CecEvent;
pub use event_bus::EventBus;
