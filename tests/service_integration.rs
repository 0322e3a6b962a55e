// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests driving `CecService` end-to-end through a
//! channel-backed mock transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::timeout;

use cecr_lib::adapter::{AdapterConfig, CecAdapter, ConnectionState};
use cecr_lib::error::AdapterError;
use cecr_lib::event::CecEvent;
use cecr_lib::protocol::{AdapterDescriptor, BusNotification, BusTransport, CecFrame};
use cecr_lib::service::{CecService, Health};
use cecr_lib::types::{LogicalAddress, Opcode, PowerState};

const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Transport double: discovery and open results are scripted, transmitted
/// frames are captured, and inbound traffic is injected through the
/// notification channel.
#[derive(Debug)]
struct MockTransport {
    adapters: Vec<AdapterDescriptor>,
    open_ok: bool,
    transmit_ok: bool,
    sent: Arc<Mutex<Vec<CecFrame>>>,
    close_count: Arc<AtomicUsize>,
    notifications: Option<mpsc::Receiver<BusNotification>>,
}

/// Test-side handles onto a [`MockTransport`].
struct BusProbe {
    tx: mpsc::Sender<BusNotification>,
    sent: Arc<Mutex<Vec<CecFrame>>>,
    close_count: Arc<AtomicUsize>,
}

impl BusProbe {
    async fn inject_frame(&self, initiator: u8, opcode: u8, parameters: &[u8]) {
        let mut bytes = vec![(initiator << 4) | 0x0F, opcode];
        bytes.extend_from_slice(parameters);
        self.tx
            .send(BusNotification::Frame(bytes))
            .await
            .expect("dispatch loop alive");
    }

    fn sent_frames(&self) -> Vec<CecFrame> {
        self.sent.lock().clone()
    }

    fn closes(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

fn mock_transport() -> (MockTransport, BusProbe) {
    let (tx, rx) = mpsc::channel(64);
    let sent = Arc::new(Mutex::new(Vec::new()));
    let close_count = Arc::new(AtomicUsize::new(0));
    let transport = MockTransport {
        adapters: vec![AdapterDescriptor::new("/dev/ttyACM0")],
        open_ok: true,
        transmit_ok: true,
        sent: Arc::clone(&sent),
        close_count: Arc::clone(&close_count),
        notifications: Some(rx),
    };
    let probe = BusProbe {
        tx,
        sent,
        close_count,
    };
    (transport, probe)
}

impl MockTransport {
    fn without_adapters(mut self) -> Self {
        self.adapters.clear();
        self
    }

    fn failing_open(mut self) -> Self {
        self.open_ok = false;
        self
    }

    fn failing_transmit(mut self) -> Self {
        self.transmit_ok = false;
        self
    }
}

impl BusTransport for MockTransport {
    fn discover(&self) -> Vec<AdapterDescriptor> {
        self.adapters.clone()
    }

    async fn open(&mut self, _config: &AdapterConfig, _adapter: &AdapterDescriptor) -> bool {
        self.open_ok
    }

    async fn transmit(&self, frame: &CecFrame) -> bool {
        self.sent.lock().push(frame.clone());
        self.transmit_ok
    }

    fn notifications(&mut self) -> mpsc::Receiver<BusNotification> {
        self.notifications.take().expect("notifications taken once")
    }

    async fn close(&mut self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

fn addr(raw: u8) -> LogicalAddress {
    LogicalAddress::from_raw(raw)
}

/// Waits for the next power change event on an event subscription.
async fn next_power_change(
    rx: &mut tokio::sync::broadcast::Receiver<CecEvent>,
) -> (LogicalAddress, PowerState) {
    loop {
        let event = timeout(RECV_TIMEOUT, rx.recv())
            .await
            .expect("event within timeout")
            .expect("event bus alive");
        if let CecEvent::PowerChanged { device, state } = event {
            return (device, state);
        }
    }
}

// ============================================================================
// Startup
// ============================================================================

mod startup {
    use super::*;

    #[tokio::test]
    async fn start_reports_up() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        assert_eq!(service.health(), Health::Up);
        assert_eq!(service.connection_state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn start_seeds_store_with_tv_probe() {
        let (transport, probe) = mock_transport();
        let _service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        let sent = probe.sent_frames();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].initiator(), LogicalAddress::BROADCAST);
        assert_eq!(sent[0].destination(), LogicalAddress::TV);
        assert_eq!(sent[0].opcode(), Opcode::GiveDevicePowerStatus);
    }

    #[tokio::test]
    async fn no_adapters_is_fatal() {
        let (transport, _probe) = mock_transport();
        let result =
            CecService::start(AdapterConfig::new(), transport.without_adapters()).await;

        assert_eq!(result.unwrap_err(), AdapterError::NoAdapterFound);
    }

    #[tokio::test]
    async fn no_adapters_never_reaches_connected() {
        let (transport, _probe) = mock_transport();
        let mut adapter = CecAdapter::new(AdapterConfig::new(), transport.without_adapters());

        assert!(adapter.connect().await.is_err());
        assert!(!adapter.state().is_connected());
    }

    #[tokio::test]
    async fn open_rejection_is_fatal() {
        let (transport, _probe) = mock_transport();
        let result = CecService::start(AdapterConfig::new(), transport.failing_open()).await;

        assert_eq!(
            result.unwrap_err(),
            AdapterError::OpenFailed {
                port: "/dev/ttyACM0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_startup_probe_is_tolerated() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport.failing_transmit())
            .await
            .unwrap();

        assert_eq!(service.health(), Health::Up);
    }
}

// ============================================================================
// Query/command surface
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn unknown_device_reports_unknown() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        for raw in 0..=11 {
            assert_eq!(service.query_status(addr(raw)), PowerState::Unknown);
        }
    }

    #[tokio::test]
    async fn set_status_records_optimistically() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let device = addr(4);

        let change = service.set_status(device, true).await;
        assert_eq!(change.device, device);
        assert_eq!(change.state, PowerState::On);
        assert_eq!(service.query_status(device), PowerState::On);

        let change = service.set_status(device, false).await;
        assert_eq!(change.state, PowerState::Standby);
        assert_eq!(service.query_status(device), PowerState::Standby);
    }

    #[tokio::test]
    async fn set_status_transmits_matching_command() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let device = addr(4);

        service.set_status(device, true).await;
        service.set_status(device, false).await;

        let sent = probe.sent_frames();
        // First frame is the startup probe.
        assert_eq!(sent[1].opcode(), Opcode::ImageViewOn);
        assert_eq!(sent[1].destination(), device);
        assert_eq!(sent[2].opcode(), Opcode::Standby);
        assert_eq!(sent[2].destination(), device);
    }

    #[tokio::test]
    async fn optimistic_update_survives_transmit_failure() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport.failing_transmit())
            .await
            .unwrap();
        let device = addr(7);

        let change = service.set_status(device, true).await;
        assert_eq!(change.state, PowerState::On);
        assert_eq!(service.query_status(device), PowerState::On);
    }

    #[tokio::test]
    async fn probe_status_transmits_query() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        service.probe_status(addr(5)).await;

        let sent = probe.sent_frames();
        assert_eq!(sent[1].opcode(), Opcode::GiveDevicePowerStatus);
        assert_eq!(sent[1].destination(), addr(5));
    }

    #[tokio::test]
    async fn known_devices_lists_recorded_entries() {
        let (transport, _probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        service.set_status(addr(9), true).await;
        service.set_status(addr(2), false).await;

        assert_eq!(
            service.known_devices(),
            vec![
                (addr(2), PowerState::Standby),
                (addr(9), PowerState::On),
            ]
        );
    }
}

// ============================================================================
// Inbound bus traffic
// ============================================================================

mod inbound {
    use super::*;

    #[tokio::test]
    async fn report_power_status_updates_store() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        probe.inject_frame(5, 0x90, &[0x00]).await;
        assert_eq!(
            next_power_change(&mut events).await,
            (addr(5), PowerState::On)
        );
        assert_eq!(service.query_status(addr(5)), PowerState::On);

        probe.inject_frame(5, 0x90, &[0x01]).await;
        assert_eq!(
            next_power_change(&mut events).await,
            (addr(5), PowerState::Standby)
        );
        assert_eq!(service.query_status(addr(5)), PowerState::Standby);
    }

    #[tokio::test]
    async fn request_active_source_marks_initiator_on() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        service.set_status(addr(8), false).await;
        probe.inject_frame(8, 0x85, &[]).await;

        assert_eq!(
            next_power_change(&mut events).await,
            (addr(8), PowerState::On)
        );
        assert_eq!(service.query_status(addr(8)), PowerState::On);
    }

    #[tokio::test]
    async fn standby_frame_marks_initiator_standby() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        probe.inject_frame(0, 0x36, &[]).await;

        assert_eq!(
            next_power_change(&mut events).await,
            (LogicalAddress::TV, PowerState::Standby)
        );
    }

    #[tokio::test]
    async fn ignored_frames_produce_no_state_change() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        service.set_status(addr(6), true).await;
        let mut events = service.subscribe();

        // Unrecognized opcode, unrecognized report parameter, polling frame.
        probe.inject_frame(6, 0x82, &[0x10, 0x00]).await;
        probe.inject_frame(6, 0x90, &[0x7F]).await;
        probe.tx.send(BusNotification::Frame(vec![0x6F])).await.unwrap();

        // A mutating frame follows; it must be the first event observed,
        // proving the earlier frames changed nothing.
        probe.inject_frame(3, 0x36, &[]).await;
        assert_eq!(
            next_power_change(&mut events).await,
            (addr(3), PowerState::Standby)
        );
        assert_eq!(service.query_status(addr(6)), PowerState::On);
    }

    #[tokio::test]
    async fn out_of_range_initiator_is_recorded() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        probe.inject_frame(14, 0x85, &[]).await;

        assert_eq!(
            next_power_change(&mut events).await,
            (addr(14), PowerState::On)
        );
        assert_eq!(service.query_status(addr(14)), PowerState::On);
    }

    #[tokio::test]
    async fn bus_observation_overrides_optimistic_state() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let device = addr(5);

        service.set_status(device, false).await;
        assert_eq!(service.query_status(device), PowerState::Standby);

        let mut events = service.subscribe();
        probe.inject_frame(5, 0x90, &[0x00]).await;
        next_power_change(&mut events).await;

        assert_eq!(service.query_status(device), PowerState::On);
    }

    #[tokio::test]
    async fn bus_log_notifications_are_absorbed() {
        let (transport, probe) = mock_transport();
        let service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        probe
            .tx
            .send(BusNotification::Log {
                level: cecr_lib::protocol::BusLogLevel::Traffic,
                message: ">> 05:90:00".to_string(),
            })
            .await
            .unwrap();

        // The loop keeps dispatching frames after a log event.
        probe.inject_frame(5, 0x36, &[]).await;
        assert_eq!(
            next_power_change(&mut events).await,
            (addr(5), PowerState::Standby)
        );
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn concurrent_command_and_dispatch_leave_one_written_state() {
        let (transport, probe) = mock_transport();
        let service = Arc::new(
            CecService::start(AdapterConfig::new(), transport)
                .await
                .unwrap(),
        );
        let device = addr(3);

        let commander = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                for _ in 0..100 {
                    service.set_status(device, true).await;
                }
            })
        };
        for _ in 0..100 {
            probe.inject_frame(3, 0x36, &[]).await;
        }
        commander.await.unwrap();

        // Drain: a trailing frame for another device marks the point where
        // the dispatcher has applied everything queued before it.
        probe.inject_frame(11, 0x85, &[]).await;
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        while service.query_status(addr(11)) != PowerState::On {
            assert!(
                tokio::time::Instant::now() < deadline,
                "dispatcher did not drain in time"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let state = service.query_status(device);
        assert!(
            state == PowerState::On || state == PowerState::Standby,
            "torn state: {state:?}"
        );
    }
}

// ============================================================================
// Shutdown
// ============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn shutdown_closes_transport_exactly_once() {
        let (transport, probe) = mock_transport();
        let mut service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();

        service.shutdown().await;
        service.shutdown().await;

        assert_eq!(probe.closes(), 1);
        assert_eq!(service.health(), Health::Down);
        assert_eq!(service.connection_state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn shutdown_emits_closed_event() {
        let (transport, _probe) = mock_transport();
        let mut service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        let mut events = service.subscribe();

        service.shutdown().await;

        let event = timeout(RECV_TIMEOUT, events.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, CecEvent::Closed);
    }

    #[tokio::test]
    async fn set_status_after_shutdown_keeps_store_available() {
        let (transport, _probe) = mock_transport();
        let mut service = CecService::start(AdapterConfig::new(), transport)
            .await
            .unwrap();
        service.shutdown().await;

        // Transmit fails silently on a closed adapter; the cache still
        // honors the optimistic write.
        let change = service.set_status(addr(2), true).await;
        assert_eq!(change.state, PowerState::On);
        assert_eq!(service.query_status(addr(2)), PowerState::On);
    }
}
