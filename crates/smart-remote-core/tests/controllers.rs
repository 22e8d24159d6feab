mod common;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use common::{closed_port, StubServer, DEVICE_INFO};
use smart_remote_core::discovery::{HeartbeatProbe, HttpHeartbeatProbe};
use smart_remote_core::device::{IrBridgeController, NetworkTvController};
use smart_remote_core::{
    Channel, ControlError, FallbackOrchestrator, HttpControllers, PowerService, RemoteController,
};

#[tokio::test]
async fn test_network_tv_connect_reads_device_info() {
    let tv = StubServer::start(&[("GET /query/device-info", 200, DEVICE_INFO)]).await;
    let mut controller = NetworkTvController::at(tv.host()).unwrap();

    assert!(controller.connect().await);

    let state = controller.state();
    assert!(state.connected);
    assert_eq!(state.display_name, "Living Room");
    assert_eq!(state.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
}

#[tokio::test]
async fn test_network_tv_keypress_and_launch() {
    let tv = StubServer::start(&[
        ("POST /keypress/VolumeUp", 200, ""),
        ("POST /launch/12", 200, ""),
    ])
    .await;
    let mut controller = NetworkTvController::at(tv.host()).unwrap();

    assert!(controller.send_key("vol_up").await);
    assert!(controller.launch_app("12").await);
    assert_eq!(tv.requests(), vec!["POST /keypress/VolumeUp", "POST /launch/12"]);
}

#[tokio::test]
async fn test_unmapped_key_makes_no_request() {
    let tv = StubServer::start(&[]).await;
    let bridge = StubServer::start(&[]).await;
    let mut network = NetworkTvController::at(tv.host()).unwrap();
    let mut infrared = IrBridgeController::new(bridge.host()).unwrap();

    assert!(!network.send_key("input_hdmi9").await);
    assert!(!infrared.send_key("input_hdmi9").await);
    // No IR code for play
    assert!(!infrared.send_key("play").await);

    assert!(tv.requests().is_empty());
    assert!(bridge.requests().is_empty());
}

#[tokio::test]
async fn test_network_tv_offline() {
    let port = closed_port().await;
    let mut controller = NetworkTvController::at(format!("127.0.0.1:{}", port)).unwrap();

    assert!(!controller.connect().await);
    assert!(!controller.send_key("home").await);
    assert!(!controller.state().connected);
}

#[tokio::test]
async fn test_network_tv_bad_status_fails() {
    let tv = StubServer::start(&[("POST /keypress/Home", 503, "busy")]).await;
    let mut controller = NetworkTvController::at(tv.host()).unwrap();

    assert!(!controller.send_key("home").await);
}

#[tokio::test]
async fn test_bridge_ping_and_ir_code() {
    let bridge = StubServer::start(&[
        ("GET /ping", 200, "pong"),
        ("GET /ir?code=NEC_0x40BF12ED", 200, "ok"),
        ("GET /ir?code=NEC_0x40BF33CC", 200, "ok"),
    ])
    .await;
    let mut controller = IrBridgeController::new(bridge.host()).unwrap();

    assert!(controller.connect().await);
    assert!(controller.send_key("power").await);
    assert!(controller.launch_app("12").await);

    assert_eq!(
        bridge.requests(),
        vec![
            "GET /ping",
            "GET /ir?code=NEC_0x40BF12ED",
            "GET /ir?code=NEC_0x40BF33CC",
        ]
    );
}

#[tokio::test]
async fn test_heartbeat_probe_needs_token() {
    let bridge = StubServer::start(&[("GET /ping", 200, "PONG from esp32")]).await;
    let impostor = StubServer::start(&[("GET /ping", 200, "hello")]).await;
    let localhost = Ipv4Addr::LOCALHOST;

    let probe = HttpHeartbeatProbe::new(bridge.port(), Duration::from_millis(800)).unwrap();
    assert!(probe.probe(localhost).await);

    let probe = HttpHeartbeatProbe::new(impostor.port(), Duration::from_millis(800)).unwrap();
    assert!(!probe.probe(localhost).await);

    let probe = HttpHeartbeatProbe::new(closed_port().await, Duration::from_millis(800)).unwrap();
    assert!(!probe.probe(localhost).await);
}

#[tokio::test]
async fn test_heartbeat_requires_status_200() {
    let accepted = StubServer::start(&[("GET /ping", 202, "pong")]).await;
    let localhost = Ipv4Addr::LOCALHOST;

    let probe = HttpHeartbeatProbe::new(accepted.port(), Duration::from_millis(800)).unwrap();
    assert!(!probe.probe(localhost).await);

    let bridge = IrBridgeController::new(accepted.host()).unwrap();
    assert!(bridge.ping().await.is_err());
}

#[tokio::test]
async fn test_power_on_without_mac_through_bridge() {
    let bridge = StubServer::start(&[("GET /ir?code=NEC_0x40BF12ED", 200, "ok")]).await;
    let power = PowerService::new(Arc::new(HttpControllers));

    assert!(power.power_on(None, &bridge.host()).await);
    assert_eq!(bridge.requests(), vec!["GET /ir?code=NEC_0x40BF12ED"]);
}

#[tokio::test]
async fn test_power_on_fails_with_nothing_reachable() {
    let port = closed_port().await;
    let power = PowerService::default();

    assert!(!power.power_on(None, &format!("127.0.0.1:{}", port)).await);
    assert!(!power.power_on(Some("zz:zz"), &format!("127.0.0.1:{}", port)).await);
}

#[tokio::test]
async fn test_fallback_from_dead_tv_to_bridge() {
    let bridge = StubServer::start(&[
        ("GET /ping", 200, "pong"),
        ("GET /ir?code=NEC_0x40BF40BF", 200, "ok"),
    ])
    .await;
    let tv_port = closed_port().await;
    let tv = NetworkTvController::at(format!("127.0.0.1:{}", tv_port)).unwrap();
    let mut orchestrator = FallbackOrchestrator::new(Box::new(tv), bridge.host());

    let delivery = orchestrator.send_key("vol_up").await.unwrap();

    assert!(delivery.switched);
    assert_eq!(orchestrator.channel(), Channel::Infrared);
    assert_eq!(
        bridge.requests(),
        vec!["GET /ping", "GET /ir?code=NEC_0x40BF40BF"]
    );
}

#[tokio::test]
async fn test_fallback_reports_missing_bridge() {
    let tv_port = closed_port().await;
    let bridge_port = closed_port().await;
    let tv = NetworkTvController::at(format!("127.0.0.1:{}", tv_port)).unwrap();
    let bridge = format!("127.0.0.1:{}", bridge_port);
    let mut orchestrator = FallbackOrchestrator::new(Box::new(tv), bridge.clone());

    let result = orchestrator.send_key("home").await;

    assert_eq!(result, Err(ControlError::BridgeUnavailable { bridge }));
    assert_eq!(orchestrator.channel(), Channel::Network);
}
