//! Device communication layer.
//!
//! [`RemoteController`] is the one contract every channel implements. The
//! fallback orchestrator and the session only ever see `Box<dyn
//! RemoteController>`, so swapping a network TV for an IR bridge is a plain
//! value replacement.

pub mod http;
pub mod ir_bridge;
pub mod network_tv;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::error::DeviceError;
use crate::types::{Channel, ControllerState, DeviceDescriptor, DeviceKind};

pub use ir_bridge::IrBridgeController;
pub use network_tv::{NetworkTvController, DEFAULT_TV_NAME};

/// Capability contract shared by all control channels.
///
/// Methods report success as `bool`; failures are logged by the
/// implementation and never surface as errors.
#[async_trait]
pub trait RemoteController: Send + Sync {
    /// Which transport this controller uses.
    fn channel(&self) -> Channel;

    /// Current state snapshot.
    fn state(&self) -> &ControllerState;

    /// Verify the device answers.
    async fn connect(&mut self) -> bool;

    /// Send one logical key. Unmapped keys fail without touching the network.
    async fn send_key(&mut self, key: &str) -> bool;

    /// Launch an app by its channel-specific id.
    async fn launch_app(&mut self, app_id: &str) -> bool;
}

/// Build the controller that fits a descriptor.
///
/// Generic smart devices have no control API of their own, so they are
/// driven through the configured IR bridge.
pub fn controller_for(
    descriptor: &DeviceDescriptor,
    config: &RemoteConfig,
) -> Result<Box<dyn RemoteController>, DeviceError> {
    let controller: Box<dyn RemoteController> = match descriptor.kind {
        DeviceKind::NetworkTv => Box::new(NetworkTvController::with_port(
            descriptor.ip,
            config.tv_port,
        )?),
        DeviceKind::InfraredBridge => {
            Box::new(IrBridgeController::new(bridge_address(descriptor, config))?)
        }
        DeviceKind::GenericSmartDevice => {
            Box::new(IrBridgeController::new(config.bridge_address.clone())?)
        }
    };
    Ok(controller)
}

/// `host[:port]` a bridge descriptor is reached at.
pub fn bridge_address(descriptor: &DeviceDescriptor, config: &RemoteConfig) -> String {
    if config.heartbeat_port == 80 {
        descriptor.ip.to_string()
    } else {
        format!("{}:{}", descriptor.ip, config.heartbeat_port)
    }
}

/// Source of controllers for the orchestrator, power service and session.
pub trait ControllerFactory: Send + Sync {
    /// Controller for a discovered or stored device.
    fn controller(
        &self,
        descriptor: &DeviceDescriptor,
        config: &RemoteConfig,
    ) -> Result<Box<dyn RemoteController>, DeviceError>;

    /// IR bridge controller at `address`.
    fn bridge(&self, address: &str) -> Result<Box<dyn RemoteController>, DeviceError>;
}

/// Factory producing the real HTTP controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpControllers;

impl ControllerFactory for HttpControllers {
    fn controller(
        &self,
        descriptor: &DeviceDescriptor,
        config: &RemoteConfig,
    ) -> Result<Box<dyn RemoteController>, DeviceError> {
        controller_for(descriptor, config)
    }

    fn bridge(&self, address: &str) -> Result<Box<dyn RemoteController>, DeviceError> {
        Ok(Box::new(IrBridgeController::new(address)?))
    }
}
