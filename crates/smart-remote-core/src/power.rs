//! Power control.
//!
//! Powering on tries wake-on-LAN and the IR bridge at the same time; either
//! one succeeding is enough.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::device::{ControllerFactory, HttpControllers, RemoteController};
use crate::network::wol::{broadcast_target, send_wake_to};

pub struct PowerService {
    factory: Arc<dyn ControllerFactory>,
    wake_target: SocketAddr,
}

impl Default for PowerService {
    fn default() -> Self {
        Self::new(Arc::new(HttpControllers))
    }
}

impl PowerService {
    pub fn new(factory: Arc<dyn ControllerFactory>) -> Self {
        Self {
            factory,
            wake_target: broadcast_target(),
        }
    }

    /// Send magic packets somewhere other than the limited broadcast.
    pub fn with_wake_target(mut self, target: SocketAddr) -> Self {
        self.wake_target = target;
        self
    }

    /// Wake the TV by magic packet (when `mac` is known) and by the IR
    /// `power` key through the bridge at `bridge_address`.
    pub async fn power_on(&self, mac: Option<&str>, bridge_address: &str) -> bool {
        let wake = async {
            let Some(mac) = mac else {
                return false;
            };
            match send_wake_to(mac, self.wake_target).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Wake-on-LAN failed: {}", e);
                    false
                }
            }
        };

        let infrared = async {
            match self.factory.bridge(bridge_address) {
                Ok(mut bridge) => bridge.send_key("power").await,
                Err(e) => {
                    warn!("IR bridge unavailable for power on: {}", e);
                    false
                }
            }
        };

        let (woke, beamed) = tokio::join!(wake, infrared);
        info!("Power on: wake-on-LAN {}, IR {}", woke, beamed);
        woke || beamed
    }

    /// Send `power` through the active controller, if any.
    pub async fn power_off(&self, controller: Option<&mut dyn RemoteController>) -> bool {
        match controller {
            Some(controller) => controller.send_key("power").await,
            None => {
                warn!("Power off requested with no active controller");
                false
            }
        }
    }
}
