//! Controller that drives a TV through an HTTP-to-IR bridge.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, warn};

use super::http::{build_client, get_heartbeat, get_status};
use super::RemoteController;
use crate::error::DeviceError;
use crate::protocol::commands::BridgeCommands;
use crate::protocol::keymap;
use crate::types::{Channel, ControllerState};

const DEFAULT_NAME: &str = "IR Bridge";
const PING_TIMEOUT: Duration = Duration::from_secs(2);
const SEND_TIMEOUT: Duration = Duration::from_secs(1);

pub struct IrBridgeController {
    client: Client,
    state: ControllerState,
}

impl IrBridgeController {
    /// `addr` is `host` or `host:port`.
    pub fn new(addr: impl Into<String>) -> Result<Self, DeviceError> {
        Ok(Self {
            client: build_client()?,
            state: ControllerState::new(addr, DEFAULT_NAME),
        })
    }

    fn addr(&self) -> &str {
        &self.state.target_address
    }

    /// One heartbeat without touching state.
    pub async fn ping(&self) -> Result<(), DeviceError> {
        let url = BridgeCommands::ping(self.addr());
        get_heartbeat(&self.client, &url, self.addr(), PING_TIMEOUT)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl RemoteController for IrBridgeController {
    fn channel(&self) -> Channel {
        Channel::Infrared
    }

    fn state(&self) -> &ControllerState {
        &self.state
    }

    async fn connect(&mut self) -> bool {
        let result = self.ping().await;
        self.state.connected = result.is_ok();

        if let Err(e) = result {
            warn!("IR bridge heartbeat failed: {}", e);
        }
        self.state.connected
    }

    async fn send_key(&mut self, key: &str) -> bool {
        let code = match keymap::resolve(Channel::Infrared, key) {
            Ok(code) => code,
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };

        let url = BridgeCommands::ir(self.addr(), code);
        match get_status(&self.client, &url, self.addr(), SEND_TIMEOUT).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send IR command {}: {}", key, e);
                false
            }
        }
    }

    async fn launch_app(&mut self, app_id: &str) -> bool {
        info!("App launch ({}) not supported over IR, sending home", app_id);
        self.send_key("home").await
    }
}
