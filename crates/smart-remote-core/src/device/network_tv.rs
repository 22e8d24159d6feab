//! ECP controller for network TVs.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, warn};

use super::http::{build_client, get_text, post_empty};
use super::RemoteController;
use crate::error::DeviceError;
use crate::protocol::commands::{EcpCommands, TV_PORT};
use crate::protocol::keymap;
use crate::protocol::response::parse_device_info;
use crate::types::{Channel, ControllerState};

/// Display name until device-info reports the user-set one.
pub const DEFAULT_TV_NAME: &str = "Roku TV";
const INFO_TIMEOUT: Duration = Duration::from_secs(3);
const KEY_TIMEOUT: Duration = Duration::from_secs(1);
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(2);

pub struct NetworkTvController {
    client: Client,
    state: ControllerState,
}

impl NetworkTvController {
    /// Controller for a TV on the default ECP port.
    pub fn new(ip: IpAddr) -> Result<Self, DeviceError> {
        Self::with_port(ip, TV_PORT)
    }

    pub fn with_port(ip: IpAddr, port: u16) -> Result<Self, DeviceError> {
        Self::at(format!("{}:{}", ip, port))
    }

    /// Controller for an explicit `host:port`.
    pub fn at(addr: impl Into<String>) -> Result<Self, DeviceError> {
        Ok(Self {
            client: build_client()?,
            state: ControllerState::new(addr, DEFAULT_TV_NAME),
        })
    }

    fn addr(&self) -> &str {
        &self.state.target_address
    }

    async fn query_device_info(&mut self) -> Result<(), DeviceError> {
        let url = EcpCommands::device_info(self.addr());
        let body = get_text(&self.client, &url, self.addr(), INFO_TIMEOUT).await?;

        let info = parse_device_info(&body);
        if let Some(name) = info.display_name() {
            self.state.display_name = name.to_string();
        }
        self.state.mac_address = info.mac;
        Ok(())
    }

    fn record(&mut self, result: &Result<(), DeviceError>) {
        match result {
            Ok(()) => self.state.connected = true,
            Err(DeviceError::Offline { .. }) => self.state.connected = false,
            Err(_) => {}
        }
    }
}

#[async_trait]
impl RemoteController for NetworkTvController {
    fn channel(&self) -> Channel {
        Channel::Network
    }

    fn state(&self) -> &ControllerState {
        &self.state
    }

    async fn connect(&mut self) -> bool {
        match self.query_device_info().await {
            Ok(()) => {
                self.state.connected = true;
                debug!(
                    "Connected to {} ({}), mac {:?}",
                    self.state.display_name,
                    self.addr(),
                    self.state.mac_address
                );
                true
            }
            Err(e) => {
                error!("TV connect failed: {}", e);
                self.state.connected = false;
                false
            }
        }
    }

    async fn send_key(&mut self, key: &str) -> bool {
        let code = match keymap::resolve(Channel::Network, key) {
            Ok(code) => code,
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };

        let url = EcpCommands::keypress(self.addr(), code);
        let result = post_empty(&self.client, &url, self.addr(), KEY_TIMEOUT).await;
        self.record(&result);

        if let Err(e) = result {
            error!("TV send_key {} failed: {}", key, e);
            return false;
        }
        true
    }

    async fn launch_app(&mut self, app_id: &str) -> bool {
        let url = EcpCommands::launch(self.addr(), app_id);
        let result = post_empty(&self.client, &url, self.addr(), LAUNCH_TIMEOUT).await;
        self.record(&result);

        if let Err(e) = result {
            error!("TV launch_app {} failed: {}", app_id, e);
            return false;
        }
        true
    }
}
