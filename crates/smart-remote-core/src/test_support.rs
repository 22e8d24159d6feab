//! Recording fakes shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::device::{ControllerFactory, RemoteController, DEFAULT_TV_NAME};
use crate::error::DeviceError;
use crate::types::{Channel, ControllerState, DeviceDescriptor, DeviceKind};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub struct FakeController {
    channel: Channel,
    state: ControllerState,
    connect_ok: bool,
    succeed: bool,
    log: CallLog,
}

impl FakeController {
    pub fn new(channel: Channel, address: &str, connect_ok: bool, succeed: bool, log: CallLog) -> Self {
        Self {
            channel,
            state: ControllerState::new(address, format!("fake {}", channel)),
            connect_ok,
            succeed,
            log,
        }
    }

    pub fn with_mac(mut self, mac: &str) -> Self {
        self.state.mac_address = Some(mac.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.state.display_name = name.to_string();
        self
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(format!("{}:{}", self.channel, call));
    }
}

#[async_trait]
impl RemoteController for FakeController {
    fn channel(&self) -> Channel {
        self.channel
    }

    fn state(&self) -> &ControllerState {
        &self.state
    }

    async fn connect(&mut self) -> bool {
        self.record("connect".to_string());
        self.state.connected = self.connect_ok;
        self.connect_ok
    }

    async fn send_key(&mut self, key: &str) -> bool {
        self.record(format!("key:{}", key));
        self.succeed
    }

    async fn launch_app(&mut self, app_id: &str) -> bool {
        self.record(format!("launch:{}", app_id));
        self.succeed
    }
}

/// Factory handing out fakes whose behaviour is fixed up front.
pub struct FakeFactory {
    pub log: CallLog,
    pub primary_connects: bool,
    pub primary_succeeds: bool,
    pub primary_mac: Option<String>,
    pub primary_name: Option<String>,
    pub bridge_connects: bool,
    pub bridge_succeeds: bool,
    pub bridges_built: AtomicUsize,
}

impl FakeFactory {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            primary_connects: true,
            primary_succeeds: true,
            primary_mac: None,
            primary_name: None,
            bridge_connects: true,
            bridge_succeeds: true,
            bridges_built: AtomicUsize::new(0),
        }
    }

    pub fn bridges_built(&self) -> usize {
        self.bridges_built.load(Ordering::SeqCst)
    }
}

impl ControllerFactory for FakeFactory {
    fn controller(
        &self,
        descriptor: &DeviceDescriptor,
        config: &RemoteConfig,
    ) -> Result<Box<dyn RemoteController>, DeviceError> {
        if descriptor.kind != DeviceKind::NetworkTv {
            return self.bridge(&config.bridge_address);
        }

        let mut controller = FakeController::new(
            Channel::Network,
            &descriptor.ip.to_string(),
            self.primary_connects,
            self.primary_succeeds,
            self.log.clone(),
        );
        if let Some(mac) = &self.primary_mac {
            controller = controller.with_mac(mac);
        }
        // Like the real TV controller, keep the stock name unless one was reported
        controller = controller.with_name(self.primary_name.as_deref().unwrap_or(DEFAULT_TV_NAME));
        Ok(Box::new(controller))
    }

    fn bridge(&self, address: &str) -> Result<Box<dyn RemoteController>, DeviceError> {
        self.bridges_built.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeController::new(
            Channel::Infrared,
            address,
            self.bridge_connects,
            self.bridge_succeeds,
            self.log.clone(),
        )))
    }
}
