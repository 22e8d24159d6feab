//! Remote session: the application layer tying scanners, controllers,
//! fallback, power and the host collaborators together.
//!
//! A session is cheap to clone; clones share the active controller, so a
//! scheduled key press sees whatever controller is active when it fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::RemoteConfig;
use crate::device::{bridge_address, ControllerFactory, HttpControllers, DEFAULT_TV_NAME};
use crate::discovery::{DiscoveryReport, DiscoveryService};
use crate::error::{ControlError, DeviceError};
use crate::fallback::{Delivery, FallbackOrchestrator};
use crate::platform::{NetworkInfo, Notifier};
use crate::power::PowerService;
use crate::storage::DeviceStore;
use crate::types::{ControllerState, DeviceDescriptor, DeviceKind, NetworkStatus};

/// Collaborators a session is built from.
pub struct SessionParts {
    pub config: RemoteConfig,
    pub discovery: DiscoveryService,
    pub factory: Arc<dyn ControllerFactory>,
    pub power: PowerService,
    pub store: Box<dyn DeviceStore>,
    pub notifier: Box<dyn Notifier>,
    pub network: Box<dyn NetworkInfo>,
}

struct Inner {
    config: RemoteConfig,
    discovery: DiscoveryService,
    factory: Arc<dyn ControllerFactory>,
    power: PowerService,
    store: Box<dyn DeviceStore>,
    notifier: Box<dyn Notifier>,
    network: Box<dyn NetworkInfo>,
    bridge: Mutex<String>,
    current: Mutex<Option<DeviceDescriptor>>,
    active: Mutex<Option<FallbackOrchestrator>>,
}

#[derive(Clone)]
pub struct RemoteSession {
    inner: Arc<Inner>,
}

impl RemoteSession {
    /// Session with the HTTP controllers and real scanners.
    pub fn new(
        config: RemoteConfig,
        store: Box<dyn DeviceStore>,
        notifier: Box<dyn Notifier>,
        network: Box<dyn NetworkInfo>,
    ) -> Result<Self, DeviceError> {
        let factory: Arc<dyn ControllerFactory> = Arc::new(HttpControllers);
        Ok(Self::from_parts(SessionParts {
            discovery: DiscoveryService::from_config(&config)?,
            power: PowerService::new(factory.clone()),
            factory,
            config,
            store,
            notifier,
            network,
        }))
    }

    pub fn from_parts(parts: SessionParts) -> Self {
        let bridge = parts.config.bridge_address.clone();
        Self {
            inner: Arc::new(Inner {
                config: parts.config,
                discovery: parts.discovery,
                factory: parts.factory,
                power: parts.power,
                store: parts.store,
                notifier: parts.notifier,
                network: parts.network,
                bridge: Mutex::new(bridge),
                current: Mutex::new(None),
                active: Mutex::new(None),
            }),
        }
    }

    fn notify(&self, message: &str) {
        self.inner.notifier.notify(message);
    }

    pub async fn bridge_address(&self) -> String {
        self.inner.bridge.lock().await.clone()
    }

    pub async fn current_device(&self) -> Option<DeviceDescriptor> {
        self.inner.current.lock().await.clone()
    }

    /// State of the active controller, if one is installed.
    pub async fn active_state(&self) -> Option<ControllerState> {
        self.inner
            .active
            .lock()
            .await
            .as_ref()
            .map(|o| o.state().clone())
    }

    pub fn network_status(&self) -> NetworkStatus {
        self.inner.network.status()
    }

    async fn adopt_bridge(&self, address: String) {
        info!("Using IR bridge at {}", address);
        if let Some(orchestrator) = self.inner.active.lock().await.as_mut() {
            orchestrator.set_bridge_address(address.clone());
        }
        *self.inner.bridge.lock().await = address;
    }

    /// Config as it stands now, with the session's bridge address.
    async fn effective_config(&self) -> RemoteConfig {
        RemoteConfig {
            bridge_address: self.bridge_address().await,
            ..self.inner.config.clone()
        }
    }

    /// Discover TVs and bridges. The first bridge found becomes the
    /// session's bridge.
    pub async fn scan(&self) -> DiscoveryReport {
        let status = self.network_status();
        if !status.is_connected() {
            self.notify("Not connected to a network");
            return DiscoveryReport::default();
        }

        debug!("Scanning on {}", status.network_name);
        let report = self.inner.discovery.discover_all().await;
        if let Some(bridge) = report.bridges.first() {
            self.adopt_bridge(bridge_address(bridge, &self.inner.config))
                .await;
        }
        report
    }

    /// Connect to `descriptor` and make it the active device.
    ///
    /// Generic smart devices are driven through the IR bridge and always
    /// connect; anything else must answer.
    pub async fn connect(&self, descriptor: &DeviceDescriptor) -> bool {
        let config = self.effective_config().await;
        let mut controller = match self.inner.factory.controller(descriptor, &config) {
            Ok(controller) => controller,
            Err(e) => {
                error!("Controller for {} unavailable: {}", descriptor.ip, e);
                self.notify(&format!("Could not reach {}", descriptor.ip));
                return false;
            }
        };

        let reachable = controller.connect().await;
        if !reachable {
            if descriptor.kind == DeviceKind::GenericSmartDevice {
                warn!("IR bridge not answering, keeping {} anyway", descriptor.ip);
            } else {
                self.notify(&format!("Could not reach {}", descriptor.ip));
                return false;
            }
        }

        let state = controller.state();
        let mut saved = descriptor.with_mac(state.mac_address.clone());
        if reachable && descriptor.kind == DeviceKind::NetworkTv && state.display_name != DEFAULT_TV_NAME {
            saved.name = state.display_name.clone();
        }
        if let Err(e) = self.inner.store.save(&saved).await {
            warn!("Failed to remember {}: {}", saved.ip, e);
        }

        info!("Connected to {} ({})", saved.name, saved.ip);
        *self.inner.active.lock().await = Some(FallbackOrchestrator::with_factory(
            controller,
            config.bridge_address,
            self.inner.factory.clone(),
        ));
        *self.inner.current.lock().await = Some(saved);
        true
    }

    /// Reinstall the controller for the stored device.
    ///
    /// The controller is installed even when the device doesn't answer, so
    /// commands can still fall back to infrared. Returns whether it answered.
    pub async fn restore(&self) -> bool {
        let stored = match self.inner.store.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => return false,
            Err(e) => {
                warn!("Failed to read last device: {}", e);
                return false;
            }
        };

        let config = self.effective_config().await;
        let mut controller = match self.inner.factory.controller(&stored.device, &config) {
            Ok(controller) => controller,
            Err(e) => {
                warn!("Controller for {} unavailable: {}", stored.device.ip, e);
                return false;
            }
        };

        let reachable = controller.connect().await;
        debug!("Restored {} (reachable: {})", stored.device.ip, reachable);

        let device = stored.device.with_mac(controller.state().mac_address.clone());
        *self.inner.active.lock().await = Some(FallbackOrchestrator::with_factory(
            controller,
            config.bridge_address,
            self.inner.factory.clone(),
        ));
        *self.inner.current.lock().await = Some(device);
        reachable
    }

    /// Send a logical key.
    ///
    /// `power` with nothing connected turns the TV on instead.
    pub async fn send_key(&self, key: &str) -> bool {
        let mut active = self.inner.active.lock().await;
        let connected = active.as_ref().is_some_and(|o| o.state().connected);

        if key == "power" && !connected {
            drop(active);
            return self.power_on().await;
        }

        let Some(orchestrator) = active.as_mut() else {
            self.notify("No device connected");
            return false;
        };
        let result = orchestrator.send_key(key).await;
        self.report(result)
    }

    pub async fn launch_app(&self, app_id: &str) -> bool {
        let mut active = self.inner.active.lock().await;
        let Some(orchestrator) = active.as_mut() else {
            self.notify("No device connected");
            return false;
        };
        let result = orchestrator.launch_app(app_id).await;
        self.report(result)
    }

    fn report(&self, result: Result<Delivery, ControlError>) -> bool {
        match result {
            Ok(delivery) => {
                if delivery.switched {
                    self.notify("Network control lost, switched to IR bridge");
                }
                true
            }
            Err(e) => {
                self.notify(&e.to_string());
                false
            }
        }
    }

    /// Wake-on-LAN with the remembered MAC plus IR power.
    pub async fn power_on(&self) -> bool {
        let mac = match self.current_device().await.and_then(|d| d.mac) {
            Some(mac) => Some(mac),
            None => match self.inner.store.load().await {
                Ok(stored) => stored.and_then(|s| s.device.mac),
                Err(e) => {
                    warn!("Failed to read last device: {}", e);
                    None
                }
            },
        };

        let bridge = self.bridge_address().await;
        let ok = self.inner.power.power_on(mac.as_deref(), &bridge).await;
        if !ok {
            self.notify("Power on failed: no wake-on-LAN address and IR bridge unreachable");
        }
        ok
    }

    pub async fn power_off(&self) -> bool {
        let mut active = self.inner.active.lock().await;
        let controller = active.as_mut().map(|o| o.controller_mut());
        let ok = self.inner.power.power_off(controller).await;
        if !ok {
            self.notify("Power off failed");
        }
        ok
    }

    /// Find a usable bridge: the configured one if it answers, otherwise
    /// the first hit of a subnet scan.
    pub async fn locate_bridge(&self) -> Option<String> {
        let configured = self.bridge_address().await;
        if self.probe_bridge(&configured).await {
            return Some(configured);
        }

        info!("Bridge at {} not answering, scanning", configured);
        let found = self.inner.discovery.discover_bridges().await;
        match found.first() {
            Some(bridge) => {
                let address = bridge_address(bridge, &self.inner.config);
                self.adopt_bridge(address.clone()).await;
                Some(address)
            }
            None => {
                self.notify("IR bridge not found");
                None
            }
        }
    }

    /// One heartbeat to an arbitrary bridge address.
    pub async fn test_bridge(&self, address: &str) -> bool {
        let ok = self.probe_bridge(address).await;
        if ok {
            self.notify(&format!("IR bridge at {} is responding", address));
        } else {
            self.notify(&format!("IR bridge at {} did not respond", address));
        }
        ok
    }

    async fn probe_bridge(&self, address: &str) -> bool {
        match self.inner.factory.bridge(address) {
            Ok(mut bridge) => bridge.connect().await,
            Err(e) => {
                warn!("IR bridge controller for {} unavailable: {}", address, e);
                false
            }
        }
    }

    /// Send `key` after `delay`, e.g. `power` as a sleep timer.
    pub fn schedule(&self, delay: Duration, key: impl Into<String>) -> JoinHandle<bool> {
        let session = self.clone();
        let key = key.into();
        info!("Scheduled '{}' in {:?}", key, delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.send_key(&key).await
        })
    }
}
