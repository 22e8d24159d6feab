//! Channel fallback.
//!
//! A command that fails on the primary channel triggers one switch to the IR
//! bridge and one retry there. Once on infrared there is nowhere left to
//! fall back to, so failures are terminal.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::device::{ControllerFactory, HttpControllers, RemoteController};
use crate::error::ControlError;
use crate::types::{Channel, ControllerState};

/// What the orchestrator was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Key(&'a str),
    Launch(&'a str),
}

impl Command<'_> {
    async fn run(&self, controller: &mut dyn RemoteController) -> bool {
        match self {
            Command::Key(key) => controller.send_key(key).await,
            Command::Launch(app_id) => controller.launch_app(app_id).await,
        }
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Key(key) => write!(f, "{}", key),
            Command::Launch(app_id) => write!(f, "launch {}", app_id),
        }
    }
}

/// How a successful command got delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub channel: Channel,
    /// Whether this command caused the switch to infrared
    pub switched: bool,
}

pub struct FallbackOrchestrator {
    active: Box<dyn RemoteController>,
    bridge_address: String,
    factory: Arc<dyn ControllerFactory>,
}

impl FallbackOrchestrator {
    pub fn new(active: Box<dyn RemoteController>, bridge_address: impl Into<String>) -> Self {
        Self::with_factory(active, bridge_address, Arc::new(HttpControllers))
    }

    pub fn with_factory(
        active: Box<dyn RemoteController>,
        bridge_address: impl Into<String>,
        factory: Arc<dyn ControllerFactory>,
    ) -> Self {
        Self {
            active,
            bridge_address: bridge_address.into(),
            factory,
        }
    }

    pub fn channel(&self) -> Channel {
        self.active.channel()
    }

    pub fn state(&self) -> &ControllerState {
        self.active.state()
    }

    pub fn controller_mut(&mut self) -> &mut dyn RemoteController {
        self.active.as_mut()
    }

    pub fn bridge_address(&self) -> &str {
        &self.bridge_address
    }

    pub fn set_bridge_address(&mut self, address: impl Into<String>) {
        self.bridge_address = address.into();
    }

    pub async fn send_key(&mut self, key: &str) -> Result<Delivery, ControlError> {
        self.execute(Command::Key(key)).await
    }

    pub async fn launch_app(&mut self, app_id: &str) -> Result<Delivery, ControlError> {
        self.execute(Command::Launch(app_id)).await
    }

    /// Run `command`, switching to the IR bridge at most once.
    pub async fn execute(&mut self, command: Command<'_>) -> Result<Delivery, ControlError> {
        if command.run(self.active.as_mut()).await {
            return Ok(Delivery {
                channel: self.active.channel(),
                switched: false,
            });
        }

        if self.active.channel() == Channel::Infrared {
            return Err(ControlError::InfraredFailed {
                command: command.to_string(),
            });
        }

        warn!(
            "'{}' failed on {}, trying IR bridge at {}",
            command,
            self.active.state().target_address,
            self.bridge_address
        );

        let unavailable = || ControlError::BridgeUnavailable {
            bridge: self.bridge_address.clone(),
        };

        let mut bridge = match self.factory.bridge(&self.bridge_address) {
            Ok(bridge) => bridge,
            Err(e) => {
                warn!("Could not create IR bridge controller: {}", e);
                return Err(unavailable());
            }
        };
        if !bridge.connect().await {
            return Err(unavailable());
        }

        self.active = bridge;
        info!("Switched to IR bridge at {}", self.bridge_address);

        if command.run(self.active.as_mut()).await {
            Ok(Delivery {
                channel: Channel::Infrared,
                switched: true,
            })
        } else {
            Err(ControlError::RetryFailed {
                command: command.to_string(),
            })
        }
    }
}
