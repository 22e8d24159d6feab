//! SmartRemote core library.
//!
//! Finds TVs and IR bridges on the local network and drives them over
//! whichever channel works: the TV's own network API, or an HTTP-to-IR bridge
//! when that fails.

pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod fallback;
pub mod network;
pub mod platform;
pub mod power;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::RemoteConfig;
pub use device::{controller_for, ControllerFactory, HttpControllers, RemoteController};
pub use error::{ControlError, CoreError, Result};
pub use fallback::{Delivery, FallbackOrchestrator};
pub use power::PowerService;
pub use session::{RemoteSession, SessionParts};
pub use types::*;
