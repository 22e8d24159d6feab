//! Protocol layer for device communication.
//!
//! Builds ECP and IR bridge requests, parses device documents and SSDP
//! replies, and holds the static key registries.

pub mod commands;
pub mod keymap;
pub mod response;
pub mod ssdp;
