//! Logical key registries.
//!
//! A logical key ("power", "vol_up", ...) is what the remote surface sends.
//! Each channel has its own static table translating it to a wire code:
//! ECP key names for network TVs, opaque NEC tokens for the IR bridge.

use crate::error::DeviceError;
use crate::types::Channel;

/// Keys the remote surface can emit.
pub const REMOTE_KEYS: &[&str] = &[
    "power", "home", "back", "select", "up", "down", "left", "right", "play", "pause", "rev",
    "fwd", "vol_up", "vol_down", "mute", "enter",
];

/// Logical key -> ECP key name.
pub const NETWORK_KEYS: &[(&str, &str)] = &[
    ("power", "Power"),
    ("home", "Home"),
    ("back", "Back"),
    ("select", "Select"),
    ("up", "Up"),
    ("down", "Down"),
    ("left", "Left"),
    ("right", "Right"),
    ("play", "Play"),
    // ECP has a single play/pause toggle
    ("pause", "Play"),
    ("rev", "Rev"),
    ("fwd", "Fwd"),
    ("vol_up", "VolumeUp"),
    ("vol_down", "VolumeDown"),
    ("mute", "VolumeMute"),
    ("enter", "Enter"),
];

/// Logical key -> IR code token understood by the bridge.
pub const INFRARED_CODES: &[(&str, &str)] = &[
    ("power", "NEC_0x40BF12ED"),
    ("vol_up", "NEC_0x40BF40BF"),
    ("vol_down", "NEC_0x40BFC03F"),
    ("mute", "NEC_0x40BF31CE"),
    ("up", "NEC_0x40BF10EF"),
    ("down", "NEC_0x40BF906F"),
    ("left", "NEC_0x40BFD02F"),
    ("right", "NEC_0x40BF50AF"),
    ("select", "NEC_0x40BF30CF"),
    ("back", "NEC_0x40BF11EE"),
    ("home", "NEC_0x40BF33CC"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| *code)
}

/// Translate a logical key for the network channel.
pub fn network_key(key: &str) -> Option<&'static str> {
    lookup(NETWORK_KEYS, key)
}

/// Translate a logical key for the infrared channel.
pub fn infrared_code(key: &str) -> Option<&'static str> {
    lookup(INFRARED_CODES, key)
}

/// Translate a logical key for the given channel's controller.
pub fn resolve(channel: Channel, key: &str) -> Result<&'static str, DeviceError> {
    let code = match channel {
        Channel::Network => network_key(key),
        Channel::Infrared => infrared_code(key),
    };
    code.ok_or_else(|| DeviceError::UnmappedKey {
        key: key.to_string(),
        channel: channel.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_remote_key_resolves_somewhere() {
        for key in REMOTE_KEYS {
            assert!(
                network_key(key).is_some() || infrared_code(key).is_some(),
                "{} resolves in neither registry",
                key
            );
        }
    }

    #[test]
    fn test_network_lookup() {
        assert_eq!(network_key("vol_up"), Some("VolumeUp"));
        assert_eq!(network_key("pause"), Some("Play"));
        assert_eq!(network_key("netflix"), None);
    }

    #[test]
    fn test_infrared_lookup() {
        assert_eq!(infrared_code("power"), Some("NEC_0x40BF12ED"));
        // Transport keys have no IR code on this set
        assert_eq!(infrared_code("play"), None);
        assert_eq!(resolve(Channel::Infrared, "home").unwrap(), "NEC_0x40BF33CC");
    }

    #[test]
    fn test_resolve_reports_unmapped_key() {
        let err = resolve(Channel::Infrared, "play").unwrap_err();
        assert!(matches!(
            &err,
            DeviceError::UnmappedKey { key, channel } if key == "play" && channel == "infrared"
        ));
        assert_eq!(
            err.to_string(),
            "Key 'play' is not mapped for the infrared channel"
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(network_key("Power"), None);
    }

    #[test]
    fn test_registries_have_unique_keys() {
        for (channel, entries) in [(Channel::Network, NETWORK_KEYS), (Channel::Infrared, INFRARED_CODES)] {
            for (i, (name, _)) in entries.iter().enumerate() {
                assert!(
                    !entries[i + 1..].iter().any(|(other, _)| other == name),
                    "duplicate key {} in {} registry",
                    name,
                    channel
                );
            }
        }
    }
}
