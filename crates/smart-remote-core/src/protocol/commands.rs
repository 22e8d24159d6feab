//! Request builders for the two control protocols.
//!
//! Network TVs speak ECP over HTTP on port 8060. IR bridges expose a tiny
//! HTTP API: `GET /ping` answers `pong`, `GET /ir?code=...` fires a code.

/// Default ECP port on network TVs.
pub const TV_PORT: u16 = 8060;

/// Heartbeat path served by IR bridges.
pub const HEARTBEAT_PATH: &str = "/ping";

/// Token an IR bridge puts in its heartbeat body.
pub const HEARTBEAT_TOKEN: &str = "pong";

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// ECP URL builders. `addr` is `host:port`.
pub struct EcpCommands;

impl EcpCommands {
    /// Device info query (GET)
    pub fn device_info(addr: &str) -> String {
        format!("http://{}/query/device-info", addr)
    }

    /// Key press (POST)
    pub fn keypress(addr: &str, key: &str) -> String {
        format!("http://{}/keypress/{}", addr, encode_component(key))
    }

    /// App launch (POST)
    pub fn launch(addr: &str, app_id: &str) -> String {
        format!("http://{}/launch/{}", addr, encode_component(app_id))
    }
}

/// IR bridge URL builders. `addr` is `host` or `host:port`.
pub struct BridgeCommands;

impl BridgeCommands {
    /// Heartbeat (GET)
    pub fn ping(addr: &str) -> String {
        format!("http://{}{}", addr, HEARTBEAT_PATH)
    }

    /// Fire an IR code (GET)
    pub fn ir(addr: &str, code: &str) -> String {
        format!("http://{}/ir?code={}", addr, encode_component(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecp_urls() {
        assert_eq!(
            EcpCommands::device_info("192.168.1.20:8060"),
            "http://192.168.1.20:8060/query/device-info"
        );
        assert_eq!(
            EcpCommands::keypress("192.168.1.20:8060", "VolumeUp"),
            "http://192.168.1.20:8060/keypress/VolumeUp"
        );
        assert_eq!(
            EcpCommands::launch("192.168.1.20:8060", "12"),
            "http://192.168.1.20:8060/launch/12"
        );
    }

    #[test]
    fn test_bridge_urls() {
        assert_eq!(BridgeCommands::ping("192.168.1.100"), "http://192.168.1.100/ping");
        assert_eq!(
            BridgeCommands::ir("192.168.1.100:8080", "NEC_0x40BF12ED"),
            "http://192.168.1.100:8080/ir?code=NEC_0x40BF12ED"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Lit_a"), "Lit_a");
        assert_eq!(encode_component("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_component("x&y=z"), "x%26y%3Dz");
    }
}
