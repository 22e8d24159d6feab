//! SSDP search requests and reply classification.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::types::DeviceKind;

/// Standard SSDP multicast group.
pub const SSDP_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// Standard SSDP port.
pub const SSDP_PORT: u16 = 1900;

/// Search targets, sent one request each.
pub const SEARCH_TARGETS: &[&str] = &[
    "roku:ecp",
    "upnp:rootdevice",
    "urn:dial-multiscreen-org:service:dial:1",
    "ssdp:all",
];

/// Maximum wait advertised to responders, in seconds.
const MX_SECONDS: u8 = 2;

pub fn multicast_target() -> SocketAddrV4 {
    SocketAddrV4::new(SSDP_ADDR, SSDP_PORT)
}

/// Build an `M-SEARCH` request for one search target.
pub fn search_request(target: &str) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}:{}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\
         \r\n",
        SSDP_ADDR, SSDP_PORT, MX_SECONDS, target
    )
}

/// Parse reply headers into a map keyed by lowercased header name.
///
/// Lines without a `:` (the status line, garbage) are skipped. Repeated
/// headers keep their first value.
pub fn parse_headers(reply: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in reply.split("\r\n").flat_map(|l| l.split('\n')) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        headers
            .entry(key)
            .or_insert_with(|| value.trim().to_string());
    }

    headers
}

/// What a reply's headers identify the responder as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// ECP television
    NetworkTv,
    /// DIAL / Android TV receiver
    Dial,
    /// IR bridge answering SSDP; found by the subnet scanner instead
    InfraredBridge,
    /// Some other device publishing a description URL
    Generic,
}

impl Signature {
    /// Kind reported for this signature, `None` when it is excluded.
    pub fn kind(&self) -> Option<DeviceKind> {
        match self {
            Signature::NetworkTv => Some(DeviceKind::NetworkTv),
            Signature::Dial | Signature::Generic => Some(DeviceKind::GenericSmartDevice),
            Signature::InfraredBridge => None,
        }
    }

    /// Label used when no friendly name can be fetched.
    pub fn fallback_name(&self, ip: &str) -> String {
        match self {
            Signature::NetworkTv => format!("Roku TV ({})", ip),
            Signature::Dial => format!("Android TV ({})", ip),
            Signature::InfraredBridge => format!("IR Bridge ({})", ip),
            Signature::Generic => format!("Smart TV ({})", ip),
        }
    }
}

/// Classify a reply. Checks run in priority order; `None` means the reply
/// carried nothing worth reporting.
pub fn classify(headers: &HashMap<String, String>) -> Option<Signature> {
    let field = |name: &str| {
        headers
            .get(name)
            .map(|v| v.to_lowercase())
            .unwrap_or_default()
    };
    let server = field("server");
    let location = field("location");
    let st = field("st");

    if server.contains("roku") || location.contains("roku") {
        return Some(Signature::NetworkTv);
    }
    if server.contains("android") || server.contains("dial") || st.contains("dial") {
        return Some(Signature::Dial);
    }
    if ["esp32", "ir-bridge"]
        .iter()
        .any(|sig| server.contains(sig) || location.contains(sig))
    {
        return Some(Signature::InfraredBridge);
    }
    if !location.is_empty() {
        return Some(Signature::Generic);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(reply: &str) -> HashMap<String, String> {
        parse_headers(reply)
    }

    #[test]
    fn test_search_request_format() {
        let req = search_request("roku:ecp");
        assert!(req.starts_with("M-SEARCH * HTTP/1.1\r\n"));
        assert!(req.contains("HOST: 239.255.255.250:1900\r\n"));
        assert!(req.contains("MAN: \"ssdp:discover\"\r\n"));
        assert!(req.contains("MX: 2\r\n"));
        assert!(req.ends_with("ST: roku:ecp\r\n\r\n"));
    }

    #[test]
    fn test_parse_headers_case_insensitive() {
        let reply = "HTTP/1.1 200 OK\r\nCache-Control: max-age=3600\r\nST: roku:ecp\r\nLOCATION: http://192.168.1.20:8060/\r\nServer: Roku/9.0 UPnP/1.0\r\n\r\n";
        let map = headers(reply);
        assert_eq!(map.get("st").map(String::as_str), Some("roku:ecp"));
        // Only the first colon splits
        assert_eq!(
            map.get("location").map(String::as_str),
            Some("http://192.168.1.20:8060/")
        );
        assert_eq!(map.get("server").map(String::as_str), Some("Roku/9.0 UPnP/1.0"));
        assert!(!map.contains_key("http/1.1 200 ok"));
    }

    #[test]
    fn test_parse_headers_skips_malformed_lines() {
        let map = headers("garbage line\r\n: no key\r\nSERVER: Linux\r\n\u{0}\u{1}");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("server").map(String::as_str), Some("Linux"));
    }

    #[test]
    fn test_roku_server_is_network_tv() {
        for server in ["Roku/9.0", "roku UPnP/1.0", "Roku/12.5.0 UPnP/1.0 ESP32"] {
            let map = headers(&format!("SERVER: {}\r\n", server));
            let sig = classify(&map);
            assert_eq!(sig, Some(Signature::NetworkTv), "server {}", server);
            assert_eq!(sig.and_then(|s| s.kind()), Some(DeviceKind::NetworkTv));
        }
    }

    #[test]
    fn test_roku_location_is_network_tv() {
        let map = headers("LOCATION: http://roku-tv.local:8060/\r\n");
        assert_eq!(classify(&map), Some(Signature::NetworkTv));
    }

    #[test]
    fn test_dial_signatures() {
        let map = headers("SERVER: Linux/4.9 UPnP/1.0 Android/11\r\n");
        assert_eq!(classify(&map), Some(Signature::Dial));

        let map = headers("ST: urn:dial-multiscreen-org:service:dial:1\r\nLOCATION: http://10.0.0.9:8008/ssdp/device-desc.xml\r\n");
        assert_eq!(classify(&map), Some(Signature::Dial));
        assert_eq!(
            Signature::Dial.kind(),
            Some(DeviceKind::GenericSmartDevice)
        );
    }

    #[test]
    fn test_ir_bridge_excluded() {
        let map = headers("SERVER: ESP32 ir-bridge/1.0\r\nLOCATION: http://192.168.1.100/desc.xml\r\n");
        let sig = classify(&map);
        assert_eq!(sig, Some(Signature::InfraredBridge));
        assert_eq!(sig.and_then(|s| s.kind()), None);
    }

    #[test]
    fn test_generic_requires_location() {
        let map = headers("SERVER: Linux UPnP/1.0\r\nLOCATION: http://192.168.1.30:49152/desc.xml\r\n");
        assert_eq!(classify(&map), Some(Signature::Generic));

        let map = headers("SERVER: Linux UPnP/1.0\r\n");
        assert_eq!(classify(&map), None);
    }

    #[test]
    fn test_fallback_names() {
        assert_eq!(
            Signature::NetworkTv.fallback_name("192.168.1.20"),
            "Roku TV (192.168.1.20)"
        );
        assert_eq!(
            Signature::Generic.fallback_name("192.168.1.30"),
            "Smart TV (192.168.1.30)"
        );
    }
}
