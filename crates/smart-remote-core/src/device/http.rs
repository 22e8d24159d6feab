//! HTTP plumbing shared by the controllers and scanners.
//!
//! Every request carries its own timeout; bodies are only read where the
//! caller needs them.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};

use crate::error::DeviceError;

/// Upper bound for any single request made through a client from here.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a client for LAN devices. Proxies are bypassed since every target
/// is on the local segment.
pub fn build_client() -> Result<Client, DeviceError> {
    Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .no_proxy()
        .build()
        .map_err(|e| DeviceError::Client(e.to_string()))
}

async fn request(
    client: &Client,
    method: Method,
    url: &str,
    ip: &str,
    timeout: Duration,
) -> Result<reqwest::Response, DeviceError> {
    let response = client
        .request(method, url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                DeviceError::Offline { ip: ip.to_string() }
            } else {
                DeviceError::RequestFailed {
                    ip: ip.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

    if !response.status().is_success() {
        return Err(DeviceError::BadStatus {
            ip: ip.to_string(),
            status: response.status().as_u16(),
        });
    }

    Ok(response)
}

/// GET `url`, returning the body of a 2xx response.
pub async fn get_text(
    client: &Client,
    url: &str,
    ip: &str,
    timeout: Duration,
) -> Result<String, DeviceError> {
    let response = request(client, Method::GET, url, ip, timeout).await?;
    response.text().await.map_err(|e| DeviceError::RequestFailed {
        ip: ip.to_string(),
        message: format!("Failed to read body: {}", e),
    })
}

/// GET `url`, caring only about the status.
pub async fn get_status(
    client: &Client,
    url: &str,
    ip: &str,
    timeout: Duration,
) -> Result<(), DeviceError> {
    request(client, Method::GET, url, ip, timeout).await.map(|_| ())
}

/// POST to `url` with an empty body, caring only about the status.
pub async fn post_empty(
    client: &Client,
    url: &str,
    ip: &str,
    timeout: Duration,
) -> Result<(), DeviceError> {
    request(client, Method::POST, url, ip, timeout).await.map(|_| ())
}

/// GET a bridge heartbeat endpoint. Only a plain 200 counts; other 2xx
/// answers come from something that isn't a bridge.
pub async fn get_heartbeat(
    client: &Client,
    url: &str,
    ip: &str,
    timeout: Duration,
) -> Result<String, DeviceError> {
    let response = request(client, Method::GET, url, ip, timeout).await?;
    if response.status() != StatusCode::OK {
        return Err(DeviceError::BadStatus {
            ip: ip.to_string(),
            status: response.status().as_u16(),
        });
    }
    response.text().await.map_err(|e| DeviceError::RequestFailed {
        ip: ip.to_string(),
        message: format!("Failed to read body: {}", e),
    })
}
