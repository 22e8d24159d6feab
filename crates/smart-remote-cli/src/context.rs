//! Per-invocation setup: config file plus flag overrides, and the session.

use std::path::PathBuf;

use colored::*;
use smart_remote_core::platform::{LocalNetworkInfo, Notifier};
use smart_remote_core::storage::{default_data_dir, ConfigStorage, JsonDeviceStore};
use smart_remote_core::{RemoteConfig, RemoteSession};

use crate::cli::Cli;
use crate::error::CliError;

/// Prints session notifications to stderr so stdout stays parseable.
pub struct CliNotifier {
    json: bool,
}

impl Notifier for CliNotifier {
    fn notify(&self, message: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "notice": message }));
        } else {
            eprintln!("{} {}", "!".yellow().bold(), message);
        }
    }
}

pub struct Context {
    pub storage: ConfigStorage,
    /// File config with command-line overrides applied
    pub config: RemoteConfig,
    pub data_dir: PathBuf,
    pub json: bool,
}

impl Context {
    pub async fn load(cli: &Cli) -> Result<Self, CliError> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()
                .ok_or_else(|| CliError::Other("Could not determine data directory".to_string()))?,
        };

        let storage = ConfigStorage::new(data_dir.clone())?;
        let mut config = storage.load().await?;
        apply_overrides(&mut config, cli)?;

        Ok(Self {
            storage,
            config,
            data_dir,
            json: cli.json,
        })
    }

    pub fn session(&self) -> Result<RemoteSession, CliError> {
        let store = JsonDeviceStore::new(self.data_dir.clone())?;
        let session = RemoteSession::new(
            self.config.clone(),
            Box::new(store),
            Box::new(CliNotifier { json: self.json }),
            Box::new(LocalNetworkInfo),
        )?;
        Ok(session)
    }
}

fn apply_overrides(config: &mut RemoteConfig, cli: &Cli) -> Result<(), CliError> {
    if let Some(bridge) = &cli.bridge {
        config.bridge_address = bridge.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.discovery_timeout_ms = timeout;
    }
    config.fallback_prefixes.extend(cli.subnets.iter().cloned());

    config
        .validate()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_overrides_apply() {
        let cli = parse(&[
            "smart-remote",
            "status",
            "--bridge",
            "10.0.0.7:8080",
            "--timeout",
            "1500",
            "--subnet",
            "10.0.1",
        ]);
        let mut config = RemoteConfig {
            fallback_prefixes: vec!["192.168.0".to_string()],
            ..RemoteConfig::default()
        };

        apply_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.bridge_address, "10.0.0.7:8080");
        assert_eq!(config.discovery_timeout_ms, 1500);
        assert_eq!(config.fallback_prefixes, vec!["192.168.0", "10.0.1"]);
    }

    #[test]
    fn test_bad_subnet_is_invalid_argument() {
        let cli = parse(&["smart-remote", "status", "--subnet", "300.1"]);
        let mut config = RemoteConfig::default();

        assert!(matches!(
            apply_overrides(&mut config, &cli),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.json"),
            r#"{"bridgeAddress": "10.0.0.9"}"#,
        )
        .unwrap();

        let dir = tmp.path().to_str().unwrap();
        let cli = parse(&["smart-remote", "status", "--data-dir", dir]);
        let ctx = Context::load(&cli).await.unwrap();

        assert_eq!(ctx.config.bridge_address, "10.0.0.9");
        assert!(ctx.session().is_ok());
    }
}
