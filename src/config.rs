// Configuration utilities for the OSC bridge
//
// The configuration is a single JSON file with a "services" subtree for
// remote service credentials and an "osc" section for the transport.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;
use thiserror::Error;

/// Error types that can occur when loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the JSON configuration file
pub fn load_config(path: &Path) -> Result<Value, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Helper function to get service configuration
///
/// Looks for the service in the "services" subtree first and falls back to
/// a top-level entry with the same name.
pub fn get_service_config<'a>(config: &'a Value, service_name: &str) -> Option<&'a Value> {
    if let Some(services) = config.get("services") {
        if let Some(service_config) = services.get(service_name) {
            debug!("Found {} configuration in services section", service_name);
            return Some(service_config);
        }
    }

    if let Some(service_config) = config.get(service_name) {
        debug!("Found {} configuration at top level", service_name);
        return Some(service_config);
    }

    debug!("No {} configuration found", service_name);
    None
}

/// Socket and file-path settings for the OSC side of the bridge
#[derive(Debug, Clone, PartialEq)]
pub struct OscConfig {
    /// Address the OSC server listens on for avatar parameters
    pub receive_addr: String,
    /// Address outbound parameter updates are sent to
    pub send_addr: String,
    /// File the current track name is written to
    pub now_playing_path: String,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            receive_addr: "127.0.0.1:9001".to_string(),
            send_addr: "127.0.0.1:9000".to_string(),
            now_playing_path: "songConfig.txt".to_string(),
        }
    }
}

impl OscConfig {
    /// Read the osc section, falling back to defaults for missing keys
    pub fn from_json(config: &Value) -> Self {
        let defaults = Self::default();
        let section = config.get("osc");
        let get_str = |key: &str, default: String| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or(default)
        };

        Self {
            receive_addr: get_str("receive_addr", defaults.receive_addr),
            send_addr: get_str("send_addr", defaults.send_addr),
            now_playing_path: get_str("now_playing_path", defaults.now_playing_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_config_in_services_section() {
        let config = json!({
            "services": {
                "spotify": { "access_token": "abc" }
            }
        });
        let spotify = get_service_config(&config, "spotify").unwrap();
        assert_eq!(spotify["access_token"], "abc");
    }

    #[test]
    fn test_service_config_top_level_fallback() {
        let config = json!({ "spotify": { "access_token": "xyz" } });
        let spotify = get_service_config(&config, "spotify").unwrap();
        assert_eq!(spotify["access_token"], "xyz");
    }

    #[test]
    fn test_service_config_missing() {
        assert!(get_service_config(&json!({}), "spotify").is_none());
    }

    #[test]
    fn test_osc_config_defaults() {
        let config = OscConfig::from_json(&json!({}));
        assert_eq!(config, OscConfig::default());
        assert_eq!(config.receive_addr, "127.0.0.1:9001");
        assert_eq!(config.send_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_osc_config_overrides() {
        let config = OscConfig::from_json(&json!({
            "osc": {
                "receive_addr": "0.0.0.0:9101",
                "now_playing_path": "/tmp/np.txt"
            }
        }));
        assert_eq!(config.receive_addr, "0.0.0.0:9101");
        assert_eq!(config.send_addr, "127.0.0.1:9000");
        assert_eq!(config.now_playing_path, "/tmp/np.txt");
    }

    #[test]
    fn test_load_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oscbridge.json");
        fs::write(&path, r#"{ "osc": { "send_addr": "127.0.0.1:9100" } }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(OscConfig::from_json(&config).send_addr, "127.0.0.1:9100");
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/oscbridge.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
