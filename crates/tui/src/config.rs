use serde::{Deserialize, Serialize};
use slide_remote_channel::ServerConfig;
use std::path::PathBuf;
use std::time::Duration;

pub const SERVER_ENV: &str = "SLIDE_REMOTE_SERVER";
pub const CODE_ENV: &str = "SLIDE_REMOTE_CODE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub domain: String,
    pub web_protocol: String,
    pub socket_protocol: String,
    pub fetch_remote_config: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notice_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            domain: "localhost:3000".to_string(),
            web_protocol: "http".to_string(),
            socket_protocol: "ws".to_string(),
            fetch_remote_config: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_timeout_ms: 3000,
        }
    }
}

impl ServerSettings {
    /// Locally configured endpoints, used until (or instead of) the server's
    /// own `/configs` answer.
    pub fn channel_config(&self) -> ServerConfig {
        ServerConfig {
            domain: self.domain.clone(),
            web_protocol: self.web_protocol.clone(),
            socket_protocol: self.socket_protocol.clone(),
        }
    }
}

impl UiConfig {
    pub fn notice_timeout(&self) -> Duration {
        Duration::from_millis(self.notice_timeout_ms)
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &PathBuf) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn with_server_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.server.base_url = base_url.trim().to_string();
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_server_override(std::env::var(SERVER_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
[server]
domain = "slides.example.com"
socket_protocol = "wss"

[ui]
notice_timeout_ms = 1500
"#,
        )
        .unwrap();

        assert_eq!(config.server.domain, "slides.example.com");
        assert_eq!(config.server.web_protocol, "http");
        assert!(config.server.fetch_remote_config);
        assert_eq!(config.ui.notice_timeout(), Duration::from_millis(1500));

        let server = config.server.channel_config();
        assert_eq!(server.socket_protocol, "wss");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(&PathBuf::from("/nonexistent/slide-remote.toml"));
        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert_eq!(config.ui.notice_timeout_ms, 3000);
    }

    #[test]
    fn server_override_ignores_blank_values() {
        let config = Config::default().with_server_override(Some("  ".to_string()));
        assert_eq!(config.server.base_url, "http://localhost:3000");

        let config = Config::default().with_server_override(Some("https://slides.io".to_string()));
        assert_eq!(config.server.base_url, "https://slides.io");
    }
}
