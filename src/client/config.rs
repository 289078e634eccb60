use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::time::Duration;

/// Default REST API base URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080/api";

/// Default push-channel base URL
const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8080/api/ws";

/// Delay before re-dialing a dropped push-channel connection
const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Interval between outgoing keep-alive pings
const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(4);

/// Client configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
    reconnect_delay: Duration,
    heartbeat_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let server_url =
            std::env::var("KANBAN_API_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let ws_url =
            std::env::var("KANBAN_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string());
        let app = AppConfig::builder()
            .server_url(server_url)
            .ws_url(ws_url)
            .build()
            .expect("default app config is valid");
        Self {
            app,
            token: None,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self {
            app,
            token: None,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        })
    }

    /// Set the bearer token attached to persistence calls
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn ws_url(&self) -> &str {
        self.app.ws_url.as_deref().unwrap_or(DEFAULT_WS_URL)
    }

    /// Push-channel topic for one board's card events
    pub fn board_topic_url(&self, board_id: i64) -> String {
        format!("{}/topic/board/{}", self.ws_url(), board_id)
    }

    /// Push-channel topic announcing board creation
    pub fn boards_topic_url(&self) -> String {
        format!("{}/topic/boards", self.ws_url())
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }

    /// Override the reconnect delay (mainly for tests)
    pub fn set_reconnect_delay(&mut self, delay: Duration) {
        self.reconnect_delay = delay;
    }

    /// Override the heartbeat interval (mainly for tests)
    pub fn set_heartbeat_interval(&mut self, interval: Duration) {
        self.heartbeat_interval = interval;
    }
}
