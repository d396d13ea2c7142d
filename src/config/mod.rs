#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::client::BLS_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// 啟動時解析完成的設定，之後不再讀取環境變數
#[derive(Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    /// 只用來預填 GET 表單
    pub registration_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_endpoint: BLS_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            registration_key: String::new(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .field(
                "registration_key",
                &if self.registration_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .finish()
    }
}

impl Settings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 以設定檔內容覆蓋目前的值
    pub fn apply_toml(&mut self, config: TomlConfig) {
        if let Some(server) = config.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }
        if let Some(api) = config.api {
            if let Some(endpoint) = api.endpoint {
                self.api_endpoint = endpoint;
            }
            if let Some(timeout_seconds) = api.timeout_seconds {
                self.timeout_seconds = timeout_seconds;
            }
            if let Some(registration_key) = api.registration_key {
                self.registration_key = registration_key;
            }
        }
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_url("api.endpoint", &self.api_endpoint)?;
        validate_range(
            "api.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}
