use super::toml_config::TomlConfig;
use super::Settings;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bls-puller")]
#[command(about = "Web form for pulling time series from the BLS public API")]
pub struct CliConfig {
    #[arg(long, help = "Host to bind (default: 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to bind (default: 5000)")]
    pub port: Option<u16>,

    #[arg(long, help = "Statistics API endpoint")]
    pub api_endpoint: Option<String>,

    #[arg(long, help = "Outbound request timeout in seconds (default: 30)")]
    pub timeout_seconds: Option<u64>,

    #[arg(
        long,
        env = "BLS_REGISTRATION_KEY",
        hide_env_values = true,
        help = "Registration key used to pre-fill the form"
    )]
    pub registration_key: Option<String>,

    #[arg(long, help = "Optional TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 優先順序：命令列/環境變數 > 設定檔 > 預設值
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file: {}", path.display());
            settings.apply_toml(TomlConfig::from_file(path)?);
        }

        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(endpoint) = &self.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            settings.timeout_seconds = timeout_seconds;
        }
        if let Some(registration_key) = &self.registration_key {
            settings.registration_key = registration_key.clone();
        }

        Ok(settings)
    }
}
