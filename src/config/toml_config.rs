use crate::utils::error::{PullerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 選用的 TOML 設定檔，所有欄位皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub api: Option<ApiSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub registration_key: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PullerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PullerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BLS_REGISTRATION_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PullerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[api]
endpoint = "https://api.example.com/data/"
timeout_seconds = 10
registration_key = "abc123"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let server = config.server.unwrap();
        let api = config.api.unwrap();

        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));
        assert_eq!(api.endpoint.as_deref(), Some("https://api.example.com/data/"));
        assert_eq!(api.timeout_seconds, Some(10));
        assert_eq!(api.registration_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let config = TomlConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert!(config.api.is_none());
        assert_eq!(config.server.unwrap().port, Some(9000));

        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BLS_PULLER_TEST_KEY", "from-env");

        let toml_content = r#"
[api]
registration_key = "${BLS_PULLER_TEST_KEY}"
endpoint = "${BLS_PULLER_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let api = config.api.unwrap();
        assert_eq!(api.registration_key.as_deref(), Some("from-env"));
        assert_eq!(api.endpoint.as_deref(), Some("${BLS_PULLER_TEST_UNSET_VAR}"));

        std::env::remove_var("BLS_PULLER_TEST_KEY");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server]\nport = \"not a number\"\n").unwrap_err();
        assert!(err.to_string().contains("TOML parsing error"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\ntimeout_seconds = 45\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.unwrap().timeout_seconds, Some(45));
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/bls-puller.toml").unwrap_err();
        assert!(matches!(err, PullerError::IoError(_)));
    }
}
