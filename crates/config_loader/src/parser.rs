//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON 格式

use contracts::{ContractError, RelayConfig};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 根据文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析 TOML 配置
pub fn parse_toml(content: &str) -> Result<RelayConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 JSON 配置
pub fn parse_json(content: &str) -> Result<RelayConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 按指定格式解析配置
pub fn parse(content: &str, format: ConfigFormat) -> Result<RelayConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SourceConfig;

    #[test]
    fn test_parse_toml_sections() {
        let content = r#"
[tracker]
device = "Tracker0"
host = "localhost"

[supervisor]
connect_timeout_s = 10
reconnect_interval_ms = 500

[source]
kind = "mock"
rate_hz = 50.0
dropout_every_ms = 4000
"#;
        let config = parse_toml(content).unwrap();
        assert_eq!(config.tracker.device, "Tracker0");
        assert_eq!(config.supervisor.connect_timeout_s, Some(10));
        assert_eq!(config.supervisor.reconnect_interval_ms, 500);
        // 未设置的字段保持默认值
        assert_eq!(config.supervisor.steady_interval_ms, 5);
        match config.source {
            SourceConfig::Mock(mock) => {
                assert_eq!(mock.rate_hz, 50.0);
                assert_eq!(mock.dropout_every_ms, Some(4000));
                assert_eq!(mock.dropout_ms, 1000);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = parse_toml("").unwrap();
        assert_eq!(config.tracker.device, "Drone001");
        assert_eq!(config.publisher.endpoint.to_string(), "127.0.0.1:5555");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "tracker": { "device": "Drone002" },
            "publisher": { "endpoint": "10.0.0.5:6000" },
            "observability": { "log_format": "json", "metrics_port": 9000 }
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.tracker.device, "Drone002");
        assert_eq!(config.tracker.host, "192.168.31.100");
        assert_eq!(config.publisher.endpoint.port(), 6000);
        assert_eq!(config.observability.metrics_port, Some(9000));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_parse_unknown_source_kind() {
        let result = parse_toml("[source]\nkind = \"carrier_pigeon\"\n");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
