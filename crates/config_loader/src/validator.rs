//! 配置校验模块
//!
//! 校验规则：
//! - tracker 的 device/host 能组成合法的 `Device@Host` 地址
//! - 连接超时、轮询间隔、staleness 窗口 > 0
//! - staleness 窗口可用 `Duration` 表示
//! - mock 频率 > 0，dropout 短于其周期
//! - 端点端口非 0
//! - 默认日志级别非空

use std::time::Duration;

use contracts::{
    ContractError, MockSourceConfig, RelayConfig, SourceConfig, SubscribeSourceConfig,
};

/// 校验 RelayConfig
///
/// 返回遇到的第一个错误，否则 Ok(())
pub fn validate(config: &RelayConfig) -> Result<(), ContractError> {
    validate_tracker(config)?;
    validate_supervisor(config)?;
    validate_source(config)?;
    validate_publisher(config)?;
    validate_observability(config)?;
    Ok(())
}

fn validate_tracker(config: &RelayConfig) -> Result<(), ContractError> {
    config.tracker.address().map_err(|e| {
        ContractError::config_validation("tracker", e.to_string())
    })?;
    Ok(())
}

fn validate_supervisor(config: &RelayConfig) -> Result<(), ContractError> {
    let supervisor = &config.supervisor;

    if supervisor.connect_timeout_s == Some(0) {
        return Err(ContractError::config_validation(
            "supervisor.connect_timeout_s",
            "connect timeout must be a positive number of seconds",
        ));
    }

    for (field, value) in [
        ("supervisor.connect_poll_ms", supervisor.connect_poll_ms),
        ("supervisor.reconnect_interval_ms", supervisor.reconnect_interval_ms),
        ("supervisor.steady_interval_ms", supervisor.steady_interval_ms),
    ] {
        if value == 0 {
            return Err(ContractError::config_validation(field, "interval must be > 0"));
        }
    }

    if !supervisor.stale_pose_s.is_finite() || supervisor.stale_pose_s <= 0.0 {
        return Err(ContractError::config_validation(
            "supervisor.stale_pose_s",
            format!("stale_pose_s must be > 0, got {}", supervisor.stale_pose_s),
        ));
    }
    if Duration::try_from_secs_f64(supervisor.stale_pose_s).is_err() {
        return Err(ContractError::config_validation(
            "supervisor.stale_pose_s",
            format!("stale_pose_s out of range, got {}", supervisor.stale_pose_s),
        ));
    }

    Ok(())
}

fn validate_source(config: &RelayConfig) -> Result<(), ContractError> {
    match &config.source {
        SourceConfig::Mock(mock) => validate_mock(mock),
        SourceConfig::Subscribe(sub) => validate_subscribe(sub),
    }
}

fn validate_mock(mock: &MockSourceConfig) -> Result<(), ContractError> {
    if !mock.rate_hz.is_finite() || mock.rate_hz <= 0.0 {
        return Err(ContractError::config_validation(
            "source.rate_hz",
            format!("rate_hz must be > 0, got {}", mock.rate_hz),
        ));
    }

    if let Some(every) = mock.dropout_every_ms {
        if every == 0 {
            return Err(ContractError::config_validation(
                "source.dropout_every_ms",
                "dropout period must be > 0",
            ));
        }
        if mock.dropout_ms >= every {
            return Err(ContractError::config_validation(
                "source.dropout_ms",
                format!(
                    "dropout_ms ({}) must be < dropout_every_ms ({every})",
                    mock.dropout_ms
                ),
            ));
        }
    }

    Ok(())
}

fn validate_subscribe(sub: &SubscribeSourceConfig) -> Result<(), ContractError> {
    if sub.endpoint.port() == 0 {
        return Err(ContractError::config_validation(
            "source.endpoint",
            "subscriber endpoint needs a fixed port",
        ));
    }
    if sub.liveness_ms == 0 {
        return Err(ContractError::config_validation(
            "source.liveness_ms",
            "liveness window must be > 0",
        ));
    }
    Ok(())
}

fn validate_publisher(config: &RelayConfig) -> Result<(), ContractError> {
    let publisher = &config.publisher;
    if publisher.endpoint.port() == 0 {
        return Err(ContractError::config_validation(
            "publisher.endpoint",
            "publisher endpoint needs a fixed port",
        ));
    }
    if publisher.endpoint.ip().is_unspecified() {
        return Err(ContractError::config_validation(
            "publisher.endpoint",
            format!("cannot publish to unspecified address {}", publisher.endpoint),
        ));
    }
    Ok(())
}

fn validate_observability(config: &RelayConfig) -> Result<(), ContractError> {
    if config.observability.default_log_level.trim().is_empty() {
        return Err(ContractError::config_validation(
            "observability.default_log_level",
            "log level cannot be empty",
        ));
    }
    Ok(())
}
