//! # Observability
//!
//! Tracing + Prometheus metrics 可观测性模块
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON / Pretty / Compact)
//! - Prometheus metrics 导出
//! - Relay 指标记录与在线统计
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{init_with_config, ObservabilityConfig};
//!
//! init_with_config(&ObservabilityConfig::default())?;
//! observability::record_sample_received(SampleKind::Pose);
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use contracts::{LogFormat, ObservabilityConfig};

// 重导出
pub use crate::metrics::{
    record_channel_frequency, record_connection_state, record_decode_mismatch,
    record_frame_published, record_sample_interval, record_sample_received, record_sink_error,
    record_staleness_warning,
    RunningStats, StatsSummary,
};

/// 使用默认配置初始化 (pretty 日志，不启动 exporter)
pub fn init() -> Result<()> {
    init_with_config(&ObservabilityConfig::default())
}

/// 初始化 tracing，配置了端口时同时启动 Prometheus exporter
///
/// `RUST_LOG` 优先于 `default_log_level`
pub fn init_with_config(config: &ObservabilityConfig) -> Result<()> {
    // 1. 初始化 Tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_log_level))
        .with_context(|| format!("Invalid log level '{}'", config.default_log_level))?;

    match config.log_format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer().pretty().with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer().compact().with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
    }

    // 2. 初始化 Prometheus Exporter (如果启用)
    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// 仅初始化 Prometheus exporter (tracing 由调用方负责)
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
