//! RelayConfig - Config Loader 输出
//!
//! 描述 tracker、连接监督时序、样本源、发布端点与可观测性配置。
//! 每个 section 都有默认值，空文件即为合法配置。

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::{ContractError, TrackerAddress};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的 relay 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 远端 tracker
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// 连接监督时序
    #[serde(default)]
    pub supervisor: SupervisorConfig,

    /// 样本源
    #[serde(default)]
    pub source: SourceConfig,

    /// Wire 发布端 (bridge 模式)
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// 日志与指标
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// 远端 tracker 标识
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// 设备 (tracker) 名称
    #[serde(default = "default_device")]
    pub device: String,

    /// 追踪服务器主机
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_device() -> String {
    "Drone001".to_string()
}

fn default_host() -> String {
    "192.168.31.100".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            host: default_host(),
        }
    }
}

impl TrackerConfig {
    /// `Device@Host` address
    pub fn address(&self) -> Result<TrackerAddress, ContractError> {
        TrackerAddress::new(self.device.clone(), self.host.clone())
    }
}

/// 连接监督时序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// 初次连接超时秒数 (None = 无限等待)
    #[serde(default = "default_connect_timeout_s")]
    pub connect_timeout_s: Option<u64>,

    /// 等待初次连接时的轮询间隔
    #[serde(default = "default_connect_poll_ms")]
    pub connect_poll_ms: u64,

    /// 重连时的轮询间隔
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// 稳态下每轮迭代的间隔
    #[serde(default = "default_steady_interval_ms")]
    pub steady_interval_ms: u64,

    /// pose 静默超过该秒数后发出告警
    #[serde(default = "default_stale_pose_s")]
    pub stale_pose_s: f64,
}

fn default_connect_timeout_s() -> Option<u64> {
    Some(5)
}

fn default_connect_poll_ms() -> u64 {
    50
}

fn default_reconnect_interval_ms() -> u64 {
    250
}

fn default_steady_interval_ms() -> u64 {
    5
}

fn default_stale_pose_s() -> f64 {
    3.0
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            connect_timeout_s: default_connect_timeout_s(),
            connect_poll_ms: default_connect_poll_ms(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            steady_interval_ms: default_steady_interval_ms(),
            stale_pose_s: default_stale_pose_s(),
        }
    }
}

impl SupervisorConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_s.map(Duration::from_secs)
    }

    pub fn connect_poll(&self) -> Duration {
        Duration::from_millis(self.connect_poll_ms)
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval_ms)
    }

    pub fn steady_interval(&self) -> Duration {
        Duration::from_millis(self.steady_interval_ms)
    }

    /// Staleness 窗口；`stale_pose_s` 超出 `Duration` 范围时饱和
    pub fn stale_pose_after(&self) -> Duration {
        Duration::try_from_secs_f64(self.stale_pose_s).unwrap_or(Duration::MAX)
    }
}

/// 样本源选择
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// 模拟 tracker (无需追踪服务器)
    Mock(MockSourceConfig),
    /// 从运行中的 bridge 接收帧
    Subscribe(SubscribeSourceConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Mock(MockSourceConfig::default())
    }
}

impl SourceConfig {
    /// 类型简称
    pub fn kind(&self) -> &'static str {
        match self {
            SourceConfig::Mock(_) => "mock",
            SourceConfig::Subscribe(_) => "subscribe",
        }
    }
}

/// 模拟 tracker 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSourceConfig {
    /// 每通道采样频率 (Hz)
    #[serde(default = "default_rate_hz")]
    pub rate_hz: f64,

    /// 报告已连接前的延迟
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,

    /// 模拟断线周期 (None = 从不断线)
    #[serde(default)]
    pub dropout_every_ms: Option<u64>,

    /// 每次模拟断线的时长
    #[serde(default = "default_dropout_ms")]
    pub dropout_ms: u64,

    /// 写入每个样本的 sensor id
    #[serde(default)]
    pub sensor: i32,
}

fn default_rate_hz() -> f64 {
    100.0
}

fn default_connect_delay_ms() -> u64 {
    200
}

fn default_dropout_ms() -> u64 {
    1000
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            connect_delay_ms: default_connect_delay_ms(),
            dropout_every_ms: None,
            dropout_ms: default_dropout_ms(),
            sensor: 0,
        }
    }
}

/// 订阅源配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeSourceConfig {
    /// 绑定并接收帧的端点
    #[serde(default = "default_endpoint")]
    pub endpoint: SocketAddr,

    /// 该窗口内收到过帧即视为已连接
    #[serde(default = "default_liveness_ms")]
    pub liveness_ms: u64,
}

fn default_liveness_ms() -> u64 {
    1000
}

impl Default for SubscribeSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            liveness_ms: default_liveness_ms(),
        }
    }
}

/// Wire 发布端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// 订阅方监听的目标端点
    #[serde(default = "default_endpoint")]
    pub endpoint: SocketAddr,

    /// 本地绑定地址
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

/// 默认 wire 端点
pub fn default_endpoint() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5555))
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 0))
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            bind: default_bind(),
        }
    }
}

/// 日志与指标配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// 日志输出格式
    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter 端口 (None = 禁用)
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// 未设置 `RUST_LOG` 时的默认日志级别
    #[serde(default = "default_log_level")]
    pub default_log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            metrics_port: None,
            default_log_level: default_log_level(),
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读的 pretty 格式
    #[default]
    Pretty,
    /// 紧凑单行格式
    Compact,
}
