//! Relay 指标收集模块
//!
//! 对 `metrics` facade 的薄封装，指标名与标签集中定义在此处。
//! 未安装 recorder 时所有调用均为空操作。

use contracts::{ConnectionState, SampleKind};
use metrics::{counter, gauge, histogram};

/// 记录 relay loop 路由的一个样本
pub fn record_sample_received(kind: SampleKind) {
    counter!("tracker_relay_samples_received_total", "kind" => kind.as_str()).increment(1);
}

/// 记录交给传输层的一帧
pub fn record_frame_published(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("tracker_relay_frames_published_total", "status" => status).increment(1);
}

/// 记录一个被丢弃的 wire 帧
pub fn record_decode_mismatch(reason: &'static str) {
    counter!("tracker_relay_decode_mismatches_total", "reason" => reason).increment(1);
}

/// 记录当前连接状态
pub fn record_connection_state(state: ConnectionState) {
    gauge!("tracker_relay_connection_state").set(f64::from(state.code()));
}

/// 记录通道的平滑频率
pub fn record_channel_frequency(kind: SampleKind, hz: f64) {
    gauge!("tracker_relay_channel_frequency_hz", "kind" => kind.as_str()).set(hz);
}

/// 记录通道相邻两个样本的间隔
pub fn record_sample_interval(kind: SampleKind, seconds: f64) {
    histogram!("tracker_relay_sample_interval_seconds", "kind" => kind.as_str()).record(seconds);
}

/// 记录一次 sink 写入失败
pub fn record_sink_error(sink_name: &str) {
    counter!(
        "tracker_relay_sink_errors_total",
        "sink" => sink_name.to_string()
    )
    .increment(1);
}

/// 记录一次 pose 超时告警
pub fn record_staleness_warning() {
    counter!("tracker_relay_stale_pose_warnings_total").increment(1);
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计 (Welford 算法)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加样本
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 样本方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(value);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        assert_eq!(RunningStats::default().summary().to_string(), "N/A");

        let mut stats = RunningStats::default();
        stats.push(0.01);
        stats.push(0.01);
        let output = stats.summary().to_string();
        assert!(output.contains("mean=0.010"));
        assert!(output.contains("(n=2)"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_sample_received(SampleKind::Twist);
        record_frame_published(false);
        record_decode_mismatch("unknown_tag");
        record_connection_state(ConnectionState::Reconnecting);
        record_channel_frequency(SampleKind::Pose, 100.0);
        record_sink_error("status");
        record_staleness_warning();
    }
}
