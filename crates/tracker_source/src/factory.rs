//! Source 工厂 - 按配置构建 `SampleSource`

use contracts::{SampleSource, SourceConfig, TrackerAddress};
use tracing::info;

use crate::error::Result;
use crate::mock_source::MockTrackerSource;
use crate::subscriber_source::SubscriberSource;

/// 按 `config` 构建样本源，以 `address` 作为标签
///
/// # Errors
/// 无法构建时返回 `SourceError::Init` (参数非法、端点已被占用等)
pub async fn build_source(
    config: &SourceConfig,
    address: &TrackerAddress,
) -> Result<Box<dyn SampleSource>> {
    let label = address.to_string();

    let source: Box<dyn SampleSource> = match config {
        SourceConfig::Mock(mock) => Box::new(MockTrackerSource::new(label, mock.clone())?),
        SourceConfig::Subscribe(sub) => Box::new(SubscriberSource::bind(label, sub).await?),
    };

    info!(source = %source.label(), kind = config.kind(), "Tracking source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceError;
    use contracts::{MockSourceConfig, SubscribeSourceConfig};

    fn address() -> TrackerAddress {
        "Drone001@localhost".parse().unwrap()
    }

    #[tokio::test]
    async fn test_build_mock() {
        let source = build_source(&SourceConfig::default(), &address())
            .await
            .unwrap();
        assert_eq!(source.label(), "Drone001@localhost");
        assert!(!source.connected());
    }

    #[tokio::test]
    async fn test_build_subscriber() {
        let config = SourceConfig::Subscribe(SubscribeSourceConfig {
            endpoint: "127.0.0.1:0".parse().unwrap(),
            liveness_ms: 1000,
        });
        let source = build_source(&config, &address()).await.unwrap();
        assert_eq!(source.label(), "Drone001@localhost");
    }

    #[tokio::test]
    async fn test_invalid_mock_is_init_error() {
        let config = SourceConfig::Mock(MockSourceConfig {
            rate_hz: -1.0,
            ..Default::default()
        });
        let err = build_source(&config, &address()).await.err().unwrap();
        assert!(matches!(err, SourceError::Init { .. }));
        assert!(err.to_string().contains("Drone001@localhost"));
    }
}
