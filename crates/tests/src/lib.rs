//! # Integration Tests
//!
//! 跨 crate 集成测试与端到端测试
//!
//! 覆盖：
//! - Contract 冒烟测试
//! - Mock source -> bridge -> UDP -> subscriber 往返
//! - Bridge -> subscriber source -> 状态视图
//! - 初次连接超时的退出码

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_config_round_trip_through_loader() {
        let config = contracts::RelayConfig::default();
        let toml = config_loader::ConfigLoader::to_toml(&config).unwrap();
        let parsed =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(parsed.supervisor, config.supervisor);
        assert_eq!(parsed.source, config.source);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::{self, Write};
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use contracts::{
        MockSourceConfig, SampleKind, SampleSource, ShutdownFlag, SourceConfig,
        SubscribeSourceConfig, SupervisorConfig, TrackerAddress, TrackerSample,
    };
    use relay::{PublishSink, RelayLoop, StatusSink};
    use tracker_relay_cli::CliError;
    use tracker_source::{MockTrackerSource, SubscriberSource};
    use wire::{FrameDecoder, UdpPublisher, UdpSubscriber};

    /// Wraps a source and records every sample handed to the relay loop
    struct RecordingSource<S> {
        inner: S,
        polled: Arc<Mutex<Vec<TrackerSample>>>,
    }

    impl<S: SampleSource> SampleSource for RecordingSource<S> {
        fn label(&self) -> &str {
            self.inner.label()
        }

        fn pump(&mut self) {
            self.inner.pump()
        }

        fn connected(&self) -> bool {
            self.inner.connected()
        }

        fn poll(&mut self, kind: SampleKind) -> Option<TrackerSample> {
            let sample = self.inner.poll(kind)?;
            self.polled.lock().unwrap().push(sample);
            Some(sample)
        }

        fn release(&mut self) {
            self.inner.release()
        }
    }

    /// Writer shared with the test after the sink is moved into the loop
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn loopback() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    fn mock_source() -> MockTrackerSource {
        MockTrackerSource::new(
            "Drone001@localhost",
            MockSourceConfig {
                rate_hz: 100.0,
                connect_delay_ms: 0,
                ..MockSourceConfig::default()
            },
        )
        .unwrap()
    }

    fn stop_after(shutdown: &ShutdownFlag, after: Duration) {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            shutdown.trigger();
        });
    }

    /// 端到端测试: MockTrackerSource -> PublishSink -> UDP -> FrameDecoder
    ///
    /// bridge 路由的每个样本都能到达并解码为相同的样本
    #[tokio::test]
    async fn test_e2e_bridge_round_trip() {
        let mut subscriber = UdpSubscriber::bind(loopback()).await.unwrap();
        let endpoint = subscriber.local_addr().unwrap();
        let publisher = UdpPublisher::bind(loopback(), endpoint).await.unwrap();

        let polled = Arc::new(Mutex::new(Vec::new()));
        let source = RecordingSource {
            inner: mock_source(),
            polled: polled.clone(),
        };

        let shutdown = ShutdownFlag::new();
        stop_after(&shutdown, Duration::from_millis(300));
        let bridge = tokio::spawn(
            RelayLoop::new(
                source,
                PublishSink::new(publisher),
                &SupervisorConfig::default(),
                shutdown,
            )
            .run(),
        );

        let mut decoder = FrameDecoder::new();
        let mut received = Vec::new();
        while !bridge.is_finished() {
            if let Ok(Ok(frame)) =
                tokio::time::timeout(Duration::from_millis(50), subscriber.recv_frame()).await
            {
                received.extend(decoder.decode(frame));
            }
        }
        let stats = bridge.await.unwrap().unwrap();

        // Drain datagrams still queued on the socket
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Ok(Some(frame)) = subscriber.try_recv_frame() {
            received.extend(decoder.decode(frame));
        }

        let polled = polled.lock().unwrap().clone();
        assert!(!polled.is_empty());
        assert_eq!(stats.total_samples(), polled.len() as u64);
        assert_eq!(stats.sink_errors, 0);
        assert_eq!(received, polled);
        assert_eq!(decoder.mismatched(), 0);
        for kind in SampleKind::ALL {
            assert!(stats.samples_of(kind) > 0, "no {kind} samples");
        }
    }

    /// 端到端测试: bridge -> UDP -> SubscriberSource -> StatusSink
    #[tokio::test]
    async fn test_e2e_bridge_to_monitor() {
        let subscribe = SubscriberSource::bind(
            "Drone001@localhost",
            &SubscribeSourceConfig {
                endpoint: loopback(),
                liveness_ms: 1000,
            },
        )
        .await
        .unwrap();
        let endpoint = subscribe.local_addr().unwrap();
        let publisher = UdpPublisher::bind(loopback(), endpoint).await.unwrap();

        let shutdown = ShutdownFlag::new();
        stop_after(&shutdown, Duration::from_millis(600));

        let buf = SharedBuf::default();
        let status = StatusSink::new("Drone001@localhost", buf.clone(), Duration::from_millis(100));
        let supervisor = SupervisorConfig {
            connect_timeout_s: Some(5),
            ..SupervisorConfig::default()
        };

        let (bridge, monitor) = tokio::join!(
            RelayLoop::new(
                mock_source(),
                PublishSink::new(publisher),
                &supervisor,
                shutdown.clone()
            )
            .run(),
            RelayLoop::new(subscribe, status, &supervisor, shutdown).run(),
        );

        let bridge = bridge.unwrap();
        let monitor = monitor.unwrap();
        assert!(bridge.total_samples() > 0);
        assert!(monitor.samples_of(SampleKind::Pose) > 0);
        assert_eq!(monitor.losses, 0);

        let text = buf.text();
        assert!(text.contains("Connection : Connected to Drone001@localhost (listening)"));
        assert!(text.contains("Tracker    : Drone001@localhost"));
        assert!(text.contains("Acceleration"));
        assert!(text.contains(" Hz"));
        assert!(text.contains("Connection : Shutting down"));
    }

    /// A malformed datagram is dropped; the next frame still decodes
    #[tokio::test]
    async fn test_e2e_mismatched_frame_skipped() {
        let mut subscriber = UdpSubscriber::bind(loopback()).await.unwrap();
        let sender = tokio::net::UdpSocket::bind(loopback()).await.unwrap();
        let endpoint = subscriber.local_addr().unwrap();

        let sample = mock_source().samples_at(1.0)[0];
        sender.send_to(&[0x7f, 1, 2, 3], endpoint).await.unwrap();
        sender
            .send_to(&wire::encode(&sample), endpoint)
            .await
            .unwrap();

        let mut decoder = FrameDecoder::new();
        let first = subscriber.recv_frame().await.unwrap();
        assert!(decoder.decode(first).is_none());
        let second = subscriber.recv_frame().await.unwrap();
        assert_eq!(decoder.decode(second), Some(sample));

        assert_eq!(decoder.mismatched(), 1);
        assert_eq!(decoder.decoded(), 1);
    }

    /// No bridge running: the monitor gives up after its timeout with exit status 2
    #[tokio::test]
    async fn test_e2e_connect_timeout_exit_status() {
        let address: TrackerAddress = "Drone001@localhost".parse().unwrap();
        let config = SourceConfig::Subscribe(SubscribeSourceConfig {
            endpoint: loopback(),
            liveness_ms: 1000,
        });
        let source = tracker_source::build_source(&config, &address)
            .await
            .unwrap();

        let buf = SharedBuf::default();
        let sink = StatusSink::new(address.to_string(), buf.clone(), Duration::from_millis(200));
        let supervisor = SupervisorConfig {
            connect_timeout_s: Some(1),
            ..SupervisorConfig::default()
        };

        let err = RelayLoop::new(source, sink, &supervisor, ShutdownFlag::new())
            .run()
            .await
            .unwrap_err();

        let err = CliError::from(err);
        assert_eq!(err.exit_status(), 2);
        assert_eq!(
            buf.text()
                .matches("Connection failed: timeout after 1s")
                .count(),
            1
        );
    }
}
