//! # Wire
//!
//! Binary framing of tracker samples and the byte-pipe transport carrying them.
//!
//! ## Frame layout
//!
//! `[tag:1][payload]`, every field fixed-width little-endian in declared order:
//!
//! | Tag | Kind | Payload | Frame |
//! |-----|------|---------|-------|
//! | 0x01 | Pose | sensor i32, secs i32, micros i32, position 3×f64, orientation 4×f64 | 69 |
//! | 0x02 | Twist | sensor i32, secs i32, micros i32, linear 3×f64, delta rotation 4×f64, dt f64 | 77 |
//! | 0x03 | Accel | same as Twist | 77 |
//!
//! There is no length prefix: one transport message carries exactly one frame.
//!
//! ## Endpoint roles
//!
//! The endpoint (default `127.0.0.1:5555`) is bound by the receiving side
//! ([`UdpSubscriber`]) and targeted by the sending side ([`UdpPublisher`]). This is the
//! reverse of a bind-and-accept publisher: UDP has no dial step, so the socket that owns
//! the well-known address has to be the one that receives. A publisher with no bound
//! subscriber still starts; its datagrams are dropped.

mod codec;
mod decoder;
mod metrics;
pub mod transport;

pub use codec::{decode, encode, encode_into, frame_len, DecodeMismatch, MOTION_FRAME_LEN, POSE_FRAME_LEN};
pub use decoder::FrameDecoder;
pub use metrics::{PublishMetrics, PublishMetricsSnapshot};
pub use transport::udp::{UdpPublisher, UdpSubscriber};
