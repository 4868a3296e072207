//! Sample frame encoding/decoding

use bytes::{Buf, BufMut, Bytes, BytesMut};
use contracts::{Accel, Pose, SampleKind, Timestamp, TrackerSample, Twist};
use thiserror::Error;

/// sensor (i32) + secs (i32) + micros (i32)
const HEADER_LEN: usize = 4 + 4 + 4;

/// Pose frame: tag + header + position + orientation
pub const POSE_FRAME_LEN: usize = 1 + HEADER_LEN + 3 * 8 + 4 * 8;

/// Twist/Accel frame: tag + header + vector + delta rotation + dt
pub const MOTION_FRAME_LEN: usize = 1 + HEADER_LEN + 3 * 8 + 4 * 8 + 8;

/// Errors that make a received frame unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeMismatch {
    /// Zero-length message
    #[error("empty frame")]
    Empty,

    /// Tag byte not assigned to any sample kind
    #[error("unknown frame tag: 0x{0:02X}")]
    UnknownTag(u8),

    /// Fewer bytes than the tag requires
    #[error("{kind} frame too short: need {needed} bytes, have {available}")]
    Truncated {
        kind: SampleKind,
        needed: usize,
        available: usize,
    },

    /// More bytes than the tag allows
    #[error("{kind} frame too long: expected {expected} bytes, have {available}")]
    TrailingBytes {
        kind: SampleKind,
        expected: usize,
        available: usize,
    },
}

impl DecodeMismatch {
    /// Short reason label (used for metrics)
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeMismatch::Empty => "empty",
            DecodeMismatch::UnknownTag(_) => "unknown_tag",
            DecodeMismatch::Truncated { .. } => "truncated",
            DecodeMismatch::TrailingBytes { .. } => "trailing_bytes",
        }
    }
}

/// Frame length for a sample kind
pub const fn frame_len(kind: SampleKind) -> usize {
    match kind {
        SampleKind::Pose => POSE_FRAME_LEN,
        SampleKind::Twist | SampleKind::Accel => MOTION_FRAME_LEN,
    }
}

/// Encode a sample into a new frame
pub fn encode(sample: &TrackerSample) -> Bytes {
    let mut buf = BytesMut::with_capacity(frame_len(sample.kind()));
    encode_into(sample, &mut buf);
    buf.freeze()
}

/// Append the frame for `sample` to an existing buffer
pub fn encode_into(sample: &TrackerSample, buf: &mut BytesMut) {
    buf.put_u8(sample.kind().tag());

    match sample {
        TrackerSample::Pose(p) => {
            put_header(buf, p.sensor, p.stamp);
            put_f64s(buf, &p.position);
            put_f64s(buf, &p.orientation);
        }
        TrackerSample::Twist(t) => {
            put_header(buf, t.sensor, t.stamp);
            put_f64s(buf, &t.linear);
            put_f64s(buf, &t.delta_rotation);
            buf.put_f64_le(t.dt);
        }
        TrackerSample::Accel(a) => {
            put_header(buf, a.sensor, a.stamp);
            put_f64s(buf, &a.linear);
            put_f64s(buf, &a.delta_rotation);
            buf.put_f64_le(a.dt);
        }
    }
}

/// Decode one frame
///
/// The frame length must match the tag exactly.
pub fn decode(frame: &[u8]) -> Result<TrackerSample, DecodeMismatch> {
    let Some(&tag) = frame.first() else {
        return Err(DecodeMismatch::Empty);
    };
    let kind = SampleKind::from_tag(tag).ok_or(DecodeMismatch::UnknownTag(tag))?;

    let expected = frame_len(kind);
    if frame.len() < expected {
        return Err(DecodeMismatch::Truncated {
            kind,
            needed: expected,
            available: frame.len(),
        });
    }
    if frame.len() > expected {
        return Err(DecodeMismatch::TrailingBytes {
            kind,
            expected,
            available: frame.len(),
        });
    }

    let mut buf = &frame[1..];
    let (sensor, stamp) = get_header(&mut buf);

    let sample = match kind {
        SampleKind::Pose => TrackerSample::Pose(Pose {
            sensor,
            stamp,
            position: get_f64s(&mut buf),
            orientation: get_f64s(&mut buf),
        }),
        SampleKind::Twist => TrackerSample::Twist(Twist {
            sensor,
            stamp,
            linear: get_f64s(&mut buf),
            delta_rotation: get_f64s(&mut buf),
            dt: buf.get_f64_le(),
        }),
        SampleKind::Accel => TrackerSample::Accel(Accel {
            sensor,
            stamp,
            linear: get_f64s(&mut buf),
            delta_rotation: get_f64s(&mut buf),
            dt: buf.get_f64_le(),
        }),
    };

    Ok(sample)
}

fn put_header(buf: &mut BytesMut, sensor: i32, stamp: Timestamp) {
    buf.put_i32_le(sensor);
    buf.put_i32_le(stamp.secs);
    buf.put_i32_le(stamp.micros);
}

fn put_f64s(buf: &mut BytesMut, values: &[f64]) {
    for &value in values {
        buf.put_f64_le(value);
    }
}

// Callers check the frame length first; `Buf` getters panic on underflow.
fn get_header(buf: &mut &[u8]) -> (i32, Timestamp) {
    let sensor = buf.get_i32_le();
    let secs = buf.get_i32_le();
    let micros = buf.get_i32_le();
    (sensor, Timestamp::new(secs, micros))
}

fn get_f64s<const N: usize>(buf: &mut &[u8]) -> [f64; N] {
    let mut values = [0.0; N];
    for value in &mut values {
        *value = buf.get_f64_le();
    }
    values
}
