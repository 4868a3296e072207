//! FrameDecoder - counting, logging wrapper around `decode`

use contracts::TrackerSample;
use tracing::{trace, warn};

use crate::codec::{decode, DecodeMismatch};

/// Decodes received frames, dropping and logging the ones that do not match
///
/// Stateless between frames: a mismatch never affects the next frame.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    decoded: u64,
    mismatched: u64,
    last_mismatch: Option<DecodeMismatch>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one frame; `None` if it was dropped
    pub fn decode(&mut self, frame: &[u8]) -> Option<TrackerSample> {
        match decode(frame) {
            Ok(sample) => {
                self.decoded += 1;
                trace!(kind = %sample.kind(), sensor = sample.sensor(), "Decoded frame");
                Some(sample)
            }
            Err(mismatch) => {
                self.mismatched += 1;
                warn!(
                    reason = mismatch.reason(),
                    len = frame.len(),
                    error = %mismatch,
                    "Dropping mismatched frame"
                );
                observability::record_decode_mismatch(mismatch.reason());
                self.last_mismatch = Some(mismatch);
                None
            }
        }
    }

    /// Frames decoded so far
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Frames dropped so far
    pub fn mismatched(&self) -> u64 {
        self.mismatched
    }

    /// Most recent mismatch, if any
    pub fn last_mismatch(&self) -> Option<&DecodeMismatch> {
        self.last_mismatch.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use contracts::{Pose, Timestamp};

    fn frame() -> bytes::Bytes {
        encode(&TrackerSample::Pose(Pose {
            sensor: 2,
            stamp: Timestamp::new(5, 0),
            position: [1.0, 2.0, 3.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }))
    }

    #[test]
    fn test_mismatch_does_not_poison_next_frame() {
        let mut decoder = FrameDecoder::new();

        assert!(decoder.decode(&[0xAB, 1, 2, 3]).is_none());
        assert!(decoder.decode(&frame()[..10]).is_none());
        assert!(decoder.decode(&[]).is_none());

        let sample = decoder.decode(&frame()).unwrap();
        assert_eq!(sample.sensor(), 2);

        assert_eq!(decoder.decoded(), 1);
        assert_eq!(decoder.mismatched(), 3);
        assert_eq!(decoder.last_mismatch(), Some(&DecodeMismatch::Empty));
    }
}
