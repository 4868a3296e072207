//! FramePublisher trait - publish side of the byte-pipe transport
//!
//! One call to `publish` is one transport message, which carries exactly one frame.

use crate::ContractError;

/// Publish side of a publish/subscribe transport
#[trait_variant::make(FramePublisher: Send)]
pub trait LocalFramePublisher {
    /// Endpoint description (used for logging)
    fn endpoint(&self) -> String;

    /// Send one frame as one transport message, returning the bytes sent
    ///
    /// # Errors
    /// Returns a transport error; delivery is best effort.
    async fn publish(&mut self, frame: &[u8]) -> Result<usize, ContractError>;
}
