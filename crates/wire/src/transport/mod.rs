//! Byte-pipe transports
//!
//! One transport message carries exactly one frame.

pub mod udp;

/// Largest datagram a subscriber accepts; anything longer is truncated by the socket
/// and then rejected by the decoder.
pub const MAX_DATAGRAM_LEN: usize = 2048;
