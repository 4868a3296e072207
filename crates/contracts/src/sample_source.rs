//! SampleSource trait - Tracking source abstraction
//!
//! Decouples the relay loop from the concrete tracking source. The loop drives the
//! source cooperatively: it calls `pump` once per iteration and then pulls the latest
//! sample of each channel with `poll`.

use crate::{SampleKind, TrackerSample};

/// Tracking source trait
///
/// Each channel holds at most one pending sample. A source producing faster than the
/// loop drains it overwrites the pending sample; only the latest one is observed.
///
/// # Example
///
/// ```ignore
/// let mut source: Box<dyn SampleSource> = build_source(&config, &address).await?;
/// loop {
///     source.pump();
///     if source.connected() {
///         for kind in SampleKind::ALL {
///             if let Some(sample) = source.poll(kind) {
///                 // route sample
///             }
///         }
///     }
/// }
/// source.release();
/// ```
pub trait SampleSource: Send {
    /// Human-readable source label (e.g. `Drone001@192.168.31.100`)
    fn label(&self) -> &str;

    /// Make progress on the underlying connection
    ///
    /// Must return within a short bounded time.
    fn pump(&mut self);

    /// Whether the remote source is currently reachable
    fn connected(&self) -> bool;

    /// Take the latest pending sample of `kind`, if any arrived since the last poll
    fn poll(&mut self, kind: SampleKind) -> Option<TrackerSample>;

    /// Stop delivering samples and release the underlying handle
    ///
    /// Idempotent.
    fn release(&mut self);
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn pump(&mut self) {
        (**self).pump()
    }

    fn connected(&self) -> bool {
        (**self).connected()
    }

    fn poll(&mut self, kind: SampleKind) -> Option<TrackerSample> {
        (**self).poll(kind)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Latest-wins pending sample slots, one per channel
#[derive(Debug, Clone, Default)]
pub struct LatestSamples {
    slots: [Option<TrackerSample>; 3],
}

impl LatestSamples {
    /// Create empty slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample, returning the one it replaced (if it was never polled)
    pub fn store(&mut self, sample: TrackerSample) -> Option<TrackerSample> {
        self.slots[sample.kind().index()].replace(sample)
    }

    /// Take the pending sample of `kind`
    pub fn take(&mut self, kind: SampleKind) -> Option<TrackerSample> {
        self.slots[kind.index()].take()
    }

    /// Drop all pending samples
    pub fn clear(&mut self) {
        self.slots = [None; 3];
    }

    /// Whether no channel has a pending sample
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
