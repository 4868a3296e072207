//! Relay run statistics

use std::time::Duration;

use contracts::{SampleKind, Transition};

/// Statistics from one relay run
#[derive(Debug, Clone, Default)]
pub struct RelayStats {
    /// Loop iterations executed
    pub iterations: u64,

    /// Samples routed to the sink, per kind
    pub samples: [u64; 3],

    /// Per-sample sink failures
    pub sink_errors: u64,

    /// Connection losses
    pub losses: u64,

    /// Successful reconnections
    pub reconnects: u64,

    /// Pose staleness warnings emitted
    pub stale_warnings: u64,

    /// Every state change, in order
    pub transitions: Vec<Transition>,

    /// Total duration of the run
    pub duration: Duration,
}

impl RelayStats {
    pub fn record_sample(&mut self, kind: SampleKind) {
        self.samples[kind.index()] += 1;
    }

    pub fn samples_of(&self, kind: SampleKind) -> u64 {
        self.samples[kind.index()]
    }

    pub fn total_samples(&self) -> u64 {
        self.samples.iter().sum()
    }

    /// Routed samples per second
    pub fn throughput(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.total_samples() as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Relay Statistics ===");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Iterations: {}", self.iterations);
        for kind in SampleKind::ALL {
            println!("   ├─ {} samples: {}", kind, self.samples_of(kind));
        }
        println!("   ├─ Throughput: {:.2} samples/s", self.throughput());
        println!("   ├─ Sink errors: {}", self.sink_errors);
        println!("   ├─ Stale pose warnings: {}", self.stale_warnings);
        println!("   ├─ Connection losses: {}", self.losses);
        println!("   └─ Reconnects: {}", self.reconnects);
        println!();
    }
}
