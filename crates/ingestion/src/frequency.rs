//! Smoothed arrival frequency

use std::time::Instant;

/// Weight of the newest instantaneous rate
pub const SMOOTHING_ALPHA: f64 = 0.2;

/// Intervals at or below this are ignored
pub const MIN_INTERVAL_SECS: f64 = 1e-6;

/// Fold one arrival at `now` into `frequency`
///
/// The first arrival only records `last`. A non-positive frequency is treated as unknown
/// and replaced by the first instantaneous rate; afterwards the rate is low-pass filtered.
/// `last` is set to `now` on every call, even when the interval is too short to use.
pub fn update_frequency(now: Instant, last: &mut Option<Instant>, frequency: &mut f64) -> f64 {
    if let Some(previous) = *last {
        let dt = now.saturating_duration_since(previous).as_secs_f64();
        if dt > MIN_INTERVAL_SECS {
            let instantaneous = 1.0 / dt;
            if *frequency <= 0.0 {
                *frequency = instantaneous;
            } else {
                *frequency = (1.0 - SMOOTHING_ALPHA) * *frequency + SMOOTHING_ALPHA * instantaneous;
            }
        }
    }

    *last = Some(now);
    *frequency
}

/// Per-channel frequency state
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyEstimator {
    last: Option<Instant>,
    frequency: f64,
}

impl FrequencyEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arrival, returning the updated frequency
    pub fn update(&mut self, now: Instant) -> f64 {
        update_frequency(now, &mut self.last, &mut self.frequency)
    }

    /// Smoothed frequency in Hz (0 = unknown)
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Whether enough arrivals were seen to estimate a rate
    pub fn is_valid(&self) -> bool {
        self.frequency.is_finite() && self.frequency > 0.0
    }

    /// Instant of the latest arrival
    pub fn last_instant(&self) -> Option<Instant> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_call_only_records_instant() {
        let mut estimator = FrequencyEstimator::new();
        let now = Instant::now();

        assert_eq!(estimator.update(now), 0.0);
        assert!(!estimator.is_valid());
        assert_eq!(estimator.last_instant(), Some(now));
    }

    #[test]
    fn test_second_call_takes_instantaneous_rate() {
        let mut estimator = FrequencyEstimator::new();
        let start = Instant::now();

        estimator.update(start);
        let hz = estimator.update(start + Duration::from_millis(20));
        assert!((hz - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_converges_to_constant_rate() {
        let mut estimator = FrequencyEstimator::new();
        let start = Instant::now();

        // Seed with a very different rate so smoothing has to do the work
        estimator.update(start);
        estimator.update(start + Duration::from_millis(100));

        let period = Duration::from_millis(10);
        let mut now = start + Duration::from_millis(100);
        for _ in 0..25 {
            now += period;
            estimator.update(now);
        }

        let target = 1.0 / period.as_secs_f64();
        assert!(
            (estimator.frequency() - target).abs() / target < 0.01,
            "frequency {} not within 1% of {target}",
            estimator.frequency()
        );
    }

    #[test]
    fn test_zero_interval_is_skipped() {
        let start = Instant::now();
        let mut last = Some(start);
        let mut frequency = 42.0;

        assert_eq!(update_frequency(start, &mut last, &mut frequency), 42.0);
        assert_eq!(frequency, 42.0);
        assert_eq!(last, Some(start));
    }

    #[test]
    fn test_backwards_instant_is_clamped() {
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        let mut last = Some(later);
        let mut frequency = 10.0;

        update_frequency(start, &mut last, &mut frequency);
        assert_eq!(frequency, 10.0);
        assert_eq!(last, Some(start));
    }

    #[test]
    fn test_smoothing_weight() {
        let start = Instant::now();
        let mut last = Some(start);
        let mut frequency = 100.0;

        // instantaneous 50 Hz: 0.8 * 100 + 0.2 * 50 = 90
        update_frequency(start + Duration::from_millis(20), &mut last, &mut frequency);
        assert!((frequency - 90.0).abs() < 1e-9);
    }
}
