use crate::StagnationParams;

/// Ends generations whose mean progress has stopped moving.
///
/// Each tick compares the mean progress of alive agents with the previous
/// tick's. A nearly extinct population (alive fraction at or below the low-water
/// mark) stalls when the change is under `low_water_epsilon`; any other
/// population stalls only when the change is under `plateau_epsilon`.
#[derive(Debug, Clone)]
pub struct StagnationDetector {
    params: StagnationParams,
    previous_mean: Option<f32>,
}

impl StagnationDetector {
    #[must_use]
    pub fn new(params: StagnationParams) -> Self {
        Self {
            params,
            previous_mean: None,
        }
    }

    /// Forgets the previous mean; called at the start of every generation.
    pub fn reset(&mut self) {
        self.previous_mean = None;
    }

    /// Feeds one tick's statistics. Returns `true` if the generation has stalled.
    ///
    /// The first call after [`Self::reset`] only records the mean.
    pub fn check(&mut self, alive_fraction: f32, mean_progress: f32) -> bool {
        let Some(previous) = self.previous_mean.replace(mean_progress) else {
            return false;
        };
        let delta = (mean_progress - previous).abs();
        let epsilon = if alive_fraction <= self.params.low_water_fraction {
            self.params.low_water_epsilon
        } else {
            self.params.plateau_epsilon
        };
        delta < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> StagnationDetector {
        StagnationDetector::new(StagnationParams::default())
    }

    #[test]
    fn test_first_tick_only_primes() {
        let mut detector = detector();
        assert!(!detector.check(1.0, 10.0));
        assert!(detector.check(1.0, 10.0));
        detector.reset();
        assert!(!detector.check(1.0, 10.0));
    }

    #[test]
    fn test_healthy_population_needs_exact_plateau() {
        let mut detector = detector();
        assert!(!detector.check(0.5, 10.0));
        assert!(!detector.check(0.5, 10.001));
        assert!(!detector.check(0.5, 10.5));
        assert!(detector.check(0.5, 10.500_01));
    }

    #[test]
    fn test_low_water_population_stalls_on_slow_progress() {
        let mut detector = detector();
        assert!(!detector.check(0.01, 30.0));
        assert!(detector.check(0.01, 30.9));
        assert!(!detector.check(0.01, 32.0));
        // exactly at the mark still counts as low water
        assert!(detector.check(0.02, 32.5));
        assert!(!detector.check(0.021, 33.0));
    }
}
