//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Backoff parameters.
///
/// The delay after the failed attempt `n` (0-based) is
/// `base * 2^n + uniform(0, jitter)`, optionally clamped to `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub jitter: Duration,
    pub max_delay: Option<Duration>,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            jitter: Duration::from_millis(500),
            max_delay: None,
        }
    }
}

impl Backoff {
    /// Delay to sleep after failed attempt `attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms > 0 {
            rand::thread_rng().gen_range(0..jitter_ms)
        } else {
            0
        };
        let delay = self.exponential(attempt).saturating_add(Duration::from_millis(jitter));

        match self.max_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }

    /// The deterministic part of the delay. Saturates instead of overflowing.
    pub fn exponential(&self, attempt: u32) -> Duration {
        let multiplier = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let backoff = Backoff::default();

        let b0 = backoff.delay(0);
        assert!(b0 >= Duration::from_secs(1));
        assert!(b0 < Duration::from_millis(1500));

        let b2 = backoff.delay(2);
        assert!(b2 >= Duration::from_secs(4));
        assert!(b2 < Duration::from_millis(4500));
    }

    #[test]
    fn test_delays_non_decreasing() {
        let backoff = Backoff::default();
        let delays: Vec<_> = (0..6).map(|n| backoff.delay(n)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]), "{:?}", delays);
    }

    #[test]
    fn test_uncapped_growth_saturates() {
        let backoff = Backoff {
            jitter: Duration::ZERO,
            ..Backoff::default()
        };
        assert_eq!(backoff.delay(10), Duration::from_secs(1024));
        assert_eq!(backoff.exponential(64), Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn test_cap() {
        let backoff = Backoff {
            max_delay: Some(Duration::from_secs(5)),
            ..Backoff::default()
        };
        assert_eq!(backoff.delay(8), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let backoff = Backoff {
            base: Duration::from_millis(10),
            jitter: Duration::ZERO,
            max_delay: None,
        };
        assert_eq!(backoff.delay(3), Duration::from_millis(80));
    }
}
