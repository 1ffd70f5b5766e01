use std::time::Duration;
use tokio::time::sleep;

/// Default pause per character of submitted text
pub const DEFAULT_THROTTLE_UNIT: Duration = Duration::from_millis(1);

/// Paces task submission in proportion to payload size.
///
/// Independent of the concurrency cap: it spreads submissions over time even
/// when slots are free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionThrottle {
    unit: Duration,
}

impl SubmissionThrottle {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// A throttle that never pauses.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    /// Pause length for `text`, counted in characters rather than bytes.
    pub fn delay_for(&self, text: &str) -> Duration {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.unit.saturating_mul(chars)
    }

    /// Sleep for [`delay_for`](Self::delay_for).
    pub async fn pause(&self, text: &str) {
        let delay = self.delay_for(text);
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

impl Default for SubmissionThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_is_proportional_to_length() {
        let throttle = SubmissionThrottle::default();
        assert_eq!(throttle.delay_for(""), Duration::ZERO);
        assert_eq!(throttle.delay_for("Hello"), Duration::from_millis(5));
        assert_eq!(throttle.delay_for(&"x".repeat(1000)), Duration::from_secs(1));
    }

    #[test]
    fn test_delay_counts_characters_not_bytes() {
        let throttle = SubmissionThrottle::new(Duration::from_millis(2));
        // 5 characters, 10 bytes
        assert_eq!(throttle.delay_for("приве"), Duration::from_millis(10));
        assert_eq!(throttle.delay_for("日本"), Duration::from_millis(4));
    }

    #[test]
    fn test_disabled_throttle() {
        let throttle = SubmissionThrottle::disabled();
        assert_eq!(throttle.delay_for("a long piece of text"), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_for_delay() {
        let throttle = SubmissionThrottle::new(Duration::from_millis(10));
        let start = tokio::time::Instant::now();

        throttle.pause("abc").await;

        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
