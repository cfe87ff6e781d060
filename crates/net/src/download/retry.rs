//! Backoff calculation for transport retries

use std::time::Duration;

const BACKOFF_MULTIPLIER: f64 = 2.0;
const JITTER_FACTOR: f64 = 0.1;
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff with jitter for the given 1-based retry attempt
pub(crate) fn calculate_backoff_delay(initial_delay: Duration, attempt: u32) -> Duration {
    // Precision loss acceptable for backoff calculations
    #[allow(clippy::cast_precision_loss)]
    let base_delay = initial_delay.as_millis().min(u128::from(u64::MAX)) as f64;
    #[allow(clippy::cast_precision_loss)]
    let max_delay = MAX_DELAY.as_millis() as f64;

    // Retry attempts are small, so this cast is safe
    #[allow(clippy::cast_possible_wrap)]
    let exponent = attempt.saturating_sub(1).min(16) as i32;
    let delay = (base_delay * BACKOFF_MULTIPLIER.powi(exponent)).min(max_delay);

    let jitter = delay * JITTER_FACTOR * (rand::random::<f64>() - 0.5);
    // Safe cast: max(0.0) ensures non-negative, round() handles fractional part
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let final_delay = (delay + jitter).max(0.0).round() as u64;

    Duration::from_millis(final_delay)
}
