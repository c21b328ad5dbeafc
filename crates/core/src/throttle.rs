//! Rate-limit policy
//!
//! Pure decisions for the fetch retry loop. The shell owns the loop, the HTTP
//! client and the sleeping; this module only answers "what happens next" for a
//! given status code and attempt number.

use std::time::Duration;

/// Attempt number at which a throttled response stops being retried
pub const MAX_ATTEMPTS: u32 = 6;

/// Backoff grows by this much per attempt (linear, not exponential)
pub const BACKOFF_STEP: Duration = Duration::from_secs(10);

/// HTTP 429 Too Many Requests
pub const TOO_MANY_REQUESTS: u16 = 429;

/// How the retry loop treats a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx: read the body and stop
    Success,
    /// 429: back off and try again, up to [`MAX_ATTEMPTS`]
    Throttled,
    /// Anything else: fail immediately without retrying
    Failed,
}

impl ResponseClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            TOO_MANY_REQUESTS => ResponseClass::Throttled,
            _ => ResponseClass::Failed,
        }
    }
}

/// Outcome of a throttled attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Sleep for the given delay, then issue the next attempt
    Retry(Duration),
    /// Give up; the ceiling was reached
    Exhausted,
}

/// Delay before retrying after the given (1-based) attempt was throttled
///
/// 10s, 20s, 30s, 40s, 50s for attempts 1 through 5.
pub fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_STEP * attempt
}

/// Decide what to do after attempt number `attempt` (starting at 1) got a 429
pub fn on_throttle(attempt: u32) -> ThrottleDecision {
    if attempt >= MAX_ATTEMPTS {
        ThrottleDecision::Exhausted
    } else {
        ThrottleDecision::Retry(backoff_delay(attempt))
    }
}
