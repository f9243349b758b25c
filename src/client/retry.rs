//! Resend policy for GET requests that saw no response.

use std::time::Duration;

/// Number of resends after a timeout, and the pause before each.
///
/// ```rust
/// use snmp_adapter::Retry;
/// use std::time::Duration;
///
/// let once = Retry::none();
/// let eager = Retry::immediate(5);
/// let patient = Retry::fixed(3, Duration::from_millis(200));
/// assert_eq!(patient.compute_delay(2), Duration::from_millis(200));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retry {
    /// Resends after the first attempt; 0 sends once.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

/// Pause between a timeout and the next resend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Resend immediately.
    #[default]
    None,
    Fixed { delay: Duration },
}

impl Default for Retry {
    /// Three immediate resends.
    fn default() -> Self {
        Self::immediate(3)
    }
}

impl Retry {
    /// Send once and fail on the first timeout.
    pub fn none() -> Self {
        Self::immediate(0)
    }

    pub fn immediate(attempts: u32) -> Self {
        Self {
            max_attempts: attempts,
            backoff: Backoff::None,
        }
    }

    pub fn fixed(attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: attempts,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// Pause before resend number `attempt + 1`.
    pub fn compute_delay(&self, _attempt: u32) -> Duration {
        match self.backoff {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed { delay } => delay,
        }
    }
}
