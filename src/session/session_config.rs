//! Session configuration and inter-move delay validation.

use std::time::Duration;

use crate::engines::engine_trait::PolicyKind;
use crate::errors::{GameError, GameResult};

pub const MIN_DELAY_MS: u64 = 500;
pub const MAX_DELAY_MS: u64 = 5000;
pub const DELAY_STEP_MS: u64 = 250;
pub const DEFAULT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub delay_ms: u64,
    /// Seed for the policy's random source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub policy: PolicyKind,
    /// Starting position; `None` means the standard initial position.
    pub initial_fen: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
            policy: PolicyKind::default(),
            initial_fen: None,
        }
    }
}

impl SessionConfig {
    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Accept `ms` only inside `MIN_DELAY_MS..=MAX_DELAY_MS` and on the 250 ms grid.
pub fn validate_delay(ms: u64) -> GameResult<Duration> {
    if !(MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms) || (ms - MIN_DELAY_MS) % DELAY_STEP_MS != 0 {
        return Err(GameError::DelayOutOfRange {
            ms,
            min: MIN_DELAY_MS,
            max: MAX_DELAY_MS,
            step: DELAY_STEP_MS,
        });
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_grid_values() {
        assert_eq!(validate_delay(500), Ok(Duration::from_millis(500)));
        assert_eq!(validate_delay(1750), Ok(Duration::from_millis(1750)));
        assert_eq!(validate_delay(5000), Ok(Duration::from_millis(5000)));
        assert!(validate_delay(DEFAULT_DELAY_MS).is_ok());
    }

    #[test]
    fn refuses_out_of_range_and_off_grid_values() {
        assert!(matches!(
            validate_delay(250),
            Err(GameError::DelayOutOfRange { ms: 250, .. })
        ));
        assert!(validate_delay(5250).is_err());
        assert!(validate_delay(0).is_err());
        assert!(validate_delay(1100).is_err());
    }
}
