//! Humanized pacing.
//!
//! The platform's bot heuristics watch for machine-regular interaction
//! timing, so clicks and keystrokes are separated by jittered delays. The
//! delays are a policy decision, not a correctness requirement, and every
//! window is tunable.

use std::time::Duration;

use rand::Rng;

use crate::page::{PageDriver, PageError};

/// Pacing windows, in milliseconds.
#[derive(Debug, Clone)]
pub struct Pacing {
    pub char_delay_ms: (u64, u64),
    pub action_delay_ms: (u64, u64),
    /// Bound for the observe-and-resolve element wait.
    pub wait_timeout: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            char_delay_ms: (40, 140),
            action_delay_ms: (400, 1_200),
            wait_timeout: Duration::from_millis(8_000),
        }
    }
}

impl Pacing {
    /// A jittered inter-character delay.
    pub fn char_jitter(&self) -> Duration {
        jitter(self.char_delay_ms)
    }

    /// A jittered pause between page interactions.
    pub fn action_jitter(&self) -> Duration {
        jitter(self.action_delay_ms)
    }
}

fn jitter((min, max): (u64, u64)) -> Duration {
    let ms = if max > min {
        rand::thread_rng().gen_range(min..=max)
    } else {
        min
    };
    Duration::from_millis(ms)
}

/// Type text one character at a time with jittered inter-character delays.
/// The driver fires an input event per character.
pub async fn type_text(
    page: &dyn PageDriver,
    pacing: &Pacing,
    selector: &str,
    text: &str,
) -> Result<(), PageError> {
    for ch in text.chars() {
        page.type_char(selector, ch).await?;
        page.pause(pacing.char_jitter()).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_stays_in_window() {
        for _ in 0..100 {
            let d = jitter((40, 140));
            assert!(d >= Duration::from_millis(40));
            assert!(d <= Duration::from_millis(140));
        }
    }

    #[test]
    fn test_degenerate_window() {
        assert_eq!(jitter((50, 50)), Duration::from_millis(50));
    }
}
