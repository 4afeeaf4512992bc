//! Delay behavior: blocks the calling thread before each call.

use std::thread;

use crate::prelude::*;

/// State of a delay wrapper
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayState {
    duration: Duration,
}

impl DelayState {
    /// Create a delay of `duration`
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Configured delay
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl CallBehavior for DelayState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Delay
    }

    fn before_call(&self, _metadata: &Metadata, _args: &Args, _sink: &dyn LogSink) -> Result<()> {
        if !self.duration.is_zero() {
            thread::sleep(self.duration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    #[test]
    fn test_delay_blocks() {
        let state = DelayState::new(Duration::from_millis(20));
        let started = Instant::now();
        state.before_call(&Metadata::new("f"), &Args::new(), &NullSink).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_delay() {
        let state = DelayState::new(Duration::ZERO);
        assert!(state.before_call(&Metadata::new("f"), &Args::new(), &NullSink).is_ok());
        assert_eq!(state.duration(), Duration::ZERO);
    }
}
