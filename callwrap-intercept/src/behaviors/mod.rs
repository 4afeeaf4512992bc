//! Built-in behavior implementations
//!
//! Each behavior keeps its own explicit state struct. [`BehaviorState`] is
//! the tagged set of those states that an [`Interceptor`](crate::Interceptor)
//! owns and dispatches to.

mod counting;
mod debug;
mod delay;
mod logging;
mod pre_post;
mod timing;

pub use counting::{CallStats, CountingState};
pub use debug::DebugState;
pub use delay::DelayState;
pub use logging::LoggingState;
pub use pre_post::PrePostState;
pub use timing::TimingState;

use crate::prelude::*;

/// Ephemeral data of one call, alive from the end of the pre-call action
/// to the end of the post-call action
#[derive(Debug, Clone, Copy)]
pub struct CallFrame {
    started: Instant,
}

impl CallFrame {
    /// Takes the start marker now
    #[must_use]
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Time since the start marker
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Actions a behavior runs around the wrapped call
pub trait CallBehavior: Send + Sync {
    /// Tag of this behavior
    fn kind(&self) -> BehaviorKind;

    /// Called before the wrapped call is made
    ///
    /// # Errors
    ///
    /// An error here is an action failure; the wrapped call is skipped.
    fn before_call(&self, _metadata: &Metadata, _args: &Args, _sink: &dyn LogSink) -> Result<()> {
        Ok(())
    }

    /// Called after the wrapped call completed, successfully or not
    ///
    /// The result is only borrowed: a post-call action can observe a failure
    /// but never replace it.
    ///
    /// # Errors
    ///
    /// An error here is an action failure.
    fn after_call(
        &self,
        _metadata: &Metadata,
        _args: &Args,
        _frame: &CallFrame,
        _result: &Result<Value>,
        _sink: &dyn LogSink,
    ) -> Result<()> {
        Ok(())
    }
}

/// The state of one wrapper, one variant per behavior
#[derive(Debug)]
pub enum BehaviorState {
    /// See [`TimingState`]
    Timing(TimingState),
    /// See [`LoggingState`]
    Logging(LoggingState),
    /// See [`CountingState`]
    Counting(CountingState),
    /// See [`DelayState`]
    Delay(DelayState),
    /// See [`PrePostState`]
    PrePost(PrePostState),
    /// See [`DebugState`]
    Debug(DebugState),
}

impl From<Behavior> for BehaviorState {
    fn from(behavior: Behavior) -> Self {
        match behavior {
            Behavior::Timing => Self::Timing(TimingState),
            Behavior::Logging => Self::Logging(LoggingState),
            Behavior::Counting(policy) => Self::Counting(CountingState::new(policy)),
            Behavior::Delay(duration) => Self::Delay(DelayState::new(duration)),
            Behavior::PrePost { before, after } => Self::PrePost(PrePostState::new(before, after)),
            Behavior::Debug => Self::Debug(DebugState),
        }
    }
}

impl BehaviorState {
    fn as_behavior(&self) -> &dyn CallBehavior {
        match self {
            Self::Timing(s) => s,
            Self::Logging(s) => s,
            Self::Counting(s) => s,
            Self::Delay(s) => s,
            Self::PrePost(s) => s,
            Self::Debug(s) => s,
        }
    }
}

impl CallBehavior for BehaviorState {
    fn kind(&self) -> BehaviorKind {
        self.as_behavior().kind()
    }

    fn before_call(&self, metadata: &Metadata, args: &Args, sink: &dyn LogSink) -> Result<()> {
        self.as_behavior().before_call(metadata, args, sink)
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        args: &Args,
        frame: &CallFrame,
        result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        self.as_behavior().after_call(metadata, args, frame, result, sink)
    }
}
