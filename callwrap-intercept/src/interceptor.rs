// callwrap - callwrap-intercept
// Module: Call Interceptor
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The wrapper type produced by [`wrap`](crate::wrap).

use crate::{
    behaviors::{BehaviorState, CallStats},
    prelude::*,
    sink::StdoutSink,
};

/// A wrapper around one inner invocable
///
/// The inner invocable may itself be an `Interceptor`, forming a chain. The
/// wrapper copies the inner metadata, so the whole chain reports the
/// original target's name.
pub struct Interceptor {
    inner:    Arc<dyn Invocable>,
    metadata: Metadata,
    state:    BehaviorState,
    sink:     Arc<dyn LogSink>,
}

impl Interceptor {
    /// Wraps `inner` with `behavior`, writing records to standard output
    pub fn new(inner: Arc<dyn Invocable>, behavior: Behavior) -> Self {
        Self::with_sink(inner, behavior, Arc::new(StdoutSink))
    }

    /// Wraps `inner` with `behavior`, writing records to `sink`
    pub fn with_sink(inner: Arc<dyn Invocable>, behavior: Behavior, sink: Arc<dyn LogSink>) -> Self {
        let metadata = inner.metadata().clone();
        #[cfg(feature = "log")]
        log::trace!(
            "wrapping {} with {} (chain length {})",
            metadata.name,
            behavior.kind(),
            inner.chain_len() + 1
        );
        Self { inner, metadata, state: BehaviorState::from(behavior), sink }
    }

    /// Tag of the behavior this wrapper adds
    #[must_use]
    pub fn kind(&self) -> BehaviorKind {
        self.state.kind()
    }

    /// The wrapped invocable
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn Invocable> {
        &self.inner
    }

    /// Counter value of a counting wrapper, `None` for other behaviors
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        match &self.state {
            BehaviorState::Counting(counting) => Some(counting.count()),
            _ => None,
        }
    }

    /// Statistics of a counting wrapper, `None` for other behaviors
    #[must_use]
    pub fn stats(&self) -> Option<CallStats> {
        match &self.state {
            BehaviorState::Counting(counting) => Some(counting.stats()),
            _ => None,
        }
    }
}

impl Invocable for Interceptor {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn invoke(&self, args: &Args) -> Result<Value> {
        self.state.before_call(&self.metadata, args, self.sink.as_ref())?;

        let frame = CallFrame::start();
        let result = self.inner.invoke(args);
        let action = self.state.after_call(&self.metadata, args, &frame, &result, self.sink.as_ref());

        match (result, action) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(action_failure)) => Err(action_failure),
            (Err(failure), Ok(())) => Err(failure),
            (Err(failure), Err(action_failure)) => {
                #[cfg(feature = "log")]
                log::warn!(
                    "{}: {} action failed while a failure was propagating: {action_failure}",
                    self.metadata.name,
                    self.kind()
                );
                Err(failure.with_suppressed(action_failure))
            },
        }
    }

    fn chain_len(&self) -> usize {
        self.inner.chain_len() + 1
    }
}

impl Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("name", &self.metadata.name)
            .field("behavior", &self.kind())
            .field("chain_len", &self.chain_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn double() -> Arc<FnTarget> {
        FnTarget::new("double", |args: &Args| {
            let x = args.get(0).and_then(Value::as_int).ok_or(Error::invalid_argument("x"))?;
            Ok(Value::Int(x * 2))
        })
        .shared()
    }

    fn broken_sink() -> Arc<dyn LogSink> {
        Arc::new(|_: &Record| -> Result<()> { Err(Error::sink_unavailable("sink closed")) })
    }

    #[test]
    fn test_interceptor_passthrough() {
        let sink = Arc::new(MemorySink::new());
        let wrapped = Interceptor::with_sink(double(), Behavior::Logging, sink.clone());

        assert_eq!(wrapped.invoke(&Args::positional([10])).unwrap(), Value::Int(20));
        assert_eq!(wrapped.name(), "double");
        assert_eq!(wrapped.chain_len(), 2);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_action_failure_after_success() {
        let wrapped = Interceptor::with_sink(double(), Behavior::Timing, broken_sink());

        let err = wrapped.invoke(&Args::positional([1])).unwrap_err();
        assert!(err.is_action_failure());
        assert_eq!(err.code, codes::SINK_UNAVAILABLE);
    }

    #[test]
    fn test_action_failure_during_target_failure() {
        let wrapped = Interceptor::with_sink(double(), Behavior::Logging, broken_sink());

        let err = wrapped.invoke(&Args::new()).unwrap_err();
        assert_eq!(err.without_suppressed(), Error::invalid_argument("x"));
        assert_eq!(err.suppressed.total(), 1);
        assert_eq!(err.suppressed.first().unwrap().code, codes::SINK_UNAVAILABLE);
    }

    #[test]
    fn test_pre_call_failure_skips_target() {
        let calls = Arc::new(AtomicU64::new(0));
        let seen = calls.clone();
        let target = FnTarget::new("g", move |_: &Args| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Unit)
        });
        let wrapped = Interceptor::with_sink(target.shared(), Behavior::Debug, broken_sink());

        assert!(wrapped.invoke(&Args::new()).unwrap_err().is_action_failure());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_count_accessors() {
        let counting = Interceptor::with_sink(
            double(),
            Behavior::counting(),
            Arc::new(crate::sink::NullSink),
        );
        let timing = Interceptor::with_sink(double(), Behavior::Timing, Arc::new(crate::sink::NullSink));

        counting.invoke(&Args::positional([1])).unwrap();
        assert_eq!(counting.count(), Some(1));
        assert_eq!(timing.count(), None);
        assert_eq!(timing.stats(), None);
        assert_eq!(format!("{counting:?}"), "Interceptor { name: \"double\", behavior: Counting, chain_len: 2 }");
    }
}
