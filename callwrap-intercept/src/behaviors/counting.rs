//! Counting behavior: tracks how many times a wrapper was called.
//!
//! Besides the counter driven by the [`CountPolicy`], the state keeps
//! success and failure tallies readable through [`CountingState::stats`].

use crate::prelude::*;

/// Call statistics of one counting wrapper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Counter value as defined by the policy
    pub count:     u64,
    /// Completed calls whose target succeeded
    pub successes: u64,
    /// Completed calls whose target failed
    pub failures:  u64,
}

/// State of a counting wrapper
///
/// All fields are atomics: the read-modify-write of each increment is a
/// single `fetch_add`, so concurrent callers never lose an update.
#[derive(Debug, Default)]
pub struct CountingState {
    policy:    CountPolicy,
    count:     AtomicU64,
    successes: AtomicU64,
    failures:  AtomicU64,
}

impl CountingState {
    /// Create a counter starting at zero
    #[must_use]
    pub fn new(policy: CountPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Current counter value
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Policy deciding which calls are counted
    #[must_use]
    pub const fn policy(&self) -> CountPolicy {
        self.policy
    }

    /// Snapshot of the statistics
    ///
    /// The three fields are read one after the other; under concurrent
    /// calls they may belong to slightly different moments.
    #[must_use]
    pub fn stats(&self) -> CallStats {
        CallStats {
            count:     self.count.load(Ordering::SeqCst),
            successes: self.successes.load(Ordering::SeqCst),
            failures:  self.failures.load(Ordering::SeqCst),
        }
    }
}

impl CallBehavior for CountingState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Counting
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        _args: &Args,
        _frame: &CallFrame,
        result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        let succeeded = result.is_ok();
        if succeeded {
            self.successes.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }

        if !self.policy.counts(succeeded) {
            return Ok(());
        }

        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        sink.write_record(&Record::new(BehaviorKind::Counting, &metadata.name, Event::Count {
            count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, NullSink};

    fn complete(state: &CountingState, result: &Result<Value>, sink: &dyn LogSink) {
        state
            .after_call(&Metadata::new("f"), &Args::new(), &CallFrame::start(), result, sink)
            .unwrap();
    }

    #[test]
    fn test_counts_every_call_by_default() {
        let state = CountingState::new(CountPolicy::AllCalls);
        let sink = MemorySink::new();

        complete(&state, &Ok(Value::Unit), &sink);
        complete(&state, &Err(Error::target_failure("boom")), &sink);

        assert_eq!(state.stats(), CallStats { count: 2, successes: 1, failures: 1 });
        assert_eq!(sink.lines(), vec!["f has been used: 1x", "f has been used: 2x"]);
    }

    #[test]
    fn test_success_only_policy() {
        let state = CountingState::new(CountPolicy::SuccessOnly);
        let sink = MemorySink::new();

        complete(&state, &Err(Error::target_failure("boom")), &sink);
        complete(&state, &Ok(Value::Unit), &sink);

        assert_eq!(state.stats(), CallStats { count: 1, successes: 1, failures: 1 });
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_concurrent_increments() {
        let state = CountingState::new(CountPolicy::AllCalls);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        complete(&state, &Ok(Value::Unit), &NullSink);
                    }
                });
            }
        });

        assert_eq!(state.count(), 2000);
    }
}
