//! Structured records emitted by wrappers.

use crate::prelude::*;

/// Result of a completed call as seen by a post-call action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call returned a value
    Returned(Value),
    /// The call failed
    Failed(Error),
}

impl Outcome {
    /// Captures the outcome of `result` without consuming it
    #[must_use]
    pub fn of(result: &Result<Value>) -> Self {
        match result {
            Ok(value) => Self::Returned(value.clone()),
            Err(e) => Self::Failed(*e),
        }
    }

    /// Whether the call succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Returned(_))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Returned(value) => write!(f, "{value}"),
            Self::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Behavior-specific payload of a record
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Elapsed wall-clock time of one call
    Elapsed(Duration),
    /// Arguments and outcome of one call
    Call {
        /// Positional arguments
        args:    Vec<Value>,
        /// Named arguments
        named:   BTreeMap<String, Value>,
        /// Result or failure
        outcome: Outcome,
    },
    /// Running call counter
    Count {
        /// Counter value after this call
        count: u64,
    },
    /// Fixed message of a before/after wrapper
    Message(String),
    /// Rendered call signature, emitted before the call
    Signature(String),
    /// Outcome, emitted after the call
    Returned(Outcome),
}

/// One observability record: which behavior, which target, what happened
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Behavior that produced the record
    pub behavior: BehaviorKind,
    /// Name of the wrapped target
    pub target:   String,
    /// Payload
    pub event:    Event,
}

impl Record {
    /// Creates a record
    #[must_use]
    pub fn new(behavior: BehaviorKind, target: impl Into<String>, event: Event) -> Self {
        Self { behavior, target: target.into(), event }
    }

    /// Severity of the record; records of failed calls are warnings
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        match &self.event {
            Event::Call { outcome, .. } | Event::Returned(outcome) if !outcome.is_success() => {
                LogLevel::Warn
            },
            Event::Signature(_) | Event::Returned(_) => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.target;
        match &self.event {
            Event::Elapsed(elapsed) => {
                write!(f, "Finished {name}() in {:.4} secs", elapsed.as_secs_f64())
            },
            Event::Call { args, named, outcome } => {
                write!(f, "{name} args=[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("] named={")?;
                for (i, (key, value)) in named.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}} -> {outcome}")
            },
            Event::Count { count } => write!(f, "{name} has been used: {count}x"),
            Event::Message(message) => f.write_str(message),
            Event::Signature(signature) => write!(f, "Calling {name}({signature})"),
            Event::Returned(Outcome::Returned(value)) => write!(f, "{name}() returned {value}"),
            Event::Returned(Outcome::Failed(e)) => write!(f, "{name}() failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lines() {
        let timing = Record::new(
            BehaviorKind::Timing,
            "f",
            Event::Elapsed(Duration::from_millis(1500)),
        );
        assert_eq!(timing.to_string(), "Finished f() in 1.5000 secs");

        let call = Record::new(
            BehaviorKind::Logging,
            "f",
            Event::Call {
                args:    vec![Value::Int(3)],
                named:   BTreeMap::from([("scale".to_string(), Value::Int(2))]),
                outcome: Outcome::Returned(Value::Int(6)),
            },
        );
        assert_eq!(call.to_string(), "f args=[3] named={scale: 2} -> 6");

        let count = Record::new(BehaviorKind::Counting, "f", Event::Count { count: 2 });
        assert_eq!(count.to_string(), "f has been used: 2x");
    }

    #[test]
    fn test_failed_records_are_warnings() {
        let failed = Record::new(
            BehaviorKind::Debug,
            "g",
            Event::Returned(Outcome::Failed(Error::target_failure("boom"))),
        );
        assert_eq!(failed.level(), LogLevel::Warn);
        assert!(failed.to_string().starts_with("g() failed: "));

        let signature = Record::new(BehaviorKind::Debug, "g", Event::Signature("1".to_string()));
        assert_eq!(signature.level(), LogLevel::Debug);
        assert_eq!(signature.to_string(), "Calling g(1)");
    }
}
