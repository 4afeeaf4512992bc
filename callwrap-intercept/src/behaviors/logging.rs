//! Logging behavior: records arguments and result of each call.

use crate::prelude::*;

/// State of a logging wrapper
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingState;

impl CallBehavior for LoggingState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Logging
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        args: &Args,
        _frame: &CallFrame,
        result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        // Failed calls are recorded as failures, never formatted as results
        let event = Event::Call {
            args:    args.positional.clone(),
            named:   args.named.clone(),
            outcome: Outcome::of(result),
        };
        sink.write_record(&Record::new(BehaviorKind::Logging, &metadata.name, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_logging_records_call() {
        let sink = MemorySink::new();
        let args = Args::positional([3]).named("scale", 2);

        LoggingState
            .after_call(&Metadata::new("f"), &args, &CallFrame::start(), &Ok(Value::Int(6)), &sink)
            .unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].behavior, BehaviorKind::Logging);
        assert_eq!(
            records[0].event,
            Event::Call {
                args:    vec![Value::Int(3)],
                named:   args.named.clone(),
                outcome: Outcome::Returned(Value::Int(6)),
            }
        );
    }

    #[test]
    fn test_logging_records_failure() {
        let sink = MemorySink::new();
        let failure = Error::target_failure("boom");

        LoggingState
            .after_call(&Metadata::new("f"), &Args::new(), &CallFrame::start(), &Err(failure), &sink)
            .unwrap();

        match &sink.records()[0].event {
            Event::Call { outcome, .. } => assert_eq!(*outcome, Outcome::Failed(failure)),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
