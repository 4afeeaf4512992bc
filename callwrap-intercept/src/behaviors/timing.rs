//! Timing behavior: records how long each call took.

use crate::prelude::*;

/// State of a timing wrapper
///
/// The start marker lives in the per-call [`CallFrame`], so the wrapper
/// itself holds nothing and concurrent calls cannot mix up their timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingState;

impl CallBehavior for TimingState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Timing
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        _args: &Args,
        frame: &CallFrame,
        _result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        let record =
            Record::new(BehaviorKind::Timing, &metadata.name, Event::Elapsed(frame.elapsed()));
        sink.write_record(&record)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_timing_records_elapsed() {
        let sink = MemorySink::new();
        let metadata = Metadata::new("slow");
        let frame = CallFrame::start();
        thread::sleep(Duration::from_millis(10));

        TimingState.after_call(&metadata, &Args::new(), &frame, &Ok(Value::Unit), &sink).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, "slow");
        match records[0].event {
            Event::Elapsed(elapsed) => assert!(elapsed >= Duration::from_millis(10)),
            ref other => panic!("unexpected event {other:?}"),
        }
    }
}
