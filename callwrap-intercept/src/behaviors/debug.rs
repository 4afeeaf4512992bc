//! Debug behavior: records the call signature before the call and the
//! returned value after it.

use crate::prelude::*;

/// State of a debug wrapper
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugState;

impl CallBehavior for DebugState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Debug
    }

    fn before_call(&self, metadata: &Metadata, args: &Args, sink: &dyn LogSink) -> Result<()> {
        let record =
            Record::new(BehaviorKind::Debug, &metadata.name, Event::Signature(args.signature()));
        sink.write_record(&record)
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        _args: &Args,
        _frame: &CallFrame,
        result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        let record =
            Record::new(BehaviorKind::Debug, &metadata.name, Event::Returned(Outcome::of(result)));
        sink.write_record(&record)
    }
}
