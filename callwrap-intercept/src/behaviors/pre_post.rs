//! Generic before/after behavior: emits a fixed message on each side of the
//! call.

use crate::prelude::*;

/// State of a before/after wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrePostState {
    before: String,
    after:  String,
}

impl PrePostState {
    /// Create a state emitting `before` and `after`
    #[must_use]
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self { before: before.into(), after: after.into() }
    }

    fn emit(&self, metadata: &Metadata, message: &str, sink: &dyn LogSink) -> Result<()> {
        let record =
            Record::new(BehaviorKind::PrePost, &metadata.name, Event::Message(message.to_string()));
        sink.write_record(&record)
    }
}

impl CallBehavior for PrePostState {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::PrePost
    }

    fn before_call(&self, metadata: &Metadata, _args: &Args, sink: &dyn LogSink) -> Result<()> {
        self.emit(metadata, &self.before, sink)
    }

    fn after_call(
        &self,
        metadata: &Metadata,
        _args: &Args,
        _frame: &CallFrame,
        _result: &Result<Value>,
        sink: &dyn LogSink,
    ) -> Result<()> {
        self.emit(metadata, &self.after, sink)
    }
}
