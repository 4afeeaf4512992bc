//! Output sinks for wrapper records
//!
//! Timing, logging, counting, before/after and debug wrappers describe each
//! call with a structured [`Record`] and hand it to a [`LogSink`]. A sink
//! that cannot accept a record returns an error, which the wrapper reports as
//! an action failure.

mod level;
mod record;

use std::io::Write;

pub use level::LogLevel;
pub use record::{Event, Outcome, Record};

use crate::prelude::*;

/// A trait for receiving wrapper records
pub trait LogSink: Send + Sync {
    /// Write one record
    ///
    /// # Errors
    ///
    /// Returns an action failure if the record could not be written.
    fn write_record(&self, record: &Record) -> Result<()>;
}

// Helper implementation for using a closure as a LogSink
impl<F> LogSink for F
where
    F: Fn(&Record) -> Result<()> + Send + Sync,
{
    fn write_record(&self, record: &Record) -> Result<()> {
        self(record)
    }
}

/// Writes one line per record to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_record(&self, record: &Record) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{record}").map_err(Error::from)
    }
}

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write_record(&self, _record: &Record) -> Result<()> {
        Ok(())
    }
}

/// Keeps records in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records received so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Records rendered as lines
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(ToString::to_string).collect()
    }

    /// Records produced by one behavior
    pub fn records_of(&self, kind: BehaviorKind) -> Vec<Record> {
        self.records.lock().iter().filter(|r| r.behavior == kind).cloned().collect()
    }

    /// Number of records received so far
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no record has been received
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes and returns all records
    pub fn take(&self) -> Vec<Record> {
        core::mem::take(&mut *self.records.lock())
    }
}

impl LogSink for MemorySink {
    fn write_record(&self, record: &Record) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Appends one line per record to a file
#[derive(Debug)]
pub struct FileLogSink {
    file: Mutex<std::fs::File>,
}

impl FileLogSink {
    /// Opens `path` for appending, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCategory::Io`] error if the file cannot be opened.
    /// Later write failures are action failures.
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|_| Error::sink_not_accessible("Output sink not accessible"))?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl LogSink for FileLogSink {
    fn write_record(&self, record: &Record) -> Result<()> {
        let mut file = self.file.lock();
        writeln!(file, "{record}").map_err(Error::from)
    }
}

/// Forwards records to the `log` facade
#[cfg(feature = "log")]
#[derive(Debug, Clone, Copy)]
pub struct LogCrateSink {
    target:    &'static str,
    min_level: LogLevel,
}

#[cfg(feature = "log")]
impl LogCrateSink {
    /// Create a sink logging under `target`
    #[must_use]
    pub const fn new(target: &'static str) -> Self {
        Self { target, min_level: LogLevel::Trace }
    }

    /// Drops records below `level` before they reach the facade
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

#[cfg(feature = "log")]
impl LogSink for LogCrateSink {
    fn write_record(&self, record: &Record) -> Result<()> {
        let level = record.level();
        if level >= self.min_level {
            log::log!(target: self.target, level.to_log_level(), "{record}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_record(count: u64) -> Record {
        Record::new(BehaviorKind::Counting, "f", Event::Count { count })
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.write_record(&count_record(1)).unwrap();
        sink.write_record(&Record::new(BehaviorKind::PrePost, "f", Event::Message("hi".into())))
            .unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["f has been used: 1x", "hi"]);
        assert_eq!(sink.records_of(BehaviorKind::Counting), vec![count_record(1)]);

        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let sink = move |record: &Record| -> Result<()> {
            captured.lock().push(record.target.clone());
            Ok(())
        };

        sink.write_record(&count_record(3)).unwrap();
        assert_eq!(*seen.lock(), vec!["f".to_string()]);
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let path = std::env::temp_dir()
            .join(format!("callwrap-file-sink-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let sink = FileLogSink::open(&path).unwrap();
        sink.write_record(&count_record(1)).unwrap();
        sink.write_record(&count_record(2)).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "f has been used: 1x\nf has been used: 2x\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_sink_missing_directory() {
        let path = std::env::temp_dir().join("callwrap-no-such-dir").join("x").join("out.log");
        let err = FileLogSink::open(&path).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Io);
        assert_eq!(err.code, codes::IO_ERROR);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_file_sink_write_failure_is_action_failure() {
        let sink = FileLogSink::open(std::path::Path::new("/dev/full")).unwrap();

        let err = sink.write_record(&count_record(1)).unwrap_err();
        assert!(err.is_action_failure());
        assert_eq!(err.code, codes::SINK_UNAVAILABLE);
    }
}
