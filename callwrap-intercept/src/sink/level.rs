//! Log level definitions for sink records.

use crate::prelude::*;

/// Severity attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Trace-level messages (detailed debugging information)
    Trace,
    /// Debug-level messages (useful for developers)
    Debug,
    /// Informational messages
    #[default]
    Info,
    /// Warning messages (failed calls)
    Warn,
    /// Error messages
    Error,
    /// Critical error messages
    Critical,
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            _ => Err(Error::invalid_config("Invalid log level")),
        }
    }
}

impl LogLevel {
    /// Convert `LogLevel` to a string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Matching level of the `log` facade; `Critical` maps to `Error`
    #[cfg(feature = "log")]
    #[must_use]
    pub const fn to_log_level(&self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);

        // Case insensitive
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);

        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.code, codes::INVALID_CONFIG);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Trace < LogLevel::Warn);
        assert!(LogLevel::Critical > LogLevel::Error);
    }
}
