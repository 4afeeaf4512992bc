// callwrap - callwrap-error
// Module: Error Types
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use core::fmt;

use crate::{codes, ActionFailure};

/// `Error` categories for callwrap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Rejected input before any call happened
    Validation = 1,
    /// Failure raised by the wrapped callable
    Target     = 2,
    /// Failure of a wrapper's own action
    Action     = 3,
    /// Failure to open an output sink
    Io         = 4,
}

/// An action failure carried by a target failure
///
/// Only category, code and message are kept so that `Error` stays `Copy`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Suppressed {
    /// Category of the suppressed failure
    pub category: ErrorCategory,
    /// Code of the suppressed failure
    pub code:     u16,
    /// Message of the suppressed failure
    pub message:  &'static str,
}

/// Number of suppressed failures an `Error` keeps in full
pub const SUPPRESSED_CAPACITY: usize = 4;

/// Action failures attached to a propagating error, oldest first
///
/// The first [`SUPPRESSED_CAPACITY`] failures are kept in full. Later ones
/// are still counted, so `total()` always equals the number of action
/// failures that happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SuppressedChain {
    slots: [Option<Suppressed>; SUPPRESSED_CAPACITY],
    total: u16,
}

impl SuppressedChain {
    /// A chain with no failures
    pub const EMPTY: Self = Self {
        slots: [None; SUPPRESSED_CAPACITY],
        total: 0,
    };

    /// Append a failure
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn push(mut self, failure: Suppressed) -> Self {
        let index = self.total as usize;
        if index < SUPPRESSED_CAPACITY {
            self.slots[index] = Some(failure);
        }
        self.total = self.total.saturating_add(1);
        self
    }

    /// The first failure that was attached
    #[must_use]
    pub const fn first(&self) -> Option<Suppressed> {
        self.slots[0]
    }

    /// The most recent failure that was kept in full
    #[must_use]
    pub fn last(&self) -> Option<Suppressed> {
        self.iter().last()
    }

    /// Failures kept in full, oldest first
    pub fn iter(&self) -> impl Iterator<Item = Suppressed> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Number of failures attached, including those not kept in full
    #[must_use]
    pub const fn total(&self) -> u16 {
        self.total
    }

    /// Number of failures counted but not kept in full
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn overflow(&self) -> u16 {
        self.total.saturating_sub(SUPPRESSED_CAPACITY as u16)
    }

    /// Returns `true` when nothing has been attached
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// callwrap `Error` type
///
/// Categorized error with a numeric code and a static message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category:   ErrorCategory,
    /// `Error` code
    pub code:       u16,
    /// `Error` message
    pub message:    &'static str,
    /// Action failures that happened while this error was propagating
    pub suppressed: SuppressedChain,
}

impl Error {
    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
            suppressed: SuppressedChain::EMPTY,
        }
    }

    /// Create an invalid behavior error
    #[must_use]
    pub const fn invalid_behavior(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_BEHAVIOR, message)
    }

    /// Create an invalid configuration error
    #[must_use]
    pub const fn invalid_config(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_CONFIG, message)
    }

    /// Create an invalid argument error
    #[must_use]
    pub const fn invalid_argument(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_ARGUMENT, message)
    }

    /// Create a target failure
    #[must_use]
    pub const fn target_failure(message: &'static str) -> Self {
        Self::new(ErrorCategory::Target, codes::TARGET_FAILURE, message)
    }

    /// Create a target type mismatch error
    #[must_use]
    pub const fn target_type_mismatch(message: &'static str) -> Self {
        Self::new(ErrorCategory::Target, codes::TARGET_TYPE_MISMATCH, message)
    }

    /// Create an action failure
    #[must_use]
    pub const fn action_failure(message: &'static str) -> Self {
        Self::new(ErrorCategory::Action, codes::ACTION_FAILURE, message)
    }

    /// Create a sink unavailable error
    #[must_use]
    pub const fn sink_unavailable(message: &'static str) -> Self {
        Self::new(ErrorCategory::Action, codes::SINK_UNAVAILABLE, message)
    }

    /// Create an error for a sink that could not be opened
    #[must_use]
    pub const fn sink_not_accessible(message: &'static str) -> Self {
        Self::new(ErrorCategory::Io, codes::IO_ERROR, message)
    }

    /// Attach an action failure to this error.
    ///
    /// Category, code and message of `self` are left untouched. The new
    /// failure is appended after any failure already attached.
    #[must_use]
    pub const fn with_suppressed(mut self, action: Self) -> Self {
        self.suppressed = self.suppressed.push(Suppressed {
            category: action.category,
            code:     action.code,
            message:  action.message,
        });
        self
    }

    /// Returns this error without any suppressed failure
    #[must_use]
    pub const fn without_suppressed(mut self) -> Self {
        self.suppressed = SuppressedChain::EMPTY;
        self
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.category == ErrorCategory::Validation
    }

    /// Check if this error came from a wrapped target
    #[must_use]
    pub fn is_target_failure(&self) -> bool {
        self.category == ErrorCategory::Target
    }

    /// Check if this error came from a wrapper action
    #[must_use]
    pub fn is_action_failure(&self) -> bool {
        self.category == ErrorCategory::Action
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Target => "target",
            Self::Action => "action",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Suppressed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)?;
        if self.suppressed.is_empty() {
            return Ok(());
        }
        f.write_str(" (suppressed: ")?;
        for (i, suppressed) in self.suppressed.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{suppressed}")?;
        }
        if self.suppressed.overflow() > 0 {
            write!(f, "; {} more", self.suppressed.overflow())?;
        }
        f.write_str(")")
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        ActionFailure("Formatting error").into()
    }
}

/// Conversion used on the sink write path
///
/// Any write failure is an action failure, whatever its I/O kind. Opening a
/// sink reports [`ErrorCategory::Io`] through [`Error::sink_not_accessible`]
/// instead.
#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::WriteZero => {
                Self::sink_unavailable("Output sink closed")
            },
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Self::sink_unavailable("Output sink not accessible")
            },
            _ => Self::sink_unavailable("Output sink write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suppressed_keeps_identity() {
        let target = Error::target_failure("boom");
        let tagged = target.with_suppressed(Error::sink_unavailable("closed"));

        assert_eq!(tagged.category, ErrorCategory::Target);
        assert_eq!(tagged.code, codes::TARGET_FAILURE);
        assert_eq!(tagged.message, "boom");
        assert_eq!(tagged.without_suppressed(), target);

        let suppressed = tagged.suppressed.first().unwrap();
        assert_eq!(suppressed.code, codes::SINK_UNAVAILABLE);
        assert_eq!(suppressed.category, ErrorCategory::Action);
    }

    #[test]
    fn test_every_suppressed_failure_is_kept() {
        let tagged = Error::target_failure("boom")
            .with_suppressed(Error::sink_unavailable("first"))
            .with_suppressed(Error::action_failure("second"));

        let messages: Vec<_> = tagged.suppressed.iter().map(|s| s.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(tagged.suppressed.total(), 2);
        assert_eq!(tagged.suppressed.last().unwrap().message, "second");
        assert_eq!(tagged.message, "boom");
    }

    #[test]
    fn test_suppressed_overflow_is_counted() {
        let mut tagged = Error::target_failure("boom");
        for _ in 0..SUPPRESSED_CAPACITY + 3 {
            tagged = tagged.with_suppressed(Error::action_failure("again"));
        }

        assert_eq!(tagged.suppressed.iter().count(), SUPPRESSED_CAPACITY);
        assert_eq!(usize::from(tagged.suppressed.total()), SUPPRESSED_CAPACITY + 3);
        assert_eq!(tagged.suppressed.overflow(), 3);
        assert!(format!("{tagged}").ends_with("; 3 more)"));
    }

    #[test]
    fn test_display_format() {
        let error = Error::invalid_behavior("Unknown behavior tag");
        assert_eq!(format!("{error}"), "[Validation][E03E8] Unknown behavior tag");

        let tagged = Error::target_failure("boom").with_suppressed(Error::action_failure("oops"));
        let rendered = format!("{tagged}");
        assert!(rendered.starts_with("[Target][E07D0] boom"));
        assert!(rendered.contains("suppressed: [Action][E0BB8] oops"));

        let twice = tagged.with_suppressed(Error::sink_unavailable("closed"));
        assert_eq!(
            format!("{twice}"),
            "[Target][E07D0] boom (suppressed: [Action][E0BB8] oops; [Action][E0BB9] closed)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let error = Error::from(io);
        assert!(error.is_action_failure());
        assert_eq!(error.code, codes::SINK_UNAVAILABLE);
    }

    #[test]
    fn test_io_write_failure_is_always_action_failure() {
        for kind in [
            std::io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::WriteZero,
            std::io::ErrorKind::Other,
        ] {
            let error = Error::from(std::io::Error::new(kind, "write"));
            assert!(error.is_action_failure(), "{kind:?}");
            assert_eq!(error.code, codes::SINK_UNAVAILABLE);
        }
        assert_eq!(Error::sink_not_accessible("gone").category, ErrorCategory::Io);
    }
}
