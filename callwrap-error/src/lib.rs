// callwrap - callwrap-error
// Module: Error Handling
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error handling for the callwrap crates
//!
//! Every failure surfaced by a wrapped call is one of three kinds:
//!
//! ## Validation Errors (1000-1099)
//! - Unknown behavior tags passed to the interceptor constructors
//! - Malformed configuration values
//!
//! ## Target Errors (2000-2099)
//! - Failures raised by the wrapped callable itself. They pass through every
//!   wrapper of a chain unchanged.
//!
//! ## Action Errors (3000-3099)
//! - Failures of a wrapper's own pre- or post-call action, such as an
//!   unavailable output sink.
//!
//! When an action fails while a target failure is already propagating, the
//! target failure wins and the action failure is appended to its
//! [`SuppressedChain`]. Every attached failure is counted; the first
//! [`SUPPRESSED_CAPACITY`] are kept in full.
//!
//! # Usage
//!
//! ```
//! use callwrap_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(ErrorCategory::Target, codes::TARGET_FAILURE, "division by zero");
//! assert!(error.is_target_failure());
//!
//! let tagged = error.with_suppressed(Error::sink_unavailable("stdout closed"));
//! assert_eq!(tagged.message, "division by zero");
//! assert_eq!(tagged.suppressed.total(), 1);
//! assert_eq!(tagged.suppressed.first().map(|s| s.message), Some("stdout closed"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Numeric error codes
pub mod codes;
/// The `Error` type and its categories
pub mod errors;
/// Typed error kinds that convert into `Error`
pub mod kinds;

pub use errors::{Error, ErrorCategory, Suppressed, SuppressedChain, SUPPRESSED_CAPACITY};
pub use kinds::{ActionFailure, InvalidBehavior, TargetFailure};

/// A specialized `Result` type for callwrap operations.
pub type Result<T> = core::result::Result<T, Error>;
