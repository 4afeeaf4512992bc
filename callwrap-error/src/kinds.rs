// callwrap - callwrap-error
// Module: Error Kinds
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use core::fmt::{self, Display};

use crate::{codes, Error, ErrorCategory};

/// A behavior tag outside the known set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBehavior(pub &'static str);

impl Display for InvalidBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid behavior: {}", self.0)
    }
}

/// A failure raised by a wrapped target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFailure(pub &'static str);

impl Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target failure: {}", self.0)
    }
}

/// A failure of a pre- or post-call action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFailure(pub &'static str);

impl Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action failure: {}", self.0)
    }
}

impl From<InvalidBehavior> for Error {
    fn from(e: InvalidBehavior) -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_BEHAVIOR, e.0)
    }
}

impl From<TargetFailure> for Error {
    fn from(e: TargetFailure) -> Self {
        Self::new(ErrorCategory::Target, codes::TARGET_FAILURE, e.0)
    }
}

impl From<ActionFailure> for Error {
    fn from(e: ActionFailure) -> Self {
        Self::new(ErrorCategory::Action, codes::ACTION_FAILURE, e.0)
    }
}
