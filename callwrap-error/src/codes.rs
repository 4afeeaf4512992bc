// callwrap - callwrap-error
// Module: Error Codes
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for callwrap

// Validation error codes (1000-1099)
/// Behavior tag is not part of the known set
pub const INVALID_BEHAVIOR: u16 = 1000;
/// Configuration value rejected
pub const INVALID_CONFIG: u16 = 1001;
/// Argument shape rejected by a target
pub const INVALID_ARGUMENT: u16 = 1002;

// Target error codes (2000-2099)
/// Generic failure raised by a wrapped target
pub const TARGET_FAILURE: u16 = 2000;
/// Target received a value of the wrong type
pub const TARGET_TYPE_MISMATCH: u16 = 2001;

// Action error codes (3000-3099)
/// Generic pre- or post-call action failure
pub const ACTION_FAILURE: u16 = 3000;
/// Output sink could not accept a record
pub const SINK_UNAVAILABLE: u16 = 3001;

// I/O error codes (4000-4099)
/// File or stream could not be opened
pub const IO_ERROR: u16 = 4000;
