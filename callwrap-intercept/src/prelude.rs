//! Prelude module for callwrap-intercept
//!
//! This module provides a unified set of imports for the crate. It re-exports
//! commonly used std types together with the crate's own public types to
//! simplify imports in individual modules.

pub use core::{
    fmt,
    fmt::{Debug, Display},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
pub use std::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    sync::Arc,
    time::Instant,
    vec,
    vec::Vec,
};

pub use callwrap_error::{codes, ActionFailure, Error, ErrorCategory, InvalidBehavior, Result, TargetFailure};
pub use parking_lot::Mutex;

pub use crate::{
    behavior::{Behavior, BehaviorKind, CountPolicy, InterceptConfig},
    behaviors::{CallBehavior, CallFrame},
    chain::{Chain, ChainBuilder},
    interceptor::Interceptor,
    sink::{Event, LogLevel, LogSink, Outcome, Record},
    target::{FnTarget, Invocable, Metadata},
    value::{Args, Value, ValueType},
};
