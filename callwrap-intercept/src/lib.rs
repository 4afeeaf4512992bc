// callwrap - callwrap-intercept
// Module: Call Interception Layer
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! # Composable call interception
//!
//! This crate wraps any [`Invocable`] with an [`Interceptor`] that runs extra
//! actions around each call while passing arguments and results through
//! unchanged. A wrapper is itself an `Invocable`, so wrappers nest: the
//! pre-call actions of a stack run from the outside in and the post-call
//! actions from the inside out.
//!
//! ## Built-in behaviors
//!
//! | Tag        | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `timing`   | records the elapsed time of each call                 |
//! | `logging`  | records the arguments and the outcome of each call    |
//! | `counting` | keeps a per-wrapper call counter                      |
//! | `delay`    | blocks for a fixed duration before each call          |
//! | `pre_post` | records a fixed message before and after each call    |
//! | `debug`    | records the call signature and the returned value     |
//!
//! Records go to a [`LogSink`]. A sink that fails makes the wrapper report
//! an action failure; a failure of the target itself passes through every
//! wrapper untouched.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use callwrap_intercept::{sink::MemorySink, wrap_with_sink, Args, Behavior, FnTarget, Invocable, Value};
//!
//! let double = FnTarget::new("double", |args: &Args| {
//!     Ok(Value::Int(args.get(0).and_then(Value::as_int).unwrap_or(0) * 2))
//! });
//! let sink = Arc::new(MemorySink::new());
//! let logged = wrap_with_sink(double.shared(), Behavior::Logging, sink.clone());
//!
//! assert_eq!(logged.invoke(&Args::positional([3])).unwrap(), Value::Int(6));
//! assert_eq!(logged.name(), "double");
//! assert_eq!(sink.lines(), vec!["double args=[3] named={} -> 6"]);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::missing_panics_doc)]

pub mod behavior;
pub mod behaviors;
pub mod chain;
pub mod interceptor;
pub mod prelude;
pub mod sink;
pub mod target;
pub mod value;

pub use behavior::{Behavior, BehaviorKind, CountPolicy, InterceptConfig};
pub use behaviors::{CallBehavior, CallFrame, CallStats};
pub use callwrap_error::{Error, ErrorCategory, Result};
pub use chain::{Chain, ChainBuilder};
pub use interceptor::Interceptor;
pub use sink::{Event, LogLevel, LogSink, Outcome, Record};
pub use target::{FnTarget, Invocable, Metadata};
pub use value::{Args, Value, ValueType};

use crate::{prelude::Arc, sink::StdoutSink};

/// Wraps `target` with `behavior`, writing records to standard output
///
/// The result can be wrapped again; `wrap(wrap(f, a), b)` runs `b` outside
/// `a`.
#[must_use]
pub fn wrap(target: Arc<dyn Invocable>, behavior: Behavior) -> Arc<Interceptor> {
    wrap_with_sink(target, behavior, Arc::new(StdoutSink))
}

/// Wraps `target` with `behavior`, writing records to `sink`
#[must_use]
pub fn wrap_with_sink(
    target: Arc<dyn Invocable>,
    behavior: Behavior,
    sink: Arc<dyn LogSink>,
) -> Arc<Interceptor> {
    Arc::new(Interceptor::with_sink(target, behavior, sink))
}

/// Wraps `target` with the behavior named by `tag`
///
/// # Errors
///
/// Returns an invalid behavior error for an unknown tag; the target is
/// neither wrapped nor invoked.
pub fn wrap_tag(
    target: Arc<dyn Invocable>,
    tag: &str,
    config: &InterceptConfig,
    sink: Arc<dyn LogSink>,
) -> Result<Arc<Interceptor>> {
    let behavior = Behavior::from_tag(tag, config)?;
    Ok(wrap_with_sink(target, behavior, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_wrap_twice_keeps_name() {
        let target = FnTarget::new("f", |_: &Args| Ok(Value::Unit)).with_doc("does nothing");
        let sink: Arc<dyn LogSink> = Arc::new(MemorySink::new());
        let once = wrap_with_sink(target.shared(), Behavior::Timing, sink.clone());
        let twice = wrap_with_sink(once, Behavior::Timing, sink);

        assert_eq!(twice.name(), "f");
        assert_eq!(twice.metadata().doc.as_deref(), Some("does nothing"));
        assert_eq!(twice.chain_len(), 3);
    }

    #[test]
    fn test_wrap_tag_unknown() {
        let target = FnTarget::new("g", |_: &Args| Ok(Value::Unit)).shared();
        let err =
            wrap_tag(target, "bogus", &InterceptConfig::default(), Arc::new(sink::NullSink))
                .unwrap_err();
        assert_eq!(err, Error::invalid_behavior("Unknown behavior tag"));
    }
}
