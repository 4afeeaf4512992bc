// callwrap - callwrap-intercept
// Module: Behavior Selection and Configuration
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The closed set of behaviors a wrapper can add around a call.

use crate::prelude::*;

/// Tag identifying a behavior, independent of its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BehaviorKind {
    /// Measures elapsed time
    Timing,
    /// Records arguments and result
    Logging,
    /// Counts invocations
    Counting,
    /// Sleeps before the call
    Delay,
    /// Emits fixed messages before and after the call
    PrePost,
    /// Records the call signature and the returned value
    Debug,
}

impl BehaviorKind {
    /// Every known behavior, in declaration order
    pub const ALL: [Self; 6] =
        [Self::Timing, Self::Logging, Self::Counting, Self::Delay, Self::PrePost, Self::Debug];

    /// Textual tag of this behavior
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timing => "timing",
            Self::Logging => "logging",
            Self::Counting => "counting",
            Self::Delay => "delay",
            Self::PrePost => "pre_post",
            Self::Debug => "debug",
        }
    }

    /// One-line description of the behavior
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Timing => "record the elapsed time of each call",
            Self::Logging => "record arguments and result of each call",
            Self::Counting => "count calls and record the running total",
            Self::Delay => "sleep for a fixed duration before each call",
            Self::PrePost => "emit a message before and after each call",
            Self::Debug => "record the call signature and the returned value",
        }
    }
}

impl FromStr for BehaviorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timing" | "timer" => Ok(Self::Timing),
            "logging" => Ok(Self::Logging),
            "counting" | "counter" => Ok(Self::Counting),
            "delay" | "slow_down" => Ok(Self::Delay),
            "pre_post" | "generic_pre_post" => Ok(Self::PrePost),
            "debug" => Ok(Self::Debug),
            _ => Err(InvalidBehavior("Unknown behavior tag").into()),
        }
    }
}

impl Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which completed calls a counting wrapper adds to its counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountPolicy {
    /// Every completed call, whether the target succeeded or failed
    #[default]
    AllCalls,
    /// Only calls whose target succeeded
    SuccessOnly,
}

impl CountPolicy {
    /// Whether a call with the given outcome is counted
    #[must_use]
    pub const fn counts(&self, succeeded: bool) -> bool {
        match self {
            Self::AllCalls => true,
            Self::SuccessOnly => succeeded,
        }
    }
}

impl FromStr for CountPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_calls" => Ok(Self::AllCalls),
            "success" | "success_only" => Ok(Self::SuccessOnly),
            _ => Err(Error::invalid_config("Unknown count policy")),
        }
    }
}

/// A behavior together with its configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Measure and record elapsed time
    Timing,
    /// Record target name, arguments and result
    Logging,
    /// Count calls under the given policy
    Counting(CountPolicy),
    /// Block the calling thread for the given duration before the call
    Delay(Duration),
    /// Emit `before` ahead of the call and `after` once it completed
    PrePost {
        /// Message emitted before the call
        before: String,
        /// Message emitted after the call
        after:  String,
    },
    /// Record `name(args)` before and the returned value after the call
    Debug,
}

impl Behavior {
    /// Counting with the default policy
    #[must_use]
    pub const fn counting() -> Self {
        Self::Counting(CountPolicy::AllCalls)
    }

    /// Before/after messages
    #[must_use]
    pub fn pre_post(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self::PrePost { before: before.into(), after: after.into() }
    }

    /// Builds a behavior from its textual tag, taking parameters from
    /// `config`
    ///
    /// # Errors
    ///
    /// Returns an invalid behavior error if `tag` names no known behavior.
    pub fn from_tag(tag: &str, config: &InterceptConfig) -> Result<Self> {
        let kind: BehaviorKind = tag.parse()?;
        Ok(Self::from_kind(kind, config))
    }

    /// Builds a behavior of the given kind, taking parameters from `config`
    #[must_use]
    pub fn from_kind(kind: BehaviorKind, config: &InterceptConfig) -> Self {
        match kind {
            BehaviorKind::Timing => Self::Timing,
            BehaviorKind::Logging => Self::Logging,
            BehaviorKind::Counting => Self::Counting(config.count_policy),
            BehaviorKind::Delay => Self::Delay(config.delay),
            BehaviorKind::PrePost => {
                Self::pre_post(config.before_message.clone(), config.after_message.clone())
            },
            BehaviorKind::Debug => Self::Debug,
        }
    }

    /// The tag of this behavior
    #[must_use]
    pub const fn kind(&self) -> BehaviorKind {
        match self {
            Self::Timing => BehaviorKind::Timing,
            Self::Logging => BehaviorKind::Logging,
            Self::Counting(_) => BehaviorKind::Counting,
            Self::Delay(_) => BehaviorKind::Delay,
            Self::PrePost { .. } => BehaviorKind::PrePost,
            Self::Debug => BehaviorKind::Debug,
        }
    }
}

/// Parameters used when behaviors are built from tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptConfig {
    /// Sleep applied by `delay`
    pub delay:          Duration,
    /// Message emitted before the call by `pre_post`
    pub before_message: String,
    /// Message emitted after the call by `pre_post`
    pub after_message:  String,
    /// Counting policy used by `counting`
    pub count_policy:   CountPolicy,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            delay:          Duration::from_secs(1),
            before_message: "Before the function runs".to_string(),
            after_message:  "After the function runs".to_string(),
            count_policy:   CountPolicy::AllCalls,
        }
    }
}

impl InterceptConfig {
    /// Sets the delay duration
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the `pre_post` messages
    #[must_use]
    pub fn with_messages(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_message = before.into();
        self.after_message = after.into();
        self
    }

    /// Sets the counting policy
    #[must_use]
    pub fn with_count_policy(mut self, policy: CountPolicy) -> Self {
        self.count_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        for kind in BehaviorKind::ALL {
            assert_eq!(kind.as_str().parse::<BehaviorKind>().unwrap(), kind);
        }
        assert_eq!("TIMING".parse::<BehaviorKind>().unwrap(), BehaviorKind::Timing);
        assert_eq!(
            "generic_pre_post".parse::<BehaviorKind>().unwrap(),
            BehaviorKind::PrePost
        );

        let err = "teleport".parse::<BehaviorKind>().unwrap_err();
        assert_eq!(err.code, codes::INVALID_BEHAVIOR);
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_from_tag_uses_config() {
        let config = InterceptConfig::default()
            .with_delay(Duration::from_millis(5))
            .with_messages("in", "out")
            .with_count_policy(CountPolicy::SuccessOnly);

        assert_eq!(
            Behavior::from_tag("delay", &config).unwrap(),
            Behavior::Delay(Duration::from_millis(5))
        );
        assert_eq!(Behavior::from_tag("pre_post", &config).unwrap(), Behavior::pre_post("in", "out"));
        assert_eq!(
            Behavior::from_tag("counting", &config).unwrap(),
            Behavior::Counting(CountPolicy::SuccessOnly)
        );
        assert!(Behavior::from_tag("bogus", &config).is_err());
    }

    #[test]
    fn test_count_policy() {
        assert!(CountPolicy::AllCalls.counts(false));
        assert!(!CountPolicy::SuccessOnly.counts(false));
        assert_eq!("success".parse::<CountPolicy>().unwrap(), CountPolicy::SuccessOnly);
        assert!("sometimes".parse::<CountPolicy>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = InterceptConfig::default();
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.count_policy, CountPolicy::AllCalls);
    }
}
