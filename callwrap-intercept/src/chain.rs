// callwrap - callwrap-intercept
// Module: Chain Builder
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Builder for stacks of wrappers.
//!
//! Behaviors are applied in the order they are added: the first one added
//! ends up innermost, closest to the target, and the last one added is the
//! outermost. `ChainBuilder::new(f).with(a).with(b)` is therefore the same
//! as `wrap(wrap(f, a), b)`.

use crate::{prelude::*, sink::StdoutSink};

/// Collects behaviors for a target before building the chain
pub struct ChainBuilder {
    target:    Arc<dyn Invocable>,
    sink:      Arc<dyn LogSink>,
    config:    InterceptConfig,
    behaviors: Vec<Behavior>,
}

impl ChainBuilder {
    /// Starts a chain around `target`
    pub fn new(target: Arc<dyn Invocable>) -> Self {
        Self {
            target,
            sink: Arc::new(StdoutSink),
            config: InterceptConfig::default(),
            behaviors: Vec::new(),
        }
    }

    /// Sink shared by every wrapper of the chain
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Configuration used when resolving tags with [`with_tag`](Self::with_tag)
    #[must_use]
    pub fn config(mut self, config: InterceptConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a behavior outside the ones added so far
    #[must_use]
    pub fn with(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Adds a behavior by tag
    ///
    /// # Errors
    ///
    /// Returns an invalid behavior error for an unknown tag. Nothing has been
    /// wrapped or called at that point.
    pub fn with_tag(self, tag: &str) -> Result<Self> {
        let behavior = Behavior::from_tag(tag, &self.config)?;
        Ok(self.with(behavior))
    }

    /// Adds several tags in order
    ///
    /// # Errors
    ///
    /// Fails on the first unknown tag.
    pub fn with_tags<'a>(self, tags: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        tags.into_iter().try_fold(self, Self::with_tag)
    }

    /// Number of behaviors added so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// True if no behavior has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Wraps the target with every behavior
    #[must_use]
    pub fn build(self) -> Chain {
        let mut outer = self.target;
        let mut wrappers = Vec::with_capacity(self.behaviors.len());
        for behavior in self.behaviors {
            let wrapper = Arc::new(Interceptor::with_sink(outer, behavior, self.sink.clone()));
            outer = Arc::clone(&wrapper) as Arc<dyn Invocable>;
            wrappers.push(wrapper);
        }
        Chain { outer, wrappers }
    }
}

impl Debug for ChainBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("target", &self.target.name())
            .field("behaviors", &self.behaviors)
            .finish()
    }
}

/// A built chain of wrappers
///
/// Invoking the chain invokes its outermost wrapper. The wrappers stay
/// reachable for introspection, innermost first.
#[derive(Clone)]
pub struct Chain {
    outer:    Arc<dyn Invocable>,
    wrappers: Vec<Arc<Interceptor>>,
}

impl Chain {
    /// Wrappers of the chain, innermost first
    #[must_use]
    pub fn wrappers(&self) -> &[Arc<Interceptor>] {
        &self.wrappers
    }

    /// Outermost invocable, or the target itself for an empty chain
    #[must_use]
    pub fn outer(&self) -> Arc<dyn Invocable> {
        self.outer.clone()
    }

    /// First wrapper of the given kind, counting from the inside
    #[must_use]
    pub fn find(&self, kind: BehaviorKind) -> Option<&Arc<Interceptor>> {
        self.wrappers.iter().find(|w| w.kind() == kind)
    }

    /// Behavior tags from the outside in, the order pre-call actions run
    #[must_use]
    pub fn layers(&self) -> Vec<BehaviorKind> {
        self.wrappers.iter().rev().map(|w| w.kind()).collect()
    }
}

impl Invocable for Chain {
    fn metadata(&self) -> &Metadata {
        self.outer.metadata()
    }

    fn invoke(&self, args: &Args) -> Result<Value> {
        self.outer.invoke(args)
    }

    fn chain_len(&self) -> usize {
        self.outer.chain_len()
    }
}

impl Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name())
            .field("layers", &self.layers())
            .finish()
    }
}
