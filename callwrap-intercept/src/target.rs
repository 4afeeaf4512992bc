// callwrap - callwrap-intercept
// Module: Invocable Targets
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The invocation contract shared by targets and wrappers.

use crate::prelude::*;

/// Identity of an invocable, carried unchanged through every wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Display name used in records and introspection
    pub name: String,
    /// Optional documentation string
    pub doc:  Option<String>,
}

impl Metadata {
    /// Creates metadata with a name and no documentation
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), doc: None }
    }

    /// Adds a documentation string
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Anything that can be called with [`Args`] and yields a [`Value`]
///
/// Both raw targets and wrappers implement this trait, which is what lets a
/// wrapper wrap another wrapper.
pub trait Invocable: Send + Sync {
    /// Identity of this invocable
    fn metadata(&self) -> &Metadata;

    /// Performs the call
    ///
    /// # Errors
    ///
    /// Returns whatever failure the underlying work produces, or an action
    /// failure raised by a wrapper on the way.
    fn invoke(&self, args: &Args) -> Result<Value>;

    /// Display name, shortcut for `metadata().name`
    fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Number of links in the chain ending here; a raw target counts as one
    fn chain_len(&self) -> usize {
        1
    }
}

type TargetFn = dyn Fn(&Args) -> Result<Value> + Send + Sync;

/// A target backed by a closure or function pointer
pub struct FnTarget {
    metadata: Metadata,
    func:     Box<TargetFn>,
}

impl FnTarget {
    /// Creates a named target from a closure
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self { metadata: Metadata::new(name), func: Box::new(func) }
    }

    /// Adds a documentation string to the target's metadata
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_doc(doc);
        self
    }

    /// Wraps the target in an `Arc`, ready to be passed to `wrap`
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Invocable for FnTarget {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn invoke(&self, args: &Args) -> Result<Value> {
        (self.func)(args)
    }
}

impl Debug for FnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTarget").field("metadata", &self.metadata).finish_non_exhaustive()
    }
}
