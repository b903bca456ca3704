// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Build session configuration

use crate::policy::{PolicyOutcome, SharedPolicy, default_policy};
use std::fmt;
use std::sync::Arc;

/// Configuration for a [`PolyfillPlugin`](crate::PolyfillPlugin) build
/// session
#[derive(Clone)]
pub struct PolyfillOptions {
    /// Directory all path constants are computed relative to
    pub base_dir: String,
    /// Return skipped builtins with a `node:` scheme prefix
    pub prefix_externals: bool,
    /// Per-module polyfill policy
    pub policy: SharedPolicy,
}

impl Default for PolyfillOptions {
    fn default() -> Self {
        Self {
            base_dir: "/".to_string(),
            prefix_externals: false,
            policy: default_policy(),
        }
    }
}

impl PolyfillOptions {
    /// Create options with the defaults: path constants relative to the
    /// root, bare external names, polyfill everything known
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory path constants are computed relative to
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Return skipped builtins as `node:<name>` instead of `<name>`
    pub fn with_prefix_externals(mut self, prefix_externals: bool) -> Self {
        self.prefix_externals = prefix_externals;
        self
    }

    /// Install a per-module polyfill policy
    pub fn with_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> PolicyOutcome + Send + Sync + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }
}

impl fmt::Debug for PolyfillOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyfillOptions")
            .field("base_dir", &self.base_dir)
            .field("prefix_externals", &self.prefix_externals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PolyfillOptions::new();
        assert_eq!(options.base_dir, "/");
        assert!(!options.prefix_externals);
        assert_eq!(
            (options.policy)("crypto", None),
            PolicyOutcome::UseDefault
        );
    }

    #[test]
    fn test_builders() {
        let options = PolyfillOptions::new()
            .with_base_dir("/srv/app")
            .with_prefix_externals(true)
            .with_policy(|_, _| PolicyOutcome::Skip);
        assert_eq!(options.base_dir, "/srv/app");
        assert!(options.prefix_externals);
        assert_eq!((options.policy)("util", None), PolicyOutcome::Skip);
    }
}
