// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Session-owned polyfill implementation table

use crate::policy::Replacement;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Table of polyfill implementations for one build session.
///
/// Seeded once at construction; the only mutation is policy-driven
/// replacement, which happens at most once per module, at decision time.
/// Loads take read locks, so a replacement can never be observed torn.
pub struct ImplementationRegistry {
    modules: RwLock<HashMap<String, String>>,
}

impl ImplementationRegistry {
    /// Create a registry from an explicit seed table
    pub fn new(seed: HashMap<String, String>) -> Self {
        Self {
            modules: RwLock::new(seed),
        }
    }

    /// Create a registry seeded with the default polyfill set
    pub fn with_defaults() -> Self {
        Self::new(airlock_polyfills::modules())
    }

    /// Whether `name` is a known module
    pub fn contains(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    /// Current implementation source for `name`
    pub fn implementation(&self, name: &str) -> Option<String> {
        self.modules.read().get(name).cloned()
    }

    /// Implementation as observed by policy callbacks: `None` when the entry
    /// is the shared empty implementation
    pub(crate) fn policy_view(&self, name: &str) -> Option<String> {
        self.modules
            .read()
            .get(name)
            .filter(|source| source.as_str() != airlock_polyfills::EMPTY)
            .cloned()
    }

    /// Apply a policy-driven replacement to the entry for `name`
    pub(crate) fn apply(&self, name: &str, replacement: Replacement) {
        let source = match replacement {
            Replacement::Source(text) => text,
            Replacement::Empty => airlock_polyfills::EMPTY.to_string(),
        };
        debug!(module = name, "replacing polyfill implementation");
        self.modules.write().insert(name.to_string(), source);
    }
}
