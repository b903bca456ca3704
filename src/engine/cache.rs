// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Build-scoped polyfill decisions

use crate::engine::registry::ImplementationRegistry;
use crate::policy::SharedPolicy;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Names that are never skippable: they back injected globals
/// (`process`, `Buffer`, `global`) or are underscore-prefixed internals
/// reached only from other polyfills, so an earlier injection already
/// committed the build to them.
fn always_polyfilled(name: &str) -> bool {
    name == "process" || name == "global" || name == "buffer" || name.starts_with('_')
}

/// Decision cache for one build session.
///
/// Each module name gets one stable answer: the policy callback runs at most
/// once per name, and later calls return the cached boolean verbatim. This
/// keeps resolution idempotent and lets the caller treat the sequence of
/// policy invocations as an audit trail of what was actually polyfilled.
pub struct DecisionCache {
    decisions: DashMap<String, bool>,
    registry: Arc<ImplementationRegistry>,
    policy: SharedPolicy,
}

impl DecisionCache {
    pub(crate) fn new(registry: Arc<ImplementationRegistry>, policy: SharedPolicy) -> Self {
        Self {
            decisions: DashMap::new(),
            registry,
            policy,
        }
    }

    /// Whether `name` should be polyfilled; `None` when the module is
    /// unknown to the registry.
    ///
    /// The first decision for a name evaluates the policy and applies any
    /// replacement payload to the session registry. The entry lock makes
    /// that a single invocation even when many files resolve the same module
    /// in parallel.
    pub fn should_polyfill(&self, name: &str) -> Option<bool> {
        if !self.registry.contains(name) {
            return None;
        }
        if always_polyfilled(name) {
            return Some(true);
        }
        let decision = *self
            .decisions
            .entry(name.to_string())
            .or_insert_with(|| {
                let current = self.registry.policy_view(name);
                let decision = (self.policy)(name, current.as_deref()).into_decision();
                if let Some(replacement) = decision.replacement {
                    self.registry.apply(name, replacement);
                }
                debug!(
                    module = name,
                    polyfill = decision.polyfill,
                    "polyfill decision"
                );
                decision.polyfill
            });
        Some(decision)
    }

    /// Number of decided modules (always-on names are not counted)
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether no decisions have been made yet
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
