// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Per-module polyfill policy

use std::sync::Arc;

/// Outcome of consulting the policy for one module.
///
/// Note that [`Empty`](PolicyOutcome::Empty) and
/// [`Skip`](PolicyOutcome::Skip) differ: `Empty` still injects a module (the
/// shared empty implementation), while `Skip` omits it entirely and the
/// import stays external.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// Leave the module external; no polyfill is injected
    Skip,
    /// Inject the registered default implementation
    UseDefault,
    /// Inject the given source text instead of the default.
    /// Empty text is treated as [`Empty`](PolicyOutcome::Empty).
    Replace(String),
    /// Inject the shared empty implementation
    Empty,
}

/// Caller-supplied policy callback.
///
/// Invoked with the module name and the currently registered implementation,
/// `None` when the entry is the empty implementation — so a policy can tell
/// "genuinely no polyfill" from "has real code". Runs at most once per module
/// name per build session, under that name's decision lock: the callback
/// must not resolve through the same session.
pub type PolicyFn = dyn Fn(&str, Option<&str>) -> PolicyOutcome + Send + Sync;

/// Shared handle to a policy callback
pub type SharedPolicy = Arc<PolicyFn>;

/// The default policy: polyfill every known module with its default
/// implementation
pub fn default_policy() -> SharedPolicy {
    Arc::new(|_module, _implementation| PolicyOutcome::UseDefault)
}

/// Evaluated policy outcome: the cached boolean plus any replacement payload
/// for the caller to apply to its registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decision {
    /// Whether the module gets a polyfill
    pub polyfill: bool,
    /// Implementation replacement to install before the first load
    pub replacement: Option<Replacement>,
}

/// Replacement payload produced by a policy outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Replacement {
    /// Install the given source text
    Source(String),
    /// Install the shared empty implementation
    Empty,
}

impl PolicyOutcome {
    /// Fold the outcome into a decision and an optional replacement payload
    pub(crate) fn into_decision(self) -> Decision {
        match self {
            PolicyOutcome::Skip => Decision {
                polyfill: false,
                replacement: None,
            },
            PolicyOutcome::UseDefault => Decision {
                polyfill: true,
                replacement: None,
            },
            PolicyOutcome::Replace(text) if text.is_empty() => Decision {
                polyfill: true,
                replacement: Some(Replacement::Empty),
            },
            PolicyOutcome::Replace(text) => Decision {
                polyfill: true,
                replacement: Some(Replacement::Source(text)),
            },
            PolicyOutcome::Empty => Decision {
                polyfill: true,
                replacement: Some(Replacement::Empty),
            },
        }
    }
}
