// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Plugin facade: one value per build session

use crate::engine::{
    DIRNAME_MARKER, DecisionCache, FILENAME_MARKER, GLOBAL_SHIM_ID, ImplementationRegistry,
    PathConstants, Resolution, VIRTUAL_PREFIX, VirtualLoader, VirtualResolver,
};
use crate::error::Result;
use crate::options::PolyfillOptions;
use std::collections::HashMap;
use std::sync::Arc;

// What the identifier injector sees in place of the virtual prefix; a
// conventional-looking path keeps the `\0` encoding out of its filters.
const INJECT_DISPLAY_PREFIX: &str = "node_modules/airlock-polyfills/";

/// Import binding the external identifier injector synthesizes for a free
/// global reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectTarget {
    /// Import the module's default export
    Default(String),
    /// Import a named export: `(module, export name)`
    Named(String, String),
}

/// One build session of the polyfill engine.
///
/// Owns the decision cache, the implementation registry, and the
/// path-constant table. Hosts call [`resolve_id`](Self::resolve_id),
/// [`load`](Self::load) and [`transform_id`](Self::transform_id) from their
/// hooks; all three are safe to call from parallel resolution. Dropping the
/// value discards every decision, so concurrent or repeated builds are
/// simply separate sessions.
pub struct PolyfillPlugin {
    decisions: Arc<DecisionCache>,
    resolver: VirtualResolver,
    loader: VirtualLoader,
}

impl PolyfillPlugin {
    /// Create a session seeded with the default polyfill table
    pub fn new(options: PolyfillOptions) -> Self {
        Self::with_seed(airlock_polyfills::modules(), options)
    }

    /// Create a session from an explicit seed table of module name →
    /// implementation source
    pub fn with_seed(seed: HashMap<String, String>, options: PolyfillOptions) -> Self {
        let registry = Arc::new(ImplementationRegistry::new(seed));
        let decisions = Arc::new(DecisionCache::new(registry.clone(), options.policy.clone()));
        let paths = Arc::new(PathConstants::new());
        let resolver = VirtualResolver::new(decisions.clone(), paths.clone(), &options);
        let loader = VirtualLoader::new(registry, paths);
        Self {
            decisions,
            resolver,
            loader,
        }
    }

    /// Plugin name for host diagnostics
    pub fn name(&self) -> &'static str {
        "airlock"
    }

    /// Resolution hook: classify `specifier` as seen from `importer`
    pub fn resolve_id(&self, specifier: &str, importer: Option<&str>) -> Result<Resolution> {
        self.resolver.resolve(specifier, importer)
    }

    /// Load hook: source text for a virtual id, `None` when the host's
    /// default load path applies
    pub fn load(&self, id: &str) -> Option<String> {
        self.loader.load(id)
    }

    /// Transform hook: the id the identifier injector should see for this
    /// module, or `None` when the module must be left untouched.
    ///
    /// The global-object shim is served verbatim — injecting into it would
    /// import the shim into itself.
    pub fn transform_id(&self, id: &str) -> Option<String> {
        if id == GLOBAL_SHIM_ID {
            return None;
        }
        Some(id.replace(VIRTUAL_PREFIX, INJECT_DISPLAY_PREFIX))
    }

    /// Stable decision for `name`; `None` when the module is unknown.
    /// Exposed so hosts can audit what a build actually polyfilled.
    pub fn should_polyfill(&self, name: &str) -> Option<bool> {
        self.decisions.should_polyfill(name)
    }

    /// Bindings the external identifier injector rewrites free globals with
    pub fn injected_globals(&self) -> Vec<(&'static str, InjectTarget)> {
        vec![
            (
                "process",
                InjectTarget::Default(format!("{VIRTUAL_PREFIX}process")),
            ),
            (
                "Buffer",
                InjectTarget::Named(format!("{VIRTUAL_PREFIX}buffer"), "Buffer".to_string()),
            ),
            (
                "global",
                InjectTarget::Default(format!("{VIRTUAL_PREFIX}global")),
            ),
            (
                "__filename",
                InjectTarget::Default(FILENAME_MARKER.to_string()),
            ),
            (
                "__dirname",
                InjectTarget::Default(DIRNAME_MARKER.to_string()),
            ),
        ]
    }
}

impl Default for PolyfillPlugin {
    fn default() -> Self {
        Self::new(PolyfillOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_shim_is_exempt_from_injection() {
        let plugin = PolyfillPlugin::default();
        assert_eq!(plugin.transform_id(GLOBAL_SHIM_ID), None);
    }

    #[test]
    fn test_transform_rewrites_virtual_prefix() {
        let plugin = PolyfillPlugin::default();
        assert_eq!(
            plugin.transform_id("\u{0}airlock.process.js").as_deref(),
            Some("node_modules/airlock-polyfills/process.js")
        );
    }

    #[test]
    fn test_transform_passes_plain_ids_through() {
        let plugin = PolyfillPlugin::default();
        assert_eq!(
            plugin.transform_id("/srv/app/index.js").as_deref(),
            Some("/srv/app/index.js")
        );
    }

    #[test]
    fn test_injected_globals_cover_the_runtime_surface() {
        let plugin = PolyfillPlugin::default();
        let bindings = plugin.injected_globals();
        let names: Vec<&str> = bindings.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["process", "Buffer", "global", "__filename", "__dirname"]
        );
    }
}
