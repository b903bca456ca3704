// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Virtual identifier resolution

use crate::builtins;
use crate::engine::{DIRNAME_MARKER, FILENAME_MARKER, VIRTUAL_PREFIX, paths};
use crate::engine::{DecisionCache, PathConstants};
use crate::error::{PolyfillError, Result};
use crate::options::PolyfillOptions;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::trace;

// Interop wrappers for non-ES modules arrive as `\0<id>?commonjs-<kind>`.
static COMMONJS_PROXY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?commonjs-\w+$").expect("commonjs proxy pattern"));

/// Classification of a module specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the import out of the bundle and record it as external
    External {
        /// Specifier the host should record for the external import
        id: String,
        /// Side-effect flag for the host's module graph
        module_side_effects: bool,
    },
    /// Route the import to a virtual module served by the loader
    Virtual {
        /// Virtual module id
        id: String,
        /// Side-effect flag for the host's module graph
        module_side_effects: bool,
    },
    /// Not handled here; the host's default resolution applies
    Unhandled,
}

/// Classifies specifiers into external, virtual, and unhandled imports
pub struct VirtualResolver {
    decisions: Arc<DecisionCache>,
    paths: Arc<PathConstants>,
    base_dir: String,
    prefix_externals: bool,
}

impl VirtualResolver {
    pub(crate) fn new(
        decisions: Arc<DecisionCache>,
        paths: Arc<PathConstants>,
        options: &PolyfillOptions,
    ) -> Self {
        Self {
            decisions,
            paths,
            base_dir: options.base_dir.clone(),
            prefix_externals: options.prefix_externals,
        }
    }

    /// Classify `specifier` as seen from `importer`.
    ///
    /// Builtin detection runs before any virtual-namespace rewriting, so a
    /// `node:`-prefixed builtin is always decision-gated first. The only
    /// failure is a path-constant marker with no importer; everything
    /// unrecognized comes back as [`Resolution::Unhandled`].
    pub fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<Resolution> {
        let mut specifier = specifier.to_string();

        if specifier.starts_with('\0') {
            let wrapper = COMMONJS_PROXY.find(&specifier).map(|found| found.start());
            if let Some(start) = wrapper {
                specifier = specifier[1..start].to_string();
            }
        }

        if specifier == DIRNAME_MARKER || specifier == FILENAME_MARKER {
            let importer = importer.ok_or_else(|| PolyfillError::MissingImporter {
                marker: specifier.clone(),
            })?;
            let id = self.paths.allocate(importer, &self.base_dir);
            trace!(marker = %specifier, id = %id, "recorded path constant");
            return Ok(Resolution::Virtual {
                id,
                module_side_effects: false,
            });
        }

        if specifier.ends_with('/') {
            specifier.pop();
        }

        if builtins::is_builtin(&specifier) {
            let name = specifier
                .strip_prefix("node:")
                .unwrap_or(&specifier)
                .to_string();
            if self.decisions.should_polyfill(&name) != Some(true) {
                let id = if self.prefix_externals {
                    format!("node:{name}")
                } else {
                    name
                };
                trace!(module = %id, "builtin left external");
                return Ok(Resolution::External {
                    id,
                    module_side_effects: false,
                });
            }
            specifier = name;
        }

        if let Some(importer) = importer {
            if let Some(stem) = importer.strip_prefix(VIRTUAL_PREFIX) {
                if specifier.starts_with('.') {
                    // a polyfill importing a sibling by relative path stays
                    // inside the namespace
                    let stem = stem.strip_suffix(".js").unwrap_or(stem);
                    specifier = format!(
                        "{VIRTUAL_PREFIX}{}.js",
                        paths::join(&[stem, "..", &specifier])
                    );
                }
            }
        }

        if let Some(bare) = specifier.strip_prefix(VIRTUAL_PREFIX) {
            specifier = bare.to_string();
        }

        let name = specifier.strip_suffix(".js").unwrap_or(&specifier);
        if self.decisions.should_polyfill(name) == Some(true)
            || airlock_polyfills::fallback(&format!("{name}.js")).is_some()
        {
            let id = format!("{VIRTUAL_PREFIX}{name}.js");
            trace!(module = name, id = %id, "resolved virtual module");
            return Ok(Resolution::Virtual {
                id,
                module_side_effects: false,
            });
        }

        Ok(Resolution::Unhandled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ImplementationRegistry;
    use crate::policy::PolicyOutcome;

    fn resolver_over(registry: ImplementationRegistry, options: PolyfillOptions) -> VirtualResolver {
        let registry = Arc::new(registry);
        let decisions = Arc::new(DecisionCache::new(registry, options.policy.clone()));
        VirtualResolver::new(decisions, Arc::new(PathConstants::new()), &options)
    }

    fn resolver_with(options: PolyfillOptions) -> VirtualResolver {
        resolver_over(ImplementationRegistry::with_defaults(), options)
    }

    fn default_resolver() -> VirtualResolver {
        resolver_with(PolyfillOptions::new())
    }

    #[test]
    fn test_builtin_resolves_virtual() {
        let resolver = default_resolver();
        assert_eq!(
            resolver.resolve("events", None).unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.events.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_node_scheme_is_equivalent_to_bare_name() {
        let resolver = default_resolver();
        let bare = resolver.resolve("os", None).unwrap();
        let prefixed = resolver.resolve("node:os", None).unwrap();
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn test_skipped_builtin_is_external() {
        let resolver = resolver_with(PolyfillOptions::new().with_policy(|module, _| {
            if module == "util" {
                PolicyOutcome::Skip
            } else {
                PolicyOutcome::UseDefault
            }
        }));
        assert_eq!(
            resolver.resolve("util", None).unwrap(),
            Resolution::External {
                id: "util".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_prefix_externals_reprefixes_skipped_builtins() {
        let resolver = resolver_with(
            PolyfillOptions::new()
                .with_prefix_externals(true)
                .with_policy(|_, _| PolicyOutcome::Skip),
        );
        assert_eq!(
            resolver.resolve("node:util", None).unwrap(),
            Resolution::External {
                id: "node:util".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_unknown_builtin_is_external() {
        // known to the runtime but absent from the registry
        let resolver = default_resolver();
        assert_eq!(
            resolver.resolve("worker_threads", None).unwrap(),
            Resolution::External {
                id: "worker_threads".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_non_builtin_is_unhandled() {
        let resolver = default_resolver();
        assert_eq!(
            resolver.resolve("lodash", Some("/srv/app/index.js")).unwrap(),
            Resolution::Unhandled
        );
    }

    #[test]
    fn test_relative_import_rewritten_inside_namespace() {
        let seed = std::collections::HashMap::from([
            ("streams".to_string(), "export default 1".to_string()),
            ("helpers".to_string(), "export default 2".to_string()),
        ]);
        let resolver = resolver_over(ImplementationRegistry::new(seed), PolyfillOptions::new());
        assert_eq!(
            resolver
                .resolve("./helpers", Some("\u{0}airlock.streams.js"))
                .unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.helpers.js".to_string(),
                module_side_effects: false,
            }
        );

        let resolver = default_resolver();
        assert_eq!(
            resolver
                .resolve("./events", Some("\u{0}airlock.stream.js"))
                .unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.events.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_relative_import_reaches_fallback_helpers() {
        let resolver = default_resolver();
        assert_eq!(
            resolver
                .resolve("./inherits", Some("\u{0}airlock.util.js"))
                .unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.inherits.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_relative_import_outside_namespace_is_unhandled() {
        let resolver = default_resolver();
        assert_eq!(
            resolver
                .resolve("./events", Some("/srv/app/index.js"))
                .unwrap(),
            Resolution::Unhandled
        );
    }

    #[test]
    fn test_virtual_id_resolves_to_itself() {
        let resolver = default_resolver();
        assert_eq!(
            resolver
                .resolve("\u{0}airlock.path.js", Some("/srv/app/index.js"))
                .unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.path.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let resolver = default_resolver();
        assert_eq!(
            resolver.resolve("events/", None).unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.events.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_commonjs_proxy_decoration_is_stripped() {
        let resolver = default_resolver();
        assert_eq!(
            resolver
                .resolve("\u{0}events?commonjs-proxy", None)
                .unwrap(),
            Resolution::Virtual {
                id: "\u{0}airlock.events.js".to_string(),
                module_side_effects: false,
            }
        );
    }

    #[test]
    fn test_dirname_marker_allocates_fresh_ids() {
        let resolver = default_resolver();
        let first = resolver
            .resolve(DIRNAME_MARKER, Some("/srv/app/a/index.js"))
            .unwrap();
        let second = resolver
            .resolve(DIRNAME_MARKER, Some("/srv/app/b/index.js"))
            .unwrap();
        let (Resolution::Virtual { id: first, .. }, Resolution::Virtual { id: second, .. }) =
            (first, second)
        else {
            panic!("path constants must resolve virtual");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn test_marker_without_importer_fails() {
        let resolver = default_resolver();
        let err = resolver.resolve(FILENAME_MARKER, None).unwrap_err();
        assert!(matches!(err, PolyfillError::MissingImporter { .. }));
    }
}
