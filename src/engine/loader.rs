// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Virtual module loading

use crate::engine::VIRTUAL_PREFIX;
use crate::engine::{ImplementationRegistry, PathConstants};
use std::sync::Arc;
use tracing::trace;

/// Serves source text for virtual module ids
pub struct VirtualLoader {
    registry: Arc<ImplementationRegistry>,
    paths: Arc<PathConstants>,
}

impl VirtualLoader {
    pub(crate) fn new(registry: Arc<ImplementationRegistry>, paths: Arc<PathConstants>) -> Self {
        Self { registry, paths }
    }

    /// Source text for `id`, or `None` when the id is not one of ours and
    /// the host's default load path applies.
    ///
    /// Path-constant ids synthesize a one-line module exporting the recorded
    /// directory. Directory strings come from controlled join logic, so an
    /// ordinary base directory cannot place a quote character in them; the
    /// export is not escaped.
    pub fn load(&self, id: &str) -> Option<String> {
        if let Some(dir) = self.paths.directory(id) {
            trace!(id = %id, dir = %dir, "synthesized path-constant module");
            return Some(format!("export default '{dir}'"));
        }

        let bare = id.strip_prefix(VIRTUAL_PREFIX)?;
        let name = bare.strip_suffix(".js").unwrap_or(bare);
        let source = self
            .registry
            .implementation(name)
            .or_else(|| airlock_polyfills::fallback(&format!("{name}.js")).map(str::to_string));
        if source.is_some() {
            trace!(module = name, "served polyfill source");
        }
        source
    }
}
