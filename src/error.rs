// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the polyfill engine

use thiserror::Error;

/// Result type for polyfill engine operations
pub type Result<T> = std::result::Result<T, PolyfillError>;

/// Errors that can occur while classifying and serving virtual modules
#[derive(Debug, Error)]
pub enum PolyfillError {
    /// A path-constant marker was resolved without an importing file.
    /// Path constants stand in for `__dirname`/`__filename` and are only
    /// meaningful inside a concrete importer.
    #[error("cannot resolve path constant '{marker}' without an importer")]
    MissingImporter {
        /// The marker specifier that was requested
        marker: String,
    },
}
