// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Virtual module engine
//!
//! Routes builtin imports through a private identifier namespace:
//!
//! - the [`DecisionCache`] answers "should this module be polyfilled",
//!   consulting the policy at most once per name per session
//! - the [`VirtualResolver`] classifies incoming specifiers as external,
//!   virtual, or unhandled
//! - the [`VirtualLoader`] serves source text for virtual ids
//! - [`PathConstants`] records per-importer directory modules standing in
//!   for `__dirname`/`__filename`
//!
//! The `\0` sentinel keeps virtual ids out of the host's filesystem
//! resolution; the encoding never survives into final output because every
//! virtual id is either served by the loader or rewritten for the injector.

mod cache;
mod loader;
mod paths;
mod registry;
mod resolver;

pub use cache::DecisionCache;
pub use loader::VirtualLoader;
pub use paths::PathConstants;
pub use registry::ImplementationRegistry;
pub use resolver::{Resolution, VirtualResolver};

/// Namespace prefix for virtual polyfill module ids
pub const VIRTUAL_PREFIX: &str = "\0airlock.";

/// Marker specifier injected in place of `__dirname` references
pub const DIRNAME_MARKER: &str = "\0airlock:dirname";

/// Marker specifier injected in place of `__filename` references
pub const FILENAME_MARKER: &str = "\0airlock:filename";

/// Id prefix for generated path-constant modules
pub(crate) const PATH_ID_PREFIX: &str = "\0airlock:path/";

/// Virtual id of the global-object shim, served verbatim by the transform
/// hook
pub const GLOBAL_SHIM_ID: &str = "\0airlock.global.js";
