// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # airlock
//!
//! Node.js builtin polyfill decision and resolution engine for browser
//! bundlers.
//!
//! When server-side code is bundled for the browser, imports of builtins
//! (`crypto`, `events`, `path`, ...) and references to runtime globals
//! (`process`, `Buffer`, `global`, `__dirname`, `__filename`) need an
//! answer. One [`PolyfillPlugin`] value is that answer for one build:
//!
//! - a decision cache settles "polyfill or external" once per module,
//!   consulting a caller-supplied [`PolicyOutcome`]-returning policy at most
//!   once per name
//! - a resolver classifies every specifier into external, virtual, or
//!   unhandled, routing virtual ids through a private `\0`-prefixed
//!   namespace
//! - a loader serves the (possibly policy-replaced) implementation text for
//!   virtual ids and synthesizes per-importer path-constant modules
//!
//! ## Quick start
//!
//! ```rust
//! use airlock::{PolicyOutcome, PolyfillOptions, PolyfillPlugin, Resolution};
//!
//! let plugin = PolyfillPlugin::new(PolyfillOptions::new().with_policy(
//!     |module, _implementation| {
//!         if module == "util" {
//!             PolicyOutcome::Skip // keep `util` external
//!         } else {
//!             PolicyOutcome::UseDefault
//!         }
//!     },
//! ));
//!
//! match plugin.resolve_id("events", Some("/srv/app/main.js")).unwrap() {
//!     Resolution::Virtual { id, .. } => {
//!         let source = plugin.load(&id).expect("virtual ids always load");
//!         assert!(source.contains("EventEmitter"));
//!     }
//!     _ => unreachable!("events is polyfilled by default"),
//! }
//! ```
//!
//! The engine is host-agnostic: it exposes the three hook-shaped functions a
//! bundler plugin needs ([`PolyfillPlugin::resolve_id`],
//! [`PolyfillPlugin::load`], [`PolyfillPlugin::transform_id`]) and leaves
//! hook dispatch, the global-identifier text transform, and packaging to the
//! host. It never executes or bundles code.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtins;
pub mod engine;
pub mod error;
pub mod options;
pub mod plugin;
pub mod policy;

// Re-exports
pub use engine::{
    DIRNAME_MARKER, FILENAME_MARKER, GLOBAL_SHIM_ID, Resolution, VIRTUAL_PREFIX,
};
pub use error::{PolyfillError, Result};
pub use options::PolyfillOptions;
pub use plugin::{InjectTarget, PolyfillPlugin};
pub use policy::PolicyOutcome;

/// Version of the airlock engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
