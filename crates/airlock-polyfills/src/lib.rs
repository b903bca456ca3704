// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Browser substitutes for Node.js builtin modules
//!
//! Each polyfill is an ES module embedded at compile time. The table built by
//! [`modules`] seeds one build session of the `airlock` engine; entries whose
//! source equals [`EMPTY`] exist so the module resolves, but carry no
//! behavior. [`FALLBACKS`] holds helper files that polyfills reach through
//! relative imports without being registered modules themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::HashMap;

/// The shared empty implementation. A registry entry equal to this text is
/// reported to policy callbacks as having no implementation.
pub const EMPTY: &str = include_str!("js/empty.js");

const ASSERT: &str = include_str!("js/assert.js");
const BUFFER: &str = include_str!("js/buffer.js");
const CONSOLE: &str = include_str!("js/console.js");
const CONSTANTS: &str = include_str!("js/constants.js");
const DOMAIN: &str = include_str!("js/domain.js");
const EVENTS: &str = include_str!("js/events.js");
const GLOBAL: &str = include_str!("js/global.js");
const HTTP: &str = include_str!("js/http.js");
const HTTPS: &str = include_str!("js/https.js");
const INHERITS: &str = include_str!("js/inherits.js");
const OS: &str = include_str!("js/os.js");
const PATH: &str = include_str!("js/path.js");
const PROCESS: &str = include_str!("js/process.js");
const PUNYCODE: &str = include_str!("js/punycode.js");
const QUERYSTRING: &str = include_str!("js/querystring.js");
const STREAM: &str = include_str!("js/stream.js");
const STREAM_DUPLEX: &str = include_str!("js/_stream_duplex.js");
const STREAM_PASSTHROUGH: &str = include_str!("js/_stream_passthrough.js");
const STREAM_READABLE: &str = include_str!("js/_stream_readable.js");
const STREAM_TRANSFORM: &str = include_str!("js/_stream_transform.js");
const STREAM_WRITABLE: &str = include_str!("js/_stream_writable.js");
const STRING_DECODER: &str = include_str!("js/string_decoder.js");
const SYS: &str = include_str!("js/sys.js");
const TIMERS: &str = include_str!("js/timers.js");
const TTY: &str = include_str!("js/tty.js");
const URL: &str = include_str!("js/url.js");
const UTIL: &str = include_str!("js/util.js");
const VM: &str = include_str!("js/vm.js");
const ZLIB: &str = include_str!("js/zlib.js");

/// Helper files reachable through relative imports from other polyfills,
/// keyed by virtual file name.
pub const FALLBACKS: &[(&str, &str)] = &[
    ("empty.js", EMPTY),
    ("inherits.js", INHERITS),
];

/// Look up a helper file by its virtual file name (e.g. `"inherits.js"`).
pub fn fallback(file: &str) -> Option<&'static str> {
    FALLBACKS
        .iter()
        .find(|(name, _)| *name == file)
        .map(|(_, source)| *source)
}

/// Build the default polyfill table, one entry per supported builtin.
///
/// Returns an owned map so a build session can apply policy-driven
/// replacements without affecting other sessions.
pub fn modules() -> HashMap<String, String> {
    let mut modules = HashMap::new();
    let mut seed = |name: &str, source: &str| {
        modules.insert(name.to_string(), source.to_string());
    };

    // Injected globals
    seed("buffer", BUFFER);
    seed("global", GLOBAL);
    seed("process", PROCESS);

    // Core modules
    seed("assert", ASSERT);
    seed("console", CONSOLE);
    seed("constants", CONSTANTS);
    seed("domain", DOMAIN);
    seed("events", EVENTS);
    seed("path", PATH);
    seed("punycode", PUNYCODE);
    seed("querystring", QUERYSTRING);
    seed("string_decoder", STRING_DECODER);
    seed("sys", SYS);
    seed("timers", TIMERS);
    seed("url", URL);
    seed("util", UTIL);

    // I/O modules
    seed("stream", STREAM);
    seed("_stream_duplex", STREAM_DUPLEX);
    seed("_stream_passthrough", STREAM_PASSTHROUGH);
    seed("_stream_readable", STREAM_READABLE);
    seed("_stream_transform", STREAM_TRANSFORM);
    seed("_stream_writable", STREAM_WRITABLE);
    seed("tty", TTY);

    // Network modules
    seed("http", HTTP);
    seed("https", HTTPS);

    // System modules
    seed("os", OS);
    seed("vm", VM);
    seed("zlib", ZLIB);

    // Present but intentionally empty; policies observe these as having no
    // implementation and may substitute their own.
    seed("crypto", EMPTY);
    seed("fs", EMPTY);

    modules
}
