//! Resolution of the file header enforced by the `header/header` rule.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// File name of a project-provided header template.
pub const HEADER_OVERRIDE_FILE: &str = "header.js";

/// Header comment enforced when the project provides none.
pub const DEFAULT_HEADER_LINES: [&str; 4] = [
    "!",
    " * Copyright (c) Microsoft. All rights reserved.",
    " * Licensed under the MIT license. See LICENSE file in the project.",
    " ",
];

/// Where the enforced header comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSource {
    /// A `header.js` template in the project root.
    Override(PathBuf),
    /// The built-in copyright header.
    Default,
}

impl HeaderSource {
    /// Value of the `header/header` rule for this source.
    pub fn rule_value(&self) -> Value {
        match self {
            HeaderSource::Override(path) => json!([2, path.display().to_string()]),
            HeaderSource::Default => json!([2, "block", DEFAULT_HEADER_LINES]),
        }
    }
}

/// Picks `<cwd>/header.js` when `exists` reports it, the default otherwise.
pub fn resolve_header(cwd: &Path, exists: impl Fn(&Path) -> bool) -> HeaderSource {
    let candidate = cwd.join(HEADER_OVERRIDE_FILE);
    if exists(&candidate) {
        HeaderSource::Override(candidate)
    } else {
        HeaderSource::Default
    }
}
