//! Lint configuration assembly.
//!
//! Rule tables are applied as named layers in a fixed order; a later layer
//! replaces any rule an earlier layer set. The result is an ESLint
//! configuration document with one override per source flavor.

pub mod header;
pub mod layers;

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::EssexConfig;

pub use header::{resolve_header, HeaderSource};

/// Glob of the TypeScript override.
pub const TS_FILES: &str = "**/*.ts?(x)";
/// Glob of the JavaScript override.
pub const JS_FILES: &str = "**/*.js?(x)";

/// A named table of rule settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleLayer {
    name: String,
    rules: IndexMap<String, Value>,
}

impl RuleLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    pub fn from_rules(name: impl Into<String>, rules: IndexMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn rule(mut self, id: impl Into<String>, setting: Value) -> Self {
        self.rules.insert(id.into(), setting);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &IndexMap<String, Value> {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Applies layers in the order they are added.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    layers: Vec<RuleLayer>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(mut self, layer: RuleLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> RuleSet {
        let mut rules: IndexMap<String, Value> = IndexMap::new();
        let mut layer_names = Vec::with_capacity(self.layers.len());
        for layer in self.layers {
            tracing::trace!(layer = %layer.name, rules = layer.rules.len(), "applying rule layer");
            layer_names.push(layer.name);
            // `insert` keeps the position of an existing key and replaces its value
            for (id, setting) in layer.rules {
                rules.insert(id, setting);
            }
        }
        RuleSet { layer_names, rules }
    }
}

/// Final, read-only rule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    #[serde(skip)]
    layer_names: Vec<String>,
    rules: IndexMap<String, Value>,
}

impl RuleSet {
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.rules.iter()
    }

    /// Names of the applied layers, in application order.
    pub fn layer_names(&self) -> &[String] {
        &self.layer_names
    }
}

/// Settings for one file pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    pub files: Vec<String>,
    pub parser: String,
    pub extends: Vec<String>,
    pub parser_options: Value,
    pub rules: RuleSet,
}

/// The assembled ESLint configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintConfig {
    pub plugins: Vec<String>,
    pub extends: Vec<String>,
    pub env: Value,
    pub settings: Value,
    pub overrides: Vec<Override>,
}

impl LintConfig {
    pub fn typescript(&self) -> Option<&Override> {
        self.overrides
            .iter()
            .find(|o| o.files.iter().any(|f| f == TS_FILES))
    }

    pub fn javascript(&self) -> Option<&Override> {
        self.overrides
            .iter()
            .find(|o| o.files.iter().any(|f| f == JS_FILES))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the configuration for the given header and optional project layer.
///
/// TypeScript files get react-app, typescript and essex layers; JavaScript
/// files skip the typescript layer. The project layer, when present, is
/// applied last to both.
pub fn build_lint_config(header: &HeaderSource, project: Option<RuleLayer>) -> LintConfig {
    let project = project.filter(|layer| !layer.is_empty());

    let mut ts_rules = RuleSetBuilder::new()
        .layer(layers::react_app())
        .layer(layers::typescript())
        .layer(layers::essex(header));
    let mut js_rules = RuleSetBuilder::new()
        .layer(layers::react_app())
        .layer(layers::essex(header));
    if let Some(project) = project {
        ts_rules = ts_rules.layer(project.clone());
        js_rules = js_rules.layer(project);
    }

    let common = strings(&layers::COMMON_EXTENDS);
    let mut ts_extends = common.clone();
    ts_extends.extend(strings(&layers::TS_EXTENDS));

    LintConfig {
        plugins: strings(&layers::PLUGINS),
        extends: common.clone(),
        env: json!({
            "browser": true,
            "commonjs": true,
            "es6": true,
            "node": true,
            "jest/globals": true,
        }),
        settings: json!({
            "react": { "version": "detect" },
            "jest": { "version": 26 },
        }),
        overrides: vec![
            Override {
                files: vec![TS_FILES.to_string()],
                parser: "@typescript-eslint/parser".to_string(),
                extends: ts_extends,
                parser_options: json!({
                    "ecmaVersion": 2018,
                    "sourceType": "module",
                    "ecmaFeatures": { "jsx": true },
                    "warnOnUnsupportedTypeScriptVersion": true,
                }),
                rules: ts_rules.build(),
            },
            Override {
                files: vec![JS_FILES.to_string()],
                parser: "babel-eslint".to_string(),
                extends: common,
                parser_options: json!({
                    "ecmaVersion": 2018,
                    "sourceType": "module",
                    "ecmaFeatures": { "jsx": true },
                }),
                rules: js_rules.build(),
            },
        ],
    }
}

/// Configuration for the project rooted at `cwd`, honoring a `header.js`
/// override and the `[rules]` table of `essex.toml`.
pub fn lint_config_for(cwd: &Path, config: &EssexConfig) -> LintConfig {
    let header = resolve_header(cwd, |path| path.is_file());
    let project = RuleLayer::from_rules("project", config.rules.clone());
    build_lint_config(&header, Some(project))
}
