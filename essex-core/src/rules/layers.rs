//! Built-in rule layers.

use serde_json::json;

use super::header::HeaderSource;
use super::RuleLayer;

/// Rule sets shared by every file type.
pub const COMMON_EXTENDS: [&str; 8] = [
    "plugin:react/recommended",
    "plugin:jsx-a11y/recommended",
    "plugin:jest/recommended",
    "plugin:jest/style",
    "plugin:react-hooks/recommended",
    "prettier",
    "prettier/react",
    "plugin:import/recommended",
];

/// Rule sets added for TypeScript sources.
pub const TS_EXTENDS: [&str; 3] = [
    "plugin:import/typescript",
    "plugin:@typescript-eslint/recommended",
    "prettier/@typescript-eslint",
];

pub const PLUGINS: [&str; 8] = [
    "@essex/eslint-plugin",
    "eslint-plugin-header",
    "eslint-plugin-import",
    "eslint-plugin-jsx-a11y",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
    "eslint-plugin-jest",
    "@typescript-eslint/eslint-plugin",
];

/// Browser globals that are easy to reference by accident.
pub const RESTRICTED_GLOBALS: [&str; 12] = [
    "addEventListener",
    "blur",
    "close",
    "event",
    "focus",
    "length",
    "location",
    "name",
    "open",
    "parent",
    "self",
    "status",
];

/// Generic JavaScript rules.
pub fn react_app() -> RuleLayer {
    let mut restricted = vec![json!("error")];
    restricted.extend(RESTRICTED_GLOBALS.iter().map(|g| json!(g)));

    RuleLayer::new("react-app")
        .rule("react/react-in-jsx-scope", json!("off"))
        .rule("array-callback-return", json!("warn"))
        .rule("default-case", json!(["warn", { "commentPattern": "^no default$" }]))
        .rule("eqeqeq", json!(["warn", "smart"]))
        .rule("no-array-constructor", json!("warn"))
        .rule("no-caller", json!("warn"))
        .rule("no-cond-assign", json!(["warn", "except-parens"]))
        .rule("no-const-assign", json!("warn"))
        .rule("no-dupe-args", json!("warn"))
        .rule("no-dupe-class-members", json!("warn"))
        .rule("no-dupe-keys", json!("warn"))
        .rule("no-duplicate-case", json!("warn"))
        .rule("no-eval", json!("warn"))
        .rule("no-fallthrough", json!("warn"))
        .rule("no-implied-eval", json!("warn"))
        .rule("no-labels", json!(["warn", { "allowLoop": true, "allowSwitch": false }]))
        .rule("no-redeclare", json!(["warn", { "builtinGlobals": false }]))
        .rule("no-restricted-syntax", json!(["warn", "WithStatement"]))
        .rule("no-self-compare", json!("warn"))
        .rule("no-sequences", json!("warn"))
        .rule("no-throw-literal", json!("warn"))
        .rule("no-undef", json!("error"))
        .rule("no-restricted-globals", json!(restricted))
        .rule("no-unreachable", json!("warn"))
        .rule(
            "no-unused-expressions",
            json!(["error", {
                "allowShortCircuit": true,
                "allowTernary": true,
                "allowTaggedTemplates": true,
            }]),
        )
        .rule(
            "no-unused-vars",
            json!(["warn", { "args": "none", "ignoreRestSiblings": true }]),
        )
        .rule(
            "no-use-before-define",
            json!(["warn", { "functions": false, "classes": false, "variables": false }]),
        )
        .rule("no-useless-constructor", json!("warn"))
        .rule("no-useless-escape", json!("warn"))
        .rule("no-with", json!("warn"))
        .rule("require-yield", json!("warn"))
        .rule("strict", json!(["warn", "never"]))
        .rule("use-isnan", json!("warn"))
        .rule("valid-typeof", json!("warn"))
        .rule("getter-return", json!("warn"))
        .rule("import/first", json!("error"))
        .rule("import/no-amd", json!("error"))
        .rule("import/no-webpack-loader-syntax", json!("error"))
        .rule("react/jsx-no-duplicate-props", json!("warn"))
        .rule("react/jsx-no-undef", json!("error"))
        .rule("react/no-direct-mutation-state", json!("warn"))
        .rule("react/require-render-return", json!("error"))
        .rule("react-hooks/rules-of-hooks", json!("error"))
        .rule("react-hooks/exhaustive-deps", json!("warn"))
}

/// TypeScript replacements for rules `tsc` or typescript-eslint cover better.
pub fn typescript() -> RuleLayer {
    RuleLayer::new("typescript")
        .rule("default-case", json!("off"))
        .rule("no-dupe-class-members", json!("off"))
        .rule("no-undef", json!("off"))
        .rule("@typescript-eslint/consistent-type-assertions", json!("warn"))
        .rule("no-array-constructor", json!("off"))
        .rule("@typescript-eslint/no-array-constructor", json!("warn"))
        .rule("no-use-before-define", json!("off"))
        .rule(
            "@typescript-eslint/no-use-before-define",
            json!(["warn", {
                "functions": false,
                "classes": false,
                "variables": false,
                "typedefs": false,
            }]),
        )
        .rule("no-unused-expressions", json!("off"))
        .rule(
            "@typescript-eslint/no-unused-expressions",
            json!(["error", {
                "allowShortCircuit": true,
                "allowTernary": true,
                "allowTaggedTemplates": true,
            }]),
        )
        .rule("no-unused-vars", json!("off"))
        .rule(
            "@typescript-eslint/no-unused-vars",
            json!(["warn", { "args": "none", "ignoreRestSiblings": true }]),
        )
        .rule("no-useless-constructor", json!("off"))
        .rule("@typescript-eslint/no-useless-constructor", json!("warn"))
}

/// Organization overrides.
pub fn essex(header: &HeaderSource) -> RuleLayer {
    RuleLayer::new("essex")
        .rule("header/header", header.rule_value())
        .rule("@essex/adjacent-await", json!("warn"))
        .rule("no-plusplus", json!("off"))
        .rule("react/prop-types", json!("off"))
        .rule("import/order", json!(["warn", { "alphabetize": { "order": "asc" } }]))
        .rule("@typescript-eslint/interface-name-prefix", json!("off"))
}
