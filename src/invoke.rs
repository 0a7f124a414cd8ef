//! Parser invocation
//!
//! Turns the caller's options into the source parser's option set and runs
//! the parser through the [`SourceParser`] seam. Tokens and ranges are
//! always requested; `super` outside methods is never allowed, whatever the
//! caller asked for.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::base::SourceText;
use crate::errors::{Error, normalize};
use crate::raw::{RawParse, RawSyntaxError};

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    #[default]
    Module,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Module => "module",
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, Self::Module)
    }
}

/// A source parser plugin, optionally with plugin options.
///
/// Deserializes from either `"name"` or `["name", {options}]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "PluginRepr", into = "PluginRepr")]
pub struct PluginSpec {
    pub name: String,
    pub options: Option<Value>,
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum PluginRepr {
    Name(String),
    WithOptions(String, Value),
}

impl From<PluginRepr> for PluginSpec {
    fn from(repr: PluginRepr) -> Self {
        match repr {
            PluginRepr::Name(name) => PluginSpec::new(name),
            PluginRepr::WithOptions(name, options) => PluginSpec::with_options(name, options),
        }
    }
}

impl From<PluginSpec> for PluginRepr {
    fn from(spec: PluginSpec) -> Self {
        match spec.options {
            Some(options) => PluginRepr::WithOptions(spec.name, options),
            None => PluginRepr::Name(spec.name),
        }
    }
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options: Some(options),
        }
    }
}

/// Options the caller passes through to the source parser
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceParserOptions {
    pub source_type: SourceType,
    /// Enable JSX syntax
    pub jsx: bool,
    /// Force strict mode on or off; `None` follows the source type
    pub strict: Option<bool>,
    /// Allow `return` at the top level
    pub global_return: bool,
    pub allow_import_export_everywhere: bool,
    /// Enable BigInt and numeric separator literals
    pub extended_literals: bool,
    /// Additional plugins, appended after the built-in set
    pub extra_plugins: Vec<PluginSpec>,
}

impl Default for SourceParserOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Module,
            jsx: true,
            strict: None,
            global_return: false,
            allow_import_export_everywhere: false,
            extended_literals: true,
            extra_plugins: Vec::new(),
        }
    }
}

/// Options for one adapted parse
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    pub source_parser_options: SourceParserOptions,
    /// Run the scope analyzer on the adapted tree
    pub request_scope_manager: bool,
    /// Attach the visitor-key map to the result
    pub request_visitor_keys: bool,
    /// Append a code frame to syntax error messages
    pub code_frame: bool,
    pub ecma_version: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_parser_options: SourceParserOptions::default(),
            request_scope_manager: true,
            request_visitor_keys: true,
            code_frame: false,
            ecma_version: 2022,
        }
    }
}

impl ParseOptions {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn script() -> Self {
        let mut options = Self::default();
        options.source_parser_options.source_type = SourceType::Script;
        options
    }

    pub fn source_type(&self) -> SourceType {
        self.source_parser_options.source_type
    }
}

/// The option set handed to the source parser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOptions {
    pub source_type: SourceType,
    pub strict_mode: Option<bool>,
    pub allow_import_export_everywhere: bool,
    pub allow_return_outside_function: bool,
    pub allow_super_outside_method: bool,
    pub ranges: bool,
    pub tokens: bool,
    pub plugins: Vec<PluginSpec>,
}

/// Syntax the target contract supports and the source parser gates behind
/// plugins
const BASE_PLUGINS: &[&str] = &[
    "classProperties",
    "classPrivateProperties",
    "classPrivateMethods",
    "classStaticBlock",
    "dynamicImport",
    "exportDefaultFrom",
    "exportNamespaceFrom",
    "importMeta",
    "logicalAssignment",
    "nullishCoalescingOperator",
    "objectRestSpread",
    "optionalCatchBinding",
    "optionalChaining",
    "topLevelAwait",
];

impl NormalizedOptions {
    pub fn from_options(options: &SourceParserOptions) -> Self {
        let mut plugins: Vec<PluginSpec> =
            BASE_PLUGINS.iter().map(|name| PluginSpec::new(*name)).collect();
        plugins.push(PluginSpec::with_options(
            "pipelineOperator",
            serde_json::json!({ "proposal": "minimal" }),
        ));
        if options.jsx {
            plugins.push(PluginSpec::new("jsx"));
        }
        if options.extended_literals {
            plugins.push(PluginSpec::new("bigInt"));
            plugins.push(PluginSpec::new("numericSeparator"));
        }
        for extra in &options.extra_plugins {
            if !plugins.iter().any(|plugin| plugin.name == extra.name) {
                plugins.push(extra.clone());
            }
        }

        Self {
            source_type: options.source_type,
            strict_mode: options.strict,
            allow_import_export_everywhere: options.allow_import_export_everywhere,
            allow_return_outside_function: options.global_return,
            allow_super_outside_method: false,
            ranges: true,
            tokens: true,
            plugins,
        }
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.name == name)
    }
}

// ============================================================================
// SOURCE PARSER SEAM
// ============================================================================

/// A parser producing source-dialect output
pub trait SourceParser {
    fn parse(&self, text: &str, options: &NormalizedOptions) -> Result<RawParse, RawSyntaxError>;
}

impl<F> SourceParser for F
where
    F: Fn(&str, &NormalizedOptions) -> Result<RawParse, RawSyntaxError>,
{
    fn parse(&self, text: &str, options: &NormalizedOptions) -> Result<RawParse, RawSyntaxError> {
        self(text, options)
    }
}

/// A source parser that replays recorded, serialized output.
///
/// Each program text maps to the JSON the real parser produced for it
/// (see [`RawParse::from_json`]).
#[derive(Debug, Clone, Default)]
pub struct JsonSourceParser {
    outputs: FxHashMap<String, String>,
}

impl JsonSourceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, text: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(text, json);
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, json: impl Into<String>) {
        self.outputs.insert(text.into(), json.into());
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl SourceParser for JsonSourceParser {
    fn parse(&self, text: &str, _options: &NormalizedOptions) -> Result<RawParse, RawSyntaxError> {
        let json = self
            .outputs
            .get(text)
            .ok_or_else(|| RawSyntaxError::new("no recorded parser output for this program"))?;
        match RawParse::from_json(json) {
            Ok(outcome) => outcome,
            Err(err) => Err(RawSyntaxError::new(format!(
                "recorded parser output is not valid: {err}"
            ))),
        }
    }
}

/// Run the source parser, reshaping any failure into a target syntax error.
pub fn invoke<P: SourceParser + ?Sized>(
    parser: &P,
    source: &SourceText<'_>,
    options: &ParseOptions,
) -> Result<RawParse, Error> {
    let normalized = NormalizedOptions::from_options(&options.source_parser_options);
    tracing::debug!(
        source_type = normalized.source_type.as_str(),
        plugins = normalized.plugins.len(),
        "invoking source parser"
    );

    parser
        .parse(source.as_str(), &normalized)
        .map_err(|raw| Error::Syntax(normalize(&raw, source, options.code_frame)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(options.request_scope_manager);
        assert!(options.request_visitor_keys);
        assert!(!options.code_frame);
        assert_eq!(options.ecma_version, 2022);
        assert_eq!(options.source_type(), SourceType::Module);
        assert!(options.source_parser_options.jsx);
    }

    #[test]
    fn test_options_from_camel_case_json() {
        let options = ParseOptions::from_json(
            r#"{
                "sourceParserOptions": {
                    "sourceType": "script",
                    "jsx": false,
                    "globalReturn": true,
                    "extraPlugins": ["decorators-legacy", ["flow", {"all": true}]]
                },
                "codeFrame": true
            }"#,
        )
        .unwrap();
        let parser = &options.source_parser_options;
        assert_eq!(parser.source_type, SourceType::Script);
        assert!(!parser.jsx);
        assert!(parser.global_return);
        assert!(parser.extended_literals);
        assert!(options.code_frame);
        assert_eq!(parser.extra_plugins[0], PluginSpec::new("decorators-legacy"));
        assert_eq!(
            parser.extra_plugins[1],
            PluginSpec::with_options("flow", serde_json::json!({"all": true}))
        );
    }

    #[test]
    fn test_normalized_always_requests_tokens_and_ranges() {
        let normalized = NormalizedOptions::from_options(&SourceParserOptions::default());
        assert!(normalized.tokens);
        assert!(normalized.ranges);
        assert!(!normalized.allow_super_outside_method);
    }

    #[rstest]
    #[case("jsx", true)]
    #[case("optionalChaining", true)]
    #[case("classPrivateMethods", true)]
    #[case("pipelineOperator", true)]
    #[case("bigInt", true)]
    #[case("decorators", false)]
    fn test_default_plugins(#[case] name: &str, #[case] enabled: bool) {
        let normalized = NormalizedOptions::from_options(&SourceParserOptions::default());
        assert_eq!(normalized.has_plugin(name), enabled);
    }

    #[test]
    fn test_pipeline_uses_minimal_proposal() {
        let normalized = NormalizedOptions::from_options(&SourceParserOptions::default());
        let pipeline = normalized
            .plugins
            .iter()
            .find(|plugin| plugin.name == "pipelineOperator")
            .unwrap();
        assert_eq!(pipeline.options, Some(serde_json::json!({"proposal": "minimal"})));
    }

    #[test]
    fn test_extra_plugins_are_deduplicated() {
        let options = SourceParserOptions {
            jsx: false,
            extended_literals: false,
            extra_plugins: vec![PluginSpec::new("jsx"), PluginSpec::new("jsx"), PluginSpec::new("flow")],
            ..Default::default()
        };
        let normalized = NormalizedOptions::from_options(&options);
        let jsx = normalized.plugins.iter().filter(|p| p.name == "jsx").count();
        assert_eq!(jsx, 1);
        assert!(normalized.has_plugin("flow"));
        assert!(!normalized.has_plugin("bigInt"));
    }

    #[test]
    fn test_invoke_normalizes_failures() {
        let parser = |_: &str, _: &NormalizedOptions| -> Result<RawParse, RawSyntaxError> {
            Err(RawSyntaxError::new("'return' outside of function (1:0)").at(0, 1, 0))
        };
        let source = SourceText::new("return;");
        let err = invoke(&parser, &source, &ParseOptions::default()).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.message, "'return' outside of function");
        assert_eq!(syntax.column(), Some(1));
    }

    #[test]
    fn test_json_parser_replays_recorded_output() {
        let parser = JsonSourceParser::new().with_output(
            "",
            r#"{"type": "File", "program": {"type": "Program", "start": 0, "end": 0, "body": []}}"#,
        );
        let normalized = NormalizedOptions::from_options(&SourceParserOptions::default());
        assert!(parser.parse("", &normalized).is_ok());
        assert!(parser.parse("x", &normalized).is_err());
    }
}
