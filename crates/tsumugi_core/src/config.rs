//! Pipeline configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tsumugi_parser::{Parser, PlainTextParser};

use crate::plugins::{JsonStringify, MarkdownParse, PlainTextParse, TextStringify};
use crate::{ConfigError, Processor, ProcessorError};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Which parser a pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    Markdown,
    Text,
}

impl ParserKind {
    /// Picks the parser for a file extension: plain text for `.txt` and
    /// `.text`, Markdown for anything else.
    pub fn for_extension(extension: &str) -> Self {
        if PlainTextParser::new().can_parse(extension) {
            ParserKind::Text
        } else {
            ParserKind::Markdown
        }
    }
}

/// Which compiler a pipeline uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// mdast JSON.
    #[default]
    Json,
    /// Flattened text.
    Text,
}

/// Configuration of a processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Parser to use; chosen from the file extension when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<ParserKind>,

    /// Enable GitHub Flavored Markdown.
    #[serde(default = "default_true")]
    pub gfm: bool,

    /// Enable YAML frontmatter.
    #[serde(default)]
    pub frontmatter: bool,

    /// Output format.
    #[serde(default)]
    pub output: OutputFormat,

    /// Indent JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Values written to the processor data store.
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl PipelineConfig {
    /// File names searched for by [`discover`](Self::discover), in order.
    pub const CONFIG_FILES: &[&str] = &[".tsumugi.jsonc", ".tsumugi.json"];

    /// Contents written by `tsumugi init`.
    pub const DEFAULT_CONFIG: &str = r#"{
  // "markdown" or "text"; chosen from the file extension when omitted
  // "parser": "markdown",
  "gfm": true,
  "frontmatter": false,
  "output": "json",
  "pretty": true,
  "data": {}
}
"#;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            parser: None,
            gfm: true,
            frontmatter: false,
            output: OutputFormat::Json,
            pretty: true,
            data: Map::new(),
        }
    }

    /// Returns the first configuration file that exists in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.tsumugi.jsonc`, `.tsumugi.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_jsonc(&content)
    }

    /// Parses configuration from a JSONC string with schema validation.
    ///
    /// An empty document yields the default configuration.
    pub fn from_jsonc(content: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(content, &Default::default())
            .map_err(|e| ConfigError::syntax(e.to_string()))?
            .unwrap_or_else(|| Value::Object(Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| ConfigError::validation(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            return Err(ConfigError::validation(format!(
                "{} at {}",
                e,
                e.instance_path()
            )));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Returns the parser for a file with the given extension.
    pub fn parser_for(&self, extension: Option<&str>) -> ParserKind {
        self.parser
            .or_else(|| extension.map(ParserKind::for_extension))
            .unwrap_or(ParserKind::Markdown)
    }

    /// Builds a processor with the built-in plugins this configuration
    /// selects, for a file with the given extension.
    pub fn build_processor(&self, extension: Option<&str>) -> Result<Processor, ProcessorError> {
        let mut processor = Processor::new();

        match self.parser_for(extension) {
            ParserKind::Markdown => processor.use_plugin_with(
                MarkdownParse,
                json!({ "gfm": self.gfm, "frontmatter": self.frontmatter }),
            )?,
            ParserKind::Text => processor.use_plugin(PlainTextParse)?,
        };

        for (key, value) in &self.data {
            processor.set_data(key.clone(), value.clone())?;
        }

        match self.output {
            OutputFormat::Json => {
                processor.use_plugin_with(JsonStringify, json!({ "pretty": self.pretty }))?
            }
            OutputFormat::Text => processor.use_plugin(TextStringify)?,
        };

        Ok(processor)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();

        assert_eq!(config.parser, None);
        assert!(config.gfm);
        assert!(!config.frontmatter);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.pretty);
        assert!(config.data.is_empty());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(PipelineConfig::from_jsonc("").unwrap(), PipelineConfig::new());
        assert_eq!(PipelineConfig::from_jsonc("{}").unwrap(), PipelineConfig::new());
    }

    #[test]
    fn test_default_config_template_is_valid() {
        let config = PipelineConfig::from_jsonc(PipelineConfig::DEFAULT_CONFIG).unwrap();

        assert_eq!(config, PipelineConfig::new());
    }

    #[test]
    fn test_config_from_jsonc_with_comments() {
        let jsonc = r#"{
            // plain text in, text out
            "parser": "text",
            "output": "text",
            "data": { "author": "me" }, /* trailing comma below */
        }"#;

        let config = PipelineConfig::from_jsonc(jsonc).unwrap();

        assert_eq!(config.parser, Some(ParserKind::Text));
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.data.get("author"), Some(&json!("me")));
    }

    #[rstest]
    #[case::unknown_property(r#"{ "parsers": "text" }"#, "Config validation failed")]
    #[case::type_mismatch(r#"{ "gfm": "yes" }"#, "Config validation failed")]
    #[case::invalid_enum_value(r#"{ "output": "html" }"#, "Config validation failed")]
    #[case::data_not_object(r#"{ "data": [] }"#, "Config validation failed")]
    #[case::syntax(r#"{ "gfm": tru }"#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let result = PipelineConfig::from_jsonc(json);
        assert!(result.is_err(), "Expected error for JSON: {}", json);
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[rstest]
    #[case("md", ParserKind::Markdown)]
    #[case("markdown", ParserKind::Markdown)]
    #[case("txt", ParserKind::Text)]
    #[case("TEXT", ParserKind::Text)]
    #[case("rst", ParserKind::Markdown)]
    fn test_parser_for_extension(#[case] extension: &str, #[case] expected: ParserKind) {
        assert_eq!(PipelineConfig::new().parser_for(Some(extension)), expected);
    }

    #[test]
    fn test_explicit_parser_wins_over_extension() {
        let config = PipelineConfig {
            parser: Some(ParserKind::Markdown),
            ..PipelineConfig::new()
        };

        assert_eq!(config.parser_for(Some("txt")), ParserKind::Markdown);
        assert_eq!(PipelineConfig::new().parser_for(None), ParserKind::Markdown);
    }

    #[test]
    fn test_build_processor_selects_plugins() {
        let config = PipelineConfig {
            output: OutputFormat::Text,
            data: Map::from_iter([("k".to_string(), json!(1))]),
            ..PipelineConfig::new()
        };

        let processor = config.build_processor(Some("txt")).unwrap();

        assert_eq!(processor.plugins(), vec!["text-parse", "text-stringify"]);
        assert_eq!(processor.data("k"), Some(&json!(1)));
        assert!(!processor.is_frozen());
    }

    #[test]
    fn test_build_processor_markdown_to_json() {
        let processor = PipelineConfig::new().build_processor(Some("md")).unwrap();

        let file = processor.process_sync("# Hi").unwrap();
        let value: Value = serde_json::from_str(&file.value).unwrap();

        assert_eq!(value["children"][0]["type"], "heading");
        assert_eq!(value["children"][0]["depth"], 1);
    }

    #[test]
    fn test_from_file_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PipelineConfig::discover(dir.path()), None);

        let path = dir.path().join(".tsumugi.json");
        fs::write(&path, r#"{ "pretty": false }"#).unwrap();

        let found = PipelineConfig::discover(dir.path()).unwrap();
        assert_eq!(found, path);

        let config = PipelineConfig::from_file(&found).unwrap();
        assert_eq!(
            config,
            PipelineConfig {
                pretty: false,
                ..PipelineConfig::new()
            }
        );
    }

    #[test]
    fn test_jsonc_file_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".tsumugi.json"), "{}").unwrap();
        fs::write(dir.path().join(".tsumugi.jsonc"), "{}").unwrap();

        let found = PipelineConfig::discover(dir.path()).unwrap();

        assert!(found.ends_with(".tsumugi.jsonc"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = PipelineConfig::from_file("does/not/exist.jsonc").unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
