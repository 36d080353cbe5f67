//! Markdown parse plugin.

use serde::{Deserialize, Serialize};
use tsumugi_parser::{MarkdownOptions, MarkdownParser};

use crate::plugin::{BoxError, Plugin, Setup};

/// Options accepted by [`MarkdownParse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownParseOptions {
    /// Enable GitHub Flavored Markdown. Defaults to true.
    pub gfm: bool,
    /// Enable YAML frontmatter. Defaults to false.
    pub frontmatter: bool,
}

impl Default for MarkdownParseOptions {
    fn default() -> Self {
        let defaults = MarkdownOptions::default();
        Self {
            gfm: defaults.gfm,
            frontmatter: defaults.frontmatter,
        }
    }
}

/// Installs a [`MarkdownParser`] as the processor's parser.
///
/// ```rust
/// use serde_json::json;
/// use tsumugi_core::Processor;
/// use tsumugi_core::plugins::MarkdownParse;
///
/// let mut processor = Processor::new();
/// processor.use_plugin_with(MarkdownParse, json!({ "frontmatter": true }))?;
///
/// let tree = processor.parse("---\ntitle: x\n---")?;
/// assert_eq!(tree.children().unwrap()[0].kind().as_str(), "yaml");
/// # Ok::<(), tsumugi_core::ProcessorError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParse;

impl Plugin for MarkdownParse {
    fn name(&self) -> &str {
        "markdown-parse"
    }

    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError> {
        let options: MarkdownParseOptions = setup.options_as()?;
        setup.set_parser(MarkdownParser::with_options(MarkdownOptions {
            gfm: options.gfm,
            frontmatter: options.frontmatter,
        }));
        Ok(())
    }
}
