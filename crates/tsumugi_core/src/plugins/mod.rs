//! Built-in plugins.
//!
//! - [`MarkdownParse`] - installs the Markdown parser
//! - [`PlainTextParse`] - installs the plain text parser
//! - [`JsonStringify`] - compiles the tree to mdast JSON
//! - [`TextStringify`] - compiles the tree to its flattened text

mod json;
mod markdown;
mod text;

pub use json::{JsonCompiler, JsonStringify, JsonStringifyOptions};
pub use markdown::{MarkdownParse, MarkdownParseOptions};
pub use text::{PlainTextParse, TextCompiler, TextStringify};
