//! # tsumugi_parser
//!
//! Source-to-tree parsers for Tsumugi.
//!
//! This crate provides:
//! - A `Parser` trait for implementing custom parsers
//! - Built-in Markdown parser using `markdown-rs`
//! - Built-in plain text parser
//!
//! ## Architecture
//!
//! Parsers convert source text into an owned mdast [`Node`] tree whose
//! root is always a `root` node. Processor plugins wrap a parser to install
//! it as the processor's parse step.
//!
//! ## Example
//!
//! ```rust
//! use tsumugi_ast::{Node, NodeKind};
//! use tsumugi_parser::{MarkdownParser, Parser};
//!
//! let parser = MarkdownParser::new();
//! let tree = parser.parse("# Hello\n\nThis is a paragraph.").unwrap();
//!
//! assert_eq!(tree.kind(), NodeKind::Root);
//! assert_eq!(tree.children().map(<[Node]>::len), Some(2));
//! ```
//!
//! [`Node`]: tsumugi_ast::Node

mod error;
mod markdown;
mod text;
mod traits;

pub use error::ParseError;
pub use markdown::{MarkdownOptions, MarkdownParser};
pub use text::PlainTextParser;
pub use traits::Parser;
