//! # tsumugi_core
//!
//! Plugin-driven document processor for Tsumugi.
//!
//! This crate provides:
//! - The [`Processor`] pipeline (parse → run → stringify)
//! - The [`Plugin`], [`Transformer`] and [`Compiler`] extension points
//! - [`VFile`], the document and its diagnostics
//! - Built-in [`plugins`] and [`PipelineConfig`] loading
//!
//! ## Example
//!
//! ```rust
//! use tsumugi_ast::{Node, NodeKind, visit};
//! use tsumugi_core::plugins::{MarkdownParse, TextStringify};
//! use tsumugi_core::{Processor, plugin_fn, transform_fn};
//!
//! let count_headings = plugin_fn("count-headings", |setup| {
//!     setup.add_transformer(transform_fn(|tree, file| {
//!         let mut count = 0;
//!         visit(tree, NodeKind::Heading, |_| count += 1);
//!         file.info(format!("{count} heading(s)"), None);
//!         Ok(None)
//!     }));
//!     Ok(())
//! });
//!
//! let mut processor = Processor::new();
//! processor
//!     .use_plugin(MarkdownParse)?
//!     .use_plugin(count_headings)?
//!     .use_plugin(TextStringify)?;
//!
//! let file = processor.process_sync("# One\n\n## Two")?;
//! assert_eq!(file.value, "One\n\nTwo");
//! assert_eq!(file.messages[0].reason, "2 heading(s)");
//! assert_eq!(file.messages[0].source.as_deref(), Some("count-headings"));
//! # Ok::<(), tsumugi_core::ProcessorError>(())
//! ```

mod config;
mod error;
mod plugin;
pub mod plugins;
mod processor;
mod vfile;

pub use config::{OutputFormat, ParserKind, PipelineConfig};
pub use error::{ConfigError, ProcessorError};
pub use plugin::{
    BoxError, Compiler, FnPlugin, FnTransformer, Plugin, Preset, Setup, Transformer, plugin_fn,
    transform_fn,
};
pub use processor::{Processor, SETTINGS_KEY};
pub use vfile::{Severity, VFile, VFileMessage};

pub use tsumugi_ast::Node;
pub use tsumugi_parser::{ParseError, Parser};
