//! Processor and configuration error types.

use std::path::PathBuf;

use thiserror::Error;
use tsumugi_parser::ParseError;

use crate::plugin::BoxError;

/// Errors returned by [`Processor`](crate::Processor) operations.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// A write was attempted after the processor was frozen.
    #[error("Cannot {operation} on a frozen processor")]
    Frozen {
        /// The rejected operation.
        operation: &'static str,
    },

    /// `parse` was called but no plugin installed a parser.
    #[error("Cannot parse without a parser")]
    MissingParser,

    /// `stringify` was called but no plugin installed a compiler.
    #[error("Cannot stringify without a compiler")]
    MissingCompiler,

    /// A transformer failed during `run`.
    #[error("Plugin '{plugin}' failed: {source}")]
    Stage {
        /// Name of the plugin that registered the transformer.
        plugin: String,
        /// The transformer's error.
        source: BoxError,
    },

    /// A plugin rejected its options while being attached.
    #[error("Plugin '{plugin}' could not be attached: {message}")]
    Attach {
        /// Name of the plugin.
        plugin: String,
        /// Error message.
        message: String,
    },

    /// The parser failed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The compiler failed.
    #[error("Compiler '{compiler}' failed: {message}")]
    Compile {
        /// Name of the compiler.
        compiler: String,
        /// Error message.
        message: String,
    },

    /// The blocking driver could not start its runtime.
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),

    /// A blocking driver was called from inside a tokio runtime.
    #[error("Cannot {operation} from within an async runtime; use the async form instead")]
    AsyncContext {
        /// The rejected operation.
        operation: &'static str,
    },
}

impl ProcessorError {
    /// Creates a frozen-processor error for `operation`.
    pub fn frozen(operation: &'static str) -> Self {
        Self::Frozen { operation }
    }

    /// Creates an error for a blocking call made inside a runtime.
    pub fn async_context(operation: &'static str) -> Self {
        Self::AsyncContext { operation }
    }

    /// Creates a stage error for a failed transformer.
    pub fn stage(plugin: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Stage {
            plugin: plugin.into(),
            source: source.into(),
        }
    }

    /// Creates an attachment error.
    pub fn attach(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Attach {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Creates a compiler error.
    pub fn compile(compiler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Compile {
            compiler: compiler.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors caused by how the processor was set up
    /// rather than by the document being processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Frozen { .. } | Self::MissingParser | Self::MissingCompiler
        )
    }
}

/// Errors that can occur while loading a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSONC.
    #[error("Invalid JSON: {0}")]
    Syntax(String),

    /// The document does not match the configuration schema.
    #[error("Config validation failed: {0}")]
    Validation(String),

    /// The document matched the schema but could not be deserialized.
    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a syntax error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Creates a schema validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
