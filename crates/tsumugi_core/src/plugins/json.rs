//! mdast JSON stringify plugin.

use serde::{Deserialize, Serialize};
use tsumugi_ast::Node;

use crate::VFile;
use crate::plugin::{BoxError, Compiler, Plugin, Setup};

/// Options accepted by [`JsonStringify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonStringifyOptions {
    /// Indent the output. Defaults to true.
    pub pretty: bool,
}

impl Default for JsonStringifyOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Installs a [`JsonCompiler`] as the processor's compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringify;

impl Plugin for JsonStringify {
    fn name(&self) -> &str {
        "json-stringify"
    }

    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError> {
        let options: JsonStringifyOptions = setup.options_as()?;
        setup.set_compiler(JsonCompiler {
            pretty: options.pretty,
        });
        Ok(())
    }
}

/// Compiles a tree to mdast JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonCompiler {
    pub pretty: bool,
}

impl Compiler for JsonCompiler {
    fn name(&self) -> &str {
        "json"
    }

    fn compile(&self, tree: &Node, _file: &VFile) -> Result<String, BoxError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(json)
    }
}
