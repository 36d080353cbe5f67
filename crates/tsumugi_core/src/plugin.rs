//! Plugin, transformer and compiler abstractions.
//!
//! A [`Plugin`] is attached to a [`Processor`](crate::Processor) once. While
//! attaching, it receives a [`Setup`] through which it may install a parser,
//! install a compiler, register a transformer and write processor data.
//! Nothing a plugin does through `Setup` takes effect unless `attach`
//! returns `Ok`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tsumugi_ast::Node;
use tsumugi_parser::Parser;

use crate::VFile;

/// Error type returned by plugins, transformers and compilers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A stage that rewrites the tree during [`Processor::run`](crate::Processor::run).
///
/// A transformer either mutates `tree` in place and returns `Ok(None)`, or
/// returns `Ok(Some(tree))` to replace it.
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(
        &self,
        tree: &mut Node,
        file: &mut VFile,
    ) -> Result<Option<Node>, BoxError>;
}

/// Wraps a synchronous closure as a [`Transformer`].
///
/// ```rust
/// use tsumugi_ast::{Node, NodeKind, visit_mut};
/// use tsumugi_core::{Processor, VFile, plugin_fn, transform_fn};
///
/// let shout = plugin_fn("shout", |setup| {
///     setup.add_transformer(transform_fn(|tree, _file| {
///         visit_mut(tree, NodeKind::Text, |node| {
///             if let Some(value) = node.value_mut() {
///                 value.make_ascii_uppercase();
///             }
///         });
///         Ok(None)
///     }));
///     Ok(())
/// });
///
/// let mut processor = Processor::new();
/// processor.use_plugin(shout).unwrap();
///
/// let mut file = VFile::new("");
/// let tree = processor
///     .run_sync(Node::root(vec![Node::text("hi")]), &mut file)
///     .unwrap();
/// assert_eq!(tree.to_text(), "HI");
/// ```
pub fn transform_fn<F>(f: F) -> FnTransformer<F>
where
    F: Fn(&mut Node, &mut VFile) -> Result<Option<Node>, BoxError> + Send + Sync + 'static,
{
    FnTransformer(f)
}

/// Transformer created by [`transform_fn`].
pub struct FnTransformer<F>(F);

#[async_trait]
impl<F> Transformer for FnTransformer<F>
where
    F: Fn(&mut Node, &mut VFile) -> Result<Option<Node>, BoxError> + Send + Sync + 'static,
{
    async fn transform(
        &self,
        tree: &mut Node,
        file: &mut VFile,
    ) -> Result<Option<Node>, BoxError> {
        (self.0)(tree, file)
    }
}

/// Serializes a tree into the processor's output.
pub trait Compiler: Send + Sync {
    /// Returns the name used in error messages.
    fn name(&self) -> &str;

    /// Compiles `tree` into text.
    fn compile(&self, tree: &Node, file: &VFile) -> Result<String, BoxError>;
}

/// A unit of processor configuration.
pub trait Plugin: Send + Sync {
    /// Returns the plugin name used in logs and error messages.
    fn name(&self) -> &str;

    /// Configures the processor. Called once per attachment.
    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError>;
}

/// Creates a plugin from a name and an attach function.
pub fn plugin_fn<F>(name: impl Into<String>, attach: F) -> FnPlugin<F>
where
    F: Fn(&mut Setup<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnPlugin {
        name: name.into(),
        attach,
    }
}

/// Plugin created by [`plugin_fn`].
pub struct FnPlugin<F> {
    name: String,
    attach: F,
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut Setup<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError> {
        (self.attach)(setup)
    }
}

/// Handle through which a plugin configures the processor during attach.
pub struct Setup<'p> {
    options: &'p Value,
    data: &'p Map<String, Value>,
    pub(crate) changes: SetupChanges,
}

/// Changes staged by one attachment, committed only on success.
#[derive(Default)]
pub(crate) struct SetupChanges {
    pub(crate) data: Map<String, Value>,
    pub(crate) parser: Option<Arc<dyn Parser>>,
    pub(crate) compiler: Option<Arc<dyn Compiler>>,
    pub(crate) transformer: Option<Arc<dyn Transformer>>,
}

impl<'p> Setup<'p> {
    pub(crate) fn new(options: &'p Value, data: &'p Map<String, Value>) -> Self {
        Self {
            options,
            data,
            changes: SetupChanges::default(),
        }
    }

    /// Returns the options passed with the plugin, or `Null`.
    pub fn options(&self) -> &Value {
        self.options
    }

    /// Deserializes the options into `T`; missing options give `T::default()`.
    pub fn options_as<T>(&self) -> Result<T, BoxError>
    where
        T: DeserializeOwned + Default,
    {
        if self.options.is_null() {
            return Ok(T::default());
        }
        Ok(T::deserialize(self.options)?)
    }

    /// Reads processor data, including values written earlier in this attach.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.changes.data.get(key).or_else(|| self.data.get(key))
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: Value) {
        self.changes.data.insert(key.into(), value);
    }

    /// Installs the parser, replacing any earlier one.
    pub fn set_parser(&mut self, parser: impl Parser + 'static) {
        self.changes.parser = Some(Arc::new(parser));
    }

    /// Installs the compiler, replacing any earlier one.
    pub fn set_compiler(&mut self, compiler: impl Compiler + 'static) {
        self.changes.compiler = Some(Arc::new(compiler));
    }

    /// Registers the transformer this plugin contributes to `run`.
    ///
    /// A plugin contributes at most one transformer; a second call replaces
    /// the first.
    pub fn add_transformer(&mut self, transformer: impl Transformer + 'static) {
        self.changes.transformer = Some(Arc::new(transformer));
    }
}

/// An ordered list of plugins plus shared settings.
///
/// Attaching a preset attaches its plugins in order and merges `settings`
/// into the processor's `settings` data key.
#[derive(Clone, Default)]
pub struct Preset {
    pub(crate) plugins: Vec<(Arc<dyn Plugin>, Value)>,
    pub(crate) settings: Map<String, Value>,
}

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin without options.
    pub fn plugin(self, plugin: impl Plugin + 'static) -> Self {
        self.plugin_with(plugin, Value::Null)
    }

    /// Adds a plugin with options.
    pub fn plugin_with(mut self, plugin: impl Plugin + 'static, options: Value) -> Self {
        self.plugins.push((Arc::new(plugin), options));
        self
    }

    /// Sets a shared setting.
    pub fn setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Returns the names of the plugins in this preset.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|(plugin, _)| plugin.name()).collect()
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("plugins", &self.plugin_names())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct Limits {
        max: u32,
    }

    #[test]
    fn test_options_as_defaults_when_missing() {
        let data = Map::new();
        let setup = Setup::new(&Value::Null, &data);

        assert_eq!(setup.options_as::<Limits>().unwrap(), Limits::default());
    }

    #[test]
    fn test_options_as_rejects_unknown_fields() {
        let data = Map::new();
        let options = json!({ "maxx": 3 });
        let setup = Setup::new(&options, &data);

        assert!(setup.options_as::<Limits>().is_err());
    }

    #[test]
    fn test_data_reads_staged_writes_first() {
        let mut data = Map::new();
        data.insert("a".to_string(), json!(1));
        data.insert("b".to_string(), json!(2));
        let mut setup = Setup::new(&Value::Null, &data);

        setup.set_data("b", json!(20));

        assert_eq!(setup.data("a"), Some(&json!(1)));
        assert_eq!(setup.data("b"), Some(&json!(20)));
        assert_eq!(setup.data("c"), None);
    }

    #[tokio::test]
    async fn test_transform_fn_runs_closure() {
        let transformer = transform_fn(|_tree, _file| Ok(Some(Node::root(vec![]))));
        let mut tree = Node::text("x");
        let mut file = VFile::new("");

        let replaced = transformer.transform(&mut tree, &mut file).await.unwrap();

        assert_eq!(replaced, Some(Node::root(vec![])));
    }

    fn noop(_: &mut Setup<'_>) -> Result<(), BoxError> {
        Ok(())
    }

    #[test]
    fn test_preset_keeps_plugin_order() {
        let preset = Preset::new()
            .plugin(plugin_fn("first", noop))
            .plugin_with(plugin_fn("second", noop), json!({ "x": 1 }))
            .setting("bullet", json!("*"));

        assert_eq!(preset.plugin_names(), vec!["first", "second"]);
        assert_eq!(preset.settings.get("bullet"), Some(&json!("*")));
    }
}
