//! The document processor.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};
use tracing::{debug, warn};
use tsumugi_ast::Node;
use tsumugi_parser::Parser;

use crate::plugin::{Compiler, Plugin, Preset, Setup, Transformer};
use crate::{ProcessorError, VFile};

/// Data key that [`Processor::use_preset`] merges preset settings into.
pub const SETTINGS_KEY: &str = "settings";

/// A plugin together with the options it was attached with.
#[derive(Clone)]
struct Attached {
    plugin: Arc<dyn Plugin>,
    options: Value,
}

/// A transformer and the name of the plugin that registered it.
#[derive(Clone)]
struct Stage {
    plugin: Arc<str>,
    transformer: Arc<dyn Transformer>,
}

/// A composable parse → run → stringify pipeline.
///
/// Plugins are attached with [`use_plugin`](Self::use_plugin) and take
/// effect immediately. The first call to `parse`, `run`, `stringify`,
/// `process` or `freeze` freezes the processor; after that, attaching
/// plugins and writing data fail with [`ProcessorError::Frozen`].
///
/// Cloning yields an unfrozen processor with the same plugins, parser,
/// compiler, transformers and a copy of the data.
///
/// # Example
///
/// ```rust
/// use tsumugi_core::Processor;
/// use tsumugi_core::plugins::{MarkdownParse, TextStringify};
///
/// let mut processor = Processor::new();
/// processor
///     .use_plugin(MarkdownParse)?
///     .use_plugin(TextStringify)?;
///
/// let file = processor.process_sync("# Hello *world*")?;
/// assert_eq!(file.value, "Hello world");
/// # Ok::<(), tsumugi_core::ProcessorError>(())
/// ```
#[derive(Default)]
pub struct Processor {
    attached: Vec<Attached>,
    stages: Vec<Stage>,
    parser: Option<Arc<dyn Parser>>,
    compiler: Option<Arc<dyn Compiler>>,
    data: Map<String, Value>,
    frozen: AtomicBool,
}

impl Processor {
    /// Creates an empty, unfrozen processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a plugin without options.
    pub fn use_plugin(
        &mut self,
        plugin: impl Plugin + 'static,
    ) -> Result<&mut Self, ProcessorError> {
        self.use_plugin_with(plugin, Value::Null)
    }

    /// Attaches a plugin with options.
    pub fn use_plugin_with(
        &mut self,
        plugin: impl Plugin + 'static,
        options: Value,
    ) -> Result<&mut Self, ProcessorError> {
        self.attach(Arc::new(plugin), options)?;
        Ok(self)
    }

    /// Attaches plugins with their options in order, stopping at the first
    /// failure. Pass `Value::Null` for a plugin without options.
    ///
    /// Plugins attached before the failure stay attached.
    pub fn use_plugins<I>(&mut self, plugins: I) -> Result<&mut Self, ProcessorError>
    where
        I: IntoIterator<Item = (Arc<dyn Plugin>, Value)>,
    {
        for (plugin, options) in plugins {
            self.attach(plugin, options)?;
        }
        Ok(self)
    }

    /// Attaches every plugin of `preset` in order, then merges its
    /// settings into the `settings` data key.
    pub fn use_preset(&mut self, preset: Preset) -> Result<&mut Self, ProcessorError> {
        self.ensure_unfrozen("use a preset")?;
        for (plugin, options) in preset.plugins {
            self.attach(plugin, options)?;
        }
        if !preset.settings.is_empty() {
            let settings = self
                .data
                .entry(SETTINGS_KEY)
                .or_insert_with(|| Value::Object(Map::new()));
            if !settings.is_object() {
                *settings = Value::Object(Map::new());
            }
            if let Value::Object(existing) = settings {
                existing.extend(preset.settings);
            }
        }
        Ok(self)
    }

    fn attach(&mut self, plugin: Arc<dyn Plugin>, options: Value) -> Result<(), ProcessorError> {
        self.ensure_unfrozen("use a plugin")?;

        let name = plugin.name().to_string();
        debug!("Attaching plugin '{}'", name);

        let changes = {
            let mut setup = Setup::new(&options, &self.data);
            if let Err(e) = plugin.attach(&mut setup) {
                warn!("Plugin '{}' could not be attached: {}", name, e);
                return Err(ProcessorError::attach(name, e.to_string()));
            }
            setup.changes
        };

        self.data.extend(changes.data);
        if let Some(parser) = changes.parser {
            debug!("Plugin '{}' installed parser '{}'", name, parser.name());
            self.parser = Some(parser);
        }
        if let Some(compiler) = changes.compiler {
            debug!("Plugin '{}' installed compiler '{}'", name, compiler.name());
            self.compiler = Some(compiler);
        }
        if let Some(transformer) = changes.transformer {
            self.stages.push(Stage {
                plugin: Arc::from(name.as_str()),
                transformer,
            });
        }
        self.attached.push(Attached { plugin, options });
        Ok(())
    }

    /// Returns the names of the attached plugins, in attachment order.
    pub fn plugins(&self) -> Vec<&str> {
        self.attached.iter().map(|a| a.plugin.name()).collect()
    }

    /// Returns the options each plugin was attached with.
    pub fn plugin_options(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attached
            .iter()
            .map(|a| (a.plugin.name(), &a.options))
    }

    /// Reads a value from the data store.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Writes a value to the data store.
    pub fn set_data(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<&mut Self, ProcessorError> {
        self.ensure_unfrozen("set data")?;
        self.data.insert(key.into(), value);
        Ok(self)
    }

    /// Freezes the processor. Calling it again has no further effect.
    pub fn freeze(&self) -> &Self {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            debug!(
                "Processor frozen with {} plugin(s): {}",
                self.attached.len(),
                self.plugins().join(", ")
            );
        }
        self
    }

    /// Returns true once the processor has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn ensure_unfrozen(&self, operation: &'static str) -> Result<(), ProcessorError> {
        if self.is_frozen() {
            return Err(ProcessorError::frozen(operation));
        }
        Ok(())
    }

    /// Parses text (or a [`VFile`]) into a tree. Transformers are not run.
    pub fn parse(&self, input: impl AsRef<str>) -> Result<Node, ProcessorError> {
        self.freeze();
        let parser = self.parser.as_ref().ok_or(ProcessorError::MissingParser)?;
        debug!("Parsing with '{}'", parser.name());
        Ok(parser.parse(input.as_ref())?)
    }

    /// Runs every transformer over `tree`, in attachment order.
    ///
    /// Each transformer completes before the next one starts. Messages a
    /// transformer adds to `file` without a source are attributed to its
    /// plugin. The first failure stops the run.
    pub async fn run(&self, mut tree: Node, file: &mut VFile) -> Result<Node, ProcessorError> {
        self.freeze();
        for stage in &self.stages {
            debug!("Running transformer '{}'", stage.plugin);
            let before = file.messages.len();
            let result = stage.transformer.transform(&mut tree, file).await;

            for message in file.messages.iter_mut().skip(before) {
                if message.source.is_none() {
                    message.source = Some(stage.plugin.to_string());
                }
            }

            match result {
                Ok(Some(replacement)) => tree = replacement,
                Ok(None) => {}
                Err(e) => {
                    warn!("Transformer '{}' failed: {}", stage.plugin, e);
                    return Err(ProcessorError::stage(stage.plugin.as_ref(), e));
                }
            }
            debug!("Finished transformer '{}'", stage.plugin);
        }
        Ok(tree)
    }

    /// Serializes `tree` through the installed compiler.
    pub fn stringify(&self, tree: &Node, file: &VFile) -> Result<String, ProcessorError> {
        self.freeze();
        let compiler = self
            .compiler
            .as_ref()
            .ok_or(ProcessorError::MissingCompiler)?;
        debug!("Compiling with '{}'", compiler.name());
        compiler
            .compile(tree, file)
            .map_err(|e| ProcessorError::compile(compiler.name(), e.to_string()))
    }

    /// Parses, runs and stringifies `input`.
    ///
    /// The returned file holds the compiled output in `value` and every
    /// message raised by the transformers. On failure the file is dropped;
    /// use [`process_file`](Self::process_file) to keep its messages.
    pub async fn process(&self, input: impl Into<VFile>) -> Result<VFile, ProcessorError> {
        let mut file = input.into();
        self.process_file(&mut file).await?;
        Ok(file)
    }

    /// Parses, runs and stringifies `file` in place.
    ///
    /// On success `file.value` is replaced by the compiled output. On
    /// failure `file.value` is left as it was and `file.messages` holds
    /// every message raised before the failure.
    ///
    /// ```rust
    /// use tsumugi_core::plugins::{MarkdownParse, TextStringify};
    /// use tsumugi_core::{Processor, VFile, plugin_fn, transform_fn};
    ///
    /// let strict = plugin_fn("strict", |setup| {
    ///     setup.add_transformer(transform_fn(|_tree, file| {
    ///         file.message("looks odd", None);
    ///         Err(file.fail("giving up", None))
    ///     }));
    ///     Ok(())
    /// });
    ///
    /// let mut processor = Processor::new();
    /// processor
    ///     .use_plugin(MarkdownParse)?
    ///     .use_plugin(strict)?
    ///     .use_plugin(TextStringify)?;
    ///
    /// let mut file = VFile::new("# Title");
    /// assert!(processor.process_file_sync(&mut file).is_err());
    /// assert_eq!(file.value, "# Title");
    /// assert_eq!(file.messages.len(), 2);
    /// # Ok::<(), tsumugi_core::ProcessorError>(())
    /// ```
    pub async fn process_file(&self, file: &mut VFile) -> Result<(), ProcessorError> {
        self.freeze();
        if self.parser.is_none() {
            return Err(ProcessorError::MissingParser);
        }
        if self.compiler.is_none() {
            return Err(ProcessorError::MissingCompiler);
        }

        let tree = self.parse(&*file)?;
        let tree = self.run(tree, file).await?;
        file.value = self.stringify(&tree, file)?;
        Ok(())
    }

    /// Blocking form of [`run`](Self::run).
    ///
    /// Drives the transformers on a new current-thread runtime. Fails with
    /// [`ProcessorError::AsyncContext`] when called inside a tokio runtime.
    pub fn run_sync(&self, tree: Node, file: &mut VFile) -> Result<Node, ProcessorError> {
        blocking_runtime("run_sync")?.block_on(self.run(tree, file))
    }

    /// Blocking form of [`process`](Self::process).
    pub fn process_sync(&self, input: impl Into<VFile>) -> Result<VFile, ProcessorError> {
        blocking_runtime("process_sync")?.block_on(self.process(input))
    }

    /// Blocking form of [`process_file`](Self::process_file).
    pub fn process_file_sync(&self, file: &mut VFile) -> Result<(), ProcessorError> {
        blocking_runtime("process_file_sync")?.block_on(self.process_file(file))
    }
}

fn blocking_runtime(operation: &'static str) -> Result<tokio::runtime::Runtime, ProcessorError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ProcessorError::async_context(operation));
    }
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ProcessorError::Runtime)
}

impl Clone for Processor {
    fn clone(&self) -> Self {
        Self {
            attached: self.attached.clone(),
            stages: self.stages.clone(),
            parser: self.parser.clone(),
            compiler: self.compiler.clone(),
            data: self.data.clone(),
            frozen: AtomicBool::new(false),
        }
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("plugins", &self.plugins())
            .field("parser", &self.parser.as_ref().map(|p| p.name()))
            .field("compiler", &self.compiler.as_ref().map(|c| c.name()))
            .field("data", &self.data)
            .field("frozen", &self.is_frozen())
            .finish()
    }
}
