//! Virtual files: the unit of text flowing through a processor.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tsumugi_ast::Position;

use crate::plugin::BoxError;

/// Severity of a [`VFileMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// A diagnostic attached to a file by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VFileMessage {
    /// Human-readable description of the problem.
    pub reason: String,
    /// Name of the plugin that raised the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Place in the file the message refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub severity: Severity,
    /// Whether processing of the file was stopped by this message.
    #[serde(default)]
    pub fatal: bool,
}

impl VFileMessage {
    /// Creates a warning with no source or position.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
            position: None,
            severity: Severity::Warning,
            fatal: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for VFileMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = &self.position {
            write!(
                f,
                "{}:{}: {}",
                position.start.line, position.start.column, self.reason
            )
        } else {
            f.write_str(&self.reason)
        }
    }
}

impl std::error::Error for VFileMessage {}

/// A document together with its path, diagnostics and per-file data.
///
/// The processor reads `value` when parsing and replaces it with the
/// compiled output at the end of [`process`](crate::Processor::process).
#[derive(Debug, Clone, PartialEq)]
pub struct VFile {
    /// Contents of the file.
    pub value: String,
    /// Path of the file, if it came from disk.
    pub path: Option<PathBuf>,
    /// Working directory paths are resolved against.
    pub cwd: PathBuf,
    /// Messages raised by stages, in the order they were raised.
    pub messages: Vec<VFileMessage>,
    /// Per-file data shared between stages of one run.
    pub data: Map<String, Value>,
}

impl VFile {
    /// Creates an in-memory file with the given contents.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            path: None,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            messages: Vec::new(),
            data: Map::new(),
        }
    }

    /// Reads a file from disk.
    pub async fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let value = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(value).with_path(path))
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the extension of `path`, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.as_deref()?.extension()?.to_str()
    }

    /// Returns `path` for display, or `<stdin>` for in-memory files.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
    }

    /// Records a warning and returns it for further adjustment.
    pub fn message(
        &mut self,
        reason: impl Into<String>,
        position: Option<Position>,
    ) -> &mut VFileMessage {
        self.push(VFileMessage::new(reason).with_position(position))
    }

    /// Records an informational message.
    pub fn info(
        &mut self,
        reason: impl Into<String>,
        position: Option<Position>,
    ) -> &mut VFileMessage {
        self.push(
            VFileMessage::new(reason)
                .with_position(position)
                .with_severity(Severity::Info),
        )
    }

    /// Records a fatal error and returns it as an error a transformer can
    /// propagate.
    ///
    /// ```rust
    /// use tsumugi_core::{BoxError, VFile};
    ///
    /// fn check(file: &mut VFile) -> Result<(), BoxError> {
    ///     if file.value.is_empty() {
    ///         return Err(file.fail("empty document", None));
    ///     }
    ///     Ok(())
    /// }
    ///
    /// let mut file = VFile::new("");
    /// assert!(check(&mut file).is_err());
    /// assert!(file.has_errors());
    /// ```
    pub fn fail(&mut self, reason: impl Into<String>, position: Option<Position>) -> BoxError {
        let mut message = VFileMessage::new(reason)
            .with_position(position)
            .with_severity(Severity::Error);
        message.fatal = true;
        Box::new(self.push(message).clone())
    }

    /// Returns true if any message has error severity.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.severity == Severity::Error)
    }

    fn push(&mut self, message: VFileMessage) -> &mut VFileMessage {
        self.messages.push(message);
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }
}

impl Default for VFile {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl AsRef<str> for VFile {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for VFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for VFile {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VFile {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tsumugi_ast::Point;

    fn position() -> Position {
        Position::new(Point::new(2, 3, 10), Point::new(2, 8, 15))
    }

    #[test]
    fn test_message_is_warning() {
        let mut file = VFile::new("text");

        file.message("odd wording", Some(position()));

        assert_eq!(file.messages.len(), 1);
        assert_eq!(file.messages[0].severity, Severity::Warning);
        assert!(!file.messages[0].fatal);
        assert!(!file.has_errors());
    }

    #[test]
    fn test_message_can_be_adjusted() {
        let mut file = VFile::new("text");

        file.message("odd wording", None).source = Some("retext".to_string());

        assert_eq!(file.messages[0].source.as_deref(), Some("retext"));
    }

    #[test]
    fn test_info_is_not_an_error() {
        let mut file = VFile::new("text");

        file.info("fyi", None);

        assert_eq!(file.messages[0].severity, Severity::Info);
        assert!(!file.has_errors());
    }

    #[test]
    fn test_fail_records_fatal_error() {
        let mut file = VFile::new("text");

        let err = file.fail("broken", Some(position()));

        assert!(file.has_errors());
        assert!(file.messages[0].fatal);
        assert_eq!(err.to_string(), "2:3: broken");
    }

    #[test]
    fn test_extension_and_display_name() {
        let file = VFile::new("").with_path("docs/readme.md");
        assert_eq!(file.extension(), Some("md"));
        assert_eq!(file.display_name(), "docs/readme.md");

        let stdin = VFile::from("x");
        assert_eq!(stdin.extension(), None);
        assert_eq!(stdin.display_name(), "<stdin>");
    }

    #[test]
    fn test_message_serializes_lowercase_severity() {
        let message = VFileMessage::new("x").with_severity(Severity::Error);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "reason": "x", "severity": "error", "fatal": false })
        );
    }

    #[tokio::test]
    async fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = VFile::read(&path).await.unwrap();

        assert_eq!(file.value, "hello");
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }
}
