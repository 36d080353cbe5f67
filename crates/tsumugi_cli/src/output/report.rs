//! Message report formatter

use std::fmt::Write;

use tsumugi_core::{Severity, VFile};

/// Renders the messages of `file` as a human-readable report.
pub fn render_report(file: &VFile) -> String {
    let name = file.display_name();
    if file.messages.is_empty() {
        return format!("{}: no issues found\n", name);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", name);
    for message in &file.messages {
        let location = message
            .position
            .map(|p| format!("{}:{}", p.start.line, p.start.column))
            .unwrap_or_else(|| "0:0".to_string());
        let _ = write!(
            out,
            "  {:<8} {:<8} {}",
            location, message.severity, message.reason
        );
        if let Some(ref source) = message.source {
            let _ = write!(out, "  [{}]", source);
        }
        out.push('\n');
    }

    let count = |severity| {
        file.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    };
    let _ = writeln!(
        out,
        "\n{} message(s): {} error(s), {} warning(s), {} info",
        file.messages.len(),
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info)
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tsumugi_ast::{Point, Position};

    #[test]
    fn test_empty_report() {
        let file = VFile::new("text").with_path("doc.md");

        assert_eq!(render_report(&file), "doc.md: no issues found\n");
    }

    #[test]
    fn test_stdin_name() {
        let file = VFile::new("text");

        assert_eq!(render_report(&file), "<stdin>: no issues found\n");
    }

    #[test]
    fn test_report_lines() {
        let mut file = VFile::new("# Title").with_path("doc.md");
        let position = Position::new(Point::new(1, 3, 2), Point::new(1, 8, 7));
        let message = file.message("Title is short", Some(position));
        message.source = Some("title-length".to_string());
        let _ = file.fail("Broken", None);

        let report = render_report(&file);

        assert_eq!(
            report,
            "doc.md\n  \
             1:3      warning  Title is short  [title-length]\n  \
             0:0      error    Broken\n\
             \n2 message(s): 1 error(s), 1 warning(s), 0 info\n"
        );
    }
}
