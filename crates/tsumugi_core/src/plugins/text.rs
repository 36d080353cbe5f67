//! Plain text parse and stringify plugins.

use tsumugi_ast::Node;
use tsumugi_parser::PlainTextParser;

use crate::VFile;
use crate::plugin::{BoxError, Compiler, Plugin, Setup};

/// Installs a [`PlainTextParser`] as the processor's parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParse;

impl Plugin for PlainTextParse {
    fn name(&self) -> &str {
        "text-parse"
    }

    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError> {
        setup.set_parser(PlainTextParser::new());
        Ok(())
    }
}

/// Installs a [`TextCompiler`] as the processor's compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStringify;

impl Plugin for TextStringify {
    fn name(&self) -> &str {
        "text-stringify"
    }

    fn attach(&self, setup: &mut Setup<'_>) -> Result<(), BoxError> {
        setup.set_compiler(TextCompiler);
        Ok(())
    }
}

/// Compiles a tree to its flattened text.
///
/// The children of a `root` are flattened one by one and separated by a
/// blank line, so each block of the document becomes one paragraph of
/// output. Any other node is flattened as a whole. A trailing newline in
/// the source file is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCompiler;

impl Compiler for TextCompiler {
    fn name(&self) -> &str {
        "text"
    }

    fn compile(&self, tree: &Node, file: &VFile) -> Result<String, BoxError> {
        let mut text = match tree {
            Node::Root(root) => root
                .children
                .iter()
                .map(Node::to_text)
                .filter(|block| !block.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
            other => other.to_text(),
        };
        if !text.is_empty() && file.value.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Processor;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text_processor() -> Processor {
        let mut processor = Processor::new();
        processor
            .use_plugin(PlainTextParse)
            .unwrap()
            .use_plugin(TextStringify)
            .unwrap();
        processor
    }

    #[rstest]
    #[case("A single paragraph.")]
    #[case("Two lines\nin one paragraph.")]
    #[case("First.\n\nSecond.")]
    #[case("Hello world\n")]
    #[case("First.\n\nSecond.\n")]
    fn test_round_trip(#[case] input: &str) {
        let file = text_processor().process_sync(input).unwrap();

        assert_eq!(file.value, input);
        assert!(file.messages.is_empty());
    }

    #[test]
    fn test_blank_lines_collapse() {
        let file = text_processor().process_sync("a\n\n\n\nb\n").unwrap();

        assert_eq!(file.value, "a\n\nb\n");
    }

    #[test]
    fn test_compile_non_root() {
        let node = Node::emphasis(vec![Node::text("x"), Node::image("i.png", "alt")]);

        let text = TextCompiler.compile(&node, &VFile::default()).unwrap();

        assert_eq!(text, "xalt");
    }

    #[test]
    fn test_empty_output_gets_no_newline() {
        let file = text_processor().process_sync("\n\n").unwrap();

        assert_eq!(file.value, "");
    }
}
