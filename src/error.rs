use color_print::ceprintln;
use thiserror::Error;

use crate::analyzer::SymbolError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unexpected character `{ch}`, line: {line}")]
    UnexpectedChar { ch: char, line: usize },

    #[error("Block comment starting at line {line} is never closed")]
    UnterminatedComment { line: usize },

    #[error("String constant is not closed before the end of line {line}")]
    UnterminatedString { line: usize },

    #[error("Syntax Error: expected {expected}, found `{found}`, line: {line}")]
    Syntax {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("Syntax Error: expected {expected}, found end of input, line: {line}")]
    UnexpectedEof { expected: String, line: usize },

    #[error("Undefined variable: `{name}`, line: {line}")]
    UndefinedVariable { name: String, line: usize },

    #[error("Integer constant `{text}` does not fit in 0..=32767, line: {line}")]
    IntegerOutOfRange { text: String, line: usize },

    #[error("Character `{ch}` in string constant is above 32767, line: {line}")]
    UnsupportedChar { ch: char, line: usize },

    #[error("{source}, line: {line}")]
    Symbol {
        #[source]
        source: SymbolError,
        line: usize,
    },

    #[error("No .jack sources found at `{0}`")]
    NoSources(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to read standard input")]
    Stdin(#[source] clap_stdin::StdinError),
}

impl Error {
    /// Source line the error points at, if it came out of lexing or translation.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedChar { line, .. }
            | Error::UnterminatedComment { line }
            | Error::UnterminatedString { line }
            | Error::Syntax { line, .. }
            | Error::UnexpectedEof { line, .. }
            | Error::UndefinedVariable { line, .. }
            | Error::IntegerOutOfRange { line, .. }
            | Error::UnsupportedChar { line, .. }
            | Error::Symbol { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, source: &str) {
        ceprintln!("<red,bold>error</>: {}", self);

        let Some(line_num) = self.line() else {
            return;
        };
        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        ceprintln!("      <blue>|</>");

        ceprintln!(" <blue>{:>4} |</> {}", line_num, source_line(source, line_num));
        ceprintln!("      <blue>|</>");
    }
}

/// 1-based line lookup; empty when the line is not in `source`.
fn source_line(source: &str, line: usize) -> &str {
    line.checked_sub(1)
        .and_then(|i| source.lines().nth(i))
        .unwrap_or("")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_keeps_legacy_prefix() {
        let e = Error::Syntax {
            expected: "`;`".to_string(),
            found: "}".to_string(),
            line: 7,
        };
        assert_eq!(
            e.to_string(),
            "Syntax Error: expected `;`, found `}`, line: 7"
        );
        assert_eq!(e.line(), Some(7));
    }

    #[test]
    fn diagnostic_line_lookup() {
        let source = "class Main {\n  let x = 1\n}";
        assert_eq!(source_line(source, 2), "  let x = 1");
        assert_eq!(source_line(source, 3), "}");
        assert_eq!(source_line(source, 4), "");
        assert_eq!(source_line(source, 0), "");
        assert_eq!(source_line("", 1), "");

        // a line number past the end must not panic
        let e = Error::UnexpectedEof {
            expected: "`}`".to_string(),
            line: 42,
        };
        e.print_diag("Main.jack", source);
    }

    #[test]
    fn unsupported_char_points_at_its_line() {
        let e = Error::UnsupportedChar { ch: '\u{1F600}', line: 3 };
        assert_eq!(e.line(), Some(3));
    }

    #[test]
    fn io_errors_have_no_line() {
        assert_eq!(Error::NoSources("x".to_string()).line(), None);
    }
}
