pub mod analyzer;
pub mod codegen;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{Error, Result};

use codegen::tokens_xml;
use lexer::{Lexer, Tokens};
use parser::Parser;

pub fn tokenize(source: &str) -> Result<Tokens> {
    Lexer::tokenize(source)
}

/// Compiles one class into VM code.
pub fn compile(source: &str) -> Result<String> {
    let tokens = Lexer::tokenize(source)?;

    let parser = Parser::new(tokens);
    parser.parse()
}

/// Everything one class produces when its parse is also recorded.
#[derive(Debug)]
pub struct Analysis {
    pub code: String,
    /// Flat `<tokens>` listing.
    pub tokens: String,
    /// Nested elements, one per grammar rule.
    pub tree: String,
}

/// Compiles one class and records its tokens and parse as XML.
pub fn analyze(source: &str) -> Result<Analysis> {
    let tokens = Lexer::tokenize(source)?;
    let listing = tokens_xml(&tokens);

    let (code, tree) = Parser::new(tokens).with_trace().parse_with_trace()?;
    Ok(Analysis {
        code,
        tokens: listing,
        tree,
    })
}
