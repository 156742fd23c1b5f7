use crate::{
    analyzer::{resolve, Scope, Symbol, SymbolError, SymbolKind, SymbolTable},
    codegen::{VmWriter, XmlWriter},
    error::{Error, Result},
    lexer::{Keyword, Token, TokenKind, Tokens},
};

use super::subroutine::Subroutine;

/// Single-pass translator: every production emits VM code as soon as it is
/// recognized, there is no syntax tree.
#[derive(Debug)]
pub struct Parser {
    pub(super) tokens: Tokens,
    pub(super) class_name: String,
    pub(super) class_table: SymbolTable,
    pub(super) subroutine_table: SymbolTable,
    pub(super) subroutine: Subroutine,
    label_index: usize,
    pub(super) writer: VmWriter,
    pub(super) trace: XmlWriter,
}

impl Parser {
    pub fn new(tokens: Tokens) -> Self {
        Self {
            tokens,
            class_name: String::new(),
            class_table: SymbolTable::new(Scope::Class),
            subroutine_table: SymbolTable::new(Scope::Subroutine),
            subroutine: Subroutine::new(),
            label_index: 0,
            writer: VmWriter::new(),
            trace: XmlWriter::disabled(),
        }
    }

    /// Also records the parse as nested XML elements, one per grammar rule.
    pub fn with_trace(mut self) -> Self {
        self.trace = XmlWriter::new();
        self
    }

    /// Translates one class. Either the whole unit compiles or nothing is returned.
    pub fn parse(self) -> Result<String> {
        self.parse_with_trace().map(|(code, _)| code)
    }

    /// Returns the VM code and the parse trace (empty unless `with_trace` was set).
    pub fn parse_with_trace(mut self) -> Result<(String, String)> {
        self.parse_class()?;

        if self.tokens.has_more() {
            return Err(self.error("end of input after the class body"));
        }
        Ok((self.writer.finish(), self.trace.finish()))
    }

    /// Consumes the current token and reports it to the trace.
    pub(super) fn advance(&mut self) {
        if let Some(token) = self.tokens.current() {
            self.trace.terminal(token);
        }
        self.tokens.advance();
    }

    pub(super) fn error(&self, expected: impl Into<String>) -> Error {
        match self.tokens.current() {
            Some(t) => Error::Syntax {
                expected: expected.into(),
                found: t.text.clone(),
                line: t.line,
            },
            None => Error::UnexpectedEof {
                expected: expected.into(),
                line: self.tokens.last_line(),
            },
        }
    }

    pub(super) fn line(&self) -> usize {
        self.tokens
            .current()
            .map(|t| t.line)
            .unwrap_or_else(|| self.tokens.last_line())
    }

    pub(super) fn current_keyword(&self) -> Option<Keyword> {
        self.tokens.current().and_then(|t| t.keyword())
    }

    pub(super) fn current_symbol(&self) -> Option<char> {
        self.tokens.current().and_then(|t| t.symbol())
    }

    pub(super) fn consume_symbol(&mut self, symbol: char) -> bool {
        if self.current_symbol() != Some(symbol) {
            return false;
        }
        self.advance();
        true
    }

    pub(super) fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.current_keyword() != Some(keyword) {
            return false;
        }
        self.advance();
        true
    }

    pub(super) fn expect_symbol(&mut self, symbol: char) -> Result<()> {
        if self.consume_symbol(symbol) {
            Ok(())
        } else {
            Err(self.error(format!("`{}`", symbol)))
        }
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(format!("keyword `{}`", keyword)))
        }
    }

    pub(super) fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match self.tokens.current() {
            Some(Token {
                kind: TokenKind::Identifier,
                text,
                ..
            }) => {
                let name = text.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(what)),
        }
    }

    /// type = "int" | "char" | "boolean" | className
    pub(super) fn parse_type(&mut self, allow_void: bool) -> Result<String> {
        let ty = match self.tokens.current() {
            Some(t) if t.kind == TokenKind::Identifier => t.text.clone(),
            Some(t) => match t.keyword() {
                Some(Keyword::Int | Keyword::Char | Keyword::Boolean) => t.text.clone(),
                Some(Keyword::Void) if allow_void => t.text.clone(),
                _ => return Err(self.error("a type")),
            },
            None => return Err(self.error("a type")),
        };
        self.advance();
        Ok(ty)
    }

    pub(super) fn new_label(&mut self) -> usize {
        self.label_index += 1;
        self.label_index
    }

    pub(super) fn define(&mut self, name: &str, ty: &str, kind: SymbolKind) -> Result<()> {
        let line = self.line();
        let table = match kind.scope() {
            Scope::Class => &mut self.class_table,
            Scope::Subroutine => &mut self.subroutine_table,
        };
        table
            .define(name, ty, kind)
            .map(|_| ())
            .map_err(|source| Error::Symbol { source, line })
    }

    pub(super) fn symbol_error(&self, source: SymbolError) -> Error {
        Error::Symbol {
            source,
            line: self.line(),
        }
    }

    pub(super) fn resolve(&self, name: &str) -> Option<Symbol> {
        resolve(&self.subroutine_table, &self.class_table, name).cloned()
    }

    pub(super) fn resolve_variable(&self, name: &str, line: usize) -> Result<Symbol> {
        self.resolve(name).ok_or_else(|| Error::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }

    pub(super) fn write_push_symbol(&mut self, symbol: &Symbol) {
        self.writer.write_push(symbol.kind.segment(), symbol.index);
    }

    pub(super) fn write_pop_symbol(&mut self, symbol: &Symbol) {
        self.writer.write_pop(symbol.kind.segment(), symbol.index);
    }

    /// class = "class" className "{" classVarDec* subroutineDec* "}"
    fn parse_class(&mut self) -> Result<()> {
        self.trace.open("class");
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier("a class name")?;
        self.expect_symbol('{')?;

        while matches!(
            self.current_keyword(),
            Some(Keyword::Static | Keyword::Field)
        ) {
            self.parse_class_var_dec()?;
        }
        while matches!(
            self.current_keyword(),
            Some(Keyword::Constructor | Keyword::Function | Keyword::Method)
        ) {
            self.parse_subroutine()?;
        }

        self.expect_symbol('}')?;
        self.trace.close("class");
        Ok(())
    }

    /// classVarDec = ("static" | "field") type varName ("," varName)* ";"
    fn parse_class_var_dec(&mut self) -> Result<()> {
        self.trace.open("classVarDec");
        let kind = if self.consume_keyword(Keyword::Static) {
            SymbolKind::Static
        } else {
            self.expect_keyword(Keyword::Field)?;
            SymbolKind::Field
        };
        let ty = self.parse_type(false)?;

        loop {
            let name = self.expect_identifier("a variable name")?;
            self.define(&name, &ty, kind)?;
            if !self.consume_symbol(',') {
                break;
            }
        }
        self.expect_symbol(';')?;
        self.trace.close("classVarDec");
        Ok(())
    }
}
