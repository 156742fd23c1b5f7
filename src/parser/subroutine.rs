use crate::{
    analyzer::SymbolKind,
    codegen::{Segment, ALLOC},
    error::Result,
    lexer::Keyword,
};

use super::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Constructor => Some(SubroutineKind::Constructor),
            Keyword::Function => Some(SubroutineKind::Function),
            Keyword::Method => Some(SubroutineKind::Method),
            _ => None,
        }
    }
}

/// Per-subroutine translation state, reset at every subroutine declaration.
#[derive(Debug)]
pub(super) struct Subroutine {
    kind: SubroutineKind,
    name: String,
    return_type: String,
}

impl Subroutine {
    pub fn new() -> Self {
        Self {
            kind: SubroutineKind::Function,
            name: String::new(),
            return_type: String::new(),
        }
    }

    pub fn reset(&mut self, kind: SubroutineKind, name: String, return_type: String) {
        self.kind = kind;
        self.name = name;
        self.return_type = return_type;
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == Keyword::Void.as_str()
    }
}

impl Parser {
    /// subroutineDec = ("constructor" | "function" | "method") ("void" | type)
    ///                 subroutineName "(" parameterList ")" subroutineBody
    pub(super) fn parse_subroutine(&mut self) -> Result<()> {
        let Some(kind) = self.current_keyword().and_then(SubroutineKind::from_keyword) else {
            return Err(self.error("`constructor`, `function` or `method`"));
        };
        self.trace.open("subroutineDec");
        self.advance();
        self.subroutine_table.start_subroutine();

        let return_type = self.parse_type(true)?;
        let name = self.expect_identifier("a subroutine name")?;
        self.subroutine.reset(kind, name, return_type);

        if kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            self.define("this", &class_name, SymbolKind::Argument)?;
        }

        self.expect_symbol('(')?;
        self.parse_parameter_list()?;
        self.expect_symbol(')')?;
        self.parse_subroutine_body()?;
        self.trace.close("subroutineDec");
        Ok(())
    }

    /// parameterList = (type varName ("," type varName)*)?
    fn parse_parameter_list(&mut self) -> Result<()> {
        self.trace.open("parameterList");
        if self.current_symbol() != Some(')') {
            loop {
                let ty = self.parse_type(false)?;
                let name = self.expect_identifier("a parameter name")?;
                self.define(&name, &ty, SymbolKind::Argument)?;
                if !self.consume_symbol(',') {
                    break;
                }
            }
        }
        self.trace.close("parameterList");
        Ok(())
    }

    /// subroutineBody = "{" varDec* statements "}"
    fn parse_subroutine_body(&mut self) -> Result<()> {
        self.trace.open("subroutineBody");
        self.expect_symbol('{')?;
        while self.current_keyword() == Some(Keyword::Var) {
            self.parse_var_dec()?;
        }

        let n_locals = self
            .subroutine_table
            .count(SymbolKind::Local)
            .map_err(|e| self.symbol_error(e))?;
        let full_name = format!("{}.{}", self.class_name, self.subroutine.name);
        self.writer.write_function(&full_name, n_locals);

        match self.subroutine.kind {
            SubroutineKind::Constructor => {
                let n_fields = self
                    .class_table
                    .count(SymbolKind::Field)
                    .map_err(|e| self.symbol_error(e))?;
                self.writer.write_push(Segment::Constant, n_fields);
                self.writer.write_call(ALLOC, 1);
                self.writer.write_pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.writer.write_push(Segment::Argument, 0);
                self.writer.write_pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => (),
        }

        self.parse_statements()?;
        self.expect_symbol('}')?;
        self.trace.close("subroutineBody");
        Ok(())
    }

    /// varDec = "var" type varName ("," varName)* ";"
    fn parse_var_dec(&mut self) -> Result<()> {
        self.trace.open("varDec");
        self.expect_keyword(Keyword::Var)?;
        let ty = self.parse_type(false)?;
        loop {
            let name = self.expect_identifier("a variable name")?;
            self.define(&name, &ty, SymbolKind::Local)?;
            if !self.consume_symbol(',') {
                break;
            }
        }
        self.expect_symbol(';')?;
        self.trace.close("varDec");
        Ok(())
    }
}
