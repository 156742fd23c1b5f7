use crate::{
    codegen::{Command, Segment},
    error::Result,
    lexer::Keyword,
};

use super::Parser;

impl Parser {
    /// statements = statement*
    pub(super) fn parse_statements(&mut self) -> Result<()> {
        self.trace.open("statements");
        loop {
            match self.current_keyword() {
                Some(Keyword::Let) => self.parse_let()?,
                Some(Keyword::If) => self.parse_if()?,
                Some(Keyword::While) => self.parse_while()?,
                Some(Keyword::Do) => self.parse_do()?,
                Some(Keyword::Return) => self.parse_return()?,
                _ => break,
            }
        }
        self.trace.close("statements");
        Ok(())
    }

    /// Block body, braces included.
    fn parse_block(&mut self) -> Result<()> {
        self.expect_symbol('{')?;
        self.parse_statements()?;
        self.expect_symbol('}')
    }

    /// let = "let" varName ("[" expr "]")? "=" expr ";"
    fn parse_let(&mut self) -> Result<()> {
        self.trace.open("letStatement");
        self.expect_keyword(Keyword::Let)?;
        let line = self.line();
        let name = self.expect_identifier("a variable name")?;
        let target = self.resolve_variable(&name, line)?;

        if self.consume_symbol('[') {
            self.write_push_symbol(&target);
            self.parse_expression()?;
            self.expect_symbol(']')?;
            self.writer.write_arithmetic(Command::Add);

            self.expect_symbol('=')?;
            self.parse_expression()?;
            self.expect_symbol(';')?;

            // the value may have moved `pointer 1`, so park it until the address is set
            self.writer.write_pop(Segment::Temp, 0);
            self.writer.write_pop(Segment::Pointer, 1);
            self.writer.write_push(Segment::Temp, 0);
            self.writer.write_pop(Segment::That, 0);
        } else {
            self.expect_symbol('=')?;
            self.parse_expression()?;
            self.expect_symbol(';')?;
            self.write_pop_symbol(&target);
        }
        self.trace.close("letStatement");
        Ok(())
    }

    /// if = "if" "(" expr ")" "{" statements "}" ("else" "{" statements "}")?
    fn parse_if(&mut self) -> Result<()> {
        self.trace.open("ifStatement");
        self.expect_keyword(Keyword::If)?;
        let n = self.new_label();
        let else_label = format!("L{}_else", n);
        let end_label = format!("L{}_end", n);

        self.expect_symbol('(')?;
        self.parse_expression()?;
        self.expect_symbol(')')?;
        self.writer.write_arithmetic(Command::Not);
        self.writer.write_if(&else_label);

        self.parse_block()?;
        self.writer.write_goto(&end_label);
        self.writer.write_label(&else_label);

        if self.consume_keyword(Keyword::Else) {
            self.parse_block()?;
        }
        self.writer.write_label(&end_label);
        self.trace.close("ifStatement");
        Ok(())
    }

    /// while = "while" "(" expr ")" "{" statements "}"
    fn parse_while(&mut self) -> Result<()> {
        self.trace.open("whileStatement");
        self.expect_keyword(Keyword::While)?;
        let n = self.new_label();
        let top_label = format!("L{}_top", n);
        let end_label = format!("L{}_end", n);

        self.writer.write_label(&top_label);
        self.expect_symbol('(')?;
        self.parse_expression()?;
        self.expect_symbol(')')?;
        self.writer.write_arithmetic(Command::Not);
        self.writer.write_if(&end_label);

        self.parse_block()?;
        self.writer.write_goto(&top_label);
        self.writer.write_label(&end_label);
        self.trace.close("whileStatement");
        Ok(())
    }

    /// do = "do" subroutineCall ";"
    fn parse_do(&mut self) -> Result<()> {
        self.trace.open("doStatement");
        self.expect_keyword(Keyword::Do)?;
        self.parse_subroutine_call()?;
        self.expect_symbol(';')?;
        self.writer.write_pop(Segment::Temp, 0);
        self.trace.close("doStatement");
        Ok(())
    }

    /// return = "return" expr? ";"
    fn parse_return(&mut self) -> Result<()> {
        self.trace.open("returnStatement");
        self.expect_keyword(Keyword::Return)?;

        if self.current_symbol() == Some(';') {
            if !self.subroutine.returns_void() {
                return Err(self.error("an expression"));
            }
            // every call leaves exactly one value on the stack
            self.writer.write_push(Segment::Constant, 0);
        } else {
            self.parse_expression()?;
        }
        self.expect_symbol(';')?;
        self.writer.write_return();
        self.trace.close("returnStatement");
        Ok(())
    }
}
