use crate::{
    codegen::{Command, Segment, STRING_APPEND_CHAR, STRING_NEW},
    error::{Error, Result},
    lexer::{Keyword, TokenKind},
};

use super::Parser;

/// Largest integer constant the target machine accepts.
pub const MAX_INT: u32 = 32767;

impl Parser {
    /// expr = term (op term)*
    ///
    /// Operators have no precedence: `2 + 3 * 4` is `(2 + 3) * 4`.
    pub(super) fn parse_expression(&mut self) -> Result<()> {
        self.trace.open("expression");
        self.parse_term()?;

        while let Some(command) = self.current_symbol().and_then(Command::from_binary_symbol) {
            self.advance();
            self.parse_term()?;
            self.writer.write_arithmetic(command);
        }
        self.trace.close("expression");
        Ok(())
    }

    /// term = intConst | stringConst | keywordConst
    ///      | varName | varName "[" expr "]" | subroutineCall
    ///      | "(" expr ")" | unaryOp term
    fn parse_term(&mut self) -> Result<()> {
        let Some(token) = self.tokens.current().cloned() else {
            return Err(self.error("a term"));
        };
        self.trace.open("term");

        match token.kind {
            TokenKind::IntegerConstant => {
                let value = token
                    .integer()
                    .filter(|v| *v <= MAX_INT)
                    .ok_or_else(|| Error::IntegerOutOfRange {
                        text: token.text.clone(),
                        line: token.line,
                    })?;
                self.advance();
                self.writer.write_push(Segment::Constant, value as usize);
            }
            TokenKind::StringConstant => {
                self.advance();
                self.write_string(&token.text, token.line)?;
            }
            TokenKind::Keyword => {
                match token.keyword() {
                    Some(Keyword::True) => {
                        self.writer.write_push(Segment::Constant, 1);
                        self.writer.write_arithmetic(Command::Neg);
                    }
                    Some(Keyword::False | Keyword::Null) => {
                        self.writer.write_push(Segment::Constant, 0);
                    }
                    Some(Keyword::This) => self.writer.write_push(Segment::Pointer, 0),
                    _ => return Err(self.error("a term")),
                }
                self.advance();
            }
            TokenKind::Symbol => match token.symbol() {
                Some('(') => {
                    self.advance();
                    self.parse_expression()?;
                    self.expect_symbol(')')?;
                }
                Some(c) => {
                    let Some(command) = Command::from_unary_symbol(c) else {
                        return Err(self.error("a term"));
                    };
                    self.advance();
                    self.parse_term()?;
                    self.writer.write_arithmetic(command);
                }
                None => return Err(self.error("a term")),
            },
            TokenKind::Identifier => {
                // one token of lookahead, kept out of the trace
                self.tokens.advance();
                let next = self.current_symbol();
                self.tokens.reverse();

                match next {
                    Some('[') => {
                        self.advance();
                        self.advance();
                        let array = self.resolve_variable(&token.text, token.line)?;
                        self.write_push_symbol(&array);
                        self.parse_expression()?;
                        self.expect_symbol(']')?;
                        self.writer.write_arithmetic(Command::Add);
                        self.writer.write_pop(Segment::Pointer, 1);
                        self.writer.write_push(Segment::That, 0);
                    }
                    Some('(' | '.') => self.parse_subroutine_call()?,
                    _ => {
                        self.advance();
                        let var = self.resolve_variable(&token.text, token.line)?;
                        self.write_push_symbol(&var);
                    }
                }
            }
        }
        self.trace.close("term");
        Ok(())
    }

    /// Every character is pushed as its code point, which must fit in a word.
    fn write_string(&mut self, s: &str, line: usize) -> Result<()> {
        if let Some(ch) = s.chars().find(|&c| c as u32 > MAX_INT) {
            return Err(Error::UnsupportedChar { ch, line });
        }

        self.writer.write_push(Segment::Constant, s.chars().count());
        self.writer.write_call(STRING_NEW, 1);
        for c in s.chars() {
            self.writer.write_push(Segment::Constant, c as usize);
            self.writer.write_call(STRING_APPEND_CHAR, 2);
        }
        Ok(())
    }

    /// subroutineCall = subroutineName "(" exprList ")"
    ///                | (className | varName) "." subroutineName "(" exprList ")"
    pub(super) fn parse_subroutine_call(&mut self) -> Result<()> {
        let name = self.expect_identifier("a subroutine name")?;

        let (target, receivers) = if self.consume_symbol('.') {
            let subroutine = self.expect_identifier("a subroutine name")?;
            match self.resolve(&name) {
                Some(receiver) => {
                    self.write_push_symbol(&receiver);
                    (format!("{}.{}", receiver.ty, subroutine), 1)
                }
                None => (format!("{}.{}", name, subroutine), 0),
            }
        } else {
            // no implicit receiver: only functions of this class are callable this way
            (format!("{}.{}", self.class_name, name), 0)
        };

        self.expect_symbol('(')?;
        let n_args = self.parse_expression_list()?;
        self.expect_symbol(')')?;
        self.writer.write_call(&target, n_args + receivers);
        Ok(())
    }

    /// exprList = (expr ("," expr)*)?
    fn parse_expression_list(&mut self) -> Result<usize> {
        self.trace.open("expressionList");
        let mut count = 0;
        if self.current_symbol() != Some(')') {
            self.parse_expression()?;
            count += 1;
            while self.consume_symbol(',') {
                self.parse_expression()?;
                count += 1;
            }
        }
        self.trace.close("expressionList");
        Ok(count)
    }
}
