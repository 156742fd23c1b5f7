use crate::error::{Error, Result};

use super::{
    token::{KEYWORDS, SYMBOLS},
    Token, TokenKind, Tokens,
};

#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    index: usize,
    line: usize,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![],
            index: 0,
            line: 1,
        }
    }

    fn new_token(&mut self, kind: TokenKind, s: &str, consumed: usize) {
        self.tokens.push(Token::new(kind, s, self.line));
        self.index += consumed;
    }

    fn parse_number(&mut self, chars: &[char]) {
        let s: String = chars.iter().take_while(|c| c.is_ascii_digit()).collect();
        self.new_token(TokenKind::IntegerConstant, &s, s.len());
    }

    fn parse_identifier(&mut self, chars: &[char]) {
        let s: String = chars
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == '_')
            .collect();

        let kind = if KEYWORDS.contains_key(s.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.new_token(kind, &s, s.len());
    }

    /// `chars` starts right after the opening quote.
    fn parse_string(&mut self, chars: &[char]) -> Result<()> {
        let s: String = chars
            .iter()
            .take_while(|&&c| c != '"' && c != '\n')
            .collect();
        let closed = chars.get(s.chars().count()) == Some(&'"');
        if !closed {
            return Err(Error::UnterminatedString { line: self.line });
        }
        // both quotes
        let consumed = s.chars().count() + 2;
        self.new_token(TokenKind::StringConstant, &s, consumed);
        Ok(())
    }

    fn skip_line_comment(&mut self, chars: &[char]) {
        while self.index < chars.len() && chars[self.index] != '\n' {
            self.index += 1;
        }
    }

    fn skip_block_comment(&mut self, chars: &[char]) -> Result<()> {
        let start = self.line;
        self.index += 2;
        while self.index < chars.len() {
            match chars[self.index] {
                '*' if chars.get(self.index + 1) == Some(&'/') => {
                    self.index += 2;
                    return Ok(());
                }
                '\n' => self.line += 1,
                _ => (),
            }
            self.index += 1;
        }
        Err(Error::UnterminatedComment { line: start })
    }

    fn _tokenize(&mut self, s: &str) -> Result<()> {
        let chars: Vec<_> = s.chars().collect();

        while self.index < chars.len() {
            let c = chars[self.index];
            let next = chars.get(self.index + 1).copied();

            match c {
                '\n' => {
                    self.line += 1;
                    self.index += 1;
                }
                ' ' | '\t' | '\r' => self.index += 1,
                '/' if next == Some('/') => self.skip_line_comment(&chars),
                '/' if next == Some('*') => self.skip_block_comment(&chars)?,
                '"' => self.parse_string(&chars[self.index + 1..])?,
                c if c.is_ascii_digit() => self.parse_number(&chars[self.index..]),
                c if c.is_ascii_alphabetic() || c == '_' => {
                    self.parse_identifier(&chars[self.index..])
                }
                c if SYMBOLS.contains(&c) => self.new_token(TokenKind::Symbol, &c.to_string(), 1),
                ch => return Err(Error::UnexpectedChar { ch, line: self.line }),
            }
        }
        Ok(())
    }

    pub fn tokenize(s: &str) -> Result<Tokens> {
        let mut lexer = Lexer::new();
        lexer._tokenize(s)?;

        Ok(Tokens::new(lexer.tokens))
    }
}
