use std::fmt;

use phf::phf_map;

pub(super) static KEYWORDS: phf::Map<&str, Keyword> = phf_map! {
    "class" => Keyword::Class,
    "constructor" => Keyword::Constructor,
    "function" => Keyword::Function,
    "method" => Keyword::Method,
    "field" => Keyword::Field,
    "static" => Keyword::Static,
    "var" => Keyword::Var,
    "int" => Keyword::Int,
    "char" => Keyword::Char,
    "boolean" => Keyword::Boolean,
    "void" => Keyword::Void,
    "true" => Keyword::True,
    "false" => Keyword::False,
    "null" => Keyword::Null,
    "this" => Keyword::This,
    "let" => Keyword::Let,
    "do" => Keyword::Do,
    "if" => Keyword::If,
    "else" => Keyword::Else,
    "while" => Keyword::While,
    "return" => Keyword::Return,
};

pub(super) const SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    /// The reserved vocabulary, in its canonical order.
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    pub fn lookup(s: &str) -> Option<Keyword> {
        KEYWORDS.get(s).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Keyword tokens keep their text; the enumerant is looked up on demand.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::lookup(&self.text),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Symbol => self.text.chars().next(),
            _ => None,
        }
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.symbol() == Some(symbol)
    }

    /// Decimal value of an integer constant. Range checking is left to the caller.
    pub fn integer(&self) -> Option<u32> {
        match self.kind {
            TokenKind::IntegerConstant => self.text.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Tokens {
    tokens: Vec<Token>,
    index: usize,
}

impl Tokens {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Pushes back the token consumed by the last `advance`.
    pub fn reverse(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn has_more(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn peek_next_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.index + 1).map(|t| t.kind)
    }

    /// Line to blame when the input ends early.
    pub fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_order_matches_index() {
        for (i, k) in Keyword::ALL.iter().enumerate() {
            assert_eq!(k.index(), i);
            assert_eq!(Keyword::lookup(k.as_str()), Some(*k));
        }
        assert_eq!(KEYWORDS.len(), Keyword::ALL.len());
    }

    #[test]
    fn cursor_moves_both_ways() {
        let mut tokens = Tokens::new(vec![
            Token::new(TokenKind::Keyword, "let", 1),
            Token::new(TokenKind::Identifier, "x", 1),
        ]);
        assert_eq!(tokens.peek_next_kind(), Some(TokenKind::Identifier));
        tokens.advance();
        assert_eq!(tokens.current().map(|t| t.text.as_str()), Some("x"));
        assert_eq!(tokens.peek_next_kind(), None);
        tokens.reverse();
        assert!(tokens.current().is_some_and(|t| t.is_keyword(Keyword::Let)));
        tokens.advance();
        tokens.advance();
        assert!(!tokens.has_more());
        assert_eq!(tokens.last_line(), 1);
    }
}
