use jackc::lexer::{Keyword, Lexer, Token, TokenKind};
use TokenKind::{Identifier, IntegerConstant, StringConstant, Symbol};
use jackc::Error;

fn tokens(code: &str) -> Vec<Token> {
    Lexer::tokenize(code).unwrap().into_vec()
}

fn assert_single(code: &str, kind: TokenKind, text: &str) {
    let tokens = tokens(code);
    assert_eq!(tokens.len(), 1, "{:?}", tokens);
    assert_eq!(tokens[0].kind, kind);
    assert_eq!(tokens[0].text, text);
}

macro_rules! case {
    ($name:ident, $code:expr, $kind:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert_single($code, $kind, $text);
        }
    };
}

// ---- Symbols ----
case!(lcurly, "{", Symbol, "{");
case!(rcurly, "}", Symbol, "}");
case!(lparen, "(", Symbol, "(");
case!(rsquare, "]", Symbol, "]");
case!(dot, ".", Symbol, ".");
case!(semicolon, ";", Symbol, ";");
case!(slash, "/", Symbol, "/");
case!(tilde, "~", Symbol, "~");
case!(pipe, "|", Symbol, "|");

// ---- Constants ----
case!(integer, "32767", IntegerConstant, "32767");
case!(integer_unchecked, "99999", IntegerConstant, "99999");
case!(string, "\"Hello, World\"", StringConstant, "Hello, World");
case!(empty_string, "\"\"", StringConstant, "");

// ---- Words ----
case!(kw_class, "class", TokenKind::Keyword, "class");
case!(kw_return, "return", TokenKind::Keyword, "return");
case!(ident, "Main", Identifier, "Main");
case!(ident_underscore, "_tmp_1", Identifier, "_tmp_1");
case!(ident_keyword_prefix, "classy", Identifier, "classy");
case!(ident_case_sensitive, "Class", Identifier, "Class");

#[test]
fn every_keyword_is_a_keyword() {
    for k in Keyword::ALL {
        let t = tokens(k.as_str());
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].kind, TokenKind::Keyword);
        assert_eq!(t[0].keyword(), Some(k));
    }
}

#[test]
fn statement_sequence() {
    let t = tokens("let a[i] = x + 1;");
    let got: Vec<_> = t.iter().map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::Keyword, "let"),
            (Identifier, "a"),
            (Symbol, "["),
            (Identifier, "i"),
            (Symbol, "]"),
            (Symbol, "="),
            (Identifier, "x"),
            (Symbol, "+"),
            (IntegerConstant, "1"),
            (Symbol, ";"),
        ]
    );
}

#[test]
fn no_space_needed_between_tokens() {
    let t = tokens("x-1");
    let texts: Vec<_> = t.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "-", "1"]);
}

#[test]
fn comments_are_skipped() {
    let code = "// line comment\n/** api\n * doc */ let /* inline */ x = 8 / 2; // tail";
    let texts: Vec<_> = tokens(code).iter().map(|t| t.text.clone()).collect();
    assert_eq!(texts, vec!["let", "x", "=", "8", "/", "2", ";"]);
}

#[test]
fn line_numbers_follow_newlines() {
    let code = "class\r\n  Main\n\n/* one\ntwo */ {\n}";
    let lines: Vec<_> = tokens(code).iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2, 5, 6]);
}

#[test]
fn tokenizing_twice_is_identical() {
    let code = "class Main { function void main() { do Output.printString(\"hi\"); return; } }";
    assert_eq!(tokens(code), tokens(code));
}

#[test]
fn unterminated_comment_is_fatal() {
    let err = Lexer::tokenize("let x = 1;\n/* never closed\n").unwrap_err();
    assert!(matches!(err, Error::UnterminatedComment { line: 2 }));
}

#[test]
fn newline_in_string_is_fatal() {
    let err = Lexer::tokenize("\"abc\ndef\"").unwrap_err();
    assert!(matches!(err, Error::UnterminatedString { line: 1 }));
}

#[test]
fn string_at_end_of_input_is_fatal() {
    assert!(matches!(
        Lexer::tokenize("x = \"abc").unwrap_err(),
        Error::UnterminatedString { .. }
    ));
}

#[test]
fn unknown_character_is_fatal() {
    let err = Lexer::tokenize("let x = 1;\nlet y = #;").unwrap_err();
    assert!(matches!(err, Error::UnexpectedChar { ch: '#', line: 2 }));
}

#[test]
fn integers_parse_on_demand() {
    let t = tokens("123 abc");
    assert_eq!(t[0].integer(), Some(123));
    assert_eq!(t[1].integer(), None);
}
