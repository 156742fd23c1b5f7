use crate::lexer::{Token, Tokens};

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '&' => s.push_str("&amp;"),
            '"' => s.push_str("&quot;"),
            c => s.push(c),
        }
    }
    s
}

fn terminal(token: &Token) -> String {
    format!("<{0}> {1} </{0}>", token.kind, escape(&token.text))
}

/// Flat `<tokens>` listing, one element per token.
pub fn tokens_xml(tokens: &Tokens) -> String {
    let mut out = String::from("<tokens>\n");
    for token in tokens.iter() {
        out.push_str(&terminal(token));
        out.push('\n');
    }
    out.push_str("</tokens>\n");
    out
}

/// Parse trace sink. The translator opens and closes one element per grammar
/// rule and reports every token it consumes; a disabled writer records nothing.
#[derive(Debug, Default)]
pub struct XmlWriter {
    enabled: bool,
    depth: usize,
    out: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            enabled: true,
            depth: 0,
            out: String::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    pub fn open(&mut self, tag: &str) {
        if !self.enabled {
            return;
        }
        self.line(&format!("<{}>", tag));
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        if !self.enabled {
            return;
        }
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    pub fn terminal(&mut self, token: &Token) {
        if self.enabled {
            self.line(&terminal(token));
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}
