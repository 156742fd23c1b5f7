use std::fmt;

use crate::codegen::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Class,
    Subroutine,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Class => f.write_str("class"),
            Scope::Subroutine => f.write_str("subroutine"),
        }
    }
}

/// Storage class of a named variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Static,
    Field,
    Argument,
    Local,
}

impl SymbolKind {
    pub fn scope(self) -> Scope {
        match self {
            SymbolKind::Static | SymbolKind::Field => Scope::Class,
            SymbolKind::Argument | SymbolKind::Local => Scope::Subroutine,
        }
    }

    pub fn segment(self) -> Segment {
        match self {
            SymbolKind::Static => Segment::Static,
            SymbolKind::Field => Segment::This,
            SymbolKind::Argument => Segment::Argument,
            SymbolKind::Local => Segment::Local,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Static => "static",
            SymbolKind::Field => "field",
            SymbolKind::Argument => "argument",
            SymbolKind::Local => "local",
        };
        f.write_str(s)
    }
}
