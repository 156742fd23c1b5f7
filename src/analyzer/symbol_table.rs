use std::collections::HashMap;

use thiserror::Error;

use super::{Scope, SymbolKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Cannot define a {kind} variable in the {scope} symbol table")]
    WrongScope { kind: SymbolKind, scope: Scope },

    #[error("Cannot count {kind} variables in the {scope} symbol table")]
    WrongCountKind { kind: SymbolKind, scope: Scope },

    #[error("`{0}` is already defined")]
    Redefined(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub kind: SymbolKind,
    pub index: usize,
}

/// One lexical scope: the class table holds statics and fields, the
/// subroutine table holds arguments and locals.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    scope: Scope,
    table: HashMap<String, Symbol>,
    counts: HashMap<SymbolKind, usize>,
}

impl SymbolTable {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            table: HashMap::new(),
            counts: HashMap::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Clears every binding and resets the counters.
    pub fn start_subroutine(&mut self) {
        self.table.clear();
        self.counts.clear();
    }

    pub fn define(&mut self, name: &str, ty: &str, kind: SymbolKind) -> Result<usize, SymbolError> {
        if kind.scope() != self.scope {
            return Err(SymbolError::WrongScope {
                kind,
                scope: self.scope,
            });
        }
        if self.table.contains_key(name) {
            return Err(SymbolError::Redefined(name.to_string()));
        }

        let counter = self.counts.entry(kind).or_insert(0);
        let index = *counter;
        *counter += 1;

        self.table.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty: ty.to_string(),
                kind,
                index,
            },
        );
        Ok(index)
    }

    pub fn count(&self, kind: SymbolKind) -> Result<usize, SymbolError> {
        if kind.scope() != self.scope {
            return Err(SymbolError::WrongCountKind {
                kind,
                scope: self.scope,
            });
        }
        Ok(self.counts.get(&kind).copied().unwrap_or(0))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.table.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        self.get(name).map(|s| s.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.ty.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.index)
    }
}

/// Subroutine scope first, then class scope.
pub fn resolve<'a>(
    subroutine: &'a SymbolTable,
    class: &'a SymbolTable,
    name: &str,
) -> Option<&'a Symbol> {
    subroutine.get(name).or_else(|| class.get(name))
}
