mod table;

use crate::parse::ast::{Function, Ident, Triad, VarDecl};
use std::fmt;

pub use self::table::SymbolTable;

/// The declaration a name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol<'ast> {
    Triad(&'ast Triad),
    Function(&'ast Function),
    Variable(&'ast VarDecl),
}

impl<'ast> Symbol<'ast> {
    pub fn ident(&self) -> &'ast Ident {
        match self {
            Symbol::Triad(t) => &t.name,
            Symbol::Function(f) => &f.name,
            Symbol::Variable(v) => &v.name,
        }
    }

    pub fn name(&self) -> &'ast str {
        &self.ident().name
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Symbol::Triad(_) => "triad",
            Symbol::Function(_) => "function",
            Symbol::Variable(_) => "variable",
        };
        write!(f, "{} {}", kind, self.name())
    }
}
