use crate::lex::Span;
use std::fmt;

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name, Span::DUMMY)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Str(String),
    Integer(u64),
    Bool(bool),
    None,
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Lit::Integer(n) => write!(f, "{}", n),
            Lit::Bool(b) => write!(f, "{}", b),
            Lit::None => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Name of the node variant, as reported in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Ident(_) => "Identifier",
            ExprKind::Call { .. } => "CallExpression",
            ExprKind::Match { .. } => "MatchExpression",
        }
    }
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Self {
            kind,
            span: Span::DUMMY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Lit),
    Ident(Ident),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Reserved: no surface syntax produces it yet.
    Match {
        expr: Box<Expr>,
        cases: Vec<MatchCase>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Literal(Lit),
    Ident(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Var(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<Ident>,
    pub mutable: bool,
    pub init: Option<Expr>,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Option<Ident>,
    pub body: Block,
    pub is_fractal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triad {
    pub name: Ident,
    pub fields: Vec<TriadField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriadField {
    pub name: Ident,
    pub ty: Ident,
    /// `Some(n)` exactly when the field was declared as `ty[n]`.
    pub array_size: Option<u64>,
}

impl TriadField {
    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Triad(Triad),
    Function(Function),
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>,
}
