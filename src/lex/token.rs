use crate::lex::Span;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Source text of the token. Empty for `Eof`.
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    pub fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: "",
            span: Span::new(offset, offset),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.lo()
    }

    /// `function` is not reserved; declarations match it by spelling.
    pub fn is_function_kw(&self) -> bool {
        self.kind == TokenKind::Ident && self.lexeme == "function"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Triad,
    Fractal,
    Parallel,
    Consensus,
    Immutable,
    Mutable,
    Route,
    Anchor,
    True,
    False,
    Uncertain,

    // Built-in types
    TriadHash,
    FractalCoord,
    ConsensusProof,
    Wac,
    NetworkPath,

    // Literals.
    Ident,
    Number,
    Str,

    // Punctuation.
    Colon,
    SemiColon,
    Comma,
    Dot,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenSquare,
    CloseSquare,
    Arrow,
    Eq,

    // Operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    AndAnd,
    OrOr,
    Not,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Triad
                | Fractal
                | Parallel
                | Consensus
                | Immutable
                | Mutable
                | Route
                | Anchor
                | True
                | False
                | Uncertain
        )
    }

    pub fn is_builtin_ty(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            TriadHash | FractalCoord | ConsensusProof | Wac | NetworkPath
        )
    }

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Triad => "triad",
            Fractal => "fractal",
            Parallel => "parallel",
            Consensus => "consensus",
            Immutable => "immutable",
            Mutable => "mutable",
            Route => "route",
            Anchor => "anchor",
            True => "true",
            False => "false",
            Uncertain => "uncertain",
            TriadHash => "TriadHash",
            FractalCoord => "FractalCoord",
            ConsensusProof => "ConsensusProof",
            Wac => "WAC",
            NetworkPath => "NetworkPath",
            Ident => "identifier",
            Number => "number",
            Str => "string",
            Colon => ":",
            SemiColon => ";",
            Comma => ",",
            Dot => ".",
            OpenParen => "(",
            CloseParen => ")",
            OpenBrace => "{",
            CloseBrace => "}",
            OpenSquare => "[",
            CloseSquare => "]",
            Arrow => "->",
            Eq => "=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            AndAnd => "&&",
            OrOr => "||",
            Not => "!",
            EqEq => "==",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident | TokenKind::Number | TokenKind::Str | TokenKind::Eof => {
                f.write_str(self.as_str())
            }
            _ => write!(f, "`{}`", self.as_str()),
        }
    }
}

/// Reserved words. Identifier-shaped lexemes found here take the keyword's kind.
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    let mut m = HashMap::new();
    for kind in &[
        Triad,
        Fractal,
        Parallel,
        Consensus,
        Immutable,
        Mutable,
        Route,
        Anchor,
        True,
        False,
        Uncertain,
        TriadHash,
        FractalCoord,
        ConsensusProof,
        Wac,
        NetworkPath,
    ] {
        m.insert(kind.as_str(), *kind);
    }
    m
});
