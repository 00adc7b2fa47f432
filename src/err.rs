use crate::lex::{Span, TokenKind};
use std::fmt;
use thiserror::Error;

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character `{ch}`")]
    UnexpectedChar { ch: char, offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedChar { offset, .. } => *offset,
        }
    }
}

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    Declaration,
    Expression,
    FunctionKw,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Declaration => f.write_str("declaration"),
            Expected::Expression => f.write_str("expression"),
            Expected::FunctionKw => f.write_str("`function`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: Expected,
        found: TokenKind,
        span: Span,
    },
    #[error("integer literal `{lexeme}` is out of range")]
    InvalidNumber { lexeme: String, span: Span },
    #[error("calls nested more than {limit} deep")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Offset of the offending token.
    pub fn offset(&self) -> usize {
        self.span().lo()
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("symbol `{name}` is already defined")]
    DuplicateSymbol { name: String, span: Span },
    #[error("symbol `{name}` is not defined")]
    UnknownSymbol { name: String, span: Span },
}

impl SemanticError {
    pub fn name(&self) -> &str {
        match self {
            SemanticError::DuplicateSymbol { name, .. }
            | SemanticError::UnknownSymbol { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SemanticError::DuplicateSymbol { span, .. }
            | SemanticError::UnknownSymbol { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("no code generation rule for `{kind}`")]
    UnsupportedNode { kind: &'static str },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Where in the source the error points, if anywhere.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(LexError::UnexpectedChar { ch, offset }) => {
                Some(Span::new(*offset, offset + ch.len_utf8()))
            }
            CompileError::Parse(e) => Some(e.span()),
            CompileError::Semantic(e) => Some(e.span()),
            CompileError::Codegen(_) => None,
        }
    }
}

/// Renders errors against the source they came from.
pub struct Handler<'src> {
    src: &'src str,
}

impl<'src> Handler<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src }
    }

    pub fn render(&self, err: &CompileError) -> String {
        match err.span() {
            Some(span) => self.report(span, &err.to_string()),
            None => format!("error: {}", err),
        }
    }

    /// `error: msg` followed by the source line and a caret marker under `span`.
    pub fn report(&self, mut span: Span, msg: &str) -> String {
        if self.src.is_empty() {
            return format!("error: {}", msg);
        }
        if span.lo() >= self.src.len() {
            let last = floor_char_boundary(self.src, self.src.len() - 1);
            span = Span::new(last, self.src.len());
        }

        let lo = self.line_start(span);
        let hi = self.line_end(span);
        let (line, col) = self.line_col(span.lo());
        let text = &self.src[lo..hi];
        let pad = self.src[lo..span.lo()].chars().count();
        let width = self.src[span.lo()..span.hi().min(hi)].chars().count().max(1);
        format!(
            "error: {}\n --> {}:{}\n{}\n{}{}",
            msg,
            line + 1,
            col + 1,
            text,
            " ".repeat(pad),
            "^".repeat(width),
        )
    }

    /// Zero-based line and character column of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = floor_char_boundary(self.src, offset.min(self.src.len()));
        let before = &self.src[..offset];
        let line = before.matches('\n').count();
        let col = before[line_start_of(before)..].chars().count();
        (line, col)
    }

    fn line_start(&self, span: Span) -> usize {
        line_start_of(&self.src[..span.lo()])
    }

    fn line_end(&self, span: Span) -> usize {
        self.src[span.lo()..]
            .find('\n')
            .map(|i| span.lo() + i)
            .unwrap_or_else(|| self.src.len())
    }
}

fn line_start_of(s: &str) -> usize {
    s.rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
