//! Editor-facing helpers: diagnostics, keyword completion and hover text.
//! Transport (a language server loop) is left to the embedding front end.

use crate::{
    err::{CompileError, Handler},
    lex::{Span, TokenKind, KEYWORDS},
    Compiler,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Zero-based line and character position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub start: Position,
    pub end: Position,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub label: &'static str,
}

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern must compile"));

/// Flags each `}` without an open `{` and, once, any `{` left open at the end.
pub fn brace_diagnostics(src: &str) -> Vec<Diagnostic> {
    let handler = Handler::new(src);
    let mut diagnostics = vec![];
    let mut open = 0usize;

    for (i, c) in src.char_indices() {
        match c {
            '{' => open += 1,
            '}' if open == 0 => {
                let span = Span::new(i, i + 1);
                diagnostics.push(diagnostic(&handler, span, "unmatched closing brace"));
            }
            '}' => open -= 1,
            _ => {}
        }
    }

    if open > 0 {
        let line = src.matches('\n').count();
        diagnostics.push(Diagnostic {
            start: Position { line, character: 0 },
            end: Position { line, character: 1 },
            message: "unmatched opening brace".to_string(),
        });
    }
    diagnostics
}

/// Brace problems if there are any, otherwise the first compile error.
pub fn compile_diagnostics(src: &str) -> Vec<Diagnostic> {
    let diagnostics = brace_diagnostics(src);
    if !diagnostics.is_empty() {
        return diagnostics;
    }

    match Compiler::new().compile(src) {
        Ok(_) => vec![],
        Err(e) => vec![error_diagnostic(src, &e)],
    }
}

fn error_diagnostic(src: &str, err: &CompileError) -> Diagnostic {
    let handler = Handler::new(src);
    let span = err.span().unwrap_or(Span::DUMMY);
    diagnostic(&handler, span, &err.to_string())
}

fn diagnostic(handler: &Handler<'_>, span: Span, message: &str) -> Diagnostic {
    let (line, character) = handler.line_col(span.lo());
    let (end_line, end_character) = handler.line_col(span.hi());
    Diagnostic {
        start: Position { line, character },
        end: Position {
            line: end_line,
            character: end_character,
        },
        message: message.to_string(),
    }
}

/// Every language keyword, in declaration order.
pub fn completions() -> Vec<Completion> {
    use TokenKind::*;
    [
        Triad, Fractal, Parallel, Consensus, Immutable, Mutable, Route, Anchor, True, False,
        Uncertain,
    ]
    .iter()
    .map(|k| Completion { label: k.as_str() })
    .collect()
}

pub fn hover(src: &str, pos: Position) -> Option<String> {
    let word = word_at(src, pos)?;
    match KEYWORDS.get(word) {
        Some(kind) if kind.is_keyword() => Some(format!("keyword: {}", word)),
        Some(kind) if kind.is_builtin_ty() => Some(format!("built-in type: {}", word)),
        _ => None,
    }
}

/// The word touching `pos`, where touching includes the position just past its end.
pub fn word_at(src: &str, pos: Position) -> Option<&str> {
    let line = src.lines().nth(pos.line)?;
    WORD.find_iter(line)
        .find(|m| {
            let start = line[..m.start()].chars().count();
            let end = line[..m.end()].chars().count();
            start <= pos.character && pos.character <= end
        })
        .map(|m| m.as_str())
}
