use crate::{
    err::LexError,
    lex::{Span, Token, TokenKind, TokenKind::*, KEYWORDS},
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// A lexical rule. `kind == None` means the match is skipped.
struct Rule {
    re: Regex,
    kind: Option<TokenKind>,
}

/// Tried in order; the first rule matching at the current offset wins, so
/// longer operators must come before their single-character prefixes.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let table: &[(&str, Option<TokenKind>)] = &[
        (r"[ \t\r\n]+", None),
        (r"//[^\n]*", None),
        (r"/\*[\s\S]*?\*/", None),
        (r"->", Some(Arrow)),
        (r":", Some(Colon)),
        (r";", Some(SemiColon)),
        (r",", Some(Comma)),
        (r"\.", Some(Dot)),
        (r"\(", Some(OpenParen)),
        (r"\)", Some(CloseParen)),
        (r"\{", Some(OpenBrace)),
        (r"\}", Some(CloseBrace)),
        (r"\[", Some(OpenSquare)),
        (r"\]", Some(CloseSquare)),
        (r"==", Some(EqEq)),
        (r"!=", Some(Ne)),
        (r"<=", Some(Le)),
        (r">=", Some(Ge)),
        (r"<", Some(Lt)),
        (r">", Some(Gt)),
        (r"=", Some(Eq)),
        (r"\+", Some(Plus)),
        (r"-", Some(Minus)),
        (r"\*", Some(Star)),
        (r"/", Some(Slash)),
        (r"%", Some(Percent)),
        (r"&&", Some(AndAnd)),
        (r"\|\|", Some(OrOr)),
        (r"!", Some(Not)),
        (r"[0-9]+", Some(Number)),
        (r#""([^"\\]|\\.)*""#, Some(Str)),
        (r"[A-Za-z_][A-Za-z0-9_]*", Some(Ident)),
    ];

    table
        .iter()
        .map(|&(pattern, kind)| Rule {
            re: Regex::new(&format!("^(?:{})", pattern)).expect("lexical rule must compile"),
            kind,
        })
        .collect()
});

pub struct Lexer<'src> {
    src: &'src str,
    start_pos: usize,
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            start_pos: 0,
            pos: 0,
        }
    }

    /// Returns the next significant token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        while !self.eof() {
            self.start_pos = self.pos;
            if let Some(t) = self.scan_token()? {
                return Ok(t);
            }
        }
        Ok(Token::eof(self.src.len()))
    }

    fn scan_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let rest = &self.src[self.pos..];
        for rule in RULES.iter() {
            let m = match rule.re.find(rest) {
                Some(m) if !m.as_str().is_empty() => m,
                _ => continue,
            };
            self.pos += m.end();
            return Ok(rule.kind.map(|kind| self.add_token(kind)));
        }

        Err(LexError::UnexpectedChar {
            ch: rest.chars().next().unwrap_or_default(),
            offset: self.pos,
        })
    }

    fn add_token(&self, kind: TokenKind) -> Token<'src> {
        let lexeme = &self.src[self.start_pos..self.pos];
        let kind = match kind {
            Ident => KEYWORDS.get(lexeme).copied().unwrap_or(Ident),
            k => k,
        };
        Token::new(kind, lexeme, Span::new(self.start_pos, self.pos))
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }
}

/// Lexes the whole of `src`. The result always ends with exactly one `Eof`.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = vec![];
    loop {
        let t = lexer.next_token()?;
        let done = t.kind == Eof;
        tokens.push(t);
        if done {
            break;
        }
    }
    debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}
