mod scan;
mod span;
mod token;

pub use scan::{tokenize, Lexer};
pub use span::Span;
pub use token::{Token, TokenKind, KEYWORDS};
