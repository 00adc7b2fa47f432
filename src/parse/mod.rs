pub mod ast;

use crate::{
    err::{Expected, ParseError},
    lex::{Token, TokenKind, TokenKind::*},
};
use ast::{Block, Decl, Expr, ExprKind, Function, Lit, Param, Program, Stmt, TriadField, VarDecl};
use log::debug;

/// How many calls may be nested inside one another's argument lists.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser with one token of lookahead. The first error is fatal.
pub struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    depth: usize,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut decls = vec![];
        while !self.eof() {
            decls.push(self.decl()?);
        }
        debug!("parsed {} declarations", decls.len());
        Ok(Program { decls })
    }

    fn decl(&mut self) -> Result<Decl, ParseError> {
        let token = self.peek();
        match token.kind {
            Triad => self.triad_decl().map(Decl::Triad),
            Fractal => {
                self.advance();
                self.fn_decl(true).map(Decl::Function)
            }
            _ if token.is_function_kw() => self.fn_decl(false).map(Decl::Function),
            _ => Err(unexpected(Expected::Declaration, &token)),
        }
    }

    fn triad_decl(&mut self) -> Result<ast::Triad, ParseError> {
        self.consume(Triad)?;
        let name = self.ident()?;
        self.consume(OpenBrace)?;

        let mut fields = vec![];
        while !self.check(CloseBrace) {
            fields.push(self.field()?);
        }
        self.consume(CloseBrace)?;

        Ok(ast::Triad { name, fields })
    }

    fn field(&mut self) -> Result<TriadField, ParseError> {
        let name = self.ident()?;
        self.consume(Colon)?;
        let ty = self.ident()?;

        let array_size = if self.eat(OpenSquare) {
            let size = self.consume(Number)?;
            let size = parse_integer(&size)?;
            self.consume(CloseSquare)?;
            Some(size)
        } else {
            None
        };

        self.consume(SemiColon)?;
        Ok(TriadField {
            name,
            ty,
            array_size,
        })
    }

    fn fn_decl(&mut self, is_fractal: bool) -> Result<Function, ParseError> {
        let kw = self.peek();
        if !kw.is_function_kw() {
            return Err(unexpected(Expected::FunctionKw, &kw));
        }
        self.advance();

        let name = self.ident()?;
        self.consume(OpenParen)?;
        let params = self.params()?;
        self.consume(CloseParen)?;

        let ret = if self.eat(Arrow) {
            Some(self.ident()?)
        } else {
            None
        };

        let body = self.block()?;
        Ok(Function {
            name,
            params,
            ret,
            body,
            is_fractal,
        })
    }

    fn params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = vec![];
        if self.check(CloseParen) {
            return Ok(params);
        }

        loop {
            let name = self.ident()?;
            self.consume(Colon)?;
            let ty = self.ident()?;
            params.push(Param { name, ty });
            if !self.eat(Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn block(&mut self) -> Result<Block, ParseError> {
        let open = self.consume(OpenBrace)?;
        let mut stmts = vec![];
        while !self.check(CloseBrace) && !self.eof() {
            stmts.push(self.stmt()?);
        }
        let close = self.consume(CloseBrace)?;
        Ok(Block {
            stmts,
            span: open.span.to(close.span),
        })
    }

    fn stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            Immutable | Mutable => self.var_decl().map(Stmt::Var),
            _ => {
                let expr = self.expr()?;
                self.consume(SemiColon)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let mutable = self.peek().kind == Mutable;
        self.advance();
        let name = self.ident()?;

        let ty = if self.eat(Colon) {
            Some(self.ident()?)
        } else {
            None
        };

        let init = if self.eat(Eq) {
            Some(self.expr()?)
        } else {
            None
        };

        self.consume(SemiColon)?;
        Ok(VarDecl {
            name,
            ty,
            mutable,
            init,
        })
    }

    /// Only primaries and calls; operator tokens are rejected here.
    fn expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();
        let lit = match token.kind {
            Ident => {
                self.advance();
                let name = ast::Ident::new(token.lexeme, token.span);
                let callee = Expr::new(ExprKind::Ident(name), token.span);
                if !self.eat(OpenParen) {
                    return Ok(callee);
                }
                if self.depth >= MAX_NESTING {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING,
                        span: token.span,
                    });
                }

                self.depth += 1;
                let args = self.args();
                self.depth -= 1;
                let args = args?;
                let close = self.consume(CloseParen)?;
                return Ok(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(callee),
                        args,
                    },
                    token.span.to(close.span),
                ));
            }
            Number => Lit::Integer(parse_integer(&token)?),
            True => Lit::Bool(true),
            False => Lit::Bool(false),
            Uncertain => Lit::Str(token.lexeme.to_string()),
            _ => return Err(unexpected(Expected::Expression, &token)),
        };

        self.advance();
        Ok(Expr::new(ExprKind::Literal(lit), token.span))
    }

    fn args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![];
        if self.check(CloseParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if !self.eat(Comma) {
                break;
            }
        }
        Ok(args)
    }

    fn ident(&mut self) -> Result<ast::Ident, ParseError> {
        let token = self.consume(TokenKind::Ident)?;
        Ok(ast::Ident::new(token.lexeme, token.span))
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        let token = self.peek();
        if token.kind == kind {
            self.advance();
            return Ok(token);
        }
        Err(unexpected(Expected::Token(kind), &token))
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Past the end of the slice this keeps answering `Eof`.
    fn peek(&self) -> Token<'src> {
        match self.tokens.get(self.pos) {
            Some(t) => *t,
            None => Token::eof(self.tokens.last().map_or(0, |t| t.span.hi())),
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eof(&self) -> bool {
        self.peek().kind == Eof
    }
}

pub fn parse(tokens: &[Token<'_>]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse()
}

fn unexpected(expected: Expected, found: &Token<'_>) -> ParseError {
    ParseError::Unexpected {
        expected,
        found: found.kind,
        span: found.span,
    }
}

fn parse_integer(token: &Token<'_>) -> Result<u64, ParseError> {
    token
        .lexeme
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            lexeme: token.lexeme.to_string(),
            span: token.span,
        })
}
