use crate::{
    err::SemanticError,
    parse::ast::{Block, Decl, Expr, ExprKind, Function, Ident, MatchCase, Program, Stmt, VarDecl},
    store::{self, NoopNotifier, StoreNotifier},
    symbol::{Symbol, SymbolTable},
};
use log::{debug, trace};

pub type Result<T> = std::result::Result<T, SemanticError>;

/// Single forward pass over a program, defining every declared name in one
/// global table and resolving every name used in an expression.
///
/// Function parameters are not defined, so a body that refers to its own
/// parameters fails with `UnknownSymbol`. Field, parameter and return types
/// are carried along but never checked.
pub struct Analyzer<'ast, 'n> {
    symbols: SymbolTable<Symbol<'ast>>,
    notifier: &'n dyn StoreNotifier,
}

impl<'ast> Analyzer<'ast, 'static> {
    pub fn new() -> Self {
        Self::with_notifier(&NoopNotifier)
    }
}

impl<'ast> Default for Analyzer<'ast, 'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast, 'n> Analyzer<'ast, 'n> {
    pub fn with_notifier(notifier: &'n dyn StoreNotifier) -> Self {
        Self {
            symbols: SymbolTable::new(),
            notifier,
        }
    }

    pub fn analyze(&mut self, program: &'ast Program) -> Result<()> {
        for decl in &program.decls {
            self.analyze_decl(decl)?;
        }
        debug!("resolved program with {} symbols", self.symbols.len());
        Ok(())
    }

    /// Consumes the analyzer, handing back what it defined.
    pub fn into_symbols(self) -> SymbolTable<Symbol<'ast>> {
        self.symbols
    }

    fn analyze_decl(&mut self, decl: &'ast Decl) -> Result<()> {
        match decl {
            Decl::Triad(t) => {
                self.define(Symbol::Triad(t))?;
                let id = store::triad_id("semantic", &t.name.name);
                self.notifier.notify(&id, t.name.name.as_bytes());
                Ok(())
            }
            Decl::Function(f) => self.analyze_fn(f),
        }
    }

    fn analyze_fn(&mut self, f: &'ast Function) -> Result<()> {
        self.define(Symbol::Function(f))?;
        self.analyze_block(&f.body)
    }

    fn analyze_block(&mut self, block: &'ast Block) -> Result<()> {
        for stmt in &block.stmts {
            match stmt {
                Stmt::Var(v) => self.analyze_var(v)?,
                Stmt::Expr(e) => self.analyze_expr(e)?,
            }
        }
        Ok(())
    }

    fn analyze_var(&mut self, v: &'ast VarDecl) -> Result<()> {
        self.define(Symbol::Variable(v))?;
        match &v.init {
            Some(init) => self.analyze_expr(init),
            None => Ok(()),
        }
    }

    fn analyze_expr(&mut self, expr: &'ast Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::Literal(_) => Ok(()),
            ExprKind::Ident(name) => self.lookup(name).map(|_| ()),
            ExprKind::Call { callee, args } => {
                self.analyze_expr(callee)?;
                for arg in args {
                    self.analyze_expr(arg)?;
                }
                Ok(())
            }
            ExprKind::Match { expr, cases } => {
                self.analyze_expr(expr)?;
                // Patterns bind rather than refer, so only the arms are resolved.
                for MatchCase { body, .. } in cases {
                    self.analyze_expr(body)?;
                }
                Ok(())
            }
        }
    }

    fn define(&mut self, symbol: Symbol<'ast>) -> Result<()> {
        let ident = symbol.ident();
        if !self.symbols.define(&ident.name, symbol) {
            return Err(SemanticError::DuplicateSymbol {
                name: ident.name.clone(),
                span: ident.span,
            });
        }
        trace!("defined {}", symbol);
        Ok(())
    }

    fn lookup(&self, ident: &Ident) -> Result<Symbol<'ast>> {
        self.symbols
            .get(&ident.name)
            .copied()
            .ok_or_else(|| SemanticError::UnknownSymbol {
                name: ident.name.clone(),
                span: ident.span,
            })
    }
}

/// Runs a fresh analyzer with the no-op store over `program`.
pub fn analyze(program: &Program) -> Result<()> {
    Analyzer::new().analyze(program)
}
