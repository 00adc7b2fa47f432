use log::debug;

pub mod args;
pub mod codegen;
pub mod err;
pub mod ide;
pub mod lex;
pub mod parse;
pub mod sema;
pub mod store;
pub mod symbol;

pub use args::{Args, Emit};
pub use err::{CompileError, Handler, Result};
pub use store::{LogNotifier, NoopNotifier, StoreNotifier};

use codegen::Generator;
use parse::ast::Program;
use sema::Analyzer;

/// Drives a compile: lex, parse, resolve, generate. Each call is independent.
pub struct Compiler {
    notifier: Box<dyn StoreNotifier>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_notifier(Box::new(NoopNotifier))
    }

    pub fn with_notifier(notifier: Box<dyn StoreNotifier>) -> Self {
        Self { notifier }
    }

    /// Parses and resolves `src`, stopping before code generation.
    pub fn check(&self, src: &str) -> Result<Program> {
        let tokens = lex::tokenize(src)?;
        let program = parse::parse(&tokens)?;
        Analyzer::with_notifier(&*self.notifier).analyze(&program)?;
        Ok(program)
    }

    pub fn compile(&self, src: &str) -> Result<String> {
        let program = self.check(src)?;
        let out = Generator::with_notifier(&*self.notifier).generate(&program)?;
        debug!("compiled {} bytes of source", src.len());
        Ok(out)
    }
}
