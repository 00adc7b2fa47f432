use crate::{
    err::CodegenError,
    parse::ast::{Block, Decl, Expr, ExprKind, Function, Program, Stmt, Triad, VarDecl},
    store::{self, NoopNotifier, StoreNotifier},
};
use log::debug;

pub type Result<T> = std::result::Result<T, CodegenError>;

const INDENT: &str = "  ";

/// Lowers a resolved program to C-like text, one line per declaration,
/// field or statement.
pub struct Generator<'n> {
    output: Vec<String>,
    notifier: &'n dyn StoreNotifier,
}

impl Generator<'static> {
    pub fn new() -> Self {
        Self::with_notifier(&NoopNotifier)
    }
}

impl Default for Generator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'n> Generator<'n> {
    pub fn with_notifier(notifier: &'n dyn StoreNotifier) -> Self {
        Self {
            output: vec![],
            notifier,
        }
    }

    pub fn generate(mut self, program: &Program) -> Result<String> {
        for decl in &program.decls {
            match decl {
                Decl::Triad(t) => self.gen_triad(t),
                Decl::Function(f) => self.gen_fn(f)?,
            }
        }
        debug!("generated {} lines", self.output.len());
        Ok(self.output.join("\n"))
    }

    fn gen_triad(&mut self, t: &Triad) {
        let start = self.output.len();
        self.output.push(format!("struct {} {{", t.name));
        for field in &t.fields {
            let line = match field.array_size {
                Some(size) => format!("{}{}[{}] {};", INDENT, field.ty, size, field.name),
                None => format!("{}{} {};", INDENT, field.ty, field.name),
            };
            self.output.push(line);
        }
        self.output.push("};".to_string());

        let id = store::triad_id("codegen", &t.name.name);
        let text = self.output[start..].join("\n");
        self.notifier.notify(&id, text.as_bytes());
    }

    fn gen_fn(&mut self, f: &Function) -> Result<()> {
        // `is_fractal` has no lowering of its own yet.
        let ret = f.ret.as_ref().map_or("void", |r| r.name.as_str());
        let params = f
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.output.push(format!("{} {}({}) {{", ret, f.name, params));
        self.gen_block(&f.body)?;
        self.output.push("}".to_string());
        Ok(())
    }

    fn gen_block(&mut self, block: &Block) -> Result<()> {
        for stmt in &block.stmts {
            let line = match stmt {
                Stmt::Var(v) => self.gen_var(v)?,
                Stmt::Expr(e) => format!("{};", self.gen_expr(e)?),
            };
            self.output.push(format!("{}{}", INDENT, line));
        }
        Ok(())
    }

    fn gen_var(&self, v: &VarDecl) -> Result<String> {
        let mutable = if v.mutable { "mutable " } else { "" };
        let ty = v.ty.as_ref().map_or("auto", |t| t.name.as_str());
        let init = match &v.init {
            Some(e) => format!(" = {}", self.gen_expr(e)?),
            None => String::new(),
        };
        Ok(format!("{}{} {}{};", mutable, ty, v.name, init))
    }

    fn gen_expr(&self, expr: &Expr) -> Result<String> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(lit.to_string()),
            ExprKind::Ident(name) => Ok(name.to_string()),
            ExprKind::Call { callee, args } => {
                let callee = self.gen_expr(callee)?;
                let args = args
                    .iter()
                    .map(|a| self.gen_expr(a))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{}({})", callee, args.join(", ")))
            }
            ExprKind::Match { .. } => Err(CodegenError::UnsupportedNode {
                kind: expr.kind_name(),
            }),
        }
    }
}

/// Lowers `program` with the no-op store.
pub fn generate(program: &Program) -> Result<String> {
    Generator::new().generate(program)
}
