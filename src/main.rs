use std::{fs, path::Path, process};
use triadc::{
    lex, Args, CompileError, Compiler, Emit, Handler, LogNotifier, NoopNotifier, StoreNotifier,
};

fn main() {
    env_logger::init();
    let args = Args::new();

    let source = match read_source(&args.file_name) {
        Some(s) => s,
        None => process::exit(1),
    };

    let notifier: Box<dyn StoreNotifier> = if args.trace_store {
        Box::new(LogNotifier)
    } else {
        Box::new(NoopNotifier)
    };
    let c = Compiler::with_notifier(notifier);

    let result = match args.emit {
        Emit::Tokens => lex::tokenize(&source)
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|t| format!("{:?} {:?} @{}", t.kind, t.lexeme, t.offset()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .map_err(CompileError::from),
        Emit::Ast => c.check(&source).map(|program| format!("{:#?}", program)),
        Emit::Code => c.compile(&source),
    };

    match result {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("{}", Handler::new(&source).render(&e));
            process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("cannot open {}: {}", path.display(), e);
            eprintln!("usage: triadc <FILE_NAME> [--emit tokens|ast|code]");
            None
        }
    }
}
