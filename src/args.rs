use std::{path::PathBuf, str::FromStr};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "triadc", about = "Compiles a triad source file to C-like text")]
pub struct Args {
    #[structopt(name = "FILE_NAME")]
    pub file_name: PathBuf,

    /// What to print: tokens, ast or code
    #[structopt(long, default_value = "code")]
    pub emit: Emit,

    /// Log every record-store notification at debug level
    #[structopt(long)]
    pub trace_store: bool,
}

impl Args {
    pub fn new() -> Self {
        Self::from_args()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Tokens,
    Ast,
    Code,
}

impl FromStr for Emit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokens" => Ok(Emit::Tokens),
            "ast" => Ok(Emit::Ast),
            "code" => Ok(Emit::Code),
            _ => Err(format!("unknown emit kind `{}`", s)),
        }
    }
}
