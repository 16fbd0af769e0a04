use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use minilex::scanner;
use minilex::scanner::token::Token;

#[derive(Parser, Debug)]
#[command(name = "minilex", about = "A lexical analyzer for a small C-like language")]
struct Cli {
    /// Source file to scan (omit to read standard input; an interactive
    /// terminal drops into the prompt instead)
    file: Option<PathBuf>,

    /// Token output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

fn read_source(cli: &Cli) -> Result<(String, String)> {
    match &cli.file {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("read source file '{}'", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("read source from stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

fn print_tokens(tokens: &[Token], format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(tokens).context("serialize tokens to JSON")?;
            println!("{json}");
        }
        _ => {
            for token in tokens {
                println!("{token}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.file.is_none() && std::io::stdin().is_terminal() {
        minilex::repl::run_repl();
        return Ok(());
    }

    let (name, source) = read_source(&cli)?;
    match scanner::scan(&source) {
        Ok(tokens) => print_tokens(&tokens, &cli.format),
        Err(e) => {
            let report = miette::Report::new(e.with_source_code(name, source));
            eprintln!("{report:?}");
            std::process::exit(1);
        }
    }
}
