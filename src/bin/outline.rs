//! Print the symbol outline of a source file
//!
//! Usage:
//!   cargo run --bin outline -- src/lib.rs
//!   cargo run --bin outline -- --json include/widget.hpp

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use outliner::{LanguageId, OutlineConfig, OutlineEngine, OutlineResult, SymbolId};

#[derive(Parser, Debug)]
#[command(name = "outline", version, about = "Print the symbol outline of a source file")]
struct Args {
    /// File to outline (language detected from the extension)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Emit the symbol tree as JSON instead of indented text
    #[arg(long)]
    json: bool,

    /// Override the detected language (rust, c, cpp, python)
    #[arg(long, value_name = "LANG")]
    language: Option<String>,
}

fn language_from_flag(flag: &str) -> Option<LanguageId> {
    match flag.to_lowercase().as_str() {
        "rust" => Some(LanguageId::Rust),
        "c" => Some(LanguageId::C),
        "cpp" | "c++" => Some(LanguageId::Cpp),
        "python" => Some(LanguageId::Python),
        _ => None,
    }
}

fn print_subtree(result: &OutlineResult, id: SymbolId) {
    let symbol = result.symbols.get(id);
    let indent = "  ".repeat(symbol.level);
    let line = symbol.range.start_line + 1;
    match &symbol.scope {
        Some(scope) => println!(
            "{indent}{:<7} {}::{}  (line {line})",
            symbol.kind.label(),
            scope,
            symbol.name
        ),
        None => println!("{indent}{:<7} {}  (line {line})", symbol.kind.label(), symbol.name),
    }
    for &child in &symbol.children {
        print_subtree(result, child);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let language = match &args.language {
        Some(flag) => language_from_flag(flag)
            .with_context(|| format!("unknown language override `{flag}`"))?,
        None => LanguageId::from_path(&args.file),
    };

    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut engine = OutlineEngine::new();
    if !engine.supports(language) {
        bail!(
            "no outline support for {} ({})",
            args.file.display(),
            language.display_name()
        );
    }

    let result = engine.outline(&source, language, &OutlineConfig::default());
    if let Some(error) = &result.error {
        eprintln!("warning: outline is partial: {error}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.symbols)?);
    } else {
        for &root in result.symbols.roots() {
            print_subtree(&result, root);
        }
    }
    Ok(())
}
