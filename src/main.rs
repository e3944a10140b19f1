//! CLI tool to tokenize and check ComponentMarkup files.

use std::fs;
use std::process::ExitCode;

use component_markup::{Grammar, StyleKey, TokenizeOptions, highlight, tokenize_with};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn usage() -> ExitCode {
    eprintln!("Usage: cmlex <command> [--lenient] [--expression] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens  Print every token with its span and kind");
    eprintln!("  check   Check that file(s) lex without errors");
    eprintln!("  styles  Print the highlight style of every range");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lenient     Tolerate unescaped '}}' in text");
    eprintln!("  --expression  Lex input as a bare expression");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  cmlex check page.cm");
    eprintln!("  cmlex tokens --lenient page.cm");
    ExitCode::from(2)
}

/// Filter from a `RUST_LOG`-style directive string, `warn` when it is unset
/// or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    let mut options = TokenizeOptions::new();
    let mut files = Vec::new();

    for arg in &args[2..] {
        match arg.as_str() {
            "--lenient" => options = options.lenient(true),
            "--expression" => options = options.grammar(Grammar::Expression),
            flag if flag.starts_with("--") => {
                eprintln!("Unknown option: {flag}");
                return ExitCode::from(2);
            }
            path => files.push(path),
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    debug!(command, files = files.len(), ?options, "starting");

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "tokens" => {
                let result = tokenize_with(&content, &options);
                for token in &result.tokens {
                    println!(
                        "{}..{}\t{:?}\t{:?}",
                        token.span.start, token.span.end, token.kind, token.text
                    );
                }
                if let Some(err) = result.error {
                    eprintln!("{path}: {} at position {}", err.kind.code(), err.position);
                    had_error = true;
                }
            }
            "check" => {
                let result = tokenize_with(&content, &options);
                match result.error {
                    None => eprintln!("{path}: ok ({} tokens)", result.tokens.len()),
                    Some(err) => {
                        eprintln!(
                            "{path}: {} at position {} ({err})",
                            err.kind.code(),
                            err.position
                        );
                        had_error = true;
                    }
                }
            }
            "styles" => {
                let highlighted = highlight(&content, &options);
                for range in &highlighted.ranges {
                    let class = range.style.map_or("-", StyleKey::class);
                    println!("{}..{}\t{class}", range.span.start, range.span.end);
                }
                if let Some(err) = highlighted.error {
                    eprintln!("{path}: {err}");
                    had_error = true;
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
