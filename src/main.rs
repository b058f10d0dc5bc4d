use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;

use quill::buffer::Buffer;
use quill::cli::CliArgs;
use quill::config::EditorConfig;
use quill::syntax::{LanguageId, TokenKind};
use quill::util::validate_text_file;

fn main() -> Result<()> {
    quill::tracing::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();

    validate_text_file(&args.file)
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let language = resolve_language(&args, &config)?;
    tracing::info!(
        file = %args.file.display(),
        language = language.display_name(),
        "loaded file"
    );

    let buffer = Buffer::from_text(&text, language);

    if args.summary {
        print_summary(&buffer);
    } else {
        print_highlighted(&buffer, !args.no_color)?;
    }

    Ok(())
}

/// CLI flag wins over config override, which wins over extension
/// detection.
fn resolve_language(args: &CliArgs, config: &EditorConfig) -> Result<LanguageId> {
    if let Some(name) = &args.language {
        return LanguageId::from_name(name)
            .with_context(|| format!("unknown language: {}", name));
    }
    if let Some(name) = &config.language_override {
        if let Some(language) = LanguageId::from_name(name) {
            return Ok(language);
        }
        tracing::warn!(name, "ignoring unknown language_override in config");
    }
    Ok(LanguageId::from_path(&args.file))
}

fn print_summary(buffer: &Buffer) {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for index in 0..buffer.line_count() {
        if let Ok(tokens) = buffer.tokens(index) {
            for token in tokens {
                *counts.entry(kind_name(token.kind)).or_insert(0) += 1;
                total += 1;
            }
        }
    }

    println!(
        "{} lines, {} tokens ({})",
        buffer.line_count(),
        total,
        buffer.language().display_name()
    );
    for (name, count) in counts {
        println!("{:>12}  {}", name, count);
    }
}

fn print_highlighted(buffer: &Buffer, color: bool) -> Result<()> {
    use std::io::Write;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Plain text gains nothing from per-token colors; dump it bare.
    let color = color && buffer.language().has_highlighting();

    for index in 0..buffer.line_count() {
        let text: Vec<char> = buffer.line_text(index)?.chars().collect();
        let tokens = buffer.tokens(index)?;

        if !color {
            let line: String = text.iter().collect();
            writeln!(out, "{}", line)?;
            continue;
        }

        let mut cursor = 0;
        for token in tokens {
            if token.start > cursor {
                let gap: String = text[cursor..token.start].iter().collect();
                write!(out, "{}", gap)?;
            }
            let body: String = text[token.start..token.end()].iter().collect();
            write!(out, "\x1b[{}m{}\x1b[0m", ansi_code(token.kind), body)?;
            cursor = token.end();
        }
        if cursor < text.len() {
            let tail: String = text[cursor..].iter().collect();
            write!(out, "{}", tail)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Keyword => "keyword",
        TokenKind::Identifier => "identifier",
        TokenKind::Number => "number",
        TokenKind::String => "string",
        TokenKind::Comment => "comment",
        TokenKind::Operator => "operator",
        TokenKind::Punctuation => "punctuation",
        TokenKind::Unknown => "unknown",
    }
}

fn ansi_code(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Keyword => "35",     // magenta
        TokenKind::Identifier => "39",  // default
        TokenKind::Number => "36",      // cyan
        TokenKind::String => "32",      // green
        TokenKind::Comment => "90",     // bright black
        TokenKind::Operator => "33",    // yellow
        TokenKind::Punctuation => "39", // default
        TokenKind::Unknown => "41",     // red background
    }
}
