use std::io::{self, Write};

use console::{style, StyledObject};

use crate::classify::{self, FileCategory};
use crate::highlight::{self, Token, TokenKind};
use crate::recovery::GeneratedFile;

pub struct OutputHandler {
    debug: bool,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self { debug: false }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn print_error(&self, content: &str) {
        eprintln!("{} {}", style("Error:").red().bold(), content);
    }

    pub fn print_system(&self, content: &str) {
        println!("{}", style(content).yellow().dim());
    }

    pub fn print_success(&self, content: &str) {
        println!("{} {}", style("✓").green().bold(), content);
    }

    /// The classified file tree: category headers in display order, files
    /// sorted by path inside each.
    pub fn print_file_tree(&self, files: &[GeneratedFile]) {
        for (category, bucket) in classify::group_files(files) {
            println!("{}", style(category.label().to_uppercase()).cyan().bold());
            for file in bucket {
                println!("  {}", style(&file.path).dim());
            }
        }
    }

    /// Highlighted source listing with line numbers. Styling is purely
    /// cosmetic; the printed characters are exactly the reformatted source.
    pub fn print_highlighted(&self, file: &GeneratedFile) {
        println!();
        println!("{}", style(&file.path).cyan().bold());
        for (number, tokens) in highlight::highlight(&file.content).iter().enumerate() {
            print!("{} ", style(format!("{:>4}", number + 1)).dim());
            for token in tokens {
                print!("{}", styled_token(token));
            }
            println!();
        }
        let _ = io::stdout().flush();
    }

    /// Glossary of the known annotations that actually occur in the batch.
    pub fn print_annotation_notes(&self, files: &[GeneratedFile]) {
        let mut seen: Vec<&'static str> = Vec::new();
        for file in files {
            for tokens in highlight::highlight(&file.content) {
                for token in tokens {
                    if token.kind == TokenKind::Annotation {
                        if let Some(note) = highlight::annotation_note(&token.text) {
                            if !seen.contains(&note.annotation) {
                                seen.push(note.annotation);
                            }
                        }
                    }
                }
            }
        }
        if seen.is_empty() {
            return;
        }
        println!();
        println!("{}", style("ANNOTATIONS USED").cyan().bold());
        for annotation in seen {
            let note = highlight::annotation_note(annotation).unwrap();
            println!(
                "  {} {}",
                style(note.title).yellow(),
                style(note.description).dim()
            );
        }
    }

    pub fn print_banner(&self) {
        println!("{}", style("╔═══════════════════════════════════════╗").cyan().bold());
        println!("{}", style("║   SPRINGFORGE - AI project scaffold   ║").cyan().bold());
        println!("{}", style("╚═══════════════════════════════════════╝").cyan().bold());
    }

    pub fn print_category_count(&self, files: &[GeneratedFile]) {
        let groups = classify::group_files(files);
        let summary = groups
            .iter()
            .map(|(category, bucket)| format!("{} {}", bucket.len(), label_lower(category)))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} files ({})",
            style("Generated").green().bold(),
            files.len(),
            summary
        );
    }
}

fn label_lower(category: &FileCategory) -> String {
    category.label().to_lowercase()
}

fn styled_token(token: &Token) -> StyledObject<&str> {
    let text = token.text.as_str();
    match token.kind {
        TokenKind::Comment => style(text).dim(),
        TokenKind::StringLit => style(text).green(),
        TokenKind::Annotation => style(text).yellow(),
        TokenKind::Keyword => style(text).magenta(),
        TokenKind::BuiltinType => style(text).cyan(),
        TokenKind::TypeName => style(text).cyan().bold(),
        TokenKind::Number => style(text).magenta().dim(),
        TokenKind::Plain => style(text),
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
