//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::fmt::Write as _;

use anyhow::Result;

use shelf_core::{Book, Outcome, Statistics};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
#[derive(Debug)]
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the outcome of an operation
    pub fn print_outcome(&self, outcome: &Outcome) -> Result<()> {
        let text = self.render_outcome(outcome)?;
        if !text.is_empty() {
            println!("{}", text);
        }
        Ok(())
    }

    /// Render the outcome of an operation without printing it
    pub fn render_outcome(&self, outcome: &Outcome) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(render_human(outcome)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Quiet => Ok(render_quiet(outcome)),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Human-readable rendering
fn render_human(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { book } => format!("✓ Book \"{}\" added successfully!", book.title),
        Outcome::Removed { title, count } => {
            if *count == 1 {
                format!("✓ Book \"{}\" removed successfully!", title)
            } else {
                format!("✓ Removed {} books titled \"{}\".", count, title)
            }
        }
        Outcome::NotFound { title } => {
            format!("⚠ Book \"{}\" not found in the library.", title)
        }
        Outcome::Found { field, term, books } => {
            if books.is_empty() {
                return format!("⚠ No books found matching {}: \"{}\".", field, term);
            }
            let mut out = format!("Found {} result(s):\n\n", books.len());
            out.push_str(&render_books(books));
            out
        }
        Outcome::Listed { books } => {
            if books.is_empty() {
                return "No books in the library yet.".to_string();
            }
            let mut out = render_books(books);
            let _ = write!(out, "\n{} book(s)", books.len());
            out
        }
        Outcome::Stats { statistics } => render_statistics(statistics),
    }
}

/// Quiet rendering: titles, counts, or nothing
fn render_quiet(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { book } => book.title.clone(),
        Outcome::Removed { count, .. } => count.to_string(),
        Outcome::NotFound { .. } => String::new(),
        Outcome::Found { books, .. } | Outcome::Listed { books } => books
            .iter()
            .map(|b| b.title.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Stats { statistics } => statistics.percent_display(),
    }
}

/// Details of a single book
pub fn render_book(book: &Book) -> String {
    let status = if book.read { "Read" } else { "Not Read" };
    format!(
        "- Title : {}\n  Author: {}\n  Year  : {}\n  Genre : {}\n  Status: {}\n",
        book.title, book.author, book.year, book.genre, status
    )
}

fn render_books(books: &[Book]) -> String {
    books
        .iter()
        .map(render_book)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Total books  : {}\nBooks read   : {}\nBooks unread : {}\nRead percent : {}%",
        stats.total,
        stats.read,
        stats.unread,
        stats.percent_display()
    )
}
