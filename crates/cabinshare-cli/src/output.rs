//! Terminal rendering for command results
//!
//! Commands talk to an [`OutputFormatter`]. In JSON mode every command prints
//! one document through [`OutputFormatter::print_json`] and the per-line
//! methods stay quiet, so stdout is always a single parseable value.

use cabinshare_core::domain::{AlternativeSuggestion, BookingConflict, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    /// One detected collision with an approved booking
    fn conflict(&self, conflict: &BookingConflict);
    /// One proposed alternative, `rank` counting from 1
    fn suggestion(&self, rank: usize, suggestion: &AlternativeSuggestion);
    fn print_json(&self, value: &serde_json::Value);
}

/// Plain text with status marks; problems go to stderr
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("\u{2717} {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn info(&self, message: &str) {
        println!("  {message}");
    }

    fn conflict(&self, conflict: &BookingConflict) {
        println!("{}", conflict_line(conflict));
    }

    fn suggestion(&self, rank: usize, suggestion: &AlternativeSuggestion) {
        println!("{}", suggestion_line(rank, suggestion));
    }

    fn print_json(&self, _value: &serde_json::Value) {}
}

/// Machine-readable output; only errors are emitted outside `print_json`
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, _message: &str) {}

    fn error(&self, message: &str) {
        eprintln!("{}", serde_json::json!({ "error": message }));
    }

    fn warn(&self, _message: &str) {}

    fn info(&self, _message: &str) {}

    fn conflict(&self, _conflict: &BookingConflict) {}

    fn suggestion(&self, _rank: usize, _suggestion: &AlternativeSuggestion) {}

    fn print_json(&self, value: &serde_json::Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("{}", serde_json::json!({ "error": e.to_string() })),
        }
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}

/// `"1 night"`, `"3 nights"`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn conflict_line(conflict: &BookingConflict) -> String {
    let mark = match conflict.severity() {
        Severity::Error => "\u{2717}",
        Severity::Warning => "!",
    };
    format!("{mark} [{}] {}", conflict.kind(), conflict.message())
}

fn suggestion_line(rank: usize, suggestion: &AlternativeSuggestion) -> String {
    format!(
        "{rank}. {} to {} ({:+} {})",
        suggestion.start_date(),
        suggestion.end_date(),
        suggestion.offset_days(),
        if suggestion.distance() == 1 { "day" } else { "days" }
    )
}
