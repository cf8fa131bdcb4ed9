//! Display framework for CLI output formatting.
//!
//! Shared primitives for tables, detail views and styled status lines used
//! across all command output.

pub mod detail;
pub mod table;

use console::style;
use serde::Serialize;

pub use detail::DetailView;
pub use table::{list_table, render_list};

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Dispatch output based on JSON mode flag.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Render a success action result.
pub fn action_success(message: &str) -> String {
    format!("{} {}", style("\u{2713}").green().bold(), message)
}

/// Render a failure action result.
pub fn action_failure(message: &str) -> String {
    format!("{} {}", style("\u{2717}").red().bold(), message)
}

/// Render a 0-10 score as a bar, e.g. `███████░░░ 7.0`.
pub fn score_bar(score: f64) -> String {
    let filled = score.round().clamp(0.0, 10.0) as usize;
    format!(
        "{}{} {score:.1}",
        "\u{2588}".repeat(filled),
        style("\u{2591}".repeat(10 - filled)).dim()
    )
}
