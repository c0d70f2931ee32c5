//! Suggest command - Propose nearby open dates

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use cabinshare_core::domain::ResourceId;

use super::AppContext;
use crate::output::{get_formatter, plural};

/// Arguments for the suggest subcommand
#[derive(Debug, Args)]
pub struct SuggestCommand {
    /// Cabin identifier
    #[arg(long)]
    pub cabin: ResourceId,
    /// Preferred check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Preferred check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
    /// Maximum number of suggestions (defaults to engine.max_suggestions)
    #[arg(long)]
    pub max: Option<usize>,
}

impl SuggestCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);
        let engine = ctx.open_engine().await?;
        let max = self.max.unwrap_or(ctx.config.engine.max_suggestions);

        let suggestions = engine
            .suggest_alternative_dates(&self.cabin, self.from, self.to, max)
            .await
            .context("Failed to search for alternative dates")?;

        info!(cabin = %self.cabin, count = suggestions.len(), "Suggestion search complete");

        if ctx.is_json() {
            let json = serde_json::json!({
                "cabin": self.cabin.to_string(),
                "requested": { "from": self.from.to_string(), "to": self.to.to_string() },
                "search_window_days": engine.search_window_days(),
                "suggestions": suggestions,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if suggestions.is_empty() {
            formatter.warn(&format!(
                "No open dates within {} days of {}",
                engine.search_window_days(),
                self.from
            ));
            return Ok(());
        }

        formatter.success(&format!("{} found", plural(suggestions.len(), "alternative")));
        for (i, suggestion) in suggestions.iter().enumerate() {
            formatter.suggestion(i + 1, suggestion);
        }

        Ok(())
    }
}
