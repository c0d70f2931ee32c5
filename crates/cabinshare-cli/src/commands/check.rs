//! Check command - Detect conflicts for a proposed stay
//!
//! Provides the `cabinshare check` CLI command which:
//! 1. Loads the cabin's approved reservations from the local cache
//! 2. Classifies each collision as overlap (error), adjacent or same-day (warning)
//! 3. Exits non-zero when the engine cannot read the reservations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use cabinshare_core::domain::{BookingConflict, ReservationId, ResourceId};

use super::AppContext;
use crate::output::get_formatter;

/// Arguments for the check subcommand
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Cabin identifier
    #[arg(long)]
    pub cabin: ResourceId,
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
    /// Reservation being edited, ignored in the comparison
    #[arg(long)]
    pub exclude: Option<ReservationId>,
}

impl CheckCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);
        let engine = ctx.open_engine().await?;

        let conflicts = engine
            .check_conflicts(&self.cabin, self.from, self.to, self.exclude.as_ref())
            .await
            .context("Failed to check booking conflicts")?;

        info!(cabin = %self.cabin, count = conflicts.len(), "Conflict check complete");

        if ctx.is_json() {
            let json = serde_json::json!({
                "cabin": self.cabin.to_string(),
                "from": self.from.to_string(),
                "to": self.to.to_string(),
                "clear": conflicts.is_empty(),
                "blocking": conflicts.iter().any(BookingConflict::is_blocking),
                "conflicts": conflicts,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if conflicts.is_empty() {
            formatter.success(&format!("{} to {} is clear", self.from, self.to));
            return Ok(());
        }

        for conflict in &conflicts {
            formatter.conflict(conflict);
        }

        if conflicts.iter().any(BookingConflict::is_blocking) {
            formatter.info("");
            formatter.info("Use 'cabinshare suggest' with the same dates to find open ranges.");
        }

        Ok(())
    }
}
