//! Available command - Free days of a month

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;

use cabinshare_core::domain::ResourceId;

use super::AppContext;
use crate::output::{get_formatter, plural};

/// Arguments for the available subcommand
#[derive(Debug, Args)]
pub struct AvailableCommand {
    /// Cabin identifier
    #[arg(long)]
    pub cabin: ResourceId,
    /// Calendar year
    #[arg(long)]
    pub year: i32,
    /// Calendar month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
}

impl AvailableCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);
        let engine = ctx.open_engine().await?;

        let free = engine
            .get_available_dates(&self.cabin, self.month, self.year)
            .await
            .context("Failed to compute available dates")?;

        if ctx.is_json() {
            let json = serde_json::json!({
                "cabin": self.cabin.to_string(),
                "year": self.year,
                "month": self.month,
                "available": free.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if free.is_empty() {
            formatter.warn(&format!("{}-{:02} is fully booked", self.year, self.month));
            return Ok(());
        }

        formatter.success(&format!(
            "{} in {}-{:02}",
            plural(free.len(), "free day"),
            self.year,
            self.month
        ));
        for run in contiguous_runs(&free) {
            formatter.info(&run);
        }

        Ok(())
    }
}

/// Collapses consecutive days into `DD` or `DD-DD` labels
fn contiguous_runs(days: &[NaiveDate]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut iter = days.iter().copied();
    let Some(mut start) = iter.next() else {
        return runs;
    };
    let mut prev = start;

    for day in iter {
        if prev.succ_opt() != Some(day) {
            runs.push(label(start, prev));
            start = day;
        }
        prev = day;
    }
    runs.push(label(start, prev));
    runs
}

fn label(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format!("{:02}", start.day())
    } else {
        format!("{:02}-{:02}", start.day(), end.day())
    }
}
