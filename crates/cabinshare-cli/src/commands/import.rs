//! Import command - Load a reservation snapshot into the local cache
//!
//! The file is a YAML list of reservations as exported from the booking
//! backend. Entries without an `id` receive a fresh one; entries whose dates
//! are not strictly ordered abort the import before anything is written.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use cabinshare_core::domain::{Reservation, ReservationId};

use super::AppContext;
use crate::output::{get_formatter, plural};

/// Arguments for the import subcommand
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// YAML file containing a list of reservations
    pub file: PathBuf,
}

impl ImportCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);
        let reservations = load_reservations(&self.file)?;

        let repo = ctx.open_repository().await?;
        repo.save_reservations(&reservations)
            .await
            .context("Failed to save reservations; nothing was imported")?;

        let approved = reservations.iter().filter(|r| r.is_approved()).count();
        info!(
            file = %self.file.display(),
            total = reservations.len(),
            approved,
            "Imported reservations"
        );

        if ctx.is_json() {
            let json = serde_json::json!({
                "success": true,
                "imported": reservations.len(),
                "approved": approved,
                "database": ctx.config.store.database.display().to_string(),
            });
            formatter.print_json(&json);
        } else {
            formatter.success(&format!(
                "Imported {} ({} approved)",
                plural(reservations.len(), "reservation"),
                approved
            ));
            formatter.info(&format!("Cache: {}", ctx.config.store.database.display()));
        }

        Ok(())
    }
}

/// Parses and validates a reservation snapshot file
fn load_reservations(path: &Path) -> Result<Vec<Reservation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_reservations(&content).with_context(|| format!("Invalid snapshot {}", path.display()))
}

fn parse_reservations(content: &str) -> Result<Vec<Reservation>> {
    let parsed: Vec<Reservation> =
        serde_yaml::from_str(content).context("Failed to parse reservation YAML")?;

    let mut reservations = Vec::with_capacity(parsed.len());
    for (index, reservation) in parsed.into_iter().enumerate() {
        if let Err(e) = reservation.range() {
            bail!("entry {}: {}", index + 1, e);
        }
        let reservation = match reservation.id() {
            Some(_) => reservation,
            None => reservation.with_id(ReservationId::new()),
        };
        reservations.push(reservation);
    }
    Ok(reservations)
}
