//! CLI subcommands
//!
//! Every command receives the shared [`AppContext`]: output format plus the
//! loaded configuration (with `--database` already applied).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use cabinshare_cache::{DatabasePool, SqliteReservationRepository};
use cabinshare_conflict::ConflictEngine;
use cabinshare_core::config::Config;

use crate::output::OutputFormat;

pub mod available;
pub mod check;
pub mod completions;
pub mod config;
pub mod import;
pub mod suggest;

/// State shared by all subcommands
#[derive(Debug)]
pub struct AppContext {
    pub format: OutputFormat,
    pub config: Config,
    pub config_path: PathBuf,
}

impl AppContext {
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Refuses to run engine or cache commands on a config that fails validation
    pub fn ensure_valid_config(&self) -> Result<()> {
        let problems = self.config.validate();
        if problems.is_empty() {
            return Ok(());
        }
        let listed: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!(
            "invalid configuration {}: {}",
            self.config_path.display(),
            listed.join("; ")
        )
    }

    /// Opens (creating if needed) the local reservation cache
    pub async fn open_repository(&self) -> Result<Arc<SqliteReservationRepository>> {
        self.ensure_valid_config()?;
        let pool = DatabasePool::new(&self.config.store.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to open reservation cache at {}",
                    self.config.store.database.display()
                )
            })?;
        Ok(Arc::new(SqliteReservationRepository::new(
            pool.pool().clone(),
        )))
    }

    /// Builds a conflict engine over the local cache using the engine settings
    pub async fn open_engine(&self) -> Result<ConflictEngine> {
        let repo = self.open_repository().await?;
        Ok(ConflictEngine::from_config(repo, &self.config.engine))
    }
}

#[cfg(test)]
mod tests {
    use cabinshare_core::config::ConfigBuilder;

    use super::*;

    fn context(config: Config, dir: &tempfile::TempDir) -> AppContext {
        AppContext {
            format: OutputFormat::Human,
            config,
            config_path: dir.path().join("config.yaml"),
        }
    }

    #[tokio::test]
    async fn test_invalid_window_refused_before_opening_cache() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("reservations.db");
        let config = ConfigBuilder::new()
            .engine_search_window_days(0)
            .store_database(&database)
            .build();
        let ctx = context(config, &dir);

        let err = ctx.open_engine().await.unwrap_err();
        assert!(err.to_string().contains("engine.search_window_days"));
        assert!(!database.exists());
    }

    #[tokio::test]
    async fn test_valid_config_opens_engine() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .engine_search_window_days(14)
            .store_database(dir.path().join("reservations.db"))
            .build();
        let ctx = context(config, &dir);

        let engine = ctx.open_engine().await.unwrap();
        assert_eq!(engine.search_window_days(), 14);
    }
}
