//! Config command - View and validate Cabinshare configuration
//!
//! Provides the `cabinshare config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors
//! 3. Prints the configuration file path

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use cabinshare_core::config::Config;

use super::AppContext;
use crate::output::get_formatter;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Validate => self.execute_validate(ctx),
            ConfigCommand::Path => self.execute_path(ctx),
        }
    }

    fn execute_show(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&ctx.config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&ctx.config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_validate(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);

        // Load explicitly so a broken file is reported instead of defaulted
        let config = match Config::load(&ctx.config_path) {
            Ok(config) => config,
            Err(e) => {
                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": ctx.config_path.display().to_string(),
                        "errors": [e.to_string()],
                    }));
                } else {
                    formatter.error(&e.to_string());
                }
                anyhow::bail!("configuration could not be loaded");
            }
        };

        let errors = config.validate();

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": ctx.config_path.display().to_string(),
                "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            }));
        } else if errors.is_empty() {
            formatter.success(&format!("{} is valid", ctx.config_path.display()));
        } else {
            for error in &errors {
                formatter.error(&error.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{} configuration error(s)", errors.len())
        }
    }

    fn execute_path(&self, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(ctx.format);
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
            }));
        } else {
            println!("{}", ctx.config_path.display());
        }
        Ok(())
    }
}
