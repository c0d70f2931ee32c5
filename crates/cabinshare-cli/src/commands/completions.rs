//! `cabinshare completions <shell>` prints a completion script to stdout

use std::io::Write;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use super::AppContext;

const BIN_NAME: &str = "cabinshare";

#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub async fn execute(&self, _ctx: &AppContext) -> Result<()> {
        let stdout = std::io::stdout();
        write_completions(self.shell, &mut stdout.lock());
        Ok(())
    }
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cli = crate::Cli::command();
    clap_complete::generate(shell, &mut cli, BIN_NAME, out);
}
