//! Audit history command

use clap::Args;

use crate::config::Settings;
use crate::error::RegistryResult;
use crate::storage::Storage;

/// Arguments for `club history`
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Show the most recent audit entries, oldest first
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    args: HistoryArgs,
) -> RegistryResult<()> {
    let Some(audit) = storage.audit() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = audit.read_recent(args.limit)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable(&settings.date_format));
    }

    Ok(())
}
