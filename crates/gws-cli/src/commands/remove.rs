//! Remove command implementation

use chrono::Local;
use colored::Colorize;
use gws_core::{GwsPaths, Registry, remove};

use super::init::print_changes;
use crate::error::Result;
use crate::interactive::confirm;

/// Run the remove command
pub fn run_remove(paths: &GwsPaths, workspace: &str, yes: bool, retire_keys: bool) -> Result<()> {
    Registry::load(paths)?.require(workspace)?;

    let prompt = format!("Remove workspace '{workspace}' and its managed configuration?");
    if !confirm(&prompt, yes)? {
        println!("Removal cancelled.");
        return Ok(());
    }

    let report = remove(paths, workspace, retire_keys, Local::now())?;

    println!("{} Removed workspace {}", "✓".green(), workspace.cyan().bold());
    print_changes(&report.changes);
    for retired in &report.retired_keys {
        println!("{}:   {}", "Retired".dimmed(), retired);
    }
    if !retire_keys {
        println!(
            "{}",
            format!("The key {} was left in place.", report.workspace.ssh_key).dimmed()
        );
    }
    println!(
        "{}",
        format!(
            "Repositories under {} keep their local identity settings.",
            report.workspace.root
        )
        .dimmed()
    );
    Ok(())
}
