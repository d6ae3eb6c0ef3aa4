//! Rotate command implementation

use chrono::Local;
use colored::Colorize;
use gws_core::ssh::KeyGenerator;
use gws_core::{GwsPaths, Registry, rotate};

use crate::error::Result;
use crate::interactive::confirm;

/// Run the rotate command
pub fn run_rotate(paths: &GwsPaths, keygen: &dyn KeyGenerator, workspace: &str, yes: bool) -> Result<()> {
    let registry = Registry::load(paths)?;
    let ws = registry.require(workspace)?;

    let prompt = format!(
        "Replace the SSH key for '{workspace}'? The old key is kept as {}.old-<timestamp>",
        ws.ssh_key
    );
    if !confirm(&prompt, yes)? {
        println!("Key rotation cancelled.");
        return Ok(());
    }

    let report = rotate(paths, keygen, workspace, Local::now())?;

    println!("{} Rotated the SSH key for {}", "✓".green(), workspace.cyan().bold());
    println!();
    for retired in &report.retired_keys {
        println!("{}: {}", "Retired".dimmed(), retired);
    }
    println!("{}:     {}", "Key".dimmed(), report.workspace.ssh_key);
    println!("{}:   {}", "Alias".dimmed(), report.workspace.ssh_alias.cyan());
    println!();
    println!("{}", "Public key".bold());
    println!("{}", report.public_key);
    println!();
    println!("{}", "Next steps".bold());
    println!("  1. Add the new public key to your {} account", report.workspace.host_name);
    println!("  2. Remove the old key from that account");
    println!(
        "  3. Test the connection: {}",
        format!("ssh -T git@{}", report.workspace.ssh_alias).cyan()
    );
    Ok(())
}
