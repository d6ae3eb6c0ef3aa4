//! List command implementation

use colored::Colorize;
use gws_core::{GwsPaths, Registry, Workspace};
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct ListEntry<'a> {
    /// Registry key; `name` is taken by the flattened git identity.
    #[serde(rename = "workspace")]
    key: &'a str,
    #[serde(flatten)]
    workspace: &'a Workspace,
}

/// Run the list command
pub fn run_list(paths: &GwsPaths, json: bool) -> Result<()> {
    let registry = Registry::load(paths)?;

    if json {
        let entries: Vec<ListEntry<'_>> = registry
            .iter()
            .map(|(key, workspace)| ListEntry { key, workspace })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{} (use {} to add one)", "No workspaces".dimmed(), "gitws init".cyan());
        return Ok(());
    }

    println!("{}", "Workspaces".bold());
    for (name, ws) in registry.iter() {
        println!();
        println!("  {} {}", "+".green(), name.cyan().bold());
        println!("    {}: {} <{}>", "Identity".dimmed(), ws.name, ws.email);
        println!("    {}:    {} -> {}", "Alias".dimmed(), ws.ssh_alias, ws.host_name);
        println!("    {}:     {}", "Root".dimmed(), ws.root);
        println!("    {}:  {}", "Signing".dimmed(), ws.signing);
    }
    Ok(())
}
