//! Clone command implementation

use colored::Colorize;
use gws_core::{GwsPaths, Registry, rewrite_url};
use gws_git::GitRepo;

use crate::error::Result;

/// Run the clone command
///
/// The repository lands in `<root>/<org>/<repo>` with the workspace identity
/// pinned in its local config.
pub fn run_clone(paths: &GwsPaths, workspace: &str, url: &str, branch: Option<&str>) -> Result<()> {
    let registry = Registry::load(paths)?;
    let ws = registry.require(workspace)?;

    let (repo_ref, ssh_url) = rewrite_url(url, &ws.ssh_alias)?;
    let dest = ws.root.join(&repo_ref.org).join(&repo_ref.repo);

    println!("Cloning {} into {}", ssh_url.cyan(), dest);
    gws_git::clone(&ssh_url, &dest.to_native(), branch)?;

    let repo = GitRepo::discover(&dest.to_native())?;
    repo.apply_settings(&ws.local_settings())?;

    println!();
    println!("{} Cloned {}", "✓".green(), repo_ref.to_string().bold());
    println!("{}: {}", "Workspace".dimmed(), workspace.cyan());
    println!("{}:    {}", "Origin".dimmed(), ssh_url);
    println!("{}:    {}", "Branch".dimmed(), branch.unwrap_or("default"));
    println!("{}:  {} <{}>", "Identity".dimmed(), ws.name, ws.email);
    println!();
    println!("Next: {}", format!("cd {dest} && gitws status").cyan());
    Ok(())
}
