//! Fix command implementation

use std::path::Path;

use colored::Colorize;
use gws_core::{GwsPaths, Registry, Workspace, rewrite_url, ssh_host};
use gws_git::install_guard_hooks;

use crate::context::RepoContext;
use crate::error::{CliError, Result};
use crate::interactive::confirm;

/// Which fixes `--yes` is allowed to apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixFlags {
    pub yes: bool,
    pub enable_guards: bool,
    pub rewrite_remote: bool,
    pub set_identity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedFix {
    RewriteRemote { url: String },
    SetIdentity { settings: Vec<(&'static str, Option<String>)> },
    EnableGuards,
}

impl PlannedFix {
    fn describe(&self, workspace: &str) -> String {
        match self {
            Self::RewriteRemote { url } => format!("Rewrite origin to {url}"),
            Self::SetIdentity { .. } => format!("Pin the '{workspace}' identity in .git/config"),
            Self::EnableGuards => "Install guard hooks".to_string(),
        }
    }
}

/// Fixes needed for `ctx`, limited to the selected ones.
pub fn plan_fixes(ctx: &RepoContext, ws: &Workspace, flags: FixFlags) -> Result<Vec<PlannedFix>> {
    let wanted = |flag: bool| flag || !flags.yes;
    let mut plan = Vec::new();

    let origin = ctx
        .origin
        .as_deref()
        .filter(|origin| ssh_host(origin) != Some(ws.ssh_alias.as_str()));
    if let (true, Some(origin)) = (wanted(flags.rewrite_remote), origin) {
        match rewrite_url(origin, &ws.ssh_alias) {
            Ok((_, url)) => plan.push(PlannedFix::RewriteRemote { url }),
            Err(e) if flags.rewrite_remote => return Err(e.into()),
            Err(e) => println!("{} skipping origin rewrite: {e}", "!".yellow()),
        }
    }

    if wanted(flags.set_identity) {
        let settings = ws.local_settings();
        let mut differs = false;
        for (key, value) in &settings {
            if ctx.repo.local_config(key)? != *value {
                differs = true;
                break;
            }
        }
        if differs {
            plan.push(PlannedFix::SetIdentity { settings });
        }
    }

    if wanted(flags.enable_guards) && !gws_git::guard_hooks_installed(&ctx.repo)? {
        plan.push(PlannedFix::EnableGuards);
    }

    Ok(plan)
}

/// Run the fix command
pub fn run_fix(paths: &GwsPaths, path: Option<&Path>, flags: FixFlags) -> Result<()> {
    let ctx = RepoContext::open(path)?;
    let registry = Registry::load(paths)?;
    let matched = ctx.workspace(&registry).ok_or_else(|| {
        CliError::user(format!(
            "{} does not belong to any workspace; clone it with 'gitws clone' or move it under a workspace root",
            ctx.repo.root()
        ))
    })?;
    let ws = matched.workspace;

    let plan = plan_fixes(&ctx, ws, flags)?;
    if plan.is_empty() {
        println!("{} No fixes needed", "✓".green());
        return Ok(());
    }

    println!("Workspace {}: the following changes will be made", matched.name.cyan());
    for (i, fix) in plan.iter().enumerate() {
        println!("  {}. {}", i + 1, fix.describe(matched.name));
    }
    println!();
    if !confirm("Apply these fixes?", flags.yes)? {
        println!("Fix cancelled.");
        return Ok(());
    }

    for fix in &plan {
        match fix {
            PlannedFix::RewriteRemote { url } => {
                ctx.repo.set_origin_url(url)?;
                println!("{} Origin is now {}", "✓".green(), url.cyan());
            }
            PlannedFix::SetIdentity { settings } => {
                ctx.repo.apply_settings(settings)?;
                println!("{} Identity set to {} <{}>", "✓".green(), ws.name, ws.email);
            }
            PlannedFix::EnableGuards => {
                install_guard_hooks(&ctx.repo, &ws.ssh_alias, &ws.email)?;
                println!("{} Guard hooks installed", "✓".green());
            }
        }
    }
    println!();
    println!("Run {} to verify.", "gitws status".cyan());
    Ok(())
}
