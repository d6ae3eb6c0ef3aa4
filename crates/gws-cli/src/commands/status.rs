//! Status command implementation

use std::path::Path;

use colored::Colorize;
use gws_core::{GwsPaths, Registry};
use gws_git::{SigningStatus, guard_hooks_installed};
use serde::Serialize;

use crate::context::{MatchedBy, RepoContext};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct SigningReport {
    pub enabled: bool,
    pub format: String,
    pub key: Option<String>,
}

impl From<SigningStatus> for SigningReport {
    fn from(status: SigningStatus) -> Self {
        Self {
            enabled: status.enabled,
            format: status.format,
            key: status.key,
        }
    }
}

/// Everything `status` shows, also its `--json` form.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub repository: String,
    pub path: String,
    pub origin: Option<String>,
    pub origin_host: Option<String>,
    pub workspace: Option<String>,
    pub matched_by: Option<MatchedBy>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub signing: SigningReport,
    pub guard_hooks: bool,
    pub issues: Vec<String>,
}

pub fn collect_status(paths: &GwsPaths, path: Option<&Path>) -> Result<StatusReport> {
    let ctx = RepoContext::open(path)?;
    let registry = Registry::load(paths)?;
    let matched = ctx.workspace(&registry);

    let user_name = ctx.repo.local_config("user.name")?;
    let user_email = ctx.repo.local_config("user.email")?;
    let guard_hooks = guard_hooks_installed(&ctx.repo)?;

    let mut issues = Vec::new();
    if user_name.is_none() {
        issues.push("No user.name configured".to_string());
    }
    match (&user_email, matched) {
        (None, _) => issues.push("No user.email configured".to_string()),
        (Some(email), Some(m)) if *email != m.workspace.email => issues.push(format!(
            "user.email is {email}, workspace '{}' uses {}",
            m.name, m.workspace.email
        )),
        _ => {}
    }
    match matched {
        None => issues.push("Repository does not belong to any workspace".to_string()),
        Some(m) if m.by != MatchedBy::Alias && ctx.origin.is_some() => issues.push(format!(
            "Origin does not use the '{}' alias {}",
            m.name, m.workspace.ssh_alias
        )),
        Some(_) => {}
    }
    if !guard_hooks {
        issues.push("Guard hooks not installed".to_string());
    }

    Ok(StatusReport {
        repository: ctx.repo.name().to_string(),
        path: ctx.repo.root().to_string(),
        origin_host: ctx.origin_host().map(str::to_string),
        origin: ctx.origin.clone(),
        workspace: matched.map(|m| m.name.to_string()),
        matched_by: matched.map(|m| m.by),
        user_name,
        user_email,
        signing: ctx.repo.signing_status()?.into(),
        guard_hooks,
        issues,
    })
}

/// Run the status command
pub fn run_status(paths: &GwsPaths, path: Option<&Path>, json: bool, exit_non_zero: bool) -> Result<()> {
    let report = collect_status(paths, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if exit_non_zero && !report.issues.is_empty() {
        return Err(CliError::user(format!("{} issue(s) found", report.issues.len())));
    }
    Ok(())
}

fn print_report(report: &StatusReport) {
    let not_set = || "Not set".dimmed().to_string();
    let signing = if report.signing.enabled {
        format!("Enabled ({})", report.signing.format).green().to_string()
    } else {
        "Disabled".dimmed().to_string()
    };

    println!("{}", "Repository Status".bold());
    println!();
    println!("{}:  {}", "Repository".dimmed(), report.repository.cyan());
    println!("{}:        {}", "Path".dimmed(), report.path);
    println!("{}:      {}", "Origin".dimmed(), report.origin.clone().unwrap_or_else(not_set));
    println!("{}:        {}", "Host".dimmed(), report.origin_host.clone().unwrap_or_else(not_set));
    println!(
        "{}:   {}",
        "Workspace".dimmed(),
        match (&report.workspace, report.matched_by) {
            (Some(ws), Some(by)) => format!("{} {}", ws.cyan(), format!("(by {by:?})").dimmed()),
            _ => "unknown".yellow().to_string(),
        }
    );
    println!("{}:   {}", "User Name".dimmed(), report.user_name.clone().unwrap_or_else(not_set));
    println!("{}:  {}", "User Email".dimmed(), report.user_email.clone().unwrap_or_else(not_set));
    println!("{}:     {}", "Signing".dimmed(), signing);
    println!("{}: {}", "Signing Key".dimmed(), report.signing.key.clone().unwrap_or_else(not_set));
    println!(
        "{}: {}",
        "Guard Hooks".dimmed(),
        if report.guard_hooks { "Installed".green() } else { "Not installed".yellow() }
    );
    println!();

    if report.issues.is_empty() {
        println!("{} All checks passed", "✓".green());
    } else {
        println!("{}", "Issues".yellow().bold());
        for issue in &report.issues {
            println!("  {} {}", "!".yellow(), issue);
        }
        println!();
        println!("Run {} for details or {} to repair.", "gitws doctor".cyan(), "gitws fix".cyan());
    }
}
