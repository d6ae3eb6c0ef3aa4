//! Doctor command implementation

use std::path::Path;

use colored::Colorize;
use gws_blocks::{Namespace, extract, marker_pair};
use gws_core::ssh::{check_connection, render_host_block};
use gws_core::{GwsPaths, Registry, Workspace};
use gws_fs::io::read_text_or_empty;
use gws_git::{HookState, git_version, hook_state, hooks::GUARD_HOOKS};

use crate::context::{MatchedBy, RepoContext};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub fix: Option<String>,
}

impl Finding {
    fn new(severity: Severity, message: impl Into<String>, fix: Option<&str>) -> Self {
        Self {
            severity,
            message: message.into(),
            fix: fix.map(str::to_string),
        }
    }
}

/// Every check `doctor` runs, in report order.
pub fn diagnose(paths: &GwsPaths, ctx: &RepoContext, check_ssh: bool) -> Result<Vec<Finding>> {
    let registry = Registry::load(paths)?;
    let matched = ctx.workspace(&registry);
    let mut findings = Vec::new();

    match git_version() {
        Ok(version) => findings.push(Finding::new(Severity::Info, version, None)),
        Err(_) => findings.push(Finding::new(
            Severity::Error,
            "git is not installed or not on PATH",
            Some("Install git"),
        )),
    }

    match ctx.origin.as_deref() {
        None => findings.push(Finding::new(
            Severity::Error,
            "No origin remote configured",
            Some("git remote add origin <url>"),
        )),
        Some(origin) if !ctx.uses_ssh() => findings.push(Finding::new(
            Severity::Warning,
            format!("Origin {origin} does not use SSH"),
            Some("gitws fix --rewrite-remote"),
        )),
        Some(_) => {}
    }

    let Some(m) = matched else {
        findings.push(Finding::new(
            Severity::Warning,
            match ctx.origin_host() {
                Some(host) => format!("No workspace uses host or alias '{host}', and the repository is outside every workspace root"),
                None => "Repository is outside every workspace root".to_string(),
            },
            Some("gitws init <workspace> --root <dir>"),
        ));
        check_identity(ctx, None, &mut findings)?;
        check_signing(ctx, &mut findings)?;
        check_hooks(ctx, &mut findings)?;
        return Ok(findings);
    };

    if m.by != MatchedBy::Alias && ctx.uses_ssh() {
        findings.push(Finding::new(
            Severity::Warning,
            format!("Origin does not use the '{}' alias {}", m.name, m.workspace.ssh_alias),
            Some("gitws fix --rewrite-remote"),
        ));
    }
    if m.by == MatchedBy::Alias && !ctx.repo.root().starts_with_dir(&m.workspace.root) {
        findings.push(Finding::new(
            Severity::Warning,
            format!("Repository is outside the workspace root {}", m.workspace.root),
            Some("Move the repository or re-run gitws init with --root"),
        ));
    }

    check_identity(ctx, Some(m.workspace), &mut findings)?;
    check_signing(ctx, &mut findings)?;
    check_hooks(ctx, &mut findings)?;
    check_workspace_files(paths, m.name, m.workspace, &mut findings)?;

    if check_ssh {
        if check_connection(&m.workspace.ssh_alias)? {
            findings.push(Finding::new(
                Severity::Info,
                format!("SSH connection through {} works", m.workspace.ssh_alias),
                None,
            ));
        } else {
            findings.push(Finding::new(
                Severity::Error,
                format!("SSH connection through {} failed", m.workspace.ssh_alias),
                Some("Check that the public key is registered with your Git host"),
            ));
        }
    }

    Ok(findings)
}

fn check_identity(ctx: &RepoContext, ws: Option<&Workspace>, findings: &mut Vec<Finding>) -> Result<()> {
    match ctx.repo.local_config("user.name")? {
        None => findings.push(Finding::new(
            Severity::Error,
            "No user.name configured",
            Some("gitws fix --set-identity"),
        )),
        Some(name) => {
            if let Some(ws) = ws.filter(|ws| ws.name != name) {
                findings.push(Finding::new(
                    Severity::Warning,
                    format!("user.name is '{name}', workspace uses '{}'", ws.name),
                    Some("gitws fix --set-identity"),
                ));
            }
        }
    }
    match ctx.repo.local_config("user.email")? {
        None => findings.push(Finding::new(
            Severity::Error,
            "No user.email configured",
            Some("gitws fix --set-identity"),
        )),
        Some(email) => {
            if let Some(ws) = ws.filter(|ws| ws.email != email) {
                findings.push(Finding::new(
                    Severity::Error,
                    format!("user.email is {email}, workspace uses {}", ws.email),
                    Some("gitws fix --set-identity"),
                ));
            }
        }
    }
    Ok(())
}

fn check_signing(ctx: &RepoContext, findings: &mut Vec<Finding>) -> Result<()> {
    let signing = ctx.repo.signing_status()?;
    if !signing.enabled {
        return Ok(());
    }
    match signing.key.as_deref() {
        None => findings.push(Finding::new(
            Severity::Error,
            "Signing is enabled but no signing key is configured",
            Some("gitws fix --set-identity"),
        )),
        Some(key) if signing.format == "ssh" && !key.ends_with(".pub") && !key.starts_with("ssh-") => {
            findings.push(Finding::new(
                Severity::Warning,
                format!("SSH signing key {key} is not a public key"),
                Some("Point user.signingkey at the .pub file"),
            ))
        }
        Some(_) => {}
    }
    Ok(())
}

fn check_hooks(ctx: &RepoContext, findings: &mut Vec<Finding>) -> Result<()> {
    for hook in GUARD_HOOKS {
        match hook_state(&ctx.repo, hook)? {
            HookState::Guard => {}
            HookState::Missing => findings.push(Finding::new(
                Severity::Warning,
                format!("Guard hook {hook} is not installed"),
                Some("gitws fix --enable-guards"),
            )),
            HookState::Foreign => findings.push(Finding::new(
                Severity::Warning,
                format!("{hook} hook exists but is not a gitws guard"),
                Some("gitws fix --enable-guards (the existing hook is backed up)"),
            )),
        }
    }
    Ok(())
}

/// The SSH Host block and key the workspace relies on.
fn check_workspace_files(
    paths: &GwsPaths,
    name: &str,
    ws: &Workspace,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    let reinit = format!("gitws init {name} --force ...");
    if !ws.ssh_key.is_file() {
        findings.push(Finding::new(
            Severity::Error,
            format!("SSH key {} is missing", ws.ssh_key),
            Some(format!("gitws rotate {name}").as_str()),
        ));
    }

    let ssh_config = read_text_or_empty(&paths.ssh_config())?;
    let markers = marker_pair(Namespace::SshHost(name));
    let expected = render_host_block(name, &ws.ssh_alias, &ws.host_name, &ws.ssh_key);
    let expected_body = extract(&expected, &markers);
    match extract(&ssh_config, &markers) {
        None => findings.push(Finding::new(
            Severity::Error,
            format!("No Host block for '{name}' in {}", paths.ssh_config()),
            Some(reinit.as_str()),
        )),
        Some(body) if Some(body) != expected_body => findings.push(Finding::new(
            Severity::Warning,
            format!("Host block for '{name}' in {} was edited", paths.ssh_config()),
            Some(reinit.as_str()),
        )),
        Some(_) => {}
    }
    Ok(())
}

/// Run the doctor command
pub fn run_doctor(paths: &GwsPaths, path: Option<&Path>, check_ssh: bool, verbose: bool) -> Result<()> {
    let ctx = RepoContext::open(path)?;
    let findings = diagnose(paths, &ctx, check_ssh)?;

    println!("{} {}", "Doctor".bold(), ctx.repo.root());
    println!();
    let mut problems = 0;
    for finding in &findings {
        let label = match finding.severity {
            Severity::Info if !verbose => continue,
            Severity::Info => "info".blue(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".red(),
        };
        if finding.severity > Severity::Info {
            problems += 1;
        }
        println!("  {}: {}", label.bold(), finding.message);
        if let Some(fix) = &finding.fix {
            println!("    {} {}", "fix:".dimmed(), fix.cyan());
        }
    }

    if problems == 0 {
        println!("  {} No problems found", "✓".green());
        return Ok(());
    }
    println!();
    Err(CliError::user(format!("{problems} problem(s) found")))
}
