//! Init command implementation

use colored::Colorize;
use gws_core::ssh::KeyGenerator;
use gws_core::{FileChange, GwsPaths, HostSpec, InitOptions, Signing, init};

use crate::error::Result;

/// Arguments of `gitws init`, as parsed.
#[derive(Debug, Clone)]
pub struct InitArgs {
    pub workspace: String,
    pub email: String,
    pub host: Option<String>,
    pub host_name: Option<String>,
    pub root: Option<String>,
    pub signing: String,
    pub name: Option<String>,
    pub gpg_key: Option<String>,
    pub force: bool,
    pub rotate_key: bool,
}

/// Run the init command
pub fn run_init(paths: &GwsPaths, keygen: &dyn KeyGenerator, args: InitArgs) -> Result<()> {
    let options = InitOptions {
        host: HostSpec::from_args(args.host, args.host_name)?,
        signing: args.signing.parse::<Signing>()?,
        workspace: args.workspace,
        email: args.email,
        root: args.root,
        display_name: args.name.filter(|n| !n.trim().is_empty()),
        gpg_key: args.gpg_key,
        force: args.force,
        rotate_key: args.rotate_key,
    };
    let name = options.workspace.clone();
    let report = init(paths, keygen, options)?;
    let ws = &report.workspace;

    println!(
        "{} Workspace {} is ready",
        "✓".green(),
        name.cyan().bold()
    );
    println!();
    println!("{}:     {}", "Alias".dimmed(), ws.ssh_alias.cyan());
    println!("{}:      {}", "Host".dimmed(), ws.host_name);
    println!("{}:      {}", "Root".dimmed(), ws.root);
    println!("{}:  {}", "Identity".dimmed(), format!("{} <{}>", ws.name, ws.email));
    println!("{}:   {}", "Signing".dimmed(), ws.signing);
    println!(
        "{}:       {}{}",
        "Key".dimmed(),
        ws.ssh_key,
        if report.key_created { " (new)".green().to_string() } else { String::new() }
    );
    for retired in &report.retired_keys {
        println!("{}:   {}", "Retired".dimmed(), retired);
    }
    print_changes(&report.changes);

    println!();
    println!("{}", "Public key".bold());
    println!("{}", report.public_key);
    println!();
    println!("{}", "Next steps".bold());
    println!("  1. Add the public key to your {} account", ws.host_name);
    println!("  2. Test the connection: {}", format!("ssh -T git@{}", ws.ssh_alias).cyan());
    println!(
        "  3. Clone into the workspace: {}",
        format!("gitws clone {name} ORG/REPO").cyan()
    );
    Ok(())
}

/// One line per file that was rewritten, with its backup.
pub fn print_changes(changes: &[FileChange]) {
    for change in changes.iter().filter(|c| c.changed) {
        match &change.backup {
            Some(backup) => println!(
                "{}:   {} {}",
                "Updated".dimmed(),
                change.path,
                format!("(backup {backup})").dimmed()
            ),
            None => println!("{}:   {}", "Updated".dimmed(), change.path),
        }
    }
}
