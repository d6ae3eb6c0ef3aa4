//! gitws CLI
//!
//! Manages isolated Git identities: one SSH key, SSH alias and git identity
//! per workspace.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use gws_core::{GwsPaths, SshKeygen};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{FixFlags, InitArgs};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} isolated Git identities", "gitws".green().bold());
        println!();
        println!("Run {} for available commands.", "gitws --help".cyan());
        return Ok(());
    };

    let paths = GwsPaths::resolve(cli.home)?;
    tracing::debug!(home = %paths.home(), "resolved home");

    match command {
        Commands::Init {
            workspace,
            email,
            host,
            host_name,
            root,
            signing,
            name,
            gpg_key,
            force,
            rotate_key,
        } => commands::run_init(
            &paths,
            &SshKeygen,
            InitArgs {
                workspace,
                email,
                host,
                host_name,
                root,
                signing,
                name,
                gpg_key,
                force,
                rotate_key,
            },
        ),
        Commands::Clone {
            workspace,
            url,
            branch,
        } => commands::run_clone(&paths, &workspace, &url, branch.as_deref()),
        Commands::Status {
            path,
            json,
            exit_non_zero,
        } => commands::run_status(&paths, path.as_deref(), json, exit_non_zero),
        Commands::Fix {
            path,
            yes,
            enable_guards,
            rewrite_remote,
            set_identity,
        } => commands::run_fix(
            &paths,
            path.as_deref(),
            FixFlags {
                yes,
                enable_guards,
                rewrite_remote,
                set_identity,
            },
        ),
        Commands::Rotate { workspace, yes } => {
            commands::run_rotate(&paths, &SshKeygen, &workspace, yes)
        }
        Commands::Doctor { path, check_ssh } => {
            commands::run_doctor(&paths, path.as_deref(), check_ssh, cli.verbose)
        }
        Commands::Remove {
            workspace,
            yes,
            retire_keys,
        } => commands::run_remove(&paths, &workspace, yes, retire_keys),
        Commands::List { json } => commands::run_list(&paths, json),
    }
}
