//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitws - isolated Git identities per workspace
#[derive(Parser, Debug)]
#[command(name = "gitws")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Home directory holding .ssh, .gitconfig and .gws
    #[arg(long, global = true, env = "GWS_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create or update a workspace
    ///
    /// Generates an SSH key, adds a Host alias to ~/.ssh/config and routes
    /// repositories under the workspace root to its identity.
    ///
    /// Examples:
    ///   gitws init work --email me@work.com --host github
    ///   gitws init oss --email me@oss.dev --host-name git.example.org --signing ssh
    Init {
        /// Workspace name
        workspace: String,

        /// Email used for commits in this workspace
        #[arg(long)]
        email: String,

        /// Known provider (github, gitlab, bitbucket)
        #[arg(long, conflicts_with = "host_name")]
        host: Option<String>,

        /// Custom Git host name
        #[arg(long)]
        host_name: Option<String>,

        /// Workspace root directory [default: ~/code/<workspace>]
        #[arg(long)]
        root: Option<String>,

        /// Commit signing: none, ssh or gpg
        #[arg(long, default_value = "none")]
        signing: String,

        /// Display name for commits
        #[arg(long, env = "USER")]
        name: Option<String>,

        /// GPG key id, required with --signing gpg
        #[arg(long)]
        gpg_key: Option<String>,

        /// Overwrite an existing workspace
        #[arg(long)]
        force: bool,

        /// Generate a new key even if one exists
        #[arg(long)]
        rotate_key: bool,
    },

    /// Clone a repository into a workspace
    ///
    /// Examples:
    ///   gitws clone work acme/api
    ///   gitws clone work https://github.com/acme/api.git --branch main
    Clone {
        /// Workspace name
        workspace: String,

        /// ORG/REPO, HTTPS URL or SSH URL
        url: String,

        /// Branch to check out
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Show the identity a repository will use
    Status {
        /// Repository path [default: current directory]
        path: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Exit with an error if issues are found
        #[arg(long)]
        exit_non_zero: bool,
    },

    /// Repair a repository's remote, identity and hooks
    ///
    /// Without --yes every needed fix is proposed and confirmed. With --yes
    /// only the fixes selected by flags are applied.
    Fix {
        /// Repository path [default: current directory]
        path: Option<PathBuf>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Install guard hooks
        #[arg(long)]
        enable_guards: bool,

        /// Rewrite origin to use the workspace SSH alias
        #[arg(long)]
        rewrite_remote: bool,

        /// Pin user.name, user.email and signing from the workspace
        #[arg(long)]
        set_identity: bool,
    },

    /// Replace a workspace's SSH key
    Rotate {
        /// Workspace name
        workspace: String,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Diagnose a repository's configuration
    Doctor {
        /// Repository path [default: current directory]
        path: Option<PathBuf>,

        /// Also test the SSH connection through the workspace alias
        #[arg(long)]
        check_ssh: bool,
    },

    /// Remove a workspace and its managed configuration
    Remove {
        /// Workspace name
        workspace: String,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Move the key pair aside as <key>.old-<timestamp>
        #[arg(long)]
        retire_keys: bool,
    },

    /// List workspaces
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
