use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blogrig", version, about = "Local blog preview rig")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Use a specific config file
    #[arg(short = 'f', long = "file", global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a starter workspace
    Init {
        /// Directory to scaffold into (defaults to the current directory)
        dir: Option<PathBuf>,
    },
    /// Start the preview server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create and publish posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Check whether a port is free
    Check {
        /// Port to probe (defaults to the configured preview port)
        port: Option<u16>,
    },
    /// Validate the workspace configuration
    Validate,
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostCommands {
    /// Create a new post from a scaffold
    New {
        title: String,
        /// Scaffold to use (defaults to the configured default layout)
        #[arg(long)]
        layout: Option<String>,
    },
    /// Move a draft into _posts
    Publish {
        slug: String,
        /// Layout to stamp into the published post
        #[arg(long)]
        layout: Option<String>,
    },
}
