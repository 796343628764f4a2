//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for dailyqr using clap's derive macros.

use clap::{Parser, Subcommand};

/// dailyqr - one QR code per day
#[derive(Parser)]
#[command(name = "dailyqr")]
#[command(version)]
#[command(about = "Serves a fresh QR code every day", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Queue a new entry after the last scheduled one
    Add {
        /// Redirect target (http or https URL)
        url: String,

        /// Comment shown on the landing page
        #[arg(long, default_value = "")]
        comment: String,

        /// Private note, shown to admins only
        #[arg(long, default_value = "")]
        private: String,
    },

    /// List live entries and the queue
    List,

    /// Print the admin key for a password
    HashPassword {
        /// Password (read from stdin when omitted)
        password: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}
