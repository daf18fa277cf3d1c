//! CLI definitions for ReachBridge.

use clap::{Parser, Subcommand};

/// ReachBridge CLI.
#[derive(Parser)]
#[command(name = "reachbridge")]
#[command(about = "Outreach command relay and browser DOM-automation bridge")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "~/.reachbridge/config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the command channel server in foreground
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the browser-side agent loop
    Agent,

    /// Submit one command and print its outcome as JSON on stdout
    Send {
        #[command(subcommand)]
        action: SendAction,
    },

    /// Show bridge connectivity and remaining quota
    Status,
}

#[derive(Subcommand)]
pub(crate) enum SendAction {
    /// Scrape people-search result pages
    Search {
        /// Free-text keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Job title filter
        #[arg(long)]
        title: Option<String>,

        /// Location filter
        #[arg(long)]
        location: Option<String>,

        /// Network degree filter (first, second, third)
        #[arg(long)]
        degree: Option<String>,

        /// Result pages to visit
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Stop once this many profiles are collected
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Extract an extended profile record
    Scan {
        /// Profile URL
        profile_url: String,
    },

    /// Send a connection request
    Connect {
        /// Profile URL
        profile_url: String,

        /// Invitation note (truncated to the platform limit)
        #[arg(long)]
        note: Option<String>,
    },

    /// Send a premium InMail
    Inmail {
        /// Profile URL
        profile_url: String,

        /// Subject line
        #[arg(long)]
        subject: Option<String>,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Message an accepted connection
    Message {
        /// Profile URL
        profile_url: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Check connection status of a profile
    Check {
        /// Profile URL
        profile_url: String,
    },

    /// Liveness probe against the live tab
    Ping,
}
