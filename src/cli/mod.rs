//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the otx binary.

use clap::{Parser, Subcommand};

/// OTX API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "otx", about = "AlienVault OTX API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and paging to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// OTX API key. Falls back to ALIENVAULT_OTXAPI_KEY when unset.
    #[arg(long, global = true, env = "X_OTX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OTX service.
    #[arg(long, global = true, env = "OTX_API_URL")]
    pub base_url: Option<String>,

    /// Override the User-Agent header.
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity.
    Get {
        #[command(subcommand)]
        target: GetTarget,
    },

    /// List subscribed pulses.
    List {
        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of pulses per page (max 20).
        #[arg(long)]
        limit: Option<u32>,

        /// Follow next-page links until the feed is exhausted.
        #[arg(long, conflicts_with = "page")]
        all: bool,

        /// Only print the first pulse, then exit.
        #[arg(long)]
        one: bool,
    },

    /// Search pulses.
    Search {
        /// Search string.
        query: String,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of results per page (max 20).
        #[arg(long)]
        limit: Option<u32>,

        /// Fetch every page of results.
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },
}

/// Entities that can be fetched individually.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GetTarget {
    /// The user owning the API key.
    #[command(alias = "me")]
    User,

    /// A threat report.
    #[command(alias = "pulses")]
    Pulse {
        /// The pulse ID.
        id: String,
    },
}
