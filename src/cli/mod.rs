//! CLI module for the Friday Agent Dashboard
//!
//! Provides command-line interface parsing and handling for the
//! `friday-dashboard` binary. Uses clap for argument parsing and owo-colors for
//! colored terminal output.

pub mod agents;
pub mod output;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Friday Agent Dashboard
///
/// Manage the registry of Friday agents: serve the JSON API, or list, edit,
/// toggle and test agents straight from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "friday-dashboard",
    author = "Friday Team",
    version,
    about = "Friday Agent Dashboard - manage and test Friday agents",
    long_about = "Administration service for Friday agents backed by a libSQL store.\n\n\
                  Run without arguments to start the API server. The store is selected with\n\
                  AGENT_STORE_URL (and AGENT_STORE_KEY for remote databases).",
    after_help = "EXAMPLES:\n    \
                  friday-dashboard                          # Start the API server\n    \
                  friday-dashboard serve --port 8080        # Start on another port\n    \
                  friday-dashboard seed                     # Insert the sample agents\n    \
                  friday-dashboard agents list --search code\n    \
                  friday-dashboard agents test <ID> \"summarize my inbox\""
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve {
        /// Host address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage agents
    #[command(subcommand)]
    Agents(AgentCommands),

    /// Insert the sample agents that are not already in the store
    Seed,

    /// Check store configuration and connectivity
    Debug {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Agent management subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents with statistics
    List {
        /// Case-insensitive filter on name, description and slug
        #[arg(short, long)]
        search: Option<String>,

        /// Only show public, enabled agents
        #[arg(long)]
        public: bool,
    },

    /// Show details for a specific agent
    Show {
        /// Agent ID
        id: String,
    },

    /// Create an agent
    Create(CreateArgs),

    /// Update selected fields of an agent
    Edit(EditArgs),

    /// Flip an agent between enabled and disabled
    Toggle {
        /// Agent ID
        id: String,
    },

    /// Permanently delete an agent
    Delete {
        /// Agent ID
        id: String,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Send a test command to the agent's endpoint
    Test {
        /// Agent ID
        id: String,

        /// Command text to send
        command: String,
    },
}

/// Fields for `agents create`
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Invocation endpoint
    #[arg(long)]
    pub url: String,

    /// Description shown on the dashboard
    #[arg(long)]
    pub description: String,

    /// URL-safe identifier (derived from the name when omitted)
    #[arg(long)]
    pub slug: Option<String>,

    /// Icon key (bot, code, calendar, mail, ...)
    #[arg(long)]
    pub icon: Option<String>,

    /// Use case (repeatable)
    #[arg(long = "use-case")]
    pub use_cases: Vec<String>,

    /// Trigger keyword (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Create the agent disabled
    #[arg(long)]
    pub disabled: bool,

    /// Create the agent private
    #[arg(long)]
    pub private: bool,

    /// Version label
    #[arg(long)]
    pub version: Option<String>,

    /// Author
    #[arg(long)]
    pub author: Option<String>,
}

/// Fields for `agents edit`. Omitted flags leave the field unchanged.
#[derive(Args, Debug)]
#[command(
    group(ArgGroup::new("state").args(["enable", "disable"])),
    group(ArgGroup::new("visibility").args(["public", "private"]))
)]
pub struct EditArgs {
    /// Agent ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    /// Replace the use cases (repeatable)
    #[arg(long = "use-case")]
    pub use_cases: Option<Vec<String>>,

    /// Replace the trigger keywords (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Option<Vec<String>>,

    #[arg(long)]
    pub enable: bool,

    #[arg(long)]
    pub disable: bool,

    #[arg(long)]
    pub public: bool,

    #[arg(long)]
    pub private: bool,

    #[arg(long)]
    pub version: Option<String>,

    #[arg(long)]
    pub author: Option<String>,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
