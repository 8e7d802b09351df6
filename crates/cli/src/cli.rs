use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Drive Instana alerting resources from declarative documents.
///
/// Connection settings come from `INSTANA_ENDPOINT`, `INSTANA_API_TOKEN`
/// and `INSTANA_TLS_SKIP_VERIFY` (a `.env` file is honored). Resulting state
/// is printed as JSON; nothing is written to disk.
#[derive(Parser, Debug)]
#[command(name = "instana-provider", about = "Manage Instana alerting and automation resources declaratively")]
pub struct CliArgs {
    /// Tenant endpoint, overrides INSTANA_ENDPOINT
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API token, overrides INSTANA_API_TOKEN
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the attribute schema of one or all resource types
    Schema {
        #[arg(value_enum)]
        resource: Option<ResourceKind>,
    },

    /// Map a document to the REST payload the API would receive
    Render {
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Declarative document (YAML or JSON)
        #[arg(long)]
        file: PathBuf,
    },

    /// Create the resource, or update it when a prior state is given
    Apply {
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Declarative document (YAML or JSON)
        #[arg(long)]
        file: PathBuf,

        /// State printed by a previous apply or read
        #[arg(long)]
        state: Option<PathBuf>,

        /// Create against an in-memory API instead of the tenant
        #[arg(long)]
        dry_run: bool,
    },

    /// Refresh a prior state from the API
    Read(StateArgs),

    /// Delete the object recorded in a prior state
    Destroy(StateArgs),

    /// Find an existing object by name and print it as state
    Lookup {
        #[command(subcommand)]
        target: LookupTarget,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum LookupTarget {
    /// Alerting channel with exactly this name
    AlertingChannel {
        #[arg(long)]
        name: String,
    },

    /// Automation action with this name and type (type ignores case)
    AutomationAction {
        #[arg(long)]
        name: String,

        /// e.g. script, http, doc_link
        #[arg(long = "type")]
        action_type: String,
    },
}

#[derive(Args, Debug)]
pub struct StateArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// State printed by a previous apply or read
    #[arg(long)]
    pub state: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ResourceKind {
    AlertingChannel,
    MobileAlertConfig,
    AutomationAction,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::AlertingChannel,
        ResourceKind::MobileAlertConfig,
        ResourceKind::AutomationAction,
    ];
}
