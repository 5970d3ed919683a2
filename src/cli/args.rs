use clap::{Args, Subcommand};

use crate::api::ResourceType;

/// Resource kind accepted by `--type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceKind {
    Firm,
    Fund,
    Individual,
}

impl From<ResourceKind> for ResourceType {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Firm => ResourceType::Firm,
            ResourceKind::Fund => ResourceType::Fund,
            ResourceKind::Individual => ResourceType::Individual,
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        ResourceType::from(*self).as_str()
    }
}

/// Search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query (firm, fund or individual name)
    pub query: String,

    /// Resource kind to search
    #[arg(short = 't', long = "type", value_enum, default_value = "firm")]
    pub resource_type: ResourceKind,
}

/// Resolve command arguments
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Names to resolve; several names are resolved concurrently
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Resource kind to resolve
    #[arg(short = 't', long = "type", value_enum, default_value = "firm")]
    pub resource_type: ResourceKind,
}

/// Info command arguments
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Reference number (FRN, PRN or IRN)
    pub reference_number: String,

    /// Resource kind the reference number belongs to
    #[arg(short = 't', long = "type", value_enum, default_value = "firm")]
    pub resource_type: ResourceKind,

    /// Sub-resource view, repeatable and applied in order.
    ///
    /// Firm: Names, Address, CF, Individuals, Permissions, Requirements,
    /// Regulators, Passports, Waivers, Exclusions, DisciplinaryHistory, AR.
    /// Fund: Subfund, Names. Individual: CF, DisciplinaryHistory.
    #[arg(short, long = "modifier")]
    pub modifiers: Vec<String>,
}

/// Configuration command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. api.username, api.key, gate.strategy)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Initialize configuration file
    Init,
}
