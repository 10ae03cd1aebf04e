//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use stackctx_core::{DEFAULT_CONFIG_KEY, NamingPolicy, ValueCoercion};

/// stackctx - Resolve the shared provisioning context for a stack deployment
#[derive(Parser, Debug)]
#[command(name = "stackctx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// The command to run (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Inputs that decide which configuration is loaded and how it is adjusted
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Lookup key naming the configuration file path
    #[arg(long, global = true, value_name = "KEY", default_value = DEFAULT_CONFIG_KEY)]
    pub config_key: String,

    /// Inline KEY=VALUE argument, checked before the environment
    #[arg(short = 'c', long = "context", global = true, value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Configuration path used when no other source names one
    #[arg(long, global = true, value_name = "PATH", env = "STACKCTX_DEFAULT_CONFIG")]
    pub default_config: Option<String>,

    /// Dot path to override from the inline argument of the same name
    #[arg(long = "override", global = true, value_name = "PATH")]
    pub overrides: Vec<String>,

    /// Override PATH with VALUE (shorthand for --context PATH=VALUE --override PATH)
    #[arg(long = "set", global = true, value_name = "PATH=VALUE")]
    pub set: Vec<String>,

    /// How the project prefix is derived from name and stage
    #[arg(long, global = true, value_enum, default_value_t = PrefixType::NameAndStage)]
    pub prefix_type: PrefixType,

    /// Parse override values as JSON literals (5, true, {"a":1})
    #[arg(long, global = true)]
    pub coerce_overrides: bool,
}

impl ResolveArgs {
    pub fn coercion(&self) -> ValueCoercion {
        if self.coerce_overrides {
            ValueCoercion::JsonLiteral
        } else {
            ValueCoercion::Verbatim
        }
    }
}

/// Project prefix naming policy
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixType {
    /// `{name}{stage}`
    NameAndStage,
    /// `{name}-{stage}`
    NameHyphenStage,
    /// `{name}`
    NameOnly,
}

impl From<PrefixType> for NamingPolicy {
    fn from(prefix: PrefixType) -> Self {
        match prefix {
            PrefixType::NameAndStage => Self::NameAndStage,
            PrefixType::NameHyphenStage => Self::NameHyphenStage,
            PrefixType::NameOnly => Self::NameOnly,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the assembled context
    ///
    /// Examples:
    ///   stackctx show -c APP_CONFIG=config/app-config-dev.json
    ///   APP_CONFIG=config/app-config-dev.json stackctx show --json
    Show {
        /// Output the full context as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration value at a dot path
    ///
    /// Examples:
    ///   stackctx get stacks.webhookECS.rds.allocatedStorage
    ///   stackctx get 'stacks.webhookECS.ecs.services[0].name' --raw
    Get {
        /// Dot path into the configuration, e.g. stacks.x.size
        path: String,

        /// Print strings without JSON quoting
        #[arg(long)]
        raw: bool,
    },

    /// List the configured stacks
    Stacks,

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   stackctx completions bash > ~/.local/share/bash-completion/completions/stackctx
    ///   stackctx completions zsh > ~/.zfunc/_stackctx
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
