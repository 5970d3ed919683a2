pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};

use crate::error::FsrError;

/// Financial Services Register CLI
#[derive(Parser, Debug)]
#[command(
    name = "fsreg",
    about = "Financial Services Register CLI - Look up firms, funds and individuals from the terminal",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the register by name
    #[command(alias = "s")]
    Search(args::SearchArgs),

    /// Resolve names to reference numbers
    #[command(alias = "r")]
    Resolve(args::ResolveArgs),

    /// Show a firm, fund or individual by reference number
    #[command(alias = "i")]
    Info(args::InfoArgs),

    /// List regulated markets
    Markets,

    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Show version information
    Version,
}

impl Cli {
    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        // Set up logging
        if cli.verbose {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .init();
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }

        let result = match cli.command {
            Commands::Search(args) => commands::search::execute(args, cli.format).await,
            Commands::Resolve(args) => commands::resolve::execute(args, cli.format).await,
            Commands::Info(args) => commands::info::execute(args, cli.format).await,
            Commands::Markets => commands::markets::execute(cli.format).await,
            Commands::Config(args) => commands::config::execute(args).await,
            Commands::Version => {
                commands::version::execute();
                Ok(())
            }
        };

        // Handle errors with better messaging
        if let Err(e) = &result {
            eprint!("{}", error_report(e, cli.verbose));
        }
        result
    }
}

/// User-facing description of a failed command, with its hint
pub fn error_report(e: &FsrError, verbose: bool) -> String {
    let mut report = match e {
        FsrError::NoCredentials => "Error: No API credentials configured.\n".to_string(),
        FsrError::Request { kind, message } => {
            let mut text = format!("Error: {}\n", message);
            if verbose {
                text.push_str(&format!("Kind: {}\n", kind.as_str()));
            }
            text
        }
        FsrError::Response(msg) => {
            let mut text = format!("Error parsing response: {}\n", msg);
            if !verbose {
                text.push_str("\nRun with --verbose for more details.\n");
            }
            text
        }
        _ => format!("Error: {}\n", e),
    };
    if let Some(hint) = e.hint() {
        report.push_str(&format!("\nHint: {}\n", hint));
    }
    report
}
