use crate::cli::args::SearchArgs;
use crate::cli::OutputFormat;
use crate::error::{FsrError, Result};
use crate::output::Formatter;

use super::client_from_config;

/// Execute search command
pub async fn execute(args: SearchArgs, format: OutputFormat) -> Result<()> {
    if args.query.trim().is_empty() {
        return Err(FsrError::Other("Search query cannot be empty".to_string()));
    }

    let client = client_from_config()?;
    let outcome = client
        .common_search(&args.query, args.resource_type.as_str())
        .await?;

    let output = Formatter::new(format).format_outcome(&outcome)?;
    println!("{}", output);
    Ok(())
}
