use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

use super::client_from_config;

/// Execute markets command
pub async fn execute(format: OutputFormat) -> Result<()> {
    let client = client_from_config()?;
    let outcome = client.get_regulated_markets().await?;
    println!("{}", Formatter::new(format).format_outcome(&outcome)?);
    Ok(())
}
