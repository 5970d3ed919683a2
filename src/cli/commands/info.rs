use crate::cli::args::InfoArgs;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

use super::client_from_config;

/// Execute info command
pub async fn execute(args: InfoArgs, format: OutputFormat) -> Result<()> {
    let client = client_from_config()?;
    let modifiers: Vec<&str> = args.modifiers.iter().map(String::as_str).collect();

    let outcome = client
        .get_resource_info(
            &args.reference_number,
            args.resource_type.as_str(),
            &modifiers,
        )
        .await?;

    let output = Formatter::new(format).format_outcome(&outcome)?;
    println!("{}", output);
    Ok(())
}
