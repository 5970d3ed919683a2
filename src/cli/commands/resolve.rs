use crate::cli::args::ResolveArgs;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

use super::client_from_config;

/// Execute resolve command
pub async fn execute(args: ResolveArgs, format: OutputFormat) -> Result<()> {
    let client = client_from_config()?;
    let formatter = Formatter::new(format);

    // a single query reports its own error
    if let [query] = args.queries.as_slice() {
        let result = client
            .search_reference_number(query, args.resource_type.as_str())
            .await?;
        println!("{}", formatter.format_resolution(query, &result)?);
        return Ok(());
    }

    let queries: Vec<&str> = args.queries.iter().map(String::as_str).collect();
    let results = client
        .search_reference_numbers(&queries, args.resource_type.as_str())
        .await?;

    let output = formatter.format_resolutions(&queries, &results)?;
    println!("{}", output);
    Ok(())
}
