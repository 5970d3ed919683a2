use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::{json, Map, Value};

use crate::api::{RequestOutcome, ResolutionResult, SearchCandidate};
use crate::cli::OutputFormat;
use crate::error::{FsrError, Result};

/// Widest a single cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 40;
/// Columns shown for record lists; JSON output has the rest
const MAX_COLUMNS: usize = 6;

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a normalized register response
    pub fn format_outcome(&self, outcome: &RequestOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_outcome_table(outcome),
            OutputFormat::Json => to_json(outcome),
        }
    }

    /// Format one reference-number resolution
    pub fn format_resolution(&self, query: &str, result: &ResolutionResult) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_resolution_table(query, result)),
            OutputFormat::Json => to_json(&json!({ "query": query, "result": result })),
        }
    }

    /// Format a batch of resolutions, one entry per query
    pub fn format_resolutions(
        &self,
        queries: &[&str],
        results: &[Result<ResolutionResult>],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_resolutions_table(queries, results)),
            OutputFormat::Json => {
                let entries: Vec<Value> = queries
                    .iter()
                    .zip(results)
                    .map(|(query, result)| match result {
                        Ok(result) => json!({ "query": query, "result": result }),
                        Err(e) => json!({ "query": query, "error": e.to_string() }),
                    })
                    .collect();
                to_json(&entries)
            }
        }
    }

    // Table formatting methods
    fn format_outcome_table(&self, outcome: &RequestOutcome) -> Result<String> {
        let mut result = String::new();

        let status = if outcome.is_success {
            outcome.status_code.green()
        } else {
            outcome.status_code.red()
        };
        result.push_str(&format!("\n{} {} {}\n", "📋".cyan(), status, outcome.message));

        if let Some(info) = &outcome.result_info {
            if let Some(total) = info.total_count {
                result.push_str(&format!(
                    "{} Total: {} | Page: {}\n",
                    "📊".cyan(),
                    total.to_string().yellow(),
                    info.page.unwrap_or(1).to_string().yellow()
                ));
            }
        }
        result.push('\n');

        if outcome.is_data_empty() {
            result.push_str("No results\n");
            return Ok(result);
        }

        match &outcome.data {
            Value::Array(records) => result.push_str(&records_table(records).to_string()),
            Value::Object(fields) => result.push_str(&fields_table(fields).to_string()),
            other => result.push_str(&display_value(other)),
        }

        Ok(result)
    }

    fn format_resolution_table(&self, query: &str, result: &ResolutionResult) -> String {
        match result {
            ResolutionResult::Resolved(reference) => {
                format!("\n{} {} → {}\n", "✅".green(), query, reference.yellow().bold())
            }
            ResolutionResult::Ambiguous(candidates) => {
                let mut result = format!(
                    "\n{} '{}' matched {} records\n\n",
                    "🔎".cyan(),
                    query,
                    candidates.len().to_string().yellow()
                );
                result.push_str(&candidates_table(candidates).to_string());
                result
            }
        }
    }

    fn format_resolutions_table(
        &self,
        queries: &[&str],
        results: &[Result<ResolutionResult>],
    ) -> String {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Query").fg(Color::Cyan),
            Cell::new("Result").fg(Color::Cyan),
        ]);

        for (query, result) in queries.iter().zip(results) {
            let cell = match result {
                Ok(ResolutionResult::Resolved(reference)) => {
                    Cell::new(reference).fg(Color::Green)
                }
                Ok(ResolutionResult::Ambiguous(candidates)) => {
                    Cell::new(format!("{} candidates", candidates.len())).fg(Color::Yellow)
                }
                Err(e) => Cell::new(truncate_string(&e.to_string(), MAX_CELL_WIDTH * 2))
                    .fg(Color::Red),
            };
            table.add_row(vec![Cell::new(truncate_string(query, MAX_CELL_WIDTH)), cell]);
        }

        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.to_string()
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(FsrError::Serialization)
}

fn candidates_table(candidates: &[SearchCandidate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Reference Number").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
    ]);

    for (idx, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(truncate_string(&candidate.name, MAX_CELL_WIDTH)),
            Cell::new(&candidate.reference_number),
            Cell::new(or_dash(&candidate.status)),
            Cell::new(or_dash(&candidate.type_label)),
        ]);
    }

    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per record; columns are the keys in first-seen order
fn records_table(records: &[Value]) -> Table {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        if let Value::Object(fields) = record {
            for key in fields.keys() {
                if columns.len() < MAX_COLUMNS && !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let mut table = Table::new();
    if columns.is_empty() {
        table.set_header(vec![Cell::new("Value").fg(Color::Cyan)]);
        for record in records {
            table.add_row(vec![Cell::new(display_value(record))]);
        }
    } else {
        table.set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
        for record in records {
            table.add_row(
                columns
                    .iter()
                    .map(|c| Cell::new(record.get(*c).map_or("-".to_string(), display_value)))
                    .collect::<Vec<_>>(),
            );
        }
    }

    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn fields_table(fields: &Map<String, Value>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Field").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    for (key, value) in fields {
        table.add_row(vec![Cell::new(key), Cell::new(display_value(value))]);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn display_value(value: &Value) -> String {
    let text = match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.to_string(),
    };
    truncate_string(&text, MAX_CELL_WIDTH)
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
