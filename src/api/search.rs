use futures::future::join_all;
use log::{debug, info, warn};
use serde_json::Value;

use super::client::RegisterClient;
use super::normalize::{DataShape, RequestOutcome};
use super::resource::{self, ResourceType};
use super::types::{ResolutionResult, SearchCandidate, REFERENCE_NUMBER_FIELD};
use crate::error::{FsrError, RequestErrorKind, Result};

const SEARCH_ENDPOINT: &str = "Search";

impl RegisterClient {
    /// Free-text search scoped to one resource kind.
    ///
    /// Zero matches is a success outcome with empty data.
    pub async fn common_search(&self, query: &str, resource_type: &str) -> Result<RequestOutcome> {
        let info = resource::lookup(resource_type)?;
        self.request(
            &[SEARCH_ENDPOINT],
            &[("q", query), ("type", info.type_name)],
            DataShape::Array,
        )
        .await
    }

    /// Resolve free text to a reference number.
    ///
    /// Returns [`ResolutionResult::Resolved`] for exactly one match and
    /// [`ResolutionResult::Ambiguous`] with every candidate, in register order,
    /// otherwise. Zero matches fails with a `NoMatch` request error.
    pub async fn search_reference_number(
        &self,
        query: &str,
        resource_type: &str,
    ) -> Result<ResolutionResult> {
        let info = resource::lookup(resource_type)?;
        let outcome = self.common_search(query, info.type_name).await?;

        if !outcome.is_success {
            return Err(FsrError::request(
                RequestErrorKind::NotOk,
                format!(
                    "{} search for '{}' failed with status {}: {}",
                    info.reference_label, query, outcome.status_code, outcome.message
                ),
            ));
        }

        // success data is an array or null once normalized
        let Some(records) = outcome.records() else {
            return Err(FsrError::request(
                RequestErrorKind::NoData,
                format!(
                    "{} search for '{}' returned status {} without data",
                    info.reference_label, query, outcome.status_code
                ),
            ));
        };

        if records.is_empty() {
            return Err(FsrError::request(
                RequestErrorKind::NoMatch,
                format!("no {} matches '{}'", info.type_name, query),
            ));
        }

        let mut candidates = records
            .iter()
            .map(candidate_from_record)
            .collect::<Result<Vec<_>>>()?;

        if candidates.len() == 1 {
            let candidate = candidates.remove(0);
            info!(
                "Resolved '{}' to {} {} ({})",
                query, info.reference_label, candidate.reference_number, candidate.name
            );
            return Ok(ResolutionResult::Resolved(candidate.reference_number));
        }

        debug!(
            "'{}' matched {} {} records",
            query,
            candidates.len(),
            info.type_name
        );
        Ok(ResolutionResult::Ambiguous(candidates))
    }

    /// Resolve several queries concurrently; results are in input order
    pub async fn search_reference_numbers(
        &self,
        queries: &[&str],
        resource_type: &str,
    ) -> Result<Vec<Result<ResolutionResult>>> {
        let info = resource::lookup(resource_type)?;
        let searches = queries
            .iter()
            .map(|query| self.search_reference_number(query, info.type_name));
        Ok(join_all(searches).await)
    }

    /// Resolve a firm name to its FRN
    pub async fn search_frn(&self, firm_name: &str) -> Result<ResolutionResult> {
        self.search_reference_number(firm_name, ResourceType::Firm.as_str())
            .await
    }

    /// Resolve an individual's name to their IRN
    pub async fn search_irn(&self, individual_name: &str) -> Result<ResolutionResult> {
        self.search_reference_number(individual_name, ResourceType::Individual.as_str())
            .await
    }

    /// Resolve a fund name to its PRN
    pub async fn search_prn(&self, fund_name: &str) -> Result<ResolutionResult> {
        self.search_reference_number(fund_name, ResourceType::Fund.as_str())
            .await
    }
}

fn candidate_from_record(record: &Value) -> Result<SearchCandidate> {
    let has_reference = record
        .as_object()
        .is_some_and(|fields| fields.contains_key(REFERENCE_NUMBER_FIELD));
    if !has_reference {
        warn!("Search record without '{}': {}", REFERENCE_NUMBER_FIELD, record);
        return Err(FsrError::response(format!(
            "search record has no '{}' field",
            REFERENCE_NUMBER_FIELD
        )));
    }

    serde_json::from_value(record.clone())
        .map_err(|e| FsrError::response(format!("malformed search record: {}", e)))
}
