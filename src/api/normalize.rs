use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::deserializers::{opt_non_empty_string, opt_u32_from_number_or_string};
use super::transport::RawResponse;
use crate::error::{FsrError, Result};

pub const STATUS_FIELD: &str = "Status";
pub const MESSAGE_FIELD: &str = "Message";
pub const DATA_FIELD: &str = "Data";
pub const RESULT_INFO_FIELD: &str = "ResultInfo";

/// Result segment of a status code meaning "ok"
pub const RESULT_OK: &str = "00";
/// Result segment of a status code meaning "search performed, no results"
pub const RESULT_NO_RESULT: &str = "11";

// FSR-API-<area>-<operation>-<result>
static STATUS_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FSR-API-(\d{2})-(\d{2})-(\d{2})$").expect("status code pattern is valid")
});

/// How the register's own status code classifies a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    NoResult,
    Failure,
}

impl StatusClass {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure)
    }
}

pub fn classify_status(status_code: &str) -> StatusClass {
    match STATUS_CODE
        .captures(status_code)
        .and_then(|caps| caps.get(3))
        .map(|m| m.as_str())
    {
        Some(RESULT_OK) => StatusClass::Ok,
        Some(RESULT_NO_RESULT) => StatusClass::NoResult,
        _ => StatusClass::Failure,
    }
}

/// JSON type the `Data` payload must have for a given call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    Array,
    Object,
}

impl DataShape {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    fn empty(&self) -> Value {
        match self {
            Self::Array => Value::Array(Vec::new()),
            Self::Object => Value::Object(Map::new()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Paging metadata attached to search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default, deserialize_with = "opt_u32_from_number_or_string")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "opt_u32_from_number_or_string")]
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "opt_u32_from_number_or_string")]
    pub total_count: Option<u32>,
    #[serde(
        default,
        rename = "Next",
        alias = "next",
        deserialize_with = "opt_non_empty_string"
    )]
    pub next: Option<String>,
    #[serde(
        default,
        rename = "Previous",
        alias = "previous",
        deserialize_with = "opt_non_empty_string"
    )]
    pub previous: Option<String>,
}

/// Uniform result of any register call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestOutcome {
    /// Derived from the register status code, not the HTTP status
    pub is_success: bool,
    pub status_code: String,
    pub message: String,
    /// `Data` payload; `Null` only when a failure or an ok status carried none
    pub data: Value,
    pub result_info: Option<ResultInfo>,
}

impl RequestOutcome {
    /// The register reported "no result found"
    pub fn is_empty_result(&self) -> bool {
        classify_status(&self.status_code) == StatusClass::NoResult
    }

    /// Payload is absent or an empty array/object
    pub fn is_data_empty(&self) -> bool {
        match &self.data {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        }
    }

    pub fn records(&self) -> Option<&Vec<Value>> {
        self.data.as_array()
    }
}

/// Turn a raw transport response into a [`RequestOutcome`].
///
/// Fails with [`FsrError::Response`] when the body is not a JSON object
/// carrying `Status` and `Message`, when an ok response has no `Data` key, or
/// when a success payload is not of the `expected` shape.
pub fn normalize(raw: &RawResponse, expected: DataShape) -> Result<RequestOutcome> {
    let body = raw.json().map_err(|e| {
        warn!("Undecodable response body (HTTP {}): {}", raw.status, e);
        FsrError::response(format!("response body is not valid JSON: {}", e))
    })?;

    let mut fields = match body {
        Value::Object(fields) => fields,
        other => {
            return Err(FsrError::response(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    let status_code = take_string(&mut fields, STATUS_FIELD)?;
    let message = take_string(&mut fields, MESSAGE_FIELD)?;
    let class = classify_status(&status_code);
    let is_success = raw.is_http_success() && class.is_success();

    debug!(
        "Register status {} (HTTP {}): {}",
        status_code, raw.status, message
    );

    // `Data` may only be omitted under the no-result code
    let raw_data = match fields.remove(DATA_FIELD) {
        None if class != StatusClass::NoResult => {
            return Err(FsrError::response(format!(
                "response with status {} has no '{}' field",
                status_code, DATA_FIELD
            )))
        }
        raw_data => raw_data,
    };

    let data = if !is_success {
        raw_data.unwrap_or(Value::Null)
    } else {
        match (class, raw_data) {
            (StatusClass::NoResult, None | Some(Value::Null)) => expected.empty(),
            (_, None | Some(Value::Null)) => Value::Null,
            (_, Some(value)) if expected.matches(&value) => value,
            (_, Some(value)) => {
                warn!(
                    "Malformed '{}' payload for status {}: expected {}, got {}",
                    DATA_FIELD,
                    status_code,
                    expected.name(),
                    json_type_name(&value)
                );
                return Err(FsrError::response(format!(
                    "expected '{}' to be an {}, got {}",
                    DATA_FIELD,
                    expected.name(),
                    json_type_name(&value)
                )));
            }
        }
    };

    let result_info = match fields.remove(RESULT_INFO_FIELD) {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value::<ResultInfo>(value).map_err(|e| {
            FsrError::response(format!("malformed '{}': {}", RESULT_INFO_FIELD, e))
        })?),
    };

    if !is_success {
        warn!("Register returned failure status {}: {}", status_code, message);
    }

    Ok(RequestOutcome {
        is_success,
        status_code,
        message,
        data,
        result_info,
    })
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Result<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(FsrError::response(format!(
            "expected '{}' to be a string, got {}",
            key,
            json_type_name(&other)
        ))),
        None => Err(FsrError::response(format!(
            "response has no '{}' field",
            key
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
