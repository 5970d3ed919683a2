use thiserror::Error;

/// Why a request could not be turned into a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// No response was received (connection failure, timeout, broken body)
    Transport,
    /// The registry answered with a non-success status code
    NotOk,
    /// The registry reported success but carried no data
    NoData,
    /// A reference-number search found no matching record
    NoMatch,
    /// The request gate stopped issuing permits
    GateClosed,
}

impl RequestErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::NotOk => "not-ok",
            Self::NoData => "no-data",
            Self::NoMatch => "no-match",
            Self::GateClosed => "gate-closed",
        }
    }
}

#[derive(Debug, Error)]
pub enum FsrError {
    #[error("API credentials not configured. Run 'fsreg config set api.username EMAIL' and 'fsreg config set api.key KEY'.")]
    NoCredentials,

    #[error("Invalid resource type: '{0}' (expected one of: firm, fund, individual)")]
    InvalidResourceType(String),

    #[error("Invalid modifier '{modifier}' for resource type '{resource_type}'")]
    InvalidModifier {
        resource_type: String,
        modifier: String,
    },

    #[error("Request error ({}): {message}", kind.as_str())]
    Request {
        kind: RequestErrorKind,
        message: String,
    },

    #[error("Response error: {0}")]
    Response(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FsrError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request {
            kind: RequestErrorKind::Transport,
            message: err.to_string(),
        }
    }
}

impl FsrError {
    /// Create a request error of the given kind
    pub fn request(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Request {
            kind,
            message: message.into(),
        }
    }

    /// Create a response (payload shape) error
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response(message.into())
    }

    /// Caller supplied an unknown resource type or modifier
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidResourceType(_) | Self::InvalidModifier { .. }
        )
    }

    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    pub fn is_response_error(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// The request error classification, if this is a request error
    pub fn request_kind(&self) -> Option<RequestErrorKind> {
        match self {
            Self::Request { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoCredentials => Some(
                "Register for an API key at https://register.fca.org.uk/Developer/s/ \
                 and configure it with: fsreg config set api.key YOUR_KEY"
                    .to_string(),
            ),
            Self::InvalidResourceType(_) => {
                Some("Use --type firm, --type fund or --type individual.".to_string())
            }
            Self::InvalidModifier { resource_type, .. } => Some(format!(
                "Run 'fsreg info --help' to list the modifiers available for {}.",
                resource_type
            )),
            Self::Request { kind, .. } => match kind {
                RequestErrorKind::Transport => {
                    Some("Check your internet connection and try again.".to_string())
                }
                RequestErrorKind::NoMatch => {
                    Some("Try a broader query with 'fsreg search'.".to_string())
                }
                RequestErrorKind::NotOk => {
                    Some("Check your API credentials and request parameters.".to_string())
                }
                _ => None,
            },
            Self::Response(_) => Some(
                "The register returned data in an unexpected shape. \
                 Check that the modifier is supported for this resource type."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_classification() {
        assert!(FsrError::InvalidResourceType("bank".into()).is_invalid_input());
        assert!(FsrError::InvalidModifier {
            resource_type: "fund".into(),
            modifier: "AR".into(),
        }
        .is_invalid_input());
        assert!(!FsrError::response("bad").is_invalid_input());
    }

    #[test]
    fn test_request_error_message_names_kind() {
        let error = FsrError::request(RequestErrorKind::NoMatch, "no firm matches 'acme'");
        let msg = error.to_string();
        assert!(msg.contains("no-match"));
        assert!(msg.contains("acme"));
        assert_eq!(error.request_kind(), Some(RequestErrorKind::NoMatch));
        assert!(error.is_request_error());
        assert!(!error.is_response_error());
    }

    #[test]
    fn test_hints() {
        assert!(FsrError::NoCredentials
            .hint()
            .unwrap()
            .contains("register.fca.org.uk"));
        assert!(FsrError::request(RequestErrorKind::Transport, "refused")
            .hint()
            .unwrap()
            .contains("internet connection"));
        assert!(FsrError::request(RequestErrorKind::GateClosed, "closed")
            .hint()
            .is_none());
        assert!(FsrError::Other("x".into()).hint().is_none());
    }

    #[test]
    fn test_modifier_error_message() {
        let error = FsrError::InvalidModifier {
            resource_type: "individual".into(),
            modifier: "Waivers".into(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid modifier 'Waivers' for resource type 'individual'"
        );
    }
}
