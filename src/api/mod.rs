pub mod client;
pub mod deserializers;
pub mod firm;
pub mod fund;
pub mod gate;
pub mod individual;
pub mod normalize;
pub mod resource;
pub mod search;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, RegisterClient};
pub use gate::{ConcurrencyLimit, Permit, RequestGate, TokenBucket, Unlimited};
pub use normalize::{DataShape, RequestOutcome, ResultInfo};
pub use resource::{lookup, validate_modifiers, ResourceType, ResourceTypeInfo};
pub use transport::{Credentials, HttpTransport, RawResponse, Transport};
pub use types::{ResolutionResult, SearchCandidate};

/// Register API version
pub const API_VERSION: &str = "V0.1";

/// API root for the production register
pub const BASE_URL: &str = "https://register.fca.org.uk/services/V0.1";

/// Where API keys are issued
pub const DEVELOPER_PORTAL: &str = "https://register.fca.org.uk/Developer/s/";
