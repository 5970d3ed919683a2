pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use api::{
    ClientConfig, DataShape, RegisterClient, RequestGate, RequestOutcome, ResolutionResult,
    SearchCandidate,
};
pub use error::{FsrError, RequestErrorKind, Result};
