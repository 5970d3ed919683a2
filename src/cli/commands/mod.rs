pub mod config;
pub mod info;
pub mod markets;
pub mod resolve;
pub mod search;
pub mod version;

use log::debug;

use crate::api::RegisterClient;
use crate::config::Config;
use crate::error::Result;

/// Build a client from the user's configuration
pub(crate) fn client_from_config() -> Result<RegisterClient> {
    let config = Config::load()?;
    let client_config = config.client_config()?;
    debug!("Using {:?}", client_config);
    RegisterClient::new(client_config)
}
