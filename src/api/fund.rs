use super::client::RegisterClient;
use super::normalize::RequestOutcome;
use crate::error::Result;

const FUND: &str = "fund";

impl RegisterClient {
    /// Fund (collective investment scheme) details by PRN
    pub async fn get_fund(&self, prn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(prn, FUND, &[]).await
    }

    /// Alternate or secondary names
    pub async fn get_fund_names(&self, prn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(prn, FUND, &["Names"]).await
    }

    pub async fn get_fund_subfunds(&self, prn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(prn, FUND, &["Subfund"]).await
    }
}
