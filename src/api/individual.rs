use super::client::RegisterClient;
use super::normalize::RequestOutcome;
use crate::error::Result;

const INDIVIDUAL: &str = "individual";

impl RegisterClient {
    /// Individual details by IRN
    pub async fn get_individual(&self, irn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(irn, INDIVIDUAL, &[]).await
    }

    pub async fn get_individual_controlled_functions(&self, irn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(irn, INDIVIDUAL, &["CF"]).await
    }

    pub async fn get_individual_disciplinary_history(&self, irn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(irn, INDIVIDUAL, &["DisciplinaryHistory"])
            .await
    }
}
