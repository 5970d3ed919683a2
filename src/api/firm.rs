use super::client::RegisterClient;
use super::normalize::{DataShape, RequestOutcome};
use super::resource::ResourceType;
use crate::error::Result;

const FIRM: &str = "firm";

impl RegisterClient {
    /// Firm details by FRN
    pub async fn get_firm(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &[]).await
    }

    /// Current and previous trading names
    pub async fn get_firm_names(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Names"]).await
    }

    pub async fn get_firm_addresses(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Address"]).await
    }

    pub async fn get_firm_controlled_functions(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["CF"]).await
    }

    pub async fn get_firm_individuals(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Individuals"]).await
    }

    pub async fn get_firm_permissions(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Permissions"]).await
    }

    pub async fn get_firm_requirements(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Requirements"]).await
    }

    /// Investment types covered by one of the firm's requirements
    pub async fn get_firm_requirement_investment_types(
        &self,
        frn: &str,
        requirement_ref: &str,
    ) -> Result<RequestOutcome> {
        let base = ResourceType::Firm.info().endpoint_base;
        self.request(
            &[base, frn, "Requirements", requirement_ref, "InvestmentTypes"],
            &[],
            DataShape::Array,
        )
        .await
    }

    pub async fn get_firm_regulators(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Regulators"]).await
    }

    pub async fn get_firm_passports(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Passports"]).await
    }

    /// Passport permissions held in one EEA country
    pub async fn get_firm_passport_permissions(
        &self,
        frn: &str,
        country: &str,
    ) -> Result<RequestOutcome> {
        let base = ResourceType::Firm.info().endpoint_base;
        self.request(
            &[base, frn, "Passports", country, "Permission"],
            &[],
            DataShape::Array,
        )
        .await
    }

    pub async fn get_firm_waivers(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Waivers"]).await
    }

    pub async fn get_firm_exclusions(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["Exclusions"]).await
    }

    pub async fn get_firm_disciplinary_history(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["DisciplinaryHistory"])
            .await
    }

    /// Current and previous appointed representatives; `data` is an object
    pub async fn get_firm_appointed_representatives(&self, frn: &str) -> Result<RequestOutcome> {
        self.get_resource_info(frn, FIRM, &["AR"]).await
    }
}
