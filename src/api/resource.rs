use std::fmt;

use super::normalize::DataShape;
use crate::error::{FsrError, Result};

/// Kinds of entity held on the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Authorised or registered firm (FRN)
    Firm,
    /// Collective investment scheme (PRN)
    Fund,
    /// Approved person or certified individual (IRN)
    Individual,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [Self::Firm, Self::Fund, Self::Individual];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "firm" => Some(Self::Firm),
            "fund" => Some(Self::Fund),
            "individual" => Some(Self::Individual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.info().type_name
    }

    /// Registry entry for this kind
    pub fn info(&self) -> &'static ResourceTypeInfo {
        match self {
            Self::Firm => &RESOURCE_TYPES[0],
            Self::Fund => &RESOURCE_TYPES[1],
            Self::Individual => &RESOURCE_TYPES[2],
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint conventions for one resource kind
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceTypeInfo {
    pub resource_type: ResourceType,
    pub type_name: &'static str,
    pub endpoint_base: &'static str,
    /// Short name of the kind's reference number (FRN, PRN, IRN)
    pub reference_label: &'static str,
    pub valid_modifiers: &'static [&'static str],
}

/// Firm sub-resource returned as an object rather than a list
const APPOINTED_REPRESENTATIVES: &str = "AR";

static RESOURCE_TYPES: [ResourceTypeInfo; 3] = [
    ResourceTypeInfo {
        resource_type: ResourceType::Firm,
        type_name: "firm",
        endpoint_base: "Firm",
        reference_label: "FRN",
        valid_modifiers: &[
            "Names",
            "Address",
            "CF",
            "Individuals",
            "Permissions",
            "Requirements",
            "Regulators",
            "Passports",
            "Waivers",
            "Exclusions",
            "DisciplinaryHistory",
            APPOINTED_REPRESENTATIVES,
        ],
    },
    ResourceTypeInfo {
        resource_type: ResourceType::Fund,
        type_name: "fund",
        endpoint_base: "CIS",
        reference_label: "PRN",
        valid_modifiers: &["Subfund", "Names"],
    },
    ResourceTypeInfo {
        resource_type: ResourceType::Individual,
        type_name: "individual",
        endpoint_base: "Individuals",
        reference_label: "IRN",
        valid_modifiers: &["CF", "DisciplinaryHistory"],
    },
];

/// All registered resource kinds
pub fn resource_types() -> &'static [ResourceTypeInfo] {
    &RESOURCE_TYPES
}

/// Look up a resource kind by its type name
pub fn lookup(type_name: &str) -> Result<&'static ResourceTypeInfo> {
    RESOURCE_TYPES
        .iter()
        .find(|info| info.type_name == type_name)
        .ok_or_else(|| FsrError::InvalidResourceType(type_name.to_string()))
}

/// Check every modifier against the allowed set of `type_name`
pub fn validate_modifiers(type_name: &str, modifiers: &[&str]) -> Result<()> {
    lookup(type_name)?.validate_modifiers(modifiers)
}

impl ResourceTypeInfo {
    pub fn is_valid_modifier(&self, modifier: &str) -> bool {
        self.valid_modifiers.contains(&modifier)
    }

    pub fn validate_modifiers(&self, modifiers: &[&str]) -> Result<()> {
        match modifiers.iter().find(|m| !self.is_valid_modifier(m)) {
            Some(modifier) => Err(FsrError::InvalidModifier {
                resource_type: self.type_name.to_string(),
                modifier: modifier.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Shape of the `Data` payload for a request with these modifiers
    pub fn data_shape(&self, modifiers: &[&str]) -> DataShape {
        match (self.resource_type, modifiers.last()) {
            (ResourceType::Firm, Some(&APPOINTED_REPRESENTATIVES)) => DataShape::Object,
            _ => DataShape::Array,
        }
    }
}
