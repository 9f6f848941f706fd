use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A selectable entry related to a client: a contract or a sales contact.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RelatedRecord {
    pub id: u32,
    pub name: String,
}

impl RelatedRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        RelatedRecord {
            id,
            name: name.into(),
        }
    }
}

/// Response body of the related-list endpoints. Record order is significant.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct RelatedList {
    pub data: Vec<RelatedRecord>,
}

impl From<Vec<RelatedRecord>> for RelatedList {
    fn from(data: Vec<RelatedRecord>) -> Self {
        RelatedList { data }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Contracts,
    Sales,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Contracts, Resource::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Contracts => "contracts",
            Resource::Sales => "sales",
        }
    }

    /// Id of the selection field the list is rendered into.
    pub fn target_field(&self) -> &'static str {
        match self {
            Resource::Contracts => "id_contract",
            Resource::Sales => "id_sales",
        }
    }

    pub fn path(&self, client_id: impl fmt::Display) -> String {
        format!("/get/{}/{}", self.as_str(), client_id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("unknown resource `{0}`, expected `contracts` or `sales`")]
pub struct UnknownResource(String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contracts" | "contract" => Ok(Resource::Contracts),
            "sales" | "sale" => Ok(Resource::Sales),
            _ => Err(UnknownResource(s.to_owned())),
        }
    }
}
