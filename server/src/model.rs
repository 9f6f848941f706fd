use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::id::ClientId;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    pub company_name: String,
    /// User id of the assigned sales contact
    #[serde(default)]
    pub sales_contact: Option<u32>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Contract {
    pub id: u32,
    pub client: ClientId,
    pub sales_contact: u32,
    pub amount: f64,
    #[serde(default = "signed")]
    pub status: bool,
    #[serde(default)]
    pub payment_due: Option<DateTime<Utc>>,
}

fn signed() -> bool {
    true
}

/// Fields needed to create a client; the id is assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub company_name: String,
    pub sales_contact: Option<u32>,
}

impl NewClient {
    pub fn company(company_name: impl Into<String>) -> Self {
        NewClient {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    pub fn sales_contact(mut self, user_id: u32) -> Self {
        self.sales_contact = Some(user_id);
        self
    }
}
