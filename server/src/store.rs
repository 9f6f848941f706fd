use std::collections::BTreeMap;

use crm_api::RelatedRecord;
use serde::Deserialize;

use crate::id::ClientId;
use crate::model::{Client, Contract, NewClient, User};

#[derive(thiserror::Error, Debug)]
pub enum CrmError {
    #[error("invalid client id `{0}`")]
    InvalidClientId(String),
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
    #[error("user {0} not found")]
    UserNotFound(u32),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("no {0} ids left")]
    IdsExhausted(&'static str),
    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

pub type Result<T, E = CrmError> = std::result::Result<T, E>;

/// Seed data for [`Crm::from_fixture`]. Ids are kept as given and must be
/// unique per kind.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
}

/// In-memory store of users, clients and their contracts.
#[derive(Default)]
pub struct Crm {
    users: BTreeMap<u32, User>,
    clients: BTreeMap<ClientId, Client>,
    contracts: BTreeMap<u32, Contract>,
}

impl Crm {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Result<Self> {
        let mut crm = Crm::new();
        for user in fixture.users {
            insert_unique(&mut crm.users, "user", user.id, user.id, user)?;
        }
        for client in fixture.clients {
            if let Some(user_id) = client.sales_contact {
                crm.user(user_id)?;
            }
            insert_unique(&mut crm.clients, "client", client.id.get(), client.id, client)?;
        }
        for contract in fixture.contracts {
            crm.client(contract.client)?;
            crm.user(contract.sales_contact)?;
            insert_unique(&mut crm.contracts, "contract", contract.id, contract.id, contract)?;
        }
        Ok(crm)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_fixture(serde_json::from_str(json)?)
    }

    pub fn add_user(
        &mut self,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User> {
        let user = User {
            id: next_id(self.users.keys().last().copied(), "user")?,
            username: username.into(),
            first_name: None,
            last_name: None,
            email: email.into(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn add_client(&mut self, new: NewClient) -> Result<Client> {
        if let Some(user_id) = new.sales_contact {
            self.user(user_id)?;
        }
        let last = self.clients.keys().last().map(ClientId::get);
        let id = ClientId::new(next_id(last, "client")?);
        let client = Client {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: None,
            mobile: None,
            company_name: new.company_name,
            sales_contact: new.sales_contact,
        };
        self.clients.insert(id, client.clone());
        Ok(client)
    }

    pub fn add_contract(
        &mut self,
        client: ClientId,
        sales_contact: u32,
        amount: f64,
    ) -> Result<Contract> {
        self.client(client)?;
        self.user(sales_contact)?;
        let contract = Contract {
            id: next_id(self.contracts.keys().last().copied(), "contract")?,
            client,
            sales_contact,
            amount,
            status: true,
            payment_due: None,
        };
        self.contracts.insert(contract.id, contract.clone());
        Ok(contract)
    }

    pub fn client(&self, id: ClientId) -> Result<&Client> {
        self.clients.get(&id).ok_or(CrmError::ClientNotFound(id))
    }

    pub fn user(&self, id: u32) -> Result<&User> {
        self.users.get(&id).ok_or(CrmError::UserNotFound(id))
    }

    /// Every contract of the client in id order, labelled `{company}_{id}`.
    pub fn contracts_for(&self, id: ClientId) -> Result<Vec<RelatedRecord>> {
        let client = self.client(id)?;
        Ok(self
            .contracts
            .values()
            .filter(|contract| contract.client == id)
            .map(|contract| {
                let name = format!("{}_{}", client.company_name, contract.id);
                RelatedRecord::new(contract.id, name)
            })
            .collect())
    }

    /// The client's sales contact, labelled by username. Empty when unassigned.
    pub fn sales_for(&self, id: ClientId) -> Result<Vec<RelatedRecord>> {
        let client = self.client(id)?;
        Ok(client
            .sales_contact
            .and_then(|user_id| self.users.get(&user_id))
            .map(|user| RelatedRecord::new(user.id, user.username.clone()))
            .into_iter()
            .collect())
    }
}

fn next_id(last: Option<u32>, kind: &'static str) -> Result<u32> {
    match last {
        None => Ok(1),
        Some(id) => id.checked_add(1).ok_or(CrmError::IdsExhausted(kind)),
    }
}

fn insert_unique<K: Ord, V>(
    map: &mut BTreeMap<K, V>,
    kind: &'static str,
    id: u32,
    key: K,
    value: V,
) -> Result<()> {
    if map.contains_key(&key) {
        return Err(CrmError::DuplicateId { kind, id });
    }
    map.insert(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crm() -> (Crm, ClientId, ClientId) {
        let mut crm = Crm::new();
        let alice = crm.add_user("alice", "alice@example.com").unwrap();
        let acme = crm
            .add_client(NewClient::company("Acme").sales_contact(alice.id))
            .unwrap();
        let globex = crm.add_client(NewClient::company("Globex")).unwrap();
        (crm, acme.id, globex.id)
    }

    #[test]
    fn contracts_are_named_after_company() {
        let (mut crm, acme, globex) = crm();
        let first = crm.add_contract(acme, 1, 100.0).unwrap();
        crm.add_contract(globex, 1, 50.0).unwrap();
        let third = crm.add_contract(acme, 1, 25.0).unwrap();

        assert_eq!(
            crm.contracts_for(acme).unwrap(),
            vec![
                RelatedRecord::new(first.id, format!("Acme_{}", first.id)),
                RelatedRecord::new(third.id, format!("Acme_{}", third.id)),
            ]
        );
    }

    #[test]
    fn client_without_contracts_has_empty_list() {
        let (crm, _, globex) = crm();
        assert!(crm.contracts_for(globex).unwrap().is_empty());
    }

    #[test]
    fn sales_contact_by_username() {
        let (crm, acme, globex) = crm();
        assert_eq!(crm.sales_for(acme).unwrap(), vec![RelatedRecord::new(1, "alice")]);
        assert!(crm.sales_for(globex).unwrap().is_empty());
    }

    #[test]
    fn unknown_client() {
        let (crm, _, _) = crm();
        let err = crm.contracts_for(ClientId::new(99)).unwrap_err();
        assert!(matches!(err, CrmError::ClientNotFound(id) if id == ClientId::new(99)));
        assert!(crm.sales_for(ClientId::new(99)).is_err());
    }

    #[test]
    fn contract_needs_known_sales_contact() {
        let (mut crm, acme, _) = crm();
        let err = crm.add_contract(acme, 42, 1.0).unwrap_err();
        assert!(matches!(err, CrmError::UserNotFound(42)));
    }

    #[test]
    fn load_fixture() {
        let crm = Crm::from_json(
            r#"{
                "users": [{"id": 4, "username": "bob", "email": "bob@example.com"}],
                "clients": [{"id": "2", "first_name": "Ann", "last_name": "Lee",
                             "company_name": "Initech", "sales_contact": 4}],
                "contracts": [{"id": 10, "client": 2, "sales_contact": 4, "amount": 12.5,
                               "payment_due": "2026-11-01T00:00:00Z"}]
            }"#,
        )
        .unwrap();

        let id = ClientId::new(2);
        assert_eq!(crm.contracts_for(id).unwrap(), vec![RelatedRecord::new(10, "Initech_10")]);
        assert_eq!(crm.sales_for(id).unwrap(), vec![RelatedRecord::new(4, "bob")]);
    }

    #[test]
    fn fixture_with_dangling_client() {
        let err = Crm::from_json(
            r#"{
                "users": [{"id": 1, "username": "bob", "email": "bob@example.com"}],
                "contracts": [{"id": 1, "client": 3, "sales_contact": 1, "amount": 1.0}]
            }"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, CrmError::ClientNotFound(_)));
    }

    #[test]
    fn client_ids_exhausted_after_max_fixture_id() {
        let mut crm = Crm::from_json(
            r#"{
                "clients": [{"id": 4294967295, "first_name": "Ann", "last_name": "Lee",
                             "company_name": "Initech"}]
            }"#,
        )
        .unwrap();

        let err = crm.add_client(NewClient::company("Next")).unwrap_err();
        assert!(matches!(err, CrmError::IdsExhausted("client")));
    }

    #[test]
    fn user_and_contract_ids_exhausted() {
        let mut crm = Crm::from_json(
            r#"{
                "users": [{"id": 4294967295, "username": "bob", "email": "bob@example.com"}],
                "clients": [{"id": 1, "first_name": "Ann", "last_name": "Lee",
                             "company_name": "Initech"}],
                "contracts": [{"id": 4294967295, "client": 1, "sales_contact": 4294967295,
                               "amount": 1.0}]
            }"#,
        )
        .unwrap();

        let err = crm.add_user("carol", "carol@example.com").unwrap_err();
        assert!(matches!(err, CrmError::IdsExhausted("user")));
        let err = crm.add_contract(ClientId::new(1), u32::MAX, 2.0).unwrap_err();
        assert!(matches!(err, CrmError::IdsExhausted("contract")));
        assert_eq!(crm.contracts_for(ClientId::new(1)).unwrap().len(), 1);
    }

    #[test]
    fn fixture_with_duplicate_user() {
        let err = Crm::from_json(
            r#"{
                "users": [{"id": 3, "username": "bob", "email": "bob@example.com"},
                          {"id": 3, "username": "eve", "email": "eve@example.com"}]
            }"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, CrmError::DuplicateId { kind: "user", id: 3 }));
    }

    #[test]
    fn fixture_with_duplicate_client_or_contract() {
        let err = Crm::from_json(
            r#"{
                "clients": [{"id": 2, "first_name": "A", "last_name": "B", "company_name": "X"},
                            {"id": "2", "first_name": "C", "last_name": "D", "company_name": "Y"}]
            }"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, CrmError::DuplicateId { kind: "client", id: 2 }));

        let err = Crm::from_json(
            r#"{
                "users": [{"id": 1, "username": "bob", "email": "bob@example.com"}],
                "clients": [{"id": 1, "first_name": "A", "last_name": "B", "company_name": "X"}],
                "contracts": [{"id": 5, "client": 1, "sales_contact": 1, "amount": 1.0},
                              {"id": 5, "client": 1, "sales_contact": 1, "amount": 2.0}]
            }"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, CrmError::DuplicateId { kind: "contract", id: 5 }));
    }
}
