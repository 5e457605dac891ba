// ============================================================================
// HomeCare Core - Client Service
// File: crates/homecare-core/src/services/client_service.rs
// ============================================================================
//! Client records of the signed-in tenant

use std::cmp::Reverse;

use chrono::Utc;
use tracing::info;

use homecare_shared::constants::UNKNOWN_CLIENT_NAME;

use crate::domain::{CareLevel, Client, ClientDraft, ClientStatus};
use crate::error::DomainError;

use super::scope::TenantCollection;

/// Criteria for [`ClientService::search`]. `text` matches name or
/// description, ignoring case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub status: Option<ClientStatus>,
    pub care_level: Option<CareLevel>,
    pub text: Option<String>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        let text = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty());
        self.status.map_or(true, |s| client.status == s)
            && self.care_level.map_or(true, |l| client.care_level == l)
            && text.map_or(true, |t| {
                let needle = t.to_lowercase();
                client.name.to_lowercase().contains(&needle) || client.description.to_lowercase().contains(&needle)
            })
    }
}

pub struct ClientService {
    records: TenantCollection<Client>,
}

impl ClientService {
    pub fn new(records: TenantCollection<Client>) -> Self {
        Self { records }
    }

    /// Normalize and persist a client, returning the stored form.
    pub async fn save(&self, draft: ClientDraft) -> Result<Client, DomainError> {
        let actor = self.records.actor()?;
        let client = draft.into_client(&actor, Utc::now())?;

        self.records.put(&client).await?;
        info!("Client saved: {} ({})", client.name, client.id);
        Ok(client)
    }

    /// Care actions and scheduled tasks referencing the client are kept.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.records.delete(id).await?;
        info!("Client deleted: {}", id);
        Ok(())
    }

    pub fn list(&self) -> Vec<Client> {
        self.records.list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Client> {
        self.records.get_by_id(id)
    }

    /// Matching clients, newest first.
    pub fn search(&self, filter: &ClientFilter) -> Vec<Client> {
        let mut clients = self.records.filter(|c| filter.matches(c));
        clients.sort_by_key(|c| Reverse(c.created_at));
        clients
    }

    pub fn active(&self) -> Vec<Client> {
        self.records.filter(|c| c.status == ClientStatus::Active)
    }

    /// Name for display next to actions, tolerant of dangling references.
    pub fn display_name(&self, id: &str) -> String {
        self.get_by_id(id)
            .map(|c| c.name)
            .unwrap_or_else(|| UNKNOWN_CLIENT_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Collection;
    use crate::services::testing::{collection_with, fixture_context};
    use crate::repositories::MockTenantStore;

    #[tokio::test]
    async fn test_save_writes_normalized_record() {
        let mut store = MockTenantStore::new();
        store
            .expect_write()
            .withf(|tenant, collection, _id, record| {
                tenant == "Jess" && *collection == Collection::Clients && record["status"] == "active"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = ClientService::new(collection_with(store, fixture_context(), vec![]));
        let client = service.save(ClientDraft::new("A").with_location(1.0, 2.0)).await.unwrap();

        assert_eq!(client.last_modified_by, "Jess");
        assert_eq!(client.latitude, Some(1.0));
    }

    #[tokio::test]
    async fn test_save_rejects_blank_name_without_writing() {
        let mut store = MockTenantStore::new();
        store.expect_write().times(0);

        let service = ClientService::new(collection_with(store, fixture_context(), vec![]));
        let err = service.save(ClientDraft::new("   ")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_store_failure_is_returned() {
        let mut store = MockTenantStore::new();
        store
            .expect_write()
            .returning(|_, _, _, _| Err(DomainError::StoreError("offline".into())));

        let service = ClientService::new(collection_with(store, fixture_context(), vec![]));
        let err = service.save(ClientDraft::new("A")).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_display_name_falls_back() {
        let client = ClientDraft::new("Ana").into_client("Jess", Utc::now()).unwrap();
        let id = client.id.clone();
        let service = ClientService::new(collection_with(MockTenantStore::new(), fixture_context(), vec![client]));

        assert_eq!(service.display_name(&id), "Ana");
        assert_eq!(service.display_name("gone"), UNKNOWN_CLIENT_NAME);
    }

    #[test]
    fn test_search_filters_and_orders_newest_first() {
        let now = Utc::now();
        let mut ana = ClientDraft::new("Ana Silva").into_client("Jess", now - chrono::Duration::days(2)).unwrap();
        ana.description = "Needs walker".into();
        let mut bo = ClientDraft::new("Bo").into_client("Jess", now).unwrap();
        bo.care_level = CareLevel::Palliative;
        let mut cy = ClientDraft::new("Cy Walker").into_client("Jess", now - chrono::Duration::days(1)).unwrap();
        cy.status = ClientStatus::Discharged;
        let service = ClientService::new(collection_with(
            MockTenantStore::new(),
            fixture_context(),
            vec![ana.clone(), bo.clone(), cy.clone()],
        ));

        let walkers: Vec<_> = service
            .search(&ClientFilter {
                text: Some("WALKER".into()),
                ..Default::default()
            })
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(walkers, vec![cy.id.clone(), ana.id.clone()]);

        let active = service.search(&ClientFilter {
            status: Some(ClientStatus::Active),
            text: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(active.len(), 2);

        let palliative = service.search(&ClientFilter {
            care_level: Some(CareLevel::Palliative),
            ..Default::default()
        });
        assert_eq!(palliative, vec![bo]);
    }
}
