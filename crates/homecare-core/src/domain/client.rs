// ============================================================================
// HomeCare Core - Client Entity
// File: crates/homecare-core/src/domain/client.rs
// Description: Care recipient with status, care level and location
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use homecare_shared::{new_id, EntityId};

use super::{blank_to_default, require_text, Collection, StoredRecord};
use crate::error::DomainError;

/// Client status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
    Discharged,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Discharged => "discharged",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ClientStatus::Active),
            "inactive" => Some(ClientStatus::Inactive),
            "discharged" => Some(ClientStatus::Discharged),
            _ => None,
        }
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

/// Care level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    Standard,
    Intensive,
    Specialized,
    Palliative,
}

impl CareLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareLevel::Standard => "standard",
            CareLevel::Intensive => "intensive",
            CareLevel::Specialized => "specialized",
            CareLevel::Palliative => "palliative",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(CareLevel::Standard),
            "intensive" => Some(CareLevel::Intensive),
            "specialized" => Some(CareLevel::Specialized),
            "palliative" => Some(CareLevel::Palliative),
            _ => None,
        }
    }
}

impl Default for CareLevel {
    fn default() -> Self {
        CareLevel::Standard
    }
}

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,

    #[validate(length(min = 1, max = 200, message = "Client name must be between 1 and 200 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub care_level: CareLevel,
    #[serde(default)]
    pub medical_conditions: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[serde(default)]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_by: String,
    pub last_modified_at: DateTime<Utc>,
}

impl StoredRecord for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn record_id(&self) -> String {
        self.id.clone()
    }
}

/// Caller-supplied client fields; unset fields take their defaults on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    pub age: Option<u32>,
    pub status: Option<ClientStatus>,
    pub care_level: Option<CareLevel>,
    pub medical_conditions: Option<String>,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Fill defaults, assign an id when absent and stamp attribution.
    pub fn into_client(self, modified_by: &str, now: DateTime<Utc>) -> Result<Client, DomainError> {
        require_text(&self.name, "Client name is required")?;

        let client = Client {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id),
            name: self.name,
            description: blank_to_default(self.description),
            age: self.age,
            status: self.status.unwrap_or_default(),
            care_level: self.care_level.unwrap_or_default(),
            medical_conditions: blank_to_default(self.medical_conditions),
            emergency_contact: blank_to_default(self.emergency_contact),
            address: blank_to_default(self.address),
            latitude: self.latitude,
            longitude: self.longitude,
            phone: blank_to_default(self.phone),
            email: blank_to_default(self.email),
            notes: blank_to_default(self.notes),
            created_at: self.created_at.unwrap_or(now),
            last_modified_by: modified_by.to_string(),
            last_modified_at: now,
        };

        client.validate()?;
        Ok(client)
    }
}

impl From<Client> for ClientDraft {
    fn from(client: Client) -> Self {
        Self {
            id: Some(client.id),
            name: client.name,
            description: Some(client.description),
            age: client.age,
            status: Some(client.status),
            care_level: Some(client.care_level),
            medical_conditions: Some(client.medical_conditions),
            emergency_contact: Some(client.emergency_contact),
            address: Some(client.address),
            latitude: client.latitude,
            longitude: client.longitude,
            phone: Some(client.phone),
            email: Some(client.email),
            notes: Some(client.notes),
            created_at: Some(client.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let now = Utc::now();
        let client = ClientDraft::new("A")
            .with_location(1.0, 2.0)
            .into_client("Jess", now)
            .unwrap();

        assert!(!client.id.is_empty());
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.care_level, CareLevel::Standard);
        assert_eq!(client.description, "");
        assert_eq!(client.age, None);
        assert_eq!(client.latitude, Some(1.0));
        assert_eq!(client.longitude, Some(2.0));
        assert_eq!(client.created_at, now);
        assert_eq!(client.last_modified_by, "Jess");
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = ClientDraft::new("   ").into_client("Jess", Utc::now()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let err = ClientDraft::new("A")
            .with_location(120.0, 2.0)
            .into_client("Jess", Utc::now())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_edit_keeps_id_and_created_at() {
        let created = Utc::now() - chrono::Duration::days(3);
        let original = ClientDraft {
            id: Some("client-1".into()),
            created_at: Some(created),
            ..ClientDraft::new("A")
        }
        .into_client("Jess", created)
        .unwrap();

        let mut draft = ClientDraft::from(original.clone());
        draft.notes = Some("moved".into());
        let edited = draft.into_client("GBTech", Utc::now()).unwrap();

        assert_eq!(edited.id, "client-1");
        assert_eq!(edited.created_at, created);
        assert_eq!(edited.last_modified_by, "GBTech");
        assert_eq!(edited.notes, "moved");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let client = ClientDraft::new("A").into_client("Jess", Utc::now()).unwrap();
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["careLevel"], "standard");
        assert_eq!(value["status"], "active");
        assert!(value.get("lastModifiedBy").is_some());
        assert!(value["latitude"].is_null());
    }
}
