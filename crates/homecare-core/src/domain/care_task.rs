//! Care task catalog entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Collection, StoredRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Medical Care")]
    MedicalCare,
    #[serde(rename = "Daily Living")]
    DailyLiving,
    #[serde(rename = "Emotional Support")]
    EmotionalSupport,
    #[serde(rename = "Safety & Monitoring")]
    SafetyMonitoring,
    #[serde(rename = "Specialized Care")]
    SpecializedCare,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::PersonalCare,
        TaskCategory::MedicalCare,
        TaskCategory::DailyLiving,
        TaskCategory::EmotionalSupport,
        TaskCategory::SafetyMonitoring,
        TaskCategory::SpecializedCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::PersonalCare => "Personal Care",
            TaskCategory::MedicalCare => "Medical Care",
            TaskCategory::DailyLiving => "Daily Living",
            TaskCategory::EmotionalSupport => "Emotional Support",
            TaskCategory::SafetyMonitoring => "Safety & Monitoring",
            TaskCategory::SpecializedCare => "Specialized Care",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Reference entry describing a kind of task, not a performed instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTaskDefinition {
    pub id: u32,
    pub name: String,
    pub category: TaskCategory,
    pub common: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl StoredRecord for CareTaskDefinition {
    const COLLECTION: Collection = Collection::CareTasks;

    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

use self::TaskCategory::*;

/// Catalog seeded into every new tenant.
pub const DEFAULT_CARE_TASKS: &[(u32, &str, TaskCategory, bool, &str)] = &[
    (1, "Personal Hygiene Assistance", PersonalCare, true, "Assist with daily hygiene routines"),
    (2, "Bathing Assistance", PersonalCare, true, "Help with bathing and showering"),
    (3, "Dressing Assistance", PersonalCare, true, "Help with getting dressed and undressed"),
    (4, "Grooming Assistance", PersonalCare, true, "Assist with hair care, shaving, and grooming"),
    (5, "Toileting Assistance", PersonalCare, true, "Help with bathroom needs"),
    (6, "Mobility Assistance", PersonalCare, true, "Help with walking and movement"),
    (101, "Medication Administration", MedicalCare, true, "Administer prescribed medications"),
    (102, "Vital Signs Check", MedicalCare, true, "Monitor blood pressure, pulse, temperature"),
    (103, "Blood Pressure Monitoring", MedicalCare, true, "Regular blood pressure checks"),
    (104, "Blood Sugar Testing", MedicalCare, true, "Monitor blood glucose levels"),
    (105, "Wound Care", MedicalCare, false, "Clean and dress wounds"),
    (106, "Injection Administration", MedicalCare, false, "Give injections as prescribed"),
    (107, "Physical Therapy Exercises", MedicalCare, false, "Assist with prescribed exercises"),
    (108, "Respiratory Care", MedicalCare, false, "Assist with breathing treatments"),
    (201, "Meal Preparation", DailyLiving, true, "Prepare nutritious meals"),
    (202, "Feeding Assistance", DailyLiving, true, "Help with eating and drinking"),
    (203, "Housekeeping", DailyLiving, true, "Light housekeeping tasks"),
    (204, "Laundry", DailyLiving, true, "Wash and fold clothes"),
    (205, "Shopping", DailyLiving, true, "Grocery and personal shopping"),
    (206, "Transportation", DailyLiving, true, "Transport to appointments"),
    (207, "Appointment Scheduling", DailyLiving, true, "Schedule medical appointments"),
    (208, "Medication Pickup", DailyLiving, true, "Pick up prescriptions"),
    (301, "Companionship", EmotionalSupport, true, "Provide social interaction and companionship"),
    (302, "Social Activities", EmotionalSupport, true, "Engage in recreational activities"),
    (303, "Mental Health Check", EmotionalSupport, true, "Monitor emotional well-being"),
    (304, "Family Communication", EmotionalSupport, false, "Facilitate family communication"),
    (305, "Crisis Intervention", EmotionalSupport, false, "Provide crisis support"),
    (401, "Safety Assessment", SafetyMonitoring, true, "Assess home safety conditions"),
    (402, "Fall Risk Assessment", SafetyMonitoring, true, "Evaluate fall risk factors"),
    (403, "Home Safety Check", SafetyMonitoring, true, "Check for safety hazards"),
    (404, "Emergency Response", SafetyMonitoring, false, "Respond to emergency situations"),
    (405, "Security Check", SafetyMonitoring, false, "Verify home security"),
    (501, "Dementia Care", SpecializedCare, false, "Specialized dementia support"),
    (502, "Alzheimer's Support", SpecializedCare, false, "Alzheimer's specific care"),
    (503, "Disability Support", SpecializedCare, false, "Support for physical disabilities"),
    (504, "Palliative Care", SpecializedCare, false, "End-of-life comfort care"),
    (505, "Hospice Support", SpecializedCare, false, "Hospice care assistance"),
    (506, "Rehabilitation Support", SpecializedCare, false, "Post-injury rehabilitation"),
];

pub fn default_catalog() -> Vec<CareTaskDefinition> {
    DEFAULT_CARE_TASKS
        .iter()
        .map(|&(id, name, category, common, description)| CareTaskDefinition {
            id,
            name: name.to_string(),
            category,
            common,
            description: description.to_string(),
            created_at: None,
            created_by: None,
        })
        .collect()
}
