//! Domain services (business logic)

pub mod sync;
pub mod scope;
pub mod client_service;
pub mod care_action_service;
pub mod scheduled_task_service;
pub mod employee_service;
pub mod care_task_service;
pub mod dashboard;
pub mod auth_service;
pub mod session;
pub mod app;

#[cfg(test)]
pub(crate) mod testing;

pub use sync::{spawn_listener, SyncedCollection};
pub use scope::{SessionScope, TenantCollection};
pub use client_service::{ClientFilter, ClientService};
pub use care_action_service::{CareActionService, LogActionsRequest};
pub use scheduled_task_service::{ScheduleTasksRequest, ScheduledTaskFilter, ScheduledTaskService};
pub use employee_service::EmployeeService;
pub use care_task_service::CareTaskService;
pub use dashboard::DashboardStats;
pub use auth_service::{AuthGate, AuthState};
pub use session::HomeCareSession;
pub use app::HomeCareApp;
