// ============================================================================
// HomeCare Core - Tenant Session
// File: crates/homecare-core/src/services/session.rs
// Description: Live subscriptions and services for one signed-in tenant
// ============================================================================

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::{CareAction, CareTaskDefinition, Client, Employee, ScheduledTask, StoredRecord, TenantContext};
use crate::error::DomainError;
use crate::repositories::{validate_segment, TenantStore};

use super::care_action_service::CareActionService;
use super::care_task_service::CareTaskService;
use super::client_service::ClientService;
use super::dashboard::DashboardStats;
use super::employee_service::EmployeeService;
use super::scheduled_task_service::ScheduledTaskService;
use super::scope::{SessionScope, TenantCollection};
use super::sync::{spawn_listener, SyncedCollection};

struct Synced {
    clients: Arc<SyncedCollection<Client>>,
    actions: Arc<SyncedCollection<CareAction>>,
    tasks: Arc<SyncedCollection<ScheduledTask>>,
    employees: Arc<SyncedCollection<Employee>>,
    care_tasks: Arc<SyncedCollection<CareTaskDefinition>>,
}

/// Everything bound to one tenant between login and logout.
pub struct HomeCareSession {
    scope: Arc<SessionScope>,
    synced: Synced,
    listeners: Mutex<Vec<JoinHandle<()>>>,
    clients: ClientService,
    actions: Arc<CareActionService>,
    schedule: ScheduledTaskService,
    employees: EmployeeService,
    care_tasks: CareTaskService,
}

impl HomeCareSession {
    /// Subscribe every collection of the tenant, apply the initial snapshots
    /// and seed the care task catalog on first use.
    pub async fn start(store: Arc<dyn TenantStore>, context: TenantContext) -> Result<Self, DomainError> {
        validate_segment("tenant id", &context.tenant_id)?;
        info!("Starting session for {} (tenant {})", context.username, context.tenant_id);

        let scope = Arc::new(SessionScope::new(context));
        let synced = Synced {
            clients: Arc::new(SyncedCollection::new()),
            actions: Arc::new(SyncedCollection::new()),
            tasks: Arc::new(SyncedCollection::new()),
            employees: Arc::new(SyncedCollection::new()),
            care_tasks: Arc::new(SyncedCollection::new()),
        };

        let mut listeners = Vec::with_capacity(5);
        let tenant = scope.context().tenant_id.clone();
        let attached = async {
            listeners.push(attach(&store, &tenant, &synced.clients).await?);
            listeners.push(attach(&store, &tenant, &synced.actions).await?);
            listeners.push(attach(&store, &tenant, &synced.tasks).await?);
            listeners.push(attach(&store, &tenant, &synced.employees).await?);
            listeners.push(attach(&store, &tenant, &synced.care_tasks).await?);
            Ok::<_, DomainError>(())
        }
        .await;
        if let Err(e) = attached {
            listeners.iter().for_each(JoinHandle::abort);
            return Err(e);
        }

        let actions = Arc::new(CareActionService::new(
            TenantCollection::new(store.clone(), scope.clone(), synced.actions.clone()),
            synced.care_tasks.clone(),
        ));
        let session = Self {
            clients: ClientService::new(TenantCollection::new(store.clone(), scope.clone(), synced.clients.clone())),
            schedule: ScheduledTaskService::new(
                TenantCollection::new(store.clone(), scope.clone(), synced.tasks.clone()),
                actions.clone(),
            ),
            employees: EmployeeService::new(TenantCollection::new(store.clone(), scope.clone(), synced.employees.clone())),
            care_tasks: CareTaskService::new(TenantCollection::new(store.clone(), scope.clone(), synced.care_tasks.clone())),
            actions,
            scope,
            synced,
            listeners: Mutex::new(listeners),
        };

        if session.care_tasks.seed_defaults().await? > 0 {
            // Make the seeded catalog visible without waiting on the listener.
            let snapshot = store.read_once(&tenant, CareTaskDefinition::COLLECTION).await?;
            session.synced.care_tasks.apply_snapshot(&snapshot);
        }

        Ok(session)
    }

    pub fn context(&self) -> &TenantContext {
        self.scope.context()
    }

    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }

    pub fn clients(&self) -> &ClientService {
        &self.clients
    }

    pub fn care_actions(&self) -> &CareActionService {
        &self.actions
    }

    pub fn scheduled_tasks(&self) -> &ScheduledTaskService {
        &self.schedule
    }

    pub fn employees(&self) -> &EmployeeService {
        &self.employees
    }

    pub fn care_tasks(&self) -> &CareTaskService {
        &self.care_tasks
    }

    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(
            &self.clients.list(),
            &self.actions.list(),
            &self.schedule.list(),
            &self.employees.list(),
            today,
        )
    }

    /// Stop listening and drop every cached record. Calls made through this
    /// session afterwards fail with `NotAuthenticated`.
    pub fn teardown(&self) {
        self.scope.deactivate();
        for handle in self.listeners.lock().drain(..) {
            handle.abort();
        }
        self.synced.clients.clear();
        self.synced.actions.clear();
        self.synced.tasks.clear();
        self.synced.employees.clear();
        self.synced.care_tasks.clear();
        info!("Session for {} torn down", self.scope.context().username);
    }
}

impl fmt::Debug for HomeCareSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeCareSession")
            .field("username", &self.scope.context().username)
            .field("tenant_id", &self.scope.context().tenant_id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for HomeCareSession {
    fn drop(&mut self) {
        for handle in self.listeners.get_mut().drain(..) {
            handle.abort();
        }
    }
}

async fn attach<T: StoredRecord>(
    store: &Arc<dyn TenantStore>,
    tenant: &str,
    target: &Arc<SyncedCollection<T>>,
) -> Result<JoinHandle<()>, DomainError> {
    let mut stream = store.subscribe(tenant, T::COLLECTION).await.map_err(|e| {
        error!("Failed to subscribe to {} for tenant {}: {}", T::COLLECTION, tenant, e);
        e
    })?;
    if let Some(initial) = stream.next().await {
        target.apply_snapshot(&initial);
    }
    Ok(spawn_listener(stream, target.clone()))
}
