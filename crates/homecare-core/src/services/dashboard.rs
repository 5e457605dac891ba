//! Summary counts for the signed-in tenant

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{CareAction, Client, ClientStatus, Employee, ScheduledTask};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_actions: usize,
    pub actions_today: usize,
    pub pending_tasks: usize,
    pub urgent_tasks: usize,
    pub employees: usize,
}

impl DashboardStats {
    pub fn compute(
        clients: &[Client],
        actions: &[CareAction],
        tasks: &[ScheduledTask],
        employees: &[Employee],
        today: NaiveDate,
    ) -> Self {
        Self {
            total_clients: clients.len(),
            active_clients: clients.iter().filter(|c| c.status == ClientStatus::Active).count(),
            total_actions: actions.len(),
            actions_today: actions.iter().filter(|a| a.date == today).count(),
            pending_tasks: tasks.iter().filter(|t| t.is_pending()).count(),
            urgent_tasks: tasks.iter().filter(|t| t.is_urgent_pending()).count(),
            employees: employees.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_catalog, CareActionDraft, ClientDraft, Priority, ScheduledTaskDraft, TaskStatus};
    use chrono::{NaiveTime, Utc};

    #[test]
    fn test_compute() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let task = default_catalog().remove(0);

        let mut discharged = ClientDraft::new("B");
        discharged.status = Some(ClientStatus::Discharged);
        let clients = vec![
            ClientDraft::new("A").into_client("Jess", Utc::now()).unwrap(),
            discharged.into_client("Jess", Utc::now()).unwrap(),
        ];

        let actions = vec![
            CareActionDraft::for_task("c1", &task, today).into_action("Jess", Utc::now()).unwrap(),
            CareActionDraft::for_task("c1", &task, yesterday).into_action("Jess", Utc::now()).unwrap(),
        ];

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let mut urgent = ScheduledTaskDraft::for_task("c1", &task, today, noon);
        urgent.priority = Some(Priority::Urgent);
        let mut done = ScheduledTaskDraft::for_task("c1", &task, today, noon);
        done.status = Some(TaskStatus::Completed);
        done.priority = Some(Priority::Urgent);
        let tasks = vec![
            urgent.into_task("Jess", Utc::now()).unwrap(),
            ScheduledTaskDraft::for_task("c1", &task, today, noon).into_task("Jess", Utc::now()).unwrap(),
            done.into_task("Jess", Utc::now()).unwrap(),
        ];

        let stats = DashboardStats::compute(&clients, &actions, &tasks, &[], today);
        assert_eq!(
            stats,
            DashboardStats {
                total_clients: 2,
                active_clients: 1,
                total_actions: 2,
                actions_today: 1,
                pending_tasks: 2,
                urgent_tasks: 1,
                employees: 0,
            }
        );
    }
}
