//! Subcommand definitions and handlers

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;

use homecare_core::services::{
    ClientFilter, HomeCareApp, HomeCareSession, LogActionsRequest, ScheduleTasksRequest, ScheduledTaskFilter,
};
use homecare_core::{
    CareLevel, ClientDraft, ClientStatus, EmployeeDraft, Priority, Role, ScheduledTaskDraft,
    TaskCategory, TaskStatus,
};
use homecare_infrastructure::FileSessionStorage;
use homecare_shared::constants::RECENT_ACTIONS_LIMIT;
use homecare_shared::hhmm;

use crate::credentials::LoginProvider;

pub type App = HomeCareApp<LoginProvider, FileSessionStorage>;

#[derive(Subcommand)]
pub enum ClientCommand {
    List {
        #[arg(long, value_parser = parse_client_status)]
        status: Option<ClientStatus>,
        #[arg(long, value_parser = parse_care_level)]
        care_level: Option<CareLevel>,
        /// Matches name or description
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long, value_parser = parse_client_status)]
        status: Option<ClientStatus>,
        #[arg(long, value_parser = parse_care_level)]
        care_level: Option<CareLevel>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ActionCommand {
    /// Newest first
    List {
        #[arg(long)]
        client: Option<String>,
    },
    /// Log one action per catalog task id
    Log {
        #[arg(long)]
        client: String,
        #[arg(long = "task", required = true)]
        tasks: Vec<u32>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// HH:MM, defaults to now
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    List {
        #[arg(long)]
        client: Option<String>,
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// YYYY-MM-DD, inclusive
        #[arg(long)]
        from: Option<String>,
        /// YYYY-MM-DD, inclusive
        #[arg(long)]
        to: Option<String>,
    },
    /// Open tasks scheduled before today
    Overdue,
    Add {
        #[arg(long)]
        client: String,
        #[arg(long)]
        task: u32,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Schedule several catalog tasks at one slot
    Plan {
        #[arg(long)]
        client: String,
        #[arg(long = "task", required = true)]
        tasks: Vec<u32>,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        notes: Option<String>,
    },
    Cancel { id: String },
    /// Log the task as a care action and remove it
    Complete {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    List,
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
    },
    Delete { id: String },
}

pub async fn login(app: &App, username: &str, password: &str) -> anyhow::Result<()> {
    let session = app.login(username, password).await?;
    let ctx = session.context();
    println!("Signed in as {} (tenant {})", ctx.display_name, ctx.tenant_id);
    Ok(())
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    app.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    let session = open(app).await?;
    let ctx = session.context();
    println!("{}  user={} tenant={} role={}", ctx.display_name, ctx.username, ctx.tenant_id, ctx.role.as_str());
    Ok(())
}

pub async fn clients(app: &App, command: ClientCommand) -> anyhow::Result<()> {
    let session = open(app).await?;
    let service = session.clients();

    match command {
        ClientCommand::List { status, care_level, search } => {
            let filter = ClientFilter {
                status,
                care_level,
                text: search,
            };
            for c in service.search(&filter) {
                let recent = session.care_actions().recent_for_client(&c.id, RECENT_ACTIONS_LIMIT);
                println!(
                    "{}  {:<24} {:<10} {:<11} recent actions: {}",
                    c.id,
                    c.name,
                    c.status.as_str(),
                    c.care_level.as_str(),
                    recent.len()
                );
            }
        }
        ClientCommand::Add { name, age, status, care_level, address, phone, lat, lng, notes } => {
            let draft = ClientDraft {
                name,
                age,
                status,
                care_level,
                address,
                phone,
                latitude: lat,
                longitude: lng,
                notes,
                ..Default::default()
            };
            let client = service.save(draft).await?;
            println!("Saved client {} ({})", client.name, client.id);
        }
        ClientCommand::Delete { id } => {
            service.delete(&id).await?;
            println!("Deleted client {}", id);
        }
    }
    Ok(())
}

pub async fn actions(app: &App, command: ActionCommand) -> anyhow::Result<()> {
    let session = open(app).await?;
    let service = session.care_actions();

    match command {
        ActionCommand::List { client } => {
            let actions = match client {
                Some(id) => service.recent_for_client(&id, usize::MAX),
                None => service.sorted_newest_first(),
            };
            for a in actions {
                println!(
                    "{}  {} {}  {:<28} {:<16} {:<9} {}",
                    a.id,
                    a.date,
                    a.time.format(hhmm::FORMAT),
                    a.task_name,
                    session.clients().display_name(&a.client_id),
                    a.status.as_str(),
                    a.notes
                );
            }
        }
        ActionCommand::Log { client, tasks, date, time, notes, priority } => {
            let request = LogActionsRequest {
                client_id: client,
                task_ids: tasks,
                date: Some(date.as_deref().map(parse_date).transpose()?.unwrap_or_else(today)),
                time: time.as_deref().map(parse_time).transpose()?,
                notes,
                priority,
            };
            for action in service.log_tasks(request).await? {
                println!("Logged {} ({})", action.task_name, action.id);
            }
        }
        ActionCommand::Delete { id } => {
            service.delete(&id).await?;
            println!("Deleted care action {}", id);
        }
    }
    Ok(())
}

pub async fn schedule(app: &App, command: ScheduleCommand) -> anyhow::Result<()> {
    let session = open(app).await?;
    let service = session.scheduled_tasks();

    match command {
        ScheduleCommand::List { client, status, priority, from, to } => {
            let filter = ScheduledTaskFilter {
                client_id: client,
                status,
                priority,
                from: from.as_deref().map(parse_date).transpose()?,
                to: to.as_deref().map(parse_date).transpose()?,
            };
            print_tasks(&session, service.search(&filter));
        }
        ScheduleCommand::Overdue => print_tasks(&session, service.overdue(today())),
        ScheduleCommand::Plan { client, tasks, date, time, priority, notes } => {
            let request = ScheduleTasksRequest {
                client_id: client,
                task_ids: tasks,
                date: parse_date(&date)?,
                time: parse_time(&time)?,
                priority,
                notes,
            };
            let scheduled = service.schedule_tasks(request).await?;
            println!("{} tasks scheduled", scheduled.len());
        }
        ScheduleCommand::Cancel { id } => {
            let task = service.cancel(&id).await?;
            println!("Cancelled {} ({})", task.task_name, task.id);
        }
        ScheduleCommand::Add { client, task, date, time, priority, notes } => {
            let definition = session
                .care_tasks()
                .get_by_id(task)
                .ok_or_else(|| anyhow!("unknown care task id {}", task))?;
            let mut draft = ScheduledTaskDraft::for_task(client, &definition, parse_date(&date)?, parse_time(&time)?);
            draft.priority = priority;
            draft.notes = notes;
            let saved = service.save(draft).await?;
            println!("Scheduled {} on {} ({})", saved.task_name, saved.scheduled_date, saved.id);
        }
        ScheduleCommand::Complete { id, notes } => {
            let action = service.complete(&id, notes.as_deref()).await?;
            println!("Completed as care action {}", action.id);
        }
        ScheduleCommand::Delete { id } => {
            service.delete(&id).await?;
            println!("Deleted scheduled task {}", id);
        }
    }
    Ok(())
}

pub async fn employees(app: &App, command: EmployeeCommand) -> anyhow::Result<()> {
    let session = open(app).await?;
    let service = session.employees();

    match command {
        EmployeeCommand::List => {
            for e in service.list() {
                println!("{}  {:<24} {:<10} {}", e.id, e.full_name(), e.role.as_str(), e.email);
            }
        }
        EmployeeCommand::Add { username, first_name, last_name, email, role } => {
            let draft = EmployeeDraft {
                first_name,
                last_name,
                email,
                role,
                ..EmployeeDraft::new(username)
            };
            let employee = service.save(draft).await?;
            println!("Saved employee {} ({})", employee.full_name(), employee.id);
        }
        EmployeeCommand::Delete { id } => {
            service.delete(&id).await?;
            println!("Deleted employee {}", id);
        }
    }
    Ok(())
}

pub async fn catalog(app: &App, common: bool, category: Option<&str>) -> anyhow::Result<()> {
    let session = open(app).await?;
    let service = session.care_tasks();

    let mut tasks = match category {
        Some(label) => {
            let category = TaskCategory::from_str(label).ok_or_else(|| anyhow!("unknown category '{}'", label))?;
            service.by_category(category)
        }
        None => service.list(),
    };
    if common {
        tasks.retain(|t| t.common);
    }
    for t in tasks {
        println!("{:>4}  {:<32} {:<20} {}", t.id, t.name, t.category.as_str(), t.description);
    }
    Ok(())
}

pub async fn stats(app: &App, date: Option<&str>) -> anyhow::Result<()> {
    let session = open(app).await?;
    let day = date.map(parse_date).transpose()?.unwrap_or_else(today);
    println!("{}", serde_json::to_string_pretty(&session.stats(day))?);
    Ok(())
}

fn print_tasks(session: &HomeCareSession, tasks: Vec<homecare_core::ScheduledTask>) {
    for t in tasks {
        println!(
            "{}  {} {}  {:<28} {:<16} {:<7} {}",
            t.id,
            t.scheduled_date,
            t.scheduled_time.format(hhmm::FORMAT),
            t.task_name,
            session.clients().display_name(&t.client_id),
            t.priority.as_str(),
            t.status.as_str()
        );
    }
}

async fn open(app: &App) -> anyhow::Result<Arc<HomeCareSession>> {
    match app.restore_session().await? {
        Some(session) => Ok(session),
        None => bail!("not signed in; run `homecare login` first"),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date '{}'", raw))
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    hhmm::parse(raw).with_context(|| format!("invalid time '{}'", raw))
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::from_str(raw).ok_or_else(|| format!("expected normal, high or urgent, got '{}'", raw))
}

fn parse_task_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(raw).ok_or_else(|| format!("unknown task status '{}'", raw))
}

fn parse_client_status(raw: &str) -> Result<ClientStatus, String> {
    ClientStatus::from_str(raw).ok_or_else(|| format!("unknown client status '{}'", raw))
}

fn parse_care_level(raw: &str) -> Result<CareLevel, String> {
    CareLevel::from_str(raw).ok_or_else(|| format!("unknown care level '{}'", raw))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::from_str(raw).ok_or_else(|| format!("unknown role '{}'", raw))
}
