//! In-memory entity store.
//!
//! Owns the three collections, the draft records bound to the create forms,
//! and the two pieces of UI state (active view and search query). Every
//! mutation goes through a method here; nothing else touches the collections.
//!
//! Create operations never report errors: an incomplete draft is ignored and
//! the method returns `None`.

use crate::draft::{ProjectDraft, TaskDraft, UserDraft};
use crate::project::{Project, PROJECT_STATUS_ACTIVE};
use crate::seed;
use crate::task::{Task, TaskStatus};
use crate::user::{Role, User};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which collection the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Tasks,
    Projects,
    Users,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Tasks, ActiveView::Projects, ActiveView::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Tasks => "tasks",
            ActiveView::Projects => "projects",
            ActiveView::Users => "users",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn cycle(self, direction: isize) -> ActiveView {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + direction).rem_euclid(len) as usize]
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveView {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tasks" => Ok(ActiveView::Tasks),
            "projects" => Ok(ActiveView::Projects),
            "users" => Ok(ActiveView::Users),
            other => Err(format!(
                "unknown view `{other}`; expected tasks|projects|users"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reject creates whose foreign keys point at nothing.
    pub enforce_references: bool,
}

#[derive(Debug, Default)]
pub struct EntityStore {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    users: Vec<User>,
    options: StoreOptions,
    pub task_draft: TaskDraft,
    pub project_draft: ProjectDraft,
    pub user_draft: UserDraft,
    pub active_view: ActiveView,
    pub search_query: String,
}

impl EntityStore {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Store preloaded with the two fixed records per collection.
    pub fn seeded(options: StoreOptions) -> Self {
        let mut store = Self::new(options);
        store.users = seed::users();
        store.projects = seed::projects();
        store.tasks = seed::tasks();
        info!(
            "event=store_seeded module=store status=ok users={} projects={} tasks={}",
            store.users.len(),
            store.projects.len(),
            store.tasks.len()
        );
        store
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Creates a task from `task_draft` and resets the draft.
    pub fn create_task(&mut self) -> Option<&Task> {
        let draft = &self.task_draft;
        if !draft.has_required_fields() {
            debug!("event=task_create module=store status=skip reason=missing_fields");
            return None;
        }
        let due_date = match draft.parsed_due_date() {
            Ok(due_date) => due_date,
            Err(err) => {
                debug!("event=task_create module=store status=skip reason=bad_due_date error={err}");
                return None;
            }
        };
        if self.options.enforce_references {
            if self.project_by_id(&draft.project_id).is_none() {
                warn!(
                    "event=task_create module=store status=skip reason=unknown_project project_id={}",
                    draft.project_id
                );
                return None;
            }
            if self.user_by_id(&draft.assignee_id).is_none() {
                warn!(
                    "event=task_create module=store status=skip reason=unknown_assignee assignee_id={}",
                    draft.assignee_id
                );
                return None;
            }
        }

        let draft = std::mem::take(&mut self.task_draft);
        let task = Task {
            id: next_id(),
            title: draft.title,
            description: draft.description,
            project_id: draft.project_id,
            assignee_id: draft.assignee_id,
            status: TaskStatus::Pending,
            priority: draft.priority,
            due_date,
            created_at: Utc::now(),
            tags: Vec::new(),
        };
        info!("event=task_create module=store status=ok task_id={}", task.id);
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Creates a project from `project_draft` and resets the draft.
    pub fn create_project(&mut self) -> Option<&Project> {
        let draft = &self.project_draft;
        if !draft.has_required_fields() {
            debug!("event=project_create module=store status=skip reason=missing_fields");
            return None;
        }
        if self.options.enforce_references && self.user_by_id(&draft.owner_id).is_none() {
            warn!(
                "event=project_create module=store status=skip reason=unknown_owner owner_id={}",
                draft.owner_id
            );
            return None;
        }

        let draft = std::mem::take(&mut self.project_draft);
        let project = Project {
            id: next_id(),
            name: draft.name,
            description: draft.description,
            members: vec![draft.owner_id.clone()],
            owner_id: draft.owner_id,
            status: PROJECT_STATUS_ACTIVE.to_string(),
            created_at: Utc::now(),
        };
        info!(
            "event=project_create module=store status=ok project_id={}",
            project.id
        );
        self.projects.push(project);
        self.projects.last()
    }

    /// Creates a user from `user_draft` and resets the draft.
    pub fn create_user(&mut self) -> Option<&User> {
        if !self.user_draft.has_required_fields() {
            debug!("event=user_create module=store status=skip reason=missing_fields");
            return None;
        }

        let draft = std::mem::take(&mut self.user_draft);
        let user = User {
            id: next_id(),
            username: draft.username,
            email: draft.email,
            role: draft.role,
            is_active: true,
            created_at: Utc::now(),
        };
        info!("event=user_create module=store status=ok user_id={}", user.id);
        self.users.push(user);
        self.users.last()
    }

    /// Replaces the status of one task. Unknown ids leave the store untouched.
    pub fn update_task_status(&mut self, task_id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.change_status(status);
                info!(
                    "event=task_status module=store status=ok task_id={task_id} new_status={status}"
                );
                true
            }
            None => {
                debug!("event=task_status module=store status=skip reason=not_found task_id={task_id}");
                false
            }
        }
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        let removed = self.tasks.len() != before;
        if removed {
            info!("event=task_delete module=store status=ok task_id={task_id}");
        } else {
            debug!("event=task_delete module=store status=skip reason=not_found task_id={task_id}");
        }
        removed
    }

    pub fn set_task_due_date(&mut self, task_id: &str, due_date: Option<NaiveDate>) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.set_due_date(due_date);
                true
            }
            None => false,
        }
    }

    pub fn add_task_tag(&mut self, task_id: &str, tag: &str) -> bool {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .is_some_and(|task| task.add_tag(tag))
    }

    /// Tasks whose title or description contains `query`, ignoring case.
    pub fn filtered_tasks(&self, query: &str) -> Vec<&Task> {
        let needle = query.to_lowercase();
        self.tasks.iter().filter(|t| t.matches(&needle)).collect()
    }

    /// `filtered_tasks` for the current search bar contents.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filtered_tasks(&self.search_query)
    }

    pub fn tasks_for_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect()
    }

    pub fn tasks_for_user(&self, user_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee_id == user_id)
            .collect()
    }

    pub fn project_task_count(&self, project_id: &str) -> usize {
        self.tasks_for_project(project_id).len()
    }

    pub fn user_task_count(&self, user_id: &str) -> usize {
        self.tasks_for_user(user_id).len()
    }

    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_overdue(today)).collect()
    }

    pub fn deactivate_user(&mut self, user_id: &str) -> bool {
        match self.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.deactivate();
                info!("event=user_deactivate module=store status=ok user_id={user_id}");
                true
            }
            None => false,
        }
    }

    pub fn change_user_role(&mut self, user_id: &str, role: Role) -> bool {
        match self.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.change_role(role);
                info!("event=user_role module=store status=ok user_id={user_id} role={role}");
                true
            }
            None => false,
        }
    }

    pub fn add_project_member(&mut self, project_id: &str, user_id: &str) -> bool {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .is_some_and(|project| project.add_member(user_id))
    }

    pub fn remove_project_member(&mut self, project_id: &str, user_id: &str) -> bool {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .is_some_and(|project| project.remove_member(user_id))
    }
}

fn next_id() -> String {
    Uuid::new_v4().to_string()
}
