//! Fixed demo records loaded when the store starts.

use crate::project::{Project, PROJECT_STATUS_ACTIVE};
use crate::task::{Priority, Task, TaskStatus};
use crate::user::{Role, User};
use chrono::{NaiveDate, Utc};

pub fn users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: "1".to_string(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            role: Role::Admin,
            is_active: true,
            created_at: now,
        },
        User {
            id: "2".to_string(),
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::User,
            is_active: true,
            created_at: now,
        },
    ]
}

pub fn projects() -> Vec<Project> {
    let now = Utc::now();
    vec![
        Project {
            id: "1".to_string(),
            name: "Website Redesign".to_string(),
            description: "Redesign company website".to_string(),
            owner_id: "1".to_string(),
            status: PROJECT_STATUS_ACTIVE.to_string(),
            created_at: now,
            members: vec!["1".to_string()],
        },
        Project {
            id: "2".to_string(),
            name: "Mobile App".to_string(),
            description: "Develop mobile application".to_string(),
            owner_id: "2".to_string(),
            status: PROJECT_STATUS_ACTIVE.to_string(),
            created_at: now,
            members: vec!["2".to_string()],
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    let now = Utc::now();
    vec![
        Task {
            id: "1".to_string(),
            title: "Design Homepage".to_string(),
            description: "Create new homepage design".to_string(),
            project_id: "1".to_string(),
            assignee_id: "2".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            created_at: now,
            tags: Vec::new(),
        },
        Task {
            id: "2".to_string(),
            title: "Implement Navigation".to_string(),
            description: "Build navigation menu".to_string(),
            project_id: "1".to_string(),
            assignee_id: "1".to_string(),
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            created_at: now,
            tags: Vec::new(),
        },
    ]
}
