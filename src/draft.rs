//! Form values for entities that have not been created yet.
//!
//! Drafts hold raw text the way the user typed it; the store decides whether
//! a draft is complete enough to become an entity.

use crate::task::Priority;
use crate::user::Role;
use chrono::format::ParseError;
use chrono::NaiveDate;

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub assignee_id: String,
    pub priority: Priority,
    /// `YYYY-MM-DD` or empty.
    pub due_date: String,
}

impl TaskDraft {
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && !self.project_id.is_empty()
            && !self.assignee_id.is_empty()
    }

    /// `Ok(None)` for an empty field, `Err` when the text is not a date.
    pub fn parsed_due_date(&self) -> Result<Option<NaiveDate>, ParseError> {
        let raw = self.due_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).map(Some)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub owner_id: String,
}

impl ProjectDraft {
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty() && !self.owner_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl UserDraft {
    pub fn has_required_fields(&self) -> bool {
        !self.username.is_empty() && !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_empty_form() {
        let draft = TaskDraft::default();
        assert_eq!(draft.priority, Priority::Medium);
        assert!(!draft.has_required_fields());
        assert_eq!(UserDraft::default().role, Role::User);
    }

    #[test]
    fn due_date_parsing() {
        let mut draft = TaskDraft::default();
        assert_eq!(draft.parsed_due_date(), Ok(None));
        draft.due_date = "2024-02-01".to_string();
        assert_eq!(
            draft.parsed_due_date(),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 1))
        );
        draft.due_date = "next week".to_string();
        assert!(draft.parsed_due_date().is_err());
    }

    #[test]
    fn user_draft_only_needs_username_and_email() {
        let draft = UserDraft {
            username: "new_user".to_string(),
            email: "newuser@example.com".to_string(),
            role: Role::default(),
        };
        assert!(draft.has_required_fields());
    }
}
