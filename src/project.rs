use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PROJECT_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub status: String, // "active"
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Project {
    /// Adds a member once. Returns whether membership changed.
    pub fn add_member(&mut self, user_id: &str) -> bool {
        if self.members.iter().any(|m| m == user_id) {
            return false;
        }
        self.members.push(user_id.to_string());
        true
    }

    /// Removes a member. The owner always stays.
    pub fn remove_member(&mut self, user_id: &str) -> bool {
        if user_id == self.owner_id {
            return false;
        }
        let before = self.members.len();
        self.members.retain(|m| m != user_id);
        self.members.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: "p1".to_string(),
            name: "Test Project".to_string(),
            description: "Test Description".to_string(),
            owner_id: "owner123".to_string(),
            status: PROJECT_STATUS_ACTIVE.to_string(),
            created_at: Utc::now(),
            members: vec!["owner123".to_string()],
        }
    }

    #[test]
    fn add_member_is_idempotent() {
        let mut project = project();
        assert!(project.add_member("member123"));
        assert!(!project.add_member("member123"));
        assert_eq!(project.members.len(), 2);
    }

    #[test]
    fn owner_cannot_be_removed() {
        let mut project = project();
        project.add_member("member123");
        assert!(!project.remove_member("owner123"));
        assert!(project.remove_member("member123"));
        assert_eq!(project.members, vec!["owner123".to_string()]);
    }
}
