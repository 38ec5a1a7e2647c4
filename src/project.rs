//! Project entities for taba.
//!
//! A project groups tasks. Exactly one project can be "current"; tasks always
//! belong to a project via `project_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grouping of tasks with its own accent colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Accent color shown in the project switcher, `#rrggbb`.
    pub color: String,
    /// Optional board background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a new project with a fresh id and the current timestamp.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            board_color: None,
            created_at: Utc::now(),
        }
    }

    /// Merge a patch into this project. Unset fields are left alone.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(board_color) = patch.board_color {
            self.board_color = Some(board_color);
        }
    }
}

/// Partial update for a project. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub board_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let a = Project::new("Alpha", "#6366f1");
        let b = Project::new("Beta", "#FCD535");
        assert_ne!(a.id, b.id);
        assert!(a.board_color.is_none());
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut project = Project::new("Alpha", "#6366f1");
        let created = project.created_at;

        project.apply(ProjectPatch {
            name: Some("Renamed".to_string()),
            color: None,
            board_color: Some("#112233".to_string()),
        });

        assert_eq!(project.name, "Renamed");
        assert_eq!(project.color, "#6366f1");
        assert_eq!(project.board_color.as_deref(), Some("#112233"));
        assert_eq!(project.created_at, created);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let project = Project::new("Alpha", "#6366f1");
        let json = serde_json::to_value(&project).expect("serialize");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("boardColor").is_none());
    }
}
