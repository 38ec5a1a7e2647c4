//! Board store: the single source of truth for projects, tasks, and the
//! current-project pointer.
//!
//! Every mutation appends exactly one activity entry synchronously, then
//! publishes a [`BoardEvent`] to registered observers, then persists the
//! board and activity snapshots when the store is storage-backed.
//!
//! Unknown-id mutations are silent no-ops: no state change, no activity
//! entry, no event. Callers that want an error check existence first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::{Activity, ActivityAction, ActivityLog};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::events::{BoardEvent, BoardEventKind, BoardObserver};
use crate::project::{Project, ProjectPatch};
use crate::storage::Storage;
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

pub const BOARD_SCHEMA_VERSION: &str = "taba.board.v1";
pub const ACTIVITY_SCHEMA_VERSION: &str = "taba.activity.v1";

/// Persisted board state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub current_project_id: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            projects: Vec::new(),
            current_project_id: None,
            tasks: Vec::new(),
        }
    }
}

/// Persisted activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub entries: Vec<Activity>,
}

/// The task/project state store.
pub struct BoardStore {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    current_project_id: Option<String>,
    log: ActivityLog,
    observers: Vec<Box<dyn BoardObserver>>,
    storage: Option<Storage>,
    config: BoardConfig,
}

impl BoardStore {
    /// Create an empty in-memory store. Nothing is persisted.
    pub fn in_memory(config: BoardConfig) -> Self {
        Self {
            projects: Vec::new(),
            tasks: Vec::new(),
            current_project_id: None,
            log: ActivityLog::new(),
            observers: Vec::new(),
            storage: None,
            config,
        }
    }

    /// Load a storage-backed store, running rehydration migration once.
    ///
    /// Missing or unreadable snapshots start the board empty.
    pub fn load(storage: Storage, config: BoardConfig) -> Result<Self> {
        storage.init()?;

        let snapshot: BoardSnapshot = storage
            .read_json_opt(&storage.board_file())
            .unwrap_or_else(BoardSnapshot::empty);
        let activity: Option<ActivitySnapshot> = storage.read_json_opt(&storage.activity_file());

        let mut store = Self {
            projects: snapshot.projects,
            tasks: snapshot.tasks,
            current_project_id: snapshot.current_project_id,
            log: ActivityLog::from_entries(
                activity.map(|snap| snap.entries).unwrap_or_default(),
            ),
            observers: Vec::new(),
            storage: Some(storage),
            config,
        };

        if store.migrate() {
            store.persist()?;
        }
        Ok(store)
    }

    /// Register an observer for subsequent mutations.
    pub fn add_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project_id.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks belonging to the current project.
    pub fn current_tasks(&self) -> Vec<&Task> {
        match self.current_project_id.as_deref() {
            Some(id) => self.tasks.iter().filter(|t| t.project_id == id).collect(),
            None => Vec::new(),
        }
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }

    // =========================================================================
    // Project mutations
    // =========================================================================

    /// Create a project. Becomes current when no project is selected.
    pub fn add_project(&mut self, name: &str, color: &str) -> Result<Project> {
        let project = Project::new(name, color);
        debug!(project_id = %project.id, name, "adding project");

        self.projects.push(project.clone());
        if self.current_project_id.is_none() {
            self.current_project_id = Some(project.id.clone());
        }

        self.record(
            ActivityAction::Create,
            format!("Created project \"{name}\""),
        );
        self.publish(
            BoardEventKind::ProjectCreated,
            serde_json::json!({ "projectId": project.id, "name": name }),
        );
        self.persist()?;
        Ok(project)
    }

    /// Merge a patch into a project. Unknown ids are silent no-ops.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Result<bool> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        debug!(project_id = %id, "updating project");
        project.apply(patch);

        self.record(ActivityAction::Edit, "Updated project");
        self.publish(
            BoardEventKind::ProjectEdited,
            serde_json::json!({ "projectId": id }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Delete a project and cascade-delete its tasks in one transition.
    ///
    /// When the deleted project was current, the first remaining project
    /// (or none) becomes current. Unknown ids are silent no-ops.
    pub fn delete_project(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let project = self.projects.remove(index);
        debug!(project_id = %id, name = %project.name, "deleting project");

        self.tasks.retain(|t| t.project_id != id);
        if self.current_project_id.as_deref() == Some(id) {
            self.current_project_id = self.projects.first().map(|p| p.id.clone());
        }

        self.record(
            ActivityAction::Delete,
            format!("Deleted project \"{}\"", project.name),
        );
        self.publish(
            BoardEventKind::ProjectDeleted,
            serde_json::json!({ "projectId": id, "name": project.name }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Switch the current project. Unknown ids are ignored so the pointer
    /// always stays valid. Not logged as activity.
    pub fn set_current_project(&mut self, id: &str) -> Result<bool> {
        if self.project(id).is_none() {
            return Ok(false);
        }
        if self.current_project_id.as_deref() == Some(id) {
            return Ok(true);
        }
        self.current_project_id = Some(id.to_string());

        self.publish(
            BoardEventKind::ProjectSelected,
            serde_json::json!({ "projectId": id }),
        );
        self.persist()?;
        Ok(true)
    }

    // =========================================================================
    // Task mutations
    // =========================================================================

    /// Create a task in the current project, synthesizing a default project
    /// first when none exists. Exactly one activity entry either way.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let project_id = self.ensure_current_project();
        let title = draft.title.clone();
        let task = Task::from_draft(draft, project_id);
        debug!(task_id = %task.id, %title, "adding task");
        self.tasks.push(task.clone());

        self.record(ActivityAction::Create, format!("Created task \"{title}\""));
        self.publish(
            BoardEventKind::TaskCreated,
            serde_json::json!({ "taskId": task.id, "title": title }),
        );
        self.persist()?;
        Ok(task)
    }

    /// Merge a patch into a task. Unknown ids are silent no-ops. The
    /// activity entry carries the pre-mutation title.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        let title = task.title.clone();
        debug!(task_id = %id, "updating task");
        task.apply(patch);

        self.record(ActivityAction::Edit, format!("Updated task \"{title}\""));
        self.publish(
            BoardEventKind::TaskEdited,
            serde_json::json!({ "taskId": id }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Remove a task. Unknown ids are silent no-ops.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let task = self.tasks.remove(index);
        debug!(task_id = %id, title = %task.title, "deleting task");

        self.record(
            ActivityAction::Delete,
            format!("Deleted task \"{}\"", task.title),
        );
        self.publish(
            BoardEventKind::TaskDeleted,
            serde_json::json!({ "taskId": id }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Move a task to a column. Moving to the column it already occupies is
    /// a complete no-op: no state change, no activity entry, no event.
    pub fn move_task(&mut self, id: &str, new_status: TaskStatus) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if task.status == new_status {
            return Ok(false);
        }
        let title = task.title.clone();
        debug!(task_id = %id, status = %new_status, "moving task");
        task.status = new_status;

        self.record(
            ActivityAction::Move,
            format!("Moved task \"{title}\" to {new_status}"),
        );
        self.publish(
            BoardEventKind::TaskMoved,
            serde_json::json!({ "taskId": id, "status": new_status.as_str() }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Delete every task in the current project. Tasks in other projects
    /// are untouched. No-op when no project is current.
    pub fn reset_board(&mut self) -> Result<bool> {
        let Some(current) = self.current_project_id.clone() else {
            return Ok(false);
        };
        debug!(project_id = %current, "resetting board");
        self.tasks.retain(|t| t.project_id != current);

        self.record(ActivityAction::Reset, "Reset tasks in the current project");
        self.publish(
            BoardEventKind::BoardReset,
            serde_json::json!({ "projectId": current }),
        );
        self.persist()?;
        Ok(true)
    }

    /// Empty the activity log. Not itself logged.
    pub fn clear_log(&mut self) -> Result<()> {
        self.log.clear();
        self.persist()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Return the current project id, synthesizing the default project when
    /// none is selected. The synthesized project is not logged as activity.
    fn ensure_current_project(&mut self) -> String {
        if let Some(id) = self.current_project_id.clone() {
            return id;
        }
        let project = Project::new(
            self.config.default_project_name.clone(),
            self.config.default_project_color.clone(),
        );
        debug!(project_id = %project.id, "synthesizing default project");
        let id = project.id.clone();
        self.projects.push(project);
        self.current_project_id = Some(id.clone());
        id
    }

    /// Rehydration migration. Returns true when state was changed.
    ///
    /// - No projects at all: synthesize the default project, select it, and
    ///   adopt any task without a valid owner.
    /// - Projects but no (or a dangling) current pointer: select the first.
    fn migrate(&mut self) -> bool {
        if self.projects.is_empty() {
            if self.tasks.is_empty() && self.current_project_id.is_none() {
                // Fresh board, nothing to migrate.
                return false;
            }
            let project = Project::new(
                self.config.default_project_name.clone(),
                self.config.migration_project_color.clone(),
            );
            let id = project.id.clone();
            debug!(project_id = %id, "migrating legacy state to default project");
            self.projects.push(project);
            self.current_project_id = Some(id.clone());
            for task in &mut self.tasks {
                if task.project_id.is_empty() {
                    task.project_id = id.clone();
                }
            }
            return true;
        }

        let current_is_valid = self
            .current_project_id
            .as_deref()
            .map(|id| self.projects.iter().any(|p| p.id == id))
            .unwrap_or(false);
        if !current_is_valid {
            self.current_project_id = self.projects.first().map(|p| p.id.clone());
            return true;
        }
        false
    }

    fn record(&mut self, action: ActivityAction, details: impl Into<String>) {
        self.log.record(action, details);
    }

    fn publish(&mut self, kind: BoardEventKind, data: serde_json::Value) {
        if self.observers.is_empty() {
            return;
        }
        let mut event = BoardEvent::new(kind);
        event.data = Some(data);
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    fn persist(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let board = BoardSnapshot {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            projects: self.projects.clone(),
            current_project_id: self.current_project_id.clone(),
            tasks: self.tasks.clone(),
        };
        storage.write_json(&storage.board_file(), &board)?;

        let activity = ActivitySnapshot {
            schema_version: ACTIVITY_SCHEMA_VERSION.to_string(),
            entries: self.log.entries().to_vec(),
        };
        storage.write_json(&storage.activity_file(), &activity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ACTIVITY_CAP;
    use crate::task::TaskPriority;

    fn store() -> BoardStore {
        BoardStore::in_memory(BoardConfig::default())
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft::new(title)
    }

    #[test]
    fn add_project_selects_first_as_current() {
        let mut store = store();
        let first = store.add_project("Alpha", "#111111").expect("add");
        let second = store.add_project("Beta", "#222222").expect("add");

        assert_eq!(store.current_project_id(), Some(first.id.as_str()));
        assert_ne!(store.current_project_id(), Some(second.id.as_str()));
        assert_eq!(store.activity().entries()[0].details, "Created project \"Beta\"");
    }

    #[test]
    fn add_task_counts_and_logs_each_call() {
        let mut store = store();
        store.add_project("Alpha", "#111111").expect("add project");
        let before = store.activity().len();

        store.add_task(draft("One")).expect("add");
        store.add_task(draft("Two")).expect("add");

        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.activity().len(), before + 2);
        assert_eq!(store.activity().entries()[0].action, ActivityAction::Create);
    }

    #[test]
    fn add_task_synthesizes_default_project_without_extra_log() {
        let mut store = store();
        assert!(store.projects().is_empty());

        let task = store.add_task(draft("Orphanless")).expect("add");

        assert_eq!(store.projects().len(), 1);
        let project = &store.projects()[0];
        assert_eq!(project.name, "General");
        assert_eq!(project.color, "#6366f1");
        assert_eq!(store.current_project_id(), Some(project.id.as_str()));
        assert_eq!(task.project_id, project.id);
        // Only the task creation is logged, not the synthesized project.
        assert_eq!(store.activity().len(), 1);
        assert_eq!(
            store.activity().entries()[0].details,
            "Created task \"Orphanless\""
        );
    }

    #[test]
    fn delete_project_cascades_with_one_log_entry() {
        let mut store = store();
        let alpha = store.add_project("Alpha", "#111111").expect("add");
        let beta = store.add_project("Beta", "#222222").expect("add");
        store.add_task(draft("In alpha")).expect("add");
        store.add_task(draft("Also alpha")).expect("add");
        store.set_current_project(&beta.id).expect("select");
        store.add_task(draft("In beta")).expect("add");

        let before = store.activity().len();
        store.set_current_project(&alpha.id).expect("select");
        assert!(store.delete_project(&alpha.id).expect("delete"));

        assert_eq!(store.projects().len(), 1);
        assert!(store.tasks().iter().all(|t| t.project_id == beta.id));
        assert_eq!(store.current_project_id(), Some(beta.id.as_str()));
        assert_eq!(store.activity().len(), before + 1);
        assert_eq!(
            store.activity().entries()[0].details,
            "Deleted project \"Alpha\""
        );
    }

    #[test]
    fn delete_non_current_project_keeps_selection() {
        let mut store = store();
        let alpha = store.add_project("Alpha", "#111111").expect("add");
        let beta = store.add_project("Beta", "#222222").expect("add");
        assert_eq!(store.current_project_id(), Some(alpha.id.as_str()));

        assert!(store.delete_project(&beta.id).expect("delete"));
        assert_eq!(store.current_project_id(), Some(alpha.id.as_str()));
    }

    #[test]
    fn delete_last_project_clears_current() {
        let mut store = store();
        let alpha = store.add_project("Alpha", "#111111").expect("add");
        assert!(store.delete_project(&alpha.id).expect("delete"));
        assert!(store.current_project_id().is_none());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut store = store();
        store.add_project("Alpha", "#111111").expect("add");
        let before = store.activity().len();

        assert!(!store.update_project("nope", ProjectPatch::default()).expect("update"));
        assert!(!store.delete_project("nope").expect("delete"));
        assert!(!store.set_current_project("nope").expect("select"));
        assert!(!store.update_task("nope", TaskPatch::default()).expect("update"));
        assert!(!store.delete_task("nope").expect("delete"));
        assert!(!store.move_task("nope", TaskStatus::Done).expect("move"));

        assert_eq!(store.activity().len(), before);
        assert_eq!(store.current_project_id(), Some(store.projects()[0].id.as_str()));
    }

    #[test]
    fn move_task_is_idempotent_per_status() {
        let mut store = store();
        store.add_project("Alpha", "#111111").expect("add");
        let task = store.add_task(draft("Move me")).expect("add");
        let before = store.activity().len();

        assert!(store.move_task(&task.id, TaskStatus::Doing).expect("move"));
        assert_eq!(store.activity().len(), before + 1);
        assert_eq!(
            store.activity().entries()[0].details,
            "Moved task \"Move me\" to Doing"
        );

        // Same-status move: nothing happens.
        assert!(!store.move_task(&task.id, TaskStatus::Doing).expect("move"));
        assert_eq!(store.activity().len(), before + 1);
        assert_eq!(store.task(&task.id).expect("task").status, TaskStatus::Doing);
    }

    #[test]
    fn update_task_logs_pre_mutation_title() {
        let mut store = store();
        store.add_project("Alpha", "#111111").expect("add");
        let task = store.add_task(draft("Old title")).expect("add");

        store
            .update_task(
                &task.id,
                TaskPatch {
                    title: Some("New title".to_string()),
                    ..TaskPatch::default()
                },
            )
            .expect("update");

        assert_eq!(store.task(&task.id).expect("task").title, "New title");
        assert_eq!(
            store.activity().entries()[0].details,
            "Updated task \"Old title\""
        );
    }

    #[test]
    fn reset_board_only_touches_current_project() {
        let mut store = store();
        let alpha = store.add_project("Alpha", "#111111").expect("add");
        let beta = store.add_project("Beta", "#222222").expect("add");
        store.add_task(draft("Alpha task")).expect("add");
        store.set_current_project(&beta.id).expect("select");
        store.add_task(draft("Beta task")).expect("add");

        assert!(store.reset_board().expect("reset"));

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].project_id, alpha.id);
        assert_eq!(
            store.activity().entries()[0].details,
            "Reset tasks in the current project"
        );
    }

    #[test]
    fn reset_board_without_current_is_noop() {
        let mut store = store();
        assert!(!store.reset_board().expect("reset"));
        assert!(store.activity().is_empty());
    }

    #[test]
    fn activity_cap_holds_under_churn() {
        let mut store = store();
        store.add_project("Alpha", "#111111").expect("add");
        for i in 0..60 {
            store.add_task(draft(&format!("Task {i}"))).expect("add");
        }

        assert_eq!(store.activity().len(), ACTIVITY_CAP);
        assert_eq!(
            store.activity().entries()[0].details,
            "Created task \"Task 59\""
        );
    }

    #[test]
    fn end_to_end_scenario() {
        // Empty store: create project, task, move it, delete it, check log.
        let mut store = store();

        let project = store.add_project("Work", "#6366f1").expect("add project");
        assert_eq!(store.current_project_id(), Some(project.id.as_str()));

        let task = store.add_task(draft("Write spec")).expect("add task");
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(
            store.activity().entries()[0].details,
            "Created task \"Write spec\""
        );

        store.move_task(&task.id, TaskStatus::Doing).expect("move");
        assert_eq!(store.task(&task.id).expect("task").status, TaskStatus::Doing);

        store.delete_task(&task.id).expect("delete");
        assert!(store.tasks().is_empty());

        let actions: Vec<ActivityAction> = store
            .activity()
            .entries()
            .iter()
            .map(|entry| entry.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                ActivityAction::Delete,
                ActivityAction::Move,
                ActivityAction::Create,
                ActivityAction::Create,
            ]
        );
    }

    #[test]
    fn default_priority_and_status_for_drafts() {
        let mut store = store();
        let task = store.add_task(draft("Defaults")).expect("add");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    mod persistence {
        use super::*;
        use crate::storage::Storage;

        fn backed(dir: &tempfile::TempDir) -> BoardStore {
            let storage = Storage::new(dir.path().to_path_buf());
            BoardStore::load(storage, BoardConfig::default()).expect("load")
        }

        #[test]
        fn mutations_survive_reload() {
            let dir = tempfile::tempdir().expect("tempdir");

            let task_id = {
                let mut store = backed(&dir);
                store.add_project("Alpha", "#111111").expect("add");
                let task = store.add_task(TaskDraft::new("Persist me")).expect("add");
                store.move_task(&task.id, TaskStatus::Done).expect("move");
                task.id
            };

            let store = backed(&dir);
            assert_eq!(store.projects().len(), 1);
            assert_eq!(store.task(&task_id).expect("task").status, TaskStatus::Done);
            assert_eq!(
                store.activity().entries()[0].details,
                "Moved task \"Persist me\" to Done"
            );
        }

        #[test]
        fn fresh_board_stays_empty() {
            let dir = tempfile::tempdir().expect("tempdir");
            let store = backed(&dir);
            assert!(store.projects().is_empty());
            assert!(store.tasks().is_empty());
            assert!(store.current_project_id().is_none());
        }

        #[test]
        fn migration_adopts_orphan_tasks() {
            let dir = tempfile::tempdir().expect("tempdir");
            let storage = Storage::new(dir.path().to_path_buf());
            storage.init().expect("init");

            // Legacy snapshot: tasks but no projects, tasks missing projectId.
            let legacy = serde_json::json!({
                "schemaVersion": BOARD_SCHEMA_VERSION,
                "projects": [],
                "currentProjectId": null,
                "tasks": [{
                    "id": "t1",
                    "title": "Legacy task",
                    "description": "",
                    "status": "Todo",
                    "priority": "Low",
                    "dueDate": null,
                    "tags": [],
                    "createdAt": "2024-01-01T00:00:00Z"
                }]
            });
            storage
                .write_json(&storage.board_file(), &legacy)
                .expect("write legacy");

            let store = backed(&dir);
            assert_eq!(store.projects().len(), 1);
            let project = &store.projects()[0];
            assert_eq!(project.name, "General");
            assert_eq!(project.color, "#FCD535");
            assert_eq!(store.current_project_id(), Some(project.id.as_str()));
            assert_eq!(store.tasks()[0].project_id, project.id);
        }

        #[test]
        fn migration_selects_first_project_when_current_missing() {
            let dir = tempfile::tempdir().expect("tempdir");
            let storage = Storage::new(dir.path().to_path_buf());
            storage.init().expect("init");

            let legacy = serde_json::json!({
                "schemaVersion": BOARD_SCHEMA_VERSION,
                "projects": [{
                    "id": "p1",
                    "name": "Alpha",
                    "color": "#111111",
                    "createdAt": "2024-01-01T00:00:00Z"
                }],
                "currentProjectId": null,
                "tasks": []
            });
            storage
                .write_json(&storage.board_file(), &legacy)
                .expect("write legacy");

            let store = backed(&dir);
            assert_eq!(store.current_project_id(), Some("p1"));
        }

        #[test]
        fn corrupt_board_snapshot_starts_fresh() {
            let dir = tempfile::tempdir().expect("tempdir");
            let storage = Storage::new(dir.path().to_path_buf());
            storage.init().expect("init");
            std::fs::write(storage.board_file(), "not json at all").expect("write");

            let store = backed(&dir);
            assert!(store.projects().is_empty());
            assert!(store.tasks().is_empty());
        }
    }
}
