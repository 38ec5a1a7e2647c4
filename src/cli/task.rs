//! taba task commands.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::board::BoardStore;
use crate::config::validate_color;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use crate::view::{filter_task_indices, SortKey, TaskQuery};

use super::context::CliContext;

#[derive(Serialize)]
struct TaskRow {
    id: String,
    title: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            tags: task.tags.clone(),
        }
    }
}

/// Resolve a task argument: exact id, then unique id prefix, then unique
/// exact title.
pub(super) fn resolve_task(store: &BoardStore, needle: &str) -> Result<String> {
    if let Some(task) = store.task(needle) {
        return Ok(task.id.clone());
    }

    let by_prefix: Vec<&str> = store
        .tasks()
        .iter()
        .filter(|task| task.id.starts_with(needle))
        .map(|task| task.id.as_str())
        .collect();
    if let [id] = by_prefix.as_slice() {
        return Ok(id.to_string());
    }

    let by_title: Vec<&str> = store
        .tasks()
        .iter()
        .filter(|task| task.title == needle)
        .map(|task| task.id.as_str())
        .collect();
    if let [id] = by_title.as_slice() {
        return Ok(id.to_string());
    }

    Err(Error::TaskNotFound(needle.to_string()))
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_due(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN);
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(Error::InvalidArgument(format!(
        "invalid due date '{raw}': expected YYYY-MM-DD or RFC 3339"
    )))
}

fn parse_sort(raw: &str) -> Result<SortKey> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "due" => Ok(SortKey::DueDate),
        "priority" => Ok(SortKey::Priority { ascending: false }),
        "priority-asc" => Ok(SortKey::Priority { ascending: true }),
        _ => Err(Error::InvalidArgument(format!(
            "invalid sort '{raw}': must be due, priority, or priority-asc"
        ))),
    }
}

pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due: Option<String>,
    pub tags: Vec<String>,
    pub color: Option<String>,
}

pub fn run_add(ctx: &CliContext, options: AddOptions) -> Result<()> {
    let title = options.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::InvalidArgument(
            "task title cannot be empty".to_string(),
        ));
    }

    let mut draft = TaskDraft::new(title);
    if let Some(description) = options.description {
        draft.description = description;
    }
    if let Some(priority) = options.priority.as_deref() {
        draft.priority = priority.parse()?;
    }
    if let Some(status) = options.status.as_deref() {
        draft.status = status.parse()?;
    }
    if let Some(due) = options.due.as_deref() {
        draft.due_date = Some(parse_due(due)?);
    }
    if let Some(color) = options.color {
        validate_color(&color, "color")?;
        draft.background_color = Some(color);
    }
    draft.tags = options.tags;

    let mut store = ctx.board()?;
    let task = store.add_task(draft)?;

    let mut human = HumanOutput::new(format!("Created task \"{}\"", task.title));
    human.push_summary("id", &task.id);
    human.push_summary("status", task.status.as_str());
    human.push_summary("priority", task.priority.as_str());
    if let Some(project) = store.project(&task.project_id) {
        human.push_summary("project", &project.name);
    }
    human.push_next_step(format!("taba task move {} doing", &task.id[..8]));
    emit_success(ctx.output, "task add", &task, Some(&human))
}

pub struct ListOptions {
    pub status: Option<String>,
    pub search: Option<String>,
    pub priority: Option<String>,
    pub sort: Option<String>,
    pub all_projects: bool,
}

pub fn run_list(ctx: &CliContext, options: ListOptions) -> Result<()> {
    let store = ctx.board()?;

    let status = options
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;
    let query = TaskQuery {
        search: options.search,
        priority: options
            .priority
            .as_deref()
            .map(str::parse::<TaskPriority>)
            .transpose()?,
        sort: options.sort.as_deref().map(parse_sort).transpose()?,
    };

    let tasks: Vec<Task> = if options.all_projects {
        store.tasks().to_vec()
    } else {
        store.current_tasks().into_iter().cloned().collect()
    };
    let rows: Vec<TaskRow> = filter_task_indices(&tasks, &query)
        .into_iter()
        .map(|idx| &tasks[idx])
        .filter(|task| status.map(|wanted| task.status == wanted).unwrap_or(true))
        .map(TaskRow::from_task)
        .collect();

    let scope = if options.all_projects {
        "all projects".to_string()
    } else {
        store
            .current_project()
            .map(|project| format!("project \"{}\"", project.name))
            .unwrap_or_else(|| "no current project".to_string())
    };
    let mut human = HumanOutput::new(format!("{} task(s) in {scope}", rows.len()));
    for row in &rows {
        let due = row
            .due_date
            .map(|date| format!("  due {}", date.format("%Y-%m-%d")))
            .unwrap_or_default();
        human.push_detail(format!(
            "{}  [{}] {} ({}){due}",
            &row.id[..8.min(row.id.len())],
            row.status,
            row.title,
            row.priority
        ));
    }
    emit_success(ctx.output, "task list", &rows, Some(&human))
}

pub struct EditOptions {
    pub task: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub fn run_edit(ctx: &CliContext, options: EditOptions) -> Result<()> {
    if options.due.is_some() && options.clear_due {
        return Err(Error::InvalidArgument(
            "--due and --clear-due are mutually exclusive".to_string(),
        ));
    }
    if let Some(title) = options.title.as_deref() {
        if title.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "task title cannot be empty".to_string(),
            ));
        }
    }

    let due_date = if options.clear_due {
        Some(None)
    } else {
        options
            .due
            .as_deref()
            .map(parse_due)
            .transpose()?
            .map(Some)
    };
    if let Some(color) = options.color.as_deref() {
        validate_color(color, "color")?;
    }

    let patch = TaskPatch {
        title: options.title.map(|title| title.trim().to_string()),
        description: options.description,
        status: options.status.as_deref().map(str::parse).transpose()?,
        priority: options.priority.as_deref().map(str::parse).transpose()?,
        due_date,
        background_color: options.color,
        tags: options.tags,
    };

    let mut store = ctx.board()?;
    let id = resolve_task(&store, &options.task)?;
    store.update_task(&id, patch)?;

    let task = store
        .task(&id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;
    let human = HumanOutput::new(format!("Updated task \"{}\"", task.title));
    emit_success(ctx.output, "task edit", &task, Some(&human))
}

pub struct RmOptions {
    pub task: String,
}

pub fn run_rm(ctx: &CliContext, options: RmOptions) -> Result<()> {
    let mut store = ctx.board()?;
    let id = resolve_task(&store, &options.task)?;
    let title = store
        .task(&id)
        .map(|task| task.title.clone())
        .unwrap_or_default();

    store.delete_task(&id)?;

    let human = HumanOutput::new(format!("Deleted task \"{title}\""));
    #[derive(Serialize)]
    struct Deleted {
        id: String,
        title: String,
    }
    emit_success(ctx.output, "task rm", &Deleted { id, title }, Some(&human))
}

pub struct MoveOptions {
    pub task: String,
    pub status: String,
}

pub fn run_move(ctx: &CliContext, options: MoveOptions) -> Result<()> {
    let status: TaskStatus = options.status.parse()?;

    let mut store = ctx.board()?;
    let id = resolve_task(&store, &options.task)?;
    let moved = store.move_task(&id, status)?;

    let title = store
        .task(&id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    let human = if moved {
        HumanOutput::new(format!("Moved task \"{title}\" to {status}"))
    } else {
        HumanOutput::new(format!("Task \"{title}\" is already in {status}"))
    };
    #[derive(Serialize)]
    struct Moved {
        id: String,
        status: TaskStatus,
        moved: bool,
    }
    emit_success(
        ctx.output,
        "task move",
        &Moved { id, status, moved },
        Some(&human),
    )
}
