//! taba project commands.

use serde::Serialize;

use crate::board::BoardStore;
use crate::config::validate_color;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::project::ProjectPatch;

use super::context::CliContext;

#[derive(Serialize)]
struct ProjectRow {
    id: String,
    name: String,
    color: String,
    current: bool,
    tasks: usize,
}

/// Resolve a project argument: exact id, then exact name, then unique id
/// prefix.
pub(super) fn resolve_project(store: &BoardStore, needle: &str) -> Result<String> {
    if let Some(project) = store.project(needle) {
        return Ok(project.id.clone());
    }

    let by_name: Vec<&str> = store
        .projects()
        .iter()
        .filter(|project| project.name == needle)
        .map(|project| project.id.as_str())
        .collect();
    if let [id] = by_name.as_slice() {
        return Ok(id.to_string());
    }

    let by_prefix: Vec<&str> = store
        .projects()
        .iter()
        .filter(|project| project.id.starts_with(needle))
        .map(|project| project.id.as_str())
        .collect();
    if let [id] = by_prefix.as_slice() {
        return Ok(id.to_string());
    }

    Err(Error::ProjectNotFound(needle.to_string()))
}

pub struct AddOptions {
    pub name: String,
    pub color: Option<String>,
}

pub fn run_add(ctx: &CliContext, options: AddOptions) -> Result<()> {
    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "project name cannot be empty".to_string(),
        ));
    }

    let color = options
        .color
        .unwrap_or_else(|| ctx.config.board.default_project_color.clone());
    validate_color(&color, "color")?;

    let mut store = ctx.board()?;
    let project = store.add_project(&name, &color)?;

    let mut human = HumanOutput::new(format!("Created project \"{}\"", project.name));
    human.push_summary("id", &project.id);
    human.push_summary("color", &project.color);
    if store.current_project_id() == Some(project.id.as_str()) {
        human.push_detail("now the current project");
    }
    emit_success(ctx.output, "project add", &project, Some(&human))
}

pub fn run_list(ctx: &CliContext) -> Result<()> {
    let store = ctx.board()?;
    let rows: Vec<ProjectRow> = store
        .projects()
        .iter()
        .map(|project| ProjectRow {
            id: project.id.clone(),
            name: project.name.clone(),
            color: project.color.clone(),
            current: store.current_project_id() == Some(project.id.as_str()),
            tasks: store
                .tasks()
                .iter()
                .filter(|task| task.project_id == project.id)
                .count(),
        })
        .collect();

    let mut human = HumanOutput::new(format!("{} project(s)", rows.len()));
    for row in &rows {
        let marker = if row.current { "*" } else { " " };
        human.push_detail(format!(
            "{marker} {}  {} ({} task(s))",
            &row.id[..8.min(row.id.len())],
            row.name,
            row.tasks
        ));
    }
    if rows.is_empty() {
        human.push_next_step("taba project add <name>");
    }
    emit_success(ctx.output, "project list", &rows, Some(&human))
}

pub struct RmOptions {
    pub project: String,
}

pub fn run_rm(ctx: &CliContext, options: RmOptions) -> Result<()> {
    let mut store = ctx.board()?;
    let id = resolve_project(&store, &options.project)?;
    let name = store
        .project(&id)
        .map(|project| project.name.clone())
        .unwrap_or_default();

    store.delete_project(&id)?;

    let mut human = HumanOutput::new(format!("Deleted project \"{name}\""));
    if let Some(current) = store.current_project() {
        human.push_detail(format!("current project is now \"{}\"", current.name));
    }
    #[derive(Serialize)]
    struct Deleted {
        id: String,
        name: String,
    }
    emit_success(
        ctx.output,
        "project rm",
        &Deleted { id, name },
        Some(&human),
    )
}

pub struct UseOptions {
    pub project: String,
}

pub fn run_use(ctx: &CliContext, options: UseOptions) -> Result<()> {
    let mut store = ctx.board()?;
    let id = resolve_project(&store, &options.project)?;
    store.set_current_project(&id)?;

    let name = store
        .project(&id)
        .map(|project| project.name.clone())
        .unwrap_or_default();
    let human = HumanOutput::new(format!("Current project: \"{name}\""));
    #[derive(Serialize)]
    struct Selected {
        id: String,
        name: String,
    }
    emit_success(
        ctx.output,
        "project use",
        &Selected { id, name },
        Some(&human),
    )
}

pub struct EditOptions {
    pub project: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub board_color: Option<String>,
}

pub fn run_edit(ctx: &CliContext, options: EditOptions) -> Result<()> {
    if options.name.is_none() && options.color.is_none() && options.board_color.is_none() {
        return Err(Error::InvalidArgument(
            "nothing to edit: pass --name, --color, or --board-color".to_string(),
        ));
    }
    if let Some(name) = options.name.as_deref() {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "project name cannot be empty".to_string(),
            ));
        }
    }
    if let Some(color) = options.color.as_deref() {
        validate_color(color, "color")?;
    }
    if let Some(color) = options.board_color.as_deref() {
        validate_color(color, "board-color")?;
    }

    let mut store = ctx.board()?;
    let id = resolve_project(&store, &options.project)?;
    store.update_project(
        &id,
        ProjectPatch {
            name: options.name.map(|name| name.trim().to_string()),
            color: options.color,
            board_color: options.board_color,
        },
    )?;

    let project = store
        .project(&id)
        .cloned()
        .ok_or_else(|| Error::ProjectNotFound(id.clone()))?;
    let human = HumanOutput::new(format!("Updated project \"{}\"", project.name));
    emit_success(ctx.output, "project edit", &project, Some(&human))
}
