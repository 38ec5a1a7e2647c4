//! Command-line interface for taba
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod board;
mod context;
mod log;
mod project;
mod session;
mod task;

pub use context::{CliContext, ContextOptions};

/// taba - terminal Kanban board
///
/// Manage projects and tasks on a three-column board (Todo, Doing, Done)
/// with a persistent activity log. `taba board` opens the interactive UI.
#[derive(Parser, Debug)]
#[command(name = "taba")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory override (defaults to the platform data dir)
    #[arg(long, global = true, env = "TABA_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit board events as JSONL to a file, or "-" for stdout
    #[arg(long, global = true)]
    pub events: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Activity log
    #[command(subcommand)]
    Log(LogCommands),

    /// Open the interactive board UI
    Board,

    /// Delete every task in the current project
    Reset,

    /// Log in (demo credentials)
    Login {
        /// Account email
        email: String,

        /// Account password
        password: String,
    },

    /// Log out
    Logout,

    /// Show the signed-in user
    Whoami,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        /// Project name
        name: String,

        /// Hex color like #6366f1 (defaults from config)
        #[arg(long)]
        color: Option<String>,
    },

    /// List projects
    List,

    /// Edit a project
    Edit {
        /// Project id, name, or id prefix
        project: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New hex color
        #[arg(long)]
        color: Option<String>,

        /// New board background color
        #[arg(long)]
        board_color: Option<String>,
    },

    /// Delete a project and its tasks
    Rm {
        /// Project id, name, or id prefix
        project: String,
    },

    /// Select the current project
    Use {
        /// Project id, name, or id prefix
        project: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task in the current project
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(long)]
        description: Option<String>,

        /// Priority: low, medium, high (default medium)
        #[arg(long)]
        priority: Option<String>,

        /// Starting column: todo, doing, done (default todo)
        #[arg(long)]
        status: Option<String>,

        /// Due date: YYYY-MM-DD or RFC 3339
        #[arg(long)]
        due: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Card background color
        #[arg(long)]
        color: Option<String>,
    },

    /// List tasks in the current project
    List {
        /// Filter by column: todo, doing, done
        #[arg(long)]
        status: Option<String>,

        /// Case-insensitive search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Filter by priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Sort: due, priority, priority-asc
        #[arg(long)]
        sort: Option<String>,

        /// List tasks across all projects
        #[arg(long)]
        all_projects: bool,
    },

    /// Edit a task
    Edit {
        /// Task id, id prefix, or exact title
        task: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// New column: todo, doing, done
        #[arg(long)]
        status: Option<String>,

        /// New due date: YYYY-MM-DD or RFC 3339
        #[arg(long)]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// New card background color
        #[arg(long)]
        color: Option<String>,

        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },

    /// Delete a task
    Rm {
        /// Task id, id prefix, or exact title
        task: String,
    },

    /// Move a task to another column
    Move {
        /// Task id, id prefix, or exact title
        task: String,

        /// Target column: todo, doing, done
        status: String,
    },
}

/// Log subcommands
#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// Show recent activity (newest first)
    Show {
        /// Maximum entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Clear the activity log
    Clear,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = CliContext::open(ContextOptions {
            data_dir: self.data_dir,
            json: self.json,
            quiet: self.quiet,
            events: self.events,
        })?;

        match self.command {
            Commands::Project(cmd) => match cmd {
                ProjectCommands::Add { name, color } => {
                    project::run_add(&ctx, project::AddOptions { name, color })
                }
                ProjectCommands::List => project::run_list(&ctx),
                ProjectCommands::Edit {
                    project,
                    name,
                    color,
                    board_color,
                } => project::run_edit(
                    &ctx,
                    project::EditOptions {
                        project,
                        name,
                        color,
                        board_color,
                    },
                ),
                ProjectCommands::Rm { project } => {
                    project::run_rm(&ctx, project::RmOptions { project })
                }
                ProjectCommands::Use { project } => {
                    project::run_use(&ctx, project::UseOptions { project })
                }
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    description,
                    priority,
                    status,
                    due,
                    tags,
                    color,
                } => task::run_add(
                    &ctx,
                    task::AddOptions {
                        title,
                        description,
                        priority,
                        status,
                        due,
                        tags,
                        color,
                    },
                ),
                TaskCommands::List {
                    status,
                    search,
                    priority,
                    sort,
                    all_projects,
                } => task::run_list(
                    &ctx,
                    task::ListOptions {
                        status,
                        search,
                        priority,
                        sort,
                        all_projects,
                    },
                ),
                TaskCommands::Edit {
                    task,
                    title,
                    description,
                    priority,
                    status,
                    due,
                    clear_due,
                    color,
                    tags,
                } => task::run_edit(
                    &ctx,
                    task::EditOptions {
                        task,
                        title,
                        description,
                        priority,
                        status,
                        due,
                        clear_due,
                        color,
                        tags,
                    },
                ),
                TaskCommands::Rm { task } => task::run_rm(&ctx, task::RmOptions { task }),
                TaskCommands::Move { task, status } => {
                    task::run_move(&ctx, task::MoveOptions { task, status })
                }
            },
            Commands::Log(cmd) => match cmd {
                LogCommands::Show { limit } => log::run_show(&ctx, log::ShowOptions { limit }),
                LogCommands::Clear => log::run_clear(&ctx),
            },
            Commands::Board => board::run_board(&ctx),
            Commands::Reset => board::run_reset(&ctx),
            Commands::Login { email, password } => {
                session::run_login(&ctx, session::LoginOptions { email, password })
            }
            Commands::Logout => session::run_logout(&ctx),
            Commands::Whoami => session::run_whoami(&ctx),
        }
    }
}
