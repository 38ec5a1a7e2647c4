use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::board::BoardStore;
use crate::drag::{DragController, DragState};
use crate::error::Result;
use crate::prefs::{PrefsStore, Theme};
use crate::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use crate::view::{column_indices, SortKey, TaskQuery};

use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputKind {
    NewTask,
    EditTask { task_id: String },
    Search,
}

pub(crate) struct InputState {
    pub(crate) kind: InputKind,
    pub(crate) buffer: String,
}

pub(crate) struct ProjectPicker {
    pub(crate) selected: usize,
}

pub(crate) enum ConfirmState {
    DeleteTask { task_id: String, title: String },
    ResetBoard,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) store: BoardStore,
    pub(crate) drag: DragController,
    pub(crate) prefs: PrefsStore,
    pub(crate) selected_column: TaskStatus,
    pub(crate) selected_row: usize,
    pub(crate) query: TaskQuery,
    pub(crate) input: Option<InputState>,
    pub(crate) project_picker: Option<ProjectPicker>,
    pub(crate) confirm: Option<ConfirmState>,
    pub(crate) status_message: Option<String>,
    pub(crate) show_help: bool,
    viewport: Viewport,
}

impl AppState {
    fn new(store: BoardStore, prefs: PrefsStore) -> Self {
        Self {
            store,
            drag: DragController::new(),
            prefs,
            selected_column: TaskStatus::Todo,
            selected_row: 0,
            query: TaskQuery::default(),
            input: None,
            project_picker: None,
            confirm: None,
            status_message: None,
            show_help: false,
            viewport: Viewport::default(),
        }
    }

    fn update_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub(crate) fn theme(&self) -> Theme {
        self.prefs.prefs().theme
    }

    pub(crate) fn sidebar_open(&self) -> bool {
        self.prefs.prefs().sidebar_open && self.viewport.width >= 100
    }

    /// Cards for one column of the current project, after filter and sort.
    pub(crate) fn column_cards(&self, status: TaskStatus) -> Vec<Task> {
        let tasks: Vec<Task> = self.store.current_tasks().into_iter().cloned().collect();
        column_indices(&tasks, status, &self.query)
            .into_iter()
            .map(|idx| tasks[idx].clone())
            .collect()
    }

    pub(crate) fn selected_task(&self) -> Option<Task> {
        self.column_cards(self.selected_column)
            .into_iter()
            .nth(self.selected_row)
    }

    fn clamp_selection(&mut self) {
        let len = self.column_cards(self.selected_column).len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    fn shift_column(&mut self, forward: bool) -> Result<()> {
        let columns = TaskStatus::ALL;
        let current = columns
            .iter()
            .position(|status| *status == self.selected_column)
            .unwrap_or(0);
        let next = if forward {
            (current + 1).min(columns.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        let next = columns[next];
        if next == self.selected_column {
            return Ok(());
        }
        self.selected_column = next;

        // Dragging follows the column cursor and commits immediately. When
        // the target column has cards, hover over its top card so the drop
        // lands with card granularity; an empty column falls back to the
        // column itself.
        if matches!(self.drag.state(), DragState::Dragging { .. }) {
            let over = self.column_cards(next).first().map(|task| task.id.clone());
            match over {
                Some(over) => self.drag.hover_task(&mut self.store, &over)?,
                None => self.drag.hover_column(&mut self.store, next)?,
            }
            self.select_dragged_task();
        }
        self.clamp_selection();
        Ok(())
    }

    fn select_dragged_task(&mut self) {
        let Some(task_id) = self.drag.active_task().map(str::to_string) else {
            return;
        };
        if let Some(row) = self
            .column_cards(self.selected_column)
            .iter()
            .position(|task| task.id == task_id)
        {
            self.selected_row = row;
        }
    }

    fn toggle_grab(&mut self) {
        match self.drag.state() {
            DragState::Idle => {
                if let Some(task) = self.selected_task() {
                    self.drag.start(&self.store, &task.id);
                }
            }
            DragState::Dragging { .. } => self.drag.drop(),
        }
    }

    fn cycle_priority_filter(&mut self) {
        self.query.priority = match self.query.priority {
            None => Some(TaskPriority::Low),
            Some(TaskPriority::Low) => Some(TaskPriority::Medium),
            Some(TaskPriority::Medium) => Some(TaskPriority::High),
            Some(TaskPriority::High) => None,
        };
        self.clamp_selection();
    }

    fn cycle_sort(&mut self) {
        self.query.sort = match self.query.sort {
            None => Some(SortKey::DueDate),
            Some(SortKey::DueDate) => Some(SortKey::Priority { ascending: false }),
            Some(SortKey::Priority { ascending: false }) => {
                Some(SortKey::Priority { ascending: true })
            }
            Some(SortKey::Priority { ascending: true }) => None,
        };
    }

    fn cycle_theme(&mut self) -> Result<()> {
        let next = match self.theme() {
            Theme::System => Theme::Dark,
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::System,
        };
        self.prefs.set_theme(next)
    }
}

pub fn run(store: BoardStore, prefs: PrefsStore) -> Result<()> {
    let mut app = AppState::new(store, prefs);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key)? {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Returns true when the app should exit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    app.status_message = None;

    if app.show_help {
        app.show_help = false;
        return Ok(false);
    }
    if app.input.is_some() {
        handle_input_key(app, key)?;
        return Ok(false);
    }
    if app.project_picker.is_some() {
        handle_picker_key(app, key)?;
        return Ok(false);
    }
    if app.confirm.is_some() {
        handle_confirm_key(app, key)?;
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Esc => {
            if matches!(app.drag.state(), DragState::Dragging { .. }) {
                app.drag.cancel();
            } else if !app.query.is_empty() {
                app.query = TaskQuery::default();
                app.clamp_selection();
            } else {
                return Ok(true);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.shift_column(false)?,
        KeyCode::Right | KeyCode::Char('l') => app.shift_column(true)?,
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_row += 1;
            app.clamp_selection();
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_grab(),
        KeyCode::Char('n') => {
            app.input = Some(InputState {
                kind: InputKind::NewTask,
                buffer: String::new(),
            });
        }
        KeyCode::Char('e') => {
            if let Some(task) = app.selected_task() {
                app.input = Some(InputState {
                    kind: InputKind::EditTask { task_id: task.id },
                    buffer: task.title,
                });
            }
        }
        KeyCode::Char('/') => {
            app.input = Some(InputState {
                kind: InputKind::Search,
                buffer: app.query.search.clone().unwrap_or_default(),
            });
        }
        KeyCode::Char('d') => {
            if let Some(task) = app.selected_task() {
                app.confirm = Some(ConfirmState::DeleteTask {
                    task_id: task.id,
                    title: task.title,
                });
            }
        }
        KeyCode::Char('r') => {
            if app.store.current_project().is_some() {
                app.confirm = Some(ConfirmState::ResetBoard);
            }
        }
        KeyCode::Char('p') => {
            if !app.store.projects().is_empty() {
                let selected = app
                    .store
                    .current_project_id()
                    .and_then(|id| {
                        app.store
                            .projects()
                            .iter()
                            .position(|project| project.id == id)
                    })
                    .unwrap_or(0);
                app.project_picker = Some(ProjectPicker { selected });
            }
        }
        KeyCode::Char('f') => app.cycle_priority_filter(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('t') => app.cycle_theme()?,
        KeyCode::Char('a') => {
            app.prefs.toggle_sidebar()?;
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Ok(false)
}

fn handle_input_key(app: &mut AppState, key: KeyEvent) -> Result<()> {
    let Some(input) = app.input.as_mut() else {
        return Ok(());
    };
    match key.code {
        KeyCode::Esc => {
            if input.kind == InputKind::Search {
                app.query.search = None;
                app.clamp_selection();
            }
            app.input = None;
        }
        KeyCode::Enter => {
            let buffer = input.buffer.clone();
            let kind = input.kind.clone();
            app.input = None;
            match kind {
                InputKind::NewTask => {
                    let title = buffer.trim();
                    if !title.is_empty() {
                        let mut draft = TaskDraft::new(title);
                        draft.status = app.selected_column;
                        let task = app.store.add_task(draft)?;
                        app.status_message = Some(format!("Created task \"{}\"", task.title));
                    }
                }
                InputKind::EditTask { task_id } => {
                    let title = buffer.trim();
                    if !title.is_empty() {
                        let patch = TaskPatch {
                            title: Some(title.to_string()),
                            ..TaskPatch::default()
                        };
                        if app.store.update_task(&task_id, patch)? {
                            app.status_message = Some(format!("Updated task \"{title}\""));
                        }
                    }
                }
                InputKind::Search => {
                    let trimmed = buffer.trim();
                    app.query.search = if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    };
                    app.clamp_selection();
                }
            }
        }
        KeyCode::Backspace => {
            input.buffer.pop();
        }
        KeyCode::Char(ch) => input.buffer.push(ch),
        _ => {}
    }
    Ok(())
}

fn handle_picker_key(app: &mut AppState, key: KeyEvent) -> Result<()> {
    let Some(picker) = app.project_picker.as_mut() else {
        return Ok(());
    };
    let count = app.store.projects().len();
    match key.code {
        KeyCode::Esc => app.project_picker = None,
        KeyCode::Up | KeyCode::Char('k') => {
            picker.selected = picker.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                picker.selected = (picker.selected + 1).min(count - 1);
            }
        }
        KeyCode::Enter => {
            let selected = picker.selected;
            app.project_picker = None;
            if let Some(id) = app
                .store
                .projects()
                .get(selected)
                .map(|project| project.id.clone())
            {
                app.store.set_current_project(&id)?;
                app.selected_row = 0;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_key(app: &mut AppState, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let Some(confirm) = app.confirm.take() else {
                return Ok(());
            };
            match confirm {
                ConfirmState::DeleteTask { task_id, title } => {
                    app.store.delete_task(&task_id)?;
                    app.status_message = Some(format!("Deleted task \"{title}\""));
                    app.clamp_selection();
                }
                ConfirmState::ResetBoard => {
                    app.store.reset_board()?;
                    app.status_message = Some("Reset tasks in the current project".to_string());
                    app.selected_row = 0;
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => app.confirm = None,
        _ => {}
    }
    Ok(())
}
