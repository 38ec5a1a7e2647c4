use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::drag::DragState;
use crate::prefs::Theme;
use crate::task::{Task, TaskPriority, TaskStatus};
use crate::view::SortKey;

use super::app::{AppState, ConfirmState, InputKind};

const HELP_KEY_WIDTH: usize = 12;

pub(crate) struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub dragging: Color,
    pub warning: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            text: Color::Rgb(24, 26, 32),
            muted: Color::Rgb(110, 116, 124),
            accent: Color::Rgb(76, 86, 220),
            border: Color::Rgb(150, 156, 168),
            selected_bg: Color::Rgb(222, 226, 240),
            dragging: Color::Rgb(168, 110, 18),
            warning: Color::Rgb(178, 60, 60),
        },
        // System falls back to the dark palette; the terminal decides.
        Theme::Dark | Theme::System => Palette {
            text: Color::Rgb(234, 236, 239),
            muted: Color::Rgb(140, 146, 154),
            accent: Color::Rgb(122, 170, 255),
            border: Color::Rgb(92, 126, 166),
            selected_bg: Color::Rgb(52, 56, 60),
            dragging: Color::Rgb(244, 200, 98),
            warning: Color::Rgb(255, 107, 107),
        },
    }
}

fn priority_color(priority: TaskPriority, colors: &Palette) -> Color {
    match priority {
        TaskPriority::High => colors.warning,
        TaskPriority::Medium => colors.accent,
        TaskPriority::Low => colors.muted,
    }
}

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let colors = palette(app.theme());
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_header(frame, app, header, &colors);

    if app.sidebar_open() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)].as_ref())
            .split(main);
        render_columns(frame, app, chunks[0], &colors);
        render_activity(frame, app, chunks[1], &colors);
    } else {
        render_columns(frame, app, main, &colors);
    }

    render_footer(frame, app, footer, &colors);

    if app.input.is_some() {
        render_input_modal(frame, app, area, &colors);
    }
    if app.project_picker.is_some() {
        render_project_picker(frame, app, area, &colors);
    }
    if app.confirm.is_some() {
        render_confirm_modal(frame, app, area, &colors);
    }
    if app.show_help {
        render_help_modal(frame, area, &colors);
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let project = app
        .store
        .current_project()
        .map(|project| project.name.clone())
        .unwrap_or_else(|| "no project".to_string());

    let mut spans = vec![
        Span::styled(" taba ", Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)),
        Span::styled(project, Style::default().fg(colors.text)),
    ];

    if let Some(search) = app.query.search.as_deref() {
        spans.push(Span::styled(
            format!("  search: {search}"),
            Style::default().fg(colors.muted),
        ));
    }
    if let Some(priority) = app.query.priority {
        spans.push(Span::styled(
            format!("  priority: {priority}"),
            Style::default().fg(colors.muted),
        ));
    }
    if let Some(sort) = app.query.sort {
        let label = match sort {
            SortKey::DueDate => "due",
            SortKey::Priority { ascending: true } => "priority asc",
            SortKey::Priority { ascending: false } => "priority",
        };
        spans.push(Span::styled(
            format!("  sort: {label}"),
            Style::default().fg(colors.muted),
        ));
    }
    if matches!(app.drag.state(), DragState::Dragging { .. }) {
        spans.push(Span::styled(
            "  [dragging]",
            Style::default().fg(colors.dragging).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_columns(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    for (idx, status) in TaskStatus::ALL.into_iter().enumerate() {
        render_column(frame, app, chunks[idx], status, colors);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &AppState,
    area: Rect,
    status: TaskStatus,
    colors: &Palette,
) {
    let cards = app.column_cards(status);
    let focused = app.selected_column == status;
    let border_color = if focused { colors.accent } else { colors.border };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {status} ({}) ", cards.len()),
            Style::default()
                .fg(if focused { colors.accent } else { colors.muted })
                .add_modifier(Modifier::BOLD),
        ));

    let dragged_id = app.drag.active_task();
    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(row, task)| card_item(task, focused && row == app.selected_row, dragged_id, colors))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn card_item<'a>(
    task: &'a Task,
    selected: bool,
    dragged_id: Option<&str>,
    colors: &Palette,
) -> ListItem<'a> {
    let dragging = dragged_id == Some(task.id.as_str());
    let marker = if dragging { "◆ " } else { "  " };

    let mut spans = vec![
        Span::styled(
            marker,
            Style::default().fg(if dragging { colors.dragging } else { colors.muted }),
        ),
        Span::styled(
            task.title.clone(),
            Style::default().fg(colors.text).add_modifier(if dragging {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
        Span::styled(
            format!(" ·{}", task.priority),
            Style::default().fg(priority_color(task.priority, colors)),
        ),
    ];
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!(" due {}", due.format("%m-%d")),
            Style::default().fg(colors.muted),
        ));
    }

    let mut style = Style::default();
    if selected {
        style = style.bg(colors.selected_bg);
    }
    ListItem::new(Line::from(spans)).style(style)
}

fn render_activity(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(Span::styled(
            " Activity ",
            Style::default().fg(colors.muted).add_modifier(Modifier::BOLD),
        ));

    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .store
        .activity()
        .entries()
        .iter()
        .take(visible)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M")),
                    Style::default().fg(colors.muted),
                ),
                Span::styled(entry.details.clone(), Style::default().fg(colors.text)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let first = if let Some(message) = app.status_message.as_deref() {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.accent),
        ))
    } else {
        Line::from(Span::styled(
            " space grab/drop  n new  e edit  d delete  / search  p project  ? help  q quit",
            Style::default().fg(colors.muted),
        ))
    };
    frame.render_widget(Paragraph::new(vec![first]), area);
}

fn render_input_modal(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let Some(input) = app.input.as_ref() else {
        return;
    };
    let title = match input.kind {
        InputKind::NewTask => format!(" New task in {} ", app.selected_column),
        InputKind::EditTask { .. } => " Edit task ".to_string(),
        InputKind::Search => " Search ".to_string(),
    };

    let rect = centered_rect(area, 50, 3);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .title(title);
    frame.render_widget(
        Paragraph::new(format!("{}▌", input.buffer))
            .style(Style::default().fg(colors.text))
            .block(block),
        rect,
    );
}

fn render_project_picker(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let Some(picker) = app.project_picker.as_ref() else {
        return;
    };
    let projects = app.store.projects();
    let height = (projects.len() as u16 + 2).min(area.height.saturating_sub(2)).max(3);
    let rect = centered_rect(area, 40, height);
    frame.render_widget(Clear, rect);

    let items: Vec<ListItem> = projects
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let current = app.store.current_project_id() == Some(project.id.as_str());
            let marker = if current { "* " } else { "  " };
            let mut style = Style::default().fg(colors.text);
            if idx == picker.selected {
                style = style.bg(colors.selected_bg).add_modifier(Modifier::BOLD);
            }
            ListItem::new(format!("{marker}{}", project.name)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .title(" Project ");
    frame.render_widget(List::new(items).block(block), rect);
}

fn render_confirm_modal(frame: &mut Frame, app: &AppState, area: Rect, colors: &Palette) {
    let Some(confirm) = app.confirm.as_ref() else {
        return;
    };
    let message = match confirm {
        ConfirmState::DeleteTask { title, .. } => format!("Delete task \"{title}\"?"),
        ConfirmState::ResetBoard => "Delete every task in the current project?".to_string(),
    };

    let rect = centered_rect(area, 50, 4);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.warning))
        .title(" Confirm ");
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(message, Style::default().fg(colors.text))),
            Line::from(Span::styled(
                "y confirm  n cancel",
                Style::default().fg(colors.muted),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(block),
        rect,
    );
}

fn render_help_modal(frame: &mut Frame, area: Rect, colors: &Palette) {
    let entries: &[(&str, &str)] = &[
        ("h/l ←/→", "move between columns (moves the dragged task)"),
        ("j/k ↑/↓", "move between cards"),
        ("space", "grab / drop the selected task"),
        ("esc", "cancel drag, clear filters, or quit"),
        ("n", "new task in the focused column"),
        ("e", "edit the selected task's title"),
        ("d", "delete the selected task"),
        ("r", "reset tasks in the current project"),
        ("/", "search title and description"),
        ("f", "cycle priority filter"),
        ("s", "cycle sort (due, priority, priority asc)"),
        ("p", "switch project"),
        ("t", "cycle theme"),
        ("a", "toggle activity sidebar"),
        ("q", "quit"),
    ];

    let rect = centered_rect(area, 60, entries.len() as u16 + 2);
    frame.render_widget(Clear, rect);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:HELP_KEY_WIDTH$}"),
                    Style::default().fg(colors.accent),
                ),
                Span::styled(*action, Style::default().fg(colors.text)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(" Keys ");
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Left).block(block),
        rect,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
