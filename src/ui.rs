use crate::app::{App, Focus};
use crate::display::{priority_color, status_color, status_label};
use crate::store::ActiveView;
use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;

const TITLE: &str = "Task Management System";
const HELP: &str =
    "q quit | tab/1-3 view | / search | n new | ↑↓ select | s/S status | d delete";

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let form_height = app.form_fields().len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_tabs(f, app, chunks[1]);
    draw_search(f, app, chunks[2]);
    draw_form(f, app, chunks[3]);
    match app.store.active_view {
        ActiveView::Tasks => draw_tasks(f, app, chunks[4]),
        ActiveView::Projects => draw_projects(f, app, chunks[4]),
        ActiveView::Users => draw_users(f, app, chunks[4]),
    }
    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let overdue = app.store.overdue_tasks(app.today).len();
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if overdue > 0 {
        spans.push(Span::styled(
            format!("  Overdue: {overdue}"),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = ActiveView::ALL.iter().map(|v| v.as_str()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.store.active_view.index())
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let text = if app.store.search_query.is_empty() && !focused {
        Span::styled("Search tasks...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.store.search_query.as_str())
    };
    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border(focused)),
    );
    f.render_widget(search, area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.store.active_view {
        ActiveView::Tasks => "Create New Task",
        ActiveView::Projects => "Create New Project",
        ActiveView::Users => "Create New User",
    };
    let active = match app.focus {
        Focus::Form(index) => Some(index),
        _ => None,
    };
    let lines: Vec<Line> = app
        .form_fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if active == Some(i) { "> " } else { "  " };
            let value = if field.is_select() {
                format!("< {} >", app.field_display(*field))
            } else {
                app.field_display(*field)
            };
            let style = if active == Some(i) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{}: ", field.label()), Style::default().fg(Color::Gray)),
                Span::styled(value, style),
            ])
        })
        .collect();
    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focused_border(active.is_some())),
    );
    f.render_widget(form, area);
}

fn list_block(title: String, app: &App) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border(app.focus == Focus::List))
}

fn render_list(f: &mut Frame, app: &App, area: Rect, items: Vec<ListItem>, title: String) {
    let mut state = ListState::default().with_selected(if items.is_empty() {
        None
    } else {
        Some(app.selected)
    });
    let list = List::new(items)
        .block(list_block(title, app))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_tasks(f: &mut Frame, app: &App, area: Rect) {
    let store = &app.store;
    let tasks = store.visible_tasks();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|t| {
            let status = t.status.as_str();
            let priority = t.priority.as_str();
            let mut header = vec![
                Span::styled(t.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", status_label(status)),
                    Style::default().fg(status_color(status)),
                ),
                Span::raw(" "),
                Span::styled(priority, Style::default().fg(priority_color(priority))),
            ];
            if t.is_overdue(app.today) {
                header.push(Span::styled(" overdue", Style::default().fg(Color::Red)));
            }
            // Dangling references render as an empty label.
            let project = store
                .project_by_id(&t.project_id)
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            let assignee = store
                .user_by_id(&t.assignee_id)
                .map(|u| u.username.as_str())
                .unwrap_or_default();
            let mut meta = format!("  Project: {project}  Assignee: {assignee}");
            if let Some(due) = t.due_date {
                meta.push_str(&format!("  Due: {due}"));
            }
            if !t.tags.is_empty() {
                meta.push_str(&format!("  Tags: {}", t.tags.join(", ")));
            }
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(
                    format!("  {}", t.description),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();
    let title = format!("Tasks ({})", tasks.len());
    render_list(f, app, area, items, title);
}

fn draw_projects(f: &mut Frame, app: &App, area: Rect) {
    let store = &app.store;
    let items: Vec<ListItem> = store
        .projects()
        .iter()
        .map(|p| {
            let owner = store
                .user_by_id(&p.owner_id)
                .map(|u| u.username.as_str())
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(Span::styled(
                    p.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", p.description),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!(
                        "  Owner: {owner}  Tasks: {}  Members: {}",
                        store.project_task_count(&p.id),
                        p.members.len()
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let title = format!("Projects ({})", store.projects().len());
    render_list(f, app, area, items, title);
}

fn draw_users(f: &mut Frame, app: &App, area: Rect) {
    let store = &app.store;
    let items: Vec<ListItem> = store
        .users()
        .iter()
        .map(|u| {
            let mut header = vec![
                Span::styled(u.username.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(format!("({})", u.role), Style::default().fg(Color::Blue)),
            ];
            if !u.is_active {
                header.push(Span::styled(" inactive", Style::default().fg(Color::Gray)));
            }
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(
                    format!("  {}  Tasks: {}", u.email, store.user_task_count(&u.id)),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();
    let title = format!("Users ({})", store.users().len());
    render_list(f, app, area, items, title);
}
