use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use taskdeck::{ui, App, EntityStore, StoreOptions};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 40;

fn app() -> App {
    let mut app = App::new(EntityStore::seeded(StoreOptions::default()));
    app.today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    app
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn renders_title_and_tabs() {
    let screen = render(&app());
    assert!(screen.contains("Task Management System"));
    assert!(screen.contains("tasks"));
    assert!(screen.contains("projects"));
    assert!(screen.contains("users"));
}

#[test]
fn tasks_view_is_default() {
    let screen = render(&app());
    assert!(screen.contains("Create New Task"));
    assert!(screen.contains("Tasks (2)"));
    assert!(screen.contains("Design Homepage"));
    assert!(screen.contains("Implement Navigation"));
    assert!(screen.contains("[in progress]"));
    assert!(screen.contains("Project: Website Redesign"));
    assert!(screen.contains("Assignee: jane_smith"));
    assert!(screen.contains("Due: 2024-02-01"));
}

#[test]
fn projects_tab_lists_projects_with_counts() {
    let mut app = app();
    press(&mut app, KeyCode::Char('2'));
    let screen = render(&app);
    assert!(screen.contains("Create New Project"));
    assert!(screen.contains("Projects (2)"));
    assert!(screen.contains("Website Redesign"));
    assert!(screen.contains("Mobile App"));
    assert!(screen.contains("Owner: john_doe  Tasks: 2"));
    assert!(screen.contains("Owner: jane_smith  Tasks: 0"));
}

#[test]
fn users_tab_lists_users() {
    let mut app = app();
    press(&mut app, KeyCode::Char('3'));
    let screen = render(&app);
    assert!(screen.contains("Create New User"));
    assert!(screen.contains("Users (2)"));
    assert!(screen.contains("john_doe"));
    assert!(screen.contains("jane_smith"));
    assert!(screen.contains("(admin)"));
}

#[test]
fn search_narrows_the_list() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "Design");
    let screen = render(&app);
    assert!(screen.contains("Tasks (1)"));
    assert!(screen.contains("Design Homepage"));
    assert!(!screen.contains("Implement Navigation"));
}

#[test]
fn created_task_appears_in_list() {
    let mut app = app();
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "New Test Task");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "New test description");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    let screen = render(&app);
    assert!(screen.contains("Tasks (3)"));
    assert!(screen.contains("New Test Task"));
}

#[test]
fn dangling_references_render_empty_labels() {
    let mut store = EntityStore::new(StoreOptions::default());
    store.task_draft.title = "Orphan".to_string();
    store.task_draft.description = "Points nowhere".to_string();
    store.task_draft.project_id = "ghost".to_string();
    store.task_draft.assignee_id = "ghost".to_string();
    store.create_task().expect("permissive store accepts dangling ids");

    let screen = render(&App::new(store));
    assert!(screen.contains("Orphan"));
    assert!(screen.contains("Project:   Assignee: "));
}

#[test]
fn overdue_tasks_are_flagged() {
    let mut app = app();
    app.today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let screen = render(&app);
    assert!(screen.contains("Overdue: 1"));
    assert!(screen.contains("overdue"));
}
