//! Interactive state layered over the store: which widget has focus, which
//! row is selected, and how key presses turn into store operations.

use crate::store::{ActiveView, EntityStore};
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Search,
    /// Index into `FormField::for_view(active_view)`.
    Form(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TaskTitle,
    TaskDescription,
    TaskProject,
    TaskAssignee,
    TaskPriority,
    TaskDueDate,
    ProjectName,
    ProjectDescription,
    ProjectOwner,
    Username,
    Email,
    UserRole,
}

impl FormField {
    pub fn for_view(view: ActiveView) -> &'static [FormField] {
        match view {
            ActiveView::Tasks => &[
                FormField::TaskTitle,
                FormField::TaskDescription,
                FormField::TaskProject,
                FormField::TaskAssignee,
                FormField::TaskPriority,
                FormField::TaskDueDate,
            ],
            ActiveView::Projects => &[
                FormField::ProjectName,
                FormField::ProjectDescription,
                FormField::ProjectOwner,
            ],
            ActiveView::Users => &[FormField::Username, FormField::Email, FormField::UserRole],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::TaskTitle => "Task Title",
            FormField::TaskDescription | FormField::ProjectDescription => "Description",
            FormField::TaskProject => "Project",
            FormField::TaskAssignee => "Assignee",
            FormField::TaskPriority => "Priority",
            FormField::TaskDueDate => "Due Date (YYYY-MM-DD)",
            FormField::ProjectName => "Project Name",
            FormField::ProjectOwner => "Owner",
            FormField::Username => "Username",
            FormField::Email => "Email",
            FormField::UserRole => "Role",
        }
    }

    /// Select fields are changed with Left/Right instead of typing.
    pub fn is_select(&self) -> bool {
        matches!(
            self,
            FormField::TaskProject
                | FormField::TaskAssignee
                | FormField::TaskPriority
                | FormField::ProjectOwner
                | FormField::UserRole
        )
    }
}

#[derive(Debug)]
pub struct App {
    pub store: EntityStore,
    pub focus: Focus,
    pub selected: usize,
    pub today: NaiveDate,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            focus: Focus::List,
            selected: 0,
            today: Local::now().date_naive(),
            should_quit: false,
        }
    }

    pub fn form_fields(&self) -> &'static [FormField] {
        FormField::for_view(self.store.active_view)
    }

    pub fn row_count(&self) -> usize {
        match self.store.active_view {
            ActiveView::Tasks => self.store.visible_tasks().len(),
            ActiveView::Projects => self.store.projects().len(),
            ActiveView::Users => self.store.users().len(),
        }
    }

    pub fn selected_task_id(&self) -> Option<String> {
        if self.store.active_view != ActiveView::Tasks {
            return None;
        }
        self.store
            .visible_tasks()
            .get(self.selected)
            .map(|t| t.id.clone())
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        if self.store.active_view != view {
            debug!("event=view_switch module=app status=ok view={view}");
        }
        self.store.active_view = view;
        self.focus = Focus::List;
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        self.selected = if rows == 0 {
            0
        } else {
            self.selected.min(rows - 1)
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.focus {
            Focus::List => self.handle_list_key(key.code),
            Focus::Search => self.handle_search_key(key.code),
            Focus::Form(index) => self.handle_form_key(index, key.code),
        }
        self.clamp_selection();
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_view(self.store.active_view.cycle(1)),
            KeyCode::BackTab => self.switch_view(self.store.active_view.cycle(-1)),
            KeyCode::Char('1') => self.switch_view(ActiveView::Tasks),
            KeyCode::Char('2') => self.switch_view(ActiveView::Projects),
            KeyCode::Char('3') => self.switch_view(ActiveView::Users),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n') => self.focus = Focus::Form(0),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
            }
            KeyCode::Char('s') => self.cycle_selected_status(1),
            KeyCode::Char('S') => self.cycle_selected_status(-1),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.store.delete_task(&id);
                }
            }
            _ => {}
        }
    }

    fn cycle_selected_status(&mut self, direction: isize) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(status) = self.store.task_by_id(&id).map(|t| t.status) {
            self.store.update_task_status(&id, status.cycle(direction));
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.store.search_query.push(c),
            KeyCode::Backspace => {
                self.store.search_query.pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::List,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, index: usize, code: KeyCode) {
        let fields = self.form_fields();
        let count = fields.len();
        let Some(&field) = fields.get(index) else {
            self.focus = Focus::List;
            return;
        };
        match code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Tab | KeyCode::Down => self.focus = Focus::Form((index + 1) % count),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = Focus::Form((index + count - 1) % count)
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Left if field.is_select() => self.cycle_select(field, -1),
            KeyCode::Right if field.is_select() => self.cycle_select(field, 1),
            KeyCode::Char(c) if !field.is_select() => {
                if let Some(text) = self.field_text_mut(field) {
                    text.push(c);
                }
            }
            KeyCode::Backspace if !field.is_select() => {
                if let Some(text) = self.field_text_mut(field) {
                    text.pop();
                }
            }
            _ => {}
        }
    }

    /// Runs the create operation of the active view. On success the new row
    /// is selected and focus returns to the list; otherwise nothing changes.
    pub fn submit_form(&mut self) {
        let created = match self.store.active_view {
            ActiveView::Tasks => self.store.create_task().is_some(),
            ActiveView::Projects => self.store.create_project().is_some(),
            ActiveView::Users => self.store.create_user().is_some(),
        };
        if created {
            self.focus = Focus::List;
            self.selected = self.row_count().saturating_sub(1);
        }
    }

    fn field_text_mut(&mut self, field: FormField) -> Option<&mut String> {
        let store = &mut self.store;
        match field {
            FormField::TaskTitle => Some(&mut store.task_draft.title),
            FormField::TaskDescription => Some(&mut store.task_draft.description),
            FormField::TaskDueDate => Some(&mut store.task_draft.due_date),
            FormField::ProjectName => Some(&mut store.project_draft.name),
            FormField::ProjectDescription => Some(&mut store.project_draft.description),
            FormField::Username => Some(&mut store.user_draft.username),
            FormField::Email => Some(&mut store.user_draft.email),
            _ => None,
        }
    }

    fn cycle_select(&mut self, field: FormField, direction: isize) {
        match field {
            FormField::TaskProject => {
                let ids: Vec<String> = self.store.projects().iter().map(|p| p.id.clone()).collect();
                let next = cycle_id(&ids, &self.store.task_draft.project_id, direction);
                self.store.task_draft.project_id = next;
            }
            FormField::TaskAssignee => {
                let ids: Vec<String> = self.store.users().iter().map(|u| u.id.clone()).collect();
                let next = cycle_id(&ids, &self.store.task_draft.assignee_id, direction);
                self.store.task_draft.assignee_id = next;
            }
            FormField::ProjectOwner => {
                let ids: Vec<String> = self.store.users().iter().map(|u| u.id.clone()).collect();
                let next = cycle_id(&ids, &self.store.project_draft.owner_id, direction);
                self.store.project_draft.owner_id = next;
            }
            FormField::TaskPriority => {
                let draft = &mut self.store.task_draft;
                draft.priority = draft.priority.cycle(direction);
            }
            FormField::UserRole => {
                let draft = &mut self.store.user_draft;
                draft.role = draft.role.toggle();
            }
            _ => {}
        }
    }

    /// Text shown for a form field: typed text, or the name behind a
    /// selected id, or the empty-choice placeholder.
    pub fn field_display(&self, field: FormField) -> String {
        let store = &self.store;
        match field {
            FormField::TaskTitle => store.task_draft.title.clone(),
            FormField::TaskDescription => store.task_draft.description.clone(),
            FormField::TaskDueDate => store.task_draft.due_date.clone(),
            FormField::TaskPriority => format!("{} priority", store.task_draft.priority),
            FormField::TaskProject => store
                .project_by_id(&store.task_draft.project_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Select Project".to_string()),
            FormField::TaskAssignee => store
                .user_by_id(&store.task_draft.assignee_id)
                .map(|u| u.username.clone())
                .unwrap_or_else(|| "Select Assignee".to_string()),
            FormField::ProjectName => store.project_draft.name.clone(),
            FormField::ProjectDescription => store.project_draft.description.clone(),
            FormField::ProjectOwner => store
                .user_by_id(&store.project_draft.owner_id)
                .map(|u| u.username.clone())
                .unwrap_or_else(|| "Select Owner".to_string()),
            FormField::Username => store.user_draft.username.clone(),
            FormField::Email => store.user_draft.email.clone(),
            FormField::UserRole => store.user_draft.role.to_string(),
        }
    }
}

/// Steps through `""` followed by `ids`, wrapping. An unknown current value
/// is treated as the empty choice.
fn cycle_id(ids: &[String], current: &str, direction: isize) -> String {
    let len = ids.len() as isize + 1;
    let position = ids
        .iter()
        .position(|id| id == current)
        .map(|i| i as isize + 1)
        .unwrap_or(0);
    match (position + direction).rem_euclid(len) {
        0 => String::new(),
        n => ids[(n - 1) as usize].clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;
    use crate::task::{Priority, TaskStatus};
    use crate::user::Role;

    fn app() -> App {
        App::new(EntityStore::seeded(StoreOptions::default()))
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
    fn cycle_id_includes_empty_choice() {
        let ids = vec!["1".to_string(), "2".to_string()];
        assert_eq!(cycle_id(&ids, "", 1), "1");
        assert_eq!(cycle_id(&ids, "2", 1), "");
        assert_eq!(cycle_id(&ids, "", -1), "2");
        assert_eq!(cycle_id(&ids, "gone", 1), "1");
        assert_eq!(cycle_id(&[], "", 1), "");
    }

    #[test]
    fn tab_and_digits_switch_views() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.store.active_view, ActiveView::Projects);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.store.active_view, ActiveView::Users);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.store.active_view, ActiveView::Projects);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.store.active_view, ActiveView::Tasks);
    }

    #[test]
    fn search_typing_filters_and_clamps_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "design");
        assert_eq!(app.store.search_query, "design");
        assert_eq!(app.row_count(), 1);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.search_query, "desig");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn selection_stops_at_last_row() {
        let mut app = app();
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn status_keys_cycle_selected_task() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.task_by_id("1").unwrap().status, TaskStatus::InProgress);
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Char('S'));
        assert_eq!(app.store.task_by_id("1").unwrap().status, TaskStatus::Cancelled);
    }

    #[test]
    fn delete_key_removes_selected_task_only_in_tasks_view() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.tasks().len(), 2);

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Implement Navigation");
    }

    #[test]
    fn task_form_round_trip_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "New Test Task");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "New test description");
        press(&mut app, KeyCode::Tab);

        // Typing into a select field does nothing.
        type_text(&mut app, "x");
        assert_eq!(app.field_display(FormField::TaskProject), "Select Project");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.field_display(FormField::TaskProject), "Website Redesign");

        // Incomplete draft: enter is ignored.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks().len(), 2);
        assert_eq!(app.focus, Focus::Form(2));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.field_display(FormField::TaskAssignee), "john_doe");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.store.task_draft.priority, Priority::Low);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks().len(), 3);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.selected, 2);
        let task = &app.store.tasks()[2];
        assert_eq!(task.title, "New Test Task");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(app.store.task_draft.priority, Priority::Medium);
    }

    #[test]
    fn user_form_toggles_role() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "new_admin");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "admin@example.com");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.user_draft.role, Role::Admin);
        press(&mut app, KeyCode::Enter);

        let user = app.store.users().last().unwrap();
        assert_eq!(user.username, "new_admin");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn form_focus_wraps_and_escape_keeps_draft() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Form(2));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Half typed");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.store.project_draft.name, "Half typed");
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.store.search_query, "q");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
