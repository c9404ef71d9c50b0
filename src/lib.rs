//! Terminal manager for tasks, projects and users.
//!
//! All records live in an in-memory [`EntityStore`] seeded with demo data;
//! the [`app`] and [`ui`] modules put a ratatui front end on top of it.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod draft;
pub mod error;
pub mod logging;
pub mod project;
pub mod seed;
pub mod store;
pub mod task;
pub mod ui;
pub mod user;

pub use app::{App, Focus, FormField};
pub use config::AppConfig;
pub use draft::{ProjectDraft, TaskDraft, UserDraft};
pub use error::{AppError, AppResult};
pub use project::Project;
pub use store::{ActiveView, EntityStore, StoreOptions};
pub use task::{Priority, Task, TaskStatus};
pub use user::{Role, User};

/// Builds the store described by `config`: seeded or empty, starting on the
/// configured view.
pub fn build_store(config: &AppConfig) -> EntityStore {
    let options = config.store_options();
    let mut store = if config.seed_mock_data {
        EntityStore::seeded(options)
    } else {
        EntityStore::new(options)
    };
    store.active_view = config.start_view;
    store
}
