use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use taskdeck::{build_store, cli, logging, ui, App, AppConfig, AppResult};

/// Raw mode and the alternate screen, undone on drop so early returns leave
/// the user's terminal usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(err.into())
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn run(config: &AppConfig) -> AppResult<()> {
    let mut app = App::new(build_store(config));

    let mut session = TerminalSession::start()?;
    ui::run_app(&mut session.terminal, &mut app)?;
    drop(session);

    info!(
        "event=app_exit module=main status=ok tasks={} projects={} users={}",
        app.store.tasks().len(),
        app.store.projects().len(),
        app.store.users().len()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::parse();
    let config = AppConfig::resolve(&args)?;
    logging::init_logging(&config.log_level, &config.log_dir)?;

    let result = run(&config);
    if let Err(err) = &result {
        error!("event=app_exit module=main status=error error={err}");
    }
    logging::flush_logging();
    result.map_err(Into::into)
}
