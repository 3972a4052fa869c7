use std::{
    fs::OpenOptions,
    io::{self, Stdout},
    path::Path,
    sync::Mutex,
    time::Duration,
};

use anyhow::Context;
use app::App;
use chrono::Local;
use clap::Parser;
use config::{Args, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use database::{ensure_dir, LocalNotificationCenter};
use notify::{DesktopPresenter, NotificationService, Presenter};
use ratatui::{backend::Backend, prelude::CrosstermBackend, Terminal};
use reminder::ReminderScheduler;
use store::TodoStore;
use theme::Appearance;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod database;
mod model;
mod notify;
mod picker;
mod reminder;
mod store;
mod theme;
mod ui;

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse()).context("could not resolve data directory")?;
    ensure_dir(&config.data_dir)
        .with_context(|| format!("could not create {}", config.data_dir.display()))?;
    init_logging(&config.log_file())?;
    tracing::info!(data_dir = %config.data_dir.display(), "starting project-todo");

    let center = LocalNotificationCenter::open(&config.notification_db(), config.permission)
        .context("could not open notification store")?;
    let store = if config.sample_items {
        TodoStore::with_sample_items()
    } else {
        TodoStore::new()
    };
    let mut app = App::new(
        store,
        ReminderScheduler::new(center, config.behavior),
        Local::now(),
        config.theme,
        Appearance::detect(),
        config.picker,
    );
    let mut presenter = DesktopPresenter::new("project-todo");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &mut presenter);
    restore_terminal(&mut terminal)?;
    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(terminal.show_cursor()?)
}

fn run<B: Backend, N: NotificationService, P: Presenter>(
    terminal: &mut Terminal<B>,
    app: &mut App<N>,
    presenter: &mut P,
) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.tick(Local::now(), presenter);
    }
    Ok(())
}
