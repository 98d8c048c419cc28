mod app;
mod button;
mod config;
mod event;
mod game;
mod scoreboard;
mod scores;
mod settings;
mod stats;
mod ui;

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::Config;
use event::{Event, EventHandler};
use game::Game;
use scores::FileStore;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let (config, config_path) = Config::load()?;

    simple_logging::log_to_file(config.log_file(), config.log_level())
        .with_context(|| format!("opening log file {}", config.log_file().display()))?;
    match &config_path {
        Some(path) => log::info!("starting Alien Invasion with config {}", path.display()),
        None => log::info!("starting Alien Invasion with default settings"),
    }

    let store = FileStore::new(config.high_score_path());
    log::info!("high score file: {}", store.path().display());
    let game = Game::new(config.settings(), Box::new(store));

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("entering alternate screen")?;
    let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::info!("key release events: {}", release_events);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;
    terminal.clear()?;

    let mut app = App::new(game, release_events);
    let result = run(&mut terminal, &mut app, &config);

    // Restore terminal
    if release_events {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => log::info!("exiting, high score {}", app.game.stats().high_score),
        Err(err) => log::error!("game loop failed: {:#}", err),
    }
    result
}

fn run(terminal: &mut Term, app: &mut App, config: &Config) -> Result<()> {
    let event_handler = EventHandler::new(config.tick_rate());
    let mut mouse_captured = true;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.should_quit {
            return Ok(());
        }

        if app.wants_mouse() != mouse_captured {
            mouse_captured = app.wants_mouse();
            if mouse_captured {
                execute!(terminal.backend_mut(), EnableMouseCapture)?;
            } else {
                execute!(terminal.backend_mut(), DisableMouseCapture)?;
            }
        }
    }
}
