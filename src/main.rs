//! BLOCKFALL - terminal front-end

use blockfall::game::{Game, Outcome};
use blockfall::input::{Input, KeyBindings};
use blockfall::menu::{Menu, MenuAction};
use blockfall::settings::Settings;
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Application state
enum AppState {
    Menu(Menu),
    Playing(Game),
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file, the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let (mut settings, load_status) = Settings::load();
    let initial_best = settings.best_scores.clone();
    let initial_difficulty = settings.gameplay.difficulty;

    let result = run_terminal(&mut settings);

    let changed = settings.best_scores != initial_best
        || settings.gameplay.difficulty != initial_difficulty;
    if load_status.should_save(changed) {
        if let Err(e) = settings.save() {
            eprintln!("Warning: Could not save settings: {}", e);
        }
    } else {
        tracing::info!("Leaving unreadable settings file untouched");
    }

    match &result {
        Ok(Some(game)) => {
            println!("\nThanks for playing BLOCKFALL!");
            println!("Difficulty: {}", game.difficulty().name());
            println!("Final Score: {} | Lines: {}", game.score.points, game.score.lines);
        }
        Ok(None) => println!("\nThanks for playing BLOCKFALL!"),
        Err(e) => tracing::error!("Terminal error: {}", e),
    }

    result.map(|_| ())
}

/// Set up the terminal, run the app and restore the terminal on every path
fn run_terminal(settings: &mut Settings) -> io::Result<Option<Game>> {
    enable_raw_mode()?;

    let result = execute!(stdout(), EnterAlternateScreen)
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout())))
        .and_then(|mut terminal| {
            terminal.clear()?;
            run_app(&mut terminal, settings)
        });

    restore_terminal();
    result
}

/// Undo raw mode and the alternate screen, carrying on past failures
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::error!("Could not disable raw mode: {}", e);
        eprintln!("Warning: Could not disable raw mode: {}", e);
    }
    if let Err(e) = execute!(stdout(), LeaveAlternateScreen) {
        tracing::error!("Could not leave alternate screen: {}", e);
        eprintln!("Warning: Could not leave alternate screen: {}", e);
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &mut Settings,
) -> io::Result<Option<Game>> {
    let bindings = KeyBindings::from_settings(settings);
    let mut state = AppState::Menu(Menu::new(settings.gameplay.difficulty));
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| match &state {
            AppState::Menu(menu) => ui::render_menu(frame, menu),
            AppState::Playing(game) => ui::render_game(frame, game, settings),
        })?;

        let mut outcome = Outcome::Ignored;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match &mut state {
                    AppState::Menu(menu) => match menu.handle_key(key.code) {
                        MenuAction::Start(difficulty) => {
                            settings.gameplay.difficulty = Some(difficulty);
                            let mut game = Game::new();
                            game.start(difficulty);
                            state = AppState::Playing(game);
                            last_frame = Instant::now();
                        }
                        MenuAction::Quit => return Ok(None),
                        MenuAction::None => {}
                    },
                    AppState::Playing(game) => match bindings.map(key) {
                        Some(Input::Quit) => {
                            record_best(settings, game);
                            return Ok(Some(game.clone()));
                        }
                        Some(Input::Game(command)) => outcome = game.command(command),
                        None => {}
                    },
                }
            }
        }

        if let AppState::Playing(game) = &mut state {
            let now = Instant::now();
            let tick = game.tick(now.duration_since(last_frame));
            last_frame = now;

            if matches!(outcome, Outcome::GameOver { .. })
                || matches!(tick, Outcome::GameOver { .. })
            {
                record_best(settings, game);
            }
        }
    }
}

fn record_best(settings: &mut Settings, game: &Game) {
    if settings.best_scores.record(game.difficulty(), game.score.points) {
        tracing::info!(
            "New best on {}: {}",
            game.difficulty().name(),
            game.score.points
        );
    }
}
