//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{GameOverItem, MainMenuItem, Screen},
    App,
};

/// Longest time the main loop waits for input before updating the simulation.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler for the current
/// screen. It uses a timeout to avoid blocking the UI, then feeds the wall-clock time that went by
/// into the game.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_TIMEOUT)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    update_game(app);

    Ok(())
}

/// Dispatches a key press to the handler of the current screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    if matches!(app.screen, Screen::InGame) {
        handle_game_key(app, code);
        return;
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => handle_j_events(app),
        KeyCode::Char('k') | KeyCode::Up => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app),
        _ => {}
    }
}

/// Advances the game clock by the wall-clock time since the last update.
///
/// The clock only runs while a game is on screen, so time spent in menus is not simulated. When
/// the game ends, the end-of-game menu takes over.
pub(crate) fn update_game(app: &mut App) {
    let now = Instant::now();
    let elapsed = now.duration_since(app.last_update);
    app.last_update = now;

    if matches!(app.screen, Screen::InGame) {
        app.game.advance(elapsed);

        if app.game.status().is_terminal() {
            app.screen = Screen::GameOver(GameOverItem::PlayAgain);
        }
    }
}

/// Handles key presses while a game is running.
///
/// Arrow keys and 'h', 'j', 'k', 'l' move the player, space places a bomb, escape returns to the
/// main menu and 'q' quits.
pub(crate) fn handle_game_key(app: &mut App, code: KeyCode) {
    let (dx, dy) = match code {
        KeyCode::Up | KeyCode::Char('k') => (0, -1),
        KeyCode::Down | KeyCode::Char('j') => (0, 1),
        KeyCode::Left | KeyCode::Char('h') => (-1, 0),
        KeyCode::Right | KeyCode::Char('l') => (1, 0),
        KeyCode::Char(' ') => {
            if let Err(rejection) = app.game.on_place_bomb() {
                debug!("bomb not placed: {rejection}");
            }
            return;
        }
        KeyCode::Esc => {
            app.screen = Screen::MainMenu(MainMenuItem::NewGame);
            return;
        }
        KeyCode::Char('q') => {
            app.exit = true;
            return;
        }
        _ => return,
    };

    if let Err(rejection) = app.game.on_delta(dx, dy) {
        debug!("move ({dx}, {dy}) rejected: {rejection}");
    }

    if app.game.status().is_terminal() {
        app.screen = Screen::GameOver(GameOverItem::PlayAgain);
    }
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::NewGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::GameOver(GameOverItem::PlayAgain) => {
            app.screen = Screen::GameOver(GameOverItem::MainMenu);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::NewGame);
        }
        Screen::GameOver(GameOverItem::MainMenu) => {
            app.screen = Screen::GameOver(GameOverItem::PlayAgain);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection.
///
/// Starting a game, from the main menu or from the end-of-game menu, always resets the level so
/// every game begins on a freshly generated board.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::NewGame) | Screen::GameOver(GameOverItem::PlayAgain) => {
            app.game.reset();
            app.last_update = Instant::now();
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::GameOver(GameOverItem::MainMenu) => {
            app.screen = Screen::MainMenu(MainMenuItem::NewGame);
        }
        Screen::InGame => {}
    }
}
