//! Core application state and logic for the terminal front end.

use std::time::Instant;

use color_eyre::eyre::Result;
use log::info;
use rand::{rngs::StdRng, thread_rng, Rng as _, SeedableRng as _};
use ratatui::DefaultTerminal;

use crate::{
    events,
    game::Game,
    types::{MainMenuItem, Screen},
    ui, Config,
};

/// Application state container for the game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Game controller.
    ///
    /// This field holds the simulation the in-game screens render and forward input intents to.
    /// A level is generated as soon as the application starts, and every new game resets it.
    pub(crate) game: Game<StdRng>,
    /// Timestamp of the last simulation clock update.
    ///
    /// This field stores when wall-clock time was last fed into the game, so each pass through the
    /// main loop advances the simulation by exactly the time that went by.
    pub(crate) last_update: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from the runtime configuration.
    ///
    /// The game's random source is seeded from the configuration when a seed is given, and from
    /// the thread-local generator otherwise. The seed in use is logged so a game can be replayed.
    pub fn new(config: &Config) -> Self {
        let seed = config.seed.unwrap_or_else(|| thread_rng().gen());
        info!("using seed {seed}");

        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::NewGame),
            game: Game::new(StdRng::seed_from_u64(seed))
                .with_monster_interval(config.monster_interval()),
            last_update: Instant::now(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
