//! Type definitions and enums for the application screens and menus.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Running game.
    ///
    /// This variant represents the screen where the board is displayed and the player is in
    /// control.
    InGame,
    /// Finished game.
    ///
    /// This variant represents the board of a won or lost game with the end-of-game menu drawn on
    /// top of it.
    GameOver(GameOverItem),
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "New Game" menu option.
    NewGame,
    /// "Quit" menu option.
    Quit,
}

/// End-of-game menu options.
///
/// This enumeration holds the choices offered once a game is won or lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GameOverItem {
    /// "Play Again" option, starting a fresh level straight away.
    PlayAgain,
    /// "Main Menu" option.
    MainMenu,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Each variant stores the number of rows the menu needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// End-of-game menu after reaching the exit.
    Victory(u8),
    /// End-of-game menu after running out of health.
    Defeat(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &'static str {
        match self {
            Self::MainMenu(_) => "blastmaze",
            Self::Victory(_) => "Victory!",
            Self::Defeat(_) => "Game Over",
        }
    }

    /// Returns the number of rows stored by the menu type variant.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::Victory(value) | Self::Defeat(value) => *value,
        }
    }
}
