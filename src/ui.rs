//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    entities::MAX_HEALTH,
    game::Game,
    grid::{CellKind, Position, GRID_SIZE},
    state::GameStatus,
    types::{GameOverItem, MainMenuItem, MenuType, Screen},
    App,
};

/// Terminal columns used to draw a single board cell.
const CELL_WIDTH: usize = 2;

/// Terminal columns reserved for the board and the status line under it.
const BOARD_COLUMNS: u16 = 40;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
        Screen::GameOver(item) => game_over(app, frame, item)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure shared by every menu.
///
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter. The menu area is cleared
/// first so it can be drawn on top of the board.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Styles a list of menu entries, highlighting the one at `selected`.
fn menu_lines<'label>(labels: &[&'label str], selected: usize) -> Vec<Line<'label>> {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let style = if idx == selected {
                active_content_style
            } else {
                content_style
            };
            Line::styled(*label, style).centered()
        })
        .collect()
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "New Game" and "Quit". It highlights the
/// currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(2));

    let selected = match item {
        MainMenuItem::NewGame => 0,
        MainMenuItem::Quit => 1,
    };

    for (line, area) in menu_lines(&["New Game", "Quit"], selected)
        .into_iter()
        .zip(inner_layout.iter())
    {
        frame.render_widget(line, *area);
    }
}

/// Builds the two-column span for the board cell at `position`.
///
/// Overlays are drawn in priority order: player, monster, bomb, explosion and finally the tile
/// itself.
fn cell_span<R: rand::Rng>(game: &Game<R>, position: Position) -> Span<'static> {
    let (text, style) = if game.player_at(position) {
        ("@@", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else if game.monster_at(position) {
        ("MM", Style::default().fg(Color::White).bg(Color::Magenta))
    } else if game.bomb_at(position) {
        ("()", Style::default().fg(Color::White).bg(Color::DarkGray))
    } else if game.explosion_at(position) {
        ("**", Style::default().fg(Color::Yellow).bg(Color::Red))
    } else {
        match game.cell_at(position).unwrap_or_default() {
            CellKind::Empty => ("  ", Style::default()),
            CellKind::Wall => ("\u{2588}\u{2588}", Style::default().fg(Color::Green)),
            CellKind::Destructible => ("\u{2592}\u{2592}", Style::default().fg(Color::Yellow)),
            CellKind::Exit => ("[]", Style::default().fg(Color::Black).bg(Color::Green)),
            CellKind::Trap => ("^^", Style::default().fg(Color::Red)),
            CellKind::UpgradeBombs => ("B+", Style::default().fg(Color::Cyan)),
            CellKind::UpgradeRange => ("R+", Style::default().fg(Color::Cyan)),
            CellKind::UpgradeHealth => ("H+", Style::default().fg(Color::LightRed)),
        }
    };

    Span::styled(text, style)
}

/// Builds the status line shown under the board.
fn hud_line<R: rand::Rng>(game: &Game<R>) -> Line<'static> {
    let hud = game.hud();

    Line::styled(
        format!(
            "HP {}/{MAX_HEALTH}  Bombs {}/{}  Range {}  Score {}",
            hud.health, hud.bombs, hud.max_bombs, hud.range, hud.score
        ),
        Style::default().fg(Color::Green),
    )
    .centered()
}

/// Renders the in-game screen with the board, the status line and a key tooltip.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    // Board area + tooltip at bottom
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    // Board rows plus the status line
    let board_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(GRID_SIZE + 1)?),
        Constraint::Min(1),
    ])
    .split(content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get board area from layout")?;

    let board_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(BOARD_COLUMNS.max(u16::try_from(GRID_SIZE * CELL_WIDTH)?)),
        Constraint::Min(1),
    ])
    .split(board_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get board space from horizontal layout")?;

    let mut lines: Vec<Line> = (0..GRID_SIZE)
        .map(|y| {
            Line::from(
                (0..GRID_SIZE)
                    .map(|x| cell_span(&app.game, Position::new(x, y)))
                    .collect::<Vec<_>>(),
            )
            .centered()
        })
        .collect();
    lines.push(hud_line(&app.game));

    frame.render_widget(Paragraph::new(lines), board_area);

    // Render tooltip as a block at the bottom center with top border
    let tooltip_block = Block::bordered()
        .title("(hjkl/arrows) move / (space) bomb / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Renders the final board with the end-of-game menu on top of it.
///
/// The menu title tells a win from a loss, its first row shows the final score and the remaining
/// rows offer to play again or return to the main menu.
///
/// # Errors
///
/// This function may return errors from rendering the board underneath.
pub(crate) fn game_over(app: &App, frame: &mut Frame, item: GameOverItem) -> Result<()> {
    in_game(app, frame)?;

    let menu = if app.game.status() == GameStatus::Won {
        MenuType::Victory(3)
    } else {
        MenuType::Defeat(3)
    };
    let inner_layout = init_menu(frame, menu);

    let selected = match item {
        GameOverItem::PlayAgain => 0,
        GameOverItem::MainMenu => 1,
    };
    let score = format!("Score {}", app.game.score());

    let mut rows = vec![Line::styled(score, Style::default().fg(Color::Yellow)).centered()];
    rows.extend(menu_lines(&["Play Again", "Main Menu"], selected));

    for (line, area) in rows.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(line, *area);
    }

    Ok(())
}
