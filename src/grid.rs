//! Board geometry and level generation.
//!
//! This module contains the [`Grid`] type holding the static layout of a level, the coordinate and
//! direction types every other module moves around with, and the [`generate`] function that rolls
//! a fresh level together with its monster spawn set.

use std::fmt;

use color_eyre::eyre::{bail, OptionExt as _, Result};
use rand::Rng;

use crate::entities::Monster;

/// Side length of the square board, border ring included.
pub const GRID_SIZE: usize = 12;

/// Number of monsters placed on a freshly generated level.
pub const MONSTER_COUNT: usize = 4;

/// Fixed location of the exit tile.
pub const EXIT_POSITION: Position = Position::new(GRID_SIZE - 2, GRID_SIZE - 2);

/// Lower bound (inclusive) of the coordinate range monsters are sampled from.
const SPAWN_MIN: usize = 2;

/// Upper bound (exclusive) of the coordinate range monsters are sampled from.
const SPAWN_MAX: usize = GRID_SIZE - 2;

/// Cumulative probability bands used when filling interior cells.
///
/// A single uniform draw in `[0, 1)` picks the first band whose limit is above it. Draws past the
/// last band leave the cell empty.
const CONTENT_BANDS: [(f64, CellKind); 5] = [
    (0.40, CellKind::Destructible),
    (0.43, CellKind::Trap),
    (0.45, CellKind::UpgradeBombs),
    (0.47, CellKind::UpgradeRange),
    (0.49, CellKind::UpgradeHealth),
];

/// Grid coordinate.
///
/// Coordinates are unsigned, so stepping off the top or left edge yields no position at all
/// rather than a negative one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column, growing to the right.
    pub x: usize,
    /// Row, growing downwards.
    pub y: usize,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position in the given direction.
    ///
    /// Returns `None` when the step would leave the non-negative coordinate range. Steps past the
    /// bottom or right edge still produce a position; bounds against the board are checked by
    /// [`Grid::get`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();

        Some(Self::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// One of the four orthogonal unit moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// All directions, in the order neighbours are enumerated.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(dx, dy)` unit vector of the direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a `(dx, dy)` vector back to a direction.
    ///
    /// Anything other than an orthogonal unit vector has no direction.
    #[must_use]
    pub const fn from_delta(dx: isize, dy: isize) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Static content of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor.
    #[default]
    Empty,
    /// Indestructible wall.
    Wall,
    /// Block that bombs can clear.
    Destructible,
    /// Level exit; stepping on it wins the game.
    Exit,
    /// Single-use trap that costs one health point.
    Trap,
    /// Raises bomb capacity by one.
    UpgradeBombs,
    /// Raises blast range by one.
    UpgradeRange,
    /// Restores one health point.
    UpgradeHealth,
}

impl CellKind {
    /// Returns the character used for this cell in text layouts.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Destructible => '+',
            Self::Exit => 'E',
            Self::Trap => '^',
            Self::UpgradeBombs => 'b',
            Self::UpgradeRange => 'r',
            Self::UpgradeHealth => 'h',
        }
    }

    /// Parses a text layout character back into a cell kind.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            '+' => Some(Self::Destructible),
            'E' => Some(Self::Exit),
            '^' => Some(Self::Trap),
            'b' => Some(Self::UpgradeBombs),
            'r' => Some(Self::UpgradeRange),
            'h' => Some(Self::UpgradeHealth),
            _ => None,
        }
    }

    /// Whether the player may stand on this cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall | Self::Destructible)
    }

    /// Whether a monster may step onto this cell.
    #[must_use]
    pub const fn is_monster_walkable(self) -> bool {
        matches!(self, Self::Empty | Self::Trap)
    }
}

/// Square board of [`GRID_SIZE`] by [`GRID_SIZE`] cells stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Cell storage, indexed by `y * GRID_SIZE + x`.
    cells: Vec<CellKind>,
}

impl Grid {
    /// Builds a board with every cell set to `kind`.
    #[must_use]
    pub fn filled(kind: CellKind) -> Self {
        Self {
            cells: vec![kind; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Builds a board from a text layout.
    ///
    /// The layout holds [`GRID_SIZE`] lines of [`GRID_SIZE`] glyphs each (see
    /// [`CellKind::glyph`]). Surrounding whitespace on every line is ignored.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The layout doesn't have exactly [`GRID_SIZE`] rows or a row has the wrong width
    /// - A character isn't a known glyph
    /// - The border ring contains anything other than walls
    pub fn parse(layout: &str) -> Result<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != GRID_SIZE {
            bail!("expected {GRID_SIZE} rows in layout, found {}", rows.len());
        }

        let mut grid = Self::filled(CellKind::Empty);
        for (y, row) in rows.into_iter().enumerate() {
            if row.chars().count() != GRID_SIZE {
                bail!("row {y} of layout is not {GRID_SIZE} cells wide");
            }

            for (x, glyph) in row.chars().enumerate() {
                let kind = CellKind::from_glyph(glyph)
                    .ok_or_eyre("unknown glyph in level layout")?;
                let position = Position::new(x, y);

                if Self::is_border(position) && kind != CellKind::Wall {
                    bail!("border cell {position} is not a wall");
                }

                grid.set(position, kind);
            }
        }

        Ok(grid)
    }

    /// Returns the storage index of a position, if it lies on the board.
    const fn index(position: Position) -> Option<usize> {
        if position.x < GRID_SIZE && position.y < GRID_SIZE {
            Some(position.y * GRID_SIZE + position.x)
        } else {
            None
        }
    }

    /// Returns the cell at `position`, or `None` when it lies off the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<CellKind> {
        self.cells.get(Self::index(position)?).copied()
    }

    /// Overwrites the cell at `position`. Positions off the board are ignored.
    pub fn set(&mut self, position: Position, kind: CellKind) {
        if let Some(cell) = Self::index(position).and_then(|index| self.cells.get_mut(index)) {
            *cell = kind;
        }
    }

    /// Iterates over the board rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(GRID_SIZE)
    }

    /// Iterates over every board position, row by row.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
    }

    /// Whether the position belongs to the outer wall ring.
    #[must_use]
    pub const fn is_border(position: Position) -> bool {
        position.x == 0
            || position.y == 0
            || position.x == GRID_SIZE - 1
            || position.y == GRID_SIZE - 1
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(formatter, "{line}")?;
        }

        Ok(())
    }
}

/// Whether the position is one of the fixed interior pillars.
const fn is_pillar(position: Position) -> bool {
    position.x % 2 == 0
        && position.y % 2 == 0
        && position.x >= 2
        && position.y >= 2
        && position.x < GRID_SIZE - 2
        && position.y < GRID_SIZE - 2
}

/// Whether the position sits in one of the corners kept free of generated content.
const fn in_safe_corner(position: Position) -> bool {
    let near_start = position.x < 3 && position.y < 3;
    let near_exit = position.x > GRID_SIZE - 4 && position.y > GRID_SIZE - 4;

    near_start || near_exit
}

/// Whether a monster may not spawn at the position because it is too close to the player start.
const fn in_spawn_zone(position: Position) -> bool {
    position.x < 4 && position.y < 4
}

/// Maps a uniform draw in `[0, 1)` to the content of an interior cell.
fn roll_content(roll: f64) -> CellKind {
    CONTENT_BANDS
        .iter()
        .find(|(limit, _)| roll < *limit)
        .map_or(CellKind::Empty, |&(_, kind)| kind)
}

/// Generates a new level and its monsters.
///
/// The shape is always the same: a wall ring, a checkerboard of pillars and the exit in the
/// bottom-right corner. Interior content and monster placement are rolled from `rng`, so a seeded
/// source reproduces the same level.
pub fn generate<R: Rng>(rng: &mut R) -> (Grid, Vec<Monster>) {
    let mut grid = Grid::filled(CellKind::Empty);

    for position in Grid::positions() {
        if Grid::is_border(position) || is_pillar(position) {
            grid.set(position, CellKind::Wall);
        }
    }

    for position in Grid::positions() {
        if grid.get(position) != Some(CellKind::Empty) || in_safe_corner(position) {
            continue;
        }

        grid.set(position, roll_content(rng.gen()));
    }

    grid.set(EXIT_POSITION, CellKind::Exit);

    // The cell diagonally above the exit lies in its safe corner and is always empty, so the
    // resampling below terminates.
    let mut monsters = Vec::with_capacity(MONSTER_COUNT);
    for id in 0..MONSTER_COUNT {
        let position = loop {
            let candidate = Position::new(
                rng.gen_range(SPAWN_MIN..SPAWN_MAX),
                rng.gen_range(SPAWN_MIN..SPAWN_MAX),
            );

            if grid.get(candidate) == Some(CellKind::Empty) && !in_spawn_zone(candidate) {
                break candidate;
            }
        };

        monsters.push(Monster::new(id, position));
    }

    (grid, monsters)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    /// Seeds used by the property tests over generated levels.
    const SEEDS: std::ops::Range<u64> = 0..64;

    /// Counts the cells of the given kind.
    fn count(grid: &Grid, kind: CellKind) -> usize {
        Grid::positions()
            .filter(|position| grid.get(*position) == Some(kind))
            .count()
    }

    /// Whether generation rolls content for the cell.
    fn is_rolled(position: Position) -> bool {
        !Grid::is_border(position) && !is_pillar(position) && !in_safe_corner(position)
    }

    #[test]
    fn test_generated_border_is_wall() {
        for seed in SEEDS {
            let (grid, _) = generate(&mut StdRng::seed_from_u64(seed));

            for position in Grid::positions().filter(|position| Grid::is_border(*position)) {
                assert_eq!(
                    grid.get(position),
                    Some(CellKind::Wall),
                    "border cell {position} should be a wall for seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_generated_exit_is_unique_and_fixed() {
        for seed in SEEDS {
            let (grid, _) = generate(&mut StdRng::seed_from_u64(seed));

            assert_eq!(count(&grid, CellKind::Exit), 1, "seed {seed}");
            assert_eq!(grid.get(EXIT_POSITION), Some(CellKind::Exit), "seed {seed}");
        }
    }

    #[test]
    fn test_generated_pillars_and_safe_corners() {
        for seed in SEEDS {
            let (grid, _) = generate(&mut StdRng::seed_from_u64(seed));

            for position in Grid::positions() {
                let cell = grid.get(position).expect("position should be on the board");

                if is_pillar(position) {
                    assert_eq!(cell, CellKind::Wall, "pillar at {position}");
                } else if in_safe_corner(position) && !Grid::is_border(position) {
                    assert!(
                        matches!(cell, CellKind::Empty | CellKind::Exit),
                        "safe corner cell {position} should be free, found {cell:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_content_band_limits() {
        let draws = [
            (0.0, CellKind::Destructible),
            (0.399, CellKind::Destructible),
            (0.40, CellKind::Trap),
            (0.429, CellKind::Trap),
            (0.43, CellKind::UpgradeBombs),
            (0.449, CellKind::UpgradeBombs),
            (0.45, CellKind::UpgradeRange),
            (0.469, CellKind::UpgradeRange),
            (0.47, CellKind::UpgradeHealth),
            (0.489, CellKind::UpgradeHealth),
            (0.49, CellKind::Empty),
            (0.999, CellKind::Empty),
        ];

        for (roll, kind) in draws {
            assert_eq!(roll_content(roll), kind, "draw {roll}");
        }
    }

    #[test]
    fn test_generated_content_distribution() {
        let mut rolled = 0_usize;
        let mut destructible = 0_usize;
        let mut kinds = Vec::new();

        for seed in 0..400 {
            let (grid, _) = generate(&mut StdRng::seed_from_u64(seed));

            for position in Grid::positions().filter(|position| is_rolled(*position)) {
                let cell = grid.get(position).expect("position should be on the board");
                rolled += 1;
                if cell == CellKind::Destructible {
                    destructible += 1;
                }
                if !kinds.contains(&cell) {
                    kinds.push(cell);
                }
            }
        }

        let share = destructible * 100 / rolled;
        assert!((37..=43).contains(&share), "destructible share was {share}%");

        for kind in [
            CellKind::Empty,
            CellKind::Destructible,
            CellKind::Trap,
            CellKind::UpgradeBombs,
            CellKind::UpgradeRange,
            CellKind::UpgradeHealth,
        ] {
            assert!(kinds.contains(&kind), "{kind:?} never generated");
        }
        assert!(!kinds.contains(&CellKind::Wall), "rolled cells are never walls");
        assert!(!kinds.contains(&CellKind::Exit), "rolled cells are never the exit");
    }

    #[test]
    fn test_generated_monsters() {
        for seed in SEEDS {
            let (grid, monsters) = generate(&mut StdRng::seed_from_u64(seed));

            assert_eq!(monsters.len(), MONSTER_COUNT);
            for (id, monster) in monsters.iter().enumerate() {
                assert_eq!(monster.id, id, "ids follow placement order");
                assert!(!in_spawn_zone(monster.position), "seed {seed}");
                assert!((SPAWN_MIN..SPAWN_MAX).contains(&monster.position.x));
                assert!((SPAWN_MIN..SPAWN_MAX).contains(&monster.position.y));
                assert_eq!(grid.get(monster.position), Some(CellKind::Empty));
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let first = generate(&mut StdRng::seed_from_u64(42));
        let second = generate(&mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn test_position_step() {
        let origin = Position::new(0, 0);

        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_direction_from_delta() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }

        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn test_grid_get_out_of_bounds() {
        let grid = Grid::filled(CellKind::Empty);

        assert_eq!(grid.get(Position::new(GRID_SIZE, 0)), None);
        assert_eq!(grid.get(Position::new(0, GRID_SIZE)), None);
    }

    #[test]
    fn test_grid_parse_round_trips_display() {
        let (grid, _) = generate(&mut StdRng::seed_from_u64(3));
        let parsed = Grid::parse(&grid.to_string()).expect("generated layout should parse");

        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_grid_parse_rejects_bad_layouts() {
        assert!(Grid::parse("").is_err());
        assert!(Grid::parse("###\n#.#\n###").is_err());

        let mut rows = vec!["############"; GRID_SIZE];
        if let Some(row) = rows.get_mut(1) {
            *row = "#....x.....#";
        }
        assert!(Grid::parse(&rows.join("\n")).is_err(), "unknown glyph");

        if let Some(row) = rows.get_mut(1) {
            *row = ".##########.";
        }
        assert!(Grid::parse(&rows.join("\n")).is_err(), "open border");
    }

    #[test]
    fn test_cell_kind_glyphs() {
        let kinds = [
            CellKind::Empty,
            CellKind::Wall,
            CellKind::Destructible,
            CellKind::Exit,
            CellKind::Trap,
            CellKind::UpgradeBombs,
            CellKind::UpgradeRange,
            CellKind::UpgradeHealth,
        ];

        for kind in kinds {
            assert_eq!(CellKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(CellKind::from_glyph('?'), None);
    }
}
