/*!
# Blockfall Engine

`blockfall_engine` is the simulation core of a single-player falling-block
puzzle game: the falling-piece state machine, rotation with wall-kick
resolution, collision detection, line clears and score/level progression.

It is deliberately I/O-free; a frontend feeds it button changes and elapsed
time and reads back the state it wants to draw.

# Examples

```
use blockfall_engine::{Button, ButtonChange, Game};
use std::time::Duration;

// Starting up a game. An explicit seed makes the piece sequence reproducible.
let mut game = Game::builder().seed(42).build();

// Telling the game that 'left' was just pressed; the active piece tries to
// move left immediately and will auto-repeat while the button stays held.
game.handle(ButtonChange::Press(Button::MoveLeft));

// Advancing the game by one frame's worth of time; pieces fall, lines clear.
let _events = game.update(Duration::from_millis(16));

// Read most recent game state; this is how a UI knows what to render.
let _occupied = game.piece().cells();
let _points = game.score();
```
*/

#![warn(missing_docs)]

mod bag;
mod game_builder;
mod game_update;
mod rotation;

use std::{ops, time::Duration};

use rand_chacha::ChaCha12Rng;

pub use bag::Bag;
pub use game_builder::GameBuilder;

/// The type of one cell of the playing grid: empty, or the kind of the piece
/// whose tile was locked there.
pub type Cell = Option<PieceKind>;
/// The type of horizontal lines of the playing grid.
pub type Line = [Cell; Game::WIDTH];
/// The type of the entire two-dimensional playing grid, row `0` at the top.
pub type Grid = [Line; Game::HEIGHT];
/// Coordinates used to address the [`Grid`]; `x` grows rightward, `y`
/// downward. `y` may be negative for piece tiles still above the visible grid.
pub type Coord = (i32, i32);
/// Coordinate offsets that can be added to [`Coord`]inates.
pub type Offset = (i32, i32);
/// The internal RNG used by a game.
pub type GameRng = ChaCha12Rng;

/// Represents one of the seven falling piece shapes.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    /// 'I'-piece. Four tiles in one straight line.
    I = 0,
    /// 'O'-piece. Four tiles as one big square.
    O,
    /// 'T'-piece. Four tiles in a 'T'-junction shape.
    T,
    /// 'S'-piece. Four tiles connected in an 'S'-snaking manner.
    S,
    /// 'Z'-piece. Four tiles connected in a 'Z'-snaking manner.
    Z,
    /// 'J'-piece. Four tiles in a 'J'-shape.
    J,
    /// 'L'-piece. Four tiles in an 'L'-shape.
    L,
}

/// Represents the rotation state an active piece can be in.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// Spawn rotation.
    R0 = 0,
    /// One clockwise quarter turn from spawn.
    R1,
    /// Two quarter turns from spawn.
    R2,
    /// Three clockwise quarter turns from spawn.
    R3,
}

/// A color as used for piece and grid tiles.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// An active piece in play.
///
/// All movement, rotation and collision logic lives here; the piece only ever
/// reads the grid and mutates itself, full rollback on any rejected attempt.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    kind: PieceKind,
    /// Anchor/pivot cell position on the grid.
    position: Coord,
    rotation: Rotation,
    /// Lowest legal row for the anchor at the current column/rotation.
    ghost_y: i32,
    /// Cosmetic spawn-appearance countdown; irrelevant to any game rule.
    appear_left: Duration,
}

/// Represents an abstract game input.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    /// Moves the piece once to the left, repeating while held.
    MoveLeft = 0,
    /// Moves the piece once to the right, repeating while held.
    MoveRight,
    /// Rotate the piece by +90° (clockwise).
    RotateCw,
    /// Rotate the piece by -90° (counter-clockwise).
    RotateCcw,
    /// "Soft" dropping: gravity is sped up while this is held.
    DropSoft,
    /// "Hard" dropping: the piece immediately falls as far as it can and
    /// locks there.
    DropHard,
}

/// A change in button state, between being held down or unpressed.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonChange {
    /// The signal of a button now being active / 'pressed down'.
    Press(Button),
    /// The signal of a button now being inactive / 'not pressed down'.
    Release(Button),
}

/// Feedback events returned by [`Game::update`] and [`Game::handle`].
///
/// These exist so a frontend can trigger sounds or visual effects
/// fire-and-forget; the engine never waits on a consumer.
#[derive(Eq, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// The active piece was committed to the grid in this configuration.
    PieceLocked {
        /// The piece as it was at lock time.
        piece: Piece,
    },
    /// One or more rows completed and entered the timed clear animation.
    LinesClearing {
        /// Grid row indices of the completed rows.
        rows: Vec<usize>,
    },
    /// The active piece was hard-dropped.
    HardDropped {
        /// How many cells the piece traveled down.
        distance: u32,
    },
    /// The level just increased.
    LevelUp {
        /// The new level.
        level: u32,
    },
    /// A spawning piece was blocked by locked tiles; the game is over.
    GameOver,
}

/// The game's phase state machine.
#[derive(Eq, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// A piece is falling and controllable.
    Falling,
    /// Completed rows are mid removal animation; piece input is suspended.
    Clearing {
        /// The completed rows waiting to be compacted away.
        rows: Vec<usize>,
        /// Remaining animation time.
        time_left: Duration,
    },
    /// Terminal: a spawning piece collided with locked tiles.
    Over,
}

/// Configuration options of the game.
///
/// These can be modified without hurting internal invariants, though changing
/// them mid-game might make a seeded game non-reproducible.
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Gravity at level 1, in rows per second.
    pub base_fall_rate: f64,
    /// Additional rows per second per level above 1.
    pub level_speed_factor: f64,
    /// Gravity multiplier while 'soft drop' is held.
    pub soft_drop_factor: f64,
    /// Cleared lines needed to advance a level.
    pub lines_per_level: u32,
    /// Level cap.
    pub max_level: u32,
    /// How long it takes for held side movement to repeat.
    pub auto_repeat_interval: Duration,
    /// How long completed rows stay on the grid before being compacted away.
    pub line_clear_duration: Duration,
    /// How long a freshly spawned piece takes to fade in (cosmetic).
    pub piece_appear_duration: Duration,
    /// Whether a blocked spawn ends the game. With `zen` on, the game never
    /// ends; blocked spawns simply overlap until lines free up room.
    pub zen: bool,
}

/// Main game struct representing a round of play.
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    /// Some internal configuration options of the `Game`.
    pub config: Config,
    seed: u64,
    rng: GameRng,
    bag: Bag,
    grid: Grid,
    active: Piece,
    next: PieceKind,
    phase: Phase,
    score: u32,
    level: u32,
    lines_cleared: u32,
    fall_timer: Duration,
    move_timer: Duration,
    held: [bool; Button::VARIANTS.len()],
}

impl PieceKind {
    /// All `PieceKind` enum variants in order.
    ///
    /// Note that `PieceKind::VARIANTS[k as usize] == k` always holds.
    pub const VARIANTS: [Self; 7] = {
        use PieceKind::*;
        [I, O, T, S, Z, J, L]
    };

    /// Returns the tile offsets of a piece shape relative to its anchor,
    /// given a rotation state.
    ///
    /// Kinds with rotational symmetry repeat entries so that indexing stays
    /// uniform across all four states.
    #[rustfmt::skip]
    pub const fn cells(self, rotation: Rotation) -> [Offset; 4] {
        use Rotation::*;
        match self {
            PieceKind::I => match rotation {
                R0 | R2 => [(0, 0), (0, -1), (0, 1), (0, 2)],
                R1 | R3 => [(0, 0), (-1, 0), (1, 0), (2, 0)],
            },
            PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            PieceKind::T => match rotation {
                R0 => [(0, 0), (-1, 0), (1, 0), (0, -1)],
                R1 => [(0, 0), (0, -1), (0, 1), (1, 0)],
                R2 => [(0, 0), (-1, 0), (1, 0), (0, 1)],
                R3 => [(0, 0), (0, -1), (0, 1), (-1, 0)],
            },
            PieceKind::S => match rotation {
                R0 | R2 => [(0, 0), (-1, 0), (0, -1), (1, -1)],
                R1 | R3 => [(0, 0), (0, -1), (1, 0), (1, 1)],
            },
            PieceKind::Z => match rotation {
                R0 | R2 => [(0, 0), (1, 0), (0, -1), (-1, -1)],
                R1 | R3 => [(0, 0), (0, 1), (1, 0), (1, -1)],
            },
            PieceKind::J => match rotation {
                R0 => [(0, 0), (-1, 0), (1, 0), (1, -1)],
                R1 => [(0, 0), (0, -1), (0, 1), (1, 1)],
                R2 => [(0, 0), (-1, 0), (1, 0), (-1, 1)],
                R3 => [(0, 0), (0, -1), (0, 1), (-1, -1)],
            },
            PieceKind::L => match rotation {
                R0 => [(0, 0), (-1, 0), (1, 0), (-1, -1)],
                R1 => [(0, 0), (0, -1), (0, 1), (1, -1)],
                R2 => [(0, 0), (-1, 0), (1, 0), (1, 1)],
                R3 => [(0, 0), (0, -1), (0, 1), (-1, 1)],
            },
        }
    }

    /// Returns the display color of the piece kind.
    #[rustfmt::skip]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb { r:   0, g: 240, b: 240 }, // Cyan
            PieceKind::O => Rgb { r: 240, g: 240, b:   0 }, // Yellow
            PieceKind::T => Rgb { r: 160, g:   0, b: 240 }, // Purple
            PieceKind::S => Rgb { r:   0, g: 240, b:   0 }, // Green
            PieceKind::Z => Rgb { r: 240, g:   0, b:   0 }, // Red
            PieceKind::J => Rgb { r:   0, g:   0, b: 240 }, // Blue
            PieceKind::L => Rgb { r: 240, g: 160, b:   0 }, // Orange
        }
    }
}

impl Rotation {
    /// All `Rotation` enum variants in order.
    ///
    /// Note that `Rotation::VARIANTS[r as usize] == r` always holds.
    pub const VARIANTS: [Self; 4] = {
        use Rotation::*;
        [R0, R1, R2, R3]
    };

    /// Find a new rotation state by turning clockwise some number of times.
    ///
    /// This accepts negative numbers for counter-clockwise turns.
    pub const fn turned(self, right_turns: i8) -> Self {
        Rotation::VARIANTS[(self as i8 + right_turns).rem_euclid(4) as usize]
    }
}

impl Rgb {
    /// A shade of this color suitable for borders, 40 darker per channel.
    pub const fn darker(self) -> Self {
        Self {
            r: self.r.saturating_sub(40),
            g: self.g.saturating_sub(40),
            b: self.b.saturating_sub(40),
        }
    }

    /// A shade of this color suitable for highlights, 40 lighter per channel.
    pub const fn lighter(self) -> Self {
        Self {
            r: self.r.saturating_add(40),
            g: self.g.saturating_add(40),
            b: self.b.saturating_add(40),
        }
    }
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position, horizontally
    /// centered with the anchor on the topmost grid row.
    ///
    /// Some of its tiles may initially lie above the visible grid.
    pub fn spawn(kind: PieceKind, grid: &Grid, appear: Duration) -> Self {
        let mut piece = Self {
            kind,
            position: (Game::WIDTH as i32 / 2 - 1, 0),
            rotation: Rotation::R0,
            ghost_y: 0,
            appear_left: appear,
        };
        piece.update_ghost(grid);
        piece
    }

    /// The kind of the piece.
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The anchor/pivot position of the piece on the grid.
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// The current rotation state of the piece.
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Returns the absolute grid coordinates of the four tiles of the piece.
    pub fn cells(&self) -> [Coord; 4] {
        self.cells_at(self.position)
    }

    /// Returns the tile coordinates of the ghost piece, i.e. where the piece
    /// would come to rest if dropped straight down.
    pub fn ghost_cells(&self) -> [Coord; 4] {
        self.cells_at((self.position.0, self.ghost_y))
    }

    fn cells_at(&self, (x, y): Coord) -> [Coord; 4] {
        self.kind
            .cells(self.rotation)
            .map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Whether the piece, anchored at `anchor`, would overlap grid bounds or
    /// locked tiles. Tiles above the grid (`y < 0`) are exempt from the
    /// occupancy check but still bounded horizontally.
    fn fits_at(&self, grid: &Grid, anchor: Coord) -> bool {
        self.cells_at(anchor).iter().all(|&(x, y)| {
            (0..Game::WIDTH as i32).contains(&x)
                && y < Game::HEIGHT as i32
                && (y < 0 || grid[y as usize][x as usize].is_none())
        })
    }

    /// Whether the piece currently overlaps grid bounds or locked tiles.
    pub fn collides(&self, grid: &Grid) -> bool {
        !self.fits_at(grid, self.position)
    }

    /// Tries to move the piece by the given offset.
    ///
    /// On collision the piece is left exactly as before and `false` is
    /// returned; otherwise the move commits, the ghost position is
    /// recomputed, and `true` is returned. All translation (player movement,
    /// gravity, drops) routes through here.
    pub fn try_move(&mut self, (dx, dy): Offset, grid: &Grid) -> bool {
        let target = (self.position.0 + dx, self.position.1 + dy);
        if !self.fits_at(grid, target) {
            return false;
        }
        self.position = target;
        self.update_ghost(grid);
        true
    }

    /// Tries to rotate the piece one quarter turn, resolving collisions by
    /// trying each wall-kick offset in table order.
    ///
    /// If no candidate offset fits, rotation state and position are fully
    /// reverted and `false` is returned.
    pub fn rotate(&mut self, grid: &Grid, clockwise: bool) -> bool {
        let from = self.rotation;
        self.rotation = from.turned(if clockwise { 1 } else { -1 });
        for (dx, dy) in rotation::kick_candidates(self.kind, from, clockwise) {
            let target = (self.position.0 + dx, self.position.1 + dy);
            if self.fits_at(grid, target) {
                self.position = target;
                self.update_ghost(grid);
                return true;
            }
        }
        self.rotation = from;
        false
    }

    /// Recomputes the ghost position: the lowest anchor row at which the
    /// piece still fits in its current column and rotation.
    pub fn update_ghost(&mut self, grid: &Grid) {
        let mut y = self.position.1;
        while self.fits_at(grid, (self.position.0, y + 1)) {
            y += 1;
        }
        self.ghost_y = y;
    }

    /// Drops the piece straight down as far as it fits and returns the
    /// number of cells traveled.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut distance = 0;
        while self.try_move((0, 1), grid) {
            distance += 1;
        }
        distance
    }

    /// Decays the spawn-appearance timer. Purely cosmetic; this has no
    /// effect on collision or placement logic.
    pub fn tick(&mut self, dt: Duration) {
        self.appear_left = self.appear_left.saturating_sub(dt);
    }

    /// Remaining spawn-appearance time, counting down to zero.
    pub const fn appear_left(&self) -> Duration {
        self.appear_left
    }
}

impl Button {
    /// All `Button` enum variants.
    ///
    /// Note that `Button::VARIANTS[b as usize] == b` always holds.
    pub const VARIANTS: [Self; 6] = {
        use Button as B;
        [
            B::MoveLeft,
            B::MoveRight,
            B::RotateCw,
            B::RotateCcw,
            B::DropSoft,
            B::DropHard,
        ]
    };
}

impl<T> ops::Index<Button> for [T; Button::VARIANTS.len()] {
    type Output = T;

    fn index(&self, idx: Button) -> &Self::Output {
        &self[idx as usize]
    }
}

impl<T> ops::IndexMut<Button> for [T; Button::VARIANTS.len()] {
    fn index_mut(&mut self, idx: Button) -> &mut Self::Output {
        &mut self[idx as usize]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_fall_rate: 1.0,
            level_speed_factor: 0.1,
            soft_drop_factor: 5.0,
            lines_per_level: 10,
            max_level: 15,
            auto_repeat_interval: Duration::from_millis(50),
            line_clear_duration: Duration::from_millis(500),
            piece_appear_duration: Duration::from_millis(200),
            zen: false,
        }
    }
}

impl Config {
    /// Gravity in rows per second at the given level.
    pub fn fall_rate(&self, level: u32) -> f64 {
        self.base_fall_rate + f64::from(level.saturating_sub(1)) * self.level_speed_factor
    }
}

impl Game {
    /// The game field width.
    pub const WIDTH: usize = 10;
    /// The game field height.
    pub const HEIGHT: usize = 20;

    /// Creates a blank new template representing a yet-to-be-started [`Game`]
    /// ready for configuration.
    pub fn builder() -> GameBuilder {
        GameBuilder::default()
    }

    /// Read accessor for the playing grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read accessor for the active piece.
    pub const fn piece(&self) -> &Piece {
        &self.active
    }

    /// The kind of the upcoming piece.
    pub const fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Read accessor for the current game phase.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The total score achieved in this round of play.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The current level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// The total number of lines cleared in this round of play.
    pub const fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// The seed this game's piece sequence was started from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the game has ended.
    pub const fn over(&self) -> bool {
        matches!(self.phase, Phase::Over)
    }

    /// The rows currently mid clear animation together with the remaining
    /// animation fraction (`1.0` right after completion, `0.0` right before
    /// compaction), or `None` outside the clearing phase.
    pub fn clearing(&self) -> Option<(&[usize], f64)> {
        let Phase::Clearing { rows, time_left } = &self.phase else {
            return None;
        };
        let fraction = time_left.as_secs_f64() / self.config.line_clear_duration.as_secs_f64();
        Some((rows, fraction.clamp(0.0, 1.0)))
    }

    /// How far the active piece's spawn fade-in has progressed, in `0.0..=1.0`.
    pub fn spawn_fraction(&self) -> f64 {
        let full = self.config.piece_appear_duration.as_secs_f64();
        if full <= 0.0 {
            return 1.0;
        }
        1.0 - self.active.appear_left().as_secs_f64() / full
    }
}

/// Returns a grid with every cell empty.
pub const fn empty_grid() -> Grid {
    [[None; Game::WIDTH]; Game::HEIGHT]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_floor() -> Grid {
        let mut grid = empty_grid();
        grid[Game::HEIGHT - 1] = [Some(PieceKind::L); Game::WIDTH];
        grid
    }

    #[test]
    fn move_never_leaves_piece_colliding() {
        let mut grid = grid_with_floor();
        grid[10][4] = Some(PieceKind::J);
        for kind in PieceKind::VARIANTS {
            let mut piece = Piece::spawn(kind, &grid, Duration::ZERO);
            for offset in [(-1, 0), (1, 0), (0, 1), (-20, 0), (0, 30)] {
                let _moved = piece.try_move(offset, &grid);
                assert!(!piece.collides(&grid), "{kind:?} ended up colliding after {offset:?}");
            }
        }
    }

    #[test]
    fn rejected_move_rolls_back() {
        let grid = empty_grid();
        let mut piece = Piece::spawn(PieceKind::T, &grid, Duration::ZERO);
        let before = piece;
        assert!(!piece.try_move((-100, 0), &grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn rotation_roundtrip_does_not_drift() {
        let grid = empty_grid();
        for kind in PieceKind::VARIANTS {
            let mut piece = Piece::spawn(kind, &grid, Duration::ZERO);
            // Away from the walls so both turns succeed unkicked.
            piece.try_move((0, 5), &grid);
            for _ in 0..4 {
                let before = piece;
                let cw = piece.rotate(&grid, true);
                let ccw = piece.rotate(&grid, false);
                assert_eq!(cw, ccw);
                assert_eq!(piece.rotation(), before.rotation());
                assert_eq!(piece.position(), before.position());
                piece.rotate(&grid, true);
            }
        }
    }

    #[test]
    fn wall_kick_resolves_blocked_rotation() {
        let grid = empty_grid();
        // Vertical I flush against the left wall; rotating to horizontal
        // would stick out at x = -1 and only fits via the (1, 0) kick.
        let mut piece = Piece::spawn(PieceKind::I, &grid, Duration::ZERO);
        piece.try_move((0, 5), &grid);
        while piece.try_move((-1, 0), &grid) {}
        assert_eq!(piece.position().0, 0);
        assert!(piece.rotate(&grid, true));
        assert_eq!(piece.position().0, 1, "the kick shifted the piece right");
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn ghost_rests_on_floor_row() {
        let grid = grid_with_floor();
        for kind in PieceKind::VARIANTS {
            let piece = Piece::spawn(kind, &grid, Duration::ZERO);
            let max_dy = kind.cells(Rotation::R0).iter().map(|&(_, dy)| dy).max();
            let expect = Game::HEIGHT as i32 - 2 - max_dy.unwrap();
            let ghost_anchor_y = piece.ghost_cells()[0].1;
            assert_eq!(ghost_anchor_y, expect, "{kind:?}");
        }
    }

    #[test]
    fn hard_drop_returns_cells_traveled() {
        let grid = empty_grid();
        let mut piece = Piece::spawn(PieceKind::O, &grid, Duration::ZERO);
        // O spans rows y..y+1, so the anchor lands on HEIGHT - 2.
        assert_eq!(piece.hard_drop(&grid), Game::HEIGHT as u32 - 2);
        assert!(!piece.collides(&grid));
        assert_eq!(piece.hard_drop(&grid), 0);
    }

    #[test]
    fn spawn_cells_may_extend_above_grid() {
        let grid = empty_grid();
        let piece = Piece::spawn(PieceKind::S, &grid, Duration::ZERO);
        assert!(piece.cells().iter().any(|&(_, y)| y < 0));
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn derived_shades_saturate() {
        let color = PieceKind::I.color();
        assert_eq!(color.lighter(), Rgb { r: 40, g: 255, b: 255 });
        assert_eq!(color.darker(), Rgb { r: 0, g: 200, b: 200 });
    }
}
