/*!
This module handles what happens when [`Game::update`] and [`Game::handle`]
are called.
*/

use std::{mem, time::Duration};

use crate::{Button, ButtonChange, Event, Game, Grid, Phase, Piece};

/// Score awarded for clearing 1..=4 rows at once, before the level multiplier.
const SCORE_LINES: [u32; 4] = [100, 300, 500, 800];
/// Score awarded per cell fallen during a held soft drop.
const SCORE_SOFT_DROP: u32 = 1;
/// Score awarded per cell traveled by a hard drop.
const SCORE_HARD_DROP: u32 = 2;

impl Game {
    /// The main function used to advance the game state by elapsed time.
    ///
    /// One call per rendered frame; everything runs to completion within the
    /// call. Animation timers are evaluated before any movement or fall
    /// logic, and while rows are clearing, movement and fall logic are
    /// suspended entirely.
    ///
    /// Returns the feedback [`Event`]s caused by this update, in order.
    pub fn update(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();

        if let Phase::Over = self.phase {
            return events;
        }

        if let Phase::Clearing { rows, time_left } = &mut self.phase {
            match time_left.checked_sub(dt) {
                Some(left) if !left.is_zero() => {
                    *time_left = left;
                }
                _ => {
                    let rows = mem::take(rows);
                    compact(&mut self.grid, &rows);
                    self.spawn_next(&mut events);
                }
            }
            return events;
        }

        self.active.tick(dt);

        // Held-direction auto-repeat; the initial move happened on key-down.
        self.move_timer += dt;
        if self.move_timer >= self.config.auto_repeat_interval {
            self.move_timer = Duration::ZERO;
            if self.held[Button::MoveLeft] {
                self.active.try_move((-1, 0), &self.grid);
            }
            if self.held[Button::MoveRight] {
                self.active.try_move((1, 0), &self.grid);
            }
        }

        // Gravity. A failed step down means the piece has landed.
        let soft = self.held[Button::DropSoft];
        let mut fall_rate = self.config.fall_rate(self.level);
        if soft {
            fall_rate *= self.config.soft_drop_factor;
        }
        self.fall_timer += dt;
        if self.fall_timer >= Duration::from_secs_f64(fall_rate.recip()) {
            self.fall_timer = Duration::ZERO;
            if self.active.try_move((0, 1), &self.grid) {
                if soft {
                    self.score += SCORE_SOFT_DROP;
                }
            } else {
                self.place_piece(&mut events);
            }
        }

        events
    }

    /// Feeds one button state change into the game.
    ///
    /// Presses act on the active piece immediately; held state additionally
    /// drives auto-repeat and soft drop inside [`Game::update`]. While rows
    /// are clearing or the game is over, piece-directed input is ignored but
    /// held-state bookkeeping still happens.
    ///
    /// Returns the feedback [`Event`]s caused by this change, in order.
    pub fn handle(&mut self, change: ButtonChange) -> Vec<Event> {
        let mut events = Vec::new();
        match change {
            ButtonChange::Release(button) => {
                self.held[button] = false;
            }
            ButtonChange::Press(button) => {
                self.held[button] = true;
                if !matches!(self.phase, Phase::Falling) {
                    return events;
                }
                match button {
                    Button::MoveLeft => {
                        self.move_timer = Duration::ZERO;
                        self.active.try_move((-1, 0), &self.grid);
                    }
                    Button::MoveRight => {
                        self.move_timer = Duration::ZERO;
                        self.active.try_move((1, 0), &self.grid);
                    }
                    Button::RotateCw => {
                        self.active.rotate(&self.grid, true);
                    }
                    Button::RotateCcw => {
                        self.active.rotate(&self.grid, false);
                    }
                    // One immediate step so terminals without key-release
                    // events still get something out of tapping soft drop.
                    Button::DropSoft => {
                        if self.active.try_move((0, 1), &self.grid) {
                            self.score += SCORE_SOFT_DROP;
                        }
                    }
                    Button::DropHard => {
                        let distance = self.active.hard_drop(&self.grid);
                        self.score += SCORE_HARD_DROP * distance;
                        events.push(Event::HardDropped { distance });
                        self.place_piece(&mut events);
                    }
                }
            }
        }
        events
    }

    /// Restores the game to a fresh round: empty grid, zeroed counters,
    /// level 1, new bag, two freshly drawn pieces. The RNG keeps its state,
    /// so a reset round does not repeat the previous piece sequence.
    pub fn reset(&mut self) {
        self.grid = crate::empty_grid();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.fall_timer = Duration::ZERO;
        self.move_timer = Duration::ZERO;
        self.held = [false; Button::VARIANTS.len()];
        self.bag = crate::Bag::new();
        self.active = Piece::spawn(
            self.bag.next(&mut self.rng),
            &self.grid,
            self.config.piece_appear_duration,
        );
        self.next = self.bag.next(&mut self.rng);
        self.phase = Phase::Falling;
    }

    /// Commits the active piece to the grid, then either opens the line-clear
    /// window or immediately respawns.
    fn place_piece(&mut self, events: &mut Vec<Event>) {
        let kind = self.active.kind();
        for (x, y) in self.active.cells() {
            if (0..Game::WIDTH as i32).contains(&x) && (0..Game::HEIGHT as i32).contains(&y) {
                self.grid[y as usize][x as usize] = Some(kind);
            }
        }
        events.push(Event::PieceLocked { piece: self.active });

        let rows: Vec<usize> = (0..Game::HEIGHT)
            .filter(|&y| self.grid[y].iter().all(Option::is_some))
            .collect();
        if rows.is_empty() {
            self.spawn_next(events);
            return;
        }

        // Piece shapes cap simultaneous clears at four rows.
        self.score += SCORE_LINES[rows.len().min(SCORE_LINES.len()) - 1] * self.level;
        self.lines_cleared += rows.len() as u32;
        let level = (1 + self.lines_cleared / self.config.lines_per_level).min(self.config.max_level);
        if level > self.level {
            self.level = level;
            events.push(Event::LevelUp { level });
        }
        events.push(Event::LinesClearing { rows: rows.clone() });
        self.phase = Phase::Clearing {
            rows,
            time_left: self.config.line_clear_duration,
        };
    }

    /// Promotes the lookahead to the active piece and draws a new lookahead.
    /// A blocked spawn leaves the grid untouched and ends the game, unless
    /// zen mode keeps it running.
    fn spawn_next(&mut self, events: &mut Vec<Event>) {
        let kind = mem::replace(&mut self.next, self.bag.next(&mut self.rng));
        self.active = Piece::spawn(kind, &self.grid, self.config.piece_appear_duration);
        if self.active.collides(&self.grid) && !self.config.zen {
            self.phase = Phase::Over;
            events.push(Event::GameOver);
        } else {
            self.phase = Phase::Falling;
        }
    }
}

/// Removes the recorded rows from the grid and inserts an equal number of
/// empty rows at the top, preserving the relative order of all other rows.
fn compact(grid: &mut Grid, rows: &[usize]) {
    let mut rows = rows.to_vec();
    // Lowest index first: each removal only disturbs rows above it, so the
    // indices of rows still to be removed stay valid.
    rows.sort_unstable();
    for &row in &rows {
        grid[..=row].rotate_right(1);
        grid[0] = [None; Game::WIDTH];
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{empty_grid, Config, PieceKind};
    use std::ops::Range;

    fn press(game: &mut Game, button: Button) -> Vec<Event> {
        let mut events = game.handle(ButtonChange::Press(button));
        events.extend(game.handle(ButtonChange::Release(button)));
        events
    }

    /// A grid with its bottom `depth` rows full except for the `well` columns.
    fn well_grid(depth: usize, well: Range<usize>) -> Grid {
        let mut grid = empty_grid();
        for row in Game::HEIGHT - depth..Game::HEIGHT {
            for x in 0..Game::WIDTH {
                if !well.contains(&x) {
                    grid[row][x] = Some(PieceKind::S);
                }
            }
        }
        grid
    }

    /// Builds a seeded game on `grid` whose first active piece is `kind`, by
    /// scanning seeds. Some seed in range starts with any wanted kind.
    fn game_with_first(kind: PieceKind, grid: Grid, config: Config) -> Game {
        (0..500)
            .map(|seed| {
                Game::builder()
                    .seed(seed)
                    .config(config.clone())
                    .grid(grid)
                    .build()
            })
            .find(|game| game.piece().kind() == kind)
            .expect("no seed in range spawned the wanted piece kind first")
    }

    fn hard_drop_bonus(events: &[Event]) -> u32 {
        events
            .iter()
            .find_map(|e| match e {
                Event::HardDropped { distance } => Some(SCORE_HARD_DROP * distance),
                _ => None,
            })
            .unwrap_or(0)
    }

    #[test]
    fn hard_drop_scores_two_per_cell_and_locks() {
        let mut game = Game::builder().seed(9).build();
        let ghost_y = game.piece().ghost_cells()[0].1;
        let distance = (ghost_y - game.piece().position().1) as u32;
        let events = press(&mut game, Button::DropHard);
        assert_eq!(game.score(), 2 * distance);
        assert!(events.contains(&Event::HardDropped { distance }));
        assert!(matches!(events[1], Event::PieceLocked { .. }));
        // No full rows on an empty grid: the next piece is live immediately.
        assert_eq!(*game.phase(), Phase::Falling);
    }

    #[test]
    fn soft_drop_scores_one_per_stepped_cell() {
        let mut game = Game::builder().seed(9).build();
        game.handle(ButtonChange::Press(Button::DropSoft));
        assert_eq!(game.score(), 1, "press steps the piece down once");
        // Held soft drop multiplies gravity; one sped-up interval later the
        // piece has stepped down once more and scored once more.
        let rate = game.config.fall_rate(1) * game.config.soft_drop_factor;
        game.update(Duration::from_secs_f64(rate.recip()));
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn gravity_lands_and_locks_pieces() {
        let mut game = Game::builder().seed(5).build();
        let interval = Duration::from_secs_f64(game.config.fall_rate(1).recip());
        let mut locked = false;
        for _ in 0..Game::HEIGHT + 2 {
            let events = game.update(interval);
            if events.iter().any(|e| matches!(e, Event::PieceLocked { .. })) {
                locked = true;
                break;
            }
        }
        assert!(locked);
        assert!(game.grid().iter().flatten().any(Option::is_some));
    }

    #[test]
    fn gravity_accumulates_across_tiny_ticks() {
        let mut game = Game::builder().seed(6).build();
        let y_before = game.piece().position().1;
        let interval = Duration::from_secs_f64(game.config.fall_rate(1).recip());
        let steps = 10u32;
        for _ in 0..steps {
            game.update(interval / steps);
        }
        assert_eq!(game.piece().position().1, y_before + 1);
    }

    #[test]
    fn completing_a_row_enters_clearing_then_compacts() {
        // Bottom row full except the two columns a spawning O piece fills,
        // plus a marker one row up to watch the compaction shift.
        let mut grid = well_grid(1, 4..6);
        grid[Game::HEIGHT - 2][0] = Some(PieceKind::T);
        let mut game = game_with_first(PieceKind::O, grid, Config::default());

        let events = press(&mut game, Button::DropHard);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::LinesClearing { rows } if rows == &[Game::HEIGHT - 1])));
        let (rows, fraction) = game.clearing().expect("clear window should be open");
        assert_eq!(rows, &[Game::HEIGHT - 1]);
        assert!(fraction > 0.9);
        assert_eq!(game.lines_cleared(), 1);
        assert_eq!(game.score(), hard_drop_bonus(&events) + 100);

        // While clearing, piece input and gravity stay suspended.
        let piece_before = *game.piece();
        press(&mut game, Button::MoveLeft);
        game.update(Duration::from_millis(100));
        assert_eq!(*game.piece(), piece_before);
        assert!(game.clearing().is_some());

        // Timer expiry compacts the grid and brings in the next piece.
        game.update(game.config.line_clear_duration);
        assert_eq!(*game.phase(), Phase::Falling);
        assert_eq!(game.grid()[Game::HEIGHT - 1][0], Some(PieceKind::T));
        assert!(game.grid()[0].iter().all(Option::is_none));
    }

    #[test]
    fn clear_scores_follow_fixed_table() {
        let cases = [
            (PieceKind::O, 1, 4..6, 100),
            (PieceKind::O, 2, 4..6, 300),
            (PieceKind::I, 3, 4..5, 500),
            (PieceKind::I, 4, 4..5, 800),
        ];
        for (kind, depth, well, points) in cases {
            let mut game = game_with_first(kind, well_grid(depth, well), Config::default());
            let events = press(&mut game, Button::DropHard);
            assert_eq!(game.lines_cleared(), depth as u32, "{depth} rows");
            assert_eq!(
                game.score(),
                hard_drop_bonus(&events) + points,
                "{depth} rows at level 1"
            );
        }
    }

    #[test]
    fn level_up_follows_lines_per_level() {
        let config = Config {
            lines_per_level: 4,
            ..Config::default()
        };
        let mut game = game_with_first(PieceKind::I, well_grid(4, 4..5), config);
        let events = press(&mut game, Button::DropHard);
        assert!(events.contains(&Event::LevelUp { level: 2 }));
        assert_eq!(game.level(), 2);
        // The quadruple itself was still scored at the pre-clear level.
        assert_eq!(game.score(), hard_drop_bonus(&events) + 800);

        // The cap holds no matter how far the counter runs ahead.
        let config = game.config.clone();
        for (cleared, want) in [(0, 1), (3, 1), (4, 2), (9, 3), (400, config.max_level)] {
            let level = (1 + cleared / config.lines_per_level).min(config.max_level);
            assert_eq!(level, want);
        }
    }

    #[test]
    fn blocked_spawn_ends_game_and_writes_nothing() {
        // Everything below row 2 is full except a far-right well the spawn
        // column cannot reach, so dropped pieces pile up over the spawn rows
        // within a couple of locks and can never complete a row.
        let grid = well_grid(Game::HEIGHT - 3, 8..10);
        let count = |g: &Grid| g.iter().flatten().filter(|c| c.is_some()).count();
        for seed in 0..10 {
            let mut game = Game::builder().seed(seed).grid(grid).build();
            assert!(!game.over());
            let mut before = *game.grid();
            'stack: for attempt in 0.. {
                let events = press(&mut game, Button::DropHard);
                assert!(game.clearing().is_none(), "no row can complete here");

                // Each lock writes exactly its in-grid tiles; in particular
                // a blocked spawn adds nothing beyond the final lock.
                let locked = events
                    .iter()
                    .find_map(|e| match e {
                        Event::PieceLocked { piece } => Some(*piece),
                        _ => None,
                    })
                    .expect("the dropped piece must have locked");
                let written = locked
                    .cells()
                    .iter()
                    .filter(|&&(_, y)| (0..Game::HEIGHT as i32).contains(&y))
                    .count();
                assert_eq!(count(game.grid()), count(&before) + written);

                if events.contains(&Event::GameOver) {
                    assert!(game.over());
                    // Terminal phase: further input and time change nothing.
                    let piece = *game.piece();
                    press(&mut game, Button::MoveLeft);
                    game.update(Duration::from_secs(1));
                    assert_eq!(*game.piece(), piece);
                    break 'stack;
                }
                assert!(attempt < 9, "seed {seed} should top out quickly");
                before = *game.grid();
            }
        }
    }

    #[test]
    fn zen_mode_never_tops_out() {
        let mut game = Game::builder()
            .seed(8)
            .config(Config {
                zen: true,
                ..Config::default()
            })
            .build();
        for _ in 0..100 {
            press(&mut game, Button::DropHard);
            if game.clearing().is_some() {
                game.update(game.config.line_clear_duration);
            }
        }
        assert!(!game.over());
    }

    #[test]
    fn auto_repeat_moves_held_direction() {
        let mut game = Game::builder().seed(2).build();
        let x_before = game.piece().position().0;
        game.handle(ButtonChange::Press(Button::MoveLeft));
        let x_pressed = game.piece().position().0;
        assert_eq!(x_pressed, x_before - 1, "initial move happens on key-down");
        game.update(game.config.auto_repeat_interval);
        assert_eq!(game.piece().position().0, x_pressed - 1);
        // Released: no further repeats.
        game.handle(ButtonChange::Release(Button::MoveLeft));
        game.update(game.config.auto_repeat_interval);
        assert_eq!(game.piece().position().0, x_pressed - 1);
    }

    #[test]
    fn reset_restores_fresh_round() {
        let mut game = Game::builder().seed(77).build();
        for _ in 0..5 {
            press(&mut game, Button::DropHard);
            if game.clearing().is_some() {
                game.update(game.config.line_clear_duration);
            }
        }
        game.handle(ButtonChange::Press(Button::MoveRight));
        game.reset();
        assert_eq!(*game.phase(), Phase::Falling);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.lines_cleared(), 0);
        assert!(game.grid().iter().flatten().all(Option::is_none));
        // Held state was dropped along with everything else.
        let x = game.piece().position().0;
        game.update(game.config.auto_repeat_interval);
        assert_eq!(game.piece().position().0, x);
    }

    #[test]
    fn compact_removes_recorded_rows_and_prepends_empty() {
        let mut grid = empty_grid();
        grid[2] = [Some(PieceKind::I); Game::WIDTH];
        grid[5] = [Some(PieceKind::O); Game::WIDTH];
        grid[3][0] = Some(PieceKind::T);
        grid[Game::HEIGHT - 1][9] = Some(PieceKind::S);

        compact(&mut grid, &[5, 2]);

        assert!(grid[0].iter().all(Option::is_none));
        assert!(grid[1].iter().all(Option::is_none));
        // The marker at old row 3 sat between the removals, so it slid down
        // exactly one row; the old bottom row stayed put.
        assert_eq!(grid[4][0], Some(PieceKind::T));
        assert_eq!(grid[Game::HEIGHT - 1][9], Some(PieceKind::S));
        assert!(!grid.iter().any(|line| line.iter().all(Option::is_some)));
    }
}
