/*!
This module handles creation / initialization / building of [`Game`]s.
*/

use rand_chacha::rand_core::SeedableRng;

use crate::{empty_grid, Bag, Button, Config, Game, GameRng, Grid, Phase, Piece};

use std::time::Duration;

/// This builder exposes the ability to configure a new [`Game`] to varying
/// degrees.
///
/// Generally speaking, you'll first call [`GameBuilder::new`] or
/// [`Game::builder`], then chain calls to methods to set each field, then
/// call [`GameBuilder::build`]. The `GameBuilder` is not used up and its
/// configuration can be re-used to initialize more [`Game`]s.
#[derive(PartialEq, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameBuilder {
    /// The configuration options that will be set for the game.
    pub config: Config,
    /// The value to seed the game's PRNG with; a random one if unset.
    pub seed: Option<u64>,
    /// An optional pre-filled starting grid.
    pub grid: Option<Grid>,
}

impl GameBuilder {
    /// Creates a blank new template representing a yet-to-be-started [`Game`]
    /// ready for configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Game`] with the information specified by `self`.
    ///
    /// Two pieces are drawn up front: the active piece and the lookahead. If
    /// a pre-filled grid blocks the very first spawn (and zen mode is off),
    /// the game starts out already over.
    pub fn build(&self) -> Game {
        let config = self.config.clone();
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = GameRng::seed_from_u64(seed);
        let mut bag = Bag::new();
        let grid = self.grid.unwrap_or(empty_grid());

        let active = Piece::spawn(bag.next(&mut rng), &grid, config.piece_appear_duration);
        let next = bag.next(&mut rng);
        let phase = if active.collides(&grid) && !config.zen {
            Phase::Over
        } else {
            Phase::Falling
        };

        Game {
            config,
            seed,
            rng,
            bag,
            grid,
            active,
            next,
            phase,
            score: 0,
            level: 1,
            lines_cleared: 0,
            fall_timer: Duration::ZERO,
            move_timer: Duration::ZERO,
            held: [false; Button::VARIANTS.len()],
        }
    }

    /// Sets the [`Config`] that will be used by the [`Game`].
    pub fn config(&mut self, x: Config) -> &mut Self {
        self.config = x;
        self
    }

    /// The value to seed the game's PRNG with.
    pub fn seed(&mut self, x: u64) -> &mut Self {
        self.seed = Some(x);
        self
    }

    /// A pre-filled grid to start the game on.
    pub fn grid(&mut self, x: Grid) -> &mut Self {
        self.grid = Some(x);
        self
    }

    /// Whether the game should run in zen mode and never end on a blocked
    /// spawn.
    pub fn zen(&mut self, x: bool) -> &mut Self {
        self.config.zen = x;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn seeded_builds_are_identical() {
        let mut builder = Game::builder();
        builder.seed(1234);
        let a = builder.build();
        let b = builder.build();
        assert_eq!(a.piece().kind(), b.piece().kind());
        assert_eq!(a.next_kind(), b.next_kind());
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn fresh_game_starts_falling_at_level_one() {
        let game = Game::builder().seed(0).build();
        assert_eq!(*game.phase(), Phase::Falling);
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines_cleared(), 0);
        assert!(game.grid().iter().flatten().all(Option::is_none));
    }

    #[test]
    fn blocked_prefilled_grid_is_over_immediately() {
        let mut grid = empty_grid();
        for row in grid.iter_mut().take(2) {
            *row = [Some(PieceKind::Z); Game::WIDTH];
        }
        let game = Game::builder().seed(3).grid(grid).build();
        assert!(game.over());
        assert_eq!(game.grid(), &grid, "the blocked spawn wrote nothing");
        // Zen mode suppresses the terminal transition entirely.
        let zen_game = Game::builder().seed(3).grid(grid).zen(true).build();
        assert!(!zen_game.over());
    }
}
