//! Seeded random play.

use tracing::debug;

use crate::core::{Direction, EngineConfig, GameError, GameRng, Grid};
use crate::rules::{legal_targets, Move};

use super::arrow_game::ArrowGame;

/// Picks uniformly among all legal moves in every direction.
///
/// Same seed and same starting game produce the same moves.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.seed)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Every legal move on `grid`, direction-major.
    #[must_use]
    pub fn legal_moves(grid: &Grid) -> Vec<Move> {
        Direction::ARROWS
            .iter()
            .flat_map(|&d| legal_targets(grid, d).into_iter().map(move |p| Move::new(p, d)))
            .collect()
    }

    /// Pick a random legal move, or `None` if there is none.
    pub fn choose_move(&mut self, grid: &Grid) -> Option<Move> {
        let moves = Self::legal_moves(grid);
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.gen_range_usize(0..moves.len())])
    }

    /// Play up to `moves` random moves, settling each chain before the next.
    ///
    /// A chain already running is settled first. Stops early when no legal
    /// move exists. Returns the number of moves played.
    pub fn play(&mut self, game: &mut ArrowGame, moves: usize) -> Result<usize, GameError> {
        game.settle();
        for played in 0..moves {
            let Some(mv) = self.choose_move(game.grid()) else {
                debug!(seed = self.seed(), played, "no legal move left");
                return Ok(played);
            };
            game.place(mv)?;
            game.settle();
        }
        Ok(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    #[test]
    fn test_initial_legal_moves() {
        let moves = RandomPlayer::legal_moves(&Grid::new());
        assert_eq!(moves.len(), 4);
        for mv in &moves {
            assert_eq!(mv.position.step(mv.direction), Some(Position::CENTER));
        }
    }

    #[test]
    fn test_choose_move_is_legal_or_none() {
        let mut player = RandomPlayer::new(11);
        assert_eq!(player.seed(), 11);

        let grid = Grid::new();
        let mv = player.choose_move(&grid).unwrap();
        assert!(mv.is_legal(&grid));

        let mut game = ArrowGame::new();
        player.play(&mut game, 100).unwrap();
        assert_eq!(player.choose_move(game.grid()), None);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = ArrowGame::new();
        let mut b = ArrowGame::new();

        RandomPlayer::new(7).play(&mut a, 15).unwrap();
        RandomPlayer::new(7).play(&mut b, 15).unwrap();

        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_play_records_every_move() {
        let mut game = ArrowGame::new();
        let played = RandomPlayer::from_config(&EngineConfig::default())
            .play(&mut game, 10)
            .unwrap();

        assert_eq!(game.history().len(), played);
        assert!(!game.engine().is_in_progress());
        // Each placement fills one empty cell; rotations never empty a cell.
        assert_eq!(game.grid().non_empty_count(), 1 + played);
    }

    #[test]
    fn test_fills_board() {
        let mut game = ArrowGame::new();
        let played = RandomPlayer::new(3).play(&mut game, 100).unwrap();

        // Only 24 empty cells to fill.
        assert!(played <= 24);
        assert!(RandomPlayer::legal_moves(game.grid()).is_empty());
    }
}
