//! Chain engine integration tests.
//!
//! These tests drive the engine through the public API only, building
//! board states from legal moves.

use arrow_chain::core::{Direction, GameError, Grid, Position};
use arrow_chain::rules::{is_legal_move, ChainEngine, ChainState, Move, StepOutcome};

fn pos(x: i64, y: i64) -> Position {
    Position::new(x, y).unwrap()
}

fn mv(x: i64, y: i64, direction: Direction) -> Move {
    Move::new(pos(x, y), direction)
}

/// Submit and fully resolve each move in order.
fn play_all(grid: &mut Grid, engine: &mut ChainEngine, moves: &[Move]) {
    for &m in moves {
        assert!(engine.submit(grid, m), "{m} should be accepted");
        engine.run_to_idle(grid);
    }
}

// =============================================================================
// Initial Grid
// =============================================================================

/// Only the center holds an arrow, and it points up.
#[test]
fn test_initial_grid_has_single_root() {
    let grid = Grid::new();
    let filled: Vec<_> = grid.cells().filter(|c| !c.is_empty()).collect();

    assert_eq!(filled.len(), 1);
    assert_eq!(filled[0].position, pos(2, 2));
    assert_eq!(filled[0].direction, Direction::Up);
}

/// Moves next to the root pointing at it are legal; the root itself never is.
#[test]
fn test_initial_legality() {
    let grid = Grid::new();

    assert!(is_legal_move(&grid, pos(2, 1), Direction::Down));
    assert!(is_legal_move(&grid, pos(2, 3), Direction::Up));
    assert!(is_legal_move(&grid, pos(1, 2), Direction::Right));
    assert!(is_legal_move(&grid, pos(3, 2), Direction::Left));

    for d in Direction::ARROWS {
        assert!(!is_legal_move(&grid, pos(2, 2), d));
    }
}

// =============================================================================
// Concrete Scenario
// =============================================================================

/// Place (2,1) Down: the root rotates Up→Right and the chain stops at the
/// empty (3,2).
#[test]
fn test_root_rotation_scenario() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();

    assert!(engine.submit(&mut grid, mv(2, 1, Direction::Down)));
    assert_eq!(grid.cell_at(2, 1).unwrap().direction, Direction::Down);
    assert!(engine.is_in_progress());
    assert_eq!(engine.active_cell(), Some(pos(2, 2)));

    let outcome = engine.step(&mut grid).unwrap();

    assert_eq!(
        outcome,
        StepOutcome::Terminated {
            rotated: pos(2, 2),
            direction: Direction::Right
        }
    );
    assert_eq!(engine.state(), ChainState::Idle);
    assert_eq!(grid.cell_at(2, 2).unwrap().direction, Direction::Right);
}

// =============================================================================
// Exclusion
// =============================================================================

/// Once a submission is accepted every further submission is rejected until
/// the chain ends, legal or not.
#[test]
fn test_at_most_one_chain() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    assert!(engine.submit(&mut grid, mv(2, 1, Direction::Down)));

    for candidate in [
        mv(2, 3, Direction::Up),
        mv(1, 2, Direction::Right),
        mv(0, 0, Direction::Left),
    ] {
        assert!(!engine.submit(&mut grid, candidate));
        assert_eq!(
            engine.try_submit(&mut grid, candidate),
            Err(GameError::InvalidTransition {
                operation: "submit",
                state: "propagating"
            })
        );
    }

    engine.run_to_idle(&mut grid);
    assert!(engine.submit(&mut grid, mv(2, 3, Direction::Up)));
}

/// A rejected submission leaves the grid untouched.
#[test]
fn test_rejected_submit_is_side_effect_free() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    play_all(&mut grid, &mut engine, &[mv(2, 1, Direction::Down)]);
    let before = grid.clone();

    assert!(!engine.submit(&mut grid, mv(2, 1, Direction::Down)));
    assert!(!engine.submit(&mut grid, mv(4, 4, Direction::Up)));
    assert!(!engine.submit(&mut grid, mv(3, 3, Direction::Empty)));

    assert_eq!(grid, before);
    assert!(!engine.is_in_progress());
}

/// Stepping an idle engine is a reported error, not a panic.
#[test]
fn test_step_while_idle() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    assert!(matches!(
        engine.step(&mut grid),
        Err(GameError::InvalidTransition { operation: "step", .. })
    ));
}

// =============================================================================
// Chain Length
// =============================================================================

/// A three-cell chain takes exactly three steps.
#[test]
fn test_three_cell_chain_takes_three_steps() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    play_all(
        &mut grid,
        &mut engine,
        &[mv(2, 1, Direction::Down), mv(1, 2, Direction::Right)],
    );

    assert!(engine.submit(&mut grid, mv(1, 1, Direction::Right)));

    let mut steps = 0;
    while engine.is_in_progress() {
        engine.step(&mut grid).unwrap();
        steps += 1;
        assert!(steps <= 3, "chain ran past three steps");
    }

    assert_eq!(steps, 3);
    assert_eq!(engine.trail(), &[pos(2, 1), pos(1, 1), pos(1, 2)]);
}

/// The chain can rotate the cell that was just placed when it loops back.
#[test]
fn test_chain_revisits_placed_cell() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    play_all(
        &mut grid,
        &mut engine,
        &[mv(2, 1, Direction::Down), mv(1, 2, Direction::Right)],
    );

    assert!(engine.submit(&mut grid, mv(1, 1, Direction::Right)));
    engine.run_to_idle(&mut grid);

    // Placed Right, rotated once on the second step.
    assert_eq!(grid.direction(pos(1, 1)), Direction::Down);
}

/// Rotations never create or remove arrows.
#[test]
fn test_chain_preserves_filled_count() {
    let mut grid = Grid::new();
    let mut engine = ChainEngine::new();
    let moves = [
        mv(2, 1, Direction::Down),
        mv(1, 2, Direction::Right),
        mv(1, 1, Direction::Right),
    ];

    for (i, &m) in moves.iter().enumerate() {
        assert!(engine.submit(&mut grid, m));
        assert_eq!(grid.non_empty_count(), i + 2);
        engine.run_to_idle(&mut grid);
        assert_eq!(grid.non_empty_count(), i + 2);
    }
}
