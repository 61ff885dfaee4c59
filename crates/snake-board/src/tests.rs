//! Unit tests for snake-board.

use std::sync::Arc;

use snake_core::{AgentId, BoardRng, Direction, Position};

use crate::{Board, BoardBuilder, BoardError, FreePool, MoveResult, Snake};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// A 5 × 5 board with no random features.
fn empty_5x5() -> BoardBuilder {
    BoardBuilder::new(5, 5).seed(42).empty()
}

fn add(board: &Board, x: i32, y: i32, dir: Direction, id: u32) -> Arc<Snake> {
    board.add_agent(Snake::at(x, y, dir, AgentId(id))).unwrap()
}

// ── Snake ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snake {
    use super::*;
    use crate::INITIAL_LENGTH;

    #[test]
    fn reversal_is_ignored() {
        for d in Direction::ALL {
            let s = Snake::at(0, 0, d, AgentId(0));
            assert!(!s.turn(d.opposite()));
            assert_eq!(s.direction(), d);
        }
    }

    #[test]
    fn other_turns_are_applied() {
        for start in Direction::ALL {
            for target in Direction::ALL {
                if target == start.opposite() {
                    continue;
                }
                let s = Snake::at(0, 0, start, AgentId(0));
                assert!(s.turn(target));
                assert_eq!(s.direction(), target);
            }
        }
    }

    #[test]
    fn grows_to_initial_length_then_holds() {
        let s = Snake::at(0, 0, Direction::Right, AgentId(0));
        for x in 1..=10 {
            s.advance(p(x, 0), false);
            assert!(s.len() <= INITIAL_LENGTH);
        }
        assert_eq!(s.len(), INITIAL_LENGTH);
        assert_eq!(s.head(), p(10, 0));
        assert_eq!(s.snapshot().last(), Some(&p(6, 0)));
    }

    #[test]
    fn growth_adds_exactly_one_cell() {
        let s = Snake::at(0, 0, Direction::Right, AgentId(0));
        for x in 1..=6 {
            s.advance(p(x, 0), false);
        }
        assert_eq!(s.len(), INITIAL_LENGTH);

        s.advance(p(7, 0), true);
        assert_eq!(s.target_length(), INITIAL_LENGTH + 1);
        assert_eq!(s.len(), INITIAL_LENGTH + 1);

        s.advance(p(8, 0), false);
        assert_eq!(s.len(), INITIAL_LENGTH + 1);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let s = Snake::at(1, 1, Direction::Down, AgentId(3));
        let before = s.snapshot();
        s.advance(p(1, 2), false);
        assert_eq!(before, vec![p(1, 1)]);
        assert_eq!(s.snapshot(), vec![p(1, 2), p(1, 1)]);
        assert!(s.occupies(p(1, 1)));
        assert!(!s.occupies(p(0, 0)));
    }
}

// ── FreePool ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool {
    use super::*;

    #[test]
    fn grid_pool_holds_every_cell_once() {
        let pool = FreePool::with_grid(4, 3);
        assert_eq!(pool.len(), 12);
        for x in 0..4 {
            for y in 0..3 {
                assert!(pool.contains(p(x, y)));
            }
        }
    }

    #[test]
    fn draws_without_replacement_until_empty() {
        let mut pool = FreePool::with_grid(3, 3);
        let mut rng = BoardRng::new(1);
        let mut drawn = std::collections::HashSet::new();
        while let Some(cell) = pool.take_random(&mut rng) {
            assert!(drawn.insert(cell), "{cell} drawn twice");
        }
        assert_eq!(drawn.len(), 9);
        assert!(pool.is_empty());
        assert_eq!(pool.take_random(&mut rng), None);
    }

    #[test]
    fn take_and_release_are_idempotent() {
        let mut pool = FreePool::with_grid(2, 2);
        assert!(pool.take(p(1, 1)));
        assert!(!pool.take(p(1, 1)));
        assert_eq!(pool.len(), 3);
        assert!(pool.release(p(1, 1)));
        assert!(!pool.release(p(1, 1)));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn slots_stay_consistent_after_swap_remove() {
        let mut pool = FreePool::with_grid(3, 3);
        assert!(pool.take(p(0, 0)));
        assert!(pool.take(p(1, 1)));
        for x in 0..3 {
            for y in 0..3 {
                let cell = p(x, y);
                if cell == p(0, 0) || cell == p(1, 1) {
                    continue;
                }
                assert!(pool.take(cell), "{cell} should still be free");
            }
        }
        assert!(pool.is_empty());
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn non_positive_dimensions_rejected() {
        for (w, h) in [(0, 5), (5, 0), (-1, 3), (0, 0)] {
            match Board::new(w, h) {
                Err(BoardError::InvalidDimensions { width, height }) => {
                    assert_eq!((width, height), (w, h));
                }
                other => panic!("expected InvalidDimensions, got {other:?}"),
            }
        }
    }

    #[test]
    fn stock_feature_counts() {
        let board = Board::new(35, 28).unwrap();
        assert_eq!(board.mice().len(), 6);
        assert_eq!(board.obstacles().len(), 4);
        assert_eq!(board.turbo_pads().len(), 3);
        assert_eq!(board.teleports().len(), 4);
        assert_eq!(board.free_cells(), 35 * 28 - 6 - 4 - 3 - 4);
    }

    #[test]
    fn initial_features_are_disjoint() {
        let board = BoardBuilder::new(6, 6).seed(9).build().unwrap();
        let mut all = Vec::new();
        all.extend(board.mice());
        all.extend(board.obstacles());
        all.extend(board.turbo_pads());
        all.extend(board.teleports().keys().copied());
        let unique: std::collections::HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
        for cell in &all {
            assert!(board.contains(*cell));
        }
    }

    #[test]
    fn teleports_are_symmetric() {
        let board = BoardBuilder::new(10, 10).seed(3).teleport_pairs(4).build().unwrap();
        let tp = board.teleports();
        assert_eq!(tp.len(), 8);
        for (a, b) in &tp {
            assert_eq!(tp.get(b), Some(a));
            assert_ne!(a, b);
        }
    }

    #[test]
    fn features_avoid_starting_bodies() {
        // 3 × 3 = 9 cells; one snake plus 8 features fills the grid exactly.
        let board = BoardBuilder::new(3, 3)
            .seed(5)
            .initial_mice(4)
            .initial_obstacles(4)
            .initial_turbo_pads(0)
            .teleport_pairs(0)
            .agent(Snake::at(1, 1, Direction::Up, AgentId(0)))
            .build()
            .unwrap();
        assert!(!board.mice().contains(&p(1, 1)));
        assert!(!board.obstacles().contains(&p(1, 1)));
        // The starting cell goes back to the pool once features are drawn.
        assert_eq!(board.free_cells(), 1);
        assert_eq!(board.agent_count(), 1);
    }

    #[test]
    fn exhausted_pool_shrinks_counts_instead_of_failing() {
        let board = BoardBuilder::new(2, 2).seed(1).build().unwrap();
        let total = board.mice().len()
            + board.obstacles().len()
            + board.turbo_pads().len()
            + board.teleports().len();
        assert_eq!(total, 4);
        assert_eq!(board.mice().len(), 4);
        assert_eq!(board.free_cells(), 0);
    }

    #[test]
    fn fixed_placement_conflicts_are_reported() {
        let err = empty_5x5()
            .mouse_at(p(1, 1))
            .obstacle_at(p(1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, BoardError::CellTaken { at, .. } if at == p(1, 1)));

        let err = empty_5x5().turbo_at(p(5, 0)).build().unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds(at) if at == p(5, 0)));
    }

    #[test]
    fn bad_spawn_chance_is_a_config_error() {
        let err = empty_5x5().turbo_spawn_chance(2.0).build().unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }
}

// ── Step protocol ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod step {
    use super::*;

    #[test]
    fn obstacle_blocks_and_leaves_snake_untouched() {
        let board = BoardBuilder::new(5, 5)
            .seed(11)
            .obstacle_at(p(1, 0))
            .build()
            .unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        let before = a.snapshot();

        assert_eq!(board.step(&a).unwrap(), MoveResult::HitObstacle);
        assert_eq!(a.head(), p(0, 0));
        assert_eq!(a.snapshot(), before);
    }

    #[test]
    fn mouse_is_eaten_and_replenished() {
        let board = empty_5x5().mouse_at(p(1, 0)).build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        let free_before = board.free_cells();

        assert_eq!(board.step(&a).unwrap(), MoveResult::AteMouse);
        assert_eq!(a.head(), p(1, 0));
        assert_eq!(a.target_length(), crate::INITIAL_LENGTH + 1);

        assert_eq!(board.mice().len(), 1, "a replacement mouse spawns");
        assert_eq!(board.obstacles().len(), 1, "an obstacle spawns with it");

        // Eaten cell returned (+1), then mouse and obstacle drawn (-2) and
        // maybe a turbo pad (-1).
        let turbo = board.turbo_pads().len();
        assert_eq!(board.free_cells(), free_before + 1 - 2 - turbo);
    }

    #[test]
    fn other_snake_body_blocks() {
        let board = empty_5x5().build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        let _b = add(&board, 1, 0, Direction::Down, 1);

        assert_eq!(board.step(&a).unwrap(), MoveResult::HitObstacle);
        assert_eq!(a.head(), p(0, 0));
    }

    #[test]
    fn other_snake_tail_blocks_too() {
        let board = empty_5x5().build().unwrap();
        let b = add(&board, 1, 3, Direction::Up, 1);
        for _ in 0..3 {
            assert_eq!(board.step(&b).unwrap(), MoveResult::Moved);
        }
        // b now covers (1,3)..(1,0); a heads into b's tail cell.
        let a = add(&board, 0, 3, Direction::Right, 0);
        assert_eq!(board.step(&a).unwrap(), MoveResult::HitObstacle);
    }

    #[test]
    fn own_body_does_not_block() {
        let board = empty_5x5().build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        // Walk a full lap on a 5-wide torus: the head re-enters its own tail
        // cell, which is not a collision.
        for _ in 0..10 {
            assert_eq!(board.step(&a).unwrap(), MoveResult::Moved);
        }
    }

    #[test]
    fn moves_wrap_around_edges() {
        let board = empty_5x5().build().unwrap();
        let a = add(&board, 0, 0, Direction::Left, 0);
        assert_eq!(board.step(&a).unwrap(), MoveResult::Moved);
        assert_eq!(a.head(), p(4, 0));
        a.turn(Direction::Up);
        board.step(&a).unwrap();
        assert_eq!(a.head(), p(4, 4));
    }

    #[test]
    fn teleport_lands_on_paired_exit() {
        let board = empty_5x5().teleport_pair(p(1, 0), p(3, 3)).build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);

        assert_eq!(board.step(&a).unwrap(), MoveResult::Teleported);
        assert_eq!(a.head(), p(3, 3));
        assert!(!a.occupies(p(1, 0)));
    }

    #[test]
    fn turbo_pad_is_consumed() {
        let board = empty_5x5().turbo_at(p(0, 1)).build().unwrap();
        let a = add(&board, 0, 0, Direction::Down, 0);
        assert_eq!(board.step(&a).unwrap(), MoveResult::AteTurbo);
        assert!(board.turbo_pads().is_empty());
        assert_eq!(a.target_length(), crate::INITIAL_LENGTH);
    }

    #[test]
    fn turbo_spawn_chance_one_always_adds_a_pad() {
        let board = empty_5x5()
            .turbo_spawn_chance(1.0)
            .mouse_at(p(1, 0))
            .build()
            .unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        assert_eq!(board.step(&a).unwrap(), MoveResult::AteMouse);
        assert_eq!(board.turbo_pads().len(), 1);
    }

    #[test]
    fn eaten_cell_feeds_the_replenishment() {
        // 2 × 1 board: the mouse on one cell, the snake on the other.  The
        // eaten cell is freed before the draws, so both the mouse and the
        // obstacle find a cell.
        let board = BoardBuilder::new(2, 1)
            .seed(4)
            .empty()
            .turbo_spawn_chance(0.0)
            .mouse_at(p(1, 0))
            .agent(Snake::at(0, 0, Direction::Right, AgentId(0)))
            .build()
            .unwrap();
        let a = board.agent_at(0).unwrap();
        assert_eq!(board.free_cells(), 1);

        assert_eq!(board.step(&a).unwrap(), MoveResult::AteMouse);
        let mice = board.mice();
        let obstacles = board.obstacles();
        assert_eq!(mice.len(), 1);
        assert_eq!(obstacles.len(), 1);
        assert!(mice.is_disjoint(&obstacles));
        assert_eq!(board.free_cells(), 0);
    }

    #[test]
    fn empty_pool_skips_replenishment() {
        // Every cell is taken before the meal; only the eaten cell comes
        // back, so the mouse reuses it and the obstacle draw is skipped.
        let board = BoardBuilder::new(2, 1)
            .seed(4)
            .empty()
            .turbo_spawn_chance(0.0)
            .obstacle_at(p(0, 0))
            .mouse_at(p(1, 0))
            .build()
            .unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        assert_eq!(board.free_cells(), 0);

        assert_eq!(board.step(&a).unwrap(), MoveResult::AteMouse);
        assert_eq!(board.mice().into_iter().collect::<Vec<_>>(), vec![p(1, 0)]);
        assert_eq!(board.obstacles().len(), 1);
        assert_eq!(board.free_cells(), 0);
    }

    #[test]
    fn eaten_mouse_leaves_its_cell_across_seeds() {
        // The replacement is drawn from the whole pool, eaten cell included,
        // so it lands back there only occasionally.
        let mut cleared = 0;
        for seed in 0..32 {
            let board = BoardBuilder::new(5, 5)
                .seed(seed)
                .empty()
                .mouse_at(p(1, 0))
                .build()
                .unwrap();
            let a = add(&board, 0, 0, Direction::Right, 0);
            assert_eq!(board.step(&a).unwrap(), MoveResult::AteMouse);
            assert_eq!(board.mice().len(), 1);
            if !board.mice().contains(&p(1, 0)) {
                cleared += 1;
            }
        }
        assert!(cleared >= 24, "eaten cell cleared in {cleared} of 32 runs");
    }

    #[test]
    fn unknown_and_foreign_snakes_are_rejected() {
        let board = empty_5x5().build().unwrap();
        let stranger = Snake::at(0, 0, Direction::Up, AgentId(9));
        assert!(matches!(board.step(&stranger), Err(BoardError::UnknownAgent(AgentId(9)))));

        let _real = add(&board, 2, 2, Direction::Up, 1);
        let impostor = Snake::at(2, 2, Direction::Up, AgentId(1));
        assert!(matches!(board.step(&impostor), Err(BoardError::ForeignAgent(AgentId(1)))));
    }
}

// ── Rosters & snapshots ───────────────────────────────────────────────────────

#[cfg(test)]
mod rosters {
    use super::*;

    #[test]
    fn add_rejects_duplicates_and_out_of_bounds() {
        let board = empty_5x5().build().unwrap();
        add(&board, 0, 0, Direction::Up, 0);
        assert!(matches!(
            board.add_agent(Snake::at(1, 1, Direction::Up, AgentId(0))),
            Err(BoardError::DuplicateAgent(AgentId(0)))
        ));
        assert!(matches!(
            board.add_agent(Snake::at(7, 1, Direction::Up, AgentId(1))),
            Err(BoardError::OutOfBounds(_))
        ));
    }

    #[test]
    fn roster_order_and_lookup() {
        let board = empty_5x5().build().unwrap();
        for id in 0..3 {
            add(&board, id as i32, 0, Direction::Down, id);
        }
        assert_eq!(board.agent_count(), 3);
        let ids: Vec<_> = board.live_agents().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(board.agent_at(2).map(|s| s.id()), Some(AgentId(2)));
        assert!(board.agent_at(3).is_none());
    }

    #[test]
    fn retire_moves_between_rosters() {
        let board = empty_5x5().build().unwrap();
        let a = add(&board, 0, 0, Direction::Down, 0);
        let b = add(&board, 1, 0, Direction::Down, 1);

        board.retire_agent(b.id()).unwrap();
        board.retire_agent(a.id()).unwrap();
        assert_eq!(board.agent_count(), 0);
        let retired: Vec<_> = board.retired_agents().iter().map(|s| s.id()).collect();
        assert_eq!(retired, vec![AgentId(1), AgentId(0)]);

        assert!(matches!(board.retire_agent(a.id()), Err(BoardError::UnknownAgent(_))));
    }

    #[test]
    fn retired_snakes_no_longer_block() {
        let board = empty_5x5().build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        let b = add(&board, 1, 0, Direction::Down, 1);
        board.retire_agent(b.id()).unwrap();
        assert_eq!(board.step(&a).unwrap(), MoveResult::Moved);
    }

    #[test]
    fn accessors_return_copies() {
        let board = empty_5x5().mouse_at(p(1, 0)).build().unwrap();
        let mut mice = board.mice();
        mice.clear();
        assert_eq!(board.mice().len(), 1);

        let mut roster = board.live_agents();
        roster.push(Arc::new(Snake::at(0, 0, Direction::Up, AgentId(5))));
        assert_eq!(board.agent_count(), 0);
    }

    #[test]
    fn snapshot_matches_accessors() {
        let board = empty_5x5().mouse_at(p(2, 2)).obstacle_at(p(3, 3)).build().unwrap();
        let a = add(&board, 0, 0, Direction::Right, 0);
        board.step(&a).unwrap();

        let snap = board.snapshot();
        assert_eq!((snap.width, snap.height), (5, 5));
        assert_eq!(snap.mice, board.mice());
        assert_eq!(snap.obstacles, board.obstacles());
        assert_eq!(snap.snakes.len(), 1);
        assert_eq!(snap.snakes[0].body, vec![p(1, 0), p(0, 0)]);
        assert_eq!(snap.snakes[0].heading, Direction::Right);
        assert!(!snap.paused);
    }
}

// ── Pause gate ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pause {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::PauseGate;

    #[test]
    fn wait_timeout_reports_state() {
        let gate = PauseGate::new(true);
        assert!(gate.wait_timeout(Duration::from_millis(5)));
        gate.set_paused(false);
        assert!(!gate.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn resume_releases_blocked_waiter() {
        let board = Arc::new(empty_5x5().build().unwrap());
        board.set_paused(true);
        let released = Arc::new(AtomicBool::new(false));

        let handle = {
            let board = Arc::clone(&board);
            let released = Arc::clone(&released);
            thread::spawn(move || {
                board.wait_if_paused();
                released.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(30));
        assert!(!released.load(Ordering::SeqCst));
        board.set_paused(false);
        handle.join().unwrap();
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn paused_gate_does_not_hold_board_lock() {
        let board = Arc::new(empty_5x5().build().unwrap());
        let a = add(&board, 0, 0, Direction::Right, 0);
        board.set_paused(true);

        let waiter = {
            let board = Arc::clone(&board);
            thread::spawn(move || board.wait_if_paused())
        };
        thread::sleep(Duration::from_millis(10));

        // The blocked waiter must not prevent steps or snapshots.
        assert_eq!(board.step(&a).unwrap(), MoveResult::Moved);
        assert!(board.snapshot().paused);

        board.set_paused(false);
        waiter.join().unwrap();
    }
}
