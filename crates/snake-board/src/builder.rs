//! Fluent builder for constructing a [`Board`].

use snake_core::{BoardConfig, BoardRng, Position};
use tracing::debug;

use crate::board::BoardState;
use crate::{Board, BoardError, BoardResult, CellMap, CellSet, Feature, FreePool, Snake};

/// Fluent builder for [`Board`].
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                          |
/// |-------------------------------|----------------------------------|
/// | `.seed(s)` / `.rng(r)`        | OS entropy                       |
/// | `.initial_mice(n)`            | 6                                |
/// | `.initial_obstacles(n)`       | 4                                |
/// | `.initial_turbo_pads(n)`      | 3                                |
/// | `.teleport_pairs(n)`          | 2                                |
/// | `.turbo_spawn_chance(p)`      | 0.2                              |
/// | `.mouse_at(p)`, `.obstacle_at(p)`, `.turbo_at(p)`, `.teleport_pair(a, b)` | none |
/// | `.agent(snake)`               | no snakes                        |
///
/// Fixed placements are taken from the free pool first, then the random
/// counts are drawn from what is left.  Cells under snakes registered with
/// [`agent`](Self::agent) are held out of the pool while features are drawn,
/// so no initial feature lands on a starting body, and are returned to the
/// pool afterwards.
///
/// # Example
///
/// ```rust
/// use snake_board::{BoardBuilder, MoveResult, Snake};
/// use snake_core::{AgentId, Direction, Position};
///
/// let board = BoardBuilder::new(5, 5)
///     .seed(7)
///     .obstacle_at(Position::new(1, 0))
///     .build()
///     .unwrap();
/// let snake = board.add_agent(Snake::at(0, 0, Direction::Right, AgentId(0))).unwrap();
/// assert_eq!(board.step(&snake).unwrap(), MoveResult::HitObstacle);
/// ```
pub struct BoardBuilder {
    config:    BoardConfig,
    rng:       Option<BoardRng>,
    mice:      Vec<Position>,
    obstacles: Vec<Position>,
    turbo:     Vec<Position>,
    teleports: Vec<(Position, Position)>,
    agents:    Vec<Snake>,
}

impl BoardBuilder {
    /// Builder for a `width × height` board with the stock feature counts.
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_config(BoardConfig::new(width, height))
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Self {
            config,
            rng:       None,
            mice:      Vec::new(),
            obstacles: Vec::new(),
            turbo:     Vec::new(),
            teleports: Vec::new(),
            agents:    Vec::new(),
        }
    }

    /// Seed the board RNG.  Overrides `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.rng = None;
        self
    }

    /// Supply the board RNG directly.
    pub fn rng(mut self, rng: BoardRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn initial_mice(mut self, n: usize) -> Self {
        self.config.initial_mice = n;
        self
    }

    pub fn initial_obstacles(mut self, n: usize) -> Self {
        self.config.initial_obstacles = n;
        self
    }

    pub fn initial_turbo_pads(mut self, n: usize) -> Self {
        self.config.initial_turbo_pads = n;
        self
    }

    pub fn teleport_pairs(mut self, n: usize) -> Self {
        self.config.teleport_pairs = n;
        self
    }

    pub fn turbo_spawn_chance(mut self, p: f64) -> Self {
        self.config.turbo_spawn_chance = p;
        self
    }

    /// No random features at all; only fixed placements.
    pub fn empty(self) -> Self {
        self.initial_mice(0)
            .initial_obstacles(0)
            .initial_turbo_pads(0)
            .teleport_pairs(0)
    }

    pub fn mouse_at(mut self, cell: Position) -> Self {
        self.mice.push(cell);
        self
    }

    pub fn obstacle_at(mut self, cell: Position) -> Self {
        self.obstacles.push(cell);
        self
    }

    pub fn turbo_at(mut self, cell: Position) -> Self {
        self.turbo.push(cell);
        self
    }

    /// Link `a` and `b` as a symmetric teleport pair.
    pub fn teleport_pair(mut self, a: Position, b: Position) -> Self {
        self.teleports.push((a, b));
        self
    }

    /// Register a snake that is added to the live roster on build.
    pub fn agent(mut self, snake: Snake) -> Self {
        self.agents.push(snake);
        self
    }

    /// Validate inputs, draw the initial features, register snakes, and
    /// return the board.
    pub fn build(self) -> BoardResult<Board> {
        let (width, height) = (self.config.width, self.config.height);
        if width <= 0 || height <= 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        self.config.validate()?;

        let in_bounds =
            |p: Position| (0..width).contains(&p.x) && (0..height).contains(&p.y);

        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _)     => rng,
            (None, Some(seed)) => BoardRng::new(seed),
            (None, None)       => BoardRng::from_entropy(),
        };

        let mut st = BoardState {
            mice:               CellSet::default(),
            obstacles:          CellSet::default(),
            turbo_pads:         CellSet::default(),
            teleports:          CellMap::default(),
            pool:               FreePool::with_grid(width, height),
            live:               Vec::new(),
            retired:            Vec::new(),
            rng,
            turbo_spawn_chance: self.config.turbo_spawn_chance,
        };

        // ── Hold starting bodies out of the pool ─────────────────────────
        let mut reserved = Vec::new();
        for snake in &self.agents {
            for cell in snake.snapshot() {
                if !in_bounds(cell) {
                    return Err(BoardError::OutOfBounds(cell));
                }
                if st.pool.take(cell) {
                    reserved.push(cell);
                }
            }
        }

        // ── Fixed placements ─────────────────────────────────────────────
        let claim = |st: &mut BoardState, cell: Position, feature: Feature| {
            if !in_bounds(cell) {
                return Err(BoardError::OutOfBounds(cell));
            }
            if !st.pool.take(cell) {
                return Err(BoardError::CellTaken { at: cell, feature });
            }
            Ok(())
        };
        for &cell in &self.mice {
            claim(&mut st, cell, Feature::Mouse)?;
            st.mice.insert(cell);
        }
        for &cell in &self.obstacles {
            claim(&mut st, cell, Feature::Obstacle)?;
            st.obstacles.insert(cell);
        }
        for &cell in &self.turbo {
            claim(&mut st, cell, Feature::TurboPad)?;
            st.turbo_pads.insert(cell);
        }
        for &(a, b) in &self.teleports {
            claim(&mut st, a, Feature::Teleport)?;
            claim(&mut st, b, Feature::Teleport)?;
            st.link_teleports(a, b);
        }

        // ── Random placements ────────────────────────────────────────────
        let counts = [
            (Feature::Mouse,    self.config.initial_mice),
            (Feature::Obstacle, self.config.initial_obstacles),
            (Feature::TurboPad, self.config.initial_turbo_pads),
            (Feature::Teleport, self.config.teleport_pairs),
        ];
        for (feature, n) in counts {
            for _ in 0..n {
                if st.spawn(feature).is_none() {
                    break;
                }
            }
        }

        for cell in reserved {
            st.pool.release(cell);
        }

        debug!(
            width,
            height,
            mice = st.mice.len(),
            obstacles = st.obstacles.len(),
            turbo_pads = st.turbo_pads.len(),
            teleport_pairs = st.teleports.len() / 2,
            free = st.pool.len(),
            "board built"
        );

        let board = Board::from_parts(width, height, st);
        for snake in self.agents {
            board.add_agent(snake)?;
        }
        Ok(board)
    }
}
