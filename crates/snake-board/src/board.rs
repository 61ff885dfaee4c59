//! The shared board and its atomic step protocol.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use snake_core::{AgentId, BoardRng, Direction, Position};
use tracing::{debug, trace};

use crate::{BoardBuilder, BoardError, BoardResult, CellMap, CellSet, FreePool, PauseGate, Snake};

// ── MoveResult ────────────────────────────────────────────────────────────────

/// Outcome of one [`Board::step`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MoveResult {
    /// The snake moved onto an ordinary cell.
    Moved,
    /// The snake moved onto a mouse, ate it, and grew.
    AteMouse,
    /// The next cell held an obstacle or another snake; nothing changed.
    HitObstacle,
    /// The snake moved onto a turbo pad and consumed it.
    AteTurbo,
    /// The snake entered a teleport and came out at its paired exit.
    Teleported,
}

impl MoveResult {
    pub const ALL: [MoveResult; 5] = [
        MoveResult::Moved,
        MoveResult::AteMouse,
        MoveResult::HitObstacle,
        MoveResult::AteTurbo,
        MoveResult::Teleported,
    ];
}

// ── Feature ───────────────────────────────────────────────────────────────────

/// Special cell categories the board places from its free pool.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    Mouse,
    Obstacle,
    TurboPad,
    Teleport,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Mouse    => "mouse",
            Feature::Obstacle => "obstacle",
            Feature::TurboPad => "turbo pad",
            Feature::Teleport => "teleport",
        };
        f.write_str(name)
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

/// One snake as seen by a renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeView {
    pub id:      AgentId,
    pub heading: Direction,
    /// Head first.
    pub body:    Vec<Position>,
}

/// A consistent copy of everything a renderer draws, taken under a single
/// acquisition of the board lock.
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    pub width:      i32,
    pub height:     i32,
    pub mice:       CellSet,
    pub obstacles:  CellSet,
    pub turbo_pads: CellSet,
    pub teleports:  CellMap<Position>,
    /// Live snakes in roster order.
    pub snakes:     Vec<SnakeView>,
    pub paused:     bool,
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// Everything guarded by the board lock.
pub(crate) struct BoardState {
    pub(crate) mice:               CellSet,
    pub(crate) obstacles:          CellSet,
    pub(crate) turbo_pads:         CellSet,
    /// Symmetric: `a → b` implies `b → a`.
    pub(crate) teleports:          CellMap<Position>,
    pub(crate) pool:               FreePool,
    pub(crate) live:               Vec<Arc<Snake>>,
    pub(crate) retired:            Vec<Arc<Snake>>,
    pub(crate) rng:                BoardRng,
    pub(crate) turbo_spawn_chance: f64,
}

/// The shared arena.
///
/// Share it between worker threads as `Arc<Board>`.  Every method takes
/// `&self`; interior locking is described in the crate docs.
///
/// Construct with [`Board::new`] for the stock layout or with
/// [`BoardBuilder`] for seeds, custom counts, and fixed placements.
pub struct Board {
    width:  i32,
    height: i32,
    state:  Mutex<BoardState>,
    gate:   PauseGate,
}

impl Board {
    /// A `width × height` board with 6 mice, 4 obstacles, 3 turbo pads and
    /// 2 teleport pairs drawn at random from the free pool.
    ///
    /// Fails with [`BoardError::InvalidDimensions`] if either dimension is
    /// not positive.
    pub fn new(width: i32, height: i32) -> BoardResult<Self> {
        BoardBuilder::new(width, height).build()
    }

    pub(crate) fn from_parts(width: i32, height: i32, state: BoardState) -> Self {
        Self {
            width,
            height,
            state: Mutex::new(state),
            gate:  PauseGate::new(false),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: Position) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    // ── Step protocol ─────────────────────────────────────────────────────

    /// Advance `snake` by one cell, resolving the move against the live
    /// state of every other snake.
    ///
    /// Runs entirely under the board lock.  In order:
    ///
    /// 1. `next = wrap(head + heading)`.
    /// 2. Obstacle at `next` → [`MoveResult::HitObstacle`], nothing changes.
    /// 3. Any other live snake's body at `next` (as it stands now) →
    ///    [`MoveResult::HitObstacle`], nothing changes.
    /// 4. Teleport source at `next` → jump to the paired exit.
    /// 5. Consume a mouse and/or turbo pad at `next` and return that cell to
    ///    the free pool.
    /// 6. Push the new head; grow by one if a mouse was eaten.
    /// 7. After a mouse: spawn a mouse, an obstacle and, with
    ///    `turbo_spawn_chance`, a turbo pad.  Empty pool → spawn skipped.
    ///
    /// The result is ranked `AteTurbo` > `AteMouse` > `Teleported` > `Moved`.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownAgent`] if `snake` was never added to this board,
    /// [`BoardError::ForeignAgent`] if its id belongs to a different `Snake`.
    /// Both are caller bugs, not game events.
    pub fn step(&self, snake: &Snake) -> BoardResult<MoveResult> {
        let mut st = self.state.lock();
        st.check_registered(snake)?;

        let id = snake.id();
        let mut next = snake
            .head()
            .offset(snake.direction())
            .wrap(self.width, self.height);

        if st.obstacles.contains(&next) {
            trace!(agent = %id, at = %next, "blocked by obstacle");
            return Ok(MoveResult::HitObstacle);
        }

        if st.live.iter().any(|other| other.id() != id && other.occupies(next)) {
            trace!(agent = %id, at = %next, "blocked by another snake");
            return Ok(MoveResult::HitObstacle);
        }

        let mut teleported = false;
        if let Some(&exit) = st.teleports.get(&next) {
            trace!(agent = %id, from = %next, to = %exit, "teleported");
            next = exit;
            teleported = true;
        }

        let ate_mouse = st.mice.remove(&next);
        let ate_turbo = st.turbo_pads.remove(&next);
        if ate_mouse || ate_turbo {
            st.pool.release(next);
        }

        snake.advance(next, ate_mouse);

        if ate_mouse {
            st.spawn(Feature::Mouse);
            st.spawn(Feature::Obstacle);
            let chance = st.turbo_spawn_chance;
            if st.rng.gen_bool(chance) {
                st.spawn(Feature::TurboPad);
            }
        }

        let result = if ate_turbo {
            MoveResult::AteTurbo
        } else if ate_mouse {
            MoveResult::AteMouse
        } else if teleported {
            MoveResult::Teleported
        } else {
            MoveResult::Moved
        };
        trace!(agent = %id, at = %next, ?result, "stepped");
        Ok(result)
    }

    // ── Feature snapshots ─────────────────────────────────────────────────

    pub fn mice(&self) -> CellSet {
        self.state.lock().mice.clone()
    }

    pub fn obstacles(&self) -> CellSet {
        self.state.lock().obstacles.clone()
    }

    pub fn turbo_pads(&self) -> CellSet {
        self.state.lock().turbo_pads.clone()
    }

    pub fn teleports(&self) -> CellMap<Position> {
        self.state.lock().teleports.clone()
    }

    /// Number of cells currently in the free pool.
    pub fn free_cells(&self) -> usize {
        self.state.lock().pool.len()
    }

    /// Everything a renderer needs, copied under one lock acquisition.
    pub fn snapshot(&self) -> BoardSnapshot {
        let st = self.state.lock();
        BoardSnapshot {
            width:      self.width,
            height:     self.height,
            mice:       st.mice.clone(),
            obstacles:  st.obstacles.clone(),
            turbo_pads: st.turbo_pads.clone(),
            teleports:  st.teleports.clone(),
            snakes:     st
                .live
                .iter()
                .map(|s| SnakeView {
                    id:      s.id(),
                    heading: s.direction(),
                    body:    s.snapshot(),
                })
                .collect(),
            paused:     self.gate.is_paused(),
        }
    }

    // ── Rosters ───────────────────────────────────────────────────────────

    /// Register a snake as live and return the shared handle its worker and
    /// any input thread should hold.
    ///
    /// No overlap check against features is made here; use
    /// [`BoardBuilder::agent`] to keep initial features off starting cells.
    pub fn add_agent(&self, snake: Snake) -> BoardResult<Arc<Snake>> {
        let mut st = self.state.lock();
        let id = snake.id();
        if st.find(id).is_some() {
            return Err(BoardError::DuplicateAgent(id));
        }
        let head = snake.head();
        if !self.contains(head) {
            return Err(BoardError::OutOfBounds(head));
        }
        let snake = Arc::new(snake);
        st.live.push(Arc::clone(&snake));
        debug!(agent = %id, at = %head, heading = %snake.direction(), "snake added");
        Ok(snake)
    }

    /// Move a live snake to the retired roster.
    ///
    /// Nothing in the step protocol calls this; collisions only deflect.
    pub fn retire_agent(&self, id: AgentId) -> BoardResult<Arc<Snake>> {
        let mut st = self.state.lock();
        let idx = st
            .live
            .iter()
            .position(|s| s.id() == id)
            .ok_or(BoardError::UnknownAgent(id))?;
        let snake = st.live.remove(idx);
        st.retired.push(Arc::clone(&snake));
        debug!(agent = %id, retired = st.retired.len(), "snake retired");
        Ok(snake)
    }

    /// Copy of the live roster, insertion order.
    pub fn live_agents(&self) -> Vec<Arc<Snake>> {
        self.state.lock().live.clone()
    }

    /// Copy of the retired roster, retirement order.
    pub fn retired_agents(&self) -> Vec<Arc<Snake>> {
        self.state.lock().retired.clone()
    }

    pub fn agent_count(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Live snake at `index`, or `None` if out of range.
    pub fn agent_at(&self, index: usize) -> Option<Arc<Snake>> {
        self.state.lock().live.get(index).cloned()
    }

    // ── Pause gate ────────────────────────────────────────────────────────

    pub fn set_paused(&self, paused: bool) {
        self.gate.set_paused(paused);
        debug!(paused, "board pause gate set");
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Block until unpaused.  Takes only the gate's lock, never the board's.
    pub fn wait_if_paused(&self) {
        self.gate.wait_if_paused();
    }

    pub fn gate(&self) -> &PauseGate {
        &self.gate
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.state.lock();
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mice", &st.mice.len())
            .field("obstacles", &st.obstacles.len())
            .field("turbo_pads", &st.turbo_pads.len())
            .field("teleports", &(st.teleports.len() / 2))
            .field("free", &st.pool.len())
            .field("live", &st.live.len())
            .field("retired", &st.retired.len())
            .finish()
    }
}

// ── BoardState internals ──────────────────────────────────────────────────────

impl BoardState {
    fn find(&self, id: AgentId) -> Option<&Arc<Snake>> {
        self.live
            .iter()
            .chain(self.retired.iter())
            .find(|s| s.id() == id)
    }

    fn check_registered(&self, snake: &Snake) -> BoardResult<()> {
        match self.find(snake.id()) {
            Some(known) if std::ptr::eq(Arc::as_ptr(known), snake) => Ok(()),
            Some(_) => Err(BoardError::ForeignAgent(snake.id())),
            None    => Err(BoardError::UnknownAgent(snake.id())),
        }
    }

    /// Draw one cell from the pool and assign it to `feature`.  Returns the
    /// cell, or `None` when the pool is exhausted.
    ///
    /// A teleport always spawns as a linked pair; the first endpoint is
    /// returned.
    pub(crate) fn spawn(&mut self, feature: Feature) -> Option<Position> {
        let set = match feature {
            Feature::Mouse    => &mut self.mice,
            Feature::Obstacle => &mut self.obstacles,
            Feature::TurboPad => &mut self.turbo_pads,
            Feature::Teleport => return self.spawn_teleport_pair().map(|(a, _)| a),
        };
        let Some(cell) = self.pool.take_random(&mut self.rng) else {
            debug!(%feature, "free pool exhausted; spawn skipped");
            return None;
        };
        set.insert(cell);
        debug!(%feature, at = %cell, "spawned");
        Some(cell)
    }

    /// Draw two cells and link them as a teleport pair.  If only one cell is
    /// available it goes back to the pool and no pair is made.
    pub(crate) fn spawn_teleport_pair(&mut self) -> Option<(Position, Position)> {
        let a = self.pool.take_random(&mut self.rng)?;
        let Some(b) = self.pool.take_random(&mut self.rng) else {
            self.pool.release(a);
            debug!("free pool exhausted; teleport pair skipped");
            return None;
        };
        self.link_teleports(a, b);
        Some((a, b))
    }

    pub(crate) fn link_teleports(&mut self, a: Position, b: Position) {
        self.teleports.insert(a, b);
        self.teleports.insert(b, a);
        debug!(%a, %b, "teleport pair linked");
    }
}
