//! A single snake: body cells, heading, and growth bookkeeping.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use snake_core::{AgentId, Direction, Position};

/// Target length every snake starts with.
pub const INITIAL_LENGTH: usize = 5;

struct Body {
    /// Front = head, back = tail.  Never empty.
    cells:      VecDeque<Position>,
    /// Only ever increases.
    target_len: usize,
}

/// A snake shared between its worker thread, the board roster, and any
/// input or rendering thread.
///
/// Heading is an atomic so [`turn`](Self::turn) is safe from any thread.
/// The body is written only by [`Board::step`](crate::Board::step), which
/// calls [`advance`](Self::advance) while holding the board lock.
pub struct Snake {
    id:      AgentId,
    heading: AtomicU8,
    body:    Mutex<Body>,
}

impl Snake {
    /// A one-cell snake at `start` heading `heading`.  It grows to
    /// [`INITIAL_LENGTH`] over its first steps.
    pub fn new(id: AgentId, start: Position, heading: Direction) -> Self {
        Self {
            id,
            heading: AtomicU8::new(heading.as_u8()),
            body:    Mutex::new(Body {
                cells:      VecDeque::from([start]),
                target_len: INITIAL_LENGTH,
            }),
        }
    }

    /// Shorthand for `Snake::new(id, Position::new(x, y), heading)`.
    pub fn at(x: i32, y: i32, heading: Direction, id: AgentId) -> Self {
        Self::new(id, Position::new(x, y), heading)
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_u8(self.heading.load(Ordering::Acquire))
    }

    /// Request a new heading.
    ///
    /// A request for the exact reverse of the current heading is ignored and
    /// `false` is returned.  Any other request takes effect for the next step.
    /// The check and the store are one compare-and-swap, so a concurrent
    /// turn can never slip a reversal past the check.
    pub fn turn(&self, dir: Direction) -> bool {
        self.heading
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                if Direction::from_u8(raw).opposite() == dir {
                    None
                } else {
                    Some(dir.as_u8())
                }
            })
            .is_ok()
    }

    pub fn head(&self) -> Position {
        self.body.lock().cells[0]
    }

    /// Current number of body cells.
    pub fn len(&self) -> usize {
        self.body.lock().cells.len()
    }

    /// Always `false`; a snake has at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn target_length(&self) -> usize {
        self.body.lock().target_len
    }

    /// Independent copy of the body, head first.
    pub fn snapshot(&self) -> Vec<Position> {
        self.body.lock().cells.iter().copied().collect()
    }

    /// Whether any body cell equals `cell`.  Same answer as searching
    /// [`snapshot`](Self::snapshot), without the allocation.
    pub fn occupies(&self, cell: Position) -> bool {
        self.body.lock().cells.contains(&cell)
    }

    /// Push `new_head`; grow the target by one if `grew`; trim the tail down
    /// to the target.
    ///
    /// No reachability check: the board is the only caller and has already
    /// resolved wrapping and teleports.
    pub fn advance(&self, new_head: Position, grew: bool) {
        let mut body = self.body.lock();
        body.cells.push_front(new_head);
        if grew {
            body.target_len += 1;
        }
        while body.cells.len() > body.target_len {
            body.cells.pop_back();
        }
    }
}

impl std::fmt::Debug for Snake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.body.lock();
        f.debug_struct("Snake")
            .field("id", &self.id)
            .field("heading", &self.direction())
            .field("len", &body.cells.len())
            .field("target_len", &body.target_len)
            .finish()
    }
}
