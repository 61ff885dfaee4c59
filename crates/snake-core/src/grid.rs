//! Grid coordinate and heading types.
//!
//! The board is a torus: moving off one edge re-enters on the opposite edge.
//! `Position` itself is unbounded; [`Position::wrap`] folds it back into the
//! board rectangle and every position the board stores has been wrapped.
//!
//! Screen convention: `x` grows to the right, `y` grows downward, so
//! [`Direction::Up`] is `(0, -1)`.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────────

/// An integer grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Reduce into `[0, width) × [0, height)` with floored modulo.
    ///
    /// Both dimensions must be positive; the board rejects anything else at
    /// construction time.
    #[inline]
    pub fn wrap(self, width: i32, height: i32) -> Position {
        Position {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    /// The neighbouring cell one step along `dir` (not wrapped).
    #[inline]
    pub fn offset(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four unit headings.
///
/// `repr(u8)` so a snake can keep its heading in an `AtomicU8` and accept
/// turns from an input thread without locking.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    Up    = 0,
    Down  = 1,
    Left  = 2,
    Right = 3,
}

impl Direction {
    /// Lookup table for uniform random turns.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` unit vector.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[inline]
    pub const fn dx(self) -> i32 {
        self.delta().0
    }

    #[inline]
    pub const fn dy(self) -> i32 {
        self.delta().1
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`as_u8`](Self::as_u8).  Values above 3 fold onto `Right`;
    /// only `as_u8` output is ever stored, so that arm is unreachable in
    /// practice.
    #[inline]
    pub const fn from_u8(raw: u8) -> Direction {
        match raw {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}
