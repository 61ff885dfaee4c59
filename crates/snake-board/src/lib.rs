//! `snake-board`: the shared arena every snake worker steps against.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`snake`]   | `Snake`: body deque, atomic heading, growth bookkeeping           |
//! | [`pool`]    | `FreePool`: O(1) random draw / return of unassigned cells         |
//! | [`gate`]    | `PauseGate`: pause flag with its own condition variable           |
//! | [`board`]   | `Board`, `MoveResult`, `BoardSnapshot`: the atomic step protocol  |
//! | [`builder`] | `BoardBuilder`: seeded construction and explicit placements       |
//! | [`error`]   | `BoardError`, `BoardResult<T>`                                    |
//!
//! # Locking
//!
//! The board keeps all feature sets, the free pool, and both rosters in one
//! `BoardState` behind one `parking_lot::Mutex`.  [`Board::step`] holds that
//! lock from the first read to the last write, so a step is atomic with
//! respect to every other step and every snapshot accessor.
//!
//! Each snake's body has its own small mutex.  It is written only inside
//! `step` (board lock already held) and read by collision checks (board lock
//! held) or by renderers through [`Snake::snapshot`] (board lock not taken).
//! The order is always board → body, so the two cannot deadlock.
//!
//! The pause flag lives in a separate [`PauseGate`].  Workers block there,
//! never on the board lock, so a paused worker cannot starve the others and
//! resuming never needs the board lock.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Use FxHash instead of SipHash for the cell sets.        |
//! | `serde`   | Forward `serde` derives to `snake-core` value types.    |

pub mod board;
pub mod builder;
pub mod error;
pub mod gate;
pub mod pool;
pub mod snake;

#[cfg(test)]
mod tests;

pub use board::{Board, BoardSnapshot, Feature, MoveResult, SnakeView};
pub use builder::BoardBuilder;
pub use error::{BoardError, BoardResult};
pub use gate::PauseGate;
pub use pool::FreePool;
pub use snake::{INITIAL_LENGTH, Snake};

use snake_core::Position;

/// Set of grid cells.
#[cfg(feature = "fx-hash")]
pub type CellSet = rustc_hash::FxHashSet<Position>;
/// Set of grid cells.
#[cfg(not(feature = "fx-hash"))]
pub type CellSet = std::collections::HashSet<Position>;

/// Map keyed by grid cell.
#[cfg(feature = "fx-hash")]
pub type CellMap<V> = rustc_hash::FxHashMap<Position, V>;
/// Map keyed by grid cell.
#[cfg(not(feature = "fx-hash"))]
pub type CellMap<V> = std::collections::HashMap<Position, V>;
