//! `snake-core`: foundational types for the snake race engine.
//!
//! This crate is a dependency of every other `snake-*` crate.  It has no
//! `snake-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                                |
//! | [`grid`]   | `Position` (wrap-around coordinates), `Direction`        |
//! | [`rng`]    | `AgentRng` (per-snake), `BoardRng` (shared board draws)  |
//! | [`config`] | `BoardConfig`, `RunnerConfig`, `ClockConfig`             |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoardConfig, ClockConfig, RunnerConfig};
pub use error::{CoreError, CoreResult};
pub use grid::{Direction, Position};
pub use ids::AgentId;
pub use rng::{AgentRng, BoardRng};
