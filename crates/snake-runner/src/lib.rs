//! `snake-runner`: the threads that drive a snake race.
//!
//! # Moving parts
//!
//! ```text
//!   ┌── worker "snake-0" ──┐   ┌── worker "snake-1" ──┐
//!   │ wait on PauseGate    │   │ wait on PauseGate    │      ┌── "frame-clock" ──┐
//!   │ maybe random turn    │   │ maybe random turn    │      │ on_frame(n) every │
//!   │ Board::step ─────────┼───┼─▶ one board mutex ◀──┼──────┤ period, paused or │
//!   │ react, sleep 80/40ms │   │ react, sleep 80/40ms │      │ not (snapshots)   │
//!   └──────────────────────┘   └──────────────────────┘      └───────────────────┘
//! ```
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`cancel`]   | `CancelToken`: cooperative, sleep-interrupting cancellation  |
//! | [`runner`]   | `SnakeRunner`: one snake's loop; `RunnerSummary`             |
//! | [`workers`]  | `RunnerPool`: spawns one named thread per snake, joins them  |
//! | [`observer`] | `FrameObserver` trait, `NoopObserver`                        |
//! | [`clock`]    | `GameClock`, `ClockState`: fixed-rate frame callbacks        |
//! | [`race`]     | `Race`, `RacePhase`, `RaceStats`: one authority for pause    |
//! | [`error`]    | `RunnerError`, `RunnerResult<T>`                             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let board = Arc::new(BoardBuilder::new(35, 28).agent(snake).build()?);
//! let clock = GameClock::new(Duration::from_millis(60), |_frame: u64| redraw())?;
//! let mut race = Race::new(board, RunnerConfig::default(), clock)?;
//! race.spawn_all()?;        // workers start parked behind the pause gate
//! race.start();
//! // ...
//! let stats = race.pause();
//! let summaries = race.shutdown()?;
//! ```

pub mod cancel;
pub mod clock;
pub mod error;
pub mod observer;
pub mod race;
pub mod runner;
pub mod workers;


pub use cancel::CancelToken;
pub use clock::{ClockState, GameClock};
pub use error::{RunnerError, RunnerResult};
pub use observer::{FrameObserver, NoopObserver};
pub use race::{Race, RacePhase, RaceStats};
pub use runner::{RunnerSummary, SnakeRunner, StepOutcome};
pub use workers::RunnerPool;
