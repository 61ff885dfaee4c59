//! Frame callbacks fired by [`GameClock`][crate::GameClock].

/// Invoked on the clock thread once per frame, paused or not.
///
/// `frame` counts from 0 at each [`start`][crate::GameClock::start].
/// Implementations should be quick; a slow callback delays later frames
/// but never stacks them.
///
/// Any `Fn(u64) + Send + Sync` closure is an observer.
///
/// # Example: snapshot printer
///
/// ```rust,ignore
/// let board = Arc::clone(&board);
/// let clock = GameClock::new(Duration::from_millis(60), move |frame: u64| {
///     if frame % 10 == 0 {
///         println!("{frame}: {} mice", board.mice().len());
///     }
/// })?;
/// ```
pub trait FrameObserver: Send + Sync + 'static {
    fn on_frame(&self, frame: u64);
}

impl<F> FrameObserver for F
where
    F: Fn(u64) + Send + Sync + 'static,
{
    fn on_frame(&self, frame: u64) {
        self(frame)
    }
}

/// A [`FrameObserver`] that does nothing.  Use when a clock is only needed
/// for its pause state.
pub struct NoopObserver;

impl FrameObserver for NoopObserver {
    fn on_frame(&self, _frame: u64) {}
}
