//! Pointer gesture abstraction.

mod scripted;

pub use scripted::{ScriptedGestures, TimedGesture};

/// Pointer events from the overlay surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Start,
    /// Vertical drag distance from the touch point, in overlay units.
    Move { delta: f32 },
    End,
}

/// Polled gesture source.
pub trait GestureProvider {
    type Error;

    fn poll_event(&mut self, now_ms: u64) -> Result<Option<GestureEvent>, Self::Error>;
}
