use super::{GestureEvent, GestureProvider};

/// A gesture released `at_ms` after the provider is first polled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedGesture {
    pub at_ms: u64,
    pub event: GestureEvent,
}

impl TimedGesture {
    pub const fn new(at_ms: u64, event: GestureEvent) -> Self {
        Self { at_ms, event }
    }
}

/// Replays a fixed gesture script. Used by the demo session and tests.
#[derive(Debug, Clone)]
pub struct ScriptedGestures<'a> {
    script: &'a [TimedGesture],
    cursor: usize,
    origin_ms: Option<u64>,
}

impl<'a> ScriptedGestures<'a> {
    pub const fn new(script: &'a [TimedGesture]) -> Self {
        Self {
            script,
            cursor: 0,
            origin_ms: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }
}

impl GestureProvider for ScriptedGestures<'_> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self, now_ms: u64) -> Result<Option<GestureEvent>, Self::Error> {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let Some(next) = self.script.get(self.cursor) else {
            return Ok(None);
        };
        if now_ms.saturating_sub(origin) < next.at_ms {
            return Ok(None);
        }

        self.cursor += 1;
        Ok(Some(next.event))
    }
}
