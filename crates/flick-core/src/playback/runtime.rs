use log::info;

use super::{Playback, PlaybackState, StepOutcome, TickResult};

impl Playback {
    /// Run the timing loop if its deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.state != PlaybackState::Playing || now_ms < self.next_step_ms {
            return TickResult::NoRender;
        }

        match self.step() {
            StepOutcome::Advanced => {
                self.next_step_ms = now_ms + self.config.step_interval_ms(self.speed);
                TickResult::RenderRequested
            }
            StepOutcome::Idle => {
                self.next_step_ms = now_ms + self.config.idle_poll_ms;
                TickResult::NoRender
            }
            StepOutcome::Exhausted => {
                info!(
                    "playback: buffer exhausted at {}/{} (speed {})",
                    self.index,
                    self.tokens.len(),
                    self.speed
                );
                self.stop();
                TickResult::RenderRequested
            }
        }
    }

    /// Advance one token in the direction of the current speed and emit it.
    pub fn step(&mut self) -> StepOutcome {
        let target = match self.speed {
            0 => return StepOutcome::Idle,
            speed if speed > 0 => Some(self.index),
            _ => match self.last_displayed {
                Some(last) => last.checked_sub(1),
                None => self.index.checked_sub(1),
            },
        };

        // A shorter capture can leave the position past the end.
        let Some(target) = target.filter(|&target| target < self.tokens.len()) else {
            return StepOutcome::Exhausted;
        };

        self.last_displayed = Some(target);
        self.index = target + 1;
        let token = self.tokens[target].clone();
        self.show_token(token, false);
        self.words_since_drain = self.words_since_drain.saturating_add(1);
        StepOutcome::Advanced
    }
}
