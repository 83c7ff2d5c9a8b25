use embassy_futures::select::select;
use embassy_time::{Instant, Timer};

use crate::{Engine, now_ms};

impl Engine {
    /// Timing loop. Sleeps until the machine's next deadline, or until a
    /// control call wakes it; never returns.
    pub async fn run(&self) {
        loop {
            let deadline = self.with_playback(|playback| {
                playback.tick(now_ms());
                playback.next_deadline_ms()
            });

            match deadline {
                Some(at_ms) => {
                    select(Timer::at(Instant::from_millis(at_ms)), self.wake.wait()).await;
                }
                None => self.wake.wait().await,
            }
        }
    }
}
