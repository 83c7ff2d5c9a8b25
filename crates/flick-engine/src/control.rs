use log::debug;

use flick_core::{
    BufferUpdate, DisplayMode, SpeedController,
    input::{GestureEvent, GestureProvider},
};

use crate::{Engine, now_ms};

impl Engine {
    /// Fresh visible text from the scraper.
    pub fn capture_text(&self, raw: &str) -> BufferUpdate {
        let update = self.with_playback(|playback| playback.update_buffer(raw));
        self.wake.signal(());
        update
    }

    pub fn play(&self) -> bool {
        let started = self.with_playback(|playback| playback.play(now_ms()));
        self.wake.signal(());
        started
    }

    pub fn pause(&self) -> bool {
        let paused = self.with_playback(|playback| playback.pause());
        self.wake.signal(());
        paused
    }

    pub fn stop(&self) {
        self.with_playback(|playback| playback.stop());
        self.wake.signal(());
    }

    /// Set the signed speed directly. A held loop notices on its next idle poll.
    pub fn set_speed(&self, speed: i32) {
        if self.with_playback(|playback| playback.set_speed(speed)) {
            self.publish_speed(speed);
        }
    }

    pub fn set_speed_range(&self, min: u16, max: u16) {
        self.with_playback(|playback| playback.set_speed_range(min, max));
    }

    pub fn set_mode(&self, mode: DisplayMode) {
        self.with_playback(|playback| playback.set_mode(mode));
    }

    /// Pointer moved `delta` from the touch point. Returns the mapped speed.
    pub fn gesture_offset(&self, delta: f32) -> i32 {
        let (speed, changed) = self.with_playback(|playback| {
            let config = playback.config();
            let controller = SpeedController::new(config.speed_range, config.reference_extent);
            let speed = controller.speed_for_drag(delta);
            (speed, playback.set_speed(speed))
        });
        if changed {
            self.publish_speed(speed);
        }
        speed
    }

    pub fn gesture_start(&self) -> bool {
        let started = self.with_playback(|playback| playback.handle_touch_start(now_ms()));
        self.wake.signal(());
        started
    }

    pub fn gesture_end(&self) -> bool {
        let paused = self.with_playback(|playback| playback.handle_touch_end());
        self.wake.signal(());
        paused
    }

    pub fn apply_gesture(&self, event: GestureEvent) {
        match event {
            GestureEvent::Start => {
                self.gesture_start();
            }
            GestureEvent::Move { delta } => {
                self.gesture_offset(delta);
            }
            GestureEvent::End => {
                self.gesture_end();
            }
        }
    }

    /// Drain every pending event from `input`. Returns how many were applied.
    pub fn process_gestures<P: GestureProvider>(&self, input: &mut P) -> Result<usize, P::Error> {
        let mut applied = 0usize;
        while let Some(event) = input.poll_event(now_ms())? {
            debug!("gesture: {:?}", event);
            self.apply_gesture(event);
            applied += 1;
        }
        Ok(applied)
    }
}
