use alloc::string::String;

use log::debug;

use super::{BufferUpdate, Playback, PlaybackState};
use crate::{
    format::{DisplayMode, format_word},
    reconcile::{RememberedContext, resume_index},
    speed::SpeedRange,
    tokenizer::tokenize,
};

impl Playback {
    /// Start or resume. Returns `false` when already playing.
    pub fn play(&mut self, now_ms: u64) -> bool {
        if self.state == PlaybackState::Playing {
            return false;
        }

        debug!(
            "playback: {:?} -> Playing at {}/{}",
            self.state,
            self.index,
            self.tokens.len()
        );
        self.state = PlaybackState::Playing;
        self.remembered = None;
        self.next_step_ms = now_ms;
        true
    }

    /// Suspend playback, remembering where reading stopped.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        self.state = PlaybackState::Paused;
        if let Some(last) = self.last_displayed
            && let Some(context) = RememberedContext::capture(&self.tokens, last)
        {
            let token = String::from(context.target());
            self.remembered = Some(context);
            self.show_token(token, true);
        }
        debug!("playback: paused at last_displayed={:?}", self.last_displayed);
        true
    }

    pub fn stop(&mut self) {
        if self.state != PlaybackState::Stopped {
            debug!("playback: {:?} -> Stopped", self.state);
        }
        self.state = PlaybackState::Stopped;
        self.index = 0;
        self.last_displayed = None;
        self.remembered = None;
        self.next_step_ms = 0;
        self.clear_current_word();
    }

    /// Pointer down: a fresh touch starts or resumes.
    pub fn handle_touch_start(&mut self, now_ms: u64) -> bool {
        match self.state {
            PlaybackState::Stopped | PlaybackState::Paused => self.play(now_ms),
            PlaybackState::Playing => false,
        }
    }

    /// Pointer up.
    pub fn handle_touch_end(&mut self) -> bool {
        self.pause()
    }

    /// Returns `true` when the speed changed.
    pub fn set_speed(&mut self, speed: i32) -> bool {
        if self.speed == speed {
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn set_speed_range(&mut self, min: u16, max: u16) {
        self.config.speed_range = SpeedRange::new(min, max);
    }

    /// Switch presentation; the word on screen is re-rendered in the new mode.
    /// Only its formatting changes, even if the buffer was replaced since.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.config.mode == mode {
            return;
        }
        self.config.mode = mode;

        if let Some(word) = self.current_word.as_mut()
            && let Some(token) = self.shown_token.as_deref()
        {
            word.text = format_word(token, mode);
            self.word_dirty = true;
        }
    }

    /// Replace the token buffer with a fresh capture.
    ///
    /// While paused the remembered position is relocated in the new tokens.
    /// When that fails the capture is read from the top, and the pause context
    /// is kept so a later capture can still resume. After a successful
    /// resume the context is cleared; a further capture while still paused
    /// rebuilds one from the last displayed word in the current buffer.
    pub fn update_buffer(&mut self, raw_text: &str) -> BufferUpdate {
        let tokens = tokenize(raw_text);

        if self.state == PlaybackState::Paused {
            // A prior capture may already have consumed the pause snapshot.
            let context = self.remembered.clone().or_else(|| {
                self.last_displayed
                    .and_then(|last| RememberedContext::capture(&self.tokens, last))
            });

            if let Some(context) = context {
                if let Some(resume) = resume_index(&tokens, &context) {
                    debug!(
                        "buffer: resumed '{}' at {} of {} tokens",
                        context.target(),
                        resume,
                        tokens.len()
                    );
                    self.tokens = tokens;
                    self.index = resume;
                    self.last_displayed = Some(resume);
                    self.remembered = None;
                    return BufferUpdate::Resumed(resume);
                }
                debug!("buffer: no resume point for '{}'", context.target());
                self.remembered = Some(context);
            }

            self.tokens = tokens;
            self.index = 0;
            self.last_displayed = None;
            debug!("buffer: replaced while paused, {} tokens", self.tokens.len());
            return BufferUpdate::Replaced;
        }

        self.tokens = tokens;
        if self.state == PlaybackState::Stopped {
            self.index = 0;
        }
        debug!(
            "buffer: replaced while {:?}, {} tokens, index {}",
            self.state,
            self.tokens.len(),
            self.index
        );
        BufferUpdate::Replaced
    }
}
