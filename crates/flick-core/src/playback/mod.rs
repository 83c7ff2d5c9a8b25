//! Playback state machine for word-at-a-time reading.
//!
//! The machine is driven by `tick(now_ms)`, like the reader app it is modelled
//! on: callers own the clock and sleep until [`Playback::next_deadline_ms`].
//! Output is a single latest-value slot drained with
//! [`Playback::take_word_update`].

use alloc::{string::String, vec::Vec};

use crate::{
    config::EngineConfig,
    format::{DisplayMode, format_word},
    reconcile::RememberedContext,
};

mod control;
mod runtime;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Outcome of one timing-loop iteration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Advanced,
    /// Speed is zero; nothing was emitted.
    Idle,
    /// No token left in the requested direction.
    Exhausted,
}

/// How a captured text was folded into the buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BufferUpdate {
    /// Paused position relocated to this index.
    Resumed(usize),
    Replaced,
}

/// Word currently on display.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayWord {
    pub text: String,
    pub speed: i32,
    pub is_paused: bool,
}

pub struct Playback {
    config: EngineConfig,
    state: PlaybackState,
    tokens: Vec<String>,
    /// Next token to emit going forward.
    index: usize,
    last_displayed: Option<usize>,
    remembered: Option<RememberedContext>,
    speed: i32,
    next_step_ms: u64,
    current_word: Option<DisplayWord>,
    /// Raw token behind `current_word`.
    shown_token: Option<String>,
    word_dirty: bool,
    words_since_drain: u32,
}

impl Playback {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: PlaybackState::Stopped,
            tokens: Vec::new(),
            index: 0,
            last_displayed: None,
            remembered: None,
            speed: 0,
            next_step_ms: 0,
            current_word: None,
            shown_token: None,
            word_dirty: false,
            words_since_drain: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> DisplayMode {
        self.config.mode
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_displayed(&self) -> Option<usize> {
        self.last_displayed
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `(index, buffer length)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.tokens.len())
    }

    pub fn remembered_context(&self) -> Option<&RememberedContext> {
        self.remembered.as_ref()
    }

    pub fn current_word(&self) -> Option<&DisplayWord> {
        self.current_word.as_ref()
    }

    /// When the loop next wants to run, if playing.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match self.state {
            PlaybackState::Playing => Some(self.next_step_ms),
            _ => None,
        }
    }

    /// The current word if it changed since the last call.
    pub fn take_word_update(&mut self) -> Option<Option<DisplayWord>> {
        if !self.word_dirty {
            return None;
        }
        self.word_dirty = false;
        Some(self.current_word.clone())
    }

    /// Words emitted since the previous drain.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    /// Show `token` rendered in the current mode.
    fn show_token(&mut self, token: String, is_paused: bool) {
        self.current_word = Some(DisplayWord {
            text: format_word(&token, self.config.mode),
            speed: self.speed,
            is_paused,
        });
        self.shown_token = Some(token);
        self.word_dirty = true;
    }

    fn clear_current_word(&mut self) {
        self.current_word = None;
        self.shown_token = None;
        self.word_dirty = true;
    }
}
