//! Reading-session engine.
//!
//! One [`Engine`] owns the playback machine for a session. Control calls from
//! the overlay, the text scraper and a UI may arrive from anywhere; each is
//! serialized through a single blocking mutex. [`Engine::run`] is the timing
//! loop and must be polled by exactly one task for the engine's lifetime.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::cell::RefCell;

use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    signal::Signal,
    watch::{Receiver, Watch},
};
use embassy_time::Instant;
use flick_core::{DisplayWord, EngineConfig, Playback, PlaybackState};

mod control;
mod runner;


pub use flick_core;

/// Concurrent subscribers allowed per observable.
pub const WATCH_SUBSCRIBERS: usize = 4;

pub type WordReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, Option<DisplayWord>, WATCH_SUBSCRIBERS>;
pub type SpeedReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, i32, WATCH_SUBSCRIBERS>;

pub struct Engine {
    playback: Mutex<CriticalSectionRawMutex, RefCell<Playback>>,
    wake: Signal<CriticalSectionRawMutex, ()>,
    words: Watch<CriticalSectionRawMutex, Option<DisplayWord>, WATCH_SUBSCRIBERS>,
    speeds: Watch<CriticalSectionRawMutex, i32, WATCH_SUBSCRIBERS>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let engine = Self {
            playback: Mutex::new(RefCell::new(Playback::new(config))),
            wake: Signal::new(),
            words: Watch::new(),
            speeds: Watch::new(),
        };
        // Subscribers bound before the first change still read a value.
        engine.words.sender().send(None);
        engine.speeds.sender().send(0);
        engine
    }

    pub fn state(&self) -> PlaybackState {
        self.with_playback(|playback| playback.state())
    }

    pub fn config(&self) -> EngineConfig {
        self.with_playback(|playback| *playback.config())
    }

    pub fn current_word(&self) -> Option<DisplayWord> {
        self.with_playback(|playback| playback.current_word().cloned())
    }

    pub fn current_speed(&self) -> i32 {
        self.with_playback(|playback| playback.speed())
    }

    /// `(index, buffer length)`.
    pub fn progress(&self) -> (usize, usize) {
        self.with_playback(|playback| playback.progress())
    }

    pub fn drain_word_updates(&self) -> u32 {
        self.with_playback(|playback| playback.drain_word_updates())
    }

    /// Subscribe to word changes. A receiver sees the most recent value and
    /// every later change; nothing older is replayed. `None` once
    /// [`WATCH_SUBSCRIBERS`] receivers are alive.
    pub fn subscribe_words(&self) -> Option<WordReceiver<'_>> {
        self.words.receiver()
    }

    /// Subscribe to speed changes. Same rules as [`Engine::subscribe_words`].
    pub fn subscribe_speed(&self) -> Option<SpeedReceiver<'_>> {
        self.speeds.receiver()
    }

    /// Run `f` with exclusive access to the machine, then publish any word
    /// change it produced before the lock is released.
    fn with_playback<R>(&self, f: impl FnOnce(&mut Playback) -> R) -> R {
        self.playback.lock(|cell| {
            let mut playback = cell.borrow_mut();
            let result = f(&mut playback);
            if let Some(word) = playback.take_word_update() {
                self.words.sender().send(word);
            }
            result
        })
    }

    fn publish_speed(&self, speed: i32) {
        self.speeds.sender().send(speed);
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}
