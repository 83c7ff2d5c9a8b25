//! Word-at-a-time reading core: tokenization, ORP formatting, gesture speed
//! mapping, buffer reconciliation and the tick-driven playback machine.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod format;
pub mod input;
pub mod playback;
pub mod reconcile;
pub mod speed;
pub mod tokenizer;

pub use config::EngineConfig;
pub use format::{DisplayMode, format_word};
pub use playback::{BufferUpdate, DisplayWord, Playback, PlaybackState, StepOutcome, TickResult};
pub use reconcile::{RememberedContext, resume_index};
pub use speed::{SpeedController, SpeedRange};
pub use tokenizer::tokenize;
