//! Scripted reading session: a scraper feeding two screen captures and a
//! finger dragging along the overlay.

use embassy_time::{Instant, Timer};
use flick_core::{
    PlaybackState,
    input::{GestureEvent, ScriptedGestures, TimedGesture},
};
use flick_engine::Engine;
use log::{debug, info, warn};

const POLL_INTERVAL_MS: u64 = 10;
const RATE_REPORT_MS: u64 = 5_000;
const SESSION_LIMIT_MS: u64 = 120_000;
/// Second capture, taken while the finger is lifted.
const RESCRAPE_AT_MS: u64 = 6_500;
/// Text the scraper picks up above the article once the user scrolls back.
const SCROLL_HEADER: &str = "9:41 Reader Chapter I";

const SCRIPT: [TimedGesture; 10] = [
    TimedGesture::new(0, GestureEvent::Start),
    TimedGesture::new(0, GestureEvent::Move { delta: 0.0 }),
    TimedGesture::new(400, GestureEvent::Move { delta: 120.0 }),
    TimedGesture::new(2_400, GestureEvent::Move { delta: 400.0 }),
    TimedGesture::new(2_800, GestureEvent::Move { delta: -100.0 }),
    TimedGesture::new(5_400, GestureEvent::Move { delta: 10.0 }),
    TimedGesture::new(6_000, GestureEvent::End),
    TimedGesture::new(7_500, GestureEvent::Start),
    TimedGesture::new(7_500, GestureEvent::Move { delta: 0.0 }),
    TimedGesture::new(7_700, GestureEvent::Move { delta: 260.0 }),
];

/// The initially visible screen and the one captured after scrolling.
pub(super) fn screen_captures(text: &str) -> (String, String) {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let visible = tokens.len() - tokens.len() / 3;
    let first = tokens[..visible].join(" ");
    let second = format!("{} {}", SCROLL_HEADER, tokens.join(" "));
    (first, second)
}

pub(super) async fn drive(engine: &Engine, text: &str) {
    let (first, second) = screen_captures(text);
    let mut rescrape = Some(second);
    let mut gestures = ScriptedGestures::new(&SCRIPT);

    if first.is_empty() {
        warn!("capture: initial screen is empty, nothing to read");
    }
    let update = engine.capture_text(&first);
    info!("capture: initial screen -> {:?}, progress {:?}", update, engine.progress());

    let started = Instant::now();
    let mut report_start = started;
    loop {
        let Ok(applied) = engine.process_gestures(&mut gestures);
        if applied > 0 {
            debug!(
                "session: applied {} gestures, state={:?} speed={}",
                applied,
                engine.state(),
                engine.current_speed()
            );
        }

        let elapsed_ms = started.elapsed().as_millis();
        if elapsed_ms >= RESCRAPE_AT_MS
            && let Some(capture) = rescrape.take()
        {
            let update = engine.capture_text(&capture);
            info!(
                "capture: scrolled screen while {:?} -> {:?}, progress {:?}",
                engine.state(),
                update,
                engine.progress()
            );
        }

        let report_elapsed = report_start.elapsed().as_millis();
        if report_elapsed >= RATE_REPORT_MS {
            let words = engine.drain_word_updates() as u64;
            let wps_x100 = words * 100_000 / report_elapsed.max(1);
            info!(
                "effective_wps={}.{:02} words={} elapsed_ms={}",
                wps_x100 / 100,
                wps_x100 % 100,
                words,
                report_elapsed
            );
            report_start = Instant::now();
        }

        if gestures.is_finished() && engine.state() == PlaybackState::Stopped {
            break;
        }
        if elapsed_ms >= SESSION_LIMIT_MS {
            warn!("session: limit reached, stopping");
            engine.stop();
            break;
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

pub(super) async fn print_words(engine: &Engine) {
    let Some(mut words) = engine.subscribe_words() else {
        warn!("session: no free word subscriber");
        return core::future::pending().await;
    };

    loop {
        match words.changed().await {
            Some(word) if word.is_paused => println!("  || {}", word.text),
            Some(word) => println!("{:>4} {}", word.speed, word.text),
            None => println!("  -- stopped"),
        }
    }
}
