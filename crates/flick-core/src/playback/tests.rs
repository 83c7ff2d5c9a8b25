use super::*;
use crate::{
    config::EngineConfig,
    format::DisplayMode,
    input::{GestureEvent, GestureProvider, ScriptedGestures, TimedGesture},
};

const FOX: &str = "the quick brown fox jumps";
const FOX_LONG: &str = "the quick brown fox jumps over the lazy dog";

fn naive() -> Playback {
    Playback::new(EngineConfig::default().with_mode(DisplayMode::Naive))
}

fn loaded(text: &str, speed: i32) -> Playback {
    let mut playback = naive();
    playback.update_buffer(text);
    playback.set_speed(speed);
    playback
}

fn shown(playback: &Playback) -> Option<(&str, bool)> {
    playback
        .current_word()
        .map(|word| (word.text.as_str(), word.is_paused))
}

/// Tick at every deadline up to `until_ms`, recording `(time, text)` per emit.
fn run_until(playback: &mut Playback, until_ms: u64) -> Vec<(u64, String)> {
    let mut emitted = Vec::new();
    while let Some(at) = playback.next_deadline_ms() {
        if at > until_ms {
            break;
        }
        if playback.tick(at) == TickResult::RenderRequested
            && let Some(Some(word)) = playback.take_word_update()
        {
            emitted.push((at, word.text));
        }
    }
    emitted
}

#[test]
fn forward_playback_paces_by_speed() {
    let mut playback = loaded(FOX, 5);
    assert!(playback.play(0));

    let emitted = run_until(&mut playback, 450);
    assert_eq!(
        emitted,
        [
            (0, "the".to_string()),
            (200, "quick".to_string()),
            (400, "brown".to_string()),
        ]
    );
    assert_eq!(playback.last_displayed(), Some(2));
    assert_eq!(playback.index(), 3);
}

#[test]
fn tick_before_deadline_does_nothing() {
    let mut playback = loaded(FOX, 5);
    playback.play(1_000);
    assert_eq!(playback.tick(1_000), TickResult::RenderRequested);
    assert_eq!(playback.tick(1_150), TickResult::NoRender);
    assert_eq!(shown(&playback), Some(("the", false)));
    assert_eq!(playback.next_deadline_ms(), Some(1_200));
}

#[test]
fn interval_is_floored() {
    let mut playback = loaded(FOX, 45);
    playback.play(0);
    playback.tick(0);
    assert_eq!(playback.next_deadline_ms(), Some(50));

    playback.tick(50);
    assert_eq!(shown(&playback), Some(("quick", false)));

    playback.set_speed(-1);
    playback.tick(100);
    assert_eq!(shown(&playback), Some(("the", false)));
    assert_eq!(playback.next_deadline_ms(), Some(1_100));
}

#[test]
fn zero_speed_idles_without_advancing() {
    let mut playback = loaded(FOX, 0);
    playback.play(0);

    assert_eq!(playback.tick(0), TickResult::NoRender);
    assert_eq!(playback.next_deadline_ms(), Some(100));
    assert_eq!(playback.tick(100), TickResult::NoRender);
    assert_eq!(playback.next_deadline_ms(), Some(200));
    assert_eq!(playback.state(), PlaybackState::Playing);
    assert_eq!(playback.index(), 0);
    assert!(playback.current_word().is_none());

    // Picked up on the next poll, not instantly.
    playback.set_speed(10);
    assert_eq!(playback.tick(150), TickResult::NoRender);
    assert_eq!(playback.tick(200), TickResult::RenderRequested);
    assert_eq!(shown(&playback), Some(("the", false)));
}

#[test]
fn forward_exhaustion_stops() {
    let mut playback = loaded("one two", 10);
    playback.play(0);
    let emitted = run_until(&mut playback, 10_000);

    assert_eq!(emitted.len(), 2);
    assert_eq!(playback.state(), PlaybackState::Stopped);
    assert_eq!(playback.index(), 0);
    assert!(playback.current_word().is_none());
}

#[test]
fn empty_buffer_stops_immediately() {
    let mut playback = loaded(" \n\t ", 5);
    assert!(playback.tokens().is_empty());
    playback.play(0);
    assert_eq!(playback.tick(0), TickResult::RenderRequested);
    assert_eq!(playback.state(), PlaybackState::Stopped);
}

#[test]
fn reverse_walks_back_from_last_displayed() {
    let mut playback = loaded(FOX, 10);
    playback.play(0);
    run_until(&mut playback, 400);
    assert_eq!(shown(&playback), Some(("jumps", false)));

    playback.set_speed(-5);
    playback.tick(playback.next_deadline_ms().unwrap());
    assert_eq!(shown(&playback), Some(("fox", false)));
    assert_eq!(playback.last_displayed(), Some(3));
    assert_eq!(playback.index(), 4);

    playback.set_speed(10);
    playback.tick(playback.next_deadline_ms().unwrap());
    assert_eq!(shown(&playback), Some(("jumps", false)));
}

#[test]
fn reverse_past_start_stops() {
    let mut playback = loaded(FOX, -1);
    playback.play(0);
    assert_eq!(playback.tick(0), TickResult::RenderRequested);
    assert_eq!(playback.state(), PlaybackState::Stopped);
}

#[test]
fn stop_always_resets() {
    let mut stopped = loaded(FOX, 5);
    stopped.stop();

    let mut playing = loaded(FOX, 5);
    playing.play(0);
    run_until(&mut playing, 250);
    playing.stop();

    let mut paused = loaded(FOX, 5);
    paused.play(0);
    run_until(&mut paused, 250);
    paused.pause();
    paused.stop();

    for playback in [stopped, playing, paused] {
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.index(), 0);
        assert_eq!(playback.last_displayed(), None);
        assert!(playback.remembered_context().is_none());
        assert!(playback.current_word().is_none());
        assert_eq!(playback.next_deadline_ms(), None);
    }
}

#[test]
fn pause_captures_context_and_reemits_word() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    let _ = playback.take_word_update();

    assert!(playback.pause());
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(shown(&playback), Some(("quick", true)));
    assert_eq!(playback.current_word().map(|word| word.speed), Some(5));

    let context = playback.remembered_context().unwrap();
    assert_eq!(context.target(), "quick");
    assert_eq!(context.window(), ["the", "quick", "brown", "fox", "jumps"]);
    assert_eq!(context.target_offset(), 1);

    assert_eq!(playback.next_deadline_ms(), None);
    assert_eq!(playback.tick(10_000), TickResult::NoRender);
    assert!(!playback.pause());
}

#[test]
fn pause_before_first_word_has_no_context() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    assert!(playback.pause());
    assert!(playback.remembered_context().is_none());
    assert!(playback.current_word().is_none());
}

#[test]
fn resume_after_pause_continues_with_next_word() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    playback.pause();

    assert!(playback.play(5_000));
    assert!(playback.remembered_context().is_none());
    playback.tick(5_000);
    assert_eq!(shown(&playback), Some(("brown", false)));
}

#[test]
fn play_twice_is_idempotent() {
    let mut playback = loaded(FOX, 5);
    assert!(playback.play(0));
    playback.tick(0);
    assert!(!playback.play(100));
    assert_eq!(playback.next_deadline_ms(), Some(200));

    let emitted = run_until(&mut playback, 400);
    let words: Vec<_> = emitted.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(words, ["quick", "brown"]);
}

#[test]
fn capture_while_paused_resumes_at_paused_word() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    playback.pause();

    assert_eq!(playback.update_buffer(FOX_LONG), BufferUpdate::Resumed(1));
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(playback.index(), 1);
    assert_eq!(playback.tokens().len(), 9);
    assert!(playback.remembered_context().is_none());

    playback.play(1_000);
    playback.tick(1_000);
    assert_eq!(shown(&playback), Some(("quick", false)));
    playback.tick(1_200);
    assert_eq!(shown(&playback), Some(("brown", false)));
}

#[test]
fn repeated_captures_while_paused_keep_position() {
    let mut playback = loaded(FOX_LONG, 5);
    playback.play(0);
    run_until(&mut playback, 650);
    playback.pause();
    assert_eq!(shown(&playback), Some(("fox", true)));

    let scrolled_once = "and the quick brown fox jumps over the lazy dog";
    assert_eq!(playback.update_buffer(scrolled_once), BufferUpdate::Resumed(4));

    let scrolled_twice = "so then and the quick brown fox jumps over the lazy dog";
    assert_eq!(playback.update_buffer(scrolled_twice), BufferUpdate::Resumed(6));
    assert_eq!(playback.index(), 6);
}

#[test]
fn failed_reconciliation_reads_capture_from_top() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    playback.pause();

    assert_eq!(
        playback.update_buffer("completely unrelated words on another screen"),
        BufferUpdate::Replaced
    );
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(playback.index(), 0);
    assert_eq!(playback.last_displayed(), None);

    // Scrolling back to the original text still finds the pause point.
    assert_eq!(playback.update_buffer(FOX_LONG), BufferUpdate::Resumed(1));

    let mut short = loaded(FOX, 5);
    short.play(0);
    run_until(&mut short, 250);
    short.pause();
    assert_eq!(short.update_buffer("quick brown"), BufferUpdate::Replaced);
    assert_eq!(short.index(), 0);

    short.play(500);
    short.tick(500);
    assert_eq!(shown(&short), Some(("quick", false)));
}

#[test]
fn capture_while_stopped_resets_index() {
    let mut playback = naive();
    assert_eq!(playback.update_buffer(FOX), BufferUpdate::Replaced);
    assert_eq!(playback.progress(), (0, 5));
    assert_eq!(playback.state(), PlaybackState::Stopped);
}

#[test]
fn shorter_capture_while_playing_stops_on_next_step() {
    let mut playback = loaded(FOX_LONG, 5);
    playback.play(0);
    run_until(&mut playback, 850);
    assert_eq!(playback.index(), 5);

    assert_eq!(playback.update_buffer("just three words"), BufferUpdate::Replaced);
    assert_eq!(playback.state(), PlaybackState::Playing);
    assert_eq!(playback.progress(), (5, 3));
    // The word on screen stays until the loop notices.
    assert_eq!(shown(&playback), Some(("jumps", false)));

    assert_eq!(playback.tick(1_000), TickResult::RenderRequested);
    assert_eq!(playback.state(), PlaybackState::Stopped);
}

#[test]
fn longer_capture_while_playing_keeps_reading() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);

    playback.update_buffer("the quick ONE TWO");
    playback.tick(400);
    assert_eq!(shown(&playback), Some(("ONE", false)));
}

#[test]
fn mode_change_rerenders_current_word() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    playback.pause();
    let _ = playback.take_word_update();

    playback.set_mode(DisplayMode::Orp);
    assert_eq!(shown(&playback), Some(("q[u]ick", true)));
    assert!(playback.take_word_update().is_some());

    playback.set_mode(DisplayMode::Orp);
    assert!(playback.take_word_update().is_none());
}

#[test]
fn mode_change_after_capture_keeps_word_on_screen() {
    let mut playback = loaded(FOX, 5);
    playback.play(0);
    run_until(&mut playback, 250);
    assert_eq!(shown(&playback), Some(("quick", false)));

    playback.update_buffer("ALPHA BETA GAMMA DELTA");
    playback.set_mode(DisplayMode::Orp);
    assert_eq!(shown(&playback), Some(("q[u]ick", false)));

    playback.tick(400);
    assert_eq!(shown(&playback), Some(("G[A]MMA", false)));
}

#[test]
fn orp_mode_formats_emitted_words() {
    let mut playback = Playback::new(EngineConfig::default());
    playback.update_buffer("international hello");
    playback.set_speed(5);
    playback.play(0);
    playback.tick(0);
    assert_eq!(shown(&playback), Some(("int[e]rnational", false)));
}

#[test]
fn touch_gestures_toggle_playback() {
    let mut playback = loaded(FOX, 5);

    assert!(!playback.handle_touch_end());
    assert!(playback.handle_touch_start(0));
    assert_eq!(playback.state(), PlaybackState::Playing);
    assert!(!playback.handle_touch_start(10));

    playback.tick(0);
    assert!(playback.handle_touch_end());
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert!(!playback.handle_touch_end());

    assert!(playback.handle_touch_start(500));
    assert_eq!(playback.state(), PlaybackState::Playing);
}

#[test]
fn scripted_gestures_drive_a_session() {
    let script = [
        TimedGesture::new(0, GestureEvent::Start),
        TimedGesture::new(0, GestureEvent::Move { delta: 400.0 }),
        TimedGesture::new(100, GestureEvent::End),
    ];
    let mut gestures = ScriptedGestures::new(&script);
    let mut playback = loaded(FOX, 0);
    let controller = crate::speed::SpeedController::new(
        playback.config().speed_range,
        playback.config().reference_extent,
    );

    for now_ms in (0..=150).step_by(10) {
        while let Ok(Some(event)) = gestures.poll_event(now_ms) {
            match event {
                GestureEvent::Start => {
                    playback.handle_touch_start(now_ms);
                }
                GestureEvent::Move { delta } => {
                    playback.set_speed(controller.speed_for_drag(delta));
                }
                GestureEvent::End => {
                    playback.handle_touch_end();
                }
            }
        }
        playback.tick(now_ms);
    }

    assert!(gestures.is_finished());
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(playback.speed(), 45);
    // 1000/45 floors to 50ms: words at 0 and 50, paused at 100 before the third tick.
    assert_eq!(shown(&playback), Some(("quick", true)));
}

#[test]
fn word_updates_are_counted_and_drained() {
    let mut playback = loaded(FOX, 10);
    playback.play(0);
    run_until(&mut playback, 250);
    assert_eq!(playback.drain_word_updates(), 3);
    assert_eq!(playback.drain_word_updates(), 0);
}
