use embassy_executor::Spawner;
use embassy_futures::select::select3;
use flick_engine::Engine;
use log::{info, warn};
use static_cell::StaticCell;

use config::DemoConfig;

#[path = "main/config.rs"]
mod config;
#[path = "main/session.rs"]
mod session;

static ENGINE: StaticCell<Engine> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let demo = match DemoConfig::from_env() {
        Ok(demo) => demo,
        Err(err) => {
            warn!("config: {}; using defaults", err);
            DemoConfig::default()
        }
    };
    let text = match demo.load_text() {
        Ok(text) => text,
        Err(err) => {
            warn!("capture source: {}; using built-in sample", err);
            config::SAMPLE_TEXT.to_string()
        }
    };

    let range = demo.engine.speed_range;
    info!(
        "flick: mode={:?} speed={}..={} wps extent={} tokens={}",
        demo.engine.mode,
        range.min(),
        range.max(),
        demo.engine.reference_extent,
        flick_core::tokenizer::count_tokens(&text)
    );

    let engine: &'static Engine = ENGINE.init(Engine::new(demo.engine));
    let _ = select3(
        engine.run(),
        session::drive(engine, &text),
        session::print_words(engine),
    )
    .await;

    info!("flick: session finished");
    // The std executor never returns on its own.
    std::process::exit(0);
}
