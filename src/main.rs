//! Impulse Breakout headless runner
//!
//! Plays one level with an autopilot paddle that follows the ball and logs
//! the outcome. Pass a JSON tuning file as the first argument to override
//! the defaults; set `RUST_LOG=debug` to watch individual bricks go.

#[cfg(not(target_arch = "wasm32"))]
use impulse_breakout::{PhysicsConfig, SimEvent, TickInput, World, tick};

/// Give up after this many ticks if the level isn't cleared
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u32 = 200_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> impulse_breakout::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };
    let elapsed = config.tick_elapsed;

    let mut world = World::new(config)?;
    log::info!("Impulse Breakout (headless) starting...");

    let mut input = TickInput {
        launch: true,
        ..Default::default()
    };
    let mut paddle_hits = 0u32;
    let mut ticks = 0u32;

    while ticks < MAX_TICKS {
        // Autopilot: keep the paddle under the ball
        let ball = world.ball.body.center;
        input.paddle_target = Some(glam::Vec2::new(ball.x, world.play_area().y));

        let report = tick(&mut world, &input, elapsed)?;
        ticks += 1;

        // One-shot inputs are consumed by the first tick
        input.launch = false;

        paddle_hits += report
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::PaddleHit))
            .count() as u32;

        if report.level_cleared() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks ({:.1}s simulated): score {:.0}, {} bricks left, {} paddle hits",
        ticks,
        world.elapsed_time(),
        world.score(),
        world.bricks.len(),
        paddle_hits
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native runner on wasm; embedders drive `World` directly
}
