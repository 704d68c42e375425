//! Astro Pinball entry point
//!
//! Native builds run a short scripted headless session that exercises the
//! full pipeline: table assembly, plunger charge and launch, the fixed
//! timestep loop, and event-driven logging. A browser front end links the
//! library and supplies rendering, audio, and real input instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Instant;

    use astro_pinball::sim::EventKind;
    use astro_pinball::{GameEvent, GameLoop, HighScoreStore, InputAction, InputState, Simulation};

    env_logger::init();
    log::info!("astro pinball (headless) starting");

    let mut sim = Simulation::new(HighScoreStore::new());

    sim.events.on(EventKind::ScoreChange, |event| {
        if let GameEvent::ScoreChange { score, earned } = event {
            log::info!("score {score} (+{earned})");
        }
    });
    sim.events.on(EventKind::BallDrain, |event| {
        if let GameEvent::BallDrain { balls_remaining } = event {
            log::info!("ball drained, {balls_remaining} left");
        }
    });
    sim.events.on(EventKind::GameOver, |event| {
        if let GameEvent::GameOver { score, high_score } = event {
            log::info!("game over: {score} (best {high_score})");
        }
    });

    sim.handle_input(InputAction::Start, true);

    // Pull the plunger for half a second, then let it fly.
    sim.handle_input(InputAction::Plunger, true);
    for _ in 0..60 {
        sim.step();
    }
    sim.handle_input(InputAction::Plunger, false);

    let mut game_loop = GameLoop::new();
    game_loop.start();
    let started = Instant::now();
    let mut input = InputState::new();
    let mut frames: u64 = 0;

    while sim.state.is_playing && started.elapsed().as_secs_f64() < 30.0 {
        // Flap both flippers once a second to keep the ball alive a while;
        // the edge filter turns the held frames into single press/release
        // events.
        let flap = frames % 240 < 20;
        for action in [InputAction::LeftFlipper, InputAction::RightFlipper] {
            if input.set(action, flap) {
                sim.handle_input(action, flap);
            }
        }

        game_loop.tick(
            started.elapsed().as_secs_f64(),
            || sim.step(),
            |_alpha| {},
        );
        sim.render_sync(1.0 / 240.0);

        frames += 1;
        std::thread::sleep(std::time::Duration::from_millis(4));
    }
    game_loop.stop();

    log::info!(
        "session finished: score {}, best {}",
        sim.state.score,
        sim.state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives the library through wasm-bindgen; this
    // binary target is native-only.
}
