//! Frame scheduler
//!
//! Accumulator-based fixed-timestep driver: physics advances in whole
//! 1/120 s steps while rendering runs exactly once per scheduled tick, at
//! whatever rate the host delivers ticks. The leftover accumulator is
//! exposed to the render callback as an interpolation fraction.

use crate::consts::{MAX_FRAME_DT, PHYSICS_TIMESTEP};

pub struct GameLoop {
    accumulator: f32,
    last_time: Option<f64>,
    running: bool,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            running: false,
        }
    }

    /// Begin scheduling from a fresh clock; any carried remainder is
    /// discarded.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Halt scheduling immediately. A stopped loop's `tick` is a no-op;
    /// steps already in progress are atomic and never interrupted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one scheduled tick at wall-clock time `now` (seconds). Invokes
    /// `step` zero or more times, one fixed timestep each, then `render`
    /// exactly once with the interpolation fraction into the next step.
    pub fn tick<S, R>(&mut self, now: f64, mut step: S, mut render: R)
    where
        S: FnMut(),
        R: FnMut(f32),
    {
        if !self.running {
            return;
        }

        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);

        // Clamp so a long stall produces a bounded burst of catch-up steps
        // instead of a spiral of death.
        self.accumulator += dt.min(MAX_FRAME_DT);

        while self.accumulator >= PHYSICS_TIMESTEP {
            step();
            self.accumulator -= PHYSICS_TIMESTEP;
        }

        render(self.accumulator / PHYSICS_TIMESTEP);
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the loop with a synthetic timestamp, counting invocations.
    fn run(game_loop: &mut GameLoop, now: f64) -> (u32, u32, f32) {
        let mut steps = 0;
        let mut renders = 0;
        let mut alpha = -1.0;
        game_loop.tick(
            now,
            || steps += 1,
            |a| {
                renders += 1;
                alpha = a;
            },
        );
        (steps, renders, alpha)
    }

    #[test]
    fn test_steps_equal_floor_of_accumulated_time() {
        let mut game_loop = GameLoop::new();
        game_loop.start();

        // First tick establishes the clock; no time has passed.
        let (steps, renders, _) = run(&mut game_loop, 1.0);
        assert_eq!(steps, 0);
        assert_eq!(renders, 1);

        // 26 ms holds three whole 1/120 s steps with ~1.3 ms left over.
        let (steps, _, alpha) = run(&mut game_loop, 1.026);
        assert_eq!(steps, 3);
        assert!(alpha > 0.05 && alpha < 0.3);
    }

    #[test]
    fn test_remainder_carries_to_next_tick() {
        let mut game_loop = GameLoop::new();
        game_loop.start();
        run(&mut game_loop, 0.0);

        // 5 ms ticks: individually under one step, cumulatively not.
        let mut total_steps = 0;
        for i in 1..=4 {
            let (steps, _, _) = run(&mut game_loop, i as f64 * 0.005);
            total_steps += steps;
        }
        // 20 ms accumulated = 2 whole steps, 3.33 ms carried.
        assert_eq!(total_steps, 2);
        let (_, _, alpha) = run(&mut game_loop, 0.020);
        assert!(alpha > 0.0 && alpha < 1.0);
    }

    #[test]
    fn test_stall_is_clamped_not_unbounded() {
        let mut game_loop = GameLoop::new();
        game_loop.start();
        run(&mut game_loop, 0.0);

        // A ten second stall catches up by at most MAX_FRAME_DT worth of
        // steps: 0.1 s at 120 Hz is 12, give or take one for the float
        // rounding right at the clamp boundary.
        let (steps, _, _) = run(&mut game_loop, 10.0);
        assert!((11..=12).contains(&steps), "got {steps} catch-up steps");
    }

    #[test]
    fn test_render_runs_once_per_tick_regardless_of_steps() {
        let mut game_loop = GameLoop::new();
        game_loop.start();
        for (i, now) in [0.0, 0.001, 0.050, 0.051].into_iter().enumerate() {
            let (_, renders, _) = run(&mut game_loop, now);
            assert_eq!(renders, 1, "tick {i}");
        }
    }

    #[test]
    fn test_stopped_loop_does_nothing() {
        let mut game_loop = GameLoop::new();
        game_loop.start();
        run(&mut game_loop, 0.0);
        game_loop.stop();

        let (steps, renders, _) = run(&mut game_loop, 5.0);
        assert_eq!(steps, 0);
        assert_eq!(renders, 0);

        // Restarting discards the stale clock; no catch-up burst.
        game_loop.start();
        let (steps, _, _) = run(&mut game_loop, 6.0);
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut game_loop = GameLoop::new();
        game_loop.start();
        run(&mut game_loop, 1.0);
        let (steps, renders, _) = run(&mut game_loop, 0.5);
        assert_eq!(steps, 0);
        assert_eq!(renders, 1);
    }
}
