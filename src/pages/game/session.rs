use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::Display;
use tracing::{debug, info, trace};

use crate::{
    config::{GameConfig, GameSettings},
    pages::game::{
        scheduler::Scheduler,
        world::{Spawn, Step, World},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Task {
    Tick,
    Spawn,
}

/// A world driven by its two timer loops.
///
/// The tick loop re-arms itself every `tick_interval_ms` while the game runs. The spawn loop re-arms after
/// `spawn_interval_ms` when a pipe was placed and after `spawn_retry_ms` when the last pipe was still too close.
/// Both loops stop on their own once the world leaves `Running`.
#[derive(Debug)]
pub struct Session<R: Rng = StdRng> {
    world: World,
    scheduler: Scheduler<Task>,
    rng: R,
}

impl Session<StdRng> {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Session { world: World::new(config), scheduler: Scheduler::new(), rng }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Starts a fresh game. Pending timers of the previous game are dropped so only one loop of each kind exists.
    pub fn start(&mut self) {
        self.world.reset();
        self.scheduler.clear();
        self.scheduler.after(0, Task::Spawn);
        self.scheduler.after(0, Task::Tick);
        info!(at = self.now(), "game started");
        self.run_until(self.now());
    }

    pub fn flap(&mut self) {
        self.world.flap();
        trace!(velocity = self.world.bird.velocity(), "flap");
    }

    pub fn apply_settings(&mut self, settings: GameSettings) {
        self.world.apply_settings(settings);
        debug!(?settings, "game settings applied");
    }

    /// Lets `elapsed_ms` of game time pass, firing every timer that falls due on the way.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.now() + elapsed_ms;
        self.run_until(until);
    }

    fn run_until(&mut self, until: u64) {
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.settle(until);
    }

    fn dispatch(&mut self, task: Task) {
        let config = &self.world.config;
        let (tick, spawn, retry) = (config.tick_interval_ms, config.spawn_interval_ms, config.spawn_retry_ms);

        match task {
            Task::Tick => match self.world.step() {
                Step::Continue => self.scheduler.after(tick, Task::Tick),
                Step::GameOver(cause) => {
                    info!(at = self.now(), %cause, score = self.world.score, "tick loop stopped");
                },
                Step::Halted => {},
            },
            Task::Spawn => match self.world.try_spawn(&mut self.rng) {
                Spawn::Spawned => {
                    trace!(at = self.now(), pipes = self.world.pipes.len(), "pipe spawned");
                    self.scheduler.after(spawn, Task::Spawn);
                },
                Spawn::Deferred => self.scheduler.after(retry, Task::Spawn),
                Spawn::Halted => {},
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::game::{object::Object, world::GameState};

    fn session(config: GameConfig) -> Session {
        Session::new(config, Some(7))
    }

    /// Bird floating inside the gap of pipes that always have height 200.
    fn hovering(pipe_speed: f64) -> GameConfig {
        GameConfig {
            gravity: 0.0,
            pipe_speed,
            bird_y: 250.0,
            pipe_min_height: 200,
            pipe_max_height: 200,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_nothing_happens_before_start() {
        let mut session = session(GameConfig::default());
        session.advance(10_000);
        assert_eq!(session.world().state, GameState::NotStarted);
        assert!(session.world().pipes.is_empty());
        assert_eq!(session.pending_tasks(), 0);
        assert_eq!(session.now(), 10_000);
    }

    #[test]
    fn test_flap_before_start_sets_velocity() {
        let mut session = session(GameConfig::default());
        session.flap();
        assert_eq!(session.world().bird.velocity(), -10.0);
        assert_eq!(session.world().state, GameState::NotStarted);
    }

    #[test]
    fn test_start_spawns_and_ticks_immediately() {
        let mut session = session(GameConfig::default());
        session.start();

        let world = session.world();
        assert_eq!(world.state, GameState::Running);
        assert_eq!(world.pipes.len(), 1);
        // the first tick already moved the new pipe and pulled the bird down
        assert_eq!(world.pipes[0].upper.bounds().left, 395.0);
        assert_eq!(world.bird.velocity(), 1.5);
        assert_eq!(session.pending_tasks(), 2);
    }

    #[test]
    fn test_velocity_grows_by_gravity_per_tick() {
        let mut session = session(GameConfig::default());
        session.start();
        // ticks at 0, 30, ..., 300
        session.advance(300);
        assert_eq!(session.world().bird.velocity(), 1.5 * 11.0);

        session.advance(29);
        assert_eq!(session.world().bird.velocity(), 1.5 * 11.0);
        session.advance(1);
        assert_eq!(session.world().bird.velocity(), 1.5 * 12.0);
    }

    #[test]
    fn test_free_fall_ends_on_the_floor() {
        let mut session = session(GameConfig::default());
        session.start();

        session.advance(749);
        assert_eq!(session.world().state, GameState::Running);
        assert_eq!(session.world().bird.bounds().bottom, 577.5);

        session.advance(1);
        assert_eq!(session.world().state, GameState::GameOver);
        assert_eq!(session.world().bird.bounds().bottom, 616.5);

        // no tick is re-armed, the spawn loop halts on its next attempt
        session.advance(5_000);
        assert_eq!(session.pending_tasks(), 0);
        assert_eq!(session.world().bird.bounds().bottom, 616.5);
    }

    #[test]
    fn test_spawns_wait_for_spacing() {
        let mut session = session(hovering(-2.0));
        session.start();

        // the retry at 4700 still sees the right edge at 166, the one at 4800 sees 160
        session.advance(4_700);
        assert_eq!(session.world().pipes.len(), 1);
        assert_eq!(session.world().pipes[0].right(), 166.0);

        session.advance(99);
        assert_eq!(session.world().pipes.len(), 1);
        assert_eq!(session.world().pipes[0].right(), 160.0);

        // spawn fires before the tick due at the same instant
        session.advance(1);
        assert_eq!(session.world().pipes.len(), 2);
        assert_eq!(session.world().pipes[0].right(), 158.0);
        assert_eq!(session.world().pipes[1].right(), 478.0);
    }

    #[test]
    fn test_deferred_spawn_retries_every_100ms() {
        let config = GameConfig { spawn_interval_ms: 1_000, ..hovering(-5.0) };
        let mut session = session(config);
        session.start();

        // retries at 1000, 1100, ..., 1800 all see the last right edge above 160
        session.advance(1_899);
        assert_eq!(session.world().pipes.len(), 1);
        assert_eq!(session.world().pipes[0].right(), 160.0);

        session.advance(1);
        assert_eq!(session.world().pipes.len(), 2);
    }

    #[test]
    fn test_score_counts_exited_pipes() {
        let mut session = session(hovering(-5.0));
        session.start();
        for _ in 0..80 {
            session.advance(250);
        }

        // pipes spawned every 2500 ms up to 20000, each leaves the field after 97 ticks
        let world = session.world();
        assert_eq!(world.state, GameState::Running);
        assert_eq!(world.score, 7);
        assert_eq!(world.pipes.len(), 2);
    }

    #[test]
    fn test_restart_begins_a_fresh_game() {
        let mut session = session(GameConfig::default());
        session.start();
        session.advance(1_000);
        assert_eq!(session.world().state, GameState::GameOver);

        session.start();
        let world = session.world();
        assert_eq!(world.state, GameState::Running);
        assert_eq!(world.score, 0);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.bird.bounds().top, 51.5);
        assert_eq!(session.pending_tasks(), 2);
    }

    #[test]
    fn test_restart_while_running_keeps_one_loop_each() {
        let mut session = session(hovering(-5.0));
        session.start();
        session.advance(100);
        session.start();
        session.start();
        assert_eq!(session.pending_tasks(), 2);

        session.advance(30);
        assert_eq!(session.world().pipes[0].upper.bounds().left, 390.0);
    }

    #[test]
    fn test_settings_take_effect_on_next_tick() {
        let mut session = session(hovering(-5.0));
        session.start();
        session.apply_settings(GameSettings { gravity: 0.0, pipe_speed: -10.0 });
        session.advance(30);
        assert_eq!(session.world().pipes[0].upper.bounds().left, 385.0);
    }
}
