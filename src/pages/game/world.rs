use std::collections::VecDeque;

use rand::Rng;
use strum::Display;
use tracing::{debug, info};

use crate::{
    config::{GameConfig, GameSettings},
    pages::game::{
        bird::Bird,
        object::Object,
        pipe::PipePair,
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Cause {
    OutOfBounds,
    Collision,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    GameOver(Cause),
    Halted,
}

/// Result of one spawn attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Spawned,
    Deferred,
    Halted,
}

/// Everything the rules touch: the bird, the pipe queue in spawn order, the score and the game state.
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub bird: Bird,
    pub pipes: VecDeque<PipePair>,
    pub score: u32,
    pub state: GameState,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let bird = Bird::new(config.bird_x, config.bird_y, config.bird_size);
        World { config, bird, pipes: VecDeque::new(), score: 0, state: GameState::NotStarted }
    }

    /// Clears pipes and score, puts a fresh bird at its start position and enters `Running`.
    pub fn reset(&mut self) {
        self.bird = Bird::new(self.config.bird_x, self.config.bird_y, self.config.bird_size);
        self.pipes.clear();
        self.score = 0;
        self.state = GameState::Running;
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn apply_settings(&mut self, settings: GameSettings) {
        self.config.apply(settings);
    }

    /// Accepted in every state. Without a running loop the new velocity is never used.
    pub fn flap(&mut self) {
        self.bird.flap(self.config.flap_impulse);
    }

    pub fn step(&mut self) -> Step {
        if !self.is_running() {
            return Step::Halted;
        }

        self.bird.update(self.config.gravity);

        let bird = self.bird.bounds();
        if bird.top < 0.0 || bird.bottom > self.config.field_height {
            return self.game_over(Cause::OutOfBounds);
        }

        let speed = self.config.pipe_speed;
        let mut exited = Vec::new();
        let mut hit = false;
        for (index, pipe) in self.pipes.iter_mut().enumerate() {
            pipe.shift(speed);

            if pipe.exited() {
                exited.push(index);
                self.score += 1;
            }

            // later pipes stay where they are
            if pipe.collides_with(&self.bird) {
                hit = true;
                break;
            }
        }
        if hit {
            return self.game_over(Cause::Collision);
        }

        for index in exited.into_iter().rev() {
            self.pipes.remove(index);
        }

        Step::Continue
    }

    /// Appends a pipe pair at the right edge unless the newest one is still too close to it.
    pub fn try_spawn<R: Rng>(&mut self, rng: &mut R) -> Spawn {
        if !self.is_running() {
            return Spawn::Halted;
        }

        if let Some(last) = self.pipes.back() {
            if last.right() > self.config.spawn_threshold() {
                debug!(right = last.right(), "spawn deferred, last pipe too close");
                return Spawn::Deferred;
            }
        }

        let low = self.config.pipe_min_height;
        let high = self.config.pipe_max_height.max(low);
        let height = rng.gen_range(low..=high);
        self.spawn_pipe(f64::from(height));
        Spawn::Spawned
    }

    pub fn spawn_pipe(&mut self, height: f64) {
        let c = &self.config;
        let pipe = PipePair::new(c.field_width, c.pipe_width, height, c.pipe_gap, c.field_height);
        self.pipes.push_back(pipe);
    }

    fn game_over(&mut self, cause: Cause) -> Step {
        self.state = GameState::GameOver;
        info!(%cause, score = self.score, "game over");
        Step::GameOver(cause)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::pages::game::object::Bounds;

    fn running_world() -> World {
        let mut world = World::new(GameConfig::default());
        world.reset();
        world
    }

    /// A world whose bird hovers inside the gap of every pipe with height 200.
    fn hovering_world() -> World {
        let mut world = World::new(GameConfig { gravity: 0.0, bird_y: 250.0, ..GameConfig::default() });
        world.reset();
        world
    }

    #[test]
    fn test_new_world_is_idle() {
        let mut world = World::new(GameConfig::default());
        assert_eq!(world.state, GameState::NotStarted);
        assert_eq!(world.step(), Step::Halted);
        assert_eq!(world.try_spawn(&mut StdRng::seed_from_u64(1)), Spawn::Halted);
        assert_eq!(world.bird.bounds(), Bounds::new(50.0, 50.0, 90.0, 90.0));
    }

    #[test]
    fn test_gravity_accumulates_each_tick() {
        let mut world = running_world();
        for _ in 0..10 {
            assert_eq!(world.step(), Step::Continue);
        }
        assert_eq!(world.bird.velocity(), 15.0);
        assert_eq!(world.bird.bounds().top, 50.0 + 1.5 * 55.0);
    }

    #[test]
    fn test_flap_sets_impulse_in_any_state() {
        let mut world = World::new(GameConfig::default());
        world.flap();
        assert_eq!(world.bird.velocity(), -10.0);

        world.reset();
        world.step();
        world.step();
        world.flap();
        assert_eq!(world.bird.velocity(), -10.0);
    }

    #[test]
    fn test_leaving_the_floor_ends_the_game() {
        let mut world = running_world();
        let mut ticks = 0;
        let outcome = loop {
            ticks += 1;
            match world.step() {
                Step::Continue => continue,
                other => break other,
            }
        };
        assert_eq!(outcome, Step::GameOver(Cause::OutOfBounds));
        assert_eq!(ticks, 26);
        assert_eq!(world.state, GameState::GameOver);
        assert_eq!(world.step(), Step::Halted);
    }

    #[test]
    fn test_leaving_the_ceiling_ends_the_game() {
        let mut world = World::new(GameConfig { bird_y: 10.0, ..GameConfig::default() });
        world.reset();
        world.flap();

        // 10 - 8.5 = 1.5, then 1.5 - 7 = -5.5
        assert_eq!(world.step(), Step::Continue);
        assert_eq!(world.step(), Step::GameOver(Cause::OutOfBounds));
        assert_eq!(world.bird.bounds().top, -5.5);
    }

    #[test]
    fn test_pipes_move_by_configured_speed() {
        let mut world = hovering_world();
        world.spawn_pipe(200.0);
        world.step();
        assert_eq!(world.pipes[0].upper.bounds().left, 395.0);

        world.apply_settings(GameSettings { gravity: 0.0, pipe_speed: 3.0 });
        world.step();
        assert_eq!(world.pipes[0].upper.bounds().left, 398.0);
    }

    #[test]
    fn test_score_counts_pipes_leaving_the_field() {
        let mut world = hovering_world();
        world.spawn_pipe(200.0);
        world.pipes[0].shift(-475.0);
        assert_eq!(world.pipes[0].right(), 5.0);

        assert_eq!(world.step(), Step::Continue);
        assert_eq!(world.score, 0);
        assert_eq!(world.pipes.len(), 1);

        assert_eq!(world.step(), Step::Continue);
        assert_eq!(world.score, 1);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_only_exited_pipes_are_removed() {
        let mut world = hovering_world();
        world.spawn_pipe(200.0);
        world.spawn_pipe(200.0);
        world.pipes[0].shift(-482.0);

        assert_eq!(world.step(), Step::Continue);
        assert_eq!(world.score, 1);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.pipes[0].upper.bounds().left, 395.0);
    }

    #[test]
    fn test_collision_stops_the_tick() {
        let mut world = running_world();
        // first pipe overlaps the bird after the move, second is left behind untouched
        world.spawn_pipe(200.0);
        world.spawn_pipe(200.0);
        world.pipes[0].shift(-320.0);

        assert_eq!(world.step(), Step::GameOver(Cause::Collision));
        assert_eq!(world.state, GameState::GameOver);
        assert_eq!(world.pipes[0].upper.bounds().left, 75.0);
        assert_eq!(world.pipes[1].upper.bounds().left, 400.0);
    }

    #[test]
    fn test_score_before_collision_is_kept() {
        let mut world = running_world();
        world.spawn_pipe(200.0);
        world.spawn_pipe(200.0);
        world.pipes[0].shift(-482.0);
        world.pipes[1].shift(-320.0);

        assert_eq!(world.step(), Step::GameOver(Cause::Collision));
        assert_eq!(world.score, 1);
        // the removal pass never ran
        assert_eq!(world.pipes.len(), 2);
    }

    #[test]
    fn test_spawn_guard_defers_until_threshold() {
        let mut world = hovering_world();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(world.try_spawn(&mut rng), Spawn::Spawned);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.pipes[0].right(), 480.0);

        world.pipes[0].shift(-319.0);
        assert_eq!(world.try_spawn(&mut rng), Spawn::Deferred);
        assert_eq!(world.pipes.len(), 1);

        world.pipes[0].shift(-1.0);
        assert_eq!(world.pipes[0].right(), 160.0);
        assert_eq!(world.try_spawn(&mut rng), Spawn::Spawned);
        assert_eq!(world.pipes.len(), 2);
    }

    #[test]
    fn test_spawned_heights_stay_in_range() {
        let mut world = running_world();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            world.pipes.clear();
            world.try_spawn(&mut rng);
            let pipe = &world.pipes[0];
            let height = pipe.upper.bounds().bottom;
            assert!((100.0..=400.0).contains(&height));
            assert_eq!(height.fract(), 0.0);
            assert_eq!(pipe.gap(), 150.0);
            assert_eq!(pipe.lower.bounds().bottom, 600.0);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut world = running_world();
        world.spawn_pipe(150.0);
        world.score = 4;
        world.step();
        world.state = GameState::GameOver;

        world.reset();
        assert_eq!(world.state, GameState::Running);
        assert_eq!(world.score, 0);
        assert!(world.pipes.is_empty());
        assert_eq!(world.bird.velocity(), 0.0);
        assert_eq!(world.bird.bounds().top, 50.0);
    }
}
