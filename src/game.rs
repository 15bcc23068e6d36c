use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{GameConfig, GridSize};
use crate::food::spawn_food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    /// `None` once the snake fills the board.
    pub food: Option<Position>,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    move_delay: Duration,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a state whose food placement is seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        debug_assert!(config.validate().is_ok(), "game config must be validated");

        let snake = starting_snake(config.grid());
        let food = spawn_food(&mut rng, config.grid(), &snake);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            move_delay: config.initial_move_delay(),
            config,
            rng,
        }
    }

    /// Starts a fresh game on the same board, keeping the random source.
    pub fn reset(&mut self) {
        self.snake = starting_snake(self.bounds());
        self.food = spawn_food(&mut self.rng, self.config.grid(), &self.snake);
        self.score = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.tick_count = 0;
        self.move_delay = self.config.initial_move_delay();
    }

    /// Requests a new heading for the next tick. Reversals and requests made
    /// after game over are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if !self.snake.set_direction(direction) {
            debug!(?direction, "ignored reversing direction change");
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        self.snake.move_forward();

        let head = self.snake.head();
        if !head.is_within_bounds(self.bounds()) {
            self.end_game(DeathReason::WallCollision);
            return;
        }

        // Checked after the tail moved, so entering the vacated tail cell is legal.
        if self.snake.head_overlaps_body() {
            self.end_game(DeathReason::SelfCollision);
            return;
        }

        if self.food == Some(head) {
            self.snake.grow_next();
            self.score = self.score.saturating_add(self.config.food_reward);
            self.move_delay = self
                .move_delay
                .mul_f64(self.config.speedup_factor)
                .max(self.config.min_move_delay());
            self.food = spawn_food(&mut self.rng, self.config.grid(), &self.snake);

            debug!(
                score = self.score,
                length = self.snake.len(),
                move_delay_ms = self.move_delay.as_millis(),
                "food eaten"
            );
        }
    }

    /// Delay between ticks at the current speed.
    #[must_use]
    pub fn move_delay(&self) -> Duration {
        self.move_delay
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);

        info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
    }
}

fn starting_snake(bounds: GridSize) -> Snake {
    Snake::new(Position::center_of(bounds), Direction::Right)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GameConfig;
    use crate::input::Direction;

    use super::{DeathReason, GameState, GameStatus};
    use crate::snake::{Position, Snake};

    fn small_config(width: u16, height: u16) -> GameConfig {
        GameConfig {
            width,
            height,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_game_starts_centered_and_running() {
        let state = GameState::new_with_seed(GameConfig::default(), 1);

        assert_eq!(
            state.snake.segments().copied().collect::<Vec<_>>(),
            vec![Position { x: 20, y: 15 }]
        );
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.move_delay(), Duration::from_millis(120));

        let food = state.food.expect("empty board always has food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn single_segment_moves_right() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 2);
        state.food = Some(Position { x: 0, y: 0 });

        state.tick();

        assert_eq!(state.snake.head(), Position { x: 21, y: 15 });
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn snake_grows_on_tick_after_eating() {
        let mut state = GameState::new_with_seed(small_config(10, 10), 1);
        state.snake = Snake::new(Position { x: 1, y: 1 }, Direction::Right);
        state.food = Some(Position { x: 2, y: 1 });

        state.tick();
        assert_eq!(state.snake.len(), 1);
        assert!(state.snake.is_growing());

        state.food = Some(Position { x: 9, y: 9 });
        state.tick();
        assert_eq!(state.snake.len(), 2);
        assert!(!state.snake.is_growing());
    }

    #[test]
    fn eating_food_scores_speeds_up_and_respawns() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 4);
        state.food = Some(Position { x: 21, y: 15 });

        state.tick();

        assert_eq!(state.score, 10);
        assert!(state.snake.is_growing());
        assert_eq!(
            state.move_delay(),
            Duration::from_millis(120).mul_f64(0.95)
        );
        let food = state.food.expect("board is far from full");
        assert_ne!(food, Position { x: 21, y: 15 });
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn move_delay_never_drops_below_floor() {
        let mut state = GameState::new_with_seed(small_config(200, 3), 5);

        for _ in 0..60 {
            state.food = Some(state.snake.next_head_position());
            let before = state.move_delay();
            state.tick();
            assert_eq!(state.status, GameStatus::Running);
            assert!(state.move_delay() <= before);
            assert!(state.move_delay() >= Duration::from_millis(30));
        }

        assert_eq!(state.move_delay(), Duration::from_millis(30));
        assert_eq!(state.score, 600);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 2);
        state.snake = Snake::new(Position { x: 39, y: 15 }, Direction::Right);
        let food_before = state.food;

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(state.snake.head(), Position { x: 40, y: 15 });
        assert_eq!(state.score, 0);
        assert_eq!(state.food, food_before);
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(small_config(6, 6), 3);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 3 },
                Position { x: 2, y: 3 },
                Position { x: 3, y: 3 },
                Position { x: 3, y: 2 },
            ],
            Direction::Down,
        );

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn moving_into_vacated_tail_cell_is_legal() {
        let mut state = GameState::new_with_seed(small_config(6, 6), 3);
        state.food = Some(Position { x: 5, y: 5 });
        // 2x2 loop: head (1,1), tail (1,2) directly below the head.
        state.snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );
        state.set_direction(Direction::Down);

        state.tick();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.head(), Position { x: 1, y: 2 });
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn game_over_freezes_state() {
        let mut state = GameState::new_with_seed(small_config(4, 4), 6);
        state.snake = Snake::new(Position { x: 3, y: 1 }, Direction::Right);
        state.tick();
        assert!(state.is_game_over());

        let body: Vec<_> = state.snake.segments().copied().collect();
        let food = state.food;
        let score = state.score;
        let ticks = state.tick_count;

        for _ in 0..5 {
            state.set_direction(Direction::Up);
            state.tick();
        }

        assert_eq!(state.snake.segments().copied().collect::<Vec<_>>(), body);
        assert_eq!(state.food, food);
        assert_eq!(state.score, score);
        assert_eq!(state.tick_count, ticks);
        assert_eq!(state.snake.pending_direction(), Direction::Right);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 8);
        state.food = Some(Position { x: 0, y: 0 });

        state.set_direction(Direction::Left);
        state.tick();

        assert_eq!(state.snake.head(), Position { x: 21, y: 15 });
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 9);
        state.food = Some(Position { x: 21, y: 15 });
        state.tick();
        state.set_direction(Direction::Up);
        for _ in 0..20 {
            state.tick();
        }
        assert!(state.is_game_over());

        state.reset();

        assert_eq!(
            state.snake.segments().copied().collect::<Vec<_>>(),
            vec![Position { x: 20, y: 15 }]
        );
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(!state.snake.is_growing());
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.death_reason, None);
        assert_eq!(state.move_delay(), Duration::from_millis(120));
        let food = state.food.expect("fresh board has food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn filling_the_board_removes_food() {
        let mut state = GameState::new_with_seed(small_config(2, 2), 10);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
            ],
            Direction::Left,
        );
        state.snake.grow_next();
        state.food = Some(Position { x: 0, y: 1 });
        state.set_direction(Direction::Down);

        state.tick();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.food, None);
    }
}
