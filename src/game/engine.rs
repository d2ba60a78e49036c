use super::{
    action::{Action, Direction},
    config::GameConfig,
    difficulty::Difficulty,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Information about a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Cell the food was eaten at
    pub eaten_at: Option<Position>,
    /// Whether the requested turn was applied
    pub turned: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The snake covers the whole field and no food can be placed
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round at the given difficulty
    pub fn reset(&mut self, difficulty: Difficulty) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(
            snake,
            Position::new(0, 0),
            self.config.grid_width,
            self.config.grid_height,
            difficulty,
        );
        // The grid is validated to be larger than the starting snake.
        if let Some(food) = self.spawn_food(&state) {
            state.food = food;
        }
        state
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        let mut info = StepInfo::default();

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if new_direction != state.snake.direction
                && !state.snake.direction.is_opposite(new_direction)
            {
                state.snake.direction = new_direction;
                info.turned = true;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = new_head == state.food;

        if let Some(collision_type) = self.check_collision(state, new_head, ate_food) {
            state.is_alive = false;
            state.steps += 1;
            info.collision_type = Some(collision_type);

            return StepResult {
                terminated: true,
                info,
            };
        }

        state.snake.move_snake(ate_food);
        state.steps += 1;

        if ate_food {
            state.score += self.config.food_points;
            state.foods_eaten += 1;
            info.ate_food = true;
            info.eaten_at = Some(new_head);

            match self.spawn_food(state) {
                Some(food) => state.food = food,
                None => {
                    state.is_alive = false;
                    state.board_full = true;
                    info.board_full = true;
                    return StepResult {
                        terminated: true,
                        info,
                    };
                }
            }
        }

        StepResult {
            terminated: false,
            info,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        pos: Position,
        growing: bool,
    ) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.would_collide(pos, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell the snake does not cover, if any is left
    fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        state.free_cells().choose(&mut self.rng).copied()
    }
}
