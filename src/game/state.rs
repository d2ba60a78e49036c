use super::action::Direction;
use super::difficulty::Difficulty;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Last segment
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Everything behind the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Whether a head moving into `pos` runs into the body.
    ///
    /// The tail cell only counts when the snake is about to grow, because
    /// otherwise the tail leaves it on the same step.
    pub fn would_collide(&self, pos: Position, growing: bool) -> bool {
        let occupied = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        occupied.contains(&pos)
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Every segment touches the next one
    pub fn is_contiguous(&self) -> bool {
        self.body.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub difficulty: Difficulty,
    /// Raw score, before the difficulty multiplier
    pub score: u32,
    pub foods_eaten: u32,
    pub steps: u32,
    pub is_alive: bool,
    /// Set when the snake filled every cell
    pub board_full: bool,
}

impl GameState {
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            difficulty,
            score: 0,
            foods_eaten: 0,
            steps: 0,
            is_alive: true,
            board_full: false,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Cells not covered by the snake, row by row
    pub fn free_cells(&self) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.grid_width * self.grid_height);
        for y in 0..self.grid_height as i32 {
            for x in 0..self.grid_width as i32 {
                let pos = Position::new(x, y);
                if !self.snake.contains(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// Final score for this round under its difficulty
    pub fn final_score(&self) -> u32 {
        self.difficulty.final_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(snake: Snake) -> GameState {
        GameState::new(snake, Position::new(0, 0), 20, 20, Difficulty::Medium)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert!(pos.is_adjacent(Position::new(5, 6)));
        assert!(!pos.is_adjacent(Position::new(6, 6)));
        assert!(!pos.is_adjacent(pos));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert!(snake.is_contiguous());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.move_snake(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.move_snake(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(snake.is_contiguous());
    }

    #[test]
    fn test_tail_cell_is_free_unless_growing() {
        // A 2x2 loop: the head chases its own tail.
        let snake = Snake {
            body: vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ],
            direction: Direction::Right,
        };
        let tail = snake.tail();
        assert!(!snake.would_collide(tail, false));
        assert!(snake.would_collide(tail, true));
        assert!(snake.would_collide(Position::new(1, 2), false));
    }

    #[test]
    fn test_bounds_checking() {
        let state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3));

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_free_cells_exclude_snake() {
        let state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3));
        let free = state.free_cells();

        assert_eq!(free.len(), 20 * 20 - 3);
        assert!(free.iter().all(|pos| !state.is_occupied_by_snake(*pos)));
    }

    #[test]
    fn test_final_score_uses_multiplier() {
        let mut state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 1));
        state.score = 50;
        assert_eq!(state.final_score(), 75);
    }
}
