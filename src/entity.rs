use crate::config::{BALL_SIZE, PADDLE_HEIGHT, PADDLE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Paddles only ever move along the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Sign of the Y change for this direction in screen coordinates
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left paddle, driven by the pointer
    Player,
    /// Right paddle, driven by the follow policy
    Opponent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub position: Position,
}

impl Paddle {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Position::new(x, y),
        }
    }

    pub fn center_y(&self) -> f64 {
        self.position.y + PADDLE_HEIGHT / 2.0
    }

    /// Keep the paddle fully inside `[0, field_height - PADDLE_HEIGHT]`.
    /// Lower bound wins on a field shorter than the paddle.
    pub fn clamp(&mut self, field_height: f64) {
        self.position.y = self.position.y.min(field_height - PADDLE_HEIGHT).max(0.0);
    }

    pub fn moved(&mut self, direction: Direction, step: f64, field_height: f64) {
        self.position.y += direction.sign() * step;
        self.clamp(field_height);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Top-left of the bounding box
    pub position: Position,
    pub velocity: (f64, f64),
}

impl Ball {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            position: Position::new(x, y),
            velocity: (vx, vy),
        }
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.position.x + BALL_SIZE / 2.0,
            self.position.y + BALL_SIZE / 2.0,
        )
    }

    /// Strict bounding-box overlap; touching edges don't count.
    pub fn overlaps(&self, paddle: &Paddle) -> bool {
        let b = self.position;
        let p = paddle.position;
        b.x < p.x + PADDLE_WIDTH
            && b.x + BALL_SIZE > p.x
            && b.y + BALL_SIZE > p.y
            && b.y < p.y + PADDLE_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_paddle_on_field() {
        let mut paddle = Paddle::new(20.0, -15.0);
        paddle.clamp(400.0);
        assert_eq!(paddle.position.y, 0.0);

        paddle.position.y = 390.0;
        paddle.clamp(400.0);
        assert_eq!(paddle.position.y, 320.0);
    }

    #[test]
    fn test_clamp_on_field_shorter_than_paddle() {
        let mut paddle = Paddle::new(20.0, 10.0);
        paddle.clamp(50.0);
        assert_eq!(paddle.position.y, 0.0);
    }

    #[test]
    fn test_moved_respects_direction() {
        let mut paddle = Paddle::new(20.0, 100.0);
        paddle.moved(Direction::Up, 6.0, 400.0);
        assert_eq!(paddle.position.y, 94.0);
        paddle.moved(Direction::Up.opposite(), 6.0, 400.0);
        assert_eq!(paddle.position.y, 100.0);
    }

    #[test]
    fn test_touching_edges_is_not_overlap() {
        let paddle = Paddle::new(20.0, 50.0);

        // Flush against the paddle's right face
        let ball = Ball::new(30.0, 60.0, -6.0, 0.0);
        assert!(!ball.overlaps(&paddle));

        // Resting on top of the paddle
        let ball = Ball::new(22.0, 36.0, -6.0, 0.0);
        assert!(!ball.overlaps(&paddle));

        let ball = Ball::new(29.0, 60.0, -6.0, 0.0);
        assert!(ball.overlaps(&paddle));
    }

    #[test]
    fn test_center_of_bounding_box() {
        let ball = Ball::new(100.0, 200.0, 0.0, 0.0);
        assert_eq!(ball.center(), Position::new(107.0, 207.0));
    }
}
