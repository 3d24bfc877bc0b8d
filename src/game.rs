use crate::config::{
    opponent_x, AI_SPEED, BALL_SIZE, BALL_SPEED, DEFLECTION_GAIN, PADDLE_HEIGHT, PADDLE_SPEED,
    PADDLE_WIDTH, PLAYER_X,
};
use crate::entity::{Ball, Direction, Paddle, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Points won this session. Lives only as long as the `Game`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

/// Whole simulation state. Frontends own one of these and drive it with
/// `update` once per tick; nothing here touches I/O.
pub struct Game {
    pub width: f64,
    pub height: f64,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub score: Score,
    rng: StdRng,
}

impl Game {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Deterministic serves for a given seed
    pub fn with_seed(width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f64, height: f64, rng: StdRng) -> Self {
        let paddle_y = height / 2.0 - PADDLE_HEIGHT / 2.0;

        let mut game = Self {
            width,
            height,
            player: Paddle::new(PLAYER_X, paddle_y),
            opponent: Paddle::new(opponent_x(width), paddle_y),
            ball: Ball::new(0.0, 0.0, 0.0, 0.0),
            score: Score::default(),
            rng,
        };
        game.player.clamp(height);
        game.opponent.clamp(height);
        game.reset_ball();

        game
    }

    /// One tick at the host's frame rate.
    pub fn update(&mut self) {
        self.step(1.0);
    }

    /// Advance by `dt` ticks. Ball travel and the opponent's step scale with
    /// `dt`; collision responses don't. `step(1.0)` is exactly `update()`.
    pub fn step(&mut self, dt: f64) {
        self.advance_ball(dt);
        self.resolve_paddle_collision(Side::Player);
        self.resolve_paddle_collision(Side::Opponent);
        self.check_score();
        self.update_opponent(dt);
    }

    pub fn advance_ball(&mut self, dt: f64) {
        let ball = &mut self.ball;
        ball.position.x += ball.velocity.0 * dt;
        ball.position.y += ball.velocity.1 * dt;

        // Top and bottom walls bounce; the sides are goals
        if ball.position.y < 0.0 {
            ball.position.y = 0.0;
            ball.velocity.1 = -ball.velocity.1;
        }
        if ball.position.y + BALL_SIZE > self.height {
            ball.position.y = self.height - BALL_SIZE;
            ball.velocity.1 = -ball.velocity.1;
        }
    }

    /// Bounce the ball off one paddle if they overlap. Returns whether it hit.
    pub fn resolve_paddle_collision(&mut self, side: Side) -> bool {
        let paddle = match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        };
        if !self.ball.overlaps(paddle) {
            return false;
        }

        // Flush against the facing edge so the ball can't stick inside
        self.ball.position.x = match side {
            Side::Player => paddle.position.x + PADDLE_WIDTH,
            Side::Opponent => paddle.position.x - BALL_SIZE,
        };
        self.ball.velocity.0 = -self.ball.velocity.0;

        // Off-center hits add spin. Unclamped.
        let hit_point = self.ball.center().y - paddle.center_y();
        self.ball.velocity.1 = hit_point * DEFLECTION_GAIN;

        true
    }

    /// Reset the ball if it has left the field through either side.
    /// Returns the side that won the point.
    pub fn check_score(&mut self) -> Option<Side> {
        let scorer = if self.ball.position.x < 0.0 {
            Side::Opponent
        } else if self.ball.position.x > self.width {
            Side::Player
        } else {
            return None;
        };

        self.score.award(scorer);
        log::debug!(
            "point to {:?}, score {}-{}",
            scorer,
            self.score.player,
            self.score.opponent
        );
        self.reset_ball();

        Some(scorer)
    }

    /// Recenter the ball and serve in a random direction
    pub fn reset_ball(&mut self) {
        self.ball.position.x = self.width / 2.0 - BALL_SIZE / 2.0;
        self.ball.position.y = self.height / 2.0 - BALL_SIZE / 2.0;

        let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.velocity.0 = BALL_SPEED * sign;
        self.ball.velocity.1 = BALL_SPEED * self.rng.gen_range(-1.0..1.0);
    }

    /// Step the opponent toward the ball's top edge. No prediction and no
    /// easing, so it visibly jitters once it catches up.
    pub fn update_opponent(&mut self, dt: f64) {
        let center = self.opponent.center_y();
        let target = self.ball.position.y;

        if center < target {
            self.opponent.position.y += AI_SPEED * dt;
        } else if center > target {
            self.opponent.position.y -= AI_SPEED * dt;
        }
        self.opponent.clamp(self.height);
    }

    /// Center the player paddle on a surface-relative pointer Y.
    pub fn set_player_target(&mut self, pointer_y: f64) {
        self.player.position.y = pointer_y - PADDLE_HEIGHT / 2.0;
        self.player.clamp(self.height);
    }

    pub fn nudge_player(&mut self, direction: Direction) {
        self.player.moved(direction, PADDLE_SPEED, self.height);
    }

    /// Start a fresh game on the same field. The RNG carries on.
    pub fn reset(&mut self) {
        let paddle_y = self.height / 2.0 - PADDLE_HEIGHT / 2.0;
        self.player.position.y = paddle_y;
        self.opponent.position.y = paddle_y;
        self.player.clamp(self.height);
        self.opponent.clamp(self.height);
        self.score = Score::default();
        self.reset_ball();
    }
}

/// Convert an absolute pointer Y into field coordinates given the surface's
/// on-screen top edge.
pub fn pointer_to_field(client_y: f64, surface_top: f64) -> f64 {
    client_y - surface_top
}
