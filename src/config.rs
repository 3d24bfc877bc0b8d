//! Fixed game constants.
//!
//! Geometry and speeds are in surface pixels; speeds are pixels per tick.

pub const PADDLE_WIDTH: f64 = 10.0;
pub const PADDLE_HEIGHT: f64 = 80.0;
pub const BALL_SIZE: f64 = 14.0;

/// Gap between each paddle and its side of the field
pub const PADDLE_MARGIN: f64 = 20.0;
pub const PLAYER_X: f64 = PADDLE_MARGIN;

/// Keyboard nudge distance for the player paddle
pub const PADDLE_SPEED: f64 = 6.0;
/// Opponent follow step
pub const AI_SPEED: f64 = 4.0;
pub const BALL_SPEED: f64 = 6.0;

/// Vertical velocity imparted per pixel of contact offset from paddle center
pub const DEFLECTION_GAIN: f64 = 0.25;

// Net layout
pub const NET_WIDTH: f64 = 4.0;
pub const NET_SEGMENT: f64 = 16.0;
pub const NET_SPACING: f64 = 30.0;

// Colors
pub const COLOR_NET: &str = "#444";
pub const COLOR_PIECE: &str = "#fff";

/// Logical field used when the host doesn't dictate one (the terminal frontend)
pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 400.0;

/// X of the opponent paddle on a field of the given width
pub fn opponent_x(field_width: f64) -> f64 {
    field_width - PADDLE_WIDTH - PADDLE_MARGIN
}
