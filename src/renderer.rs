use crate::config::{
    BALL_SIZE, COLOR_NET, COLOR_PIECE, NET_SEGMENT, NET_SPACING, NET_WIDTH, PADDLE_HEIGHT,
    PADDLE_WIDTH,
};
use crate::entity::{Direction, Paddle};
use crate::game::Game;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer Y relative to the surface's top edge
    Pointer(f64),
    Nudge(Direction),
    Quit,
    Restart,
}

/// The three primitives the game needs from a drawing backend.
/// Colors are CSS hex strings.
pub trait Surface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn fill_circle(&mut self, center_x: f64, center_y: f64, radius: f64, color: &str);
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

/// Redraw the whole field from scratch: net, paddles, ball.
pub fn draw<S: Surface + ?Sized>(game: &Game, surface: &mut S) {
    surface.clear(0.0, 0.0, game.width, game.height);

    draw_net(game, surface);
    draw_paddle(&game.player, surface);
    draw_paddle(&game.opponent, surface);

    let center = game.ball.center();
    surface.fill_circle(center.x, center.y, BALL_SIZE / 2.0, COLOR_PIECE);
}

fn draw_net<S: Surface + ?Sized>(game: &Game, surface: &mut S) {
    let x = game.width / 2.0 - NET_WIDTH / 2.0;
    let mut y = 0.0;
    while y < game.height {
        surface.fill_rect(x, y, NET_WIDTH, NET_SEGMENT, COLOR_NET);
        y += NET_SPACING;
    }
}

fn draw_paddle<S: Surface + ?Sized>(paddle: &Paddle, surface: &mut S) {
    surface.fill_rect(
        paddle.position.x,
        paddle.position.y,
        PADDLE_WIDTH,
        PADDLE_HEIGHT,
        COLOR_PIECE,
    );
}
