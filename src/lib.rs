pub mod config;
pub mod entity;
pub mod game;
pub mod renderer;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
#[cfg(target_arch = "wasm32")]
pub mod web_main;

pub use game::{pointer_to_field, Game, Score};
pub use entity::{Position, Direction, Side, Paddle, Ball};
pub use renderer::{draw, Renderer, Input, Surface};
#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
