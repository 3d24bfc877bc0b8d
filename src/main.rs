#[cfg(not(target_arch = "wasm32"))]
use crossterm::terminal;
#[cfg(not(target_arch = "wasm32"))]
use pong_canvas::{
    cli_renderer::grid_for_terminal, config, CliRenderer, Game, Input, Renderer,
};
#[cfg(not(target_arch = "wasm32"))]
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

// One logical tick per 60 Hz frame, independent of how fast the terminal redraws
#[cfg(not(target_arch = "wasm32"))]
const GAME_UPDATE_RATE: Duration = Duration::from_micros(16_667);

#[cfg(not(target_arch = "wasm32"))]
fn main() -> io::Result<()> {
    env_logger::init();

    let (term_width, term_height) = terminal::size()?;
    let (cols, rows) = grid_for_terminal(term_width, term_height);

    let mut game = Game::new(config::DEFAULT_FIELD_WIDTH, config::DEFAULT_FIELD_HEIGHT);
    let mut renderer = CliRenderer::new(cols, rows, game.width, game.height);
    log::info!(
        "starting {}x{} field on a {}x{} cell grid",
        game.width,
        game.height,
        cols,
        rows
    );

    renderer.init()?;

    let mut last_game_update = Instant::now();

    'running: loop {
        // Drain everything queued since the last frame
        while let Some(input) = renderer.poll_input()? {
            match input {
                Input::Pointer(y) => game.set_player_target(y),
                Input::Nudge(direction) => game.nudge_player(direction),
                Input::Restart => {
                    log::info!("restarting");
                    game.reset();
                }
                Input::Quit => break 'running,
            }
        }

        if last_game_update.elapsed() >= GAME_UPDATE_RATE {
            game.update();
            last_game_update = Instant::now();
        }

        renderer.render(&game)?;
    }

    renderer.cleanup()?;
    log::info!(
        "final score {}-{}",
        game.score.player,
        game.score.opponent
    );
    Ok(())
}

// The browser build starts from `start_game`
#[cfg(target_arch = "wasm32")]
fn main() {}
