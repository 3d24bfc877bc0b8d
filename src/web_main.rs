use crate::{Game, Input, Renderer, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "pongCanvas";

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let mut renderer = WebRenderer::new(CANVAS_ID)?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let (width, height) = renderer.field_size();
        log::info!("field is {}x{}", width, height);

        Ok(Self {
            game: Game::new(width, height),
            renderer,
        })
    }

    /// One display refresh: apply input, one tick, one redraw
    fn update_frame(&mut self) -> Result<(), JsValue> {
        while let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            match input {
                Input::Pointer(y) => self.game.set_player_target(y),
                Input::Nudge(direction) => self.game.nudge_player(direction),
                Input::Restart => {
                    log::info!("restarting");
                    self.game.reset();
                }
                Input::Quit => {
                    // In web, we can't really quit, just log it
                    log::info!("quit ignored in the browser");
                }
            }
        }

        self.game.update();

        self.renderer
            .render(&self.game)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("starting pong");

    let game_loop = match GameLoop::new() {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            log::error!("failed to create game loop: {:?}", e);
            return Err(e);
        }
    };

    let window = web_sys::window().ok_or("no window")?;

    // Self-rescheduling requestAnimationFrame closure
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = game_loop.borrow_mut().update_frame() {
            log::error!("frame failed: {:?}", e);
            return; // Stop loop on error
        }

        // Schedule next frame
        if let (Some(window), Some(callback)) = (web_sys::window(), f.borrow().as_ref()) {
            if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("could not schedule frame: {:?}", e);
            }
        }
    }) as Box<dyn FnMut()>));

    // Start the loop
    let callback = g.borrow();
    let callback = callback.as_ref().ok_or("no frame callback")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;

    log::info!("game loop started");

    Ok(())
}
