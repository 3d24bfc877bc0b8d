use crate::entity::Direction;
use crate::game::{pointer_to_field, Game};
use crate::renderer::{draw, Input, Renderer, Surface};
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

fn js_error(err: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err))
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,

    // Latest pointer Y wins; moves are never queued
    pending_pointer: Rc<Cell<Option<f64>>>,
    // Keyboard commands
    pending_input: Rc<RefCell<Option<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            context,
            window,
            pending_pointer: Rc::new(Cell::new(None)),
            pending_input: Rc::new(RefCell::new(None)),
        })
    }

    /// Canvas backing-store size, used as the playing field
    pub fn field_size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn setup_pointer_listeners(&self) -> Result<(), JsValue> {
        let pending_pointer = self.pending_pointer.clone();
        let canvas = self.canvas.clone();
        let mousemove_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let y = pointer_to_field(event.client_y() as f64, rect.top());
            pending_pointer.set(Some(y));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas.add_event_listener_with_callback(
            "mousemove",
            mousemove_closure.as_ref().unchecked_ref(),
        )?;
        mousemove_closure.forget(); // Keep listener alive

        // Touch drags steer the paddle the same way
        let pending_pointer = self.pending_pointer.clone();
        let canvas = self.canvas.clone();
        let touchmove_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default(); // No scrolling while playing

            if let Some(touch) = event.touches().item(0) {
                let rect = canvas.get_bounding_client_rect();
                let y = pointer_to_field(touch.client_y() as f64, rect.top());
                pending_pointer.set(Some(y));
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        self.canvas.add_event_listener_with_callback(
            "touchmove",
            touchmove_closure.as_ref().unchecked_ref(),
        )?;
        touchmove_closure.forget();

        Ok(())
    }

    fn setup_keyboard_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let input = match event.key().as_str() {
                "ArrowUp" | "w" | "W" => Some(Input::Nudge(Direction::Up)),
                "ArrowDown" | "s" | "S" => Some(Input::Nudge(Direction::Down)),
                "r" | "R" => Some(Input::Restart),
                _ => None,
            };

            if let Some(input) = input {
                *pending_input.borrow_mut() = Some(input);
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

        closure.forget();
        Ok(())
    }
}

impl Surface for WebRenderer {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center_x: f64, center_y: f64, radius: f64, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        // Only fails on a negative radius
        if self.context.arc(center_x, center_y, radius, 0.0, TAU).is_ok() {
            self.context.close_path();
            self.context.fill();
        }
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_pointer_listeners().map_err(js_error)?;
        self.setup_keyboard_listener().map_err(js_error)?;
        Ok(())
    }

    /// Called once per animation frame, so no frame limiting here
    fn render(&mut self, game: &Game) -> io::Result<()> {
        draw(game, self);
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if let Some(input) = self.pending_input.borrow_mut().take() {
            return Ok(Some(input));
        }
        Ok(self.pending_pointer.take().map(Input::Pointer))
    }
}
