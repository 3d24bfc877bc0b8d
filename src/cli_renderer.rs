use crate::entity::Direction;
use crate::game::Game;
use crate::renderer::{draw, Input, Renderer, Surface};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const BACKGROUND: Color = Color::Black;
/// Rows kept free under the field for the status line
const STATUS_ROWS: u16 = 2;

/// Field grid that fits a terminal of the given size. Each cell is two
/// characters wide so cells come out roughly square.
pub fn grid_for_terminal(term_width: u16, term_height: u16) -> (u16, u16) {
    let cols = (term_width / 2).max(20);
    let rows = term_height.saturating_sub(STATUS_ROWS).max(10);
    (cols, rows)
}

/// Parse `#rgb` or `#rrggbb`. Anything else draws white.
pub fn parse_color(css: &str) -> Color {
    let hex = css.trim_start_matches('#');
    if !hex.is_ascii() {
        return Color::White;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    let rgb = match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|v| v as u8 * 17));
            match (it.next().flatten(), it.next().flatten(), it.next().flatten()) {
                (Some(r), Some(g), Some(b)) => Some((r, g, b)),
                _ => None,
            }
        }
        6 => match (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])) {
            (Some(r), Some(g), Some(b)) => Some((r, g, b)),
            _ => None,
        },
        _ => None,
    };

    match rgb {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::White,
    }
}

/// Rasterises field-space draw calls onto a grid of terminal cells. A cell
/// is painted when the shape touches any part of it, so thin paddles and
/// the small ball never vanish at coarse resolutions.
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    field_width: f64,
    field_height: f64,
    cells: Vec<Option<Color>>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, field_width: f64, field_height: f64) -> Self {
        let mut canvas = Self {
            cols,
            rows,
            cell_width: 1.0,
            cell_height: 1.0,
            field_width,
            field_height,
            cells: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cell_width = self.field_width / self.cols as f64;
        self.cell_height = self.field_height / self.rows as f64;
        self.cells = vec![None; self.cols as usize * self.rows as usize];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Color> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    /// Field Y at the vertical center of a terminal row
    pub fn row_to_field_y(&self, row: u16) -> f64 {
        (row as f64 + 0.5) * self.cell_height
    }

    /// Half-open cell index range covered by `[start, start + len)`
    fn span(start: f64, len: f64, cell: f64, count: u16) -> std::ops::Range<u16> {
        if len <= 0.0 {
            return 0..0;
        }
        let first = (start / cell).floor().max(0.0);
        let last = ((start + len) / cell).ceil().min(count as f64);
        if last <= first {
            return 0..0;
        }
        (first as u16)..(last as u16)
    }

    fn paint(&mut self, col: u16, row: u16, color: Option<Color>) {
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = color;
    }

    fn paint_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Option<Color>) {
        for row in Self::span(y, height, self.cell_height, self.rows) {
            for col in Self::span(x, width, self.cell_width, self.cols) {
                self.paint(col, row, color);
            }
        }
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.paint_rect(x, y, width, height, None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.paint_rect(x, y, width, height, Some(parse_color(color)));
    }

    fn fill_circle(&mut self, center_x: f64, center_y: f64, radius: f64, color: &str) {
        let color = Some(parse_color(color));
        let diameter = radius * 2.0;
        let rows = Self::span(center_y - radius, diameter, self.cell_height, self.rows);
        let cols = Self::span(center_x - radius, diameter, self.cell_width, self.cols);

        for row in rows {
            let top = row as f64 * self.cell_height;
            let ny = center_y.clamp(top, top + self.cell_height);
            for col in cols.clone() {
                let left = col as f64 * self.cell_width;
                let nx = center_x.clamp(left, left + self.cell_width);
                let (dx, dy) = (nx - center_x, ny - center_y);
                if dx * dx + dy * dy <= radius * radius {
                    self.paint(col, row, color);
                }
            }
        }
    }
}

pub struct CliRenderer {
    canvas: CellCanvas,
    last_render: Instant,
    target_frame_time: Duration,
    active: bool,
}

impl CliRenderer {
    pub fn new(cols: u16, rows: u16, field_width: f64, field_height: f64) -> Self {
        Self {
            canvas: CellCanvas::new(cols, rows, field_width, field_height),
            last_render: Instant::now(),
            // ~60 FPS
            target_frame_time: Duration::from_millis(16),
            active: false,
        }
    }

    fn draw_status(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.rows()),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "You {}  :  {} CPU    Mouse or Up/Down to move | R restart | Q quit",
                game.score.player, game.score.opponent
            ))
        )?;
        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        self.active = true;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }
        self.last_render = Instant::now();

        draw(game, &mut self.canvas);

        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        for row in 0..self.canvas.rows() {
            for col in 0..self.canvas.cols() {
                let color = self.canvas.cell(col, row).unwrap_or(BACKGROUND);
                queue!(stdout, SetBackgroundColor(color), Print("  "))?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_status(game, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(Duration::from_millis(2))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => {
                let input = match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
                    KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),
                    KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                        Some(Input::Nudge(Direction::Up))
                    }
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                        Some(Input::Nudge(Direction::Down))
                    }
                    _ => None,
                };
                Ok(input)
            }
            Event::Mouse(MouseEvent { kind, row, .. }) => match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                    Ok(Some(Input::Pointer(self.canvas.row_to_field_y(row))))
                }
                _ => Ok(None),
            },
            Event::Resize(width, height) => {
                let (cols, rows) = grid_for_terminal(width, height);
                self.canvas.resize(cols, rows);
                execute!(io::stdout(), terminal::Clear(ClearType::All))?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Ball;

    const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn canvas() -> CellCanvas {
        // 10x10 field pixels per cell
        CellCanvas::new(80, 40, 800.0, 400.0)
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#fff"), WHITE);
        assert_eq!(parse_color("#444"), Color::Rgb { r: 0x44, g: 0x44, b: 0x44 });
        assert_eq!(parse_color("#12ab34"), Color::Rgb { r: 0x12, g: 0xab, b: 0x34 });
        assert_eq!(parse_color("tomato"), Color::White);
        assert_eq!(parse_color("#zzz"), Color::White);
    }

    #[test]
    fn test_grid_for_terminal() {
        assert_eq!(grid_for_terminal(160, 42), (80, 40));
        assert_eq!(grid_for_terminal(10, 5), (20, 10));
    }

    #[test]
    fn test_fill_rect_covers_touched_cells() {
        let mut canvas = canvas();
        canvas.fill_rect(20.0, 50.0, 10.0, 80.0, "#fff");

        assert_eq!(canvas.cell(2, 5), Some(WHITE));
        assert_eq!(canvas.cell(2, 12), Some(WHITE));
        assert_eq!(canvas.cell(2, 13), None);
        assert_eq!(canvas.cell(3, 5), None);
        assert_eq!(canvas.cell(1, 5), None);
    }

    #[test]
    fn test_thin_rect_still_visible() {
        let mut canvas = CellCanvas::new(20, 10, 800.0, 400.0);
        canvas.fill_rect(398.0, 0.0, 4.0, 16.0, "#444");

        assert!(canvas.cell(9, 0).is_some());
    }

    #[test]
    fn test_rect_off_field_is_clipped() {
        let mut canvas = canvas();
        canvas.fill_rect(-50.0, -50.0, 60.0, 60.0, "#fff");
        canvas.fill_rect(790.0, 390.0, 100.0, 100.0, "#fff");

        assert_eq!(canvas.cell(0, 0), Some(WHITE));
        assert_eq!(canvas.cell(79, 39), Some(WHITE));
        assert_eq!(canvas.cell(1, 1), None);
    }

    #[test]
    fn test_fill_circle() {
        let mut canvas = canvas();
        canvas.fill_circle(307.0, 127.0, 7.0, "#fff");

        assert_eq!(canvas.cell(30, 12), Some(WHITE));
        assert_eq!(canvas.cell(31, 13), Some(WHITE));
        assert_eq!(canvas.cell(29, 12), None);
        assert_eq!(canvas.cell(32, 12), None);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut canvas = canvas();
        canvas.fill_rect(0.0, 0.0, 800.0, 400.0, "#fff");
        canvas.clear(0.0, 0.0, 800.0, 400.0);

        assert!((0..40).all(|r| (0..80).all(|c| canvas.cell(c, r).is_none())));
    }

    #[test]
    fn test_row_maps_to_cell_center() {
        let canvas = canvas();
        assert_eq!(canvas.row_to_field_y(0), 5.0);
        assert_eq!(canvas.row_to_field_y(20), 205.0);
    }

    #[test]
    fn test_resize_rescales_cells() {
        let mut canvas = canvas();
        canvas.resize(40, 20);
        assert_eq!(canvas.row_to_field_y(0), 10.0);
        assert_eq!(canvas.cols(), 40);
    }

    #[test]
    fn test_draw_game_onto_cells() {
        let mut game = Game::with_seed(800.0, 400.0, 2);
        game.player.position.y = 0.0;
        game.ball = Ball::new(600.0, 300.0, 6.0, 0.0);
        let mut canvas = canvas();

        draw(&game, &mut canvas);

        // Player paddle, net, ball
        assert_eq!(canvas.cell(2, 0), Some(WHITE));
        assert_eq!(canvas.cell(39, 0), Some(parse_color("#444")));
        assert_eq!(canvas.cell(60, 30), Some(WHITE));
        assert_eq!(canvas.cell(10, 30), None);
    }
}
