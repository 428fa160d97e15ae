use crate::interpreter::{DISPLAY_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used by the host to put the interpreter's frame buffer on a
/// screen. It should abstract the implementation details, so a variety of
/// kinds of screen would work.
pub trait Display {
    /// draw a frame: one byte per pixel, 0 or 1, row-major
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error>;
}

// store useful metadata about the screen
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// canvas coords of every pixel that is `value`; y grows downwards on
    /// the chip-8 but upwards on the canvas
    fn points_with_value<'a>(
        &self,
        pixels: &'a [u8],
        value: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let w = self.0;
        pixels
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == value)
            .map(move |(n, _)| ((n % w) as f64, -1.0 * (n / w) as f64))
    }
}

/// monochrome display in a terminal, rendered using TUI and Crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(SCREEN_WIDTH, SCREEN_HEIGHT),
        })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            log::warn!("couldn't restore cursor: {}", e);
        }
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            pixels.len(),
            self.resolution.pixel_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        let resolution = &self.resolution;
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &resolution.points_with_value(pixels, 0).collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &resolution.points_with_value(pixels, 1).collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers what it was given
pub struct DummyDisplay {
    pub frames: usize,
    pub last_frame: Vec<u8>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay {
            frames: 0,
            last_frame: vec![0; DISPLAY_PIXELS],
        }
    }
}

impl Default for DummyDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(pixels);
        Ok(())
    }
}
