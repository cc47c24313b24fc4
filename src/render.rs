use crate::config::Settings;
use crate::win::WinState;
use crate::world::{BodyLabel, BodyShape, World};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Ball,
    Goal,
    Wall,
    Boundary,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            last: vec![EMPTY; width * height],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn cell_for(label: BodyLabel) -> Cell {
    match label {
        BodyLabel::Ball => Cell {
            glyph: Glyph::Ball,
            color: Color::Yellow,
        },
        BodyLabel::Goal => Cell {
            glyph: Glyph::Goal,
            color: Color::Green,
        },
        BodyLabel::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        BodyLabel::Boundary => Cell {
            glyph: Glyph::Boundary,
            color: Color::DarkGrey,
        },
    }
}

fn paint_order(label: BodyLabel) -> u8 {
    match label {
        BodyLabel::Boundary | BodyLabel::Wall => 0,
        BodyLabel::Goal => 1,
        BodyLabel::Ball => 2,
    }
}

/// Character cells covered by `[min, max)`. Anything thinner than a character
/// still takes the one cell its midpoint falls in.
fn span(min: f32, max: f32, limit: usize) -> Range<usize> {
    let clamp = |v: f32| v.round().clamp(0.0, limit as f32) as usize;
    let (lo, hi) = (clamp(min), clamp(max));
    if lo < hi {
        return lo..hi;
    }
    let mid = ((min + max) / 2.0)
        .floor()
        .clamp(0.0, limit.saturating_sub(1) as f32) as usize;
    mid..mid + 1
}

fn rasterize(shapes: &[BodyShape], width: usize, height: usize) -> Vec<Cell> {
    let mut cells = vec![EMPTY; width * height];
    let mut shapes = shapes.to_vec();
    shapes.sort_by_key(|s| paint_order(s.label));

    for shape in shapes {
        let outside = shape.max.0 < 0.0
            || shape.max.1 < 0.0
            || shape.min.0 > width as f32
            || shape.min.1 > height as f32;
        if outside {
            continue;
        }
        let cell = cell_for(shape.label);
        for y in span(shape.min.1, shape.max.1, height) {
            for x in span(shape.min.0, shape.max.0, width) {
                cells[y * width + x] = cell;
            }
        }
    }
    cells
}

/// Truncates `text` to at most `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

pub fn render(
    stdout: &mut Stdout,
    world: &World,
    state: WinState,
    settings: &Settings,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let needed_w = renderer.width as u16;
    let needed_h = renderer.height as u16 + renderer.origin_y;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(fit(&msg, term_w as usize)))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let hud = fit(
        &format!(
            "Maze {}x{}  {}  (wasd/arrows to roll, q to quit)",
            settings.rows,
            settings.columns,
            state.as_str()
        ),
        renderer.width,
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let cells = rasterize(&world.shapes(), renderer.width, renderer.height);
    for y in 0..renderer.height {
        for x in 0..renderer.width {
            let idx = y * renderer.width + x;
            let cell = cells[idx];
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    if state == WinState::Solved {
        // redrawn every frame, the cells underneath may have changed
        draw_banner(stdout, renderer, " You won! Press q to quit. ")?;
    }

    stdout.flush()?;
    Ok(())
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Ball => "●",
        Glyph::Goal => "▓",
        Glyph::Wall => "█",
        Glyph::Boundary => "█",
        Glyph::Empty => " ",
    };
    stdout.queue(MoveTo(renderer.origin_x + x as u16, renderer.origin_y + y as u16))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    stdout.queue(ResetColor)?;
    Ok(())
}

fn draw_banner(stdout: &mut Stdout, renderer: &Renderer, text: &str) -> io::Result<()> {
    let text = fit(text, renderer.width);
    let w = UnicodeWidthStr::width(text.as_str());
    let x = (renderer.width - w) / 2;
    let y = renderer.height / 2;
    stdout.queue(MoveTo(renderer.origin_x + x as u16, renderer.origin_y + y as u16))?;
    stdout.queue(SetForegroundColor(Color::Black))?;
    stdout.queue(SetBackgroundColor(Color::Green))?;
    stdout.queue(Print(&text))?;
    stdout.queue(ResetColor)?;
    Ok(())
}
