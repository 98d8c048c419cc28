use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::bounds::Bounds;
use crate::game::Game;

const SHIP_MASK: &[&str] = &[
    "   #   ",
    "  ###  ",
    "  ###  ",
    " ##### ",
    "#######",
    "#######",
];

const ALIEN_MASK: &[&str] = &[
    "  #   #  ",
    "   # #   ",
    "  #####  ",
    " ## # ## ",
    "#########",
    "# ##### #",
    "# #   # #",
    "   # #   ",
];

const SHIP_COLOR: Color = Color::Rgb(30, 60, 160);
const ALIEN_COLOR: Color = Color::Rgb(40, 140, 40);

/// Braille dot map: cell -> dot bits.
type DotMap = HashMap<(usize, usize), u8>;

/// Scales the playfield onto a `width` x `height` cell grid, two by four
/// braille dots per cell.
struct DotGrid {
    bw: i32,
    bh: i32,
    sx: f32,
    sy: f32,
}

impl DotGrid {
    fn new(width: usize, height: usize, world_w: i32, world_h: i32) -> Self {
        let bw = (width * 2) as i32;
        let bh = (height * 4) as i32;
        Self {
            bw,
            bh,
            sx: bw as f32 / world_w.max(1) as f32,
            sy: bh as f32 / world_h.max(1) as f32,
        }
    }

    fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
        match (sub_x, sub_y) {
            (0, 0) => 0x01,
            (0, 1) => 0x02,
            (0, 2) => 0x04,
            (0, 3) => 0x40,
            (1, 0) => 0x08,
            (1, 1) => 0x10,
            (1, 2) => 0x20,
            (1, 3) => 0x80,
            _ => 0,
        }
    }

    fn set_dot(&self, map: &mut DotMap, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.bw || by >= self.bh {
            return;
        }
        let cx = bx as usize / 2;
        let cy = by as usize / 4;
        *map.entry((cx, cy)).or_insert(0) |= Self::braille_bit(bx as usize % 2, by as usize % 4);
    }

    /// Dot span covered by `rect`, never thinner than one dot.
    fn span(&self, rect: &Bounds) -> (i32, i32, i32, i32) {
        let x0 = (rect.left() as f32 * self.sx).floor() as i32;
        let y0 = (rect.top() as f32 * self.sy).floor() as i32;
        let x1 = ((rect.right() as f32 * self.sx).ceil() as i32).max(x0 + 1);
        let y1 = ((rect.bottom() as f32 * self.sy).ceil() as i32).max(y0 + 1);
        (x0, y0, x1, y1)
    }

    fn fill(&self, map: &mut DotMap, rect: &Bounds) {
        let (x0, y0, x1, y1) = self.span(rect);
        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_dot(map, bx, by);
            }
        }
    }

    /// Stretches a `#`-mask over the dots covered by `rect`.
    fn stamp(&self, map: &mut DotMap, rect: &Bounds, mask: &[&str]) {
        let (x0, y0, x1, y1) = self.span(rect);
        let (dw, dh) = (x1 - x0, y1 - y0);
        let mh = mask.len() as i32;
        for by in y0..y1 {
            let row = mask[((by - y0) * mh / dh) as usize].as_bytes();
            let mw = row.len() as i32;
            for bx in x0..x1 {
                if row[((bx - x0) * mw / dw) as usize] == b'#' {
                    self.set_dot(map, bx, by);
                }
            }
        }
    }
}

fn write_layer(
    grid: &mut [Vec<(char, Style)>],
    map: &DotMap,
    color: Color,
    bg: Color,
    bold: bool,
) {
    for (&(cx, cy), &bits) in map {
        if cy < grid.len() && cx < grid[cy].len() && bits != 0 {
            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
            let mut style = Style::default().fg(color).bg(bg);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            grid[cy][cx] = (ch, style);
        }
    }
}

pub fn render_field(game: &Game, width: usize, height: usize) -> Vec<Line<'static>> {
    let settings = game.settings();
    let bg = settings.bg_color;
    let dots = DotGrid::new(width, height, settings.screen_width, settings.screen_height);

    let mut grid: Vec<Vec<(char, Style)>> =
        vec![vec![(' ', Style::default().bg(bg)); width]; height];

    let mut aliens = DotMap::new();
    for alien in game.aliens() {
        dots.stamp(&mut aliens, &alien.rect, ALIEN_MASK);
    }
    write_layer(&mut grid, &aliens, ALIEN_COLOR, bg, false);

    let mut bullets = DotMap::new();
    for bullet in game.bullets() {
        dots.fill(&mut bullets, &bullet.rect);
    }
    write_layer(&mut grid, &bullets, settings.bullet_color, bg, true);

    let mut ship = DotMap::new();
    dots.stamp(&mut ship, &game.ship().rect, SHIP_MASK);
    write_layer(&mut grid, &ship, SHIP_COLOR, bg, true);

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}
