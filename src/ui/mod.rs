pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::bounds::Bounds;
use crate::game::Game;

/// Where the playfield landed on screen during the last draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    /// Maps a terminal cell to the playfield point under its center.
    pub fn to_world(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.area;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let fx = (column - area.x) as f32 + 0.5;
        let fy = (row - area.y) as f32 + 0.5;
        let x = fx * self.world_width as f32 / area.width as f32;
        let y = fy * self.world_height as f32 / area.height as f32;
        Some((x as i32, y as i32))
    }

    /// Terminal cells covering `rect`, clipped to the playfield.
    pub fn to_cells(&self, rect: &Bounds) -> Rect {
        let area = self.area;
        let sx = area.width as f32 / self.world_width.max(1) as f32;
        let sy = area.height as f32 / self.world_height.max(1) as f32;
        let x0 = (rect.left() as f32 * sx).floor().max(0.0) as u16;
        let y0 = (rect.top() as f32 * sy).floor().max(0.0) as u16;
        let x1 = ((rect.right() as f32 * sx).ceil().max(0.0) as u16).max(x0 + 1);
        let y1 = ((rect.bottom() as f32 * sy).ceil().max(0.0) as u16).max(y0 + 1);
        Rect::new(area.x + x0, area.y + y0, x1 - x0, y1 - y0).intersection(area)
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Alien Invasion ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(4),    // Playfield
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let game = &app.game;
    render_hud(frame, game, chunks[0]);

    let settings = game.settings();
    let viewport = Viewport {
        area: chunks[1],
        world_width: settings.screen_width,
        world_height: settings.screen_height,
    };
    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = field::render_field(game, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    // The play control only exists while idle.
    if !game.is_active() {
        render_play_button(frame, game, &viewport);
    }

    render_help(frame, game, chunks[2]);
    app.viewport = Some(viewport);
}

fn render_hud(frame: &mut Frame, game: &Game, area: Rect) {
    let sb = game.scoreboard();
    let lives = "\u{25b2} ".repeat(sb.ships_left as usize);
    let hud = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", sb.score_text),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("High: {} ", sb.high_score_text),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Level: {} ", sb.level_text),
            Style::default().fg(Color::Green),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Ships: {}", lives),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Aliens: {} ", game.aliens().len()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(hud), area);
}

fn render_play_button(frame: &mut Frame, game: &Game, viewport: &Viewport) {
    let button = game.play_button();
    let mut cells = viewport.to_cells(&button.rect);
    // Leave room for the border and the label.
    let min_w = (button.label.chars().count() as u16 + 4).min(viewport.area.width);
    let min_h = 3u16.min(viewport.area.height);
    if cells.width < min_w || cells.height < min_h {
        let cx = cells.x + cells.width / 2;
        let cy = cells.y + cells.height / 2;
        cells = Rect::new(
            cx.saturating_sub(min_w / 2),
            cy.saturating_sub(min_h / 2),
            cells.width.max(min_w),
            cells.height.max(min_h),
        )
        .intersection(viewport.area);
    }

    frame.render_widget(Clear, cells);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(button.text_color))
        .style(Style::default().bg(button.button_color));
    let inner = block.inner(cells);
    frame.render_widget(block, cells);

    let label = Paragraph::new(Line::from(Span::styled(
        button.label.clone(),
        Style::default()
            .fg(button.text_color)
            .bg(button.button_color)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    let label_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
    frame.render_widget(label, label_area);
}

fn render_help(frame: &mut Frame, game: &Game, area: Rect) {
    let line = if !game.is_active() {
        Line::from(vec![
            Span::styled(" Click Play ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("or press Enter to start ", Style::default().fg(Color::Gray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Esc/Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    } else if game.is_paused() {
        Line::from(vec![Span::styled(
            " Ship lost! ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )])
    } else {
        Line::from(vec![
            Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Esc/Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}
