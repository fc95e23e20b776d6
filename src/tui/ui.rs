//! UI - layout and rendering of the pet scene
//!
//! Draw order: mood backdrop, particles, text panels, the pet, then the
//! overlays (crack lines when broken, white flash for lightning).

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Jitter};
use crate::canvas::{self, HalfBlockRasterizer, Rasterizer};
use crate::engine::{status_message, ParticleColor, Signals, MAX_MOOD};
use crate::sprite;

mod theme {
    use ratatui::style::{Color, Modifier};

    pub const DIM: Color = Color::DarkGray;
    pub const TEXT: Color = Color::Gray;
    pub const PANEL: Color = Color::Rgb(10, 10, 10);

    /// Scene backdrop per mood
    pub const BACKDROP: [u32; 11] = [
        0x111827, 0x1F2937, 0x262626, 0x1C1917, 0x431407, 0x450A0A, 0x7F1D1D, 0x3B0764,
        0x1E1B4B, 0x000000, 0x000000,
    ];

    /// Status text color and animation per mood
    pub fn headline(mood: u8) -> (Color, Modifier) {
        match mood {
            0 => (Color::Rgb(110, 231, 183), Modifier::empty()),
            1 => (Color::Rgb(103, 232, 249), Modifier::empty()),
            2 => (Color::Rgb(253, 224, 71), Modifier::empty()),
            3 => (Color::Rgb(251, 146, 60), Modifier::empty()),
            4 => (Color::Rgb(248, 113, 113), Modifier::empty()),
            5 => (Color::Rgb(252, 165, 165), Modifier::SLOW_BLINK),
            6 => (Color::Rgb(254, 202, 202), Modifier::BOLD),
            7 => (Color::Rgb(216, 180, 254), Modifier::SLOW_BLINK),
            8 => (Color::Rgb(125, 211, 252), Modifier::SLOW_BLINK),
            9 => (Color::Rgb(239, 68, 68), Modifier::RAPID_BLINK),
            _ => (Color::Rgb(107, 114, 128), Modifier::empty()),
        }
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let signals = &app.signals;
    let mood = signals.mood.min(MAX_MOOD);
    let backdrop = canvas::Color::from_hex(theme::BACKDROP[mood as usize]);

    frame.render_widget(
        Block::default().style(Style::default().bg(backdrop.to_ratatui())),
        area,
    );
    render_particles(frame.buffer_mut(), area, signals);

    let prompt_height = if signals.show_appeasement_prompt && !signals.broken {
        4
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // header
            Constraint::Min(8),                // pet
            Constraint::Length(prompt_height), // appease prompt
            Constraint::Length(1),             // attention button
            Constraint::Length(1),             // footer
        ])
        .split(area);

    render_header(frame, chunks[0], signals);
    render_pet(frame, chunks[1], signals, app.jitter, backdrop);
    if prompt_height > 0 {
        render_prompt(frame, chunks[2]);
    }
    render_button(frame, chunks[3], signals);
    render_footer(frame, chunks[4], signals);

    if signals.broken {
        render_cracks(frame.buffer_mut(), area);
    } else if signals.lightning_flash {
        flash(frame.buffer_mut(), area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, signals: &Signals) {
    let (color, modifier) = theme::headline(signals.mood);
    let status_color = if signals.broken { theme::DIM } else { theme::TEXT };
    let text = Text::from(vec![
        Line::styled(
            "~ Pixel Pal Interface ~",
            Style::default().fg(color).add_modifier(Modifier::BOLD | modifier),
        ),
        Line::styled(
            format!("Status: {}", status_message(signals.mood)),
            Style::default().fg(status_color),
        ),
    ]);

    let border = if signals.mood >= 7 && !signals.broken {
        Style::default().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(theme::DIM)
    };

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .style(Style::default().bg(theme::PANEL)),
            ),
        area,
    );
}

fn render_pet(frame: &mut Frame, area: Rect, signals: &Signals, jitter: Jitter, backdrop: canvas::Color) {
    let mut pet = sprite::sprite(signals.mood);
    if signals.broken {
        pet.map_pixels(|c| c.grayscale());
    } else if jitter.glitch > 0 {
        let seed = u32::from(jitter.glitch);
        pet.map_rows(|row, c| {
            if (row + seed) % 3 == 0 {
                c.rotate_channels(jitter.glitch)
            } else {
                c
            }
        });
    }

    let rasterizer = HalfBlockRasterizer::new();
    let (cols, rows) = pet_size(area, signals.zoom_level, &rasterizer);
    let lines = rasterizer.rasterize(&pet, cols, rows, backdrop);

    let x = i32::from(area.x) + (i32::from(area.width) - i32::from(cols)) / 2 + i32::from(jitter.offset);
    let y = i32::from(area.y) + (i32::from(area.height) - i32::from(rows)) / 2;
    let max_x = area.right().saturating_sub(cols).max(area.x);
    let target = Rect {
        x: x.clamp(i32::from(area.x), i32::from(max_x)) as u16,
        y: y.max(i32::from(area.y)) as u16,
        width: cols.min(area.width),
        height: rows.min(area.height),
    };

    let text: Vec<Line> = lines
        .into_iter()
        .map(|line| {
            Line::from(
                line.cells
                    .into_iter()
                    .map(|cell| {
                        Span::styled(cell.ch.to_string(), Style::default().fg(cell.fg).bg(cell.bg))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(text), target);
}

/// Sprite size in cells for the available area and zoom.
fn pet_size(area: Rect, zoom: f64, rasterizer: &dyn Rasterizer) -> (u16, u16) {
    let (per_col, per_row) = rasterizer.resolution_multiplier();
    let px_w = f64::from(sprite::SPRITE_WIDTH) / f64::from(per_col);
    let px_h = f64::from(sprite::SPRITE_HEIGHT) / f64::from(per_row);
    // two cells per pixel when there is room, else one
    let scale = if f64::from(area.height) >= px_h * 2.4 && f64::from(area.width) >= px_w * 2.4 {
        2.0
    } else {
        1.0
    };
    let cols = (px_w * scale * zoom).round() as u16;
    let rows = (px_h * scale * zoom).round() as u16;
    (cols.max(1), rows.max(1))
}

fn render_prompt(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::styled(
            "Quick! A gift! Maybe this helps? Press it fast!",
            Style::default().fg(Color::LightGreen),
        ),
        Line::styled(
            "♥ [a] Emergency Appease",
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(219, 39, 119))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green).add_modifier(Modifier::SLOW_BLINK)),
        ),
        area,
    );
}

fn render_button(frame: &mut Frame, area: Rect, signals: &Signals) {
    let line = if signals.broken {
        Line::styled("[ SYSTEM OFFLINE ]", Style::default().fg(theme::DIM))
    } else {
        Line::styled(
            "[space] Give Attention",
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(3, 105, 161))
                .add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, area: Rect, signals: &Signals) {
    let (color, _) = theme::headline(signals.mood);
    let warn = match signals.mood {
        0..=4 => theme::DIM,
        5..=8 => Color::Yellow,
        _ => Color::Red,
    };
    let mut spans = vec![
        Span::styled("⚠ ", Style::default().fg(warn)),
        Span::styled("Mood: ", Style::default().fg(theme::TEXT)),
        Span::styled(
            format!("{} / {}", signals.mood, MAX_MOOD),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if signals.broken {
        spans.push(Span::styled(" (BROKEN)", Style::default().fg(theme::DIM)));
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    frame.render_widget(
        Paragraph::new(Line::styled("[q] quit", Style::default().fg(theme::DIM))),
        halves[0],
    );
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Right), halves[1]);
}

fn particle_color(color: ParticleColor) -> Color {
    match color {
        ParticleColor::Red => Color::Rgb(239, 68, 68),
        ParticleColor::Orange => Color::Rgb(249, 115, 22),
        ParticleColor::Yellow => Color::Rgb(250, 204, 21),
        ParticleColor::Purple => Color::Rgb(168, 85, 247),
    }
}

fn render_particles(buf: &mut Buffer, area: Rect, signals: &Signals) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    for particle in &signals.particles {
        let (px, py) = particle.position;
        let x = area.x + ((px / 100.0) * f64::from(area.width - 1)) as u16;
        let y = area.y + ((py / 100.0) * f64::from(area.height - 1)) as u16;
        let glyph = match particle.size {
            s if s < 3.5 => '·',
            s if s < 6.0 => '•',
            _ => '●',
        };
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(glyph).set_fg(particle_color(particle.color));
        }
    }
}

fn render_cracks(buf: &mut Buffer, area: Rect) {
    let style = Style::default().fg(Color::Rgb(229, 231, 235));
    let (w, h) = (i32::from(area.width), i32::from(area.height));
    let (cx, cy) = (w / 2, h / 2);

    // a few rays out of the impact point, stepping two columns per row
    for (dx, dy, glyph) in [(2, 1, '╲'), (-2, 1, '╱'), (2, -1, '╱'), (-2, -1, '╲'), (3, 0, '─'), (-3, 0, '─')] {
        let (mut x, mut y) = (cx, cy);
        while (0..w).contains(&x) && (0..h).contains(&y) {
            if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
                cell.set_char(glyph).set_style(style);
            }
            x += dx;
            y += dy;
        }
    }
    if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
        cell.set_char('✶').set_style(style.add_modifier(Modifier::BOLD));
    }
}

fn flash(buf: &mut Buffer, area: Rect) {
    buf.set_style(area, Style::default().bg(Color::White).fg(Color::Black));
}
