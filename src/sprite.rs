//! Pixel-art pet, one look per mood.
//!
//! Every mood shares the same silhouette. Eyes, mouth and palette change;
//! the last two moods replace the fill with static.

use crate::canvas::{Canvas, Color};
use crate::engine::MAX_MOOD;

pub const SPRITE_WIDTH: u32 = 14;
pub const SPRITE_HEIGHT: u32 = 16;

// Legend: . empty, O outline, B body, H belly, F feet,
// E eye white, P pupil, M mouth, T tear
const BASE: [&str; 16] = [
    "....OOOOOO....",
    "...OBBBBBBO...",
    "..OBBBBBBBBO..",
    "..OBEEBBEEBO..",
    "..OBEPBBEPBO..",
    "..OBBBBBBBBO..",
    "..OBBBBBBBBO..",
    "..OBBBBBBBBO..",
    "...OBBBBBBO...",
    "....OOOOOO....",
    "...OHHHHHHO...",
    "..OHHOHHOHHO..",
    "..OHHOHHOHHO..",
    "...OHHHHHHO...",
    "...OFO..OFO...",
    "...OOO..OOO...",
];

const EYE_ROWS: usize = 3;
const CHEEK_ROW: usize = 5;
const MOUTH_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Eyes {
    Open,
    HalfLidded,
    Angry,
    Teary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mouth {
    Smile,
    Flat,
    Frown,
    Shout,
}

impl Eyes {
    fn rows(self) -> [&'static str; 2] {
        match self {
            Self::Open | Self::Teary => ["..OBEEBBEEBO..", "..OBEPBBEPBO.."],
            Self::HalfLidded => ["..OBOOBBOOBO..", "..OBEPBBEPBO.."],
            Self::Angry => ["..OBOBBBBOBO..", "..OBEPBBPEBO.."],
        }
    }
}

impl Mouth {
    fn rows(self) -> [&'static str; 2] {
        match self {
            Self::Smile => ["..OBMBBBBMBO..", "..OBBMMMMBBO.."],
            Self::Flat => ["..OBBBBBBBBO..", "..OBBMMMMBBO.."],
            Self::Frown => ["..OBBMMMMBBO..", "..OBMBBBBMBO.."],
            Self::Shout => ["..OBBMMMMBBO..", "..OBBMMMMBBO.."],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    outline: u32,
    body: u32,
    belly: u32,
    eye: u32,
    pupil: u32,
    mouth: u32,
}

impl Palette {
    const fn new(body: u32, belly: u32, eye: u32, mouth: u32) -> Self {
        Self {
            outline: 0x111827,
            body,
            belly,
            eye,
            pupil: 0x111827,
            mouth,
        }
    }

    fn color(&self, legend: char) -> Color {
        let hex = match legend {
            'O' | 'F' => self.outline,
            'B' => self.body,
            'H' => self.belly,
            'E' => self.eye,
            'P' => self.pupil,
            'M' => self.mouth,
            'T' => 0x60A5FA,
            _ => return Color::TRANSPARENT,
        };
        Color::from_hex(hex)
    }
}

fn look(mood: u8) -> (Eyes, Mouth, Palette) {
    match mood {
        0 => (Eyes::Open, Mouth::Smile, Palette::new(0x6EE7B7, 0x059669, 0xFFFFFF, 0xEF4444)),
        1 => (Eyes::Open, Mouth::Flat, Palette::new(0x67E8F9, 0x0891B2, 0xFFFFFF, 0x111827)),
        2 => (Eyes::Open, Mouth::Flat, Palette::new(0xFDE047, 0xCA8A04, 0xFFFFFF, 0x111827)),
        3 => (Eyes::HalfLidded, Mouth::Flat, Palette::new(0xFB923C, 0xC2410C, 0xFFFFFF, 0x111827)),
        4 => (Eyes::HalfLidded, Mouth::Frown, Palette::new(0xF97316, 0x9A3412, 0xD1D5DB, 0x000000)),
        5 => (Eyes::Angry, Mouth::Frown, Palette::new(0xEF4444, 0x991B1B, 0xD1D5DB, 0x000000)),
        6 => (Eyes::Angry, Mouth::Shout, Palette::new(0xB91C1C, 0x7F1D1D, 0xFCA5A5, 0x000000)),
        7 => (Eyes::Open, Mouth::Shout, Palette::new(0xC084FC, 0x7E22CE, 0x93C5FD, 0x1E3A8A)),
        _ => (Eyes::Teary, Mouth::Frown, Palette::new(0xBAE6FD, 0x0EA5E9, 0xFFFFFF, 0x1D4ED8)),
    }
}

/// The pet as it looks at `mood`.
pub fn sprite(mood: u8) -> Canvas {
    if mood >= MAX_MOOD - 1 {
        return static_sprite(mood >= MAX_MOOD);
    }

    let (eyes, mouth, palette) = look(mood);
    let mut rows = BASE;
    rows[EYE_ROWS..EYE_ROWS + 2].copy_from_slice(&eyes.rows());
    rows[MOUTH_ROWS..MOUTH_ROWS + 2].copy_from_slice(&mouth.rows());
    if eyes == Eyes::Teary {
        rows[CHEEK_ROW] = "..OBTBBBBTBO..";
    }

    paint(&rows, |_, _, legend| palette.color(legend))
}

/// Silhouette filled with red static; darker once broken.
fn static_sprite(broken: bool) -> Canvas {
    let (lit, dark) = if broken {
        (0x450A0A, 0x000000)
    } else {
        (0x7F1D1D, 0x000000)
    };
    paint(&BASE, |x, y, legend| {
        if legend == '.' {
            Color::TRANSPARENT
        } else if (x * 3 + y * 5) % 4 < 2 {
            Color::from_hex(lit)
        } else {
            Color::from_hex(dark)
        }
    })
}

fn paint(rows: &[&str; 16], color_at: impl Fn(u32, u32, char) -> Color) -> Canvas {
    let mut canvas = Canvas::new(SPRITE_WIDTH, SPRITE_HEIGHT);
    for (y, row) in rows.iter().enumerate() {
        for (x, legend) in row.chars().enumerate() {
            canvas.set_pixel(x as u32, y as u32, color_at(x as u32, y as u32, legend));
        }
    }
    canvas
}
