//! Per-genre color tables.
//!
//! Each seeded genre owns ten base colors; the `n`-th album of a genre is
//! painted with color `n mod 10`. Genres without a table borrow Rock's.

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Every channel raised by `amount`, clamped at 255.
    pub fn lighten(self, amount: u8) -> Rgb {
        Rgb(
            self.0.saturating_add(amount),
            self.1.saturating_add(amount),
            self.2.saturating_add(amount),
        )
    }
}

/// How much brighter the far corner of a cover is than its base color.
pub const SECONDARY_LIFT: u8 = 40;

const ROCK: [Rgb; 10] = [
    Rgb(220, 50, 50),
    Rgb(180, 30, 30),
    Rgb(200, 60, 40),
    Rgb(160, 40, 40),
    Rgb(230, 70, 50),
    Rgb(190, 45, 35),
    Rgb(210, 55, 45),
    Rgb(170, 35, 35),
    Rgb(225, 65, 55),
    Rgb(195, 50, 40),
];

const JAZZ: [Rgb; 10] = [
    Rgb(50, 50, 150),
    Rgb(40, 40, 130),
    Rgb(60, 60, 170),
    Rgb(70, 50, 140),
    Rgb(45, 55, 160),
    Rgb(55, 45, 135),
    Rgb(65, 65, 155),
    Rgb(50, 60, 145),
    Rgb(75, 55, 165),
    Rgb(60, 50, 150),
];

const METAL: [Rgb; 10] = [
    Rgb(60, 60, 60),
    Rgb(40, 40, 40),
    Rgb(80, 80, 80),
    Rgb(50, 50, 50),
    Rgb(70, 70, 70),
    Rgb(45, 45, 45),
    Rgb(55, 55, 55),
    Rgb(65, 65, 65),
    Rgb(75, 75, 75),
    Rgb(85, 85, 85),
];

const ALTERNATIVE: [Rgb; 10] = [
    Rgb(100, 180, 100),
    Rgb(80, 160, 80),
    Rgb(120, 200, 120),
    Rgb(90, 170, 90),
    Rgb(110, 190, 110),
    Rgb(85, 165, 85),
    Rgb(95, 175, 95),
    Rgb(105, 185, 105),
    Rgb(115, 195, 115),
    Rgb(125, 205, 125),
];

const DISCO: [Rgb; 10] = [
    Rgb(230, 150, 50),
    Rgb(240, 160, 60),
    Rgb(220, 140, 40),
    Rgb(250, 170, 70),
    Rgb(210, 130, 30),
    Rgb(235, 155, 55),
    Rgb(225, 145, 45),
    Rgb(245, 165, 65),
    Rgb(215, 135, 35),
    Rgb(255, 175, 75),
];

const BLUES: [Rgb; 10] = [
    Rgb(30, 80, 160),
    Rgb(25, 70, 140),
    Rgb(35, 90, 180),
    Rgb(20, 75, 150),
    Rgb(40, 85, 170),
    Rgb(28, 78, 155),
    Rgb(33, 83, 165),
    Rgb(23, 73, 145),
    Rgb(38, 88, 175),
    Rgb(43, 93, 185),
];

const LATIN: [Rgb; 10] = [
    Rgb(230, 100, 50),
    Rgb(220, 90, 40),
    Rgb(240, 110, 60),
    Rgb(210, 80, 30),
    Rgb(250, 120, 70),
    Rgb(225, 95, 45),
    Rgb(235, 105, 55),
    Rgb(215, 85, 35),
    Rgb(245, 115, 65),
    Rgb(255, 125, 75),
];

const REGGAE: [Rgb; 10] = [
    Rgb(60, 160, 60),
    Rgb(200, 180, 40),
    Rgb(220, 60, 40),
    Rgb(50, 150, 50),
    Rgb(190, 170, 30),
    Rgb(210, 50, 30),
    Rgb(70, 170, 70),
    Rgb(180, 160, 50),
    Rgb(55, 155, 55),
    Rgb(195, 175, 35),
];

const POP: [Rgb; 10] = [
    Rgb(220, 100, 200),
    Rgb(200, 80, 180),
    Rgb(240, 120, 220),
    Rgb(210, 90, 190),
    Rgb(230, 110, 210),
    Rgb(205, 85, 185),
    Rgb(215, 95, 195),
    Rgb(225, 105, 205),
    Rgb(235, 115, 215),
    Rgb(245, 125, 225),
];

const CLASSICAL: [Rgb; 10] = [
    Rgb(180, 160, 120),
    Rgb(170, 150, 110),
    Rgb(190, 170, 130),
    Rgb(160, 140, 100),
    Rgb(200, 180, 140),
    Rgb(175, 155, 115),
    Rgb(185, 165, 125),
    Rgb(165, 145, 105),
    Rgb(195, 175, 135),
    Rgb(205, 185, 145),
];

/// The ten base colors for `genre` (exact, case-sensitive name match).
pub fn palette(genre: &str) -> &'static [Rgb; 10] {
    match genre {
        "Rock" => &ROCK,
        "Jazz" => &JAZZ,
        "Metal" => &METAL,
        "Alternative" => &ALTERNATIVE,
        "Disco" => &DISCO,
        "Blues" => &BLUES,
        "Latin" => &LATIN,
        "Reggae" => &REGGAE,
        "Pop" => &POP,
        "Classical" => &CLASSICAL,
        _ => &ROCK,
    }
}

/// Base color for the `index`-th album of `genre`. Negative indexes use their magnitude.
pub fn palette_color(genre: &str, index: i64) -> Rgb {
    let colors = palette(genre);
    let slot = (index.unsigned_abs() % colors.len() as u64) as usize;
    colors[slot]
}

/// `(base, secondary)` for a cover's diagonal gradient.
pub fn gradient_colors(genre: &str, index: i64) -> (Rgb, Rgb) {
    let base = palette_color(genre, index);
    (base, base.lighten(SECONDARY_LIFT))
}
