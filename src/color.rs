// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a CSS hex string, and turned back into a CSS color for the canvas

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts "#rgb", "#rrggbb" and "#rrggbbaa", with or without the leading '#'
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => u32::from_str_radix(digits, 16)
                .ok()
                .map(|num| Color::from_u32((num << 8) | 0xff)),
            8 => u32::from_str_radix(digits, 16).ok().map(Color::from_u32),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::rgb(0x3b, 0x82, 0xf6),
    Color::rgb(0x8b, 0x5c, 0xf6),
    Color::rgb(0x06, 0xb6, 0xd4),
    Color::rgb(0x10, 0xb9, 0x81),
];

// Stroke used for every connection line, alpha comes from the distance
pub const CONNECTION_COLOR: Color = Color::rgb(0x63, 0x66, 0xf1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x11223344);
        assert_eq!(c, Color { r: 0x11, g: 0x22, b: 0x33, a: 0x44 });
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_hex("#3b82f6"), Some(Color::rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(Color::from_hex("fff"), Some(Color::rgb(0xff, 0xff, 0xff)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color { r: 0, g: 0, b: 0, a: 0x80 })
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn only_one_leading_hash() {
        assert_eq!(Color::from_hex("##fff"), None);
        assert_eq!(Color::from_hex("##3b82f6"), None);
        assert_eq!(Color::from_hex(" #fff "), Some(Color::rgb(0xff, 0xff, 0xff)));
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::rgb(0x06, 0xb6, 0xd4).to_css(), "#06b6d4");
        assert_eq!(
            Color { r: 255, g: 0, b: 0, a: 0 }.to_css(),
            "rgba(255, 0, 0, 0.000)"
        );
    }
}
