//! RGB color model with hex parsing and linear interpolation.

use crate::{Error, Result};

/// Components are kept as floats in `[0, 255]` so interpolation does not
/// accumulate truncation error; `Display` truncates to integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub const WHITE: Color = Color {
        red: 255.0,
        green: 255.0,
        blue: 255.0,
    };

    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    /// Linear blend `self * (1 - p) + other * p` for `p` in `[0, 1]`.
    pub fn interpolate(&self, other: Color, p: f64) -> Result<Color> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::Domain {
                message: format!("interpolation factor {p} outside [0, 1]"),
            });
        }
        Ok(*self * (1.0 - p) + other * p)
    }

    /// Interpolation toward white, used for hover highlights.
    pub fn lighten(&self, fraction: f64) -> Result<Color> {
        self.interpolate(Color::WHITE, fraction)
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.red + rhs.red,
            self.green + rhs.green,
            self.blue + rhs.blue,
        )
    }
}

impl std::ops::Mul<f64> for Color {
    type Output = Color;

    fn mul(self, factor: f64) -> Color {
        Color::new(self.red * factor, self.green * factor, self.blue * factor)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Components are truncated, not rounded.
        write!(
            f,
            "rgb({},{},{})",
            self.red as i64, self.green as i64, self.blue as i64
        )
    }
}

/// Parses `rrggbb`, `0xrrggbb`, `#rrggbb` or the `#rgb` shorthand.
pub fn hex_to_color(hex: &str) -> Result<Color> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix('#'))
        .unwrap_or(hex);

    let expanded;
    let digits = match digits.len() {
        6 => digits,
        3 => {
            expanded = digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>();
            &expanded
        }
        _ => {
            return Err(Error::InvalidFormat {
                message: format!("hex color {hex:?} must have 6 (or 3) digits"),
            });
        }
    };

    let channel = |range: std::ops::Range<usize>| -> Result<f64> {
        u8::from_str_radix(&digits[range], 16)
            .map(f64::from)
            .map_err(|_| Error::InvalidFormat {
                message: format!("hex color {hex:?} contains non-hex digits"),
            })
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed_hex() {
        let c = hex_to_color("ff8000").unwrap();
        assert_eq!(c.to_string(), "rgb(255,128,0)");
        assert_eq!(hex_to_color("0xff8000").unwrap(), c);
        assert_eq!(hex_to_color("#ff8000").unwrap(), c);
    }

    #[test]
    fn expands_three_digit_shorthand() {
        assert_eq!(hex_to_color("#000").unwrap(), Color::BLACK);
        assert_eq!(hex_to_color("#f00").unwrap().to_string(), "rgb(255,0,0)");
    }

    #[test]
    fn rejects_bad_lengths_and_digits() {
        assert!(matches!(
            hex_to_color("zz"),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(hex_to_color("12345").is_err());
        assert!(hex_to_color("gghhii").is_err());
    }

    #[test]
    fn interpolate_is_identity_on_self() {
        let c = hex_to_color("3c8a2f").unwrap();
        for p in [0.0, 0.25, 0.5, 0.99, 1.0] {
            assert_eq!(c.interpolate(c, p).unwrap(), c);
        }
    }

    #[test]
    fn interpolate_rejects_out_of_range() {
        let c = Color::BLACK;
        assert!(c.interpolate(Color::WHITE, -0.1).is_err());
        assert!(c.interpolate(Color::WHITE, 1.1).is_err());
    }

    #[test]
    fn display_truncates_components() {
        let c = Color::new(254.9, 0.7, 100.2);
        assert_eq!(c.to_string(), "rgb(254,0,100)");
    }
}
