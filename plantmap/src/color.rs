//! Deterministic category colors.
//!
//! Species names are hashed to a hue so the same species gets the same color
//! in every session, independent of the order in which species were seen.
//!
//! # Hash
//!
//! A polynomial rolling hash (base 31) over the UTF-16 code units of the name:
//!
//! ```text
//! hash = unit + ((hash << 5) - hash)
//! ```
//!
//! Accumulation uses 32-bit signed wraparound, so arbitrarily long names are
//! well defined. The hue is `|hash| mod 360`; `i32::MIN` maps through its
//! unsigned magnitude.

use std::fmt;

/// Default saturation percentage.
pub const DEFAULT_SATURATION: u8 = 70;

/// Default lightness percentage.
pub const DEFAULT_LIGHTNESS: u8 = 45;

/// An HSL color. Saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    /// Convert to an RGB hex string such as `#1d4ed8`.
    pub fn to_hex(&self) -> String {
        let s = self.saturation as f64 / 100.0;
        let l = self.lightness as f64 / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue as f64 / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match self.hue {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Polynomial rolling hash over UTF-16 code units with i32 wraparound.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Hue in `0..360` for a category name.
pub fn hue_for(name: &str) -> u16 {
    (name_hash(name).unsigned_abs() % 360) as u16
}

/// Maps category names to colors with fixed saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAssigner {
    saturation: u8,
    lightness: u8,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_SATURATION, DEFAULT_LIGHTNESS)
    }
}

impl ColorAssigner {
    /// Create an assigner. Values above 100 are clamped.
    pub fn new(saturation: u8, lightness: u8) -> Self {
        Self {
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// Color for a category name. Pure and deterministic.
    pub fn color_for(&self, name: &str) -> HslColor {
        HslColor {
            hue: hue_for(name),
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_name_is_hue_zero() {
        assert_eq!(name_hash(""), 0);
        let color = ColorAssigner::default().color_for("");
        assert_eq!(color.hue, 0);
        assert_eq!(color.to_string(), "hsl(0, 70%, 45%)");
    }

    #[test]
    fn test_color_is_deterministic() {
        let assigner = ColorAssigner::default();
        let first = assigner.color_for("ต้นประดู่");
        for _ in 0..10 {
            assert_eq!(assigner.color_for("ต้นประดู่"), first);
        }
        // A fresh assigner holds no state that could change the result
        assert_eq!(ColorAssigner::default().color_for("ต้นประดู่"), first);
    }

    #[test]
    fn test_known_hash_values() {
        // "a" = 97; "ab" = 98 + 97 * 31 = 3105
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 3105);
        assert_eq!(hue_for("ab"), (3105 % 360) as u16);
    }

    #[test]
    fn test_hash_uses_utf16_code_units() {
        // U+1F333 (tree emoji) is a surrogate pair: 0xD83C, 0xDF33
        let expected = 0xDF33i32.wrapping_add((0xD83Ci32 << 5) - 0xD83C);
        assert_eq!(name_hash("\u{1F333}"), expected);
    }

    #[test]
    fn test_long_names_wrap_without_panicking() {
        let long = "Dipterocarpus alatus ".repeat(500);
        let hue = hue_for(&long);
        assert!(hue < 360);
        assert_eq!(hue, hue_for(&long));
    }

    #[test]
    fn test_hue_uses_hash_magnitude() {
        let name = "zzzzzzzzzzzzzz";
        let hash = name_hash(name);
        assert_eq!(hue_for(name) as u32, hash.unsigned_abs() % 360);
    }

    #[test]
    fn test_hex_conversion() {
        let red = HslColor {
            hue: 0,
            saturation: 100,
            lightness: 50,
        };
        assert_eq!(red.to_hex(), "#ff0000");
        let blue = HslColor {
            hue: 240,
            saturation: 100,
            lightness: 50,
        };
        assert_eq!(blue.to_hex(), "#0000ff");
    }

    #[test]
    fn test_assigner_clamps_percentages() {
        let color = ColorAssigner::new(150, 200).color_for("x");
        assert_eq!(color.saturation, 100);
        assert_eq!(color.lightness, 100);
    }

    proptest! {
        /// Any name, including empty and non-ASCII, maps to one stable color.
        #[test]
        fn prop_color_is_deterministic(name in any::<String>()) {
            let assigner = ColorAssigner::default();
            let first = assigner.color_for(&name);
            prop_assert_eq!(first, assigner.color_for(&name.clone()));
            prop_assert!(first.hue < 360);
            prop_assert_eq!(first.hue, hue_for(&name));
        }

        /// Saturation and lightness never change the hue.
        #[test]
        fn prop_hue_independent_of_tone(name in ".{0,24}", s in 0u8..=100, l in 0u8..=100) {
            let custom = ColorAssigner::new(s, l).color_for(&name);
            prop_assert_eq!(custom.hue, ColorAssigner::default().color_for(&name).hue);
        }
    }
}
