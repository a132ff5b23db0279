use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const GRAY: Rgba = Rgba::rgb(0x80, 0x80, 0x80);
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Channels in 0.0..=1.0, clamped.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn swap_rb(self) -> Self {
        Self {
            r: self.b,
            b: self.r,
            ..self
        }
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The ten-colour categorical cycle used for trait bubbles.
pub const TAB10: [Rgba; 10] = [
    Rgba::rgb(0x1f, 0x77, 0xb4),
    Rgba::rgb(0xff, 0x7f, 0x0e),
    Rgba::rgb(0x2c, 0xa0, 0x2c),
    Rgba::rgb(0xd6, 0x27, 0x28),
    Rgba::rgb(0x94, 0x67, 0xbd),
    Rgba::rgb(0x8c, 0x56, 0x4b),
    Rgba::rgb(0xe3, 0x77, 0xc2),
    Rgba::rgb(0x7f, 0x7f, 0x7f),
    Rgba::rgb(0xbc, 0xbd, 0x22),
    Rgba::rgb(0x17, 0xbe, 0xcf),
];

const NEUTRAL: f64 = 0.85;
const BAND_ALPHA: f64 = 0.3;
const LABEL_BASE_Y: f64 = 0.35;
const LABEL_STEP_Y: f64 = 0.08;

/// Background band colour for integer tick `x`. Green stays fixed; red and
/// blue move in opposite directions with `|x| / 5`, mirrored by sign.
pub fn band_color(x: i32) -> Rgba {
    let t = f64::from(x.unsigned_abs()) / 5.0;
    let feminine = Rgba::from_unit(NEUTRAL - 0.5 * t, NEUTRAL, NEUTRAL + 0.15 * t);
    let color = if x > 0 { feminine.swap_rb() } else { feminine };
    color.with_alpha(BAND_ALPHA)
}

pub fn trait_color(index: usize) -> Rgba {
    TAB10[index % TAB10.len()]
}

/// Label baseline for the trait at `index`: one of three buckets around 0.35.
pub fn label_offset(index: usize) -> f64 {
    LABEL_BASE_Y + LABEL_STEP_Y * ((index % 3) as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_mirror_about_zero() {
        for x in 1..=5 {
            let pos = band_color(x);
            let neg = band_color(-x);
            assert_eq!(neg, pos.swap_rb());
            assert_eq!(pos.g, neg.g);
        }
        let zero = band_color(0);
        assert_eq!(zero.r, zero.b);
    }

    #[test]
    fn bands_form_a_gradient() {
        let reds: Vec<u8> = (-5..=0).map(|x| band_color(x).r).collect();
        assert!(reds.windows(2).all(|w| w[0] < w[1]));
        assert!((band_color(3).a - 0.3).abs() < 1e-12);
    }

    #[test]
    fn label_offsets_cycle_through_three_buckets() {
        let offsets: Vec<f64> = (0..6).map(label_offset).collect();
        assert!((offsets[0] - 0.27).abs() < 1e-9);
        assert!((offsets[1] - 0.35).abs() < 1e-9);
        assert!((offsets[2] - 0.43).abs() < 1e-9);
        assert_eq!(offsets[0], offsets[3]);
    }

    #[test]
    fn trait_colors_repeat_every_ten() {
        assert_eq!(trait_color(0), trait_color(10));
        assert_ne!(trait_color(0), trait_color(1));
        assert_eq!(trait_color(3).hex(), "#d62728");
    }
}
