use std::fmt;

use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – renderer-independent colour
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Rgb([c.red, c.green, c.blue])
    }
}

impl From<Rgb> for eframe::egui::Color32 {
    fn from(c: Rgb) -> Self {
        let [r, g, b] = c.0;
        eframe::egui::Color32::from_rgb(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// Palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::from(rgb.into_format::<u8>())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Qualitative palettes (ColorBrewer)
// ---------------------------------------------------------------------------

const SET2: [Rgb; 8] = [
    Rgb([0x66, 0xc2, 0xa5]),
    Rgb([0xfc, 0x8d, 0x62]),
    Rgb([0x8d, 0xa0, 0xcb]),
    Rgb([0xe7, 0x8a, 0xc3]),
    Rgb([0xa6, 0xd8, 0x54]),
    Rgb([0xff, 0xd9, 0x2f]),
    Rgb([0xe5, 0xc4, 0x94]),
    Rgb([0xb3, 0xb3, 0xb3]),
];

const SET3: [Rgb; 12] = [
    Rgb([0x8d, 0xd3, 0xc7]),
    Rgb([0xff, 0xff, 0xb3]),
    Rgb([0xbe, 0xba, 0xda]),
    Rgb([0xfb, 0x80, 0x72]),
    Rgb([0x80, 0xb1, 0xd3]),
    Rgb([0xfd, 0xb4, 0x62]),
    Rgb([0xb3, 0xde, 0x69]),
    Rgb([0xfc, 0xcd, 0xe5]),
    Rgb([0xd9, 0xd9, 0xd9]),
    Rgb([0xbc, 0x80, 0xbd]),
    Rgb([0xcc, 0xeb, 0xc5]),
    Rgb([0xff, 0xed, 0x6f]),
];

/// Discrete palettes for categorical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualitative {
    Set2,
    Set3,
}

impl Qualitative {
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            Qualitative::Set2 => &SET2,
            Qualitative::Set3 => &SET3,
        }
    }

    /// Colour of the `i`-th category; the palette repeats when exhausted.
    pub fn pick(self, i: usize) -> Rgb {
        let colors = self.colors();
        colors[i % colors.len()]
    }
}

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

const VIRIDIS: [Rgb; 10] = [
    Rgb([0x44, 0x01, 0x54]),
    Rgb([0x48, 0x28, 0x78]),
    Rgb([0x3e, 0x49, 0x89]),
    Rgb([0x31, 0x68, 0x8e]),
    Rgb([0x26, 0x82, 0x8e]),
    Rgb([0x1f, 0x9e, 0x89]),
    Rgb([0x35, 0xb7, 0x79]),
    Rgb([0x6e, 0xce, 0x58]),
    Rgb([0xb5, 0xde, 0x2b]),
    Rgb([0xfd, 0xe7, 0x25]),
];

const BLUES: [Rgb; 9] = [
    Rgb([0xf7, 0xfb, 0xff]),
    Rgb([0xde, 0xeb, 0xf7]),
    Rgb([0xc6, 0xdb, 0xef]),
    Rgb([0x9e, 0xca, 0xe1]),
    Rgb([0x6b, 0xae, 0xd6]),
    Rgb([0x42, 0x92, 0xc6]),
    Rgb([0x21, 0x71, 0xb5]),
    Rgb([0x08, 0x51, 0x9c]),
    Rgb([0x08, 0x30, 0x6b]),
];

/// Low → high colour ramps for quantitative encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Viridis,
    Blues,
}

impl ColorScale {
    pub fn stops(self) -> &'static [Rgb] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Blues => &BLUES,
        }
    }

    /// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pos = t * (stops.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = (pos - lo as f64) as f32;

        let mixed = linear(stops[lo]).mix(linear(stops[hi]), frac);
        let out: Srgb = Srgb::from_linear(mixed);
        Rgb::from(out.into_format::<u8>())
    }

    /// Colour for `value` within `[min, max]`. A degenerate range maps to
    /// the top of the scale.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.sample(1.0);
        }
        self.sample((value - min) / span)
    }
}

fn linear(c: Rgb) -> LinSrgb {
    let [r, g, b] = c.0;
    Srgb::<u8>::new(r, g, b).into_format::<f32>().into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_hex() {
        assert_eq!(Rgb([0x08, 0x30, 0x6b]).to_string(), "#08306b");
        assert_eq!(
            serde_json::to_string(&Rgb([255, 0, 16])).unwrap(),
            "\"#ff0010\""
        );
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn qualitative_palettes_cycle() {
        assert_eq!(Qualitative::Set2.pick(0), Qualitative::Set2.pick(8));
        assert_eq!(Qualitative::Set3.pick(13), Qualitative::Set3.pick(1));
    }

    #[test]
    fn scale_endpoints_match_stops() {
        assert_eq!(ColorScale::Blues.sample(0.0), BLUES[0]);
        assert_eq!(ColorScale::Blues.sample(1.0), BLUES[8]);
        assert_eq!(ColorScale::Viridis.sample(-3.0), VIRIDIS[0]);
        assert_eq!(ColorScale::Viridis.sample(f64::NAN), VIRIDIS[0]);
    }

    #[test]
    fn degenerate_range_uses_top_colour() {
        assert_eq!(ColorScale::Viridis.color_for(5.0, 5.0, 5.0), VIRIDIS[9]);
    }
}
