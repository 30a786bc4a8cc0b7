//! Fixed chart palettes.
//!
//! Colors are kept backend-neutral; the egui and plotters back-ends convert
//! them at draw time.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Pie slice colors, in slice order.
pub const DISTRIBUTION_PALETTE: [Rgb; 6] = [
    Rgb::from_hex(0xff6384), // Red
    Rgb::from_hex(0x36a2eb), // Blue
    Rgb::from_hex(0xffce56), // Yellow
    Rgb::from_hex(0x4bc0c0), // Teal
    Rgb::from_hex(0x9966ff), // Purple
    Rgb::from_hex(0xff9f40), // Orange
];

/// Flowrate, Pressure, Temperature.
pub const AVERAGE_PALETTE: [Rgb; 3] = [
    Rgb::from_hex(0x36a2eb),
    Rgb::from_hex(0xff6384),
    Rgb::from_hex(0xffce56),
];

pub const MINIMUM_COLOR: Rgb = Rgb::from_hex(0x4bc0c0);
pub const MAXIMUM_COLOR: Rgb = Rgb::from_hex(0xff6384);

/// Color for the `index`-th item; wraps around past the end of the palette.
pub fn cycle(palette: &[Rgb], index: usize) -> Rgb {
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0xff6384), Rgb(255, 99, 132));
        assert_eq!(Rgb::from_hex(0x36a2eb).to_string(), "#36a2eb");
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(&DISTRIBUTION_PALETTE, 0), DISTRIBUTION_PALETTE[0]);
        assert_eq!(cycle(&DISTRIBUTION_PALETTE, 5), DISTRIBUTION_PALETTE[5]);
        assert_eq!(cycle(&DISTRIBUTION_PALETTE, 6), DISTRIBUTION_PALETTE[0]);
        assert_eq!(cycle(&DISTRIBUTION_PALETTE, 13), DISTRIBUTION_PALETTE[1]);
    }
}
