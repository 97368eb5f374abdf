use genesis::palette::rgb_levels;

/// 8-bit output for each 3-bit DAC level. The console's resistor ladder isn't
/// linear; these are the measured steps.
pub const LEVELS: [u8; 8] = [0, 52, 87, 116, 144, 172, 206, 255];

pub type Rgba = [u8; 4];

/// Opaque RGBA for a CRAM color word.
#[inline]
pub fn to_rgba(color: u16) -> Rgba {
    let (r, g, b) = rgb_levels(color);
    [LEVELS[r as usize], LEVELS[g as usize], LEVELS[b as usize], 0xFF]
}
