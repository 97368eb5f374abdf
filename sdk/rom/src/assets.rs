use genesis::{Palette, Plane, Tile};

/// VRAM slot holding [`TILE_FILL`].
pub const VRAM_POS_TILE_FILL: u16 = 1;
/// VRAM slot holding [`TILE_CURSOR`].
pub const VRAM_POS_TILE_CURSOR: u16 = 2;

/// Plane A has the higher drawing priority, so the cursor goes there and the
/// fill sits behind it on plane B.
pub const CURSOR_PLANE: Plane = Plane::A;
pub const BG_PLANE: Plane = Plane::B;

pub const COLOR_FILL: u8 = 1;
pub const COLOR_CURSOR: u8 = 2;

/// Solid block of color 1.
pub static TILE_FILL: Tile = Tile([
    0x11111111,
    0x11111111,
    0x11111111,
    0x11111111,
    0x11111111,
    0x11111111,
    0x11111111,
    0x11111111,
]);

/// An empty square: color 2 around the edge, color 0 inside. Placed over
/// [`TILE_FILL`], the 0s are transparent and the fill shows through.
pub static TILE_CURSOR: Tile = Tile([
    0x22222222,
    0x20000002,
    0x20000002,
    0x20000002,
    0x20000002,
    0x20000002,
    0x20000002,
    0x22222222,
]);

pub static PALETTE_BASIC: Palette = Palette([
    0x000, // black
    0xEEE, // white
    0xE0E, // magenta
    // unused
    0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_use_their_palette_entries() {
        assert_eq!(TILE_FILL, Tile::solid(COLOR_FILL));
        assert_eq!(TILE_CURSOR.colors_used(), (1 << COLOR_CURSOR) | 1);
        assert_eq!(PALETTE_BASIC.color(COLOR_FILL), 0xEEE);
        assert_eq!(PALETTE_BASIC.color(COLOR_CURSOR), 0xE0E);
    }
}
