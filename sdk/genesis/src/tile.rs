use bit_field::BitField;

/// Width and height of a tile, in pixels.
pub const TILE_SIZE: usize = 8;

/// An 8×8 tile of 4bpp color indices.
///
/// Each `u32` is one row; the leftmost pixel lives in the most significant
/// nibble, so `0x2000_0002` is a row with color 2 at both edges. This is the
/// layout the VDP expects in VRAM, which makes the hex literal a picture of
/// the tile:
///
/// ```
/// use genesis::Tile;
///
/// const FRAME: Tile = Tile([
///     0x22222222,
///     0x20000002,
///     0x20000002,
///     0x20000002,
///     0x20000002,
///     0x20000002,
///     0x20000002,
///     0x22222222,
/// ]);
///
/// assert_eq!(FRAME.pixel(0, 1), 2);
/// assert_eq!(FRAME.pixel(3, 3), 0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Tile(pub [u32; 8]);

impl Tile {
    /// All pixels color 0. The VDP treats color 0 as transparent.
    pub const EMPTY: Tile = Tile([0; 8]);

    /// A tile where every pixel is `color`.
    pub const fn solid(color: u8) -> Tile {
        let nibble = (color & 0xF) as u32;
        let mut row = 0;
        let mut i = 0;
        while i < TILE_SIZE {
            row = (row << 4) | nibble;
            i += 1;
        }
        Tile([row; 8])
    }

    /// Color index of the pixel at (`x`, `y`), both in `0..8`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let shift = (TILE_SIZE - 1 - x) * 4;
        self.0[y].get_bits(shift..shift + 4) as u8
    }

    #[inline]
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y) == 0
    }

    /// Row `y` unpacked into one color index per pixel.
    pub fn row(&self, y: usize) -> [u8; TILE_SIZE] {
        let mut out = [0; TILE_SIZE];
        for (x, px) in out.iter_mut().enumerate() {
            *px = self.pixel(x, y);
        }
        out
    }

    /// Every color index used by the tile, as a bitmask (bit n = color n).
    pub fn colors_used(&self) -> u16 {
        let mut mask = 0u16;
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                mask.set_bit(self.pixel(x, y) as usize, true);
            }
        }
        mask
    }
}
