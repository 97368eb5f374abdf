use bit_field::BitField;

/// One of the four 16-color palettes in CRAM.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PalSlot {
    Pal0,
    Pal1,
    Pal2,
    Pal3,
}

impl PalSlot {
    pub const ALL: [PalSlot; 4] = [PalSlot::Pal0, PalSlot::Pal1, PalSlot::Pal2, PalSlot::Pal3];

    pub const fn index(self) -> usize {
        match self {
            PalSlot::Pal0 => 0,
            PalSlot::Pal1 => 1,
            PalSlot::Pal2 => 2,
            PalSlot::Pal3 => 3,
        }
    }

    /// Slot selected by the two palette bits of a name-table entry.
    pub const fn from_bits(bits: u16) -> PalSlot {
        match bits & 0b11 {
            0 => PalSlot::Pal0,
            1 => PalSlot::Pal1,
            2 => PalSlot::Pal2,
            _ => PalSlot::Pal3,
        }
    }
}

/// Sixteen CRAM colors in the VDP's `0000 BBB0 GGG0 RRR0` format.
///
/// Only the top three bits of each nibble are wired to the DAC, so `0xEEE`
/// is full white and `0xE0E` is full magenta.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Palette(pub [u16; 16]);

impl Palette {
    pub const BLACK: Palette = Palette([0; 16]);

    #[inline]
    pub fn color(&self, index: u8) -> u16 {
        self.0[(index & 0xF) as usize]
    }
}

/// Splits a CRAM color into its red, green and blue levels, each `0..=7`.
#[inline]
pub fn rgb_levels(color: u16) -> (u8, u8, u8) {
    (
        color.get_bits(1..4) as u8,
        color.get_bits(5..8) as u8,
        color.get_bits(9..12) as u8,
    )
}
