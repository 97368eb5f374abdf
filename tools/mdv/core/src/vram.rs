use std::fmt::{Debug, Formatter};

use genesis::vdp::TILE_SLOTS;
use genesis::{PalSlot, Palette, Plane, Tile, TileAttr, TransferMethod, PLANE_HEIGHT, PLANE_WIDTH};
use log::{debug, warn};

const CELLS: usize = PLANE_WIDTH as usize * PLANE_HEIGHT as usize;

/// Counters for everything written into video memory since the last reset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub cpu_tiles: u32,
    pub dma_tiles: u32,
    pub palette_loads: u32,
    pub cell_writes: u64,
    /// Writes that pointed outside VRAM or the visible planes.
    pub dropped_writes: u32,
}

/// One scroll plane's name table, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaneMap {
    cells: Box<[TileAttr; CELLS]>,
}

impl Default for PlaneMap {
    fn default() -> Self {
        Self { cells: Box::new([TileAttr::EMPTY; CELLS]) }
    }
}

impl PlaneMap {
    #[inline]
    fn offset(x: u16, y: u16) -> Option<usize> {
        (x < PLANE_WIDTH && y < PLANE_HEIGHT).then(|| y as usize * PLANE_WIDTH as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<TileAttr> {
        Self::offset(x, y).map(|i| self.cells[i])
    }

    /// Returns `false` if the cell is off the plane.
    pub fn set(&mut self, x: u16, y: u16, attr: TileAttr) -> bool {
        match Self::offset(x, y) {
            Some(i) => {
                self.cells[i] = attr;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(TileAttr::EMPTY);
    }

    /// `(x, y, entry)` for every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, TileAttr)> + '_ {
        self.cells.iter().enumerate().map(|(i, attr)| {
            ((i % PLANE_WIDTH as usize) as u16, (i / PLANE_WIDTH as usize) as u16, *attr)
        })
    }
}

/// Everything the VDP draws from: tile patterns, CRAM and the plane name tables.
pub struct Vram {
    tiles: Vec<Tile>,
    cram: [Palette; 4],
    planes: [PlaneMap; 2],
    stats: TransferStats,
}

impl Default for Vram {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Vram {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Vram")
            .field("cram", &self.cram)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Vram {
    pub fn new() -> Self {
        Self {
            tiles: vec![Tile::EMPTY; TILE_SLOTS as usize],
            cram: [Palette::BLACK; 4],
            planes: [PlaneMap::default(), PlaneMap::default()],
            stats: TransferStats::default(),
        }
    }

    /// Power-on state: blank tiles (tile 0 included), black CRAM, empty planes.
    pub fn reset(&mut self) {
        self.tiles.fill(Tile::EMPTY);
        self.cram = [Palette::BLACK; 4];
        for plane in &mut self.planes {
            plane.clear();
        }
        self.stats = TransferStats::default();
    }

    pub fn write_tiles(&mut self, tiles: &[Tile], index: u16, method: TransferMethod) {
        let start = index as usize;
        let end = start + tiles.len();
        let fits = end.min(self.tiles.len()).saturating_sub(start);

        if fits < tiles.len() {
            warn!("tile load of {} at slot {} runs past VRAM, dropping {}", tiles.len(), index, tiles.len() - fits);
            self.stats.dropped_writes += (tiles.len() - fits) as u32;
        }
        if fits == 0 {
            return;
        }

        self.tiles[start..start + fits].copy_from_slice(&tiles[..fits]);
        debug!("loaded {} tile(s) at slot {} via {:?}", fits, index, method);

        match method {
            TransferMethod::Cpu => self.stats.cpu_tiles += fits as u32,
            TransferMethod::Dma => self.stats.dma_tiles += fits as u32,
        }
    }

    pub fn write_palette(&mut self, slot: PalSlot, palette: &Palette) {
        self.cram[slot.index()] = *palette;
        self.stats.palette_loads += 1;
        debug!("loaded palette {:?}", slot);
    }

    pub fn set_cell(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16) {
        if self.planes[plane.index()].set(x, y, attr) {
            self.stats.cell_writes += 1;
        } else {
            warn!("dropping write of {:#06x} to plane {:?} at ({}, {}), outside {}x{}", attr.0, plane, x, y, PLANE_WIDTH, PLANE_HEIGHT);
            self.stats.dropped_writes += 1;
        }
    }

    pub fn cell(&self, plane: Plane, x: u16, y: u16) -> Option<TileAttr> {
        self.planes[plane.index()].get(x, y)
    }

    pub fn plane(&self, plane: Plane) -> &PlaneMap {
        &self.planes[plane.index()]
    }

    #[inline]
    pub fn tile(&self, index: u16) -> &Tile {
        &self.tiles[index as usize % self.tiles.len()]
    }

    #[inline]
    pub fn palette(&self, slot: PalSlot) -> &Palette {
        &self.cram[slot.index()]
    }

    /// Background color shown where every plane is transparent.
    pub fn backdrop(&self) -> u16 {
        self.cram[0].color(0)
    }

    /// Cells on `plane` that reference tile `index`.
    pub fn find_tile(&self, plane: Plane, index: u16) -> Vec<(u16, u16)> {
        self.planes[plane.index()]
            .iter()
            .filter(|(_, _, attr)| attr.index() == index)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    pub fn stats(&self) -> TransferStats {
        self.stats
    }
}
