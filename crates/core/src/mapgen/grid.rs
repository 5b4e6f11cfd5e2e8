//! Tile grid produced by the generator and read by every other system.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{MapChip, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapGrid {
    width: usize,
    height: usize,
    chips: Vec<MapChip>,
}

impl MapGrid {
    pub(crate) fn filled(width: usize, height: usize, chip: MapChip) -> Self {
        Self { width, height, chips: vec![chip; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.column >= 0
            && pos.row >= 0
            && (pos.column as usize) < self.width
            && (pos.row as usize) < self.height
    }

    /// Out-of-bounds positions read as `Wall`.
    pub fn chip(&self, pos: Pos) -> MapChip {
        if !self.in_bounds(pos) {
            return MapChip::Wall;
        }
        self.chips[self.index(pos)]
    }

    pub(crate) fn set(&mut self, pos: Pos, chip: MapChip) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.chips[index] = chip;
        }
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.row as usize) * self.width + (pos.column as usize)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |column| Pos::new(column as i32, row as i32))
        })
    }

    pub fn find(&self, chip: MapChip) -> Option<Pos> {
        self.positions().find(|&pos| self.chip(pos) == chip)
    }

    pub fn up_stairs(&self) -> Option<Pos> {
        self.find(MapChip::UpStairs)
    }

    pub fn down_stairs(&self) -> Option<Pos> {
        self.find(MapChip::DownStairs)
    }

    pub fn count(&self, chip: MapChip) -> usize {
        self.chips.iter().filter(|&&candidate| candidate == chip).count()
    }

    /// Room plus Corridor tiles; the base of the population budget.
    pub fn floor_tile_count(&self) -> usize {
        self.chips
            .iter()
            .filter(|chip| matches!(chip, MapChip::Room | MapChip::Corridor))
            .count()
    }

    /// One line of chip digits per row.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for column in 0..self.width {
                let chip = self.chip(Pos::new(column as i32, row as i32));
                out.push(char::from(b'0' + chip.digit()));
            }
            out.push('\n');
        }
        out
    }

    /// Inverse of [`MapGrid::dump`]; `None` for ragged rows or unknown digits.
    pub fn from_dump_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        let mut chips = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return None;
            }
            for byte in row.bytes() {
                chips.push(MapChip::from_digit(byte.checked_sub(b'0')?)?);
            }
        }
        Some(Self { width, height, chips })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.chips.len());
        bytes.extend_from_slice(&(self.width as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.height as u32).to_le_bytes());
        bytes.extend(self.chips.iter().map(|chip| chip.digit()));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
