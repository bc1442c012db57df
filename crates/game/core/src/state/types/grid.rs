use arrayvec::ArrayVec;

use super::{CellType, Direction, Position};

/// Neighbour list of a cell; at most four axis neighbours exist.
pub type Neighbors = ArrayVec<Position, 4>;

/// Discretized board: one [`CellType`] per position, stored row-major.
///
/// Positions map to flat indices with `y * width + x`; every per-cell map in
/// the crate ([`crate::CellMap`]) uses the same indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellType>,
}

impl Grid {
    /// Creates an all-floor grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellType::Floor; (width as usize) * (height as usize)],
        }
    }

    /// Builds a grid from already-validated rows (all rows `width` long).
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<CellType>) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parses a grid from symbol rows (see [`CellType::symbol`]).
    ///
    /// Returns `None` if the rows are ragged or contain an unknown symbol.
    pub fn from_symbols<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count())?;
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let before = cells.len();
            for symbol in row.as_ref().chars() {
                cells.push(CellType::from_symbol(symbol)?);
            }
            if cells.len() - before != width {
                return None;
            }
        }
        Some(Self::from_cells(width as u32, height as u32, cells))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Flat row-major index of `position`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Inverse of [`Grid::index`]. The index must be `< len()`.
    #[inline]
    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, position: Position) -> Option<CellType> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Overwrites a cell; returns `false` (and does nothing) outside the grid.
    pub fn set(&mut self, position: Position, cell: CellType) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|index| self.position(index))
    }

    /// In-grid axis neighbours of `position`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, position: Position) -> Neighbors {
        Direction::ALL
            .iter()
            .map(|&direction| position.step(direction))
            .filter(|&next| self.contains(next))
            .collect()
    }

    /// Renders the grid with one symbol per cell, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|cell| cell.symbol()));
            out.push('\n');
        }
        out
    }
}
