//! Flat per-cell arenas shared by every derived map.
use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use crate::state::{Grid, Position};

/// One `T` per grid cell, addressed by the grid's row-major index.
///
/// Maps are allocated for a single turn and dropped with it; their shape
/// always matches the [`Grid`] they were created from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMap<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> CellMap<T> {
    /// Map shaped like `grid`, every entry set to `fill`.
    pub fn new(grid: &Grid, fill: T) -> Self {
        Self::filled(grid.width(), grid.height(), fill)
    }

    pub fn filled(width: u32, height: u32, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }
}

impl<T> CellMap<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let inside = position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32;
        inside.then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.index_of(position).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.index_of(position).map(move |index| &mut self.cells[index])
    }

    /// Writes `value` at `position`; out-of-grid writes are ignored.
    pub fn set(&mut self, position: Position, value: T) {
        if let Some(slot) = self.get_mut(position) {
            *slot = value;
        }
    }

    /// Entries in row-major order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, value)| (self.position_of(index), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    /// Renders one fixed-width column per cell, one line per row.
    pub fn render(&self, width: usize, mut cell: impl FnMut(Position, &T) -> String) -> String {
        let mut out = String::new();
        for (index, value) in self.cells.iter().enumerate() {
            let position = self.position_of(index);
            let _ = write!(out, "{:>width$}", cell(position, value));
            if position.x + 1 == self.width as i32 {
                out.push('\n');
            }
        }
        out
    }
}

impl<T> Index<usize> for CellMap<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.cells[index]
    }
}

impl<T> IndexMut<usize> for CellMap<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }
}
