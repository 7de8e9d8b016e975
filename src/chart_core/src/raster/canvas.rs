//! Character grid owned by a single render call.

use std::ops::RangeInclusive;

use crate::models::bar::Direction;
use crate::raster::palette::Palette;

const SYMBOL_NOTHING: char = ' ';
const SYMBOL_STICK: char = '│';
const SYMBOL_CANDLE: char = '┃';

/// Content of one canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing plotted.
    #[default]
    Blank,
    /// Part of a bar's high-low excursion.
    Wick,
    /// Part of a bar's open-close range.
    Body,
    /// A polyline stroke drawn with the given glyph.
    Trace(char),
}

impl Cell {
    /// Glyph printed for this cell.
    pub fn glyph(self) -> char {
        match self {
            Cell::Blank => SYMBOL_NOTHING,
            Cell::Wick => SYMBOL_STICK,
            Cell::Body => SYMBOL_CANDLE,
            Cell::Trace(c) => c,
        }
    }
}

/// `height` rows by `width` columns, row 0 at the top.
///
/// Colour is a column attribute: every marked cell of a column is printed
/// with that column's [`Direction`], so a wick and its body can never differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    directions: Vec<Option<Direction>>,
}

impl Canvas {
    /// Blank canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Blank; width * height],
            directions: vec![None; width],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`. Panics when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Colour tag of a column, `None` for untagged columns.
    pub fn direction(&self, col: usize) -> Option<Direction> {
        self.directions[col]
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Sets a single cell.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Sets every row of `rows` in column `col`, overwriting earlier marks.
    pub fn fill(&mut self, col: usize, rows: RangeInclusive<usize>, cell: Cell) {
        for row in rows {
            self.set(row, col, cell);
        }
    }

    /// Tags a column with a direction.
    pub fn tag(&mut self, col: usize, direction: Direction) {
        self.directions[col] = Some(direction);
    }

    /// Serializes the grid row by row, top to bottom, rows joined by `\n`.
    pub fn render(&self, palette: &Palette) -> String {
        let mut out = String::with_capacity(self.height * (self.width * 4 + 1));
        for row in 0..self.height {
            if row > 0 {
                out.push('\n');
            }
            for (col, cell) in self.row(row).iter().enumerate() {
                match cell {
                    Cell::Blank => out.push(cell.glyph()),
                    _ => palette.paint(&mut out, cell.glyph(), self.directions[col]),
                }
            }
        }
        out
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} canvas",
            self.height,
            self.width
        );
        row * self.width + col
    }
}
