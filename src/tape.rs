//! A single, conceptually unbounded tape with one read/write head.
//!
//! Cells are kept in a contiguous buffer that grows in fixed blocks whenever the head
//! approaches either end. Positions handed out to callers are logical: position 0 is
//! the first input cell, no matter how many blocks were prepended since.

use crate::types::{Direction, GROWTH_BLOCK, GROWTH_THRESHOLD, LEFT_MARGIN, RIGHT_MARGIN};

/// A single tape with its read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    /// Physical index of the head.
    head: usize,
    /// Physical index of logical position 0.
    origin: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input`, padded with blanks on both sides, with the head on
    /// the first input cell.
    pub fn new(input: &str, blank: char) -> Self {
        let mut cells = vec![blank; LEFT_MARGIN];
        cells.extend(input.chars());
        cells.extend(std::iter::repeat_n(blank, RIGHT_MARGIN));

        Self {
            cells,
            head: LEFT_MARGIN,
            origin: LEFT_MARGIN,
            blank,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells.get(self.head).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell and grows the tape if the head came within
    /// `GROWTH_THRESHOLD` cells of a boundary.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
        }

        if self.head + GROWTH_THRESHOLD >= self.cells.len() {
            self.cells
                .extend(std::iter::repeat_n(self.blank, GROWTH_BLOCK));
        } else if self.head < GROWTH_THRESHOLD {
            self.cells
                .splice(0..0, std::iter::repeat_n(self.blank, GROWTH_BLOCK));
            self.head += GROWTH_BLOCK;
            self.origin += GROWTH_BLOCK;
        }
    }

    /// Returns the symbol at a logical position, blank outside the materialized range.
    pub fn get(&self, position: isize) -> char {
        self.physical(position)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(self.blank)
    }

    /// Returns the logical position of the head.
    pub fn head(&self) -> isize {
        self.head as isize - self.origin as isize
    }

    /// Logical positions of the first and last materialized cells.
    pub fn bounds(&self) -> (isize, isize) {
        let first = -(self.origin as isize);
        (first, first + self.cells.len() as isize - 1)
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is materialized.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The symbol of unwritten cells.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Counts the cells holding `symbol`.
    pub fn count(&self, symbol: char) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }

    /// Returns the materialized cells in order.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Renders the whole tape, drawing blank cells as `glyph`.
    pub fn render(&self, glyph: char) -> String {
        self.cells
            .iter()
            .map(|&c| if c == self.blank { glyph } else { c })
            .collect()
    }

    /// Renders `radius` cells on each side of the head, with the head cell in brackets.
    ///
    /// ```text
    ///  x  #  y [a] 1  1
    /// ```
    pub fn window(&self, radius: usize, glyph: char) -> String {
        let start = self.head.saturating_sub(radius);
        let end = (self.head + radius + 1).min(self.cells.len());

        (start..end)
            .map(|i| {
                let c = if self.cells[i] == self.blank {
                    glyph
                } else {
                    self.cells[i]
                };
                if i == self.head {
                    format!("[{c}]")
                } else {
                    format!(" {c} ")
                }
            })
            .collect()
    }

    fn physical(&self, position: isize) -> Option<usize> {
        usize::try_from(position + self.origin as isize).ok()
    }
}

impl std::fmt::Display for Tape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(crate::types::BLANK_GLYPH))
    }
}
