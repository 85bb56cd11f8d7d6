//! Fixed-size row-major grid.

use anyhow::{Result, bail};

/// Offsets of the eight surrounding cells.
const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Parse a rectangular block of text, one cell per character.
    ///
    /// Blank lines are ignored; ragged rows and unknown characters are errors.
    pub fn parse(input: &str, cell: impl Fn(char) -> Option<T>) -> Result<Self> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (line_no, line) in input.lines().map(str::trim_end).enumerate() {
            if line.is_empty() {
                continue;
            }
            let before = cells.len();
            for ch in line.chars() {
                match cell(ch) {
                    Some(value) => cells.push(value),
                    None => bail!("(line {}) unexpected cell {:?}", line_no + 1, ch),
                }
            }
            let row_width = cells.len() - before;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    bail!("(line {}) row has {} cells, expected {}", line_no + 1, row_width, w)
                }
                Some(_) => {}
            }
            height += 1;
        }

        match width {
            Some(width) => Ok(Self {
                width,
                height,
                cells,
            }),
            None => bail!("empty grid"),
        }
    }

    /// Build a grid from a cell function.
    pub fn from_fn(width: usize, height: usize, mut cell: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(cell(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// In-bounds cells among the eight around (x, y).
    pub fn neighbors8(&self, x: usize, y: usize) -> impl Iterator<Item = &T> + '_ {
        NEIGHBORS_8.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.get(nx, ny)
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(ch: char) -> Option<u32> {
        ch.to_digit(10)
    }

    #[test]
    fn test_parse_and_neighbors() {
        let grid = Grid::parse("123\n456\n789\n", digit).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert_eq!(grid.get(2, 1), Some(&6));
        assert_eq!(grid.get(3, 1), None);

        let mut corner: Vec<_> = grid.neighbors8(0, 0).copied().collect();
        corner.sort();
        assert_eq!(corner, vec![2, 4, 5]);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = Grid::parse("123\n45\n", digit).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_rejects_unknown_cells() {
        assert!(Grid::parse("1x3\n", digit).is_err());
        assert!(Grid::parse("\n\n", digit).is_err());
    }
}
