//! Parsing rendered text grids into a cell matrix.
//!
//! Engines render their grid as text, one character per cell and one
//! line per row. The playback layer forwards that text untouched; this
//! module is for consumers that want structured access. Parsing is a
//! pure function of the text and keeps no identity across frames.

use crate::error::GridError;

/// Characters used for live and dead cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Character for a live cell. Default: `'◼'`.
    pub alive: char,
    /// Character for a dead cell. Default: `'◻'`.
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: '◼',
            dead: '◻',
        }
    }
}

/// Row-major matrix of cell states parsed from a text grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMatrix {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CellMatrix {
    /// Parse `text` using `glyphs`.
    ///
    /// A trailing newline is accepted. Every row must have the same
    /// number of characters as the first. Empty text yields a 0×0 matrix.
    pub fn parse(text: &str, glyphs: Glyphs) -> Result<Self, GridError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let before = cells.len();
            for (column, glyph) in line.chars().enumerate() {
                if glyph == glyphs.alive {
                    cells.push(true);
                } else if glyph == glyphs.dead {
                    cells.push(false);
                } else {
                    return Err(GridError::UnknownGlyph { row, column, glyph });
                }
            }
            let found = cells.len() - before;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRow {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (`row`, `col`) is alive. Out-of-range is dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.cells[row * self.width + col]
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate rows as slices of cell states.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; an empty matrix has no rows anyway.
        self.cells.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_default_glyphs() {
        let m = CellMatrix::parse("◼◻◻\n◻◼◻\n", Glyphs::default()).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert!(m.is_alive(0, 0));
        assert!(!m.is_alive(0, 1));
        assert!(m.is_alive(1, 1));
        assert!(!m.is_alive(5, 5));
        assert_eq!(m.live_count(), 2);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn custom_glyphs() {
        let glyphs = Glyphs {
            alive: '#',
            dead: '.',
        };
        let m = CellMatrix::parse("#.\n.#", glyphs).unwrap();
        assert_eq!(m.live_count(), 2);
    }

    #[test]
    fn empty_text_is_empty_matrix() {
        let m = CellMatrix::parse("", Glyphs::default()).unwrap();
        assert_eq!((m.width(), m.height()), (0, 0));
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    fn ragged_row_rejected() {
        let err = CellMatrix::parse("◼◻◻\n◻◼\n", Glyphs::default()).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn unknown_glyph_rejected() {
        let err = CellMatrix::parse("◼x", Glyphs::default()).unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownGlyph {
                row: 0,
                column: 1,
                glyph: 'x'
            }
        );
    }

    proptest! {
        #[test]
        fn live_count_matches_rendered_text(
            width in 1usize..16,
            cells in proptest::collection::vec(any::<bool>(), 1..256),
        ) {
            let height = cells.len() / width;
            prop_assume!(height > 0);
            let cells = &cells[..width * height];
            let mut text = String::new();
            for row in cells.chunks(width) {
                for &alive in row {
                    text.push(if alive { '◼' } else { '◻' });
                }
                text.push('\n');
            }
            let m = CellMatrix::parse(&text, Glyphs::default()).unwrap();
            prop_assert_eq!(m.width(), width);
            prop_assert_eq!(m.height(), height);
            prop_assert_eq!(m.live_count(), cells.iter().filter(|&&c| c).count());
        }
    }
}
