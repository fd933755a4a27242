//! Reference engine fixture.
//!
//! [`Universe`] is a plain Conway's Game of Life on a torus, seeded with
//! a fixed pattern. It exists to give tests and demos a real engine to
//! drive; the playback layer does not depend on its rules.

use std::fmt::Write as _;

use lifeloop_core::{Engine, EngineView};

const DEAD: u8 = 0;
const ALIVE: u8 = 1;

/// Conway's Game of Life with wrap-around edges.
pub struct Universe {
    width: u32,
    height: u32,
    cells: Vec<u8>,
    scratch: Vec<u8>,
}

impl Universe {
    /// A 64×64 universe with the default seed pattern.
    pub fn new() -> Self {
        Self::with_size(64, 64)
    }

    /// A `width`×`height` universe where cell `i` starts alive when
    /// `i % 2 == 0 || i % 7 == 0`.
    pub fn with_size(width: u32, height: u32) -> Self {
        let cells: Vec<u8> = (0..width * height)
            .map(|i| if i % 2 == 0 || i % 7 == 0 { ALIVE } else { DEAD })
            .collect();
        let scratch = vec![DEAD; cells.len()];
        Self {
            width,
            height,
            cells,
            scratch,
        }
    }

    /// A universe with only the given `(row, col)` cells alive.
    pub fn from_live_cells(width: u32, height: u32, live: &[(u32, u32)]) -> Self {
        let mut universe = Self::with_size(width, height);
        universe.cells.fill(DEAD);
        for &(row, col) in live {
            let idx = universe.index(row, col);
            universe.cells[idx] = ALIVE;
        }
        universe
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row * self.width + col) as usize
    }

    fn live_neighbours(&self, row: u32, col: u32) -> u8 {
        let mut count = 0;
        for dr in [self.height - 1, 0, 1] {
            for dc in [self.width - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = (row + dr) % self.height;
                let c = (col + dc) % self.width;
                count += self.cells[self.index(r, c)];
            }
        }
        count
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineView for Universe {
    fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            for &cell in row {
                out.push(if cell == ALIVE { '◼' } else { '◻' });
            }
            let _ = writeln!(out);
        }
        out
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn live_count(&self) -> u32 {
        self.cells.iter().map(|&c| u32::from(c)).sum()
    }

    fn buffer_byte_length(&self) -> usize {
        std::mem::size_of::<Self>() + self.cells.capacity() + self.scratch.capacity()
    }

    fn cells_ptr(&self) -> usize {
        self.cells.as_ptr() as usize
    }

    fn cell_byte_size(&self) -> usize {
        self.cells.len()
    }
}

impl Engine for Universe {
    fn step(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(row, col);
                let next = match (self.cells[idx], self.live_neighbours(row, col)) {
                    (ALIVE, 2) | (ALIVE, 3) => ALIVE,
                    (DEAD, 3) => ALIVE,
                    _ => DEAD,
                };
                self.scratch[idx] = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}
