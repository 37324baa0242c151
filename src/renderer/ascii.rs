//! Text rasteriser for terminals and logs
//!
//! Maps the field onto a fixed grid of character cells. Each region covers
//! every cell whose center falls inside it.

use std::fmt;

use super::{RegionKind, RenderAdapter};
use crate::sim::Rect;

const EMPTY: char = ' ';
const SPRITE: char = '@';
const OBSTACLE: char = '#';

/// Character grid render target
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    /// Field units per cell
    cell_w: f32,
    cell_h: f32,
    cells: Vec<char>,
    countdown: Option<u32>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell_w: 1.0,
            cell_h: 1.0,
            cells: vec![EMPTY; cols * rows],
            countdown: None,
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Number of cells holding `c`
    pub fn count(&self, c: char) -> usize {
        self.cells.iter().filter(|&&cell| cell == c).count()
    }

    fn fill(&mut self, rect: Rect, c: char) {
        // Cell (col,row) is covered when its center lies inside rect
        let to_col = |x: f32| ((x / self.cell_w) - 0.5).ceil().clamp(0.0, self.cols as f32) as usize;
        let to_row = |y: f32| ((y / self.cell_h) - 0.5).ceil().clamp(0.0, self.rows as f32) as usize;

        let (c0, c1) = (to_col(rect.min.x), to_col(rect.max.x));
        let (r0, r1) = (to_row(rect.min.y), to_row(rect.max.y));
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols + col] = c;
            }
        }
    }
}

impl RenderAdapter for AsciiCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.cell_w = width / self.cols as f32;
        self.cell_h = height / self.rows as f32;
        self.cells.fill(EMPTY);
        self.countdown = None;
    }

    fn draw_region(&mut self, rect: Rect, kind: RegionKind) {
        let c = match kind {
            RegionKind::Sprite => SPRITE,
            RegionKind::ObstacleTop | RegionKind::ObstacleBottom => OBSTACLE,
        };
        self.fill(rect, c);
    }

    fn draw_countdown(&mut self, remaining: u32) {
        self.countdown = Some(remaining);
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.cols);
        writeln!(f, "+{border}+")?;
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "|{line}|")?;
        }
        write!(f, "+{border}+")?;
        if let Some(n) = self.countdown {
            write!(f, "\n{n}...")?;
        }
        Ok(())
    }
}
