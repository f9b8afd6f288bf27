use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tempris_engine::{ActivePiece, Cell, Grid};

use crate::ui::widgets::BlockDisplay;

/// The play field: every grid cell plus the falling piece overlaid.
///
/// Grid dimensions are runtime configuration, so cell areas are computed
/// with `Layout::split` rather than fixed-size arrays.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    active: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            active: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: Option<&'a ActivePiece>) -> Self {
        Self {
            active: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let cols = u16::try_from(self.grid.cols()).unwrap_or(u16::MAX);
        cols * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.grid.rows()).unwrap_or(u16::MAX);
        rows * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut cells: Vec<Vec<Cell>> = self.grid.rows_iter().map(<[Cell]>::to_vec).collect();
        if let Some(piece) = self.active {
            for (row, col) in piece.occupied_cells() {
                // Cells above the top edge are simply not drawn.
                let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
                    continue;
                };
                if row < self.grid.rows() && col < self.grid.cols() {
                    cells[row][col] = Some(piece.kind());
                }
            }
        }

        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let col_constraints =
            (0..self.grid.cols()).map(|_| Constraint::Length(BlockDisplay::width()));
        let vertical = Layout::vertical(row_constraints);
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);

        let row_areas = vertical.split(area);
        for (row_area, row) in iter::zip(row_areas.iter(), &cells) {
            let cell_areas = horizontal.split(*row_area);
            for (cell_area, cell) in iter::zip(cell_areas.iter(), row) {
                BlockDisplay::from_cell(*cell).render(*cell_area, buf);
            }
        }
    }
}
