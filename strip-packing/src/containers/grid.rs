use std::ops::Index;

/// A dense two-dimensional arena, stored row-major in a single vector.
///
/// Rows are typically rectangles and columns a coordinate or a second rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    num_columns: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid where the cell at `(row, column)` holds `create(row, column)`.
    pub fn from_fn(
        num_rows: usize,
        num_columns: usize,
        mut create: impl FnMut(usize, usize) -> T,
    ) -> Grid<T> {
        let cells = (0..num_rows)
            .flat_map(|row| (0..num_columns).map(move |column| (row, column)))
            .map(|(row, column)| create(row, column))
            .collect();

        Grid { num_columns, cells }
    }

    pub fn num_rows(&self) -> usize {
        if self.num_columns == 0 {
            0
        } else {
            self.cells.len() / self.num_columns
        }
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the cell, or `None` when the position is outside of the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if column >= self.num_columns {
            return None;
        }
        self.cells.get(row * self.num_columns + column)
    }

    /// The cells of a single row.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.num_columns;
        &self.cells[start..start + self.num_columns]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(
            column < self.num_columns,
            "column {column} is outside of a grid with {} columns",
            self.num_columns
        );
        &self.cells[row * self.num_columns + column]
    }
}
