use crate::error::{Result, SceneError};

/// Row-major 2D container addressed by `(i, j)`.
///
/// `i` runs along the first axis (`columns` entries), `j` along the second
/// (`rows` entries). Dimensions are checked once at construction so lookups
/// only need a range test.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f(i, j)` for every cell.
    pub fn from_fn(columns: usize, rows: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(SceneError::InvalidMesh(format!(
                "grid must be at least 1x1, got {}x{}",
                columns, rows
            )));
        }
        let len = columns.checked_mul(rows).ok_or_else(|| {
            SceneError::InvalidMesh(format!("grid {}x{} is too large", columns, rows))
        })?;

        let mut cells = Vec::with_capacity(len);
        for j in 0..rows {
            for i in 0..columns {
                cells.push(f(i, j));
            }
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(i, j)`, or `None` when out of range.
    #[inline]
    pub fn index_of(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.columns && j < self.rows).then_some(j * self.columns + i)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.index_of(i, j).map(|idx| &self.cells[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}
