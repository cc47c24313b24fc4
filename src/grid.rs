use crate::error::MazeError;
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

/// Rectangular lattice indexed `[row][column]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<T>>,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, columns: usize, fill: T) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![vec![fill; columns]; rows],
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, v)| (r, c, v)))
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &[T] {
        &self.cells[row]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.cells[row]
    }
}

/// Cell and wall state for a maze of `rows x columns` cells.
///
/// A `true` entry in `vertical_walls[r][c]` means the wall between `(r, c)` and
/// `(r, c + 1)` was removed; `horizontal_walls[r][c]` is the same for `(r, c)` and
/// `(r + 1, c)`. Nothing here enforces the spanning-tree shape, the generator does.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    pub visited: Grid<bool>,
    pub vertical_walls: Grid<bool>,
    pub horizontal_walls: Grid<bool>,
}

impl MazeGrid {
    pub fn new(rows: usize, columns: usize) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        Ok(MazeGrid {
            visited: Grid::new(rows, columns, false),
            vertical_walls: Grid::new(rows, columns - 1, false),
            horizontal_walls: Grid::new(rows - 1, columns, false),
        })
    }

    pub fn rows(&self) -> usize {
        self.visited.rows()
    }

    pub fn columns(&self) -> usize {
        self.visited.columns()
    }

    pub fn in_bounds(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows() && (column as usize) < self.columns()
    }

    pub fn removed_walls(&self) -> usize {
        let open = |g: &Grid<bool>| g.iter().filter(|&(_, _, &v)| v).count();
        open(&self.vertical_walls) + open(&self.horizontal_walls)
    }
}
