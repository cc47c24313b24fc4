use crate::error::MazeError;
use crate::grid::{Dir, MazeGrid};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
struct Neighbor {
    row: isize,
    column: isize,
    dir: Dir,
}

/// One pending cell of the depth-first traversal: its shuffled neighbors and
/// how many of them have been tried so far.
struct Frame {
    row: usize,
    column: usize,
    neighbors: [Neighbor; 4],
    cursor: usize,
}

fn enter(grid: &mut MazeGrid, row: usize, column: usize, rng: &mut (impl Rng + ?Sized)) -> Option<Frame> {
    if grid.visited[row][column] {
        return None;
    }
    grid.visited[row][column] = true;

    let (r, c) = (row as isize, column as isize);
    let mut neighbors = [Dir::Up, Dir::Right, Dir::Down, Dir::Left].map(|dir| {
        let (dr, dc) = dir.delta();
        Neighbor {
            row: r + dr,
            column: c + dc,
            dir,
        }
    });
    neighbors.shuffle(rng);

    Some(Frame {
        row,
        column,
        neighbors,
        cursor: 0,
    })
}

fn remove_wall(grid: &mut MazeGrid, row: usize, column: usize, dir: Dir) {
    match dir {
        Dir::Left => grid.vertical_walls[row][column - 1] = true,
        Dir::Right => grid.vertical_walls[row][column] = true,
        Dir::Up => grid.horizontal_walls[row - 1][column] = true,
        Dir::Down => grid.horizontal_walls[row][column] = true,
    }
}

/// Randomized depth-first carve starting at `(start_row, start_column)`.
///
/// Runs on an explicit stack so grids of any size are safe; the visiting order
/// and the sequence of random draws are those of the plain recursive version.
pub fn carve(grid: &mut MazeGrid, start_row: usize, start_column: usize, rng: &mut (impl Rng + ?Sized)) {
    let mut stack: Vec<Frame> = Vec::new();
    if let Some(frame) = enter(grid, start_row, start_column, rng) {
        stack.push(frame);
    }

    while let Some(top) = stack.last_mut() {
        if top.cursor == top.neighbors.len() {
            stack.pop();
            continue;
        }
        let next = top.neighbors[top.cursor];
        top.cursor += 1;
        let (row, column) = (top.row, top.column);

        if !grid.in_bounds(next.row, next.column) {
            continue;
        }
        let (nr, nc) = (next.row as usize, next.column as usize);
        if grid.visited[nr][nc] {
            continue;
        }

        remove_wall(grid, row, column, next.dir);
        if let Some(frame) = enter(grid, nr, nc, rng) {
            stack.push(frame);
        }
    }
}

pub fn random_start(rng: &mut (impl Rng + ?Sized), rows: usize, columns: usize) -> (usize, usize) {
    (rng.gen_range(0..rows), rng.gen_range(0..columns))
}

/// Allocates a grid and carves it from a random start cell.
pub fn generate(
    rng: &mut (impl Rng + ?Sized),
    rows: usize,
    columns: usize,
) -> Result<MazeGrid, MazeError> {
    let mut grid = MazeGrid::new(rows, columns)?;
    let (start_row, start_column) = random_start(rng, rows, columns);
    carve(&mut grid, start_row, start_column, rng);
    log::debug!(
        "carved {}x{} maze from ({}, {}), {} walls removed",
        rows,
        columns,
        start_row,
        start_column,
        grid.removed_walls()
    );
    Ok(grid)
}
