//! Turns a carved [`MazeGrid`] into concrete wall rectangles in viewport units.

use crate::error::MazeError;
use crate::grid::MazeGrid;
use crate::world::BodyLabel;

pub const WALL_THICKNESS: f32 = 0.5;
pub const BOUNDARY_THICKNESS: f32 = 1.0;
const GOAL_SCALE: f32 = 0.7;

/// Axis-aligned rectangle given by its center and full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn min(&self) -> (f32, f32) {
        (self.x - self.width / 2.0, self.y - self.height / 2.0)
    }

    pub fn max(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    pub rect: Rect,
    pub label: BodyLabel,
}

/// Maps the cell lattice onto a `width x height` viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn new(rows: usize, columns: usize, width: f32, height: f32) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        Ok(Layout {
            rows,
            columns,
            width,
            height,
        })
    }

    pub fn unit_x(&self) -> f32 {
        self.width / self.columns as f32
    }

    pub fn unit_y(&self) -> f32 {
        self.height / self.rows as f32
    }

    pub fn cell_center(&self, row: usize, column: usize) -> (f32, f32) {
        (
            column as f32 * self.unit_x() + self.unit_x() / 2.0,
            row as f32 * self.unit_y() + self.unit_y() / 2.0,
        )
    }
}

pub fn boundary_walls(layout: &Layout) -> Vec<WallSegment> {
    let (w, h) = (layout.width, layout.height);
    [
        Rect::new(w / 2.0, 0.0, w, BOUNDARY_THICKNESS),
        Rect::new(w / 2.0, h, w, BOUNDARY_THICKNESS),
        Rect::new(0.0, h / 2.0, BOUNDARY_THICKNESS, h),
        Rect::new(w, h / 2.0, BOUNDARY_THICKNESS, h),
    ]
    .into_iter()
    .map(|rect| WallSegment {
        rect,
        label: BodyLabel::Boundary,
    })
    .collect()
}

/// One segment for every edge the generator left closed.
pub fn interior_walls(grid: &MazeGrid, layout: &Layout) -> Vec<WallSegment> {
    let (ux, uy) = (layout.unit_x(), layout.unit_y());
    let mut walls = Vec::new();

    for (row, column, &open) in grid.horizontal_walls.iter() {
        if open {
            continue;
        }
        walls.push(WallSegment {
            rect: Rect::new(
                column as f32 * ux + ux / 2.0,
                row as f32 * uy + uy,
                ux,
                WALL_THICKNESS,
            ),
            label: BodyLabel::Wall,
        });
    }

    for (row, column, &open) in grid.vertical_walls.iter() {
        if open {
            continue;
        }
        walls.push(WallSegment {
            rect: Rect::new(
                column as f32 * ux + ux,
                row as f32 * uy + uy / 2.0,
                WALL_THICKNESS,
                uy,
            ),
            label: BodyLabel::Wall,
        });
    }

    walls
}

/// Goal marker centered in the bottom-right cell.
pub fn goal_rect(layout: &Layout) -> Rect {
    let (x, y) = layout.cell_center(layout.rows - 1, layout.columns - 1);
    Rect::new(x, y, layout.unit_x() * GOAL_SCALE, layout.unit_y() * GOAL_SCALE)
}

/// Ball start in the top-left cell.
pub fn ball_start(layout: &Layout) -> Circle {
    let (x, y) = layout.cell_center(0, 0);
    Circle {
        x,
        y,
        radius: layout.unit_x().min(layout.unit_y()) / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn has_segment_at(walls: &[WallSegment], x: f32, y: f32) -> bool {
        walls.iter().any(|w| close(w.rect.x, x) && close(w.rect.y, y))
    }

    #[test]
    fn every_closed_edge_has_a_segment_and_open_edges_none() {
        let layout = Layout::new(6, 8, 96.0, 36.0).unwrap();
        for seed in 0..10 {
            let grid = generate(&mut StdRng::seed_from_u64(seed), 6, 8).unwrap();
            let walls = interior_walls(&grid, &layout);
            let total_edges = 6 * 7 + 5 * 8;
            assert_eq!(walls.len(), total_edges - grid.removed_walls());

            let (ux, uy) = (layout.unit_x(), layout.unit_y());
            for (r, c, &open) in grid.vertical_walls.iter() {
                let (x, y) = ((c + 1) as f32 * ux, r as f32 * uy + uy / 2.0);
                assert_eq!(has_segment_at(&walls, x, y), !open);
            }
            for (r, c, &open) in grid.horizontal_walls.iter() {
                let (x, y) = (c as f32 * ux + ux / 2.0, (r + 1) as f32 * uy);
                assert_eq!(has_segment_at(&walls, x, y), !open);
            }
        }
    }

    #[test]
    fn segment_orientation_and_size() {
        let layout = Layout::new(2, 2, 20.0, 10.0).unwrap();
        let grid = MazeGrid::new(2, 2).unwrap();
        let walls = interior_walls(&grid, &layout);
        assert_eq!(walls.len(), 4);
        assert!(walls.iter().all(|w| w.label == BodyLabel::Wall));
        let horizontal = walls.iter().filter(|w| close(w.rect.width, 10.0)).count();
        let vertical = walls.iter().filter(|w| close(w.rect.height, 5.0)).count();
        assert_eq!((horizontal, vertical), (2, 2));
        assert!(walls.iter().any(|w| w.rect == Rect::new(5.0, 5.0, 10.0, WALL_THICKNESS)));
        assert!(walls.iter().any(|w| w.rect == Rect::new(10.0, 2.5, WALL_THICKNESS, 5.0)));
    }

    #[test]
    fn boundary_encloses_the_viewport() {
        let layout = Layout::new(3, 4, 40.0, 21.0).unwrap();
        let walls = boundary_walls(&layout);
        assert_eq!(walls.len(), 4);
        assert!(walls.iter().all(|w| w.label == BodyLabel::Boundary));

        let (top, bottom, left, right) = (walls[0].rect, walls[1].rect, walls[2].rect, walls[3].rect);
        for horizontal in [top, bottom] {
            assert!(horizontal.min().0 <= 0.0 && horizontal.max().0 >= 40.0);
        }
        for vertical in [left, right] {
            assert!(vertical.min().1 <= 0.0 && vertical.max().1 >= 21.0);
        }
        assert!(top.min().1 <= 0.0 && top.max().1 > 0.0);
        assert!(bottom.min().1 < 21.0 && bottom.max().1 >= 21.0);
        assert!(left.min().0 <= 0.0 && left.max().0 > 0.0);
        assert!(right.min().0 < 40.0 && right.max().0 >= 40.0);
    }

    #[test]
    fn interior_walls_stay_inside_the_viewport() {
        let layout = Layout::new(5, 5, 50.0, 25.0).unwrap();
        let grid = generate(&mut StdRng::seed_from_u64(11), 5, 5).unwrap();
        for wall in interior_walls(&grid, &layout) {
            let (min, max) = (wall.rect.min(), wall.rect.max());
            assert!(min.0 >= 0.0 && min.1 >= 0.0);
            assert!(max.0 <= 50.0 && max.1 <= 25.0);
        }
    }

    #[test]
    fn goal_and_ball_sit_in_opposite_corners() {
        let layout = Layout::new(6, 8, 80.0, 24.0).unwrap();
        let goal = goal_rect(&layout);
        assert!(close(goal.x, 75.0) && close(goal.y, 22.0));
        assert!(close(goal.width, 7.0) && close(goal.height, 2.8));

        let ball = ball_start(&layout);
        assert!(close(ball.x, 5.0) && close(ball.y, 2.0));
        assert!(close(ball.radius, 1.0));
    }

    #[test]
    fn layout_rejects_zero_cells() {
        assert!(matches!(
            Layout::new(0, 8, 80.0, 24.0),
            Err(MazeError::InvalidDimensions { rows: 0, columns: 8 })
        ));
        assert!(matches!(
            Layout::new(6, 0, 80.0, 24.0),
            Err(MazeError::InvalidDimensions { rows: 6, columns: 0 })
        ));
    }
}
