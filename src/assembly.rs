use crate::grid::MazeGrid;
use crate::materializer::{ball_start, boundary_walls, goal_rect, interior_walls, Layout};
use crate::world::{BodyId, BodyLabel, World};

pub struct Scene {
    pub world: World,
    pub ball: BodyId,
    pub goal: BodyId,
}

pub fn assemble(grid: &MazeGrid, layout: &Layout) -> Scene {
    let mut world = World::new();

    for wall in boundary_walls(layout)
        .into_iter()
        .chain(interior_walls(grid, layout))
    {
        let rect = wall.rect;
        world.add_rectangle((rect.x, rect.y), rect.width, rect.height, wall.label, true);
    }

    let goal = goal_rect(layout);
    let goal = world.add_rectangle((goal.x, goal.y), goal.width, goal.height, BodyLabel::Goal, true);

    let start = ball_start(layout);
    let ball = world.add_circle((start.x, start.y), start.radius, BodyLabel::Ball);

    if log::log_enabled!(log::Level::Debug) {
        for body in world.bodies() {
            log::debug!(
                "body {:?} label={} static={} at {:?}",
                body.id,
                body.label.as_str(),
                body.is_static,
                world.position(body.id)
            );
        }
    }

    Scene { world, ball, goal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn world_holds_every_piece() {
        let grid = generate(&mut StdRng::seed_from_u64(21), 6, 8).unwrap();
        let layout = Layout::new(6, 8, 80.0, 24.0).unwrap();
        let scene = assemble(&grid, &layout);
        let bodies = scene.world.bodies();

        let count = |label| bodies.iter().filter(|b| b.label == label).count();
        assert_eq!(count(BodyLabel::Boundary), 4);
        assert_eq!(count(BodyLabel::Wall), interior_walls(&grid, &layout).len());
        assert_eq!(count(BodyLabel::Goal), 1);
        assert_eq!(count(BodyLabel::Ball), 1);

        assert_eq!(scene.world.label(scene.ball), Some(BodyLabel::Ball));
        assert_eq!(scene.world.label(scene.goal), Some(BodyLabel::Goal));
        assert_eq!(scene.world.position(scene.ball), Some((5.0, 2.0)));
        assert_eq!(scene.world.gravity(), (0.0, 0.0));
        assert!(bodies
            .iter()
            .filter(|b| b.label != BodyLabel::Ball)
            .all(|b| b.is_static));
    }

    #[test]
    fn ball_stays_inside_the_viewport() {
        let grid = generate(&mut StdRng::seed_from_u64(2), 3, 3).unwrap();
        let layout = Layout::new(3, 3, 30.0, 15.0).unwrap();
        let mut scene = assemble(&grid, &layout);
        scene.world.set_velocity(scene.ball, (-40.0, -40.0));
        for _ in 0..120 {
            scene.world.step();
        }
        let (x, y) = scene.world.position(scene.ball).unwrap();
        assert!(x > 0.0 && x < 30.0);
        assert!(y > 0.0 && y < 15.0);
    }
}
