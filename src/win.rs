use crate::world::{BodyInfo, BodyLabel, CollisionPair, WorldMutation};

pub const SOLVED_GRAVITY_Y: f32 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinState {
    Playing,
    Solved,
}

impl WinState {
    pub fn as_str(self) -> &'static str {
        match self {
            WinState::Playing => "PLAYING",
            WinState::Solved => "SOLVED",
        }
    }
}

/// Watches collision notifications for the ball reaching the goal.
///
/// The controller never touches the world itself: it returns the mutations the
/// caller applies. Once solved, every further ball/goal contact yields the same
/// mutations again, which leave an already unlocked world unchanged.
pub struct WinController {
    state: WinState,
    solved_gravity_y: f32,
}

impl Default for WinController {
    fn default() -> Self {
        Self::new(SOLVED_GRAVITY_Y)
    }
}

impl WinController {
    pub fn new(solved_gravity_y: f32) -> Self {
        WinController {
            state: WinState::Playing,
            solved_gravity_y,
        }
    }

    pub fn state(&self) -> WinState {
        self.state
    }

    pub fn on_collision_start(&mut self, pairs: &[CollisionPair], bodies: &[BodyInfo]) -> Vec<WorldMutation> {
        if !pairs
            .iter()
            .any(|pair| pair.is(BodyLabel::Ball, BodyLabel::Goal))
        {
            return Vec::new();
        }

        if self.state == WinState::Playing {
            log::info!("you won");
            self.state = WinState::Solved;
        }

        let mut mutations = vec![WorldMutation::SetGravityY(self.solved_gravity_y)];
        mutations.extend(
            bodies
                .iter()
                .filter(|body| body.label == BodyLabel::Wall)
                .map(|body| WorldMutation::Release(body.id)),
        );
        mutations
    }
}
