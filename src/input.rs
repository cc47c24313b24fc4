use crate::grid::Dir;
use crate::world::{BodyId, World};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const VELOCITY_NUDGE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Nudge(Dir),
    Quit,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Nudge(Dir::Up)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Nudge(Dir::Right)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Nudge(Dir::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Nudge(Dir::Left)),
        _ => None,
    }
}

/// Velocity after one key press: only the component along `dir` changes.
pub fn nudged(velocity: (f32, f32), dir: Dir) -> (f32, f32) {
    let (x, y) = velocity;
    match dir {
        Dir::Up => (x, y - VELOCITY_NUDGE),
        Dir::Down => (x, y + VELOCITY_NUDGE),
        Dir::Left => (x - VELOCITY_NUDGE, y),
        Dir::Right => (x + VELOCITY_NUDGE, y),
    }
}

pub fn nudge_ball(world: &mut World, ball: BodyId, dir: Dir) {
    if let Some(velocity) = world.velocity(ball) {
        world.set_velocity(ball, nudged(velocity, dir));
    }
}
