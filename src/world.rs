//! Owned physics context for one play session.
//!
//! Wraps the rapier pipeline and exposes only what the maze needs: labelled
//! rectangles and circles, velocity and static/dynamic toggles, a world gravity
//! vector and the list of body pairs that started touching during a step.
//! Coordinates are viewport units with `y` growing downward.

use rapier2d::prelude::*;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Boundary,
    Wall,
    Goal,
    Ball,
}

impl BodyLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyLabel::Boundary => "boundary",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        }
    }

    fn user_data(self) -> u128 {
        match self {
            BodyLabel::Boundary => 1,
            BodyLabel::Wall => 2,
            BodyLabel::Goal => 3,
            BodyLabel::Ball => 4,
        }
    }

    fn from_user_data(data: u128) -> Option<Self> {
        match data {
            1 => Some(BodyLabel::Boundary),
            2 => Some(BodyLabel::Wall),
            3 => Some(BodyLabel::Goal),
            4 => Some(BodyLabel::Ball),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

/// Labels of two bodies that started touching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionPair {
    pub first: BodyLabel,
    pub second: BodyLabel,
}

impl CollisionPair {
    pub fn new(first: BodyLabel, second: BodyLabel) -> Self {
        CollisionPair { first, second }
    }

    pub fn is(&self, a: BodyLabel, b: BodyLabel) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyInfo {
    pub id: BodyId,
    pub label: BodyLabel,
    pub is_static: bool,
}

/// World-space bounding box of a body's collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyShape {
    pub label: BodyLabel,
    pub min: (f32, f32),
    pub max: (f32, f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldMutation {
    SetGravityY(f32),
    Release(BodyId),
}

#[derive(Default)]
struct CollisionCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl CollisionCollector {
    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        let mut started = self.started.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *started)
    }
}

impl EventHandler for CollisionCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(a, b, _) = event {
            self.started
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((a, b));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

pub struct World {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    collisions: CollisionCollector,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        World {
            gravity: vector![0.0, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),

            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),

            collisions: CollisionCollector::default(),
        }
    }

    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn add_rectangle(
        &mut self,
        center: (f32, f32),
        width: f32,
        height: f32,
        label: BodyLabel,
        is_static: bool,
    ) -> BodyId {
        let builder = if is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let body = builder
            .translation(vector![center.0, center.1])
            .user_data(label.user_data())
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        BodyId(handle)
    }

    /// Always dynamic. Continuous collision is on so the thin walls hold at speed.
    pub fn add_circle(&mut self, center: (f32, f32), radius: f32, label: BodyLabel) -> BodyId {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.0, center.1])
            .linear_damping(0.5)
            .ccd_enabled(true)
            .user_data(label.user_data())
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(radius)
            .restitution(0.3)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        BodyId(handle)
    }

    pub fn gravity(&self) -> (f32, f32) {
        (self.gravity.x, self.gravity.y)
    }

    pub fn set_gravity_y(&mut self, y: f32) {
        self.gravity.y = y;
    }

    pub fn position(&self, id: BodyId) -> Option<(f32, f32)> {
        let t = self.rigid_body_set.get(id.0)?.translation();
        Some((t.x, t.y))
    }

    pub fn velocity(&self, id: BodyId) -> Option<(f32, f32)> {
        let v = self.rigid_body_set.get(id.0)?.linvel();
        Some((v.x, v.y))
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: (f32, f32)) {
        if let Some(body) = self.rigid_body_set.get_mut(id.0) {
            body.set_linvel(vector![velocity.0, velocity.1], true);
        }
    }

    pub fn is_static(&self, id: BodyId) -> Option<bool> {
        self.rigid_body_set.get(id.0).map(|body| body.is_fixed())
    }

    pub fn set_static(&mut self, id: BodyId, is_static: bool) {
        let Some(body) = self.rigid_body_set.get_mut(id.0) else {
            return;
        };
        let target = if is_static {
            RigidBodyType::Fixed
        } else {
            RigidBodyType::Dynamic
        };
        if body.body_type() == target {
            return;
        }
        body.set_body_type(target, true);
        // a fixed body never joined an island, so it has to be registered as active
        self.island_manager
            .wake_up(&mut self.rigid_body_set, id.0, true);
    }

    pub fn label(&self, id: BodyId) -> Option<BodyLabel> {
        BodyLabel::from_user_data(self.rigid_body_set.get(id.0)?.user_data)
    }

    fn collider_label(&self, handle: ColliderHandle) -> Option<BodyLabel> {
        let parent = self.collider_set.get(handle)?.parent()?;
        self.label(BodyId(parent))
    }

    pub fn bodies(&self) -> Vec<BodyInfo> {
        self.rigid_body_set
            .iter()
            .filter_map(|(handle, body)| {
                Some(BodyInfo {
                    id: BodyId(handle),
                    label: BodyLabel::from_user_data(body.user_data)?,
                    is_static: body.is_fixed(),
                })
            })
            .collect()
    }

    pub fn shapes(&self) -> Vec<BodyShape> {
        self.collider_set
            .iter()
            .filter_map(|(handle, collider)| {
                let aabb = collider.compute_aabb();
                Some(BodyShape {
                    label: self.collider_label(handle)?,
                    min: (aabb.mins.x, aabb.mins.y),
                    max: (aabb.maxs.x, aabb.maxs.y),
                })
            })
            .collect()
    }

    pub fn apply(&mut self, mutations: &[WorldMutation]) {
        for mutation in mutations {
            match *mutation {
                WorldMutation::SetGravityY(y) => self.set_gravity_y(y),
                WorldMutation::Release(id) => self.set_static(id, false),
            }
        }
    }

    /// Advances one time step and returns every pair that started touching.
    pub fn step(&mut self) -> Vec<CollisionPair> {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collisions,
        );

        self.collisions
            .drain()
            .into_iter()
            .filter_map(|(a, b)| {
                Some(CollisionPair::new(
                    self.collider_label(a)?,
                    self.collider_label(b)?,
                ))
            })
            .collect()
    }
}
