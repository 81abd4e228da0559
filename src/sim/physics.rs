//! Rigid-body world adapter
//!
//! Thin wrapper around rapier3d. Owns no game logic: bodies go in, a fixed
//! timestep advances them, positions come out. nalgebra types stay behind
//! this boundary - the rest of the sim speaks glam.

use glam::Vec3;
use rapier3d::prelude::*;

use crate::consts::{GRAVITY_Y, SIM_DT};

/// Stable handle to a physics body
pub type BodyHandle = RigidBodyHandle;

#[inline]
fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn to_glam(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Physics world advancing all dynamic bodies by exactly `SIM_DT` per step.
///
/// No sub-stepping, no interpolation: one `step()` call per simulation tick,
/// regardless of wall-clock frame time.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = SIM_DT;
        Self {
            gravity: vector![0.0, GRAVITY_Y, 0.0],
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Advance every dynamic body by one fixed timestep
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Register a dynamic sphere body with an initial velocity
    pub fn add_dynamic_ball(&mut self, pos: Vec3, radius: f32, mass: f32, vel: Vec3) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_na(pos))
            .linvel(to_na(vel))
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius).mass(mass).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Register a fixed (zero-mass) sphere body
    pub fn add_static_ball(&mut self, pos: Vec3, radius: f32) -> BodyHandle {
        let body = RigidBodyBuilder::fixed().translation(to_na(pos)).build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Register a fixed cuboid body (pillars)
    pub fn add_static_cuboid(&mut self, pos: Vec3, half_extents: Vec3) -> BodyHandle {
        let body = RigidBodyBuilder::fixed().translation(to_na(pos)).build();
        let handle = self.bodies.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Register the fixed ground plane at y = 0, facing up
    pub fn add_static_floor(&mut self) -> BodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::halfspace(Vector::y_axis()).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Deregister a body and its colliders. Safe to call on a handle that was
    /// already removed (returns false).
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some()
    }

    /// Body position after the latest step
    pub fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| to_glam(b.translation()))
    }

    /// Body linear velocity after the latest step
    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| to_glam(b.linvel()))
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, vel: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(to_na(vel), true);
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
