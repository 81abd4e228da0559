//! Game state and entity registry
//!
//! All simulation state lives in one explicit `GameState` context - no
//! module-level globals - so tests can run several instances side by side.
//!
//! Every gameplay entity is a pair: a scene node and (except for particles)
//! a physics body, created and destroyed together. Destruction removes the
//! entity from both stores in the same call; destroying an id that is
//! already gone is a no-op.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::scene::{Geometry, Material, Node, NodeId, Scene};
use crate::settings::Settings;

use super::physics::{BodyHandle, PhysicsWorld};
use super::player::{ChargeState, InputState, PlayerMotion};

/// Packed 0xRRGGBB entity colors
pub const PROJECTILE_COLOR: u32 = 0xff0000;
pub const TARGET_COLOR: u32 = 0x00ff00;

/// A fired shot: dynamic sphere body + red sphere node
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub id: u32,
    pub node: NodeId,
    pub body: BodyHandle,
    /// Body position as of the latest sync pass
    pub position: Vec3,
}

/// A floating target: fixed sphere body + green sphere node
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub id: u32,
    pub node: NodeId,
    pub body: BodyHandle,
    /// Fixed body, so the spawn position is the position for life
    pub position: Vec3,
}

/// A physical explosion fragment with a per-tick time-to-live
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub id: u32,
    pub node: NodeId,
    pub body: BodyHandle,
    pub ttl_ticks: u32,
}

/// A non-physical explosion particle, advected manually and faded out
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub node: NodeId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub age_ticks: u32,
}

/// Complete simulation context: both scenegraphs, all entity registries,
/// player control state, and the run counters.
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visual scenegraph (nodes + camera)
    pub scene: Scene,
    /// Physical scenegraph
    pub physics: PhysicsWorld,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub fragments: Vec<Fragment>,
    pub particles: Vec<Particle>,
    pub input: InputState,
    pub motion: PlayerMotion,
    pub charge: ChargeState,
    /// Targets destroyed this run (HUD counter, never decrements)
    pub hits: u32,
    pub settings: Settings,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            scene: Scene::new(),
            physics: PhysicsWorld::new(),
            projectiles: Vec::new(),
            targets: Vec::new(),
            fragments: Vec::new(),
            particles: Vec::new(),
            input: InputState::default(),
            motion: PlayerMotion::default(),
            charge: ChargeState::default(),
            hits: 0,
            settings,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Charge bar level in [0, 1] for the display collaborator
    pub fn charge_level(&self) -> f32 {
        self.charge.factor()
    }

    /// Spawn a projectile at `pos` with launch velocity `vel`.
    ///
    /// Node and body start at the same coordinates; from then on the body
    /// position is authoritative.
    pub fn spawn_projectile(&mut self, pos: Vec3, vel: Vec3) -> u32 {
        let id = self.next_entity_id();
        let node = self.scene.insert(Node::new(
            pos,
            Geometry::Sphere {
                radius: PROJECTILE_RADIUS,
            },
            Material::solid(PROJECTILE_COLOR),
        ));
        let body = self
            .physics
            .add_dynamic_ball(pos, PROJECTILE_RADIUS, PROJECTILE_MASS, vel);
        self.projectiles.push(Projectile {
            id,
            node,
            body,
            position: pos,
        });
        log::debug!("projectile {id} fired at {vel:?}");
        id
    }

    /// Spawn a fixed target sphere at `pos`
    pub fn spawn_target(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        let node = self.scene.insert(Node::new(
            pos,
            Geometry::Sphere {
                radius: TARGET_RADIUS,
            },
            Material::solid(TARGET_COLOR),
        ));
        let body = self.physics.add_static_ball(pos, TARGET_RADIUS);
        self.targets.push(Target {
            id,
            node,
            body,
            position: pos,
        });
        id
    }

    /// Spawn one physical explosion fragment
    pub fn spawn_fragment(&mut self, pos: Vec3, vel: Vec3, color: u32) -> u32 {
        let id = self.next_entity_id();
        let node = self.scene.insert(Node::new(
            pos,
            Geometry::Sphere {
                radius: FRAGMENT_RADIUS,
            },
            Material::solid(color),
        ));
        let body = self
            .physics
            .add_dynamic_ball(pos, FRAGMENT_RADIUS, FRAGMENT_MASS, vel);
        self.fragments.push(Fragment {
            id,
            node,
            body,
            ttl_ticks: FRAGMENT_TTL_TICKS,
        });
        id
    }

    /// Spawn one non-physical explosion particle (scene node only)
    pub fn spawn_particle(&mut self, pos: Vec3, vel: Vec3, color: u32) {
        let node = self.scene.insert(Node::new(
            pos,
            Geometry::Sphere {
                radius: PARTICLE_RADIUS,
            },
            Material::solid(color),
        ));
        self.particles.push(Particle {
            node,
            position: pos,
            velocity: vel,
            age_ticks: 0,
        });
    }

    /// Remove a projectile from scene, physics, and registry. No-op if the
    /// id is not live.
    pub fn despawn_projectile(&mut self, id: u32) -> bool {
        let Some(idx) = self.projectiles.iter().position(|p| p.id == id) else {
            return false;
        };
        let p = self.projectiles.remove(idx);
        self.scene.remove(p.node);
        self.physics.remove_body(p.body);
        true
    }

    /// Remove a target from scene, physics, and registry. No-op if dead.
    pub fn despawn_target(&mut self, id: u32) -> bool {
        let Some(idx) = self.targets.iter().position(|t| t.id == id) else {
            return false;
        };
        let t = self.targets.remove(idx);
        self.scene.remove(t.node);
        self.physics.remove_body(t.body);
        true
    }

    /// Remove a fragment from scene, physics, and registry. No-op if dead.
    pub fn despawn_fragment(&mut self, id: u32) -> bool {
        let Some(idx) = self.fragments.iter().position(|f| f.id == id) else {
            return false;
        };
        let f = self.fragments.remove(idx);
        self.scene.remove(f.node);
        self.physics.remove_body(f.body);
        true
    }

    /// Copy every live body position into its scene node (one-directional,
    /// body to visual; runs right after the physics step).
    pub fn sync_visuals(&mut self) {
        let Self {
            physics,
            scene,
            projectiles,
            fragments,
            ..
        } = self;

        for p in projectiles.iter_mut() {
            if let Some(pos) = physics.position(p.body) {
                p.position = pos;
                if let Some(node) = scene.get_mut(p.node) {
                    node.position = pos;
                }
            }
        }
        for f in fragments.iter_mut() {
            if let Some(pos) = physics.position(f.body) {
                if let Some(node) = scene.get_mut(f.node) {
                    node.position = pos;
                }
            }
        }
        // Targets are fixed bodies; their nodes never move after spawn.
    }
}
