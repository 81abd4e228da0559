//! Level setup
//!
//! Static scenery built once at startup: the floor plane, the randomized
//! pillar field, and the initial batch of floating targets. Scenery is
//! immutable for the life of the run and never enters the entity registry;
//! targets do, since they get destroyed.

use glam::Vec3;
use rand::Rng;

use crate::consts::*;
use crate::scene::{Geometry, Material, Node};

use super::state::GameState;

const FLOOR_COLOR: u32 = 0x4b0082;
const PILLAR_COLOR: u32 = 0x000000;
const OUTLINE_COLOR: u32 = 0xff00ff;
/// Inverted-hull outline shells are drawn slightly larger than the pillar
const OUTLINE_SCALE: f32 = 1.05;

/// Build the static level into a fresh state and scatter the targets
pub fn build_level(state: &mut GameState) {
    // Floor: one plane node, one fixed halfspace body
    state.scene.insert(Node::new(
        Vec3::ZERO,
        Geometry::Plane {
            width: FLOOR_WIDTH,
            depth: FLOOR_DEPTH,
        },
        Material::solid(FLOOR_COLOR),
    ));
    state.physics.add_static_floor();

    // Pillar field: random grid cell plus jitter, random height
    let step_x = FLOOR_WIDTH / PILLAR_GRID as f32;
    let step_z = FLOOR_DEPTH / PILLAR_GRID as f32;
    for _ in 0..PILLAR_COUNT {
        let grid_x = state.rng.random_range(0..PILLAR_GRID) as f32;
        let grid_z = state.rng.random_range(0..PILLAR_GRID) as f32;
        let offset_x = state.rng.random::<f32>() * step_x - step_x / 2.0;
        let offset_z = state.rng.random::<f32>() * step_z - step_z / 2.0;
        let x = grid_x * step_x + offset_x - FLOOR_WIDTH / 2.0;
        let z = grid_z * step_z + offset_z - FLOOR_DEPTH / 2.0;

        let height = state.rng.random::<f32>() * PILLAR_HEIGHT_RANGE + PILLAR_MIN_HEIGHT;
        let half_extents = Vec3::new(PILLAR_FOOTPRINT / 2.0, height / 2.0, PILLAR_FOOTPRINT / 2.0);
        let pos = Vec3::new(x, height / 2.0, z);

        state.scene.insert(Node::new(
            pos,
            Geometry::Cuboid { half_extents },
            Material::solid(PILLAR_COLOR),
        ));
        state.scene.insert(
            Node::new(
                pos,
                Geometry::Cuboid { half_extents },
                Material::outline(OUTLINE_COLOR),
            )
            .with_scale(OUTLINE_SCALE),
        );
        state.physics.add_static_cuboid(pos, half_extents);
    }

    // Targets at random positions above the floor
    for _ in 0..TARGET_COUNT {
        let x = state.rng.random::<f32>() * FLOOR_WIDTH - FLOOR_WIDTH / 2.0;
        let y = state.rng.random::<f32>() * TARGET_HEIGHT_RANGE + TARGET_MIN_HEIGHT;
        let z = state.rng.random::<f32>() * FLOOR_DEPTH - FLOOR_DEPTH / 2.0;
        state.spawn_target(Vec3::new(x, y, z));
    }

    log::info!(
        "level built: {} pillars, {} targets, {} bodies",
        PILLAR_COUNT,
        state.targets.len(),
        state.physics.body_count()
    );
}
