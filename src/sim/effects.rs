//! Explosion effects
//!
//! Two styles, selected by `Settings::effect_style`:
//! - `Fragments`: a handful of small dynamic bodies thrown outward, reclaimed
//!   when their per-tick TTL runs out
//! - `Particles`: a larger burst of scene-only points, advected manually and
//!   faded linearly to zero opacity
//!
//! Both are fire-and-forget for the caller: lifetimes are tracked on the
//! entities themselves and checked by `update_effects` every tick - no
//! deferred timers, nothing to cancel on teardown.

use glam::Vec3;
use rand::Rng;

use crate::consts::*;
use crate::settings::EffectStyle;

use super::state::GameState;

/// One uniform sample in [-spread/2, spread/2]
#[inline]
fn rand_spread(rng: &mut impl Rng, spread: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * spread
}

/// Spawn a destruction burst at `position` in the configured style
pub fn spawn_burst(state: &mut GameState, position: Vec3, color: u32) {
    match state.settings.effect_style {
        EffectStyle::Fragments => spawn_fragments(state, position, color),
        EffectStyle::Particles => spawn_particles(state, position, color),
    }
}

fn spawn_fragments(state: &mut GameState, position: Vec3, color: u32) {
    for _ in 0..FRAGMENT_COUNT {
        let vel = Vec3::new(
            rand_spread(&mut state.rng, FRAGMENT_SPREAD),
            rand_spread(&mut state.rng, FRAGMENT_SPREAD),
            rand_spread(&mut state.rng, FRAGMENT_SPREAD),
        );
        state.spawn_fragment(position, vel, color);
    }
}

fn spawn_particles(state: &mut GameState, position: Vec3, color: u32) {
    for _ in 0..PARTICLE_COUNT {
        let vel = Vec3::new(
            rand_spread(&mut state.rng, PARTICLE_SPREAD),
            rand_spread(&mut state.rng, PARTICLE_SPREAD),
            rand_spread(&mut state.rng, PARTICLE_SPREAD),
        );
        state.spawn_particle(position, vel, color);
    }
}

/// Advance all live effects by one tick.
///
/// Fragment positions already came from the physics sync; here only their
/// TTLs count down, and expired ones leave both scenegraphs. Particles are
/// moved by their own velocity and faded with age.
pub fn update_effects(state: &mut GameState) {
    // Fragments: countdown, then despawn the expired ones
    for f in state.fragments.iter_mut() {
        f.ttl_ticks = f.ttl_ticks.saturating_sub(1);
    }
    let expired: Vec<u32> = state
        .fragments
        .iter()
        .filter(|f| f.ttl_ticks == 0)
        .map(|f| f.id)
        .collect();
    for id in expired {
        state.despawn_fragment(id);
    }

    // Particles: manual advection + linear fade, scene-only
    let GameState {
        particles, scene, ..
    } = state;
    let mut dead_nodes = Vec::new();
    for p in particles.iter_mut() {
        p.age_ticks += 1;
        p.position += p.velocity * SIM_DT;
        if let Some(node) = scene.get_mut(p.node) {
            node.position = p.position;
            node.material.opacity = 1.0 - p.age_ticks as f32 / PARTICLE_TTL_TICKS as f32;
        }
    }
    particles.retain(|p| {
        if p.age_ticks >= PARTICLE_TTL_TICKS {
            dead_nodes.push(p.node);
            false
        } else {
            true
        }
    });
    for node in dead_nodes {
        scene.remove(node);
    }
}
