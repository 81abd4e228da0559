//! Fixed timestep simulation tick
//!
//! The single orchestrator. The driver calls `tick` once per display
//! refresh; every subsystem runs from here in a fixed order, and simulated
//! time advances by exactly `SIM_DT` per call - no accumulator, so slow
//! frames stretch simulated time rather than sub-stepping.

use glam::Vec2;

use crate::consts::{FIXED_FIRE_FORCE, KILL_PLANE_Y};

use super::collision::scan_target_hits;
use super::effects::{spawn_burst, update_effects};
use super::player::{apply_look, apply_movement};
use super::state::{GameState, TARGET_COLOR};

/// Per-frame continuous input. Discrete key/pointer events go through
/// `InputState` as they arrive; only the mouse-look delta rides on the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Mouse-look delta in radians (x = yaw, y = pitch)
    pub look_delta: Vec2,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Physics first, then the one-way body-to-node sync
    state.physics.step();
    state.sync_visuals();

    // Reclaim projectiles that fell out of the world, the same tick they
    // cross the threshold
    reclaim_fallen(state);

    // Proximity scan over the (now current) positions; destruction and
    // effect spawning are deferred to keep iteration safe
    let hits = scan_target_hits(&state.targets, &state.projectiles);
    for hit in hits {
        spawn_burst(state, hit.position, TARGET_COLOR);
        state.despawn_target(hit.target_id);
        state.hits += 1;
        log::info!("target {} destroyed, hits = {}", hit.target_id, state.hits);
    }

    // Advance effect lifetimes
    update_effects(state);

    // Input application: look, held-key movement, jump arc
    apply_look(&mut state.scene.camera, input.look_delta);
    apply_movement(&state.input, &mut state.scene.camera);
    if state.input.take_jump() {
        state.motion.start_jump();
    }
    state.motion.integrate(&mut state.scene.camera.position.y);

    // Charge and fire
    handle_fire(state);

    state.time_ticks += 1;
}

fn reclaim_fallen(state: &mut GameState) {
    let fallen: Vec<u32> = state
        .projectiles
        .iter()
        .filter(|p| p.position.y < KILL_PLANE_Y)
        .map(|p| p.id)
        .collect();
    for id in fallen {
        log::debug!("projectile {id} fell out of the world");
        state.despawn_projectile(id);
    }
}

/// Trigger handling. A press (already gated on pointer lock) opens a shot;
/// the matching release launches it. With charged shots off, every shot
/// leaves at the fixed force regardless of hold time.
fn handle_fire(state: &mut GameState) {
    if state.input.take_fire_pressed() {
        state.charge.begin();
    }

    if state.input.take_fire_released() {
        if let Some(charged_force) = state.charge.release() {
            let force = if state.settings.charged_shots {
                charged_force
            } else {
                FIXED_FIRE_FORCE
            };
            let camera = &state.scene.camera;
            let pos = camera.position;
            let vel = camera.forward() * force;
            state.spawn_projectile(pos, vel);
        }
    }

    // Accumulate held time after the release check, so a release at frame N
    // sees exactly N - press full ticks of charge
    if state.settings.charged_shots {
        state.charge.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{EffectStyle, Settings};
    use glam::Vec3;

    fn bare_state(settings: Settings) -> GameState {
        // No level: tests stage exactly the entities they need
        GameState::new(42, settings)
    }

    fn run_ticks(state: &mut GameState, n: usize) {
        let input = TickInput::default();
        for _ in 0..n {
            tick(state, &input);
        }
    }

    #[test]
    fn test_tick_advances_time() {
        let mut state = bare_state(Settings::default());
        run_ticks(&mut state, 5);
        assert_eq!(state.time_ticks, 5);
    }

    #[test]
    fn test_projectile_reclaimed_the_tick_it_crosses_kill_plane() {
        let mut state = bare_state(Settings::default());
        // Just above the threshold, moving fast enough to cross in one step
        let id = state.spawn_projectile(Vec3::new(0.0, -9.9, 0.0), Vec3::new(0.0, -60.0, 0.0));

        run_ticks(&mut state, 1);

        assert!(state.projectiles.is_empty(), "projectile {id} not reclaimed");
        assert_eq!(state.physics.body_count(), 0);
        assert_eq!(state.scene.len(), 0);
    }

    #[test]
    fn test_projectile_above_kill_plane_survives() {
        let mut state = bare_state(Settings::default());
        state.spawn_projectile(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO);

        run_ticks(&mut state, 10);

        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_target_destroyed_and_absent_from_later_scans() {
        let mut state = bare_state(Settings::default());
        state.spawn_target(Vec3::new(0.0, 10.0, 0.0));
        // Parked well inside the hit radius
        state.spawn_projectile(Vec3::new(0.0, 8.0, 0.0), Vec3::ZERO);

        run_ticks(&mut state, 1);

        assert_eq!(state.hits, 1);
        assert!(state.targets.is_empty());
        // Fragment burst spawned in the default style
        assert_eq!(state.fragments.len(), FRAGMENT_COUNT);
        // The projectile survives its hit
        assert_eq!(state.projectiles.len(), 1);

        // Later ticks find nothing left to destroy
        run_ticks(&mut state, 5);
        assert_eq!(state.hits, 1);
    }

    #[test]
    fn test_hit_counter_increments_by_one_per_target() {
        let mut state = bare_state(Settings::default());
        state.spawn_target(Vec3::new(0.0, 10.0, 0.0));
        state.spawn_target(Vec3::new(100.0, 10.0, 0.0));
        state.spawn_projectile(Vec3::new(0.0, 9.0, 0.0), Vec3::ZERO);

        run_ticks(&mut state, 1);

        assert_eq!(state.hits, 1);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_fire_requires_pointer_lock_end_to_end() {
        let mut state = bare_state(Settings::default());
        state.input.pointer_down();
        state.input.pointer_up();
        run_ticks(&mut state, 1);
        assert!(state.projectiles.is_empty());

        state.input.pointer_locked = true;
        state.input.pointer_down();
        state.input.pointer_up();
        run_ticks(&mut state, 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_uncharged_shot_uses_fixed_force() {
        let mut state = bare_state(Settings::default());
        state.input.pointer_locked = true;

        state.input.pointer_down();
        // Hold for a full second; without charged shots it must not matter
        run_ticks(&mut state, 60);
        state.input.pointer_up();
        run_ticks(&mut state, 1);

        let p = &state.projectiles[0];
        let vel = state.physics.velocity(p.body).unwrap();
        // One physics step of gravity has already applied to the launch speed
        assert!(
            (vel.length() - FIXED_FIRE_FORCE).abs() < 1.0,
            "speed = {}",
            vel.length()
        );
    }

    #[test]
    fn test_charge_level_readout_during_hold() {
        let mut state = bare_state(Settings {
            charged_shots: true,
            ..Settings::default()
        });
        state.input.pointer_locked = true;

        assert_eq!(state.charge_level(), 0.0);
        state.input.pointer_down();
        run_ticks(&mut state, 60);
        // Half of the 2 s charge window
        assert!((state.charge_level() - 0.5).abs() < 0.01);

        state.input.pointer_up();
        run_ticks(&mut state, 1);
        assert_eq!(state.charge_level(), 0.0);
    }

    #[test]
    fn test_end_to_end_charged_shot_destroys_target() {
        let mut state = bare_state(Settings {
            charged_shots: true,
            effect_style: EffectStyle::Particles,
            ..Settings::default()
        });
        state.input.pointer_locked = true;

        state.spawn_target(Vec3::new(0.0, 10.0, 0.0));
        // Stand right below and aim straight up
        state.scene.camera.position = Vec3::new(0.0, EYE_HEIGHT, 0.0);
        state.scene.camera.yaw = 0.0;
        state.scene.camera.pitch = std::f32::consts::FRAC_PI_2 - 0.001;

        // Hold half a second: force = 5 + 0.25 * 45 = 16.25, plenty to climb
        // the 2.5 units to the hit sphere
        state.input.pointer_down();
        run_ticks(&mut state, 30);
        state.input.pointer_up();
        run_ticks(&mut state, 60);

        assert_eq!(state.hits, 1, "target should be down");
        assert!(state.targets.is_empty());
        // Particle batch appeared at the destruction position (some may have
        // already begun fading, none expired after < 3 s)
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_jump_through_tick_loop() {
        let mut state = bare_state(Settings::default());
        state.input.press_jump();

        run_ticks(&mut state, 1);
        assert!(state.scene.camera.position.y > EYE_HEIGHT);

        // Ride the arc back down
        run_ticks(&mut state, 60);
        assert_eq!(state.scene.camera.position.y, EYE_HEIGHT);
        assert!(!state.motion.jumping);
    }

    #[test]
    fn test_held_keys_move_every_tick() {
        let mut state = bare_state(Settings::default());
        state.input.key_down(crate::sim::player::MoveKey::Forward);

        let start_z = state.scene.camera.position.z;
        run_ticks(&mut state, 10);
        let moved = start_z - state.scene.camera.position.z;
        assert!((moved - 10.0 * MOVE_STEP).abs() < 1e-4, "moved = {moved}");
    }
}
