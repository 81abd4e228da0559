//! Neon Gallery entry point
//!
//! The native build runs a short headless session: it builds the level,
//! walks a scripted firing sequence, and prints the HUD state. A browser
//! shell (renderer + pointer-lock plumbing) drives the same `tick` once per
//! animation frame.

use glam::Vec3;

use neon_gallery::consts::{GRAVITY_Y, MAX_FIRE_FORCE, TARGET_COUNT};
use neon_gallery::settings::Settings;
use neon_gallery::sim::{GameState, TickInput, build_level, tick};

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(42);

    let mut state = GameState::new(seed, Settings::neon());
    build_level(&mut state);
    state.input.pointer_locked = true;

    log::info!("neon-gallery headless demo, seed {seed}");

    // Take a few fully charged shots at whatever is closest
    let input = TickInput::default();
    for shot in 1..=5 {
        let cam_pos = state.scene.camera.position;
        let Some(target_pos) = state
            .targets
            .iter()
            .map(|t| t.position)
            .min_by(|a, b| {
                let da = a.distance(cam_pos);
                let db = b.distance(cam_pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
        else {
            break;
        };

        // Lead the aim upward to compensate for gravity droop over the
        // estimated flight time
        let flight = target_pos.distance(cam_pos) / MAX_FIRE_FORCE;
        aim(&mut state, target_pos + Vec3::Y * (0.5 * -GRAVITY_Y * flight * flight));

        // Hold past the full charge window, then release and watch
        state.input.pointer_down();
        for _ in 0..130 {
            tick(&mut state, &input);
        }
        log::info!("shot {shot}: charge bar at {:.2}", state.charge_level());
        state.input.pointer_up();
        for _ in 0..300 {
            tick(&mut state, &input);
        }
        log::info!("shot {shot} resolved: hits = {}", state.hits);
    }

    println!("targets hit: {}/{}", state.hits, TARGET_COUNT);
}

/// Point the camera straight at a world position
fn aim(state: &mut GameState, at: Vec3) {
    let camera = &mut state.scene.camera;
    let dir = (at - camera.position).normalize_or_zero();
    camera.yaw = (-dir.x).atan2(-dir.z);
    camera.pitch = dir.y.clamp(-1.0, 1.0).asin();
}
