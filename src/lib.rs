//! Neon Gallery - a first-person shooting gallery in a neon pillar field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `scene`: Visual scenegraph consumed by the rendering collaborator
//! - `settings`: Data-driven effect style and post-processing tuning

pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{EffectStyle, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, decoupled from frame cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward gravity applied to all dynamic bodies (units/s²)
    pub const GRAVITY_Y: f32 = -9.82;

    /// Floor extents
    pub const FLOOR_WIDTH: f32 = 400.0;
    pub const FLOOR_DEPTH: f32 = 400.0;

    /// Pillar field layout
    pub const PILLAR_COUNT: usize = 400;
    pub const PILLAR_FOOTPRINT: f32 = 10.0;
    pub const PILLAR_GRID: u32 = 40;
    pub const PILLAR_MIN_HEIGHT: f32 = 10.0;
    pub const PILLAR_HEIGHT_RANGE: f32 = 40.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 0.5;
    pub const PROJECTILE_MASS: f32 = 1.0;
    /// Launch speed when charged shots are disabled
    pub const FIXED_FIRE_FORCE: f32 = 20.0;
    /// Projectiles falling below this height are reclaimed
    pub const KILL_PLANE_Y: f32 = -10.0;

    /// Target defaults
    pub const TARGET_RADIUS: f32 = 2.0;
    pub const TARGET_COUNT: usize = 10;
    pub const TARGET_MIN_HEIGHT: f32 = 10.0;
    pub const TARGET_HEIGHT_RANGE: f32 = 20.0;
    /// Center-to-center distance that counts as a hit
    pub const HIT_RADIUS: f32 = 2.5;

    /// Player eye height above the floor
    pub const EYE_HEIGHT: f32 = 5.0;
    /// Horizontal translation per tick while a movement key is held
    pub const MOVE_STEP: f32 = 0.1;
    /// Initial upward velocity of a jump
    pub const JUMP_VELOCITY: f32 = 0.2;
    /// Per-tick gravity step of the jump integrator
    pub const JUMP_GRAVITY_STEP: f32 = 0.01;

    /// Charge mechanic envelope
    pub const MIN_FIRE_FORCE: f32 = 5.0;
    pub const MAX_FIRE_FORCE: f32 = 50.0;
    pub const MAX_CHARGE_SECS: f32 = 2.0;

    /// Explosion fragments (physical effect variant)
    pub const FRAGMENT_COUNT: usize = 10;
    pub const FRAGMENT_RADIUS: f32 = 0.3;
    pub const FRAGMENT_MASS: f32 = 0.1;
    /// Per-axis velocity spread: sampled as (rand - 0.5) * spread
    pub const FRAGMENT_SPREAD: f32 = 5.0;
    /// 2 seconds at the fixed timestep
    pub const FRAGMENT_TTL_TICKS: u32 = 120;

    /// Explosion particles (non-physical effect variant)
    pub const PARTICLE_COUNT: usize = 50;
    pub const PARTICLE_RADIUS: f32 = 0.3;
    pub const PARTICLE_SPREAD: f32 = 10.0;
    /// 3 seconds at the fixed timestep, faded linearly to zero opacity
    pub const PARTICLE_TTL_TICKS: u32 = 180;

    /// Camera projection handed to the renderer
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
}

/// Horizontal forward direction for a yaw angle (yaw 0 looks down -Z)
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right direction for a yaw angle
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Full aim direction including pitch (used for projectile launch)
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_axes_are_orthogonal() {
        for yaw in [0.0_f32, 0.7, 1.9, -2.3] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!(f.dot(r).abs() < 1e-6);
            assert!((f.length() - 1.0).abs() < 1e-6);
            assert!((r.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_look_direction_pitch() {
        // Level look matches the horizontal forward
        let level = look_direction(0.5, 0.0);
        assert!((level - yaw_forward(0.5)).length() < 1e-6);

        // Straight up regardless of yaw
        let up = look_direction(1.2, std::f32::consts::FRAC_PI_2);
        assert!((up - Vec3::Y).length() < 1e-5);
    }
}
