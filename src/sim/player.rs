//! Player control state
//!
//! Held movement keys, the manual jump integrator, and the charge mechanic.
//! Horizontal movement translates the camera directly and is deliberately not
//! collision-checked against the pillar bodies - the player ghosts through
//! the field (arcade feel).

use glam::Vec2;

use crate::consts::{
    EYE_HEIGHT, JUMP_GRAVITY_STEP, JUMP_VELOCITY, MAX_CHARGE_SECS, MAX_FIRE_FORCE, MIN_FIRE_FORCE,
    MOVE_STEP, SIM_DT,
};
use crate::scene::Camera;

/// Movement keys tracked as held state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Input/control state fed by discrete browser-style events.
///
/// Movement flags are level-triggered: a held key keeps applying movement
/// every tick until its key-up arrives. Jump and fire are one-shot edges
/// consumed by the next tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer-lock engaged; fire only registers while locked
    pub pointer_locked: bool,
    jump_pressed: bool,
    fire_pressed: bool,
    fire_released: bool,
}

impl InputState {
    pub fn key_down(&mut self, key: MoveKey) {
        match key {
            MoveKey::Forward => self.forward = true,
            MoveKey::Backward => self.backward = true,
            MoveKey::Left => self.left = true,
            MoveKey::Right => self.right = true,
        }
    }

    pub fn key_up(&mut self, key: MoveKey) {
        match key {
            MoveKey::Forward => self.forward = false,
            MoveKey::Backward => self.backward = false,
            MoveKey::Left => self.left = false,
            MoveKey::Right => self.right = false,
        }
    }

    /// Jump trigger (not holdable; a new press is needed per jump)
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }

    /// Fire trigger down. Ignored unless pointer lock is engaged.
    pub fn pointer_down(&mut self) {
        if self.pointer_locked {
            self.fire_pressed = true;
        }
    }

    /// Fire trigger up. Always registers so a lock drop mid-hold cannot
    /// leave the charge stuck.
    pub fn pointer_up(&mut self) {
        self.fire_released = true;
    }

    pub(crate) fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pressed)
    }

    pub(crate) fn take_fire_pressed(&mut self) -> bool {
        std::mem::take(&mut self.fire_pressed)
    }

    pub(crate) fn take_fire_released(&mut self) -> bool {
        std::mem::take(&mut self.fire_released)
    }
}

/// Vertical motion of the player, integrated manually each tick.
///
/// This intentionally bypasses the physics world: the camera has no body,
/// only this explicit integrator (a known asymmetry carried over as-is).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerMotion {
    pub jumping: bool,
    pub velocity_y: f32,
}

impl PlayerMotion {
    /// Start a jump unless one is already in flight
    pub fn start_jump(&mut self) {
        if !self.jumping {
            self.jumping = true;
            self.velocity_y = JUMP_VELOCITY;
        }
    }

    /// Advance the jump arc by one tick. Snaps to eye height on landing and
    /// clears the jump state.
    pub fn integrate(&mut self, y: &mut f32) {
        if !self.jumping {
            return;
        }
        *y += self.velocity_y;
        self.velocity_y -= JUMP_GRAVITY_STEP;
        if *y <= EYE_HEIGHT {
            *y = EYE_HEIGHT;
            self.jumping = false;
            self.velocity_y = 0.0;
        }
    }
}

/// Charge buildup while the fire trigger is held
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeState {
    charging: bool,
    held_ticks: u32,
}

impl ChargeState {
    /// Begin charging (trigger down)
    pub fn begin(&mut self) {
        self.charging = true;
        self.held_ticks = 0;
    }

    /// Accumulate one tick of held time
    pub fn tick(&mut self) {
        if self.charging {
            self.held_ticks = self.held_ticks.saturating_add(1);
        }
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Charge factor in [0, 1]; 0 when idle. Monotonic while held.
    pub fn factor(&self) -> f32 {
        if !self.charging {
            return 0.0;
        }
        (self.held_ticks as f32 * SIM_DT / MAX_CHARGE_SECS).min(1.0)
    }

    /// Release the trigger, yielding the launch force if a charge was live
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        let force = charge_force(self.held_ticks as f32 * SIM_DT);
        self.charging = false;
        self.held_ticks = 0;
        Some(force)
    }
}

/// Launch force for a hold duration: linear between the min and max force,
/// clamped at the max charge time.
pub fn charge_force(held_secs: f32) -> f32 {
    let factor = (held_secs / MAX_CHARGE_SECS).clamp(0.0, 1.0);
    MIN_FIRE_FORCE + factor * (MAX_FIRE_FORCE - MIN_FIRE_FORCE)
}

/// Apply held movement keys to the camera.
///
/// Each active flag contributes its own fixed step along the camera's
/// yaw-relative axis; diagonal movement stacks both steps, unnormalized.
pub fn apply_movement(input: &InputState, camera: &mut Camera) {
    if input.forward {
        camera.position += camera.ground_forward() * MOVE_STEP;
    }
    if input.backward {
        camera.position -= camera.ground_forward() * MOVE_STEP;
    }
    if input.left {
        camera.position -= camera.ground_right() * MOVE_STEP;
    }
    if input.right {
        camera.position += camera.ground_right() * MOVE_STEP;
    }
}

/// Apply a mouse-look delta, clamping pitch short of straight up/down
pub fn apply_look(camera: &mut Camera, look_delta: Vec2) {
    const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.001;
    camera.yaw += look_delta.x;
    camera.pitch = (camera.pitch + look_delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EYE_HEIGHT;
    use glam::Vec3;
    use proptest::prelude::*;

    #[test]
    fn test_charge_force_envelope() {
        // Untouched trigger fires at the minimum
        assert!((charge_force(0.0) - MIN_FIRE_FORCE).abs() < 1e-6);
        // Saturated at and beyond the max charge time
        assert!((charge_force(MAX_CHARGE_SECS) - MAX_FIRE_FORCE).abs() < 1e-6);
        assert!((charge_force(10.0) - MAX_FIRE_FORCE).abs() < 1e-6);
        // Linear in between: 0.5 s of a 2 s charge = 5 + 0.25 * 45
        assert!((charge_force(0.5) - 16.25).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_charge_force_stays_in_bounds(held in -5.0f32..100.0) {
            let force = charge_force(held);
            prop_assert!(force >= MIN_FIRE_FORCE);
            prop_assert!(force <= MAX_FIRE_FORCE);
        }
    }

    #[test]
    fn test_charge_state_half_second_hold() {
        let mut charge = ChargeState::default();
        charge.begin();
        // 0.5 s at 60 Hz
        for _ in 0..30 {
            charge.tick();
        }
        assert!((charge.factor() - 0.25).abs() < 1e-5);
        let force = charge.release().unwrap();
        assert!((force - 16.25).abs() < 1e-4);
        // Released: factor resets, second release is None
        assert_eq!(charge.factor(), 0.0);
        assert!(charge.release().is_none());
    }

    #[test]
    fn test_charge_factor_is_monotonic_and_clamped() {
        let mut charge = ChargeState::default();
        charge.begin();
        let mut last = charge.factor();
        // Hold well past the max charge time
        for _ in 0..(3 * 60) {
            charge.tick();
            let f = charge.factor();
            assert!(f >= last);
            assert!((0.0..=1.0).contains(&f));
            last = f;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_jump_integrator_closed_form() {
        let mut motion = PlayerMotion::default();
        let mut y = EYE_HEIGHT;
        motion.start_jump();

        // While airborne, position matches 5 + sum_{k=0}^{n-1}(0.2 - 0.01k)
        for n in 1..=20 {
            motion.integrate(&mut y);
            let expected: f32 = EYE_HEIGHT
                + (0..n).map(|k| JUMP_VELOCITY - JUMP_GRAVITY_STEP * k as f32).sum::<f32>();
            assert!(motion.jumping, "still airborne at tick {n}");
            assert!((y - expected).abs() < 1e-4, "tick {n}: y={y} expected={expected}");
        }
    }

    #[test]
    fn test_jump_lands_exactly_at_eye_height() {
        let mut motion = PlayerMotion::default();
        let mut y = EYE_HEIGHT;
        motion.start_jump();

        let mut ticks = 0;
        while motion.jumping {
            motion.integrate(&mut y);
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }
        assert_eq!(y, EYE_HEIGHT);
        assert_eq!(motion.velocity_y, 0.0);
        // The arc is symmetric: ~40 ticks up and down for v0=0.2, g=0.01
        assert!((38..=42).contains(&ticks), "landed after {ticks} ticks");
    }

    #[test]
    fn test_jump_is_not_holdable() {
        let mut motion = PlayerMotion::default();
        let mut y = EYE_HEIGHT;
        motion.start_jump();
        motion.integrate(&mut y);
        let vy = motion.velocity_y;
        // A second trigger mid-air must not reset the arc
        motion.start_jump();
        assert_eq!(motion.velocity_y, vy);
    }

    #[test]
    fn test_movement_steps_camera() {
        let mut camera = Camera::default();
        let mut input = InputState::default();
        input.key_down(MoveKey::Forward);

        let start = camera.position;
        apply_movement(&input, &mut camera);
        // yaw 0 faces -Z
        assert!((camera.position - (start + Vec3::new(0.0, 0.0, -MOVE_STEP))).length() < 1e-6);

        // Key-up stops movement
        input.key_up(MoveKey::Forward);
        let here = camera.position;
        apply_movement(&input, &mut camera);
        assert_eq!(camera.position, here);
    }

    #[test]
    fn test_diagonal_movement_is_not_normalized() {
        let mut camera = Camera::default();
        let mut input = InputState::default();
        input.key_down(MoveKey::Forward);
        input.key_down(MoveKey::Right);

        apply_movement(&input, &mut camera);
        let moved = camera.position - Camera::default().position;
        // Two independent steps of 0.1, not one normalized step
        assert!((moved.length() - MOVE_STEP * std::f32::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_fire_requires_pointer_lock() {
        let mut input = InputState::default();
        input.pointer_down();
        assert!(!input.take_fire_pressed());

        input.pointer_locked = true;
        input.pointer_down();
        assert!(input.take_fire_pressed());
        // One-shot: consumed
        assert!(!input.take_fire_pressed());
    }

    #[test]
    fn test_look_pitch_is_clamped() {
        let mut camera = Camera::default();
        apply_look(&mut camera, Vec2::new(0.0, 10.0));
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        apply_look(&mut camera, Vec2::new(0.0, -20.0));
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }
}
