//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry order, by spawn)
//! - No rendering dependencies beyond writing scenegraph transforms

pub mod collision;
pub mod effects;
pub mod level;
pub mod physics;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{TargetHit, scan_target_hits};
pub use effects::{spawn_burst, update_effects};
pub use level::build_level;
pub use physics::{BodyHandle, PhysicsWorld};
pub use player::{ChargeState, InputState, MoveKey, PlayerMotion, charge_force};
pub use state::{Fragment, GameState, Particle, Projectile, Target};
pub use tick::{TickInput, tick};
