//! Target-projectile proximity resolution
//!
//! Runs once per tick, after the physics step and the sync pass. A pure
//! scan over the registries: destruction is deferred to the tick so the
//! lists are never mutated mid-iteration.

use glam::Vec3;

use crate::consts::HIT_RADIUS;

use super::state::{Projectile, Target};

/// A target due for destruction this tick
#[derive(Debug, Clone, Copy)]
pub struct TargetHit {
    pub target_id: u32,
    pub position: Vec3,
}

/// Scan all live target-projectile pairs.
///
/// Targets are visited in registry order; for each, projectiles are scanned
/// in registry order and the first one within `HIT_RADIUS` wins (inner loop
/// breaks). Projectiles survive their hits and keep flying - one shot can
/// take down several targets over its lifetime, or several at once if they
/// sit close enough together.
pub fn scan_target_hits(targets: &[Target], projectiles: &[Projectile]) -> Vec<TargetHit> {
    let mut hits = Vec::new();
    for target in targets {
        for projectile in projectiles {
            if target.position.distance(projectile.position) < HIT_RADIUS {
                hits.push(TargetHit {
                    target_id: target.id,
                    position: target.position,
                });
                break;
            }
        }
    }
    hits
}
