//! Field-force accumulation: inverse-square attraction toward massive
//! entities, summed over every field an entity is subject to.

use glam::Vec2;

/// Distance floor for the force falloff. Keeps a field sitting exactly on
/// top of an entity from producing a non-finite kick: as the separation
/// shrinks below the floor, the contribution shrinks toward zero instead.
pub const MIN_FIELD_DISTANCE: f32 = 0.001;

/// A field resolved for one tick: composited position plus mass.
/// Positive mass attracts, negative mass repels.
#[derive(Debug, Clone, Copy)]
pub struct FieldSample {
    pub position: Vec2,
    pub mass: f32,
}

/// Sum the per-tick velocity contribution of `fields` on a body at
/// `origin`. Each field pulls along the separation vector `d` with
/// magnitude `mass / |d|²`, scaled by `dt`.
pub fn field_delta_v(origin: Vec2, fields: &[FieldSample], dt: f32) -> Vec2 {
    let floor = MIN_FIELD_DISTANCE * MIN_FIELD_DISTANCE;
    let mut delta_v = Vec2::ZERO;
    for field in fields {
        let d = field.position - origin;
        let dist_sq = d.length_squared().max(floor);
        // d / |d|³ = unit(d) / |d|²
        delta_v += d * (field.mass / (dist_sq * dist_sq.sqrt())) * dt;
    }
    delta_v
}
