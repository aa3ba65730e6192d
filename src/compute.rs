//! Pure helper functions shared by the entities and scenes.
//!
//! Nothing here touches state; every function maps its inputs to a value.

use crate::config::Field;
use crate::entities::Vector2;

/// Circle-circle overlap.  Tangent circles count as a hit.
pub fn is_hit(a: Vector2, a_radius: f32, b: Vector2, b_radius: f32) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let reach = a_radius + b_radius;
    dx * dx + dy * dy <= reach * reach
}

/// Clamp `pos` so a circle of `radius` stays fully inside `field`.
pub fn clamp_to_field(pos: Vector2, radius: f32, field: &Field) -> Vector2 {
    // Not `f32::clamp`: that panics when the field is narrower than the circle.
    Vector2 {
        x: pos.x.max(radius).min(field.width - radius),
        y: pos.y.max(radius).min(field.height - radius),
    }
}

/// Not held last frame, held this frame.
pub fn rising_edge(previous: bool, current: bool) -> bool {
    !previous && current
}
