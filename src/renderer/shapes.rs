//! Outline generation for 2D primitives

use glam::Vec2;

use crate::sim::Size;

/// Closed triangle centred on `center`, apex up: top, bottom-right, bottom-left, top
pub fn triangle(center: Vec2, half: Size) -> Vec<Vec2> {
    let top = Vec2::new(center.x, center.y - half.height);
    vec![
        top,
        Vec2::new(center.x + half.width, center.y + half.height),
        Vec2::new(center.x - half.width, center.y + half.height),
        top,
    ]
}

/// Line from `pos` along the velocity, a tenth of its length
pub fn velocity_line(pos: Vec2, vel: Vec2) -> Vec<Vec2> {
    vec![pos, pos + vel / 10.0]
}
