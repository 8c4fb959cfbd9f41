//! Ball physics over struct-of-arrays columns

use glam::Vec2;

use super::heap::Columns;
use crate::consts::COLLISION_STIFFNESS;

/// Push overlapping balls apart by changing their velocities.
///
/// The velocity change scales with the overlap and inversely with radius, so
/// small balls get knocked further than big ones.
pub fn collide(cols: &mut Columns<'_>) {
    let n = cols.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = Vec2::new(cols.x[i], cols.y[i]);
            let b = Vec2::new(cols.x[j], cols.y[j]);
            let (ra, rb) = (cols.radius[i], cols.radius[j]);

            let delta = b - a;
            let distance = delta.length();
            let overlap = ra + rb - distance;
            if overlap <= 0.0 {
                continue;
            }
            // Coincident centres: pick an arbitrary axis.
            let dir = if distance > f32::EPSILON {
                delta / distance
            } else {
                Vec2::X
            };
            let push = dir * overlap * COLLISION_STIFFNESS;
            if ra > 0.0 {
                cols.x_speed[i] -= push.x / ra;
                cols.y_speed[i] -= push.y / ra;
            }
            if rb > 0.0 {
                cols.x_speed[j] += push.x / rb;
                cols.y_speed[j] += push.y / rb;
            }
        }
    }
}

/// Apply gravity and move every ball by its velocity.
pub fn integrate(cols: &mut Columns<'_>, gravity: f32, dt: f32) {
    for i in 0..cols.len() {
        cols.y_speed[i] += gravity * dt;
        cols.x[i] += cols.x_speed[i] * dt;
        cols.y[i] += cols.y_speed[i] * dt;
    }
}

/// Reflect balls that cross a wall while moving outward.
pub fn bounce_walls(cols: &mut Columns<'_>, width: f32, height: f32) {
    for i in 0..cols.len() {
        let (x, y, r) = (cols.x[i], cols.y[i], cols.radius[i]);
        let (vx, vy) = (cols.x_speed[i], cols.y_speed[i]);
        if (x - r < 0.0 && vx < 0.0) || (x + r > width && vx > 0.0) {
            cols.x_speed[i] = -vx;
        }
        if (y - r < 0.0 && vy < 0.0) || (y + r > height && vy > 0.0) {
            cols.y_speed[i] = -vy;
        }
    }
}

/// Clamp a coordinate so a ball of radius `r` fits in `[0, extent]`.
fn fit(value: f32, r: f32, extent: f32) -> f32 {
    if extent <= 2.0 * r {
        extent / 2.0
    } else {
        value.clamp(r, extent - r)
    }
}

/// Move every ball back inside a (new) viewport. Velocities are untouched.
pub fn rebound(cols: &mut Columns<'_>, width: f32, height: f32) {
    for i in 0..cols.len() {
        let r = cols.radius[i];
        cols.x[i] = fit(cols.x[i], r, width);
        cols.y[i] = fit(cols.y[i], r, height);
    }
}

/// One full physics step.
pub fn step(cols: &mut Columns<'_>, collisions: bool, gravity: f32, size: Vec2, dt: f32) {
    if collisions {
        collide(cols);
    }
    integrate(cols, gravity, dt);
    bounce_walls(cols, size.x, size.y);
}
