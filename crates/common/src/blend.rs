use std::ops::{Add, Mul, Sub};

use glam::{Vec2, Vec3};

/// Values that can be blended toward a target by [`approach`].
pub trait Blend: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {}

impl Blend for f32 {}
impl Blend for Vec2 {}
impl Blend for Vec3 {}

/// Move `current` toward `target` by the fraction `clamp(rate * dt, 0, 1)`.
///
/// Every smoothed quantity in the core (facing direction, stance height, walk
/// blend, field of view, lean) goes through this one function so they share the
/// same clamping and rounding. A fraction of 1 lands exactly on the target.
pub fn approach<T: Blend>(current: T, target: T, rate: f32, dt: f32) -> T {
    let t = (rate * dt).clamp(0.0, 1.0);
    if t >= 1.0 {
        return target;
    }
    current + (target - current) * t
}
