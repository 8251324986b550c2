use derive_more::{Add, AddAssign, Constructor, Sub, SubAssign};
use std::ops::Mul;
use serde::{Deserialize, Serialize};

/// 2D point / vector in canvas units (origin top-left, y down)
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Add, Sub, AddAssign, SubAssign, Constructor, Serialize, Deserialize,
)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn from_angle(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    /// Angle in radians from the positive x axis; 0 for the zero vector
    pub fn angle(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 { 0.0 } else { self.y.atan2(self.x) }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(a - b, Vec2::new(2.0, 3.0));
        assert_eq!((a + b) * 0.5, Vec2::new(2.0, 2.5));
        assert_eq!(a.length(), 5.0);
    }

    #[test]
    fn zero_vector_has_zero_angle() {
        assert_eq!(Vec2::ZERO.angle(), 0.0);
        let v = Vec2::from_angle(Vec2::new(0.0, 2.0).angle(), 2.0);
        assert!((v.y - 2.0).abs() < 1e-12 && v.x.abs() < 1e-12);
    }
}
