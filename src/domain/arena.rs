//! Octagonal arena the bubbles live in.
//!
//! Containment uses the circumscribed circle of the octagon as a proxy
//! boundary. The vertices are kept for drawing the outline; `contains_polygon`
//! offers the exact test but the simulation does not rely on it.

use crate::domain::geometry::Vec2;
use std::f64::consts::{FRAC_PI_8, TAU};

pub const OCTAGON_SIDES: usize = 8;
pub const DEFAULT_RADIUS_FRACTION: f64 = 0.48;
pub const DEFAULT_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaGeometry {
    width: f64,
    height: f64,
    center: Vec2,
    bounding_radius: f64,
    margin: f64,
    vertices: Vec<Vec2>,
}

impl ArenaGeometry {
    pub fn new(width: f64, height: f64, radius_fraction: f64, margin: f64) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let center = Vec2::new(width / 2.0, height / 2.0);
        let bounding_radius = width.min(height) * radius_fraction.max(0.0);
        let vertices = (0..OCTAGON_SIDES)
            .map(|k| {
                // FRAC_PI_8 offset puts a flat edge on top
                let angle = FRAC_PI_8 + k as f64 * TAU / OCTAGON_SIDES as f64;
                center + Vec2::from_angle(angle, bounding_radius)
            })
            .collect();

        Self { width, height, center, bounding_radius, margin: margin.max(0.0), vertices }
    }

    pub fn from_viewport(width: f64, height: f64) -> Self {
        Self::new(width, height, DEFAULT_RADIUS_FRACTION, DEFAULT_MARGIN)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Top-left and bottom-right corners of the square around the proxy circle
    pub fn bounding_box(&self) -> (Vec2, Vec2) {
        let r = Vec2::new(self.bounding_radius, self.bounding_radius);
        (self.center - r, self.center + r)
    }

    /// Whole body of radius `body_radius` at `position` lies strictly inside
    /// the proxy circle.
    pub fn is_inside(&self, position: Vec2, body_radius: f64) -> bool {
        self.center.distance(position) + body_radius < self.bounding_radius
    }

    /// Radial clamp for a body outside the boundary: same angle, distance
    /// `bounding_radius - body_radius - margin` from the center (never
    /// negative). Returns `None` when the body is already inside.
    pub fn correction(&self, position: Vec2, body_radius: f64) -> Option<Vec2> {
        if self.is_inside(position, body_radius) {
            return None;
        }
        let angle = (position - self.center).angle();
        let distance = (self.bounding_radius - body_radius - self.margin).max(0.0);
        Some(self.center + Vec2::from_angle(angle, distance))
    }

    /// `position` after correction, unchanged when already contained
    pub fn constrain(&self, position: Vec2, body_radius: f64) -> Vec2 {
        self.correction(position, body_radius).unwrap_or(position)
    }

    /// Exact point-in-octagon test (even-odd ray casting)
    pub fn contains_polygon(&self, point: Vec2) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + n - 1) % n];
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < cross_x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
