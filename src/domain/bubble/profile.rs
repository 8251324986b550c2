use serde::Serialize;
use strum::{AsRefStr, EnumIter};

/// Closed radius interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    /// Swaps the bounds when given in reverse order
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn clamp(&self, radius: f64) -> f64 {
        if radius.is_nan() {
            return self.midpoint();
        }
        radius.clamp(self.min, self.max)
    }

    /// Linear interpolation, `t` clamped to [0, 1]
    pub fn lerp(&self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
        self.min + (self.max - self.min) * t
    }

    pub fn contains(&self, radius: f64) -> bool {
        radius >= self.min && radius <= self.max
    }
}

pub const TABLET_MAX_WIDTH: f64 = 1024.0;
pub const MOBILE_MAX_WIDTH: f64 = 640.0;

/// Viewport class deciding bubble sizes and how many bubbles are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, AsRefStr, Serialize)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceProfile {
    pub fn from_viewport_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn radius_range(&self) -> RadiusRange {
        match self {
            Self::Desktop => RadiusRange::new(15.0, 100.0),
            Self::Tablet => RadiusRange::new(25.0, 60.0),
            Self::Mobile => RadiusRange::new(20.0, 45.0),
        }
    }

    /// Maximum number of bubbles; extra records are dropped
    pub fn entity_cap(&self) -> usize {
        match self {
            Self::Desktop | Self::Tablet => 30,
            Self::Mobile => 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_selects_profile() {
        assert_eq!(DeviceProfile::from_viewport_width(1440.0), DeviceProfile::Desktop);
        assert_eq!(DeviceProfile::from_viewport_width(1024.0), DeviceProfile::Tablet);
        assert_eq!(DeviceProfile::from_viewport_width(375.0), DeviceProfile::Mobile);
        assert_eq!(DeviceProfile::Mobile.entity_cap(), 20);
        assert_eq!(DeviceProfile::Tablet.radius_range(), RadiusRange::new(25.0, 60.0));
    }

    #[test]
    fn range_helpers() {
        let range = RadiusRange::new(100.0, 15.0);
        assert_eq!(range.min, 15.0);
        assert_eq!(range.midpoint(), 57.5);
        assert_eq!(range.clamp(500.0), 100.0);
        assert_eq!(range.lerp(2.0), 100.0);
        assert_eq!(range.clamp(f64::NAN), 57.5);
    }
}
