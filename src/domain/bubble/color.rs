use derive_more::Display;
use serde::Serialize;
use strum::EnumIter;

/// CSS `hsl()` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "hsl({}, {}%, {}%)", hue, saturation, lightness)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

/// Seven-step classification of a signed percentage change.
///
/// Boundaries: `> 5`, `(1, 5]`, `(0, 1]`, `0`, `(-1, 0)`, `[-5, -1]`, `< -5`.
/// NaN is read as flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum ChangeBucket {
    StrongGain,
    Gain,
    SlightGain,
    Flat,
    SlightLoss,
    Loss,
    StrongLoss,
}

impl ChangeBucket {
    pub fn classify(change: f64) -> Self {
        if change.is_nan() || change == 0.0 {
            Self::Flat
        } else if change > 5.0 {
            Self::StrongGain
        } else if change > 1.0 {
            Self::Gain
        } else if change > 0.0 {
            Self::SlightGain
        } else if change > -1.0 {
            Self::SlightLoss
        } else if change >= -5.0 {
            Self::Loss
        } else {
            Self::StrongLoss
        }
    }

    pub fn hsl(&self) -> Hsl {
        match self {
            Self::StrongGain => Hsl::new(142, 76, 45),
            Self::Gain => Hsl::new(142, 76, 36),
            Self::SlightGain => Hsl::new(142, 60, 30),
            Self::Flat => Hsl::new(45, 93, 47),
            Self::SlightLoss => Hsl::new(0, 70, 50),
            Self::Loss => Hsl::new(0, 84, 60),
            Self::StrongLoss => Hsl::new(0, 90, 70),
        }
    }
}

pub fn color_for_change(change: f64) -> Hsl {
    ChangeBucket::classify(change).hsl()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_in_expected_buckets() {
        assert_eq!(ChangeBucket::classify(5.0), ChangeBucket::Gain);
        assert_eq!(ChangeBucket::classify(5.0001), ChangeBucket::StrongGain);
        assert_eq!(ChangeBucket::classify(1.0), ChangeBucket::SlightGain);
        assert_eq!(ChangeBucket::classify(-1.0), ChangeBucket::Loss);
        assert_eq!(ChangeBucket::classify(-0.999), ChangeBucket::SlightLoss);
        assert_eq!(ChangeBucket::classify(-5.0), ChangeBucket::Loss);
        assert_eq!(ChangeBucket::classify(-5.01), ChangeBucket::StrongLoss);
        assert_eq!(ChangeBucket::classify(f64::NAN), ChangeBucket::Flat);
        assert_eq!(ChangeBucket::classify(-0.0), ChangeBucket::Flat);
    }

    #[test]
    fn css_form() {
        assert_eq!(Hsl::new(142, 76, 45).css(), "hsl(142, 76%, 45%)");
    }
}
