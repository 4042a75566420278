use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
// Inclusive HSV bounds, H in 0..=180, S and V in 0..=255.
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn in_range(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.lower[0]
            && h <= self.upper[0]
            && s >= self.lower[1]
            && s <= self.upper[1]
            && v >= self.lower[2]
            && v <= self.upper[2]
    }

    // True when every lower component is at most its upper component.
    pub fn is_ordered(&self) -> bool {
        self.lower.iter().zip(self.upper.iter()).all(|(lo, hi)| lo <= hi)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
// One range, or two ranges combined by union for hues that wrap past 180.
pub enum HsvProfile {
    Single(ColorRange),
    Union(ColorRange, ColorRange),
}

impl HsvProfile {
    pub fn ranges(&self) -> impl Iterator<Item = &ColorRange> {
        let (first, second) = match self {
            HsvProfile::Single(range) => (range, None),
            HsvProfile::Union(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        self.ranges().any(|range| range.in_range(h, s, v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloakColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Unknown cloak color: {0:?}")]
    Unknown(String),
}

static PROFILES: [(CloakColor, HsvProfile); 6] = [
    (
        CloakColor::Red,
        HsvProfile::Union(
            ColorRange::new([0, 120, 70], [10, 255, 255]),
            ColorRange::new([170, 120, 70], [180, 255, 255]),
        ),
    ),
    (
        CloakColor::Blue,
        HsvProfile::Single(ColorRange::new([90, 50, 50], [130, 255, 255])),
    ),
    (
        CloakColor::Green,
        HsvProfile::Single(ColorRange::new([35, 50, 50], [85, 255, 255])),
    ),
    (
        CloakColor::Yellow,
        HsvProfile::Single(ColorRange::new([20, 100, 100], [40, 255, 255])),
    ),
    (
        CloakColor::Purple,
        HsvProfile::Single(ColorRange::new([130, 50, 50], [160, 255, 255])),
    ),
    (
        CloakColor::Orange,
        HsvProfile::Single(ColorRange::new([10, 100, 100], [25, 255, 255])),
    ),
];

impl CloakColor {
    pub const ALL: [CloakColor; 6] = [
        CloakColor::Red,
        CloakColor::Blue,
        CloakColor::Green,
        CloakColor::Yellow,
        CloakColor::Purple,
        CloakColor::Orange,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CloakColor::Red => "red",
            CloakColor::Blue => "blue",
            CloakColor::Green => "green",
            CloakColor::Yellow => "yellow",
            CloakColor::Purple => "purple",
            CloakColor::Orange => "orange",
        }
    }

    pub fn profile(self) -> HsvProfile {
        PROFILES
            .iter()
            .find(|(color, _)| *color == self)
            .map(|(_, profile)| *profile)
            .unwrap_or_else(|| unreachable!("every color has a profile"))
    }
}

impl fmt::Display for CloakColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CloakColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CloakColor::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| ColorError::Unknown(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_range_is_ordered() {
        for color in CloakColor::ALL {
            for range in color.profile().ranges() {
                assert!(range.is_ordered(), "{color} has inverted bounds: {range:?}");
            }
        }
    }

    #[test]
    fn only_red_is_a_union() {
        for color in CloakColor::ALL {
            let is_union = matches!(color.profile(), HsvProfile::Union(..));
            assert_eq!(is_union, color == CloakColor::Red, "{color}");
        }
        assert_eq!(CloakColor::Red.profile().ranges().count(), 2);
        assert_eq!(CloakColor::Blue.profile().ranges().count(), 1);
    }

    #[test]
    fn red_covers_both_ends_of_the_hue_axis() {
        let red = CloakColor::Red.profile();
        assert!(red.contains(5, 200, 200));
        assert!(red.contains(175, 200, 200));
        assert!(!red.contains(90, 200, 200));
        assert!(!red.contains(5, 50, 200));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("RED".parse::<CloakColor>(), Ok(CloakColor::Red));
        assert_eq!("  Purple\n".parse::<CloakColor>(), Ok(CloakColor::Purple));
        assert_eq!(
            "teal".parse::<CloakColor>(),
            Err(ColorError::Unknown("teal".to_string()))
        );
    }
}
