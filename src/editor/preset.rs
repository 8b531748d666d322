/// Aspect-ratio presets offered by the crop toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectPreset {
    Free,
    Square,
    Classic4x3,
    Photo3x2,
    Wide16x9,
    Portrait2x3,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 6] = [
        Self::Free,
        Self::Square,
        Self::Classic4x3,
        Self::Photo3x2,
        Self::Wide16x9,
        Self::Portrait2x3,
    ];

    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Square => "1:1",
            Self::Classic4x3 => "4:3",
            Self::Photo3x2 => "3:2",
            Self::Wide16x9 => "16:9",
            Self::Portrait2x3 => "2:3",
        }
    }

    /// Width over height, or `None` for free-form selection.
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Square => Some(1.0),
            Self::Classic4x3 => Some(4.0 / 3.0),
            Self::Photo3x2 => Some(3.0 / 2.0),
            Self::Wide16x9 => Some(16.0 / 9.0),
            Self::Portrait2x3 => Some(2.0 / 3.0),
        }
    }
}
