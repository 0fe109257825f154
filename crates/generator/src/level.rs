use landing_core::MAX_HEADING_LEVEL;

/// Heading level of a rendered section, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const ROOT: Self = Self(1);
    pub const MAX: Self = Self(MAX_HEADING_LEVEL);

    /// Clamp an arbitrary level into `1..=6`
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::ROOT.0, Self::MAX.0))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Level used for a nested section: one deeper, capped at h6
    pub fn child(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    /// Level reached after descending `depth` times from here
    pub fn descend(self, depth: usize) -> Self {
        let depth = u8::try_from(depth).unwrap_or(u8::MAX);
        Self::new(self.0.saturating_add(depth))
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self::ROOT
    }
}
