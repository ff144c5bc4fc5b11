//! CEFR level definitions

use serde::{Deserialize, Serialize};

/// The four CEFR levels the auditor distinguishes, lowest first.
///
/// Derived ordering follows declaration order, so `B1 < B2 < C1 < C2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Intermediate
    B1,
    /// Upper intermediate
    B2,
    /// Advanced
    C1,
    /// Mastery
    C2,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Level; 4] = [Level::B1, Level::B2, Level::C1, Level::C2];

    /// Numeric rank in the hierarchy (B1=1 .. C2=4)
    pub fn rank(&self) -> u8 {
        match self {
            Level::B1 => 1,
            Level::B2 => 2,
            Level::C1 => 3,
            Level::C2 => 4,
        }
    }

    /// Next level up, or None at C2
    pub fn next(&self) -> Option<Level> {
        match self {
            Level::B1 => Some(Level::B2),
            Level::B2 => Some(Level::C1),
            Level::C1 => Some(Level::C2),
            Level::C2 => None,
        }
    }

    /// Human title for display
    pub fn title(&self) -> &'static str {
        match self {
            Level::B1 => "Intermediate",
            Level::B2 => "Upper Intermediate",
            Level::C1 => "Advanced",
            Level::C2 => "Mastery",
        }
    }

    /// Parse a CEFR code, case-insensitive
    pub fn parse(code: &str) -> Option<Level> {
        match code.trim().to_ascii_uppercase().as_str() {
            "B1" => Some(Level::B1),
            "B2" => Some(Level::B2),
            "C1" => Some(Level::C1),
            "C2" => Some(Level::C2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        };
        write!(f, "{}", code)
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| format!("unknown CEFR level: {}", s))
    }
}

// =============================================================================
// TESTS
// =============================================================================
