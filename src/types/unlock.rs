//! Static content unlock policy over registered levels

use crate::types::Level;

/// One unlockable training unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentUnit {
    pub id: u32,
    pub title: &'static str,
    /// Lowest registered level that unlocks this unit
    pub required_level: Level,
}

/// Full unit catalog, ascending by id. Required levels are non-decreasing,
/// which makes unlocking monotonic across level promotions.
pub const CONTENT_CATALOG: [ContentUnit; 4] = [
    ContentUnit { id: 1, title: "Casual Communication", required_level: Level::B1 },
    ContentUnit { id: 2, title: "Crisis Response", required_level: Level::B1 },
    ContentUnit { id: 3, title: "Negotiation", required_level: Level::B2 },
    ContentUnit { id: 4, title: "Executive Presentations", required_level: Level::C1 },
];

/// Unit ids available at the given level, ascending
pub fn unlocked_for(level: Level) -> Vec<u32> {
    CONTENT_CATALOG
        .iter()
        .filter(|unit| level >= unit.required_level)
        .map(|unit| unit.id)
        .collect()
}

/// Whether one unit is available at the given level, without building a list
pub fn is_unlocked(level: Level, unit_id: u32) -> bool {
    CONTENT_CATALOG
        .iter()
        .any(|unit| unit.id == unit_id && level >= unit.required_level)
}

/// Unit ids gained by moving from one level to another
pub fn newly_unlocked(from: Level, to: Level) -> Vec<u32> {
    CONTENT_CATALOG
        .iter()
        .filter(|unit| to >= unit.required_level && from < unit.required_level)
        .map(|unit| unit.id)
        .collect()
}

/// Catalog title for a unit id
pub fn unit_title(unit_id: u32) -> Option<&'static str> {
    CONTENT_CATALOG
        .iter()
        .find(|unit| unit.id == unit_id)
        .map(|unit| unit.title)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocks_per_level() {
        assert_eq!(unlocked_for(Level::B1), vec![1, 2]);
        assert_eq!(unlocked_for(Level::B2), vec![1, 2, 3]);
        assert_eq!(unlocked_for(Level::C1), vec![1, 2, 3, 4]);
        assert_eq!(unlocked_for(Level::C2), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unlocking_is_monotonic() {
        for pair in Level::ALL.windows(2) {
            let lower = unlocked_for(pair[0]);
            let higher = unlocked_for(pair[1]);
            for id in &lower {
                assert!(higher.contains(id), "{} lost unit {}", pair[1], id);
            }
        }
    }

    #[test]
    fn test_point_queries() {
        assert!(is_unlocked(Level::B1, 2));
        assert!(!is_unlocked(Level::B1, 3));
        assert!(is_unlocked(Level::B2, 3));
        assert!(!is_unlocked(Level::B2, 4));
        assert!(!is_unlocked(Level::C2, 99));
    }

    #[test]
    fn test_promotion_delta() {
        assert_eq!(newly_unlocked(Level::B1, Level::B2), vec![3]);
        assert_eq!(newly_unlocked(Level::B2, Level::C1), vec![4]);
        assert_eq!(newly_unlocked(Level::B1, Level::C1), vec![3, 4]);
        assert_eq!(newly_unlocked(Level::C1, Level::C2), Vec::<u32>::new());
    }

    #[test]
    fn test_unit_titles() {
        assert_eq!(unit_title(4), Some("Executive Presentations"));
        assert_eq!(unit_title(9), None);
    }
}
