//! Power vocabulary advisor: first-match upgrade from everyday wording to
//! executive register

use crate::core::lexicon::POWER_REGEXES;
use crate::types::VocabularySuggestion;

#[derive(Debug, Default)]
pub struct VocabularyAdvisor;

impl VocabularyAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// First basic word from the mapping table found in the text, with its
    /// upgrade. Table order decides, not match position.
    pub fn suggest(&self, text: &str) -> Option<VocabularySuggestion> {
        POWER_REGEXES
            .iter()
            .find(|(_, _, regex)| regex.is_match(text))
            .map(|(basic, power, _)| VocabularySuggestion {
                basic_word: (*basic).to_string(),
                upgrade_word: (*power).to_string(),
                example: upgrade_example(basic, power),
            })
    }
}

/// Canned sentence-level example for the common upgrades, generic fallback
/// for the rest
fn upgrade_example(basic: &str, power: &str) -> String {
    match basic {
        "problem" => {
            "\"We have a problem with the database\" → \"We have a bottleneck in the database layer\""
                .to_string()
        }
        "fix" => "\"We need to fix this\" → \"We need to remediate this incident\"".to_string(),
        "check" => "\"Let me check the logs\" → \"Let me audit the logs\"".to_string(),
        "make better" => {
            "\"We'll make the system better\" → \"We'll optimize the system architecture\""
                .to_string()
        }
        "use" => "\"We can use this tool\" → \"We can leverage this tool\"".to_string(),
        "stop" => {
            "\"We should stop this process\" → \"We should terminate this process\"".to_string()
        }
        "start" => "\"Let's start the deployment\" → \"Let's initiate the deployment\"".to_string(),
        "change" => {
            "\"We need to change our approach\" → \"We need to pivot our strategy\"".to_string()
        }
        _ => format!("\"{}\" → \"{}\"", basic, power),
    }
}

// =============================================================================
// TESTS
// =============================================================================
