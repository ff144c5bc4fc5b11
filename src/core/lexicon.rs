//! Static vocabularies and compiled patterns for the audit engine
//!
//! Every table here is part of the scoring contract: entry order matters for
//! false friends (report order) and power vocabulary (first-match wins).

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Level;

// =============================================================================
// Technical action verbs by CEFR tier
// =============================================================================

pub const B1_VERBS: [&str; 8] = [
    "fix", "check", "update", "install", "restart", "test", "make", "work",
];
pub const B2_VERBS: [&str; 8] = [
    "resolve", "implement", "configure", "monitor", "deploy", "analyze", "restore", "handle",
];
pub const C1_VERBS: [&str; 8] = [
    "mitigate", "diagnose", "optimize", "troubleshoot", "escalate", "provision", "orchestrate",
    "refactor",
];
pub const C2_VERBS: [&str; 8] = [
    "triage", "remediate", "leverage", "streamline", "architect", "deprecate", "containerize",
    "instrument",
];

/// Base verbs for one tier
pub fn verbs_for(tier: Level) -> &'static [&'static str] {
    match tier {
        Level::B1 => &B1_VERBS,
        Level::B2 => &B2_VERBS,
        Level::C1 => &C1_VERBS,
        Level::C2 => &C2_VERBS,
    }
}

/// Bounded pattern matching a base verb and its -s/-ed/-ing inflections.
///
/// Verbs ending in silent e drop it before -ed/-ing ("triage" → "triaging"),
/// so the stem is matched with the e folded into the suffix alternatives.
pub fn verb_pattern(verb: &str) -> String {
    match verb.strip_suffix('e') {
        Some(stem) => format!(r"\b{}(?:e|es|ed|ing)\b", regex::escape(stem)),
        None => format!(r"\b{}(?:s|ed|ing)?\b", regex::escape(verb)),
    }
}

// =============================================================================
// False friends: Spanish-English confusions common in IT crisis rooms
// =============================================================================

/// One confusable form with its correction and optional context heuristic.
///
/// Entries with a heuristic only count as hits when the heuristic fires;
/// entries without one count on bare presence.
pub struct FalseFriendEntry {
    pub incorrect: &'static str,
    pub correct: &'static str,
    pub explanation: &'static str,
    pub example: &'static str,
    pub heuristic: Option<&'static str>,
}

pub const FALSE_FRIENDS: [FalseFriendEntry; 8] = [
    FalseFriendEntry {
        incorrect: "actual",
        correct: "current",
        explanation: r#"actual = current, not "real""#,
        example: "The actual (❌) → current (✅) database version is 5.7",
        heuristic: Some(r"actual (version|status|state|situation)"),
    },
    FalseFriendEntry {
        incorrect: "library",
        correct: "dependency/package",
        explanation: r#"library = bookstore (biblioteca física), use "dependency" or "package" for code"#,
        example: "We need to update the library (❌) → dependency (✅) to version 2.0",
        heuristic: Some(r"update.*library|install.*library"),
    },
    FalseFriendEntry {
        incorrect: "realize",
        correct: "implement/carry out",
        explanation: r#"realizar = to carry out, not "to become aware""#,
        example: "We will realize (❌) → implement (✅) the changes tomorrow",
        heuristic: Some(r"realize (the|a|an) (project|change|implementation)"),
    },
    FalseFriendEntry {
        incorrect: "assist",
        correct: "attend",
        explanation: r#"asistir = to attend, not "to help""#,
        example: "I will assist (❌) → attend (✅) the meeting",
        heuristic: Some(r"assist (the|a) (meeting|conference|session)"),
    },
    FalseFriendEntry {
        incorrect: "compromise",
        correct: "commit",
        explanation: r#"comprometerse = to commit, not "to make a compromise""#,
        example: "I compromise (❌) → commit (✅) to deliver by Friday",
        heuristic: None,
    },
    FalseFriendEntry {
        incorrect: "exit",
        correct: "success",
        explanation: r#"éxito = success, not "exit""#,
        example: "The exit (❌) → success (✅) of the project depends on...",
        heuristic: None,
    },
    FalseFriendEntry {
        incorrect: "eventually",
        correct: "possibly/perhaps",
        explanation: r#"eventualmente = possibly, not "in the end""#,
        example: "Eventually (❌) → Perhaps (✅) we should try a different approach",
        heuristic: None,
    },
    FalseFriendEntry {
        incorrect: "pretend",
        correct: "intend/plan",
        explanation: r#"pretender = to intend, not "to fake""#,
        example: "We pretend (❌) → intend (✅) to launch next month",
        heuristic: None,
    },
];

// =============================================================================
// Hesitation markers
// =============================================================================

pub const HESITATION_MARKERS: [&str; 18] = [
    "ummm", "umm", "um", "uhhh", "uhh", "uh",
    "ehhh", "ehh", "eh", "hmmm", "hmm",
    "like", "you know", "i mean", "kind of", "sort of",
    "basically", "actually",
];

// =============================================================================
// Power vocabulary: everyday word → executive register, first match wins
// =============================================================================

pub const POWER_VOCABULARY: [(&str, &str); 26] = [
    ("problem", "bottleneck"),
    ("issue", "impediment"),
    ("fix", "remediate"),
    ("make better", "optimize"),
    ("check", "audit"),
    ("find", "identify"),
    ("big problem", "critical incident"),
    ("very important", "mission-critical"),
    ("work together", "collaborate"),
    ("look at", "assess"),
    ("stop", "terminate"),
    ("start", "initiate"),
    ("change", "pivot"),
    ("help", "facilitate"),
    ("show", "demonstrate"),
    ("tell", "communicate"),
    ("think", "assess"),
    ("want", "require"),
    ("need", "necessitate"),
    ("use", "leverage"),
    ("make", "architect"),
    ("try", "attempt"),
    ("get", "acquire"),
    ("give", "provision"),
    ("do", "execute"),
    ("say", "articulate"),
];

// =============================================================================
// Soft-skill indicator phrases, grouped by category
// =============================================================================

pub const SOFT_SKILL_POSITIVE: [(&str, &[&str]); 5] = [
    ("ownership", &["we are", "i am", "our team", "i will", "we will", "taking responsibility"]),
    ("clarity", &["specifically", "precisely", "exactly", "eta", "timeline", "by eod"]),
    ("confidence", &["confident", "certain", "definitely", "assured", "established"]),
    ("collaboration", &["team", "together", "collaborate", "coordinate", "align"]),
    ("proactive", &["preventing", "proactive", "anticipate", "preemptive", "forward-thinking"]),
];

pub const SOFT_SKILL_NEGATIVE: [(&str, &[&str]); 4] = [
    ("defensive", &["not my fault", "someone else", "wasn't me", "they did", "blame"]),
    ("vague", &["maybe", "probably", "perhaps", "might", "could be", "i think", "i guess"]),
    ("passive", &["was done", "is being", "will be done", "happened to", "got"]),
    ("uncertain", &["don't know", "not sure", "unclear", "confused", "uncertain"]),
];

// =============================================================================
// Clarity and passive voice vocabulary
// =============================================================================

pub const VAGUE_WORDS: [&str; 5] = ["thing", "stuff", "something", "somehow", "whatever"];

/// Compile a whole-word pattern for a literal word or phrase.
/// Table literals are static so compilation cannot fail.
fn word_regex(phrase: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).unwrap()
}

lazy_static! {
    // =========================================================================
    // Technical verbs: one inflection-aware regex per verb, plus a joined
    // alternation for occurrence counting
    // =========================================================================
    pub static ref VERB_REGEXES: Vec<(Level, Vec<(&'static str, Regex)>)> = Level::ALL
        .iter()
        .map(|&tier| {
            let compiled = verbs_for(tier)
                .iter()
                .map(|&verb| (verb, Regex::new(&verb_pattern(verb)).unwrap()))
                .collect();
            (tier, compiled)
        })
        .collect();

    pub static ref RE_ANY_TECHNICAL_VERB: Regex = {
        let alternation = Level::ALL
            .iter()
            .flat_map(|&tier| verbs_for(tier).iter())
            .map(|&verb| format!("(?:{})", verb_pattern(verb)))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).unwrap()
    };

    // =========================================================================
    // False friends: presence pattern plus optional context heuristic
    // =========================================================================
    pub static ref FALSE_FRIEND_REGEXES: Vec<(&'static FalseFriendEntry, Regex, Option<Regex>)> =
        FALSE_FRIENDS
            .iter()
            .map(|entry| {
                let presence = word_regex(entry.incorrect);
                let heuristic = entry.heuristic.map(|p| Regex::new(p).unwrap());
                (entry, presence, heuristic)
            })
            .collect();

    // =========================================================================
    // Hesitation: bounded word markers plus terminal-dot runs
    // =========================================================================
    pub static ref HESITATION_REGEXES: Vec<(&'static str, Regex)> = HESITATION_MARKERS
        .iter()
        .map(|&marker| (marker, word_regex(marker)))
        .collect();

    pub static ref RE_ELLIPSIS: Regex = Regex::new(r"\.{2,}").unwrap();

    // =========================================================================
    // Soft-skill phrases, flattened in category order
    // =========================================================================
    pub static ref SOFT_SKILL_POSITIVE_REGEXES: Vec<(&'static str, Regex)> = SOFT_SKILL_POSITIVE
        .iter()
        .flat_map(|(_, phrases)| phrases.iter())
        .map(|&phrase| (phrase, word_regex(phrase)))
        .collect();

    pub static ref SOFT_SKILL_NEGATIVE_REGEXES: Vec<(&'static str, Regex)> = SOFT_SKILL_NEGATIVE
        .iter()
        .flat_map(|(_, phrases)| phrases.iter())
        .map(|&phrase| (phrase, word_regex(phrase)))
        .collect();

    // =========================================================================
    // Power vocabulary presence patterns, table order
    // =========================================================================
    pub static ref POWER_REGEXES: Vec<(&'static str, &'static str, Regex)> = POWER_VOCABULARY
        .iter()
        .map(|&(basic, power)| (basic, power, word_regex(basic)))
        .collect();

    // =========================================================================
    // Metrics patterns
    // =========================================================================
    pub static ref VAGUE_WORD_REGEXES: Vec<(&'static str, Regex)> = VAGUE_WORDS
        .iter()
        .map(|&word| (word, word_regex(word)))
        .collect();

    pub static ref RE_PASSIVE: Regex = Regex::new(
        r"\b(?:is|are|was|were) (?:being )?(?:done|made|created|fixed|resolved|implemented)\b"
    ).unwrap();

    pub static ref RE_TIMELINE: Regex = Regex::new(
        r"\b(?:eta|timeline|by eod|within \d+ (?:minutes|hours)|expect.*by)\b"
    ).unwrap();

    pub static ref RE_VAGUE_MISTAKE: Regex = Regex::new(r"\b(?:maybe|probably)\b").unwrap();

    pub static ref RE_WORD: Regex = Regex::new(r"[a-zA-Z0-9]+").unwrap();
}

/// Words in the text: maximal alphanumeric runs, punctuation dropped
pub fn word_count(text: &str) -> usize {
    RE_WORD.find_iter(text).count()
}

// =============================================================================
// TESTS
// =============================================================================
