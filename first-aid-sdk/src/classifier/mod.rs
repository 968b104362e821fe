//! Keyword-based triage of free-text injury descriptions
//!
//! Every extractor lowercases the input and walks an ordered rule table;
//! the first rule with a keyword that occurs anywhere in the text wins.
//! Matching is raw substring matching, so "ear" also matches "near" and
//! "head" matches "headache".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::capitalize;

/// Broad injury category derived from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjuryCategory {
    CutsAndWounds,
    Burns,
    Fractures,
    HeadInjury,
    Shock,
    AllergicReaction,
    SevereBleeding,
    Choking,
    Poisoning,
    GeneralInjury,
}

impl InjuryCategory {
    /// Label shown to users and sent to the backend as `injury_type`
    pub fn label(&self) -> &'static str {
        match self {
            InjuryCategory::CutsAndWounds => "Cuts and Wounds",
            InjuryCategory::Burns => "Burns",
            InjuryCategory::Fractures => "Fractures",
            InjuryCategory::HeadInjury => "Head Injury",
            InjuryCategory::Shock => "Shock",
            InjuryCategory::AllergicReaction => "Allergic Reaction",
            InjuryCategory::SevereBleeding => "Severe Bleeding",
            InjuryCategory::Choking => "Choking",
            InjuryCategory::Poisoning => "Poisoning",
            InjuryCategory::GeneralInjury => "General Injury",
        }
    }
}

impl Default for InjuryCategory {
    fn default() -> Self {
        InjuryCategory::GeneralInjury
    }
}

impl fmt::Display for InjuryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity tier derived from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Moderate
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type Rule<L> = (L, &'static [&'static str]);

const INJURY_RULES: &[Rule<InjuryCategory>] = &[
    (
        InjuryCategory::CutsAndWounds,
        &["cut", "wound", "bleeding", "laceration", "slice", "gash", "slash"],
    ),
    (
        InjuryCategory::Burns,
        &["burn", "burnt", "scorched", "heat", "fire", "hot", "scalded"],
    ),
    (
        InjuryCategory::Fractures,
        &["fracture", "broken", "break", "crack", "snapped", "fractured"],
    ),
    (
        InjuryCategory::HeadInjury,
        &["head", "concussion", "impact", "knocked", "hit head", "brain"],
    ),
    (
        InjuryCategory::Shock,
        &["shock", "shocked", "pale", "weak", "faint"],
    ),
    (
        InjuryCategory::AllergicReaction,
        &["allergy", "allergic", "reaction", "rash", "swelling", "itching"],
    ),
    (
        InjuryCategory::SevereBleeding,
        &["severe bleed", "heavy bleed", "gushing", "hemorrhage", "arterial"],
    ),
    (
        InjuryCategory::Choking,
        &["choking", "choke", "can't breath", "stuck", "blocking", "lodged"],
    ),
    (
        InjuryCategory::Poisoning,
        &["poison", "toxic", "ingested", "swallowed", "overdose"],
    ),
];

const SEVERITY_RULES: &[Rule<Severity>] = &[
    (
        Severity::Severe,
        &[
            "severe", "very bad", "critical", "emergency", "urgent", "extremely", "seriously",
            "terrible",
        ],
    ),
    (
        Severity::Moderate,
        &["moderate", "bad", "significant", "serious", "quite bad", "fairly bad"],
    ),
    (
        Severity::Mild,
        &["mild", "minor", "small", "light", "little", "slight", "barely"],
    ),
];

const EMERGENCY_PHRASES: &[&str] = &[
    "emergency",
    "urgent",
    "critical",
    "severe",
    "call 911",
    "unconscious",
    "not breathing",
    "no pulse",
    "bleeding heavily",
    "choking",
    "poisoned",
    "overdose",
    "heart attack",
    "stroke",
    "unresponsive",
    "can't breathe",
    "difficulty breathing",
    "severe pain",
    "loss of consciousness",
    "suicidal",
    "bleeding won't stop",
];

const BODY_AREAS: &[&str] = &[
    "head", "face", "eye", "eyes", "nose", "mouth", "ear", "ears", "neck", "shoulder",
    "shoulders", "arm", "arms", "elbow", "elbows", "hand", "hands", "finger", "fingers", "chest",
    "back", "torso", "abdomen", "belly", "stomach", "leg", "legs", "knee", "knees", "ankle",
    "ankles", "foot", "feet", "toe", "toes", "skin", "wrist", "wrists",
];

/// Return the label of the first rule whose keywords occur in `text_lower`
fn first_match<'a, L>(text_lower: &str, rules: impl IntoIterator<Item = (L, &'a [&'a str])>) -> Option<L> {
    rules
        .into_iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text_lower.contains(keyword)))
        .map(|(label, _)| label)
}

/// Injury category, `GeneralInjury` when nothing matches
pub fn extract_injury_category(text: &str) -> InjuryCategory {
    first_match(&text.to_lowercase(), INJURY_RULES.iter().copied()).unwrap_or_default()
}

/// Severity tier, `Moderate` when nothing matches
pub fn extract_severity(text: &str) -> Severity {
    first_match(&text.to_lowercase(), SEVERITY_RULES.iter().copied()).unwrap_or_default()
}

/// True when any emergency phrase occurs in the text.
///
/// Independent of [`extract_severity`]: "severe pain" is an emergency while
/// "very bad" is only a severe tier.
pub fn detect_emergency(text: &str) -> bool {
    first_match(&text.to_lowercase(), [((), EMERGENCY_PHRASES)]).is_some()
}

/// First anatomical term in the text, capitalized
pub fn extract_body_area(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    first_match(&lower, BODY_AREAS.iter().map(|area| (*area, std::slice::from_ref(area))))
        .map(capitalize)
}

/// All four signals derived from one description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub injury_category: InjuryCategory,
    pub severity: Severity,
    pub is_emergency: bool,
    pub body_area: Option<String>,
}

/// Classify a free-text description
pub fn classify(text: &str) -> ClassificationResult {
    ClassificationResult {
        injury_category: extract_injury_category(text),
        severity: extract_severity(text),
        is_emergency: detect_emergency(text),
        body_area: extract_body_area(text),
    }
}
