//! Static reference guidance shown alongside backend results

use url::form_urlencoded;

/// Fallback when no specialist rule matches
pub const DEFAULT_SPECIALIST: &str = "Primary Care Physician";

/// Fallback when no follow-up rule matches
pub const DEFAULT_FOLLOW_UP: &str = "Follow doctor's instructions for follow-up care.";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

const SPECIALISTS: &[(&str, &str)] = &[
    ("burn", "Dermatologist or Burn Specialist"),
    ("fracture", "Orthopedic Surgeon"),
    ("cut", "Surgeon or Primary Care Physician"),
    ("head injury", "Neurologist"),
    ("eye injury", "Ophthalmologist"),
    ("poison", "Toxicologist or Emergency Medicine Specialist"),
    ("allergic", "Allergist/Immunologist"),
    ("cardiac", "Cardiologist"),
];

const FOLLOW_UP: &[(&str, &str)] = &[
    ("minor cut", "Monitor for infection. Return in 7 days for suture removal."),
    ("moderate burn", "Apply topical treatment daily. Follow up in 3-5 days."),
    ("sprain", "Continue RICE protocol. Follow up in 5-7 days."),
    ("fracture", "Immobilize and seek immediate x-ray. Follow up weekly."),
    ("allergic reaction", "Avoid allergen. Follow up with allergist in 1-2 weeks."),
];

/// A phone line shown in emergency mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub purpose: &'static str,
}

pub const EMERGENCY_CONTACTS: [EmergencyContact; 3] = [
    EmergencyContact {
        name: "Emergency Number",
        number: "911",
        purpose: "Call immediately for life-threatening situations",
    },
    EmergencyContact {
        name: "Poison Control",
        number: "1-800-222-1222",
        purpose: "For poisoning emergencies",
    },
    EmergencyContact {
        name: "Crisis Hotline",
        number: "988",
        purpose: "Mental health crisis support",
    },
];

/// What to do right away in emergency mode
pub const EMERGENCY_INSTRUCTIONS: &[&str] = &[
    "CALL 911 or your local emergency number",
    "Stay calm and provide clear information",
    "Follow dispatcher instructions",
    "Do not hang up until instructed",
    "Provide location, nature of emergency, and any relevant medical history",
];

/// What to do while help is on the way
pub const WHILE_WAITING: &[&str] = &[
    "Ensure the person's safety",
    "Monitor breathing and consciousness",
    "Perform CPR if trained and person is unresponsive",
    "Do not move the person unnecessarily",
    "Keep them calm and comfortable",
];

/// Emergency types offered in emergency mode, in menu order
pub const EMERGENCY_TYPES: &[&str] = &[
    "Severe bleeding",
    "Unconsciousness",
    "Chest pain",
    "Difficulty breathing",
    "Severe burns",
    "Choking",
    "Anaphylaxis/Allergic reaction",
    "Stroke symptoms",
    "Heart attack",
    "Poisoning",
    "Other",
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    let key = key.trim().to_lowercase();
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Specialist to consult for an injury type, matched on the whole lowercased name
pub fn specialist_for(injury_type: &str) -> &'static str {
    lookup(SPECIALISTS, injury_type).unwrap_or(DEFAULT_SPECIALIST)
}

/// Follow-up care advice for an injury type
pub fn follow_up_for(injury_type: &str) -> &'static str {
    lookup(FOLLOW_UP, injury_type).unwrap_or(DEFAULT_FOLLOW_UP)
}

/// Map search link for a specialist near the user or near a named location
pub fn find_nearby_url(specialist: &str, location: Option<&str>) -> String {
    let query = match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(location) => format!("{} near {}", specialist, location),
        None => format!("{} near me", specialist),
    };
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}{}", MAPS_SEARCH_URL, encoded)
}

/// Colored marker for a severity label
pub fn severity_indicator(severity: &str) -> &'static str {
    match severity.trim().to_lowercase().as_str() {
        "mild" => "🟢",
        "moderate" => "🟡",
        "severe" => "🔴",
        _ => "⚪",
    }
}

/// Format a 0..1 confidence score as a percentage with one decimal
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
