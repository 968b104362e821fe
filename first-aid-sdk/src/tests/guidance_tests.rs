//! Tests for the static reference guidance

#[cfg(test)]
mod tests {
    use crate::guidance::{
        find_nearby_url, follow_up_for, format_confidence, severity_indicator, specialist_for,
        DEFAULT_FOLLOW_UP, DEFAULT_SPECIALIST, EMERGENCY_CONTACTS, EMERGENCY_TYPES,
    };

    #[test]
    fn test_specialist_lookup() {
        assert_eq!(specialist_for("Burn"), "Dermatologist or Burn Specialist");
        assert_eq!(specialist_for("head injury"), "Neurologist");
        assert_eq!(specialist_for("CARDIAC"), "Cardiologist");
        // whole-name match only
        assert_eq!(specialist_for("Burns"), DEFAULT_SPECIALIST);
        assert_eq!(specialist_for(""), DEFAULT_SPECIALIST);
    }

    #[test]
    fn test_follow_up_lookup() {
        assert_eq!(
            follow_up_for("Fracture"),
            "Immobilize and seek immediate x-ray. Follow up weekly."
        );
        assert_eq!(
            follow_up_for("allergic reaction"),
            "Avoid allergen. Follow up with allergist in 1-2 weeks."
        );
        assert_eq!(follow_up_for("Shock"), DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_find_nearby_url() {
        assert_eq!(
            find_nearby_url("Orthopedic Surgeon", None),
            "https://www.google.com/maps/search/Orthopedic+Surgeon+near+me"
        );
        assert_eq!(
            find_nearby_url("Allergist/Immunologist", Some("Austin, TX")),
            "https://www.google.com/maps/search/Allergist%2FImmunologist+near+Austin%2C+TX"
        );
        assert_eq!(
            find_nearby_url("Neurologist", Some("  ")),
            "https://www.google.com/maps/search/Neurologist+near+me"
        );
    }

    #[test]
    fn test_severity_indicator() {
        assert_eq!(severity_indicator("Mild"), "🟢");
        assert_eq!(severity_indicator("moderate"), "🟡");
        assert_eq!(severity_indicator("SEVERE"), "🔴");
        assert_eq!(severity_indicator("unknown"), "⚪");
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.873), "87.3%");
        assert_eq!(format_confidence(0.0), "0.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
    }

    #[test]
    fn test_emergency_tables() {
        let numbers: Vec<&str> = EMERGENCY_CONTACTS.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec!["911", "1-800-222-1222", "988"]);
        assert_eq!(EMERGENCY_TYPES.first(), Some(&"Severe bleeding"));
        assert_eq!(EMERGENCY_TYPES.last(), Some(&"Other"));
        assert_eq!(EMERGENCY_TYPES.len(), 11);
    }
}
