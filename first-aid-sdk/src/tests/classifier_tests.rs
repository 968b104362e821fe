//! Tests for the text classifier

#[cfg(test)]
mod tests {
    use crate::classifier::{
        classify, detect_emergency, extract_body_area, extract_injury_category, extract_severity,
        ClassificationResult, InjuryCategory, Severity,
    };

    #[test]
    fn test_empty_text_uses_defaults() {
        let result = classify("");
        assert_eq!(
            result,
            ClassificationResult {
                injury_category: InjuryCategory::GeneralInjury,
                severity: Severity::Moderate,
                is_emergency: false,
                body_area: None,
            }
        );
    }

    #[test]
    fn test_burned_hand() {
        let result = classify("I burned my hand on the stove");
        assert_eq!(result.injury_category, InjuryCategory::Burns);
        assert_eq!(result.body_area.as_deref(), Some("Hand"));
        assert_eq!(result.severity, Severity::Moderate);
        assert!(!result.is_emergency);
    }

    #[test]
    fn test_severe_bleeding_leg() {
        let result = classify("severe bleeding from the leg, can't breathe");

        // "bleeding" in the first rule wins over "severe bleed" further down
        assert_eq!(result.injury_category, InjuryCategory::CutsAndWounds);
        assert_eq!(result.severity, Severity::Severe);
        assert!(result.is_emergency);
        assert_eq!(result.body_area.as_deref(), Some("Leg"));
    }

    #[test]
    fn test_mild_headache() {
        let result = classify("mild headache");
        assert_eq!(result.injury_category, InjuryCategory::HeadInjury);
        assert_eq!(result.severity, Severity::Mild);
        assert!(!result.is_emergency);
        assert_eq!(result.body_area.as_deref(), Some("Head"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(extract_injury_category("BROKEN ARM"), InjuryCategory::Fractures);
        assert_eq!(extract_severity("It is EXTREMELY painful"), Severity::Severe);
        assert!(detect_emergency("CALL 911 NOW"));
        assert_eq!(extract_body_area("My KNEE hurts").as_deref(), Some("Knee"));
    }

    #[test]
    fn test_substring_matching_is_raw() {
        // "ear" is found inside "near"
        assert_eq!(extract_body_area("it happened near the door").as_deref(), Some("Ear"));
        // "hot" is found inside "shot"
        assert_eq!(extract_injury_category("he got a shot"), InjuryCategory::Burns);
    }

    #[test]
    fn test_category_rule_order() {
        assert_eq!(extract_injury_category("arterial gushing"), InjuryCategory::SevereBleeding);
        assert_eq!(extract_injury_category("she is choking"), InjuryCategory::Choking);
        assert_eq!(extract_injury_category("he swallowed bleach"), InjuryCategory::Poisoning);
        assert_eq!(extract_injury_category("itchy rash"), InjuryCategory::AllergicReaction);
        assert_eq!(extract_injury_category("looks pale"), InjuryCategory::Shock);
        assert_eq!(extract_injury_category("twisted it"), InjuryCategory::GeneralInjury);
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(extract_severity("a minor scrape"), Severity::Mild);
        assert_eq!(extract_severity("significant swelling"), Severity::Moderate);
        // severe keywords are checked before mild ones
        assert_eq!(extract_severity("slight but critical"), Severity::Severe);
        assert_eq!(extract_severity("it hurts"), Severity::Moderate);
    }

    #[test]
    fn test_emergency_is_independent_of_severity() {
        // severe tier without emergency language
        let text = "very bad bruise";
        assert_eq!(extract_severity(text), Severity::Severe);
        assert!(!detect_emergency(text));

        // emergency language without a severe tier
        let text = "grandpa may be having a stroke";
        assert_eq!(extract_severity(text), Severity::Moderate);
        assert!(detect_emergency(text));
    }

    #[test]
    fn test_body_area_order() {
        assert_eq!(extract_body_area("my eyes sting").as_deref(), Some("Eye"));
        assert_eq!(extract_body_area("toes and feet").as_deref(), Some("Feet"));
        assert_eq!(extract_body_area("something hurts"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(InjuryCategory::CutsAndWounds.to_string(), "Cuts and Wounds");
        assert_eq!(InjuryCategory::AllergicReaction.label(), "Allergic Reaction");
        assert_eq!(InjuryCategory::GeneralInjury.to_string(), "General Injury");
        assert_eq!(Severity::Severe.to_string(), "Severe");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let samples = [
            "",
            "I burned my hand on the stove",
            "unconscious and not breathing",
            "small cut on my finger",
        ];

        for text in samples {
            assert_eq!(classify(text), classify(text));
        }
    }
}
