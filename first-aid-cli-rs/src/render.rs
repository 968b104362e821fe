//! Plain-text rendering of SDK results

use std::fmt::Write;

use first_aid_sdk::flow::GuidanceOutcome;
use first_aid_sdk::guidance::{
    find_nearby_url, follow_up_for, format_confidence, severity_indicator, specialist_for,
    EMERGENCY_CONTACTS, EMERGENCY_INSTRUCTIONS, EMERGENCY_TYPES, WHILE_WAITING,
};
use first_aid_sdk::{
    ClassificationResult, EmergencyGuidance, ErrorKind, FirstAidGuidance, FirstAidStep,
    ImageAnalysis, ServiceError,
};

pub fn classification(result: &ClassificationResult) -> String {
    let mut out = String::new();
    let status = if result.is_emergency { "🚨 EMERGENCY" } else { "Standard" };

    let _ = writeln!(out, "Injury Type: {}", result.injury_category);
    let _ = writeln!(
        out,
        "Severity:    {} {}",
        severity_indicator(result.severity.label()),
        result.severity
    );
    let _ = writeln!(out, "Status:      {}", status);
    if let Some(ref area) = result.body_area {
        let _ = writeln!(out, "Affected Area: {}", area);
    }
    out
}

pub fn steps(steps: &[FirstAidStep]) -> String {
    if steps.is_empty() {
        return "No first aid steps available.\n".to_string();
    }

    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        match step {
            FirstAidStep::Detailed {
                order,
                title,
                description,
                warning,
                duration,
            } => {
                let number = order.map(|o| o as usize).unwrap_or(index + 1);
                let _ = writeln!(out, "Step {}: {}", number, title);
                if !description.is_empty() {
                    let _ = writeln!(out, "    {}", description);
                }
                if let Some(warning) = warning.as_deref().filter(|w| !w.is_empty()) {
                    let _ = writeln!(out, "    ⚠️ Warning: {}", warning);
                }
                if let Some(duration) = duration.as_deref().filter(|d| !d.is_empty()) {
                    let _ = writeln!(out, "    ⏱️ Duration: {}", duration);
                }
            }
            FirstAidStep::Text(text) => {
                let _ = writeln!(out, "• {}", text);
            }
        }
    }
    out
}

pub fn guidance(guidance: &FirstAidGuidance) -> String {
    let mut out = String::from("First Aid Steps\n");
    out.push_str(&steps(&guidance.first_aid_steps));
    if let Some(help) = guidance.professional_help.as_deref().filter(|h| !h.is_empty()) {
        let _ = writeln!(out, "\nWhen to Seek Professional Help\n{}", help);
    }
    out
}

pub fn emergency(guidance: &EmergencyGuidance) -> String {
    let mut out = String::from("Emergency Instructions\n");
    for (i, step) in guidance.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }
    if !guidance.do_not.is_empty() {
        out.push_str("\nDo NOT:\n");
        for item in &guidance.do_not {
            let _ = writeln!(out, "❌ {}", item);
        }
    }
    out
}

pub fn analysis(analysis: &ImageAnalysis) -> String {
    let mut out = String::from("Injury Analysis\n");
    let severity = analysis.severity.as_deref().unwrap_or("Unknown");

    let _ = writeln!(out, "Injury Type:   {}", analysis.injury_type.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(out, "Severity:      {} {}", severity_indicator(severity), severity);
    let _ = writeln!(out, "Affected Area: {}", analysis.affected_area.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(out, "Confidence:    {}", format_confidence(analysis.confidence_score));

    if analysis.is_emergency {
        out.push_str("\n🚨 THIS IS AN EMERGENCY SITUATION. CALL 911 IMMEDIATELY.\n");
    }

    if !analysis.first_aid_steps.is_empty() {
        out.push_str("\nFirst Aid Steps\n");
        out.push_str(&steps(&analysis.first_aid_steps));
    }

    if let Some(help) = analysis.professional_help.as_deref().filter(|h| !h.is_empty()) {
        let _ = writeln!(out, "\nWhen to Seek Professional Help\n{}", help);
    }

    if let Some(ref age) = analysis.age_guidance {
        let _ = writeln!(
            out,
            "\nAge-Specific Guidance ({})",
            analysis.age_group.as_deref().unwrap_or("Unknown")
        );
        for item in &age.special_considerations {
            let _ = writeln!(out, "• {}", item);
        }
        for warning in &age.warnings {
            let _ = writeln!(out, "⚠️ {}", warning);
        }
    }
    out
}

pub fn outcome(outcome: &GuidanceOutcome) -> String {
    let mut out = classification(outcome.classification());
    if let Some(ref emergency_guidance) = outcome.emergency {
        out.push('\n');
        out.push_str(&emergency(emergency_guidance));
    }
    out.push('\n');
    out.push_str(&guidance(&outcome.guidance));
    out
}

pub fn emergency_mode() -> String {
    let mut out = String::from(
        "🚨 EMERGENCY MODE ACTIVATED 🚨\n\
         CALL 911 IMMEDIATELY\n\
         This app provides guidance only and is NOT a substitute for emergency services.\n\n",
    );

    for contact in EMERGENCY_CONTACTS.iter() {
        let _ = writeln!(out, "{:<17} {:<15} {}", contact.name, contact.number, contact.purpose);
    }

    out.push_str("\nEmergency Instructions:\n");
    for (i, instruction) in EMERGENCY_INSTRUCTIONS.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, instruction);
    }

    out.push_str("\nWhile Waiting for Emergency Services:\n");
    for item in WHILE_WAITING {
        let _ = writeln!(out, "- {}", item);
    }

    out.push_str("\nEmergency types (use `first-aid emergency <type>`):\n");
    for kind in EMERGENCY_TYPES {
        let _ = writeln!(out, "  {}", kind);
    }
    out
}

pub fn specialist(injury_type: &str, severity: Option<&str>, location: Option<&str>) -> String {
    let name = specialist_for(injury_type);
    let mut out = String::new();

    let _ = writeln!(out, "Recommended Specialist: {}", name);
    if let Some(severity) = severity {
        let _ = writeln!(out, "For a {} {}", severity, injury_type);
    }
    let _ = writeln!(out, "Find nearby: {}", find_nearby_url(name, location));
    let _ = writeln!(out, "Follow-Up Care: {}", follow_up_for(injury_type));
    out
}

/// One-line description of a failed call
pub fn error(err: &ServiceError) -> String {
    match err.kind() {
        ErrorKind::Unreachable | ErrorKind::Timeout | ErrorKind::HttpStatus => format!("❌ {}", err),
        ErrorKind::Unexpected => format!("❌ Unexpected error: {}", err),
    }
}
