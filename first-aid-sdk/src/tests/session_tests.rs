//! Tests for the voice wizard and session context

#[cfg(test)]
mod tests {
    use crate::classifier::{InjuryCategory, Severity};
    use crate::services::first_aid::{AgeGroup, ImageAnalysis};
    use crate::session::{
        AssistantSession, QuickAction, SessionError, SessionEvent, VoiceEvent, VoiceFlow,
    };

    fn awaiting_confirmation(text: &str) -> VoiceFlow {
        VoiceFlow::Idle
            .transition(VoiceEvent::StartRecording)
            .unwrap()
            .transition(VoiceEvent::TranscriptReady(text.to_string()))
            .unwrap()
    }

    #[test]
    fn test_happy_path_to_confirmed() {
        let flow = awaiting_confirmation("I burned my hand on the stove");

        let (transcription, classification) = flow.pending().unwrap();
        assert_eq!(transcription, "I burned my hand on the stove");
        assert_eq!(classification.injury_category, InjuryCategory::Burns);

        let flow = flow.transition(VoiceEvent::Confirm).unwrap();
        let report = flow.confirmed().unwrap();
        assert_eq!(report.transcription, "I burned my hand on the stove");
        assert_eq!(report.classification.body_area.as_deref(), Some("Hand"));

        let flow = flow.transition(VoiceEvent::Reset).unwrap();
        assert_eq!(flow, VoiceFlow::Idle);
    }

    #[test]
    fn test_blank_transcript_keeps_waiting() {
        let flow = VoiceFlow::AwaitingRecording
            .transition(VoiceEvent::TranscriptReady("   ".to_string()))
            .unwrap();
        assert_eq!(flow, VoiceFlow::AwaitingRecording);
    }

    #[test]
    fn test_retry_and_cancel() {
        let flow = awaiting_confirmation("cut finger")
            .transition(VoiceEvent::Retry)
            .unwrap();
        assert_eq!(flow, VoiceFlow::AwaitingRecording);

        let flow = flow.transition(VoiceEvent::Cancel).unwrap();
        assert_eq!(flow, VoiceFlow::Idle);

        let flow = awaiting_confirmation("cut finger")
            .transition(VoiceEvent::Cancel)
            .unwrap();
        assert_eq!(flow, VoiceFlow::Idle);
    }

    #[test]
    fn test_invalid_transitions() {
        let err = VoiceFlow::Idle.transition(VoiceEvent::Confirm).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                state: "idle",
                event: "confirm",
            }
        );

        assert!(VoiceFlow::Idle
            .transition(VoiceEvent::TranscriptReady("cut".to_string()))
            .is_err());
        assert!(VoiceFlow::AwaitingRecording
            .transition(VoiceEvent::Confirm)
            .is_err());
        assert!(awaiting_confirmation("cut")
            .transition(VoiceEvent::StartRecording)
            .is_err());

        let confirmed = awaiting_confirmation("cut")
            .transition(VoiceEvent::Confirm)
            .unwrap();
        let err = confirmed.transition(VoiceEvent::Cancel).unwrap_err();
        assert_eq!(err.to_string(), "Cannot apply cancel while confirmed");
    }

    #[test]
    fn test_report_builds_guidance_request() {
        let report = awaiting_confirmation("severe bleeding from the leg, can't breathe")
            .transition(VoiceEvent::Confirm)
            .unwrap()
            .confirmed()
            .cloned()
            .unwrap();

        assert!(report.is_emergency());

        let request = report.guidance_request(None);
        assert_eq!(request.injury_type, "Cuts and Wounds");
        assert_eq!(request.severity, "Severe");
        assert_eq!(request.affected_area.as_deref(), Some("Leg"));
        assert_eq!(request.age_group, None);

        let request = report.guidance_request(Some(AgeGroup::Elder));
        assert_eq!(request.age_group, Some(AgeGroup::Elder));
    }

    #[test]
    fn test_report_without_body_area() {
        let report = awaiting_confirmation("it hurts a little")
            .transition(VoiceEvent::Confirm)
            .unwrap()
            .confirmed()
            .cloned()
            .unwrap();

        assert_eq!(report.classification.severity, Severity::Mild);
        let params = report.guidance_request(None).to_query_params();
        assert!(!params.contains_key("affected_area"));
        assert_eq!(params["injury_type"], "General Injury");
        // left for the client to fill from its configuration
        assert!(!params.contains_key("age_group"));
    }

    #[test]
    fn test_session_defaults() {
        let session = AssistantSession::new();
        assert_eq!(session.selected_action, None);
        assert_eq!(session.voice, VoiceFlow::Idle);
        assert!(session.last_analysis.is_none());
        assert!(!session.emergency_mode);
        assert_eq!(session.language, "en");
    }

    #[test]
    fn test_session_voice_flow() {
        let session = AssistantSession::new()
            .apply(SessionEvent::SelectAction(QuickAction::Type))
            .unwrap()
            .apply(SessionEvent::Voice(VoiceEvent::StartRecording))
            .unwrap()
            .apply(SessionEvent::Voice(VoiceEvent::TranscriptReady(
                "small cut on my finger".to_string(),
            )))
            .unwrap()
            .apply(SessionEvent::Voice(VoiceEvent::Confirm))
            .unwrap();

        assert_eq!(session.selected_action, Some(QuickAction::Type));
        let report = session.voice.confirmed().unwrap();
        assert_eq!(report.classification.injury_category, InjuryCategory::CutsAndWounds);
        assert_eq!(report.classification.severity, Severity::Mild);

        let session = session.apply(SessionEvent::BackToMenu).unwrap();
        assert_eq!(session.selected_action, None);
        assert_eq!(session.voice, VoiceFlow::Idle);
    }

    #[test]
    fn test_session_rejects_invalid_voice_event() {
        let result = AssistantSession::new().apply(SessionEvent::Voice(VoiceEvent::Retry));
        assert!(matches!(result, Err(SessionError::InvalidTransition { .. })));
    }

    #[test]
    fn test_session_emergency_mode() {
        let session = AssistantSession::new()
            .apply(SessionEvent::SelectAction(QuickAction::Emergency))
            .unwrap();
        assert!(session.emergency_mode);

        let session = session.apply(SessionEvent::SetEmergencyMode(false)).unwrap();
        assert!(!session.emergency_mode);

        let analysis = ImageAnalysis {
            injury_type: Some("Burns".to_string()),
            is_emergency: true,
            ..ImageAnalysis::default()
        };
        let session = session
            .apply(SessionEvent::AnalysisReceived(analysis))
            .unwrap();
        assert!(session.emergency_mode);
        assert!(session.last_analysis.is_some());

        let session = session
            .apply(SessionEvent::ClearAnalysis)
            .unwrap()
            .apply(SessionEvent::SetLanguage("es".to_string()))
            .unwrap();
        assert!(session.last_analysis.is_none());
        assert_eq!(session.language, "es");
    }
}
