//! End-to-end flows combining the classifier, the voice wizard and the backend

use log::{debug, info};

use crate::classifier::ClassificationResult;
use crate::core::FirstAidApi;
use crate::error::{Result, ServiceError};
use crate::services::first_aid::{AgeGroup, EmergencyGuidance, FirstAidGuidance, Upload};
use crate::session::{ConfirmedReport, SessionError, VoiceEvent, VoiceFlow};

/// Guidance produced for one confirmed description
#[derive(Debug, Clone)]
pub struct GuidanceOutcome {
    pub report: ConfirmedReport,
    pub guidance: FirstAidGuidance,
    /// Present only when the text was flagged as an emergency
    pub emergency: Option<EmergencyGuidance>,
}

impl GuidanceOutcome {
    pub fn classification(&self) -> &ClassificationResult {
        &self.report.classification
    }
}

/// Drive the wizard from idle to confirmed for `text`, accepting the classification as-is
pub fn confirm_text(text: &str) -> std::result::Result<ConfirmedReport, SessionError> {
    let flow = VoiceFlow::Idle
        .transition(VoiceEvent::StartRecording)?
        .transition(VoiceEvent::TranscriptReady(text.to_string()))?
        .transition(VoiceEvent::Confirm)?;

    match flow {
        VoiceFlow::Confirmed(report) => Ok(report),
        other => Err(SessionError::InvalidTransition {
            state: other.name(),
            event: VoiceEvent::Confirm.name(),
        }),
    }
}

/// Fetch guidance for a confirmed report, adding the emergency checklist when flagged
pub async fn guidance_for_report<A>(api: &A, report: ConfirmedReport, age_group: Option<AgeGroup>) -> Result<GuidanceOutcome>
where
    A: FirstAidApi + ?Sized,
{
    let request = report.guidance_request(age_group);
    debug!(
        "Requesting guidance: injury_type={}, severity={}",
        request.injury_type, request.severity
    );

    let guidance = api.generate_guidance(&request).await?;

    let emergency = if report.is_emergency() {
        info!("Emergency language detected, fetching emergency checklist");
        Some(api.emergency_guidance(&request.injury_type).await?)
    } else {
        None
    };

    Ok(GuidanceOutcome {
        report,
        guidance,
        emergency,
    })
}

/// Classify typed text, confirm it and fetch guidance
pub async fn guidance_for_text<A>(api: &A, text: &str, age_group: Option<AgeGroup>) -> Result<GuidanceOutcome>
where
    A: FirstAidApi + ?Sized,
{
    let report = confirm_text(text).map_err(|e| ServiceError::validation(e.to_string()))?;
    guidance_for_report(api, report, age_group).await
}

/// Transcribe audio, then continue as for typed text
pub async fn guidance_for_audio<A>(api: &A, audio: Upload, age_group: Option<AgeGroup>) -> Result<GuidanceOutcome>
where
    A: FirstAidApi + ?Sized,
{
    let transcription = api.transcribe_audio(audio).await?;
    guidance_for_text(api, transcription.text(), age_group).await
}
