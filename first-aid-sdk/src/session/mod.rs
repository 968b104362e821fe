//! Voice wizard state machine and assistant session context
//!
//! Both are plain values: each handler takes the current value, applies one
//! event and returns the next value. Nothing is shared or global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{classify, ClassificationResult};
use crate::services::first_aid::{AgeGroup, GuidanceRequest, ImageAnalysis};

/// Errors raised while driving the wizard or the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot apply {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

/// Signals the user confirmed at the end of the voice wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedReport {
    pub transcription: String,
    pub classification: ClassificationResult,
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmedReport {
    /// Build the guidance request for this report
    pub fn guidance_request(&self, age_group: Option<AgeGroup>) -> GuidanceRequest {
        let classification = &self.classification;
        let mut request = GuidanceRequest::new(
            classification.injury_category.label(),
            classification.severity.label(),
        );

        if let Some(age_group) = age_group {
            request = request.age_group(age_group);
        }
        if let Some(ref area) = classification.body_area {
            request = request.affected_area(area.clone());
        }

        request
    }

    pub fn is_emergency(&self) -> bool {
        self.classification.is_emergency
    }
}

/// Input to the voice wizard
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEvent {
    StartRecording,
    /// Text from the transcription endpoint or typed by the user
    TranscriptReady(String),
    Confirm,
    Retry,
    Cancel,
    Reset,
}

impl VoiceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            VoiceEvent::StartRecording => "start-recording",
            VoiceEvent::TranscriptReady(_) => "transcript-ready",
            VoiceEvent::Confirm => "confirm",
            VoiceEvent::Retry => "retry",
            VoiceEvent::Cancel => "cancel",
            VoiceEvent::Reset => "reset",
        }
    }
}

/// The four-state voice wizard
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VoiceFlow {
    #[default]
    Idle,
    AwaitingRecording,
    AwaitingConfirmation {
        transcription: String,
        classification: ClassificationResult,
    },
    Confirmed(ConfirmedReport),
}

impl VoiceFlow {
    pub fn name(&self) -> &'static str {
        match self {
            VoiceFlow::Idle => "idle",
            VoiceFlow::AwaitingRecording => "awaiting-recording",
            VoiceFlow::AwaitingConfirmation { .. } => "awaiting-confirmation",
            VoiceFlow::Confirmed(_) => "confirmed",
        }
    }

    /// Apply one event, classifying the transcript when it arrives
    pub fn transition(self, event: VoiceEvent) -> Result<VoiceFlow, SessionError> {
        match (self, event) {
            (VoiceFlow::Idle, VoiceEvent::StartRecording) => Ok(VoiceFlow::AwaitingRecording),

            (VoiceFlow::AwaitingRecording, VoiceEvent::TranscriptReady(text)) => {
                if text.trim().is_empty() {
                    return Ok(VoiceFlow::AwaitingRecording);
                }
                let classification = classify(&text);
                Ok(VoiceFlow::AwaitingConfirmation {
                    transcription: text,
                    classification,
                })
            }

            (
                VoiceFlow::AwaitingConfirmation {
                    transcription,
                    classification,
                },
                VoiceEvent::Confirm,
            ) => Ok(VoiceFlow::Confirmed(ConfirmedReport {
                transcription,
                classification,
                confirmed_at: Utc::now(),
            })),

            (VoiceFlow::AwaitingConfirmation { .. }, VoiceEvent::Retry) => {
                Ok(VoiceFlow::AwaitingRecording)
            }

            (VoiceFlow::AwaitingRecording, VoiceEvent::Cancel)
            | (VoiceFlow::AwaitingConfirmation { .. }, VoiceEvent::Cancel)
            | (VoiceFlow::Confirmed(_), VoiceEvent::Reset) => Ok(VoiceFlow::Idle),

            (state, event) => Err(SessionError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }

    /// Classification awaiting confirmation, if any
    pub fn pending(&self) -> Option<(&str, &ClassificationResult)> {
        match self {
            VoiceFlow::AwaitingConfirmation {
                transcription,
                classification,
            } => Some((transcription, classification)),
            _ => None,
        }
    }

    pub fn confirmed(&self) -> Option<&ConfirmedReport> {
        match self {
            VoiceFlow::Confirmed(report) => Some(report),
            _ => None,
        }
    }
}

/// Quick action picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAction {
    Emergency,
    Record,
    Type,
    Upload,
}

/// Events handled by [`AssistantSession::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectAction(QuickAction),
    /// Leave the current action and reset the voice wizard
    BackToMenu,
    Voice(VoiceEvent),
    AnalysisReceived(ImageAnalysis),
    ClearAnalysis,
    SetEmergencyMode(bool),
    SetLanguage(String),
}

/// Per-user context carried between handlers
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSession {
    pub selected_action: Option<QuickAction>,
    pub voice: VoiceFlow,
    pub last_analysis: Option<ImageAnalysis>,
    pub emergency_mode: bool,
    pub language: String,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self {
            selected_action: None,
            voice: VoiceFlow::Idle,
            last_analysis: None,
            emergency_mode: false,
            language: "en".to_string(),
        }
    }
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the next session
    pub fn apply(mut self, event: SessionEvent) -> Result<AssistantSession, SessionError> {
        match event {
            SessionEvent::SelectAction(action) => {
                if action == QuickAction::Emergency {
                    self.emergency_mode = true;
                }
                self.selected_action = Some(action);
            }
            SessionEvent::BackToMenu => {
                self.selected_action = None;
                self.voice = VoiceFlow::Idle;
            }
            SessionEvent::Voice(voice_event) => {
                self.voice = self.voice.transition(voice_event)?;
            }
            SessionEvent::AnalysisReceived(analysis) => {
                if analysis.is_emergency {
                    self.emergency_mode = true;
                }
                self.last_analysis = Some(analysis);
            }
            SessionEvent::ClearAnalysis => self.last_analysis = None,
            SessionEvent::SetEmergencyMode(enabled) => self.emergency_mode = enabled,
            SessionEvent::SetLanguage(language) => self.language = language,
        }

        Ok(self)
    }
}
