//! Core abstractions for the first-aid SDK
//!
//! `FirstAidApi` is the seam between the guidance flows and the HTTP client.
//! [`FirstAidClient`](crate::services::first_aid::FirstAidClient) implements
//! it; tests substitute a mock.

use async_trait::async_trait;

use crate::error::Result;
use crate::services::first_aid::{
    AgeGroup, EmergencyGuidance, FirstAidGuidance, GuidanceRequest, ImageAnalysis, PreventionTips,
    Transcription, Upload,
};

/// Backend operations used by the guidance flows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FirstAidApi: Send + Sync {
    /// True only when the backend answers its health probe with HTTP 200
    async fn health_check(&self) -> bool;

    /// Analyze an injury photo
    async fn analyze_image(&self, image: Upload, age_group: Option<AgeGroup>) -> Result<ImageAnalysis>;

    /// Generate first-aid steps
    async fn generate_guidance(&self, request: &GuidanceRequest) -> Result<FirstAidGuidance>;

    /// Emergency checklist for an injury type
    async fn emergency_guidance(&self, injury_type: &str) -> Result<EmergencyGuidance>;

    /// Prevention tips for an injury type
    async fn prevention_tips(&self, injury_type: &str) -> Result<PreventionTips>;

    /// Transcribe recorded audio
    async fn transcribe_audio(&self, audio: Upload) -> Result<Transcription>;
}
