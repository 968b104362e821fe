//! # First-Aid SDK
//!
//! Client side of the first-aid assistant.
//!
//! This crate provides:
//!
//! - A typed client for the analysis backend with per-call timeouts
//! - A uniform error taxonomy (`Unreachable`, `Timeout`, `HttpStatus`, `Unexpected`)
//! - Keyword-based triage of free-text injury descriptions
//! - The voice wizard state machine and session context
//! - Static reference guidance (specialists, emergency contacts)
//! - Configuration management utilities
//!
//! ## Architecture
//!
//! - `FirstAidClient`: one method per backend endpoint
//! - `FirstAidApi`: the trait the guidance flows are written against
//! - `classifier`: pure text triage, independent of the client
//! - `session`: `VoiceFlow` and `AssistantSession`, plain values driven by events
//! - `ServiceError`: every failure a caller can observe

pub mod core;
pub use crate::core::FirstAidApi;

pub mod services;
pub use services::first_aid::{
    AgeGroup, EmergencyGuidance, FirstAidClient, FirstAidClientBuilder, FirstAidGuidance,
    FirstAidStep, GuidanceRequest, ImageAnalysis, PreventionTips, Transcription, Upload,
};
pub use services::UserAgent;

pub mod error;
pub use error::{ErrorKind, Result, ServiceError};

pub mod config;
pub use config::{BackendConfig, ConfigProvider, ServiceConfig};

pub mod classifier;
pub use classifier::{classify, ClassificationResult, InjuryCategory, Severity};

pub mod session;
pub use session::{AssistantSession, ConfirmedReport, SessionError, SessionEvent, VoiceEvent, VoiceFlow};

pub mod flow;
pub mod guidance;

// Utility module for common functionality
pub mod util;

#[cfg(test)]
mod tests;

/// Create a new client builder
pub fn client() -> FirstAidClientBuilder {
    FirstAidClient::builder()
}
