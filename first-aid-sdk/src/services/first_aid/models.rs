//! First-aid backend data models
//!
//! Request parameters, upload payloads and the typed `data` payloads of the
//! backend's JSON envelope.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ServiceError};

/// Patient age group sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Infant,
    Child,
    Adolescent,
    #[default]
    Adult,
    Elder,
    Unknown,
}

impl AgeGroup {
    /// All age groups in menu order
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Infant,
        AgeGroup::Child,
        AgeGroup::Adolescent,
        AgeGroup::Adult,
        AgeGroup::Elder,
        AgeGroup::Unknown,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Infant => "infant",
            AgeGroup::Child => "child",
            AgeGroup::Adolescent => "adolescent",
            AgeGroup::Adult => "adult",
            AgeGroup::Elder => "elder",
            AgeGroup::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        AgeGroup::ALL
            .iter()
            .copied()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| ServiceError::validation(format!("Unknown age group: {}", s)))
    }
}

/// Parameters for `POST /first-aid/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceRequest {
    /// Injury type label, e.g. "Burns"
    pub injury_type: String,

    /// Severity label, e.g. "Moderate"
    pub severity: String,

    /// Body area, omitted from the request when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<String>,

    /// Age group, the client's configured default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
}

impl GuidanceRequest {
    /// Create a request with no affected area or age group
    pub fn new(injury_type: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            injury_type: injury_type.into(),
            severity: severity.into(),
            affected_area: None,
            age_group: None,
        }
    }

    /// Set the affected area
    pub fn affected_area(mut self, area: impl Into<String>) -> Self {
        self.affected_area = Some(area.into());
        self
    }

    /// Set the age group
    pub fn age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    /// Convert to query parameters for the request
    pub fn to_query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();

        params.insert("injury_type".to_string(), self.injury_type.clone());
        params.insert("severity".to_string(), self.severity.clone());

        if let Some(age_group) = self.age_group {
            params.insert("age_group".to_string(), age_group.to_string());
        }

        if let Some(ref area) = self.affected_area {
            if !area.is_empty() {
                params.insert("affected_area".to_string(), area.clone());
            }
        }

        params
    }
}

/// A file sent as the multipart field `file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Upload {
    /// Build an upload from in-memory bytes, guessing the MIME type from the name
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name).to_string();
        Self {
            file_name,
            bytes: bytes.into(),
            mime_type,
        }
    }

    /// Read an upload from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ServiceError::validation(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::from_bytes(file_name, bytes))
    }

    /// Override the guessed MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Convert into a multipart form with a single `file` part
    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form> {
        if self.is_empty() {
            return Err(ServiceError::validation(format!(
                "Refusing to upload empty file {}",
                self.file_name
            )));
        }

        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| ServiceError::validation(format!("Invalid MIME type: {}", e)))?;

        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

/// Guess a MIME type from a file extension
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// One first-aid step, either structured or a bare sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FirstAidStep {
    Detailed {
        #[serde(default)]
        order: Option<u32>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<String>,
    },
    Text(String),
}

impl FirstAidStep {
    /// Title for structured steps, the sentence itself otherwise
    pub fn title(&self) -> &str {
        match self {
            FirstAidStep::Detailed { title, .. } => title,
            FirstAidStep::Text(text) => text,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            FirstAidStep::Detailed { warning, .. } => warning.as_deref().filter(|w| !w.is_empty()),
            FirstAidStep::Text(_) => None,
        }
    }
}

/// Age-specific notes attached to an image analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeGuidance {
    #[serde(default)]
    pub special_considerations: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Result of `POST /analyze/image`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub injury_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub affected_area: Option<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub first_aid_steps: Vec<FirstAidStep>,
    #[serde(default)]
    pub professional_help: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub age_guidance: Option<AgeGuidance>,
}

/// Result of `POST /first-aid/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstAidGuidance {
    #[serde(default)]
    pub first_aid_steps: Vec<FirstAidStep>,
    #[serde(default)]
    pub professional_help: Option<String>,
}

/// Result of `GET /first-aid/emergency/{injury_type}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyGuidance {
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub do_not: Vec<String>,
}

/// Result of `GET /first-aid/prevention/{injury_type}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreventionTips {
    #[serde(default)]
    pub prevention_tips: Vec<String>,
}

/// Result of `POST /voice-input/transcribe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transcription {
    Plain(String),
    Detailed {
        text: String,
        #[serde(flatten)]
        extra: HashMap<String, Value>,
    },
}

impl Transcription {
    /// The transcribed text
    pub fn text(&self) -> &str {
        match self {
            Transcription::Plain(text) => text,
            Transcription::Detailed { text, .. } => text,
        }
    }
}

/// Backend response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}
