//! First-aid backend client implementation
//!
//! One method per backend endpoint. Every call carries its own timeout and
//! resolves to a typed [`Result`]; nothing is retried or cached.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{BackendConfig, ServiceConfig};
use crate::core::FirstAidApi;
use crate::error::mapping::{envelope_error, map_http_error};
use crate::error::{Result, ServiceError};
use crate::services::common::{build_http_client, UserAgent};
use crate::util::generate_request_id;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client for the first-aid analysis backend
#[derive(Debug, Clone)]
pub struct FirstAidClient {
    /// HTTP client, reused across calls for connection pooling
    http_client: Client,

    /// Configuration
    config: BackendConfig,
}

impl FirstAidClient {
    /// Create a client configured from `FIRST_AID_*` environment variables
    pub fn new() -> Result<Self> {
        Self::from_config(BackendConfig::from_env()?)
    }

    /// Create a client from an explicit configuration
    pub fn from_config(config: BackendConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a new builder for the client
    pub fn builder() -> FirstAidClientBuilder {
        FirstAidClientBuilder::default()
    }

    /// Base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.config.backend_url
    }

    /// Active configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Upload an injury photo for analysis
    pub async fn analyze_image(&self, image: Upload, age_group: Option<AgeGroup>) -> Result<ImageAnalysis> {
        let form = image.into_form()?;
        let mut request = self.http_client.post(self.endpoint(&["analyze", "image"])?);
        if let Some(age_group) = age_group {
            request = request.query(&[("age_group", age_group.as_str())]);
        }

        self.fetch(request.multipart(form), self.config.analysis_timeout).await
    }

    /// Generate first-aid steps for a described injury.
    ///
    /// A request without an age group is sent with the configured default.
    pub async fn generate_guidance(&self, request: &GuidanceRequest) -> Result<FirstAidGuidance> {
        let mut params = request.to_query_params();
        params
            .entry("age_group".to_string())
            .or_insert_with(|| self.config.default_age_group.to_string());

        let builder = self
            .http_client
            .post(self.endpoint(&["first-aid", "generate"])?)
            .query(&params);

        self.fetch(builder, self.config.analysis_timeout).await
    }

    /// Fetch the emergency checklist for an injury type
    pub async fn emergency_guidance(&self, injury_type: &str) -> Result<EmergencyGuidance> {
        let builder = self
            .http_client
            .get(self.endpoint(&["first-aid", "emergency", injury_type])?);

        self.fetch(builder, self.config.lookup_timeout).await
    }

    /// Fetch prevention tips for an injury type
    pub async fn prevention_tips(&self, injury_type: &str) -> Result<PreventionTips> {
        let builder = self
            .http_client
            .get(self.endpoint(&["first-aid", "prevention", injury_type])?);

        self.fetch(builder, self.config.lookup_timeout).await
    }

    /// Send recorded audio for transcription
    pub async fn transcribe_audio(&self, audio: Upload) -> Result<Transcription> {
        let form = audio.into_form()?;
        let builder = self
            .http_client
            .post(self.endpoint(&["voice-input", "transcribe"])?)
            .multipart(form);

        self.fetch(builder, self.config.analysis_timeout).await
    }

    /// Ask the backend to extract injury details from a transcription
    pub async fn parse_injury(&self, transcription: &str) -> Result<Value> {
        self.voice_text_query("parse-injury", "transcription", transcription).await
    }

    /// Ask the backend for the injury type described in the text
    pub async fn detect_injury_type(&self, voice_text: &str) -> Result<Value> {
        self.voice_text_query("detect-injury-type", "voice_text", voice_text).await
    }

    /// Ask the backend for the severity described in the text
    pub async fn detect_severity(&self, voice_text: &str) -> Result<Value> {
        self.voice_text_query("detect-severity", "voice_text", voice_text).await
    }

    /// Ask the backend whether the text describes an emergency
    pub async fn detect_emergency(&self, voice_text: &str) -> Result<Value> {
        self.voice_text_query("detect-emergency", "voice_text", voice_text).await
    }

    /// Status of the backend's voice input service
    pub async fn voice_input_status(&self) -> Result<Value> {
        let builder = self.http_client.get(self.endpoint(&["voice-input", "status"])?);
        self.fetch(builder, self.config.lookup_timeout).await
    }

    /// Probe `GET /health`. True only for a literal 200; never fails.
    pub async fn health_check(&self) -> bool {
        let url = match self.endpoint(&["health"]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Health check skipped: {}", e);
                return false;
            }
        };

        debug!("Sending request to backend: GET {}", url);
        let result = self
            .http_client
            .get(url)
            .timeout(self.config.health_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                warn!("Backend health check returned HTTP {}", response.status().as_u16());
                false
            }
            Err(e) => {
                warn!("Backend health check failed: {}", e);
                false
            }
        }
    }
}

// Private helper methods for the first-aid client
impl FirstAidClient {
    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.backend_url).map_err(|e| {
            ServiceError::configuration(format!("Invalid backend URL {}: {}", self.config.backend_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::configuration(format!(
                    "Backend URL cannot have a path: {}",
                    self.config.backend_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn voice_text_query(&self, action: &str, param: &str, text: &str) -> Result<Value> {
        let builder = self
            .http_client
            .post(self.endpoint(&["voice-input", action])?)
            .query(&[(param, text)]);

        self.fetch(builder, self.config.lookup_timeout).await
    }

    /// Send a request and decode the `data` field of the response envelope
    async fn fetch<R>(&self, builder: RequestBuilder, timeout: Duration) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let request = builder
            .timeout(timeout)
            .header(REQUEST_ID_HEADER, generate_request_id())
            .build()
            .map_err(|e| ServiceError::unexpected(format!("Failed to build request: {}", e)))?;

        debug!("Sending request to backend: {} {}", request.method(), request.url());

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!("Backend returned HTTP {}", status.as_u16());
            return Err(map_http_error(status, &body));
        }

        let envelope: Envelope = serde_json::from_str(&body)?;

        if let Some(message) = envelope_error(&envelope) {
            warn!("Backend reported an error: {}", message);
            return Err(ServiceError::backend(message));
        }

        let data = envelope
            .data
            .ok_or_else(|| ServiceError::unexpected("Unexpected response format: missing data field"))?;

        Ok(serde_json::from_value(data)?)
    }

    /// Classify a transport failure against this client's base URL
    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        error!("Request to backend failed: {}", err);

        if err.is_timeout() {
            ServiceError::timeout(err.to_string())
        } else if err.is_connect() {
            ServiceError::unreachable(self.config.backend_url.clone(), err.to_string())
        } else {
            ServiceError::from(err)
        }
    }
}

#[async_trait]
impl FirstAidApi for FirstAidClient {
    async fn health_check(&self) -> bool {
        FirstAidClient::health_check(self).await
    }

    async fn analyze_image(&self, image: Upload, age_group: Option<AgeGroup>) -> Result<ImageAnalysis> {
        FirstAidClient::analyze_image(self, image, age_group).await
    }

    async fn generate_guidance(&self, request: &GuidanceRequest) -> Result<FirstAidGuidance> {
        FirstAidClient::generate_guidance(self, request).await
    }

    async fn emergency_guidance(&self, injury_type: &str) -> Result<EmergencyGuidance> {
        FirstAidClient::emergency_guidance(self, injury_type).await
    }

    async fn prevention_tips(&self, injury_type: &str) -> Result<PreventionTips> {
        FirstAidClient::prevention_tips(self, injury_type).await
    }

    async fn transcribe_audio(&self, audio: Upload) -> Result<Transcription> {
        FirstAidClient::transcribe_audio(self, audio).await
    }
}

/// Builder for the first-aid client
#[derive(Debug, Default)]
pub struct FirstAidClientBuilder {
    /// Starting configuration, defaults when absent
    config: Option<BackendConfig>,

    base_url: Option<String>,
    analysis_timeout: Option<Duration>,
    lookup_timeout: Option<Duration>,
    health_timeout: Option<Duration>,
    default_age_group: Option<AgeGroup>,

    /// User agent override
    user_agent: Option<UserAgent>,

    /// Extra headers sent with every request
    headers: HashMap<String, String>,
}

impl FirstAidClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: BackendConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Timeout for image analysis, guidance generation and transcription
    pub fn analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = Some(timeout);
        self
    }

    /// Timeout for emergency, prevention and voice text lookups
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// Timeout for the health probe
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = Some(timeout);
        self
    }

    /// Apply one timeout to every request class
    pub fn timeout(self, timeout: Duration) -> Self {
        self.analysis_timeout(timeout)
            .lookup_timeout(timeout)
            .health_timeout(timeout)
    }

    pub fn default_age_group(mut self, age_group: AgeGroup) -> Self {
        self.default_age_group = Some(age_group);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FirstAidClient> {
        let mut config = self.config.unwrap_or_default();

        if let Some(base_url) = self.base_url {
            config = config.with_backend_url(base_url);
        }
        if let Some(timeout) = self.analysis_timeout {
            config.analysis_timeout = timeout;
        }
        if let Some(timeout) = self.lookup_timeout {
            config.lookup_timeout = timeout;
        }
        if let Some(timeout) = self.health_timeout {
            config.health_timeout = timeout;
        }
        if let Some(age_group) = self.default_age_group {
            config.default_age_group = age_group;
        }

        config.validate()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ServiceError::configuration(format!("Invalid header name {}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ServiceError::configuration(format!("Invalid header value for {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let http_client = build_http_client(self.user_agent, headers)?;

        Ok(FirstAidClient { http_client, config })
    }
}
