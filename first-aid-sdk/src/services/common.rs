//! Common utilities for service clients
//!
//! This module provides shared functionality for building HTTP clients and
//! reading responses.

use std::fmt;

use reqwest::{header, Client};

use crate::error::{Result, ServiceError};

/// UserAgent structure for identifying the client to the backend
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "first-aid-assistant".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("first-aid-sdk".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build an HTTP client with a user agent and default headers.
///
/// No client-wide timeout is set; each request carries its own.
pub fn build_http_client(
    user_agent: Option<UserAgent>,
    mut headers: header::HeaderMap,
) -> Result<Client> {
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| ServiceError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .gzip(true)
        .build()
        .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
}
