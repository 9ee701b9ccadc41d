// src/analysis/submit.rs
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::path::Path;

use crate::config::{AnalysisResult, ServerSettings};
use crate::errors::AnalysisError;
use crate::file::AnalysisRequest;

/// Status and body of a finished HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one multipart upload to the server. Errors here mean the request
/// never completed.
pub trait Transport: Send + Sync {
    fn post_file(
        &self,
        url: &str,
        field_name: &str,
        request: AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &ServerSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_file(
        &self,
        url: &str,
        field_name: &str,
        request: AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError> {
        let part = multipart::Part::bytes(request.bytes)
            .file_name(request.file_name);
        let form = multipart::Form::new().part(field_name.to_string(), part);

        let response = self.client.post(url).multipart(form).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(RawResponse { status, body })
    }
}

// Only the field we care about; anything else in an error body is ignored
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turns a finished exchange into the analysis or the failure to show.
pub fn map_response(response: &RawResponse) -> Result<AnalysisResult, AnalysisError> {
    let server_error = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.error);

    if !response.is_success() {
        return Err(AnalysisError::http(response.status, server_error));
    }

    if let Some(message) = server_error {
        return Err(AnalysisError::Http { status: response.status, message });
    }

    serde_json::from_str::<AnalysisResult>(&response.body).map_err(|e| {
        AnalysisError::MalformedResponse { message: e.to_string() }
    })
}

pub struct Submitter<T: Transport> {
    transport: T,
    url: String,
    field_name: String,
}

impl Submitter<HttpTransport> {
    pub fn from_settings(settings: &ServerSettings) -> anyhow::Result<Self> {
        Ok(Self::new(HttpTransport::new(settings)?, settings))
    }
}

impl<T: Transport> Submitter<T> {
    pub fn new(transport: T, settings: &ServerSettings) -> Self {
        Self {
            transport,
            url: settings.analyze_url(),
            field_name: settings.field_name.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reads `path` and uploads it. Blocks on both, so run it off the UI
    /// thread.
    pub fn submit_file(&self, path: &Path) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::from_selection(Some(path))?;
        self.submit(request)
    }

    /// Blocks until the server has answered.
    pub fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            "POST {} ({} = {}, {} bytes)",
            self.url,
            self.field_name,
            request.file_name,
            request.size()
        );

        let response = self.transport.post_file(&self.url, &self.field_name, request)?;
        tracing::debug!("{} answered {}", self.url, response.status);

        map_response(&response)
    }
}
