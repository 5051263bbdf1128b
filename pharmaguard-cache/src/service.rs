//! Client for the remote analysis service.

use log::{info, warn};
use pharmaguard_core::{AnnotationFile, Report};
use reqwest::blocking::{Client, multipart};
use serde_json::Value;

use super::consts::ANALYZE_PATH;
use super::errors::ServiceError;
use super::utils::normalize_base_url;

/// What the service answered for one analysis request.
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceResponse {
    Report(Report),
    Error { message: Option<String> },
}

/// The service sets `error` loosely; anything truthy counts.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ServiceResponse {
    ///
    /// Interpret a response body.
    ///
    /// An object with a truthy `error` field is a failure, carrying
    /// `error_message` when that's a non-empty string. Anything else must be a
    /// report body.
    ///
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        if body.get("error").is_some_and(is_truthy) {
            let message = body
                .get("error_message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            return Ok(ServiceResponse::Error { message });
        }

        serde_json::from_value::<Report>(body)
            .map(ServiceResponse::Report)
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

///
/// Runs an analysis of one annotation file for one drug.
///
pub trait AnalysisService {
    fn analyze(&self, file: &AnnotationFile, drug: &str) -> Result<ServiceResponse, ServiceError>;
}

/// [`AnalysisService`] over HTTP: a multipart POST to `<base>/analyze/`.
#[derive(Clone, Debug)]
pub struct HttpAnalysisService {
    api: String,
    client: Client,
}

impl HttpAnalysisService {
    pub fn new(api: &str) -> Self {
        HttpAnalysisService {
            api: normalize_base_url(api),
            client: Client::new(),
        }
    }

    fn analyze_url(&self) -> String {
        format!("{}{}", self.api, ANALYZE_PATH)
    }
}

impl AnalysisService for HttpAnalysisService {
    fn analyze(&self, file: &AnnotationFile, drug: &str) -> Result<ServiceResponse, ServiceError> {
        let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = multipart::Form::new()
            .part("vcf", part)
            .text("drug", drug.to_string());

        let url = self.analyze_url();
        info!("Sending {} ({} bytes) to {}", file.name, file.len(), url);
        let response = self.client.post(&url).multipart(form).send()?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().unwrap_or_default();
            warn!("Analysis request to {} failed with status {}", url, status);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                details,
            });
        }

        let body: Value = response.json()?;
        ServiceResponse::from_json(body)
    }
}
