//! Print submission transport.

use std::fmt;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::types::ExportError;
use crate::config::{PrintBodyFormat, PrintConfig};

/// Encoded drawing handed to the transport.
#[derive(Clone)]
pub struct PrintRequest {
    /// PNG bytes of the whole surface
    pub png: Vec<u8>,
}

impl fmt::Debug for PrintRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintRequest")
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

impl PrintRequest {
    /// The drawing as a `data:image/png;base64,...` URL.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }
}

/// Whatever the endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text (empty if it could not be read)
    pub body: String,
}

/// Abstraction over how a drawing reaches the printer. Mocked in tests.
#[async_trait]
pub trait PrintTransport: Send + Sync {
    /// Sends the drawing. `Err` means no response was received at all.
    async fn submit(&self, request: PrintRequest) -> Result<PrintResponse, ExportError>;
}

/// POSTs drawings to an HTTP endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    body: PrintBodyFormat,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, body: PrintBodyFormat) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ExportError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            body,
        })
    }

    pub fn from_config(config: &PrintConfig) -> Result<Self, ExportError> {
        Self::new(config.endpoint.clone(), config.body)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PrintTransport for HttpTransport {
    async fn submit(&self, request: PrintRequest) -> Result<PrintResponse, ExportError> {
        log::debug!("POST {} ({:?}, {:?})", self.endpoint, self.body, request);

        let builder = self.client.post(&self.endpoint);
        let builder = match self.body {
            PrintBodyFormat::Json => {
                builder.json(&serde_json::json!({ "image": request.data_url() }))
            }
            PrintBodyFormat::Multipart => {
                let part = reqwest::multipart::Part::bytes(request.png)
                    .file_name("drawing.png")
                    .mime_str("image/png")
                    .map_err(|e| ExportError::Transport(e.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part("image", part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to read print response body: {}", e);
                String::new()
            }
        };

        Ok(PrintResponse { status, body })
    }
}
