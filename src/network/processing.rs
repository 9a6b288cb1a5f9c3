use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::DetectionEvent;
use crate::config::EndpointSettings;
use crate::error::NetworkError;
use crate::network::types::ProcessVideoResponse;

const VIDEO_FIELD: &str = "video";

/// Runs detection over a whole video and returns every event it found.
#[async_trait]
pub trait VideoProcessor: Send + Sync {
    async fn process_video(&self, path: &Path) -> Result<Vec<DetectionEvent>, NetworkError>;
}

pub struct HttpVideoProcessor {
    http: Client,
    url: String,
}

impl HttpVideoProcessor {
    pub fn new(settings: &EndpointSettings) -> Result<Self, NetworkError> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(NetworkError::ClientBuild)?;
        Ok(Self {
            http,
            url: settings.url.clone(),
        })
    }

    /// Streams the file from disk rather than buffering it.
    async fn video_part(path: &Path) -> Result<Part, NetworkError> {
        let read_error = |source| NetworkError::ReadFile {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).await.map_err(read_error)?;
        let len = file.metadata().await.map_err(read_error)?.len();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        let body = Body::wrap_stream(ReaderStream::new(file));
        Ok(Part::stream_with_length(body, len).file_name(file_name))
    }
}

#[async_trait]
impl VideoProcessor for HttpVideoProcessor {
    async fn process_video(&self, path: &Path) -> Result<Vec<DetectionEvent>, NetworkError> {
        let request_id = Uuid::new_v4();
        let form = Form::new().part(VIDEO_FIELD, Self::video_part(path).await?);

        info!(%request_id, "Uploading {} to {}", path.display(), self.url);
        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                endpoint: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(NetworkError::Status {
                endpoint: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: ProcessVideoResponse =
            response
                .json()
                .await
                .map_err(|source| NetworkError::MalformedResponse {
                    endpoint: self.url.clone(),
                    source,
                })?;
        debug!(%request_id, "Processing returned {} events", body.events.len());
        Ok(body.events)
    }
}
