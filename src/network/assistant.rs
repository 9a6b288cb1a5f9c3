use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EndpointSettings;
use crate::error::NetworkError;
use crate::network::types::{QueryRequest, QueryResponse};

/// Answers operator questions with retrieved passages.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn query(&self, question: &str) -> Result<Vec<String>, NetworkError>;
}

pub struct HttpKnowledgeBase {
    http: Client,
    url: String,
}

impl HttpKnowledgeBase {
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
}

#[async_trait]
impl KnowledgeBase for HttpKnowledgeBase {
    async fn query(&self, question: &str) -> Result<Vec<String>, NetworkError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, "Querying knowledge base at {}", self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&QueryRequest { question })
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

        let body: QueryResponse =
            response
                .json()
                .await
                .map_err(|source| NetworkError::MalformedResponse {
                    endpoint: self.url.clone(),
                    source,
                })?;
        debug!(%request_id, "Knowledge base returned {} chunks", body.answer_chunks.len());
        Ok(body
            .answer_chunks
            .into_iter()
            .map(|chunk| chunk.page_content)
            .collect())
    }
}
