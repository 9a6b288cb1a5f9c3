//! Wire formats of the processing and knowledge-query services.

use serde::{Deserialize, Serialize};

use crate::common::DetectionEvent;

#[derive(Debug, Deserialize)]
pub struct ProcessVideoResponse {
    pub events: Vec<DetectionEvent>,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub answer_chunks: Vec<AnswerChunk>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerChunk {
    pub page_content: String,
}
