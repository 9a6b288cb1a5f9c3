use tracing::error;

use crate::common::message::{KNOWLEDGE_BASE_UNREACHABLE, NO_RELEVANT_INFORMATION};
use crate::common::ChatMessage;
use crate::network::KnowledgeBase;

const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// Joins retrieved passages into one reply.
pub fn compose_answer(chunks: &[String]) -> String {
    let text = chunks.join(CHUNK_SEPARATOR);
    if text.is_empty() {
        NO_RELEVANT_INFORMATION.to_string()
    } else {
        text
    }
}

/// Asks the knowledge base and always produces an assistant message.
pub async fn answer(knowledge_base: &dyn KnowledgeBase, question: &str) -> ChatMessage {
    match knowledge_base.query(question).await {
        Ok(chunks) => ChatMessage::assistant(compose_answer(&chunks)),
        Err(e) => {
            error!("Failed to query knowledge base: {}", e);
            ChatMessage::assistant(KNOWLEDGE_BASE_UNREACHABLE)
        }
    }
}
